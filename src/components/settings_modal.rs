use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::EditorSettings;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: EditorSettings,
    pub on_close: Callback<()>,
    pub on_save: Callback<EditorSettings>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    let draft = use_state(|| props.settings.clone());
    {
        let draft = draft.clone();
        use_effect_with((props.show, props.settings.clone()), move |(_, settings)| {
            draft.set(settings.clone());
            || ()
        });
    }

    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let endpoint_cb = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.endpoint = input.value();
            draft.set(next);
        })
    };
    let tap_window_cb = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<f64>() {
                let mut next = (*draft).clone();
                next.gesture.tap_window_ms = v.clamp(100.0, 1000.0);
                draft.set(next);
            }
        })
    };
    let swipe_velocity_cb = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<f64>() {
                let mut next = (*draft).clone();
                next.gesture.swipe_min_velocity = v.clamp(0.05, 5.0);
                draft.set(next);
            }
        })
    };
    let save_cb = {
        let draft = draft.clone();
        let cb = props.on_save.clone();
        // Round-trip through the parser so a blank endpoint falls back like a stored one would.
        Callback::from(move |_| match serde_json::to_string(&*draft) {
            Ok(raw) => cb.emit(EditorSettings::from_json(&raw)),
            Err(e) => log::error!("could not encode settings: {}", e),
        })
    };
    let defaults_cb = {
        let cb = props.on_save.clone();
        Callback::from(move |_| {
            let confirmed = web_sys::window()
                .map(|win| win.confirm_with_message("Restore default settings?").unwrap_or(false))
                .unwrap_or(true);
            if confirmed {
                cb.emit(EditorSettings::default());
            }
        })
    };

    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; flex-direction:column; gap:4px;">
                    <span>{"Processing endpoint"}</span>
                    <input type="text" value={draft.endpoint.clone()} onchange={endpoint_cb} />
                </label>
                <label style="display:flex; flex-direction:column; gap:4px;">
                    <span>{ format!("Double-tap window: {} ms", draft.gesture.tap_window_ms) }</span>
                    <input type="range" min="100" max="1000" step="50" value={draft.gesture.tap_window_ms.to_string()} onchange={tap_window_cb} />
                </label>
                <label style="display:flex; flex-direction:column; gap:4px;">
                    <span>{ format!("Swipe sensitivity: {:.2} px/ms", draft.gesture.swipe_min_velocity) }</span>
                    <input type="number" min="0.05" max="5" step="0.05" value={draft.gesture.swipe_min_velocity.to_string()} onchange={swipe_velocity_cb} />
                </label>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={defaults_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Restore Defaults"}</button>
                <button onclick={save_cb} style="flex:0 0 auto;">{"Save"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Settings are kept in this browser only."}</div>
        </div>
    </div>}
}

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::model::{FrameSettings, FrameStyle, TextOverlay, TextStyle, FONT_FAMILIES, FONT_SIZE_RANGE};

#[derive(Properties, PartialEq, Clone)]
pub struct FramesPanelProps {
    pub frame: FrameSettings,
    pub overlays: Vec<TextOverlay>,
    pub on_change: Callback<FrameSettings>,
    pub on_add_text: Callback<(String, TextStyle)>,
    pub on_remove_text: Callback<u64>,
}

#[function_component]
pub fn FramesPanel(props: &FramesPanelProps) -> Html {
    let draft = use_state(String::new);
    let text_style = use_state(TextStyle::default);

    let color_cb = {
        let frame = props.frame.clone();
        let cb = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(FrameSettings { color: input.value(), ..frame.clone() });
        })
    };

    let draft_cb = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };
    let size_cb = {
        let text_style = text_style.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(size) = input.value().parse::<u32>() {
                text_style.set(TextStyle { font_size: size, ..(*text_style).clone() });
            }
        })
    };
    let text_color_cb = {
        let text_style = text_style.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_style.set(TextStyle { color: input.value(), ..(*text_style).clone() });
        })
    };
    let family_cb = {
        let text_style = text_style.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            text_style.set(TextStyle { font_family: select.value(), ..(*text_style).clone() });
        })
    };
    let add_cb = {
        let draft = draft.clone();
        let text_style = text_style.clone();
        let cb = props.on_add_text.clone();
        Callback::from(move |_| {
            if !draft.trim().is_empty() {
                cb.emit(((*draft).clone(), (*text_style).clone()));
                draft.set(String::new());
            }
        })
    };

    let (min_size, max_size) = FONT_SIZE_RANGE;

    html! {<div style="display:flex; flex-direction:column; gap:10px;">
        <h4 style="margin:0;">{"Frames"}</h4>
        <div style="display:grid; grid-template-columns:repeat(2, 1fr); gap:6px;">
            { for FrameStyle::ALL.iter().map(|&style_kind| {
                let frame = props.frame.clone();
                let cb = props.on_change.clone();
                let onclick = Callback::from(move |_| cb.emit(FrameSettings { style: style_kind, ..frame.clone() }));
                let style = if props.frame.style == style_kind { "background:#1f6feb; color:#fff;" } else { "" };
                html! { <button key={style_kind.label()} {onclick} {style}>{ style_kind.label() }</button> }
            }) }
        </div>
        { if props.frame.style != FrameStyle::None { html! {
            <label style="display:flex; align-items:center; gap:8px;">
                <span style="font-size:12px;">{"Frame color"}</span>
                <input type="color" value={props.frame.color.clone()} oninput={color_cb} />
            </label>
        } } else { html!{} } }

        <h4 style="margin:6px 0 0 0;">{"Text"}</h4>
        <input type="text" placeholder="Enter text..." value={(*draft).clone()} oninput={draft_cb} />
        <label style="display:flex; align-items:center; gap:8px; font-size:12px;">
            <span style="width:64px;">{"Size"}</span>
            <input type="range" min={min_size.to_string()} max={max_size.to_string()} step="1"
                value={text_style.font_size.to_string()} oninput={size_cb} style="flex:1;" />
            <span style="width:36px; text-align:right;">{ format!("{}px", text_style.font_size) }</span>
        </label>
        <div style="display:flex; gap:8px; align-items:center; font-size:12px;">
            <span style="width:64px;">{"Color"}</span>
            <input type="color" value={text_style.color.clone()} oninput={text_color_cb} />
            <select onchange={family_cb} style="flex:1;">
                { for FONT_FAMILIES.iter().map(|&f| html! {
                    <option key={f} value={f} selected={text_style.font_family == f}>{ f }</option>
                }) }
            </select>
        </div>
        <button onclick={add_cb} disabled={draft.trim().is_empty()}>{"Add Text"}</button>

        { if !props.overlays.is_empty() { html! {
            <div style="display:flex; flex-direction:column; gap:4px;">
                { for props.overlays.iter().map(|o| {
                    let cb = props.on_remove_text.clone();
                    let id = o.id;
                    let onclick = Callback::from(move |_| cb.emit(id));
                    html! {
                        <div key={o.id} style="display:flex; align-items:center; gap:6px; background:#161b22; border-radius:4px; padding:4px 6px;">
                            <span style="flex:1; font-size:12px; overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">{ o.content.clone() }</span>
                            <button {onclick} title="Remove" style="color:#f85149;">{"✕"}</button>
                        </div>
                    }
                }) }
            </div>
        } } else { html!{} } }
    </div>}
}

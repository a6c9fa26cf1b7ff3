use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::state::effects::{EffectParameter, ParamDef, ParamValue, PendingEffect, EFFECT_CATALOG};

#[derive(Properties, PartialEq, Clone)]
pub struct EffectsPanelProps {
    pub pending: Option<PendingEffect>,
    pub active: Option<&'static str>,
    pub processing: bool,
    pub on_select: Callback<&'static str>,
    pub on_param: Callback<(String, ParamValue)>,
    pub on_apply: Callback<()>,
    pub on_clear: Callback<()>,
}

fn param_control(def: &ParamDef, value: Option<&ParamValue>, on_param: &Callback<(String, ParamValue)>) -> Html {
    let name = def.name;
    let cb = on_param.clone();
    match def.param {
        EffectParameter::Slider { min, max, step, default } => {
            let v = value.and_then(ParamValue::as_number).unwrap_or(default);
            let oninput = Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                if let Ok(n) = input.value().parse::<f64>() {
                    cb.emit((name.to_string(), ParamValue::Number(n)));
                }
            });
            html! {
                <label style="display:flex; flex-direction:column; gap:2px; font-size:12px;">
                    <span>{ format!("{}: {:.1}", name, v) }</span>
                    <input type="range" min={min.to_string()} max={max.to_string()} step={step.to_string()}
                        value={v.to_string()} {oninput} />
                </label>
            }
        }
        EffectParameter::Number { default } => {
            let v = value.and_then(ParamValue::as_number).unwrap_or(default);
            let onchange = Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                if let Ok(n) = input.value().parse::<f64>() {
                    cb.emit((name.to_string(), ParamValue::Number(n)));
                }
            });
            html! {
                <label style="display:flex; flex-direction:column; gap:2px; font-size:12px;">
                    <span>{ name }</span>
                    <input type="number" value={v.to_string()} {onchange} />
                </label>
            }
        }
        EffectParameter::Select { options, default } => {
            let current = value.and_then(ParamValue::as_text).unwrap_or(default).to_string();
            let onchange = Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                cb.emit((name.to_string(), ParamValue::Text(select.value())));
            });
            html! {
                <label style="display:flex; flex-direction:column; gap:2px; font-size:12px;">
                    <span>{ name }</span>
                    <select {onchange}>
                        { for options.iter().map(|o| html! {
                            <option key={*o} value={*o} selected={current == *o}>{ *o }</option>
                        }) }
                    </select>
                </label>
            }
        }
        EffectParameter::Color { default } => {
            let current = value.and_then(ParamValue::as_text).unwrap_or(default).to_string();
            let oninput = Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                cb.emit((name.to_string(), ParamValue::Text(input.value())));
            });
            html! {
                <label style="display:flex; align-items:center; gap:8px; font-size:12px;">
                    <span>{ name }</span>
                    <input type="color" value={current} {oninput} />
                </label>
            }
        }
    }
}

#[function_component]
pub fn EffectsPanel(props: &EffectsPanelProps) -> Html {
    let apply_cb = {
        let cb = props.on_apply.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let clear_cb = {
        let cb = props.on_clear.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let selected = props.pending.as_ref().map(|p| p.effect.id);

    html! {<div style="display:flex; flex-direction:column; gap:10px;">
        <h4 style="margin:0;">{"AI Effects"}</h4>
        { if let Some(id) = props.active { html!{
            <div style="font-size:11px; opacity:0.7;">{ format!("Last applied: {}", id) }</div>
        } } else { html!{} } }
        <div style="display:flex; flex-direction:column; gap:6px;">
            { for EFFECT_CATALOG.iter().filter(|e| !e.is_geometry()).map(|effect| {
                let cb = props.on_select.clone();
                let id = effect.id;
                let onclick = Callback::from(move |_| cb.emit(id));
                let border = if selected == Some(id) { "#388bfd" } else { "#30363d" };
                html! {
                    <button key={id} {onclick} disabled={props.processing}
                        style={format!("text-align:left; border:1px solid {}; border-radius:6px; padding:6px 8px;", border)}>
                        <div>{ format!("{} {}", effect.icon, effect.label) }</div>
                        <div style="font-size:11px; opacity:0.7;">{ effect.description }</div>
                    </button>
                }
            }) }
        </div>
        { if let Some(p) = &props.pending { html! {
            <div style="display:flex; flex-direction:column; gap:8px; border-top:1px solid #30363d; padding-top:8px;">
                { for p.effect.params.iter().map(|def| param_control(def, p.params.get(def.name), &props.on_param)) }
                <div style="display:flex; gap:6px;">
                    <button onclick={apply_cb} disabled={props.processing} style="flex:1; background:#238636; color:#fff;">
                        { if props.processing { "Processing…".to_string() } else { format!("Apply {}", p.effect.label) } }
                    </button>
                    <button onclick={clear_cb} disabled={props.processing}>{"Cancel"}</button>
                </div>
            </div>
        } } else { html!{} } }
    </div>}
}

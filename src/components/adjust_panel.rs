use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::state::effects::{Adjustment, Adjustments, ADJUSTMENTS};

#[derive(Properties, PartialEq, Clone)]
pub struct AdjustPanelProps {
    pub values: Adjustments,
    pub on_change: Callback<(Adjustment, f64)>,
    pub on_reset: Callback<()>,
}

#[function_component]
pub fn AdjustPanel(props: &AdjustPanelProps) -> Html {
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="display:flex; flex-direction:column; gap:10px;">
        <h4 style="margin:0;">{"Adjust"}</h4>
        { for ADJUSTMENTS.iter().map(|spec| {
            let cb = props.on_change.clone();
            let kind = spec.kind;
            let oninput = Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                if let Ok(v) = input.value().parse::<f64>() {
                    cb.emit((kind, v));
                }
            });
            let value = props.values.get(kind);
            html! {
                <label key={spec.label} style="display:flex; flex-direction:column; gap:2px;">
                    <span style="display:flex; justify-content:space-between; font-size:12px;">
                        <span>{ format!("{} {}", spec.icon, spec.label) }</span>
                        <span style="opacity:0.7;">{ format!("{:.1}", value) }</span>
                    </span>
                    <input type="range"
                        min={spec.min.to_string()} max={spec.max.to_string()} step={spec.step.to_string()}
                        value={value.to_string()} {oninput} />
                </label>
            }
        }) }
        <button onclick={reset_cb}>{"Reset Adjustments"}</button>
        <div style="font-size:11px; opacity:0.6;">{"Adjustments are previewed live and do not change the image history."}</div>
    </div>}
}

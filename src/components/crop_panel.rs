use yew::prelude::*;

use crate::model::Rect;
use crate::state::ASPECT_PRESETS;
use crate::util::format_dims;

#[derive(Properties, PartialEq, Clone)]
pub struct CropPanelProps {
    pub lock: Option<f64>,
    pub rect: Option<Rect>,
    pub processing: bool,
    pub on_lock: Callback<Option<f64>>,
    pub on_apply: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_cancel: Callback<()>,
}

fn same_ratio(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => (x - y).abs() < 1e-6,
        _ => false,
    }
}

#[function_component]
pub fn CropPanel(props: &CropPanelProps) -> Html {
    let apply_cb = {
        let cb = props.on_apply.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cancel_cb = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let size = props
        .rect
        .map(|r| format_dims(r.width.round() as u32, r.height.round() as u32))
        .unwrap_or_else(|| "-".to_string());

    html! {<div style="display:flex; flex-direction:column; gap:10px;">
        <h4 style="margin:0;">{"Crop"}</h4>
        <div style="font-size:12px; opacity:0.8;">{"Aspect ratio"}</div>
        <div style="display:grid; grid-template-columns:repeat(3, 1fr); gap:6px;">
            { for ASPECT_PRESETS.iter().map(|preset| {
                let cb = props.on_lock.clone();
                let ratio = preset.ratio;
                let active = same_ratio(props.lock, ratio);
                let style = if active { "background:#1f6feb; color:#fff;" } else { "" };
                html! {
                    <button key={preset.label} {style} onclick={Callback::from(move |_| cb.emit(ratio))}>{ preset.label }</button>
                }
            }) }
        </div>
        <div style="font-size:12px; opacity:0.8;">{ format!("Selection: {}", size) }</div>
        <div style="font-size:11px; opacity:0.6;">{"Drag the box to move it, drag a handle to resize."}</div>
        <div style="display:flex; gap:6px;">
            <button onclick={apply_cb} disabled={props.processing || props.rect.is_none()} style="flex:1; background:#238636; color:#fff;">
                { if props.processing { "Cropping…" } else { "Apply Crop" } }
            </button>
            <button onclick={reset_cb} disabled={props.processing}>{"Reset"}</button>
            <button onclick={cancel_cb} disabled={props.processing}>{"Cancel"}</button>
        </div>
    </div>}
}

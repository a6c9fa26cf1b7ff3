use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::model::{ImageMetadata, Interpolation, ResizeSettings, SizeUnit, SIZE_PRESETS};
use crate::util::{format_dims, format_ratio, parse_u32};

#[derive(Properties, PartialEq, Clone)]
pub struct ResizePanelProps {
    pub settings: ResizeSettings,
    pub metadata: Option<ImageMetadata>,
    pub processing: bool,
    pub on_change: Callback<ResizeSettings>,
    pub on_apply: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component]
pub fn ResizePanel(props: &ResizePanelProps) -> Html {
    let s = &props.settings;
    let (orig_w, orig_h) = props.metadata.map(|m| (m.original_width, m.original_height)).unwrap_or((0, 0));
    let percent = s.unit == SizeUnit::Percent;

    // Builds a callback that edits a copy of the settings and emits it.
    let edit = |f: fn(&mut ResizeSettings, &str, (u32, u32))| {
        let settings = props.settings.clone();
        let cb = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = settings.clone();
            f(&mut next, &input.value(), (orig_w, orig_h));
            cb.emit(next);
        })
    };

    let width_cb = edit(|s, raw, (ow, oh)| {
        let Some(v) = parse_u32(raw).filter(|v| *v > 0) else {
            return;
        };
        match s.unit {
            SizeUnit::Px => s.set_width(v),
            SizeUnit::Percent => s.set_scale_percent(v, ow, oh),
        }
    });
    let height_cb = edit(|s, raw, _| {
        if let Some(v) = parse_u32(raw).filter(|v| *v > 0) {
            s.set_height(v);
        }
    });
    let link_cb = {
        let settings = props.settings.clone();
        let cb = props.on_change.clone();
        Callback::from(move |_| {
            let mut next = settings.clone();
            next.set_linked(!settings.maintain_aspect_ratio);
            cb.emit(next);
        })
    };
    let unit_cb = {
        let settings = props.settings.clone();
        let cb = props.on_change.clone();
        Callback::from(move |_| {
            let mut next = settings.clone();
            next.unit = match settings.unit {
                SizeUnit::Px => SizeUnit::Percent,
                SizeUnit::Percent => SizeUnit::Px,
            };
            cb.emit(next);
        })
    };
    let interp_cb = {
        let settings = props.settings.clone();
        let cb = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(i) = Interpolation::from_key(&select.value()) {
                let mut next = settings.clone();
                next.interpolation = i;
                cb.emit(next);
            }
        })
    };
    let apply_cb = {
        let cb = props.on_apply.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cancel_cb = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let width_value = if percent { s.scale_percent(orig_w) } else { s.width };

    html! {<div style="display:flex; flex-direction:column; gap:10px;">
        <h4 style="margin:0;">{"Resize"}</h4>
        <div style="font-size:12px; opacity:0.8;">
            { format!("Original: {} ({})", format_dims(orig_w, orig_h), format_ratio(orig_w, orig_h)) }
        </div>
        <div style="display:flex; gap:6px; align-items:flex-end;">
            <label style="display:flex; flex-direction:column; gap:2px; flex:1;">
                <span style="font-size:12px;">{ if percent { "Scale (%)" } else { "Width (px)" } }</span>
                <input type="number" min="1" value={width_value.to_string()} onchange={width_cb} />
            </label>
            <button onclick={link_cb} title="Lock aspect ratio">{ if s.maintain_aspect_ratio { "🔗" } else { "🔓" } }</button>
            <label style="display:flex; flex-direction:column; gap:2px; flex:1;">
                <span style="font-size:12px;">{"Height (px)"}</span>
                <input type="number" min="1" value={s.height.to_string()} disabled={percent} onchange={height_cb} />
            </label>
        </div>
        <button onclick={unit_cb}>{ if percent { "Use pixels" } else { "Use percent" } }</button>
        <label style="display:flex; flex-direction:column; gap:2px;">
            <span style="font-size:12px;">{"Interpolation"}</span>
            <select onchange={interp_cb}>
                { for Interpolation::ALL.iter().map(|i| html! {
                    <option key={i.key()} value={i.key()} selected={*i == s.interpolation}>{ i.label() }</option>
                }) }
            </select>
        </label>
        <div style="font-size:12px; opacity:0.8;">{"Presets"}</div>
        <div style="display:grid; grid-template-columns:repeat(2, 1fr); gap:6px;">
            { for SIZE_PRESETS.iter().map(|preset| {
                let settings = props.settings.clone();
                let cb = props.on_change.clone();
                let onclick = Callback::from(move |_| {
                    let mut next = settings.clone();
                    next.apply_preset(preset);
                    cb.emit(next);
                });
                html! {
                    <button key={preset.label} {onclick} style="font-size:11px;">
                        { format!("{} ({})", preset.label, format_dims(preset.width, preset.height)) }
                    </button>
                }
            }) }
        </div>
        <div style="font-size:12px;">{ format!("New size: {}", format_dims(s.width, s.height)) }</div>
        <div style="display:flex; gap:6px;">
            <button onclick={apply_cb} disabled={props.processing} style="flex:1; background:#238636; color:#fff;">
                { if props.processing { "Resizing…" } else { "Apply Resize" } }
            </button>
            <button onclick={cancel_cb} disabled={props.processing}>{"Cancel"}</button>
        </div>
    </div>}
}

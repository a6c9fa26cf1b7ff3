use yew::prelude::*;

use crate::model::Tool;

#[derive(Properties, PartialEq, Clone)]
pub struct EditorToolbarProps {
    pub active: Tool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub processing: bool,
    pub dimensions: Option<String>,
    pub on_tool: Callback<Tool>,
    pub on_undo: Callback<()>,
    pub on_redo: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_new_image: Callback<()>,
    pub on_export: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn EditorToolbar(props: &EditorToolbarProps) -> Html {
    let undo_cb = {
        let cb = props.on_undo.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let redo_cb = {
        let cb = props.on_redo.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| {
            let confirmed = web_sys::window()
                .map(|win| {
                    win.confirm_with_message("Discard all edits and return to the original image?")
                        .unwrap_or(false)
                })
                .unwrap_or(true);
            if confirmed {
                cb.emit(());
            }
        })
    };
    let new_cb = {
        let cb = props.on_new_image.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let export_cb = {
        let cb = props.on_export.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let busy = props.processing;

    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; flex-wrap:wrap; gap:6px; align-items:center;">
        { for Tool::ALL.iter().map(|&tool| {
            let cb = props.on_tool.clone();
            let active = props.active == tool;
            // Clicking the active tool closes it.
            let onclick = Callback::from(move |_| cb.emit(if active { Tool::None } else { tool }));
            let style = if active { "background:#1f6feb; color:#fff; border:1px solid #388bfd;" } else { "" };
            html! { <button key={tool.label()} {onclick} {style} disabled={busy}>{ tool.label() }</button> }
        }) }
        <span style="flex:1;"></span>
        { if let Some(d) = &props.dimensions { html!{ <span style="font-size:12px; opacity:0.7;">{ d.clone() }</span> } } else { html!{} } }
        <button onclick={undo_cb} disabled={busy || !props.can_undo} title="Undo">{"↶ Undo"}</button>
        <button onclick={redo_cb} disabled={busy || !props.can_redo} title="Redo">{"↷ Redo"}</button>
        <button onclick={reset_cb} disabled={busy}>{"Reset"}</button>
        <button onclick={new_cb} disabled={busy}>{"New Image"}</button>
        <button onclick={export_cb} disabled={busy} title="Download the current image">{"Export"}</button>
        <button onclick={settings_cb}>{"Settings"}</button>
    </div>}
}

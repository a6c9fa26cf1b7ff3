use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct UploadZoneProps {
    pub on_file: Callback<File>,
}

fn is_image(file: &File) -> bool {
    file.type_().starts_with("image/")
}

#[function_component]
pub fn UploadZone(props: &UploadZoneProps) -> Html {
    let hovering = use_state(|| false);
    let rejected = use_state(|| false);

    let pick = {
        let cb = props.on_file.clone();
        let rejected = rejected.clone();
        move |file: Option<File>| match file {
            Some(f) if is_image(&f) => {
                rejected.set(false);
                cb.emit(f);
            }
            Some(f) => {
                log::warn!("rejected upload of type {:?}", f.type_());
                rejected.set(true);
            }
            None => {}
        }
    };

    let on_change = {
        let pick = pick.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            pick(input.files().and_then(|list| list.get(0)));
            input.set_value("");
        })
    };
    let on_drag_over = {
        let hovering = hovering.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            hovering.set(true);
        })
    };
    let on_drag_leave = {
        let hovering = hovering.clone();
        Callback::from(move |_: DragEvent| hovering.set(false))
    };
    let on_drop = {
        let hovering = hovering.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            hovering.set(false);
            pick(e.data_transfer().and_then(|dt| dt.files()).and_then(|list| list.get(0)));
        })
    };

    let border = if *hovering { "#388bfd" } else { "#30363d" };

    html! {<div ondragover={on_drag_over} ondragleave={on_drag_leave} ondrop={on_drop}
        style={format!("border:2px dashed {}; border-radius:12px; padding:40px 20px; display:flex; flex-direction:column; align-items:center; gap:12px; background:#161b22;", border)}>
        <div style="font-size:40px;">{"📷"}</div>
        <div style="font-size:16px;">{"Drop an image here"}</div>
        <label style="cursor:pointer; background:#238636; color:#fff; padding:6px 14px; border-radius:6px;">
            {"Choose File"}
            <input type="file" accept="image/*" style="display:none;" onchange={on_change} />
        </label>
        <div style="font-size:11px; opacity:0.6;">{"JPEG, PNG, WebP or GIF"}</div>
        { if *rejected { html!{ <div style="color:#f85149; font-size:12px;">{"Please choose an image file."}</div> } } else { html!{} } }
    </div>}
}

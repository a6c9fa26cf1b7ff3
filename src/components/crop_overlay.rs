use web_sys::Element;
use yew::prelude::*;

use crate::model::{ImageBounds, Rect};
use crate::state::{display_to_image, Handle};

/// One drag update: the rect when the drag began plus the total delta since then.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropDrag {
    pub initial: Rect,
    pub handle: Handle,
    pub delta: (f64, f64),
}

#[derive(Properties, PartialEq, Clone)]
pub struct CropOverlayProps {
    pub rect: Rect,
    pub image: ImageBounds,
    pub on_drag: Callback<CropDrag>,
}

#[derive(Clone, Copy)]
struct DragStart {
    handle: Handle,
    pointer_id: i32,
    x: f64,
    y: f64,
    initial: Rect,
    display: ImageBounds,
}

fn pct(v: f64, of: f64) -> f64 {
    if of > 0.0 { v / of * 100.0 } else { 0.0 }
}

#[function_component]
pub fn CropOverlay(props: &CropOverlayProps) -> Html {
    let root = use_node_ref();
    let drag = use_mut_ref(|| None::<DragStart>);

    // Handles carry their name in `data-handle`; anything else inside the box moves it.
    let on_down = {
        let root = root.clone();
        let drag = drag.clone();
        let rect = props.rect;
        Callback::from(move |e: PointerEvent| {
            e.stop_propagation();
            e.prevent_default();
            let Some(el) = root.cast::<Element>() else {
                return;
            };
            let target = e.target_dyn_into::<Element>();
            let handle = target
                .as_ref()
                .and_then(|t| t.get_attribute("data-handle"))
                .and_then(|name| Handle::parse(&name))
                .unwrap_or(Handle::Move);
            if let Some(t) = &target {
                let _ = t.set_pointer_capture(e.pointer_id());
            }
            let bounds = el.get_bounding_client_rect();
            *drag.borrow_mut() = Some(DragStart {
                handle,
                pointer_id: e.pointer_id(),
                x: e.client_x() as f64,
                y: e.client_y() as f64,
                initial: rect,
                display: ImageBounds::new(bounds.width(), bounds.height()),
            });
        })
    };

    let on_move = {
        let drag = drag.clone();
        let image = props.image;
        let on_drag = props.on_drag.clone();
        Callback::from(move |e: PointerEvent| {
            let current = *drag.borrow();
            let Some(d) = current.filter(|d| d.pointer_id == e.pointer_id()) else {
                return;
            };
            e.stop_propagation();
            let raw = (e.client_x() as f64 - d.x, e.client_y() as f64 - d.y);
            on_drag.emit(CropDrag {
                initial: d.initial,
                handle: d.handle,
                delta: display_to_image(raw, d.display, image),
            });
        })
    };

    let on_end = {
        let drag = drag.clone();
        Callback::from(move |e: PointerEvent| {
            let ended = drag.borrow().map(|d| d.pointer_id == e.pointer_id()).unwrap_or(false);
            if ended {
                e.stop_propagation();
                *drag.borrow_mut() = None;
                if let Some(target) = e.target_dyn_into::<Element>() {
                    let _ = target.release_pointer_capture(e.pointer_id());
                }
            }
        })
    };

    let r = props.rect;
    let img = props.image;
    let box_style = format!(
        "position:absolute; left:{:.3}%; top:{:.3}%; width:{:.3}%; height:{:.3}%; border:2px solid #fff; box-sizing:border-box; box-shadow:0 0 0 9999px rgba(0,0,0,0.5); cursor:{}; pointer-events:auto; touch-action:none;",
        pct(r.x, img.width),
        pct(r.y, img.height),
        pct(r.width, img.width),
        pct(r.height, img.height),
        Handle::Move.cursor(),
    );

    html! {<div ref={root} onpointermove={on_move} onpointerup={on_end.clone()} onpointercancel={on_end}
        style="position:absolute; inset:0; overflow:hidden; pointer-events:none;">
        <div style={box_style} onpointerdown={on_down}>
            // Rule-of-thirds guides
            <div style="position:absolute; left:33.33%; top:0; bottom:0; border-left:1px solid rgba(255,255,255,0.4);"></div>
            <div style="position:absolute; left:66.66%; top:0; bottom:0; border-left:1px solid rgba(255,255,255,0.4);"></div>
            <div style="position:absolute; top:33.33%; left:0; right:0; border-top:1px solid rgba(255,255,255,0.4);"></div>
            <div style="position:absolute; top:66.66%; left:0; right:0; border-top:1px solid rgba(255,255,255,0.4);"></div>
            { for Handle::RESIZE.iter().map(|&h| {
                let (fx, fy) = h.anchor();
                let size = if h.is_corner() { 14 } else { 10 };
                let style = format!(
                    "position:absolute; left:{}%; top:{}%; width:{s}px; height:{s}px; margin:-{m}px 0 0 -{m}px; background:#fff; border:1px solid #1f6feb; border-radius:2px; cursor:{}; touch-action:none;",
                    fx * 100.0, fy * 100.0, h.cursor(), s = size, m = size / 2,
                );
                html! { <div key={h.key()} data-handle={h.key()} {style}></div> }
            }) }
        </div>
    </div>}
}

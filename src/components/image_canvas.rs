use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement};
use yew::prelude::*;

use super::crop_overlay::{CropDrag, CropOverlay};
use crate::config::GestureConfig;
use crate::model::{FrameSettings, ImageBounds, PointerPhase, PointerSample, Rect, TextOverlay};
use crate::state::{Gesture, GestureRecognizer, Viewport};
use crate::util::now_ms;

#[derive(Properties, PartialEq, Clone)]
pub struct ImageCanvasProps {
    pub src: AttrValue,
    pub viewport: Viewport,
    pub filter: String,
    pub frame: FrameSettings,
    pub gesture: GestureConfig,
    pub fullscreen: bool,
    pub processing: bool,
    #[prop_or_default]
    pub crop: Option<Rect>,
    #[prop_or_default]
    pub image: Option<ImageBounds>,
    #[prop_or_default]
    pub overlays: Vec<TextOverlay>,
    pub on_gesture: Callback<Gesture>,
    pub on_wheel: Callback<f64>,
    pub on_image_size: Callback<(u32, u32)>,
    pub on_crop_drag: Callback<CropDrag>,
    #[prop_or_default]
    pub children: Html,
}

type Recognizer = Rc<RefCell<GestureRecognizer>>;
type TapTimer = Rc<RefCell<Option<Timeout>>>;

/// (Re)arms the single tap timer for the recognizer's pending tap, if any.
fn schedule_tap(recognizer: &Recognizer, timer: &TapTimer, on_gesture: &Callback<Gesture>) {
    let deadline = recognizer.borrow().tap_deadline();
    let Some(deadline) = deadline else {
        *timer.borrow_mut() = None;
        return;
    };
    let wait = (deadline - now_ms()).max(0.0).ceil() as u32;
    let recognizer = recognizer.clone();
    let on_gesture = on_gesture.clone();
    *timer.borrow_mut() = Some(Timeout::new(wait, move || {
        let tap = recognizer.borrow_mut().poll(now_ms());
        if let Some(g) = tap {
            on_gesture.emit(g);
        }
    }));
}

#[function_component]
pub fn ImageCanvas(props: &ImageCanvasProps) -> Html {
    let recognizer = use_mut_ref(|| GestureRecognizer::new(props.gesture));
    let tap_timer: TapTimer = use_mut_ref(|| None);
    let container = use_node_ref();
    let wheel_cb = use_mut_ref(|| props.on_wheel.clone());
    *wheel_cb.borrow_mut() = props.on_wheel.clone();

    {
        let recognizer = recognizer.clone();
        use_effect_with(props.gesture, move |cfg| {
            *recognizer.borrow_mut() = GestureRecognizer::new(*cfg);
            || ()
        });
    }

    // A new image starts with a clean pointer state and no pending tap.
    {
        let recognizer = recognizer.clone();
        let tap_timer = tap_timer.clone();
        use_effect_with(props.src.clone(), move |_| {
            recognizer.borrow_mut().reset();
            *tap_timer.borrow_mut() = None;
            || ()
        });
    }

    let pointer = |phase: PointerPhase| {
        let recognizer = recognizer.clone();
        let tap_timer = tap_timer.clone();
        let on_gesture = props.on_gesture.clone();
        Callback::from(move |e: PointerEvent| {
            if phase == PointerPhase::Down {
                if let Some(target) = e.target_dyn_into::<Element>() {
                    let _ = target.set_pointer_capture(e.pointer_id());
                }
            }
            let sample = PointerSample::new(e.pointer_id(), e.client_x() as f64, e.client_y() as f64, now_ms());
            let before = recognizer.borrow().phase();
            let gestures = recognizer.borrow_mut().handle(phase, sample);
            let after = recognizer.borrow().phase();
            if before != after {
                log::debug!("gesture phase {:?} -> {:?} ({} pointers)", before, after, recognizer.borrow().active_pointers());
            }
            for g in gestures {
                on_gesture.emit(g);
            }
            schedule_tap(&recognizer, &tap_timer, &on_gesture);
        })
    };

    // Non-passive so wheel zoom does not also scroll the page.
    {
        let container = container.clone();
        let wheel_cb = wheel_cb.clone();
        use_effect_with((), move |_| {
            let listener = container.cast::<Element>().map(|el| {
                EventListener::new_with_options(&el, "wheel", EventListenerOptions::enable_prevent_default(), move |event| {
                    if let Some(e) = event.dyn_ref::<WheelEvent>() {
                        e.prevent_default();
                        wheel_cb.borrow().emit(e.delta_y());
                    }
                })
            });
            move || drop(listener)
        });
    }

    let on_load = {
        let cb = props.on_image_size.clone();
        Callback::from(move |e: Event| {
            let img: HtmlImageElement = e.target_unchecked_into();
            log::debug!("image decoded at {}x{}", img.natural_width(), img.natural_height());
            cb.emit((img.natural_width(), img.natural_height()));
        })
    };

    let container_style = if props.fullscreen {
        "position:fixed; inset:0; z-index:40; background:#000; display:flex; align-items:center; justify-content:center; overflow:hidden; touch-action:none;"
    } else {
        "position:relative; flex:1; min-height:320px; background:#0d1117; border:1px solid #30363d; border-radius:8px; display:flex; align-items:center; justify-content:center; overflow:hidden; touch-action:none;"
    };
    let surface_style = format!(
        "position:relative; display:inline-block; line-height:0; transition:transform 0.1s ease-out; {} {}",
        props.viewport.css_transform(),
        props.frame.css_border()
    );
    let img_style = format!(
        "display:block; max-width:100%; max-height:{}; filter:{}; user-select:none; -webkit-user-drag:none;",
        if props.fullscreen { "100vh" } else { "70vh" },
        props.filter
    );

    let overlay = match (props.crop, props.image) {
        (Some(rect), Some(image)) => html! {
            <CropOverlay {rect} {image} on_drag={props.on_crop_drag.clone()} />
        },
        _ => html! {},
    };

    html! {<div ref={container} style={container_style}
        onpointerdown={pointer(PointerPhase::Down)}
        onpointermove={pointer(PointerPhase::Move)}
        onpointerup={pointer(PointerPhase::Up)}
        onpointercancel={pointer(PointerPhase::Cancel)}>
        <div style={surface_style}>
            <img src={props.src.clone()} alt="Editing" draggable="false" style={img_style} onload={on_load} />
            { for props.overlays.iter().map(|o| html! {
                <span key={o.id} style={o.css()}>{ o.content.clone() }</span>
            }) }
            { overlay }
        </div>
        { if props.processing { html!{
            <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.45); color:#fff; font-size:14px; pointer-events:none;">
                {"Processing…"}
            </div>
        } } else { html!{} } }
        { props.children.clone() }
    </div>}
}

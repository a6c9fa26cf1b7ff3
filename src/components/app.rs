use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;
use yew::prelude::*;

use super::{
    adjust_panel::AdjustPanel, crop_overlay::CropDrag, crop_panel::CropPanel, editor_toolbar::EditorToolbar,
    effects_panel::EffectsPanel, frames_panel::FramesPanel, history_panel::HistoryPanel, image_canvas::ImageCanvas,
    resize_panel::ResizePanel, settings_modal::SettingsModal, upload_zone::UploadZone, zoom_controls::ZoomControls,
};
use crate::config::EditorSettings;
use crate::model::{FrameSettings, ImageHandle, ResizeSettings, TextStyle, Tool};
use crate::processing::{self, ProcessClient};
use crate::state::{
    fullscreen_after_swipe, Adjustment, CommitKind, CommitOutcome, EditorSession, Gesture, ParamValue, ADJUSTMENTS,
};
use crate::util::{export_file_name, format_dims, EXPORT_FORMAT};

type Session = Rc<RefCell<EditorSession>>;

/// Callback that mutates the session and schedules a rerender.
fn session_cb<T: 'static>(
    session: &Session,
    redraw: &UseForceUpdateHandle,
    f: impl Fn(&mut EditorSession, T) + 'static,
) -> Callback<T> {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(move |arg: T| {
        f(&mut session.borrow_mut(), arg);
        redraw.force_update();
    })
}

#[function_component(App)]
pub fn app() -> Html {
    let session: Session = use_mut_ref(EditorSession::new);
    // Object URLs this editor created; revoked when a new image replaces them.
    let issued = use_mut_ref(Vec::<ImageHandle>::new);
    let redraw = use_force_update();
    let settings = use_state(EditorSettings::load);
    let show_settings = use_state(|| false);
    let show_upload = use_state(|| false);
    let fullscreen = use_state(|| false);
    let error = use_state(|| None::<String>);

    // Keyboard shortcuts
    {
        let session = session.clone();
        let redraw = redraw.clone();
        let fullscreen = fullscreen.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let keydown_cb = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                let key = e.key();
                if key == "Escape" {
                    fullscreen.set(false);
                    return;
                }
                if !(e.ctrl_key() || e.meta_key()) {
                    return;
                }
                let changed = {
                    let mut s = session.borrow_mut();
                    if s.is_processing() {
                        false
                    } else if (key.eq_ignore_ascii_case("z") && e.shift_key()) || key.eq_ignore_ascii_case("y") {
                        s.redo()
                    } else if key.eq_ignore_ascii_case("z") {
                        s.undo()
                    } else {
                        return;
                    }
                };
                e.prevent_default();
                if changed {
                    redraw.force_update();
                }
            }) as Box<dyn FnMut(_)>);
            if let Some(win) = &window {
                let _ = win.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = &window {
                    let _ = win.remove_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
                }
            }
        });
    }

    let on_file = {
        let session = session.clone();
        let issued = issued.clone();
        let redraw = redraw.clone();
        let show_upload = show_upload.clone();
        let error = error.clone();
        let fullscreen = fullscreen.clone();
        Callback::from(move |file: File| match processing::object_url_for_file(&file) {
            Ok(handle) => {
                for old in issued.borrow_mut().drain(..) {
                    processing::revoke(&old);
                }
                issued.borrow_mut().push(handle.clone());
                session.borrow_mut().load_image(handle);
                show_upload.set(false);
                fullscreen.set(false);
                error.set(None);
                redraw.force_update();
            }
            Err(e) => {
                log::error!("could not open {}: {}", file.name(), e);
                error.set(Some(e.to_string()));
            }
        })
    };

    let commit = {
        let session = session.clone();
        let issued = issued.clone();
        let redraw = redraw.clone();
        let error = error.clone();
        let endpoint = settings.endpoint.clone();
        Callback::from(move |kind: CommitKind| {
            let started = session.borrow_mut().begin_commit(kind);
            let req = match started {
                Ok(req) => req,
                Err(e) => {
                    log::warn!("cannot start {:?} commit: {}", kind, e);
                    error.set(Some(e.to_string()));
                    return;
                }
            };
            error.set(None);
            redraw.force_update();

            let client = ProcessClient::new(endpoint.clone());
            let session = session.clone();
            let issued = issued.clone();
            let redraw = redraw.clone();
            let error = error.clone();
            spawn_local(async move {
                let result = client.run(&req).await;
                let produced = result.as_ref().ok().cloned();
                let outcome = session.borrow_mut().finish_commit(req.ticket, result);
                match (outcome, produced) {
                    (CommitOutcome::Applied, Some(handle)) => issued.borrow_mut().push(handle),
                    (CommitOutcome::Failed(e), _) if e.is_remote() => {
                        error.set(Some(format!("{} failed: {}", req.effect, e)))
                    }
                    (CommitOutcome::Failed(e), _) => error.set(Some(e.to_string())),
                    (_, Some(handle)) => processing::revoke(&handle),
                    _ => {}
                }
                redraw.force_update();
            });
        })
    };
    let commit_kind = |kind: CommitKind| {
        let commit = commit.clone();
        Callback::from(move |_: ()| commit.emit(kind))
    };

    let on_gesture = {
        let session = session.clone();
        let redraw = redraw.clone();
        let fullscreen = fullscreen.clone();
        Callback::from(move |g: Gesture| {
            if let Gesture::Swipe { direction, velocity } = g {
                let next = fullscreen_after_swipe(*fullscreen, direction, velocity);
                if next != *fullscreen {
                    fullscreen.set(next);
                }
                return;
            }
            let changed = {
                let mut s = session.borrow_mut();
                // The crop overlay owns pointer input while cropping.
                if s.active_tool() == Tool::Crop && g != Gesture::PinchEnd {
                    false
                } else {
                    s.viewport.apply(&g)
                }
            };
            if changed {
                redraw.force_update();
            }
        })
    };
    let on_wheel = session_cb(&session, &redraw, |s, delta_y: f64| {
        s.viewport.wheel(delta_y);
    });
    let on_image_size = session_cb(&session, &redraw, |s, (w, h): (u32, u32)| s.set_image_size(w, h));
    let on_crop_drag = session_cb(&session, &redraw, |s, d: CropDrag| s.drag_crop(&d.initial, d.handle, d.delta));
    let on_tool = session_cb(&session, &redraw, |s, tool: Tool| s.set_active_tool(tool));
    let close_tool = session_cb(&session, &redraw, |s, _: ()| s.set_active_tool(Tool::None));
    let on_undo = session_cb(&session, &redraw, |s, _: ()| {
        s.undo();
    });
    let on_redo = session_cb(&session, &redraw, |s, _: ()| {
        s.redo();
    });
    let on_reset = session_cb(&session, &redraw, |s, _: ()| s.reset_to_original());
    let on_zoom_in = session_cb(&session, &redraw, |s, _: ()| s.viewport.zoom_in());
    let on_zoom_out = session_cb(&session, &redraw, |s, _: ()| s.viewport.zoom_out());
    let on_zoom_reset = session_cb(&session, &redraw, |s, _: ()| s.viewport.reset());
    let on_crop_lock = session_cb(&session, &redraw, |s, ratio: Option<f64>| s.set_crop_lock(ratio));
    let on_crop_reset = session_cb(&session, &redraw, |s, _: ()| s.reset_crop());
    let on_resize_change = session_cb(&session, &redraw, |s, next: ResizeSettings| s.resize = next);
    let on_adjust = session_cb(&session, &redraw, |s, (kind, v): (Adjustment, f64)| {
        s.effects.update_adjustment(kind, v)
    });
    let on_adjust_reset = session_cb(&session, &redraw, |s, _: ()| {
        for spec in ADJUSTMENTS {
            s.effects.update_adjustment(spec.kind, spec.default);
        }
    });
    let on_effect_select = session_cb(&session, &redraw, |s, id: &'static str| {
        s.effects.select_effect(id);
    });
    let on_effect_param = session_cb(&session, &redraw, |s, (name, value): (String, ParamValue)| {
        if !s.effects.set_param(&name, value) {
            log::debug!("rejected value for parameter {}", name);
        }
    });
    let on_effect_clear = session_cb(&session, &redraw, |s, _: ()| s.effects.clear_selection());
    let on_frame = session_cb(&session, &redraw, |s, frame: FrameSettings| s.frame = frame);
    let on_add_text = session_cb(&session, &redraw, |s, (content, style): (String, TextStyle)| {
        s.add_text_overlay(&content, style);
    });
    let on_remove_text = session_cb(&session, &redraw, |s, id: u64| {
        s.remove_text_overlay(id);
    });
    let on_export = {
        let session = session.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            let current = session.borrow().current_image().cloned();
            let Some(handle) = current else {
                return;
            };
            if let Err(e) = processing::download(&handle, &export_file_name(EXPORT_FORMAT)) {
                log::error!("export failed: {}", e);
                error.set(Some(e.to_string()));
            }
        })
    };

    let toggle_fullscreen = {
        let fullscreen = fullscreen.clone();
        Callback::from(move |_: ()| fullscreen.set(!*fullscreen))
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: ()| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: ()| show_settings.set(false))
    };
    let save_settings = {
        let settings = settings.clone();
        let show_settings = show_settings.clone();
        Callback::from(move |next: EditorSettings| {
            next.save();
            log::info!("settings saved (endpoint {})", next.endpoint);
            settings.set(next);
            show_settings.set(false);
        })
    };
    let new_image = {
        let show_upload = show_upload.clone();
        Callback::from(move |_: ()| show_upload.set(true))
    };
    let cancel_upload = {
        let show_upload = show_upload.clone();
        Callback::from(move |_| show_upload.set(false))
    };
    let dismiss_error = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    let s = session.borrow();
    let processing_now = s.is_processing();
    let image = s.metadata().map(|m| m.current_bounds());

    let error_banner = match &*error {
        Some(msg) => html! {
            <div style="background:#3d1214; border:1px solid #f85149; color:#ffb3ad; border-radius:6px; padding:6px 10px; display:flex; gap:8px; align-items:center;">
                <span style="flex:1;">{ msg.clone() }</span>
                <button onclick={dismiss_error}>{"Dismiss"}</button>
            </div>
        },
        None => html! {},
    };

    let tool_panel = match s.active_tool() {
        Tool::Crop => html! {
            <CropPanel lock={s.crop_lock()} rect={s.crop().copied()} processing={processing_now}
                on_lock={on_crop_lock} on_apply={commit_kind(CommitKind::Crop)} on_reset={on_crop_reset} on_cancel={close_tool.clone()} />
        },
        Tool::Resize => html! {
            <ResizePanel settings={s.resize.clone()} metadata={s.metadata().copied()} processing={processing_now}
                on_change={on_resize_change} on_apply={commit_kind(CommitKind::Resize)} on_cancel={close_tool.clone()} />
        },
        Tool::Adjust => html! {
            <AdjustPanel values={*s.effects.adjustments()} on_change={on_adjust} on_reset={on_adjust_reset} />
        },
        Tool::Effects => html! {
            <EffectsPanel pending={s.effects.pending().cloned()} active={s.effects.active_effect()} processing={processing_now}
                on_select={on_effect_select} on_param={on_effect_param} on_apply={commit_kind(CommitKind::Effect)} on_clear={on_effect_clear} />
        },
        Tool::Frames => html! {
            <FramesPanel frame={s.frame.clone()} overlays={s.text_overlays().to_vec()}
                on_change={on_frame} on_add_text={on_add_text} on_remove_text={on_remove_text} />
        },
        Tool::None => html! {
            <div style="font-size:12px; opacity:0.7; line-height:1.5;">
                {"Pick a tool above. Pinch or scroll to zoom, drag to pan when zoomed, double-tap to toggle 2x, swipe up for fullscreen."}
            </div>
        },
    };

    let body = match s.current_image() {
        Some(current) if !*show_upload => html! {
            <>
                <EditorToolbar active={s.active_tool()} can_undo={s.history().can_undo()} can_redo={s.history().can_redo()}
                    processing={processing_now}
                    dimensions={s.metadata().map(|m| format_dims(m.current_width, m.current_height))}
                    on_tool={on_tool} on_undo={on_undo} on_redo={on_redo} on_reset={on_reset}
                    on_new_image={new_image} on_export={on_export} on_open_settings={open_settings.clone()} />
                <div style="display:flex; gap:12px; align-items:stretch; flex-wrap:wrap;">
                    <ImageCanvas src={AttrValue::from(current.url().to_string())} viewport={s.viewport.clone()}
                        filter={s.effects.css_filter()} frame={s.frame.clone()} gesture={settings.gesture}
                        fullscreen={*fullscreen} processing={processing_now}
                        crop={s.crop().copied()} {image} overlays={s.text_overlays().to_vec()}
                        on_gesture={on_gesture} on_wheel={on_wheel} on_image_size={on_image_size} on_crop_drag={on_crop_drag}>
                        <ZoomControls percent={s.viewport.percent()} fullscreen={*fullscreen}
                            on_zoom_in={on_zoom_in} on_zoom_out={on_zoom_out} on_reset={on_zoom_reset}
                            on_toggle_fullscreen={toggle_fullscreen} />
                    </ImageCanvas>
                    <div style="width:300px; max-width:100%; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:12px; box-sizing:border-box;">
                        { tool_panel }
                    </div>
                </div>
                <HistoryPanel len={s.history().len()} position={s.history().position()} />
            </>
        },
        Some(_) => html! {
            <>
                <UploadZone on_file={on_file} />
                <button onclick={cancel_upload} style="align-self:center;">{"Back to editor"}</button>
            </>
        },
        None => html! {
            <div style="display:flex; flex-direction:column; gap:8px;">
                <UploadZone on_file={on_file} />
                <button onclick={open_settings.reform(|_: MouseEvent| ())} style="align-self:flex-end;">{"Settings"}</button>
            </div>
        },
    };

    html! {<div style="min-height:100vh; background:#0d1117; color:#c9d1d9; font-family:system-ui, sans-serif; padding:16px; box-sizing:border-box; display:flex; flex-direction:column; gap:12px;">
        <h2 style="margin:0; font-size:20px;">{"Photo Editor"}</h2>
        { error_banner }
        { body }
        <SettingsModal show={*show_settings} settings={(*settings).clone()} on_close={close_settings} on_save={save_settings} />
    </div>}
}

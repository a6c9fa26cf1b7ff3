use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomControlsProps {
    pub percent: u32,
    pub fullscreen: bool,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_toggle_fullscreen: Callback<()>,
}

#[function_component(ZoomControls)]
pub fn zoom_controls(props: &ZoomControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let rs = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let fs = {
        let cb = props.on_toggle_fullscreen.clone();
        Callback::from(move |_| cb.emit(()))
    };
    // Keep button presses out of the gesture stream underneath.
    let swallow = Callback::from(|e: PointerEvent| e.stop_propagation());
    html! {<div onpointerdown={swallow.clone()} onpointerup={swallow}
        style="position:absolute; left:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center; line-height:normal;">
        <button onclick={zo}> {"-"} </button>
        <span style="min-width:44px; text-align:center; font-size:12px;">{ format!("{}%", props.percent) }</span>
        <button onclick={zi}> {"+"} </button>
        <span style="width:8px;"></span>
        <button onclick={rs}> {"Fit"} </button>
        <button onclick={fs}> { if props.fullscreen { "Exit Fullscreen" } else { "Fullscreen" } } </button>
    </div>}
}

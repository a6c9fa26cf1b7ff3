mod components;
mod config;
mod error;
mod model;
mod processing;
mod state;
mod util;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("photo-edit starting");
    yew::Renderer::<App>::new().render();
}

pub mod adjust_panel;
pub mod app;
pub mod crop_overlay;
pub mod crop_panel;
pub mod editor_toolbar;
pub mod effects_panel;
pub mod frames_panel;
pub mod history_panel;
pub mod image_canvas;
pub mod resize_panel;
pub mod settings_modal;
pub mod upload_zone;
pub mod zoom_controls;

pub mod crop;
pub mod effects;
pub mod gesture;
pub mod history;
pub mod session;
pub mod viewport;

pub use crop::{display_to_image, Handle, ASPECT_PRESETS};
pub use effects::{Adjustment, ParamValue, ADJUSTMENTS};
pub use gesture::{Gesture, GestureRecognizer};
pub use session::{CommitKind, CommitOutcome, CommitRequest, EditorSession};
pub use viewport::{fullscreen_after_swipe, Viewport};

use wasm_bindgen::JsValue;

/// Why a commit could not start or did not produce a new image.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommitError {
    #[error("another edit is still processing")]
    Busy,
    #[error("no image is loaded")]
    NoImage,
    #[error("no crop area is set")]
    NoCropArea,
    #[error("no effect is selected")]
    NoEffectSelected,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("processing failed ({status}): {message}")]
    Processing { status: u16, message: String },
    #[error("browser error: {0}")]
    Browser(String),
}

impl CommitError {
    /// Failures of the remote call, as opposed to refusals to start one.
    pub fn is_remote(&self) -> bool {
        matches!(self, CommitError::Transport(_) | CommitError::Processing { .. } | CommitError::Browser(_))
    }
}

impl From<gloo::net::Error> for CommitError {
    fn from(e: gloo::net::Error) -> Self {
        CommitError::Transport(e.to_string())
    }
}

impl From<JsValue> for CommitError {
    fn from(e: JsValue) -> Self {
        CommitError::Browser(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
    }
}

//! Per-session editing context.
//!
//! One `EditorSession` is created per editor mount and handed by reference to
//! every operation. Commits are explicit request/response pairs: the session
//! builds a [`CommitRequest`], the caller ships it to the processing service,
//! and the result comes back through [`EditorSession::finish_commit`].

use crate::error::CommitError;
use crate::model::{
    FrameSettings, ImageBounds, ImageHandle, ImageMetadata, Rect, ResizeSettings, TextOverlay, TextStyle, Tool,
    FONT_SIZE_RANGE,
};
use crate::state::crop::{apply_handle_drag, sanitize_ratio, Handle};
use crate::state::effects::{effect_by_id, EffectParameterStore, ParamMap, ParamValue};
use crate::state::history::EditHistory;
use crate::state::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitKind {
    Crop,
    Resize,
    Effect,
}

/// Identifies one commit and the image generation it was issued against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitTicket {
    pub id: u64,
    pub generation: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommitRequest {
    pub ticket: CommitTicket,
    pub kind: CommitKind,
    pub effect: String,
    pub params: ParamMap,
    pub source: ImageHandle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommitOutcome {
    Applied,
    Failed(CommitError),
    /// The image was replaced or reset while the commit was in flight.
    Stale,
    /// The ticket does not belong to the in-flight commit.
    Unknown,
}

#[derive(Clone, Debug, PartialEq)]
struct InFlight {
    ticket: CommitTicket,
    kind: CommitKind,
    effect: String,
}

#[derive(Debug, Default)]
pub struct EditorSession {
    original: Option<ImageHandle>,
    metadata: Option<ImageMetadata>,
    history: EditHistory<ImageHandle>,
    pub effects: EffectParameterStore,
    pub frame: FrameSettings,
    pub resize: ResizeSettings,
    pub viewport: Viewport,
    crop: Option<Rect>,
    crop_lock: Option<f64>,
    text_overlays: Vec<TextOverlay>,
    next_overlay: u64,
    active_tool: Tool,
    in_flight: Option<InFlight>,
    generation: u64,
    next_ticket: u64,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_image(&self) -> Option<&ImageHandle> {
        self.history.current()
    }

    pub fn original_image(&self) -> Option<&ImageHandle> {
        self.original.as_ref()
    }

    pub fn metadata(&self) -> Option<&ImageMetadata> {
        self.metadata.as_ref()
    }

    pub fn history(&self) -> &EditHistory<ImageHandle> {
        &self.history
    }

    pub fn crop(&self) -> Option<&Rect> {
        self.crop.as_ref()
    }

    pub fn crop_lock(&self) -> Option<f64> {
        self.crop_lock
    }

    pub fn text_overlays(&self) -> &[TextOverlay] {
        &self.text_overlays
    }

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn load_image(&mut self, handle: ImageHandle) {
        log::info!("loading image {}", handle.url());
        self.generation += 1;
        self.original = Some(handle.clone());
        self.history.reset(handle);
        self.metadata = None;
        self.effects.reset();
        self.frame = FrameSettings::default();
        self.text_overlays.clear();
        self.crop = None;
        self.active_tool = Tool::None;
        self.viewport.reset();
    }

    /// The first report after a load sets the original size too.
    pub fn set_image_size(&mut self, width: u32, height: u32) {
        match self.metadata.as_mut() {
            Some(m) => {
                m.current_width = width;
                m.current_height = height;
            }
            None => {
                self.metadata = Some(ImageMetadata {
                    original_width: width,
                    original_height: height,
                    current_width: width,
                    current_height: height,
                });
            }
        }
        let bounds = ImageBounds::new(width as f64, height as f64);
        let needs_default = match self.crop {
            Some(rect) => !rect.is_valid_for(bounds),
            None => self.active_tool == Tool::Crop,
        };
        if needs_default {
            self.crop = Some(Rect::centered_default(bounds, self.crop_lock));
        }
    }

    fn bounds(&self) -> Option<ImageBounds> {
        self.metadata.map(|m| m.current_bounds())
    }

    pub fn set_active_tool(&mut self, tool: Tool) {
        if self.active_tool == tool {
            return;
        }
        if self.active_tool == Tool::Crop {
            self.crop = None;
        }
        self.active_tool = tool;
        match tool {
            Tool::Crop => {
                self.crop = self.bounds().map(|b| Rect::centered_default(b, self.crop_lock));
            }
            Tool::Resize => {
                if let Some(m) = self.metadata {
                    self.resize.seed(m.current_width, m.current_height);
                }
            }
            _ => {}
        }
    }

    pub fn set_crop_lock(&mut self, ratio: Option<f64>) {
        self.crop_lock = sanitize_ratio(ratio);
        if let (Some(rect), Some(b)) = (self.crop, self.bounds()) {
            self.crop = Some(rect.fit_aspect_ratio(self.crop_lock, b));
        }
    }

    /// Restores the default crop box for the current lock.
    pub fn reset_crop(&mut self) {
        if self.active_tool == Tool::Crop {
            self.crop = self.bounds().map(|b| Rect::centered_default(b, self.crop_lock));
        }
    }

    /// Applies a drag measured from `initial` (the rect at drag start).
    pub fn drag_crop(&mut self, initial: &Rect, handle: Handle, delta: (f64, f64)) {
        let Some(b) = self.bounds() else {
            return;
        };
        if self.crop.is_none() {
            return;
        }
        self.crop = Some(apply_handle_drag(initial, handle, delta, b, self.crop_lock));
    }

    /// Adds a caption at the image center. Blank text is ignored.
    pub fn add_text_overlay(&mut self, content: &str, style: TextStyle) -> Option<u64> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        self.next_overlay += 1;
        let (lo, hi) = FONT_SIZE_RANGE;
        let style = TextStyle { font_size: style.font_size.clamp(lo, hi), ..style };
        self.text_overlays.push(TextOverlay {
            id: self.next_overlay,
            content: content.to_string(),
            position: (50.0, 50.0),
            style,
        });
        Some(self.next_overlay)
    }

    pub fn remove_text_overlay(&mut self, id: u64) -> bool {
        let before = self.text_overlays.len();
        self.text_overlays.retain(|o| o.id != id);
        self.text_overlays.len() != before
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo().is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo().is_some()
    }

    pub fn reset_to_original(&mut self) {
        let Some(original) = self.original.clone() else {
            return;
        };
        self.generation += 1;
        self.history.reset(original);
        self.effects.reset();
        self.text_overlays.clear();
        if let Some(m) = self.metadata.as_mut() {
            m.current_width = m.original_width;
            m.current_height = m.original_height;
        }
    }

    /// Claims the single in-flight slot and builds the request to send.
    pub fn begin_commit(&mut self, kind: CommitKind) -> Result<CommitRequest, CommitError> {
        if self.in_flight.is_some() {
            return Err(CommitError::Busy);
        }
        let source = self.history.current().cloned().ok_or(CommitError::NoImage)?;
        let (effect, params) = match kind {
            CommitKind::Crop => {
                let rect = self.crop.ok_or(CommitError::NoCropArea)?;
                let params = [("x", rect.x), ("y", rect.y), ("width", rect.width), ("height", rect.height)]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), ParamValue::Number(v.round())))
                    .collect();
                ("crop".to_string(), params)
            }
            CommitKind::Resize => {
                let r = &self.resize;
                let mut params = ParamMap::new();
                params.insert("width".into(), ParamValue::Number(r.width as f64));
                params.insert("height".into(), ParamValue::Number(r.height as f64));
                params.insert("maintainAspectRatio".into(), ParamValue::Flag(r.maintain_aspect_ratio));
                params.insert("interpolation".into(), ParamValue::Text(r.interpolation.key().to_string()));
                ("resize".to_string(), params)
            }
            CommitKind::Effect => {
                let pending = self.effects.pending().ok_or(CommitError::NoEffectSelected)?;
                (pending.effect.id.to_string(), pending.params.clone())
            }
        };

        self.next_ticket += 1;
        let ticket = CommitTicket { id: self.next_ticket, generation: self.generation };
        self.in_flight = Some(InFlight { ticket, kind, effect: effect.clone() });
        log::info!("commit #{} ({}) started", ticket.id, effect);
        Ok(CommitRequest { ticket, kind, effect, params, source })
    }

    pub fn finish_commit(&mut self, ticket: CommitTicket, result: Result<ImageHandle, CommitError>) -> CommitOutcome {
        let in_flight = match self.in_flight.take() {
            Some(f) if f.ticket == ticket => f,
            other => {
                self.in_flight = other;
                log::warn!("ignoring result for unknown commit #{}", ticket.id);
                return CommitOutcome::Unknown;
            }
        };

        let handle = match result {
            Ok(h) => h,
            Err(e) => {
                log::error!("commit #{} ({}) failed: {}", ticket.id, in_flight.effect, e);
                return CommitOutcome::Failed(e);
            }
        };
        if ticket.generation != self.generation {
            log::warn!("dropping commit #{}: image changed while it was processing", ticket.id);
            return CommitOutcome::Stale;
        }

        self.history.push(handle);
        match in_flight.kind {
            CommitKind::Crop => {
                self.crop = None;
                self.active_tool = Tool::None;
            }
            CommitKind::Resize => {
                self.active_tool = Tool::None;
            }
            CommitKind::Effect => {
                if let Some(def) = effect_by_id(&in_flight.effect) {
                    self.effects.mark_applied(def.id);
                }
            }
        }
        log::info!("commit #{} ({}) applied", ticket.id, in_flight.effect);
        CommitOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(name: &str) -> ImageHandle {
        ImageHandle::new(format!("blob:{}", name))
    }

    fn loaded() -> EditorSession {
        let mut s = EditorSession::new();
        s.load_image(img("orig"));
        s.set_image_size(1000, 800);
        s
    }

    #[test]
    fn load_creates_single_entry_history() {
        let s = loaded();
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history().position(), Some(0));
        assert_eq!(s.current_image(), Some(&img("orig")));
        assert_eq!(s.metadata().unwrap().original_width, 1000);
    }

    #[test]
    fn crop_commit_round_trip() {
        let mut s = loaded();
        s.set_active_tool(Tool::Crop);
        let rect = *s.crop().unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (100.0, 80.0, 800.0, 640.0));

        let req = s.begin_commit(CommitKind::Crop).unwrap();
        assert_eq!(req.effect, "crop");
        assert_eq!(req.params["width"], ParamValue::Number(800.0));
        assert!(s.is_processing());
        assert_eq!(s.begin_commit(CommitKind::Crop), Err(CommitError::Busy));

        assert_eq!(s.finish_commit(req.ticket, Ok(img("cropped"))), CommitOutcome::Applied);
        assert!(!s.is_processing());
        assert_eq!(s.current_image(), Some(&img("cropped")));
        assert_eq!(s.active_tool(), Tool::None);
        assert!(s.crop().is_none());
    }

    #[test]
    fn failed_commit_leaves_history_and_frees_slot() {
        let mut s = loaded();
        s.effects.select_effect("enhance");
        let req = s.begin_commit(CommitKind::Effect).unwrap();
        let err = CommitError::Processing { status: 500, message: "boom".into() };
        assert_eq!(s.finish_commit(req.ticket, Err(err.clone())), CommitOutcome::Failed(err));
        assert_eq!(s.history().len(), 1);
        assert!(!s.is_processing());
        assert!(s.effects.pending().is_some(), "selection survives for a retry");
        assert!(s.begin_commit(CommitKind::Effect).is_ok());
    }

    #[test]
    fn stale_response_after_reset_is_dropped() {
        let mut s = loaded();
        s.effects.select_effect("colorize");
        let req = s.begin_commit(CommitKind::Effect).unwrap();
        s.reset_to_original();
        assert_eq!(s.finish_commit(req.ticket, Ok(img("late"))), CommitOutcome::Stale);
        assert_eq!(s.history().entries(), &[img("orig")]);
        assert!(!s.is_processing());
    }

    #[test]
    fn stale_response_after_new_image_is_dropped() {
        let mut s = loaded();
        s.set_active_tool(Tool::Resize);
        let req = s.begin_commit(CommitKind::Resize).unwrap();
        s.load_image(img("other"));
        assert_eq!(s.finish_commit(req.ticket, Ok(img("late"))), CommitOutcome::Stale);
        assert_eq!(s.current_image(), Some(&img("other")));
    }

    #[test]
    fn unknown_ticket_does_not_release_slot() {
        let mut s = loaded();
        s.effects.select_effect("colorize");
        let req = s.begin_commit(CommitKind::Effect).unwrap();
        let bogus = CommitTicket { id: req.ticket.id + 7, generation: req.ticket.generation };
        assert_eq!(s.finish_commit(bogus, Ok(img("x"))), CommitOutcome::Unknown);
        assert!(s.is_processing());
        assert_eq!(s.finish_commit(req.ticket, Ok(img("y"))), CommitOutcome::Applied);
        assert_eq!(s.effects.active_effect(), Some("colorize"));
    }

    #[test]
    fn commit_preconditions() {
        let mut s = EditorSession::new();
        assert_eq!(s.begin_commit(CommitKind::Resize), Err(CommitError::NoImage));
        s.load_image(img("orig"));
        assert_eq!(s.begin_commit(CommitKind::Crop), Err(CommitError::NoCropArea));
        assert_eq!(s.begin_commit(CommitKind::Effect), Err(CommitError::NoEffectSelected));
        assert!(!s.is_processing());
    }

    #[test]
    fn undo_then_commit_truncates_redo() {
        let mut s = loaded();
        for name in ["a", "b"] {
            s.effects.select_effect("enhance");
            let req = s.begin_commit(CommitKind::Effect).unwrap();
            s.finish_commit(req.ticket, Ok(img(name)));
        }
        assert!(s.undo());
        s.effects.select_effect("enhance");
        let req = s.begin_commit(CommitKind::Effect).unwrap();
        assert_eq!(req.source, img("a"));
        s.finish_commit(req.ticket, Ok(img("c")));
        assert_eq!(s.history().entries(), &[img("orig"), img("a"), img("c")]);
        assert!(!s.redo());
    }

    #[test]
    fn crop_follows_tool_and_lock() {
        let mut s = loaded();
        s.set_crop_lock(Some(1.0));
        s.set_active_tool(Tool::Crop);
        let rect = *s.crop().unwrap();
        assert!((rect.width - rect.height).abs() < 1e-6);

        s.drag_crop(&rect, Handle::SouthEast, (40.0, 0.0));
        let dragged = *s.crop().unwrap();
        assert!((dragged.width / dragged.height - 1.0).abs() < 1e-3);

        s.set_active_tool(Tool::Adjust);
        assert!(s.crop().is_none());
    }

    #[test]
    fn load_resets_view_and_effects() {
        let mut s = loaded();
        s.viewport.zoom_in();
        s.effects.update_adjustment(crate::state::effects::Adjustment::Blur, 3.0);
        s.set_active_tool(Tool::Crop);
        let g = s.generation();
        s.load_image(img("next"));
        assert_eq!(s.generation(), g + 1);
        assert_eq!(s.viewport, Viewport::default());
        assert_eq!(s.effects.adjustments().blur, 0.0);
        assert!(s.crop().is_none());
        assert!(s.metadata().is_none());
    }

    #[test]
    fn crop_tool_opened_before_size_gets_a_rect_once_size_arrives() {
        let mut s = EditorSession::new();
        s.load_image(img("orig"));
        s.set_active_tool(Tool::Crop);
        assert!(s.crop().is_none());
        s.set_image_size(500, 400);
        let rect = *s.crop().unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (50.0, 40.0, 400.0, 320.0));
        assert!(s.begin_commit(CommitKind::Crop).is_ok());
    }

    #[test]
    fn size_report_outside_crop_tool_leaves_crop_empty() {
        let mut s = EditorSession::new();
        s.load_image(img("orig"));
        s.set_image_size(500, 400);
        assert!(s.crop().is_none());
    }

    #[test]
    fn text_overlays_add_and_remove() {
        let mut s = loaded();
        assert_eq!(s.add_text_overlay("   ", TextStyle::default()), None);
        let big = TextStyle { font_size: 200, ..TextStyle::default() };
        let first = s.add_text_overlay("  Hello ", big).unwrap();
        let second = s.add_text_overlay("World", TextStyle::default()).unwrap();
        assert_ne!(first, second);

        let o = &s.text_overlays()[0];
        assert_eq!(o.content, "Hello");
        assert_eq!(o.position, (50.0, 50.0));
        assert_eq!(o.style.font_size, 72);

        assert!(s.remove_text_overlay(first));
        assert!(!s.remove_text_overlay(first));
        assert_eq!(s.text_overlays().len(), 1);
        assert_eq!(s.text_overlays()[0].id, second);
    }

    #[test]
    fn text_overlays_survive_commits_but_not_reset_or_load() {
        let mut s = loaded();
        s.add_text_overlay("caption", TextStyle::default());
        s.effects.select_effect("enhance");
        let req = s.begin_commit(CommitKind::Effect).unwrap();
        s.finish_commit(req.ticket, Ok(img("a")));
        assert_eq!(s.text_overlays().len(), 1);

        s.reset_to_original();
        assert!(s.text_overlays().is_empty());

        s.add_text_overlay("again", TextStyle::default());
        s.load_image(img("next"));
        assert!(s.text_overlays().is_empty());
    }
}

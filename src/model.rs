//! Core data models for the photo editor.
//! Pointer samples, crop geometry, image handles and the small settings
//! records the panels edit. Behaviour lives in `state::*`.

use serde::{Deserialize, Serialize};

/// Smallest crop edge in source-pixel units.
pub const MIN_CROP_SIZE: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub id: i32,
    pub x: f64,
    pub y: f64,
    /// Milliseconds, monotonic within a session.
    pub timestamp: f64,
}

impl PointerSample {
    pub fn new(id: i32, x: f64, y: f64, timestamp: f64) -> Self {
        Self { id, x, y, timestamp }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub width: f64,
    pub height: f64,
}

impl ImageBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Negative or non-finite extents collapse to zero.
    pub fn sanitized(self) -> Self {
        Self {
            width: finite_or_zero(self.width).max(0.0),
            height: finite_or_zero(self.height).max(0.0),
        }
    }

    /// Per-axis minimum crop size; images smaller than the minimum use their own extent.
    pub fn min_size(self) -> (f64, f64) {
        let b = self.sanitized();
        (MIN_CROP_SIZE.min(b.width), MIN_CROP_SIZE.min(b.height))
    }
}

/// Crop area in source-pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Locked width/height ratio, if any.
    pub aspect_ratio: Option<f64>,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height, aspect_ratio: None }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Opaque handle to a committed image state (an object URL in the browser).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub original_width: u32,
    pub original_height: u32,
    pub current_width: u32,
    pub current_height: u32,
}

impl ImageMetadata {
    pub fn current_bounds(&self) -> ImageBounds {
        ImageBounds::new(self.current_width as f64, self.current_height as f64)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    None,
    Crop,
    Resize,
    Adjust,
    Effects,
    Frames,
}

impl Tool {
    pub const ALL: [Tool; 5] = [Tool::Crop, Tool::Resize, Tool::Adjust, Tool::Effects, Tool::Frames];

    pub fn label(self) -> &'static str {
        match self {
            Tool::None => "None",
            Tool::Crop => "Crop",
            Tool::Resize => "Resize",
            Tool::Adjust => "Adjust",
            Tool::Effects => "AI Effects",
            Tool::Frames => "Frames",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameStyle {
    #[default]
    None,
    Polaroid,
    Instagram,
    Vintage,
}

impl FrameStyle {
    pub const ALL: [FrameStyle; 4] = [
        FrameStyle::None,
        FrameStyle::Polaroid,
        FrameStyle::Instagram,
        FrameStyle::Vintage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FrameStyle::None => "No frame",
            FrameStyle::Polaroid => "Polaroid",
            FrameStyle::Instagram => "Instagram",
            FrameStyle::Vintage => "Vintage",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSettings {
    pub style: FrameStyle,
    pub color: String,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self { style: FrameStyle::None, color: "#ffffff".to_string() }
    }
}

impl FrameSettings {
    /// CSS border approximating the frame on the display surface.
    pub fn css_border(&self) -> String {
        match self.style {
            FrameStyle::None => String::new(),
            FrameStyle::Polaroid => format!("border:10px solid {c}; border-bottom-width:50px;", c = self.color),
            FrameStyle::Instagram => format!("border:10px solid {}; border-radius:20px;", self.color),
            FrameStyle::Vintage => format!("border:15px double {};", self.color),
        }
    }
}

pub const FONT_FAMILIES: [&str; 6] = ["Arial", "Helvetica", "Times New Roman", "Georgia", "Verdana", "Impact"];
pub const FONT_SIZE_RANGE: (u32, u32) = (12, 72);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: u32,
    pub color: String,
    pub font_family: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { font_size: 24, color: "#ffffff".to_string(), font_family: FONT_FAMILIES[0].to_string() }
    }
}

/// Caption drawn over the image. `position` is in percent of the image size
/// and marks the baseline center of the text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub id: u64,
    pub content: String,
    pub position: (f64, f64),
    pub style: TextStyle,
}

impl TextOverlay {
    pub fn css(&self) -> String {
        format!(
            "position:absolute; left:{:.2}%; top:{:.2}%; transform:translate(-50%, -100%); font-size:{}px; font-family:'{}', sans-serif; color:{}; line-height:1.2; white-space:nowrap; text-shadow:2px 2px 4px rgba(0,0,0,0.5); pointer-events:none;",
            self.position.0, self.position.1, self.style.font_size, self.style.font_family, self.style.color
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    #[default]
    Bilinear,
    Bicubic,
}

impl Interpolation {
    pub const ALL: [Interpolation; 3] =
        [Interpolation::Nearest, Interpolation::Bilinear, Interpolation::Bicubic];

    pub fn key(self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Bilinear => "bilinear",
            Interpolation::Bicubic => "bicubic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Interpolation::Nearest => "Nearest Neighbor (Pixelated)",
            Interpolation::Bilinear => "Bilinear (Smooth)",
            Interpolation::Bicubic => "Bicubic (High Quality)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.key() == key)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    #[default]
    Px,
    Percent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizePreset {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const SIZE_PRESETS: &[SizePreset] = &[
    SizePreset { label: "Instagram Square", width: 1080, height: 1080 },
    SizePreset { label: "Instagram Portrait", width: 1080, height: 1350 },
    SizePreset { label: "Facebook Cover", width: 1200, height: 630 },
    SizePreset { label: "Twitter Header", width: 1500, height: 500 },
    SizePreset { label: "YouTube Thumbnail", width: 1280, height: 720 },
    SizePreset { label: "HD (1080p)", width: 1920, height: 1080 },
    SizePreset { label: "4K", width: 3840, height: 2160 },
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResizeSettings {
    pub width: u32,
    pub height: u32,
    pub maintain_aspect_ratio: bool,
    pub interpolation: Interpolation,
    pub unit: SizeUnit,
    /// width / height of the image the settings were seeded from.
    pub source_ratio: f64,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            maintain_aspect_ratio: true,
            interpolation: Interpolation::Bilinear,
            unit: SizeUnit::Px,
            source_ratio: 800.0 / 600.0,
        }
    }
}

impl ResizeSettings {
    pub fn seed(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if width > 0 && height > 0 {
            self.source_ratio = width as f64 / height as f64;
        }
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
        if self.maintain_aspect_ratio && width > 0 && self.source_ratio > 0.0 {
            self.height = (width as f64 / self.source_ratio).round() as u32;
        }
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
        if self.maintain_aspect_ratio && height > 0 && self.source_ratio > 0.0 {
            self.width = (height as f64 * self.source_ratio).round() as u32;
        }
    }

    /// Relinking recomputes the height from the current width.
    pub fn set_linked(&mut self, linked: bool) {
        self.maintain_aspect_ratio = linked;
        if linked {
            self.set_width(self.width);
        }
    }

    pub fn apply_preset(&mut self, preset: &SizePreset) {
        self.maintain_aspect_ratio = false;
        self.width = preset.width;
        self.height = preset.height;
    }

    /// Scale of the requested width relative to the original width, in percent.
    pub fn scale_percent(&self, original_width: u32) -> u32 {
        if original_width == 0 {
            return 100;
        }
        (self.width as f64 / original_width as f64 * 100.0).round() as u32
    }

    /// Sets both sides to `percent` of the original size.
    pub fn set_scale_percent(&mut self, percent: u32, original_width: u32, original_height: u32) {
        let f = percent.max(1) as f64 / 100.0;
        self.width = ((original_width as f64 * f).round() as u32).max(1);
        self.height = ((original_height as f64 * f).round() as u32).max(1);
    }
}

pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linked_resize_follows_source_ratio() {
        let mut rs = ResizeSettings::default();
        rs.seed(1600, 900);
        rs.set_width(800);
        assert_eq!(rs.height, 450);
        rs.set_height(90);
        assert_eq!(rs.width, 160);
    }

    #[test]
    fn preset_unlinks_ratio() {
        let mut rs = ResizeSettings::default();
        rs.seed(1600, 900);
        rs.apply_preset(&SIZE_PRESETS[0]);
        assert!(!rs.maintain_aspect_ratio);
        rs.set_width(500);
        assert_eq!((rs.width, rs.height), (500, 1080));
    }

    #[test]
    fn tiny_images_lower_the_minimum() {
        assert_eq!(ImageBounds::new(30.0, 400.0).min_size(), (30.0, 50.0));
        assert_eq!(ImageBounds::new(-5.0, f64::NAN).min_size(), (0.0, 0.0));
    }

    #[test]
    fn interpolation_keys_round_trip_through_lookup() {
        assert_eq!(Interpolation::from_key("bicubic"), Some(Interpolation::Bicubic));
        assert_eq!(Interpolation::from_key("lanczos"), None);
    }

    #[test]
    fn text_overlay_css_places_caption_by_percent() {
        let overlay = TextOverlay {
            id: 1,
            content: "hi".into(),
            position: (50.0, 25.0),
            style: TextStyle { font_size: 30, ..TextStyle::default() },
        };
        let css = overlay.css();
        assert!(css.contains("left:50.00%; top:25.00%;"), "{}", css);
        assert!(css.contains("font-size:30px;"));
        assert!(css.contains("font-family:'Arial'"));
    }

    #[test]
    fn percent_scaling_uses_original_size() {
        let mut rs = ResizeSettings::default();
        rs.set_scale_percent(50, 1000, 801);
        assert_eq!((rs.width, rs.height), (500, 401));
        assert_eq!(rs.scale_percent(1000), 50);
        rs.set_scale_percent(0, 10, 10);
        assert_eq!((rs.width, rs.height), (1, 1));
    }
}

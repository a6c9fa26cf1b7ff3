//! Adjustment values and AI-effect parameters.
//!
//! Adjustments are non-destructive and rendered as a CSS filter. AI effects are
//! destructive: a selected effect's parameters are collected here and sent with
//! the commit request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

pub type ParamMap = BTreeMap<String, ParamValue>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectParameter {
    Slider { min: f64, max: f64, step: f64, default: f64 },
    Select { options: &'static [&'static str], default: &'static str },
    Color { default: &'static str },
    Number { default: f64 },
}

impl EffectParameter {
    pub fn default_value(&self) -> ParamValue {
        match *self {
            EffectParameter::Slider { default, .. } | EffectParameter::Number { default } => {
                ParamValue::Number(default)
            }
            EffectParameter::Select { default, .. } | EffectParameter::Color { default } => {
                ParamValue::Text(default.to_string())
            }
        }
    }

    /// Normalizes a user-supplied value, or rejects it.
    pub fn accept(&self, value: &ParamValue) -> Option<ParamValue> {
        match (*self, value) {
            (EffectParameter::Slider { min, max, step, .. }, ParamValue::Number(v)) if v.is_finite() => {
                let snapped = if step > 0.0 { min + ((v - min) / step).round() * step } else { *v };
                Some(ParamValue::Number(snapped.clamp(min, max)))
            }
            (EffectParameter::Number { .. }, ParamValue::Number(v)) if v.is_finite() => {
                Some(ParamValue::Number(*v))
            }
            (EffectParameter::Select { options, .. }, ParamValue::Text(s)) if options.contains(&s.as_str()) => {
                Some(value.clone())
            }
            (EffectParameter::Color { .. }, ParamValue::Text(s)) if is_hex_color(s) => {
                Some(ParamValue::Text(s.to_ascii_lowercase()))
            }
            _ => None,
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamDef {
    pub name: &'static str,
    pub param: EffectParameter,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectDef {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamDef],
}

impl EffectDef {
    pub fn defaults(&self) -> ParamMap {
        self.params.iter().map(|p| (p.name.to_string(), p.param.default_value())).collect()
    }

    pub fn param(&self, name: &str) -> Option<&ParamDef> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Crop and resize run through their own tools rather than the effects panel.
    pub fn is_geometry(&self) -> bool {
        matches!(self.id, "crop" | "resize")
    }
}

pub const EFFECT_CATALOG: &[EffectDef] = &[
    EffectDef {
        id: "remove-bg",
        label: "Remove Background",
        icon: "🖼️",
        description: "Automatically remove the background from your image",
        params: &[],
    },
    EffectDef {
        id: "cartoon",
        label: "Cartoon Effect",
        icon: "🎨",
        description: "Transform your photo into a cartoon-style image",
        params: &[
            ParamDef {
                name: "lineIntensity",
                param: EffectParameter::Slider { min: 0.1, max: 1.0, step: 0.1, default: 0.7 },
            },
            ParamDef {
                name: "colorIntensity",
                param: EffectParameter::Slider { min: 0.1, max: 1.0, step: 0.1, default: 0.8 },
            },
        ],
    },
    EffectDef {
        id: "colorize",
        label: "Colorize B&W",
        icon: "🌈",
        description: "Add color to black and white photos",
        params: &[],
    },
    EffectDef {
        id: "face-detect",
        label: "Face Detection",
        icon: "👤",
        description: "Detect and highlight faces in the image",
        params: &[ParamDef { name: "boxColor", param: EffectParameter::Color { default: "#ff0000" } }],
    },
    EffectDef {
        id: "style-transfer",
        label: "Style Transfer",
        icon: "🎭",
        description: "Apply artistic styles to your image",
        params: &[ParamDef {
            name: "style",
            param: EffectParameter::Select { options: &["van-gogh", "picasso", "monet"], default: "van-gogh" },
        }],
    },
    EffectDef {
        id: "enhance",
        label: "AI Enhance",
        icon: "✨",
        description: "Enhance image quality using AI",
        params: &[ParamDef {
            name: "strength",
            param: EffectParameter::Slider { min: 0.1, max: 2.0, step: 0.1, default: 1.0 },
        }],
    },
    EffectDef {
        id: "crop",
        label: "Crop Image",
        icon: "✂️",
        description: "Crop image to specified dimensions",
        params: &[
            ParamDef { name: "x", param: EffectParameter::Number { default: 0.0 } },
            ParamDef { name: "y", param: EffectParameter::Number { default: 0.0 } },
            ParamDef { name: "width", param: EffectParameter::Number { default: 100.0 } },
            ParamDef { name: "height", param: EffectParameter::Number { default: 100.0 } },
        ],
    },
    EffectDef {
        id: "resize",
        label: "Resize Image",
        icon: "📏",
        description: "Resize image to specified dimensions",
        params: &[
            ParamDef { name: "width", param: EffectParameter::Number { default: 800.0 } },
            ParamDef { name: "height", param: EffectParameter::Number { default: 600.0 } },
            ParamDef {
                name: "interpolation",
                param: EffectParameter::Select { options: &["nearest", "bilinear", "bicubic"], default: "bilinear" },
            },
        ],
    },
];

pub fn effect_by_id(id: &str) -> Option<&'static EffectDef> {
    EFFECT_CATALOG.iter().find(|e| e.id == id)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Adjustment {
    Brightness,
    Contrast,
    Saturation,
    Hue,
    Blur,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdjustmentSpec {
    pub kind: Adjustment,
    pub label: &'static str,
    pub icon: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

pub const ADJUSTMENTS: &[AdjustmentSpec] = &[
    AdjustmentSpec { kind: Adjustment::Brightness, label: "Brightness", icon: "☀️", min: 0.0, max: 2.0, step: 0.1, default: 1.0 },
    AdjustmentSpec { kind: Adjustment::Contrast, label: "Contrast", icon: "🔆", min: 0.0, max: 2.0, step: 0.1, default: 1.0 },
    AdjustmentSpec { kind: Adjustment::Saturation, label: "Saturation", icon: "🌈", min: 0.0, max: 2.0, step: 0.1, default: 1.0 },
    AdjustmentSpec { kind: Adjustment::Hue, label: "Hue", icon: "🎨", min: -180.0, max: 180.0, step: 1.0, default: 0.0 },
    AdjustmentSpec { kind: Adjustment::Blur, label: "Blur", icon: "🌫️", min: 0.0, max: 10.0, step: 0.5, default: 0.0 },
];

impl Adjustment {
    pub fn spec(self) -> &'static AdjustmentSpec {
        match self {
            Adjustment::Brightness => &ADJUSTMENTS[0],
            Adjustment::Contrast => &ADJUSTMENTS[1],
            Adjustment::Saturation => &ADJUSTMENTS[2],
            Adjustment::Hue => &ADJUSTMENTS[3],
            Adjustment::Blur => &ADJUSTMENTS[4],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Adjustments {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub hue: f64,
    pub blur: f64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self { brightness: 1.0, contrast: 1.0, saturation: 1.0, hue: 0.0, blur: 0.0 }
    }
}

impl Adjustments {
    pub fn get(&self, kind: Adjustment) -> f64 {
        match kind {
            Adjustment::Brightness => self.brightness,
            Adjustment::Contrast => self.contrast,
            Adjustment::Saturation => self.saturation,
            Adjustment::Hue => self.hue,
            Adjustment::Blur => self.blur,
        }
    }

    fn slot(&mut self, kind: Adjustment) -> &mut f64 {
        match kind {
            Adjustment::Brightness => &mut self.brightness,
            Adjustment::Contrast => &mut self.contrast,
            Adjustment::Saturation => &mut self.saturation,
            Adjustment::Hue => &mut self.hue,
            Adjustment::Blur => &mut self.blur,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PendingEffect {
    pub effect: &'static EffectDef,
    pub params: ParamMap,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectParameterStore {
    adjustments: Adjustments,
    /// Last AI effect successfully applied to the image.
    active_effect: Option<&'static str>,
    pending: Option<PendingEffect>,
}

impl EffectParameterStore {
    pub fn adjustments(&self) -> &Adjustments {
        &self.adjustments
    }

    pub fn active_effect(&self) -> Option<&'static str> {
        self.active_effect
    }

    pub fn pending(&self) -> Option<&PendingEffect> {
        self.pending.as_ref()
    }

    pub fn update_adjustment(&mut self, kind: Adjustment, value: f64) {
        if !value.is_finite() {
            return;
        }
        let spec = kind.spec();
        *self.adjustments.slot(kind) = value.clamp(spec.min, spec.max);
    }

    /// Instantiates the catalog defaults for `id`. Unknown ids are ignored.
    pub fn select_effect(&mut self, id: &str) -> bool {
        match effect_by_id(id) {
            Some(effect) => {
                self.pending = Some(PendingEffect { effect, params: effect.defaults() });
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.pending = None;
    }

    pub fn set_param(&mut self, name: &str, value: ParamValue) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        let Some(def) = pending.effect.param(name) else {
            return false;
        };
        match def.param.accept(&value) {
            Some(v) => {
                pending.params.insert(name.to_string(), v);
                true
            }
            None => false,
        }
    }

    pub fn mark_applied(&mut self, id: &'static str) {
        self.active_effect = Some(id);
        self.pending = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn css_filter(&self) -> String {
        let a = &self.adjustments;
        format!(
            "brightness({}) contrast({}) saturate({}) hue-rotate({}deg) blur({}px)",
            a.brightness, a.contrast, a.saturation, a.hue, a.blur
        )
    }
}

// Small display helpers shared by the panels.

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn format_dims(width: u32, height: u32) -> String {
    format!("{} × {}", width, height)
}

/// Ratio like "4:3" when the dimensions reduce cleanly, otherwise "1.78:1".
pub fn format_ratio(width: u32, height: u32) -> String {
    if width == 0 || height == 0 {
        return "-".to_string();
    }
    let g = gcd(width, height);
    let (w, h) = (width / g, height / g);
    if w <= 32 && h <= 32 {
        format!("{}:{}", w, h)
    } else {
        format!("{:.2}:1", width as f64 / height as f64)
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

pub const EXPORT_FORMAT: &str = "png";

pub fn export_file_name(format: &str) -> String {
    let ext = format.trim().trim_start_matches('.').to_ascii_lowercase();
    let ext = if ext.is_empty() { EXPORT_FORMAT.to_string() } else { ext };
    format!("edited-image.{}", ext)
}

/// Parses a numeric form field, ignoring empty or malformed input.
pub fn parse_u32(raw: &str) -> Option<u32> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v.round() as u32)
}

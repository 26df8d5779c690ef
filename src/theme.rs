#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Fixed palette for everything that is not a per-section fill.
#[derive(Debug, Clone)]
pub struct Theme {
    pub axis_color: Color,
    pub tick_color: Color,
    pub tick_label_color: Color,
    pub section_label_color: Color,
    pub annotation_fill: Color,
    pub annotation_label_color: Color,
    pub connector_color: Color,
    pub event_marker_color: Color,
}

impl Theme {
    pub fn spectrum() -> Self {
        Self {
            axis_color: Color::new(0.5, 0.5, 0.5),
            tick_color: Color::new(0.4, 0.4, 0.4),
            tick_label_color: Color::new(0.8, 0.8, 0.8),
            section_label_color: Color::new(0.9, 0.9, 0.9),
            annotation_fill: Color::new(0.4, 0.6, 0.8),
            annotation_label_color: Color::new(1.0, 1.0, 0.8),
            connector_color: Color::new(0.6, 0.6, 0.6),
            event_marker_color: Color::new(1.0, 0.8, 0.4),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::spectrum()
    }
}

const SECTION_SATURATION: f32 = 0.7;
const SECTION_VALUE_BASE: f32 = 0.9;

/// Per-section fill: hue drifts 0.3 per depth and 0.1 per sibling,
/// value darkens with depth. Deterministic in (depth, index).
pub fn section_color(depth: usize, index: usize) -> Color {
    let hue = (depth as f32 * 0.3 + index as f32 * 0.1) % 1.0;
    let value = SECTION_VALUE_BASE - (depth as f32 * 0.1) % 0.6;
    hsv_to_rgb(hue, SECTION_SATURATION, value)
}

pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Color {
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match (i as i32).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, q),
        _ => (v, p, q),
    };
    Color::new(r, g, b)
}

use crate::theme::Color;

/// One drawing primitive, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Axis-aligned rectangle around a center point.
    Rect {
        center: (f32, f32, f32),
        width: f32,
        height: f32,
        color: Color,
    },
    /// Text bound to the rectangle it has to fit into.
    Text {
        label: String,
        center: (f32, f32, f32),
        width: f32,
        height: f32,
        color: Color,
    },
    /// Thin segment between two points.
    Segment {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: Color,
    },
}

/// Claimed label box as (x_min, x_max, y_min, y_max). Recorded for a
/// label-collision pass that does not exist yet; nothing reads it.
pub type TextArea = (f32, f32, f32, f32);

/// What the section renderer hands back to the walker.
#[derive(Debug, Clone, Copy)]
pub struct SectionMetrics {
    pub width: f32,
    pub height: f32,
    pub center_y: f32,
}

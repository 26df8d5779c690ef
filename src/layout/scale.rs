//! Pure time-to-space and sizing formulas. Everything here is a free
//! function of its inputs so the tiers and curves can be tested directly.

use crate::ir::Timestamp;

const DEPTH_EVENT_WIDTH_COEFF: f32 = 0.005;
const DEPTH_SECTION_HEIGHT_COEFF: f32 = 0.15;
const DEPTH_ANNOTATION_HEIGHT_COEFF: f32 = 0.08;
const ASPECT_SECTION_HEIGHT_RATIO: f32 = 4.0;
const ASPECT_EVENT_WIDTH_RATIO: f32 = 1000.0;
const ASPECT_EVENT_WIDTH_FLOOR: f32 = 1e-6;
const RUN_MARGIN_FRACTION: f32 = 0.01;

pub(super) fn time_to_x(timestamp: Timestamp, start: Timestamp, units_per_second: f32) -> f32 {
    timestamp.seconds_since(start) as f32 * units_per_second
}

pub(super) fn depth_scale(depth: usize) -> f32 {
    1.0 / (depth as f32 + 1.0)
}

pub(super) fn event_width_depth_based(root_width: f32, depth: usize) -> f32 {
    DEPTH_EVENT_WIDTH_COEFF * depth_scale(depth + 1) * (root_width / 2.0)
}

pub(super) fn event_width_aspect_based(section_width: f32) -> f32 {
    (section_width / ASPECT_EVENT_WIDTH_RATIO).max(ASPECT_EVENT_WIDTH_FLOOR)
}

pub(super) fn section_height_depth_based(root_width: f32, depth: usize) -> f32 {
    DEPTH_SECTION_HEIGHT_COEFF * depth_scale(depth) * (root_width / 2.0)
}

pub(super) fn section_height_aspect_based(section_width: f32) -> f32 {
    section_width / ASPECT_SECTION_HEIGHT_RATIO
}

pub(super) fn annotation_height_depth_based(root_width: f32, depth: usize) -> f32 {
    DEPTH_ANNOTATION_HEIGHT_COEFF * depth_scale(depth) * (root_width / 2.0)
}

/// Margin and per-box width for packing `count` boxes into
/// `available_width`, margin between neighbours only.
pub(super) fn run_box_metrics(available_width: f32, count: usize) -> (f32, f32) {
    let margin = RUN_MARGIN_FRACTION * available_width;
    let remaining = available_width - margin * (count as f32 - 1.0);
    (margin, remaining / count as f32)
}

/// Largest unit of {µs, ms, s, min, h} that keeps the value >= 1, then
/// 3 decimals under 10, 2 under 100, none above.
pub(super) fn format_duration_us(duration_us: i64) -> String {
    const UNITS: [(&str, i64); 5] = [
        ("µs", 1),
        ("ms", 1_000),
        ("s", 1_000_000),
        ("min", 60 * 1_000_000),
        ("h", 3_600 * 1_000_000),
    ];
    for (unit, factor) in UNITS.iter().rev() {
        if duration_us >= *factor {
            let value = duration_us as f64 / *factor as f64;
            return if value < 10.0 {
                format!("{value:.3}{unit}")
            } else if value < 100.0 {
                format!("{value:.2}{unit}")
            } else {
                format!("{value:.0}{unit}")
            };
        }
    }
    format!("{duration_us}µs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_to_x_zero_at_start() {
        let start = Timestamp::from_micros(5_000_000);
        assert_eq!(time_to_x(start, start, 0.5), 0.0);
    }

    #[test]
    fn time_to_x_strictly_increasing() {
        let start = Timestamp::from_micros(0);
        let mut previous = f32::NEG_INFINITY;
        for us in [1, 10, 500, 100_000, 1_000_000, 60_000_000] {
            let x = time_to_x(start.add_micros(us), start, 0.5);
            assert!(x > previous, "x({us}) = {x} not above {previous}");
            previous = x;
        }
    }

    #[test]
    fn time_to_x_scales_seconds() {
        let start = Timestamp::from_micros(0);
        let x = time_to_x(start.add_micros(2_000_000), start, 0.5);
        assert!((x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn depth_scale_decreasing_in_unit_interval() {
        let mut previous = f32::INFINITY;
        for depth in 0..16 {
            let s = depth_scale(depth);
            assert!(s > 0.0 && s <= 1.0);
            assert!(s < previous);
            previous = s;
        }
        assert_eq!(depth_scale(0), 1.0);
    }

    #[test]
    fn aspect_event_width_floor() {
        assert_eq!(event_width_aspect_based(0.0), 1e-6);
        assert!(event_width_aspect_based(2.0) > 1e-6);
        assert!((event_width_aspect_based(2.0) - 0.002).abs() < 1e-9);
    }

    #[test]
    fn depth_formulas_positive() {
        for depth in 0..12 {
            assert!(event_width_depth_based(2.0, depth) > 0.0);
            assert!(section_height_depth_based(2.0, depth) > 0.0);
            assert!(annotation_height_depth_based(2.0, depth) > 0.0);
        }
    }

    #[test]
    fn run_boxes_fill_available_width() {
        for count in 1..8 {
            let (margin, width) = run_box_metrics(3.0, count);
            assert!((margin - 0.03).abs() < 1e-6);
            let packed = width * count as f32 + margin * (count as f32 - 1.0);
            assert!((packed - 3.0).abs() < 1e-5);
        }
    }

    #[test]
    fn duration_tiers() {
        assert_eq!(format_duration_us(999), "999µs");
        assert_eq!(format_duration_us(1_500), "1.500ms");
        assert_eq!(format_duration_us(1_000_000), "1.000s");
        assert_eq!(format_duration_us(65_000_000), "1.083min");
        assert_eq!(format_duration_us(0), "0µs");
        assert_eq!(format_duration_us(15), "15.00µs");
        assert_eq!(format_duration_us(7_200_000_000), "2.000h");
    }
}

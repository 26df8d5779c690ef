use super::types::{Command, SectionMetrics};
use super::{TimelineVisualizer, scale};
use crate::config::SizingMode;
use crate::ir::{LogSection, Timestamp};
use crate::theme;

/// Emits one rectangle and one label for a finished section and reports
/// the geometry the walker stacks on.
pub(super) fn render_section(
    vis: &mut TimelineVisualizer<'_>,
    section: &LogSection,
    end_time: Timestamp,
    depth: usize,
    section_index: usize,
    base_y: f32,
    root_width: f32,
) -> SectionMetrics {
    let x_start = vis.time_to_x(section.start_time);
    let x_end = vis.time_to_x(end_time);
    // Width tracks elapsed time whatever the sizing mode says.
    let width = x_end - x_start;

    let mut height = match vis.config.sizing_mode {
        SizingMode::Depth => scale::section_height_depth_based(root_width, depth),
        SizingMode::Aspect => scale::section_height_aspect_based(width),
    };
    if section.name == "root" && vis.config.use_custom_root_section_height {
        height = vis.config.custom_root_section_height;
    }

    let center_x = (x_start + x_end) / 2.0;
    let center_y = base_y + (height / 2.0) * vis.dir();

    vis.commands.push(Command::Rect {
        center: (center_x, center_y, 0.0),
        width,
        height,
        color: theme::section_color(depth, section_index),
    });

    let name = if section.name.is_empty() {
        format!("Section {section_index}")
    } else {
        section.name.clone()
    };
    let label = match section.duration_micros() {
        Some(us) => format!("{name} ({})", scale::format_duration_us(us)),
        None => name,
    };
    vis.commands.push(Command::Text {
        label,
        center: (center_x, center_y, super::TEXT_Z_OFFSET),
        width,
        height,
        color: vis.theme.section_label_color,
    });

    SectionMetrics {
        width,
        height,
        center_y,
    }
}

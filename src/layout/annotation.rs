use super::types::{Command, SectionMetrics};
use super::{TimelineVisualizer, scale};
use crate::config::SizingMode;
use crate::ir::{LogMessage, LogSection, SectionChild, Timestamp};

const ROW_OFFSET_FACTOR: f32 = 1.5;

/// Maximal contiguous groups of point-events in time order; any child
/// section between two events splits the group. Never yields an empty run.
pub(super) fn group_event_runs(section: &LogSection) -> Vec<Vec<&LogMessage>> {
    let mut ordered: Vec<&SectionChild> = section.children.iter().collect();
    ordered.sort_by_key(|child| child.anchor_time());

    let mut runs: Vec<Vec<&LogMessage>> = Vec::new();
    let mut current: Vec<&LogMessage> = Vec::new();
    for child in ordered {
        match child {
            SectionChild::Message(message) => current.push(message),
            SectionChild::Section(_) => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Lays one run out as evenly packed label boxes in the gap between the
/// neighbouring rendered sections, each with a connector back to its
/// event's position on the time axis.
pub(super) fn render_run(
    vis: &mut TimelineVisualizer<'_>,
    run: &[&LogMessage],
    parent: &LogSection,
    parent_end: Timestamp,
    depth: usize,
    parent_rect: &SectionMetrics,
    root_width: f32,
) {
    let (Some(first), Some(last)) = (run.first(), run.last()) else {
        return;
    };

    // The run may spread to the end of the latest sibling section that is
    // fully over before it, and to the start of the earliest one after it.
    let left_bound = parent
        .child_sections()
        .filter_map(|s| s.end_time)
        .filter(|end| *end <= first.timestamp)
        .max()
        .unwrap_or(parent.start_time);
    let right_bound = parent
        .child_sections()
        .map(|s| s.start_time)
        .filter(|start| *start >= last.timestamp)
        .min()
        .unwrap_or(parent_end);

    let run_x_start = vis.time_to_x(left_bound);
    let available_width = vis.time_to_x(right_bound) - run_x_start;
    let (margin, box_width) = scale::run_box_metrics(available_width, run.len());

    let dir = vis.dir();
    let build_side_y = parent_rect.center_y + (parent_rect.height / 2.0) * dir;
    // The row offset uses the depth formula in both sizing modes.
    let row_offset = scale::section_height_depth_based(root_width, depth) * ROW_OFFSET_FACTOR;
    let box_center_y = build_side_y + row_offset * dir;
    let box_height = match vis.config.sizing_mode {
        SizingMode::Depth => scale::annotation_height_depth_based(root_width, depth),
        SizingMode::Aspect => box_width / 4.0,
    };

    // Connector endpoints track the standalone marker geometry.
    let (event_y, connector_width) = match vis.config.sizing_mode {
        SizingMode::Depth => (
            build_side_y + scale::section_height_depth_based(root_width, depth) * dir,
            scale::event_width_depth_based(root_width, depth + 1),
        ),
        SizingMode::Aspect => (
            build_side_y + (parent_rect.height / 2.0) * dir,
            scale::event_width_aspect_based(parent_rect.width),
        ),
    };

    for (i, event) in run.iter().enumerate() {
        let slot_x = run_x_start + i as f32 * (box_width + margin);
        let box_center_x = slot_x + box_width / 2.0;

        vis.commands.push(Command::Rect {
            center: (box_center_x, box_center_y, 0.0),
            width: box_width,
            height: box_height,
            color: vis.theme.annotation_fill,
        });
        vis.commands.push(Command::Text {
            label: event.message.trim().to_string(),
            center: (box_center_x, box_center_y, super::TEXT_Z_OFFSET),
            width: box_width,
            height: box_height,
            color: vis.theme.annotation_label_color,
        });
        vis.commands.push(Command::Segment {
            from: (box_center_x, box_center_y),
            to: (vis.time_to_x(event.timestamp), event_y),
            thickness: connector_width,
            color: vis.theme.connector_color,
        });
    }
}

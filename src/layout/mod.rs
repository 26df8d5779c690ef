mod annotation;
mod axis;
mod scale;
mod section;
pub(crate) mod types;
pub use types::*;

use thiserror::Error;

use crate::config::{SizingMode, VisualizerConfig};
use crate::ir::{LogSection, SectionChild, Timestamp};
use crate::theme::Theme;

// Gap between the axis and the first stacked section.
const BASELINE_PADDING: f32 = 0.1;
// Labels sit slightly in front of the rectangles they belong to.
const TEXT_Z_OFFSET: f32 = 0.01;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("root section `{0}` has no end marker; the time scale is undefined")]
    UnterminatedRoot(String),
}

/// Lays one section tree out as a flat list of draw commands.
///
/// One instance owns one pass's output; `generate` rebuilds the command
/// list from scratch each time it is called.
pub struct TimelineVisualizer<'a> {
    config: &'a VisualizerConfig,
    theme: &'a Theme,
    root: &'a LogSection,
    start_time: Timestamp,
    end_time: Timestamp,
    total_duration_micros: i64,
    commands: Vec<Command>,
    used_text_areas: Vec<TextArea>,
}

impl<'a> TimelineVisualizer<'a> {
    pub fn new(
        root: &'a LogSection,
        theme: &'a Theme,
        config: &'a VisualizerConfig,
    ) -> Result<Self, LayoutError> {
        let Some(end_time) = root.end_time else {
            return Err(LayoutError::UnterminatedRoot(root.name.clone()));
        };
        let start_time = config.custom_start_time.unwrap_or(root.start_time);
        Ok(Self {
            config,
            theme,
            root,
            start_time,
            end_time,
            total_duration_micros: end_time.micros_since(start_time),
            commands: Vec::new(),
            used_text_areas: Vec::new(),
        })
    }

    pub fn generate(&mut self) -> &[Command] {
        self.commands.clear();
        self.used_text_areas.clear();

        if self.config.draw_timeline {
            axis::render_axis(self);
        }

        let entry_base_y = self.config.base_timeline_position_y
            + (self.config.timeline_tick_height / 2.0 + BASELINE_PADDING) * self.dir();
        // The root span fixes the scale for the whole recursion; deeper
        // sections never recompute it.
        let root_width = self.time_to_x(self.end_time) - self.time_to_x(self.root.start_time);

        let root = self.root;
        self.process_section(root, 0, entry_base_y, 0, root_width);
        &self.commands
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    /// Label boxes claimed so far. Bookkeeping only; no collision pass
    /// consumes this yet.
    pub fn claimed_text_areas(&self) -> &[TextArea] {
        &self.used_text_areas
    }

    fn process_section(
        &mut self,
        section: &LogSection,
        depth: usize,
        base_y: f32,
        section_index: usize,
        root_width: f32,
    ) {
        // A section that never ended has no geometry; drop the subtree.
        let Some(end_time) = section.end_time else {
            return;
        };

        let metrics = section::render_section(
            self,
            section,
            end_time,
            depth,
            section_index,
            base_y,
            root_width,
        );

        for run in annotation::group_event_runs(section) {
            annotation::render_run(self, &run, section, end_time, depth, &metrics, root_width);
        }

        // Children stack directly on the build-side edge, no gap.
        let next_base_y = base_y + metrics.height * self.dir();
        let mut child_section_index = 0;
        for child in &section.children {
            match child {
                SectionChild::Section(child_section) => {
                    self.process_section(
                        child_section,
                        depth + 1,
                        next_base_y,
                        child_section_index,
                        root_width,
                    );
                    child_section_index += 1;
                }
                SectionChild::Message(message) => {
                    let (event_height, event_width) = match self.config.sizing_mode {
                        SizingMode::Depth => (
                            scale::section_height_depth_based(root_width, depth + 1),
                            scale::event_width_depth_based(root_width, depth + 1),
                        ),
                        SizingMode::Aspect => (
                            metrics.height / 2.0,
                            scale::event_width_aspect_based(metrics.width),
                        ),
                    };
                    let center_y = next_base_y + (event_height / 2.0) * self.dir();
                    self.commands.push(Command::Rect {
                        center: (self.time_to_x(message.timestamp), center_y, 0.0),
                        width: event_width,
                        height: event_height,
                        color: self.theme.event_marker_color,
                    });
                }
            }
        }
    }

    fn time_to_x(&self, timestamp: Timestamp) -> f32 {
        scale::time_to_x(timestamp, self.start_time, self.config.ndc_units_per_second)
    }

    fn dir(&self) -> f32 {
        self.config.build_direction.factor()
    }
}

/// One-shot layout over a tree: construct, generate, hand the commands back.
pub fn compute_layout(
    root: &LogSection,
    theme: &Theme,
    config: &VisualizerConfig,
) -> Result<Vec<Command>, LayoutError> {
    let mut visualizer = TimelineVisualizer::new(root, theme, config)?;
    visualizer.generate();
    Ok(visualizer.into_commands())
}

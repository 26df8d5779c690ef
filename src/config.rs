use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ir::Timestamp;

const KNOWN_KEYS: [&str; 10] = [
    "build_direction",
    "ndc_units_per_second",
    "use_custom_root_section_height",
    "custom_root_section_height",
    "base_timeline_position_y",
    "draw_timeline",
    "timeline_tick_width",
    "timeline_tick_height",
    "custom_start_time",
    "sizing_mode",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildDirection {
    #[default]
    Up,
    Down,
}

impl BuildDirection {
    /// Sign applied to every vertical offset away from the baseline.
    pub fn factor(&self) -> f32 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizingMode {
    /// Sizes derive from the root span and nesting depth, not the
    /// element's own duration.
    Depth,
    /// Sizes derive from the element's own temporal width.
    #[default]
    Aspect,
}

#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    pub build_direction: BuildDirection,
    pub ndc_units_per_second: f32,
    pub use_custom_root_section_height: bool,
    pub custom_root_section_height: f32,
    pub base_timeline_position_y: f32,
    pub draw_timeline: bool,
    pub timeline_tick_width: f32,
    pub timeline_tick_height: f32,
    pub custom_start_time: Option<Timestamp>,
    pub sizing_mode: SizingMode,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            build_direction: BuildDirection::Up,
            ndc_units_per_second: 0.5,
            use_custom_root_section_height: true,
            custom_root_section_height: 0.01,
            base_timeline_position_y: 0.0,
            draw_timeline: true,
            timeline_tick_width: 0.01,
            timeline_tick_height: 0.1,
            custom_start_time: None,
            sizing_mode: SizingMode::Aspect,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct VisualizerConfigFile {
    build_direction: Option<BuildDirection>,
    ndc_units_per_second: Option<f32>,
    use_custom_root_section_height: Option<bool>,
    custom_root_section_height: Option<f32>,
    base_timeline_position_y: Option<f32>,
    draw_timeline: Option<bool>,
    timeline_tick_width: Option<f32>,
    timeline_tick_height: Option<f32>,
    custom_start_time: Option<String>,
    sizing_mode: Option<SizingMode>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<VisualizerConfig> {
    let Some(path) = path else {
        return Ok(VisualizerConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn parse_config(contents: &str) -> anyhow::Result<VisualizerConfig> {
    // Strict JSON first, JSON5 as a fallback for hand-edited files with
    // comments or trailing commas.
    let value: serde_json::Value = match serde_json::from_str(contents) {
        Ok(value) => value,
        Err(_) => json5::from_str(contents)?,
    };
    if let Some(map) = value.as_object() {
        for key in map.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                eprintln!("warning: ignoring unknown config key `{key}`");
            }
        }
    }
    let parsed: VisualizerConfigFile = serde_json::from_value(value)?;

    let mut config = VisualizerConfig::default();
    if let Some(v) = parsed.build_direction {
        config.build_direction = v;
    }
    if let Some(v) = parsed.ndc_units_per_second {
        config.ndc_units_per_second = v;
    }
    if let Some(v) = parsed.use_custom_root_section_height {
        config.use_custom_root_section_height = v;
    }
    if let Some(v) = parsed.custom_root_section_height {
        config.custom_root_section_height = v;
    }
    if let Some(v) = parsed.base_timeline_position_y {
        config.base_timeline_position_y = v;
    }
    if let Some(v) = parsed.draw_timeline {
        config.draw_timeline = v;
    }
    if let Some(v) = parsed.timeline_tick_width {
        config.timeline_tick_width = v;
    }
    if let Some(v) = parsed.timeline_tick_height {
        config.timeline_tick_height = v;
    }
    if let Some(text) = parsed.custom_start_time {
        let ts = Timestamp::parse(&text)
            .with_context(|| format!("invalid custom_start_time `{text}`"))?;
        config.custom_start_time = Some(ts);
    }
    if let Some(v) = parsed.sizing_mode {
        config.sizing_mode = v;
    }
    Ok(config)
}

use std::path::Path;

use anyhow::{Context, Result};

use crate::layout::Command;
use crate::theme::Color;

/// Serializes layout commands into the line-oriented draw script the
/// downstream geometry stage consumes. One command per line, each line
/// newline-terminated.
pub fn render_script(commands: &[Command]) -> String {
    let mut script = String::new();
    for command in commands {
        script.push_str(&command_line(command));
        script.push('\n');
    }
    script
}

fn command_line(command: &Command) -> String {
    match command {
        Command::Rect {
            center,
            width,
            height,
            color,
        } => format!(
            "generate_rectangle({}, {}, {}, {}, {}) | {}",
            coord(center.0),
            coord(center.1),
            coord(center.2),
            coord(*width),
            coord(*height),
            color_triple(color),
        ),
        Command::Text {
            label,
            center,
            width,
            height,
            color,
        } => format!(
            "get_text_geometry(\"{}\", Rectangle(({}, {}, {}), {}, {})) | {}",
            escape_label(label),
            coord(center.0),
            coord(center.1),
            coord(center.2),
            coord(*width),
            coord(*height),
            color_triple(color),
        ),
        Command::Segment {
            from,
            to,
            thickness,
            color,
        } => format!(
            "generate_rectangle_between_2d(({}, {}), ({}, {}), {}) | {}",
            coord(from.0),
            coord(from.1),
            coord(to.0),
            coord(to.1),
            coord(*thickness),
            color_triple(color),
        ),
    }
}

// Negative zero is normalized so mirrored layouts produce byte-identical
// scripts.
fn coord(value: f32) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.6}")
}

fn color_triple(color: &Color) -> String {
    format!("({:.3}, {:.3}, {:.3})", color.r, color.g, color.b)
}

// Labels come from log text and may carry quotes or backslashes that would
// corrupt the quoted field.
fn escape_label(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Writes the script to `output`, or to stdout when no path is given.
pub fn write_output_script(script: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, script)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        }
        None => {
            print!("{script}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_line_shape() {
        let line = command_line(&Command::Rect {
            center: (0.0, 0.5, 0.0),
            width: 2.0,
            height: 0.02,
            color: Color::new(0.5, 0.5, 0.5),
        });
        assert_eq!(
            line,
            "generate_rectangle(0.000000, 0.500000, 0.000000, 2.000000, 0.020000) | (0.500, 0.500, 0.500)"
        );
    }

    #[test]
    fn text_line_shape() {
        let line = command_line(&Command::Text {
            label: "load (300.000ms)".to_string(),
            center: (0.25, 0.1, 0.01),
            width: 0.5,
            height: 0.125,
            color: Color::new(0.9, 0.9, 0.9),
        });
        assert_eq!(
            line,
            "get_text_geometry(\"load (300.000ms)\", Rectangle((0.250000, 0.100000, 0.010000), 0.500000, 0.125000)) | (0.900, 0.900, 0.900)"
        );
    }

    #[test]
    fn segment_line_shape() {
        let line = command_line(&Command::Segment {
            from: (0.75, 0.2),
            to: (0.5, 0.05),
            thickness: 0.001,
            color: Color::new(0.6, 0.6, 0.6),
        });
        assert_eq!(
            line,
            "generate_rectangle_between_2d((0.750000, 0.200000), (0.500000, 0.050000), 0.001000) | (0.600, 0.600, 0.600)"
        );
    }

    #[test]
    fn negative_zero_is_normalized() {
        assert_eq!(coord(-0.0), "0.000000");
        assert_eq!(coord(-0.5), "-0.500000");
    }

    #[test]
    fn labels_with_quotes_are_escaped() {
        assert_eq!(escape_label("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_label("a\\b"), "a\\\\b");
    }

    #[test]
    fn script_has_one_line_per_command() {
        let commands = vec![
            Command::Rect {
                center: (0.0, 0.0, 0.0),
                width: 1.0,
                height: 1.0,
                color: Color::new(0.1, 0.2, 0.3),
            },
            Command::Segment {
                from: (0.0, 0.0),
                to: (1.0, 1.0),
                thickness: 0.001,
                color: Color::new(0.6, 0.6, 0.6),
            },
        ];
        let script = render_script(&commands);
        assert_eq!(script.lines().count(), 2);
        assert!(script.ends_with('\n'));
    }

    #[test]
    fn empty_command_list_renders_empty_script() {
        assert_eq!(render_script(&[]), "");
    }
}

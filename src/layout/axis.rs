use super::TimelineVisualizer;
use super::types::Command;

const BASE_LINE_WIDTH: f32 = 2.0;
const BASE_LINE_HEIGHT: f32 = 0.02;
const TICK_STEPS: i64 = 10;
const TICK_LABEL_WIDTH: f32 = 0.2;
const TICK_LABEL_HEIGHT: f32 = 0.16;
const TICK_LABEL_Z: f32 = 0.1;

pub(super) fn render_axis(vis: &mut TimelineVisualizer<'_>) {
    let base_y = vis.config.base_timeline_position_y;
    vis.commands.push(Command::Rect {
        center: (0.0, base_y, 0.0),
        width: BASE_LINE_WIDTH,
        height: BASE_LINE_HEIGHT,
        color: vis.theme.axis_color,
    });
    render_ticks(vis);
}

fn render_ticks(vis: &mut TimelineVisualizer<'_>) {
    let base_y = vis.config.base_timeline_position_y;
    let dir = vis.dir();
    // Tick positions are fixed over the nominal [-1, 1] range; only the
    // labels track the actual time span.
    for i in 0..=TICK_STEPS {
        let x_pos = -1.0 + i as f32 * 0.2;
        let tick_time = vis
            .start_time
            .add_micros(vis.total_duration_micros * i / TICK_STEPS);

        vis.commands.push(Command::Rect {
            center: (x_pos, base_y, 0.0),
            width: vis.config.timeline_tick_width,
            height: vis.config.timeline_tick_height,
            color: vis.theme.tick_color,
        });

        let text_x = x_pos - 0.05;
        let text_y = base_y - 0.1 * dir;
        vis.used_text_areas
            .push((text_x, text_x + 0.1, text_y, text_y + 0.08));
        vis.commands.push(Command::Text {
            label: tick_time.to_string(),
            center: (text_x, text_y, TICK_LABEL_Z),
            width: TICK_LABEL_WIDTH,
            height: TICK_LABEL_HEIGHT,
            color: vis.theme.tick_label_color,
        });
    }
}

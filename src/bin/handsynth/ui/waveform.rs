//! Oscilloscope widget, triggered on a rising zero crossing so a steady
//! note stands still instead of scrolling.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Samples shown; the rest of the buffer is trigger search room.
const SCOPE_WINDOW: usize = 1024;

/// Index of the first rising zero crossing that leaves `window` samples
/// after it, or 0 if there is none.
fn trigger_point(buffer: &[f32], window: usize) -> usize {
    let search_end = buffer.len().saturating_sub(window);
    buffer
        .windows(2)
        .take(search_end)
        .position(|pair| pair[0] <= 0.0 && pair[1] > 0.0)
        .map(|i| i + 1)
        .unwrap_or(0)
}

pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let block = Block::default().title(" Scope ").borders(Borders::ALL);

    let start = trigger_point(audio_buffer, SCOPE_WINDOW);
    let visible = &audio_buffer[start..audio_buffer.len().min(start + SCOPE_WINDOW)];

    let data: Vec<(f64, f64)> = visible
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / SCOPE_WINDOW as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_rising_crossing() {
        let buffer = [0.5, 0.2, -0.3, -0.1, 0.4, 0.6, 0.1, -0.2];
        assert_eq!(trigger_point(&buffer, 2), 4);
    }

    #[test]
    fn silence_starts_at_zero() {
        assert_eq!(trigger_point(&[0.0; 64], 16), 0);
    }
}

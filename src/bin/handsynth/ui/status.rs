//! Status bar widget - the per-frame display tuple plus synth and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use handsynth::{
    control::{DisplaySnapshot, WahDisplay},
    dsp::Waveform,
};

/// Peak and RMS of the scope buffer
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Instrument settings shown next to the frame display
pub struct StatusInfo<'a> {
    pub scale: &'a str,
    pub waveform: Waveform,
    /// Frequency the oscillator is gliding toward
    pub frequency_hz: f32,
    pub sample_rate: f32,
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    display: Option<&DisplaySnapshot>,
    info: &StatusInfo,
    stats: &AudioStats,
) {
    let block = Block::default().title(" handsynth ").borders(Borders::ALL);

    let (pitch, volume, wah) = match display {
        Some(display) => (display.pitch.as_str(), display.volume.as_str(), display.wah),
        None => ("---", "0.00", WahDisplay::Off),
    };

    let wah_style = match wah {
        WahDisplay::On => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        WahDisplay::Off => Style::default().fg(Color::DarkGray),
    };

    let line = Line::from(vec![
        Span::styled(format!(" Pitch: {pitch:>4}  "), Style::default().fg(Color::Cyan)),
        Span::styled(format!("Vol: {volume}  "), Style::default().fg(Color::Magenta)),
        Span::styled(format!(" Wah: {wah} "), wah_style),
        Span::raw("   "),
        Span::styled(
            format!("{:>7.2} Hz  ", info.frequency_hz),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{} / {}  ", info.scale, info.waveform),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("{:.1}kHz  ", info.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_full_scale_square() {
        let stats = AudioStats::from_buffer(&[0.5, -0.5, 0.5, -0.5]);
        assert_eq!(stats.peak, 0.5);
        assert!((stats.rms - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stats_of_nothing() {
        let stats = AudioStats::from_buffer(&[]);
        assert_eq!(stats.peak, 0.0);
        assert_eq!(stats.rms, 0.0);
    }
}

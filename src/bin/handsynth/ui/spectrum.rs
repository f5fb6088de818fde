//! Spectrum analyzer widget
//!
//! Hann-windowed FFT sampled at log-spaced frequencies and drawn on a log
//! axis, so each octave gets the same width. While the wah is engaged its
//! cutoff is marked; the resonance bump should sit right on it.

use std::f32::consts::PI;
use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

const SPECTRUM_BINS: usize = 64;
const MIN_FREQ_HZ: f32 = 20.0;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    /// FFT bin for each display point
    bin_indices: Vec<usize>,
    /// log10(Hz) for each display point
    log_freqs: Vec<f64>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 Hz, dB)
    spectrum: Vec<(f64, f64)>,
    /// Normalises a full-scale sine to about 0 dB
    reference_power: f32,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_len);

        let window: Vec<f32> = (0..fft_len)
            .map(|i| {
                if fft_len > 1 {
                    0.5 * (1.0 - (2.0 * PI * i as f32 / (fft_len - 1) as f32).cos())
                } else {
                    1.0
                }
            })
            .collect();
        let window_sum: f32 = window.iter().sum();

        let max_freq = (sample_rate / 2.0).min(20_000.0).max(MIN_FREQ_HZ * 2.0);
        let ratio = (max_freq / MIN_FREQ_HZ) as f64;
        let last_bin = (fft_len / 2).saturating_sub(1);

        let mut log_freqs = Vec::with_capacity(SPECTRUM_BINS);
        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = MIN_FREQ_HZ as f64 * ratio.powf(t);
            let index = (freq * fft_len as f64 / sample_rate as f64).round() as usize;
            log_freqs.push(freq.log10());
            bin_indices.push(index.min(last_bin));
        }

        let spectrum = log_freqs.iter().map(|&f| (f, FLOOR_DB)).collect();

        Self {
            window,
            bin_indices,
            log_freqs,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            spectrum,
            reference_power: (window_sum / 2.0).powi(2).max(1e-12),
        }
    }

    /// Recompute from the newest samples. Buffers of the wrong length are
    /// ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for ((point, &index), &log_freq) in self
            .spectrum
            .iter_mut()
            .zip(&self.bin_indices)
            .zip(&self.log_freqs)
        {
            let power = self.scratch[index].norm_sqr() / self.reference_power;
            *point = (log_freq, (10.0 * (power.max(1e-12) as f64).log10()).max(FLOOR_DB));
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)], wah_cutoff_hz: Option<f32>) {
    let title = match wah_cutoff_hz {
        Some(cutoff) => format!(" Spectrum  wah @ {cutoff:.0} Hz "),
        None => " Spectrum ".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let min_x = (MIN_FREQ_HZ as f64).log10();
    let max_x = spectrum.last().map(|&(f, _)| f).unwrap_or(min_x + 3.0);

    let marker: Vec<(f64, f64)> = wah_cutoff_hz
        .map(|cutoff| {
            let x = (cutoff as f64).log10();
            vec![(x, FLOOR_DB), (x, 0.0)]
        })
        .unwrap_or_default();

    let mut datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum)];
    if !marker.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&marker),
        );
    }

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([min_x, max_x])
                .labels(vec![Span::raw("20"), Span::raw("200"), Span::raw("2k"), Span::raw("20k")])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 10.0])
                .labels(vec![Span::raw("-100"), Span::raw("-45"), Span::raw("10")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_peaks_at_its_frequency() {
        let sample_rate = 48_000.0;
        let len = 2048;
        let mut analyzer = SpectrumAnalyzer::new(len, sample_rate);

        let freq = 1_000.0;
        let buffer: Vec<f32> = (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
            .collect();
        analyzer.update(&buffer);

        let (peak_log_freq, peak_db) = analyzer
            .data()
            .iter()
            .copied()
            .fold((0.0, f64::MIN), |best, p| if p.1 > best.1 { p } else { best });

        let peak_hz = 10f64.powf(peak_log_freq);
        assert!((peak_hz - 1_000.0).abs() < 100.0, "peak at {peak_hz} Hz");
        // Display points rarely land on the sine's exact bin; allow for leakage.
        assert!(peak_db > -20.0 && peak_db < 3.0, "peak level {peak_db} dB");
    }

    #[test]
    fn wrong_length_is_ignored() {
        let mut analyzer = SpectrumAnalyzer::new(256, 48_000.0);
        analyzer.update(&[1.0; 128]);
        assert!(analyzer.data().iter().all(|&(_, db)| db == FLOOR_DB));
    }
}

//! TUI for handsynth
//!
//! Shows what the hands are doing and what the synth is making of it.

mod hands;
mod spectrum;
mod status;
mod waveform;

use std::io;
use std::ops::ControlFlow;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use handsynth::{
    control::{AudioChain, ControlLoop, FrameOutput, FrameScheduler, HandDetector, Session},
    dsp::Waveform,
    synth::ChainHandle,
};

use hands::render_hands;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats, StatusInfo};
use waveform::render_waveform;

/// Audio visualization buffer size (also the FFT size)
const VIS_BUFFER_SIZE: usize = 2048;

/// Capacity of the audio → UI sample queue
pub const VIS_QUEUE_CAPACITY: usize = VIS_BUFFER_SIZE * 8;

pub struct UiApp {
    /// Samples from the audio callback
    audio_rx: Consumer<f32>,
    /// Last `VIS_BUFFER_SIZE` samples
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    sample_rate: f32,
    /// Latest processed frame; `None` until the first one
    last_frame: Option<FrameOutput>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(audio_rx: Consumer<f32>, sample_rate: f32) -> Self {
        Self {
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            sample_rate,
            last_frame: None,
            should_quit: false,
        }
    }

    /// Run one control frame per scheduler tick, redrawing after each.
    pub fn run<D: HandDetector>(
        mut self,
        session: &mut Session<D, ChainHandle>,
        terminal: &mut DefaultTerminal,
        scheduler: &mut dyn FrameScheduler,
    ) -> EyreResult<()> {
        let mut failure: Option<io::Error> = None;

        session.run(scheduler, |output, control| {
            if let Some(output) = output {
                self.last_frame = Some(output.clone());
            }
            self.poll_audio();

            if let Err(err) = terminal.draw(|frame| self.render(frame, control)) {
                failure = Some(err);
                return ControlFlow::Break(());
            }
            if let Err(err) = self.poll_keys(control) {
                failure = Some(err);
                return ControlFlow::Break(());
            }

            if self.should_quit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Keep the newest `VIS_BUFFER_SIZE` samples.
    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }

        self.audio_buffer.reserve(available);
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
        self.spectrum.update(&self.audio_buffer);
    }

    /// Drain pending key events without blocking the frame.
    fn poll_keys(&mut self, control: &mut ControlLoop<ChainHandle>) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code, control);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, control: &mut ControlLoop<ChainHandle>) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                control.cycle_scale();
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                let next: Waveform = control.waveform().cycle();
                control.set_waveform(next);
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, control: &ControlLoop<ChainHandle>) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(10),   // Hands | scope + spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        let scopes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let info = StatusInfo {
            scale: control.scale_name(),
            waveform: control.waveform(),
            frequency_hz: control.chain().frequency(),
            sample_rate: self.sample_rate,
        };
        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, rows[0], self.last_frame.as_ref().map(|f| &f.display), &info, &stats);

        render_hands(frame, columns[0], self.last_frame.as_ref().map(|f| &f.roles));
        render_waveform(frame, scopes[0], &self.audio_buffer);

        let wah_cutoff = self
            .last_frame
            .as_ref()
            .filter(|f| f.state.wah_active)
            .map(|_| control.wah_presets().active.cutoff_hz);
        render_spectrum(frame, scopes[1], self.spectrum.data(), wah_cutoff);

        let help = Paragraph::new(" [Q] Quit  [S] Next scale  [W] Next waveform")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}

//! Handsynth - application builder and startup sequence

use std::path::PathBuf;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use tracing::{error, info};

use handsynth::{
    config::HandsynthConfig,
    control::{FixedRateScheduler, HandDetector, Session},
    error::StartupError,
    synth::{build_chain, PARAM_QUEUE_CAPACITY},
    MAX_BLOCK_SIZE,
};

use super::detector::{ReplayDetector, SweepDetector};
use super::ui::{UiApp, VIS_QUEUE_CAPACITY};

pub struct Handsynth {
    config: HandsynthConfig,
    fps: u32,
    replay: Option<PathBuf>,
}

impl Handsynth {
    pub fn new(config: HandsynthConfig) -> Self {
        Self {
            config,
            fps: 60,
            replay: None,
        }
    }

    /// Control frames per second.
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Play a landmark recording instead of the demo performer.
    pub fn replay(mut self, path: Option<PathBuf>) -> Self {
        self.replay = path;
        self
    }

    /// Bring the instrument up in order (audio device, stream, hand source,
    /// control loop) and hand the terminal to the UI until it quits.
    pub fn run(self) -> EyreResult<()> {
        // 1. audio device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| StartupError::AudioDevice("no default output device available".into()))?;
        let stream_config = device
            .default_output_config()
            .map_err(|err| StartupError::AudioDevice(err.to_string()))
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0 as f32;
        let channels = stream_config.channels() as usize;

        // 2. chain and stream
        let (handle, mut chain) = build_chain(sample_rate, PARAM_QUEUE_CAPACITY);
        let (mut vis_tx, vis_rx) = RingBuffer::<f32>::new(VIS_QUEUE_CAPACITY);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device
            .build_output_stream(
                &stream_config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames_to_render];
                        chain.render(block);

                        // Mono to all channels; the scope takes what fits.
                        let out = &mut data[frames_written * channels..(frames_written + frames_to_render) * channels];
                        for (frame, &sample) in out.chunks_mut(channels).zip(block.iter()) {
                            frame.fill(sample);
                            let _ = vis_tx.push(sample);
                        }

                        frames_written += frames_to_render;
                    }
                },
                |err| error!("audio stream error: {err}"),
                None,
            )
            .map_err(|err| StartupError::AudioStream(err.to_string()))?;
        stream
            .play()
            .map_err(|err| StartupError::AudioStream(err.to_string()))?;

        info!(sample_rate, channels, "audio stream started");

        // 3. hand source
        let detector: Box<dyn HandDetector> = match &self.replay {
            Some(path) => Box::new(ReplayDetector::open(path)?),
            None => {
                info!("no recording given, using the demo performer");
                Box::new(SweepDetector::new())
            }
        };

        // 4. control loop
        let mut session = Session::start(detector, handle, &self.config)?;

        // 5. UI drives the frames
        let mut scheduler = FixedRateScheduler::new(self.fps);
        let mut terminal = ratatui::init();
        let result = UiApp::new(vis_rx, sample_rate).run(&mut session, &mut terminal, &mut scheduler);
        ratatui::restore();

        drop(stream);
        info!("stopped");
        result
    }
}

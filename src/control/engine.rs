use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::{
    collaborators::AudioChain,
    smoother::ParameterSmoother,
    state::{ControlState, DisplaySnapshot},
};
use crate::{
    config::HandsynthConfig,
    dsp::oscillator::Waveform,
    error::StartupError,
    landmarks::{
        geometry::OpennessCalibration,
        hand::DetectionResult,
        roles::{RoleAssignment, RoleClassifier},
    },
    mapping::{
        effect::WahPresets,
        gestures::{map_pitch, map_volume, map_wah, MappingSettings},
        scale::{MusicalScale, ScaleBook},
    },
    synth::message::SynthParam,
};

/*
Control Loop
============

One call per video frame:

    DetectionResult
         │
         ▼
    1. classify      wrist.x → Pitch | VolumeEffect
    2. pitch         openness → note (held when no pitch hand)
    3. volume        wrist height, 0.5 one-handed, 0 with no hands
    4. wah           thumb/index pinch
    5. push          frequency, gain, cutoff, Q → smoother → chain
    6. display       "NN%"|"---", "0.00", ON|OFF

All four targets are pushed every frame, including the held frequency, so a
dropped queue message is healed by the next frame.

The scale is looked up by name on every frame. Switching scales (or naming
one that does not exist) takes effect on the very next frame; an unknown name
just stops pitch updates until a real one is selected.
*/

/// Everything a frame produces for the presentation side.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub display: DisplaySnapshot,
    /// Classified hands, passed through for the overlay.
    pub roles: RoleAssignment,
    pub state: ControlState,
}

pub struct ControlLoop<C: AudioChain> {
    chain: C,
    classifier: RoleClassifier,
    calibration: OpennessCalibration,
    mapping: MappingSettings,
    wah: WahPresets,
    smoother: ParameterSmoother,
    scales: ScaleBook,
    scale_name: String,
    waveform: Waveform,
    state: ControlState,
    warned_scales: HashSet<String>,
    hands_seen: usize,
}

impl<C: AudioChain> ControlLoop<C> {
    /// Fails if the chain is not ready or the configuration is invalid.
    pub fn new(mut chain: C, config: &HandsynthConfig) -> Result<Self, StartupError> {
        if !chain.is_ready() {
            return Err(StartupError::NotReady("audio chain"));
        }
        config.validate()?;

        chain.set_waveform(config.waveform);
        let state = ControlState::new(chain.frequency());

        info!(
            scale = %config.scale,
            waveform = %config.waveform,
            tie_break = ?config.tie_break,
            "control loop ready"
        );

        Ok(Self {
            chain,
            classifier: RoleClassifier::new(config.mapping.pitch_boundary_x, config.tie_break),
            calibration: config.calibration,
            mapping: config.mapping,
            wah: config.wah,
            smoother: ParameterSmoother::new(config.smoothing),
            scales: config.scale_book(),
            scale_name: config.scale.clone(),
            waveform: config.waveform,
            state,
            warned_scales: HashSet::new(),
            hands_seen: 0,
        })
    }

    pub fn process_frame(&mut self, detection: &DetectionResult) -> FrameOutput {
        // 1. roles
        let roles = self.classifier.assign(detection);
        if roles.count() != self.hands_seen {
            debug!(from = self.hands_seen, to = roles.count(), "hand count changed");
            self.hands_seen = roles.count();
        }

        // 2. pitch
        let mut frequency = self.state.current_frequency_hz;
        self.state.pitch_openness = None;
        if let Some(hand) = &roles.pitch {
            let scale = resolve_scale(&self.scales, &self.scale_name, &mut self.warned_scales);
            if let Some(reading) = map_pitch(hand, &self.calibration, scale) {
                self.state.pitch_openness = Some(reading.openness);
                if let Some(candidate) = reading.frequency {
                    frequency = candidate;
                }
            }
        }

        // 3. volume
        let volume = map_volume(&roles, &self.mapping);

        // 4. wah
        let wah_active = map_wah(&roles, &self.mapping);
        if wah_active != self.state.wah_active {
            debug!(wah_active, "wah toggled");
        }
        let filter = self.wah.for_state(wah_active);

        // 5. push
        let chain = &mut self.chain;
        if self.smoother.push(chain, SynthParam::OscillatorFrequency, frequency) {
            self.state.current_frequency_hz = frequency;
        }
        if self.smoother.push(chain, SynthParam::Gain, volume) {
            self.state.current_volume = volume;
        }
        self.smoother.push(chain, SynthParam::FilterCutoff, filter.cutoff_hz);
        self.smoother.push(chain, SynthParam::FilterResonance, filter.q);
        self.state.wah_active = wah_active;

        // 6. display
        FrameOutput {
            display: self.state.snapshot(),
            roles,
            state: self.state,
        }
    }

    /// Switch scales by name; the new scale is used from the next frame.
    ///
    /// Returns whether the name is known. An unknown name is still selected.
    pub fn select_scale(&mut self, name: impl Into<String>) -> bool {
        self.scale_name = name.into();
        self.scales.get(&self.scale_name).is_some()
    }

    /// Select the scale after the current one, wrapping around.
    pub fn cycle_scale(&mut self) -> &str {
        if let Some(next) = self.scales.next_name(&self.scale_name) {
            self.scale_name = next.to_string();
        }
        &self.scale_name
    }

    /// Add or replace a named scale at runtime. Not validated; a scale that
    /// yields non-finite notes is held off the chain by the smoother guard.
    pub fn insert_scale(&mut self, name: impl Into<String>, scale: MusicalScale) {
        self.scales.insert(name, scale);
    }

    pub fn scale_name(&self) -> &str {
        &self.scale_name
    }

    pub fn scales(&self) -> &ScaleBook {
        &self.scales
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
        self.chain.set_waveform(waveform);
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn wah_presets(&self) -> &WahPresets {
        &self.wah
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut C {
        &mut self.chain
    }
}

fn resolve_scale<'a>(
    scales: &'a ScaleBook,
    name: &str,
    warned: &mut HashSet<String>,
) -> Option<&'a MusicalScale> {
    let scale = scales.get(name);
    if scale.is_none() && warned.insert(name.to_string()) {
        warn!(scale = name, "unknown scale, holding the current note");
    }
    scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{hand::Hand, pose::HandPose};

    #[derive(Default)]
    struct Spy {
        ready: bool,
        calls: Vec<(SynthParam, f32)>,
        waveform: Option<Waveform>,
    }

    impl Spy {
        fn ready() -> Self {
            Self {
                ready: true,
                ..Default::default()
            }
        }

        fn last(&self, param: SynthParam) -> Option<f32> {
            self.calls.iter().rev().find(|(p, _)| *p == param).map(|&(_, v)| v)
        }
    }

    impl AudioChain for Spy {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn current_time(&self) -> f64 {
            0.0
        }

        fn set_target_at_time(&mut self, param: SynthParam, target: f32, _: f64, _: f32) {
            self.calls.push((param, target));
        }

        fn frequency(&self) -> f32 {
            440.0
        }

        fn set_waveform(&mut self, waveform: Waveform) {
            self.waveform = Some(waveform);
        }
    }

    fn control() -> ControlLoop<Spy> {
        ControlLoop::new(Spy::ready(), &HandsynthConfig::default()).unwrap()
    }

    fn frame(hands: Vec<Hand>) -> DetectionResult {
        DetectionResult::new(hands)
    }

    #[test]
    fn refuses_unready_chain() {
        let result = ControlLoop::new(Spy::default(), &HandsynthConfig::default());
        assert!(matches!(result, Err(StartupError::NotReady("audio chain"))));
    }

    #[test]
    fn applies_configured_waveform_at_start() {
        let config = HandsynthConfig {
            waveform: Waveform::Sawtooth,
            ..Default::default()
        };
        let control = ControlLoop::new(Spy::ready(), &config).unwrap();
        assert_eq!(control.chain().waveform, Some(Waveform::Sawtooth));
    }

    #[test]
    fn pushes_all_four_targets_every_frame() {
        let mut control = control();
        control.process_frame(&DetectionResult::empty());

        let params: Vec<_> = control.chain().calls.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            params,
            vec![
                SynthParam::OscillatorFrequency,
                SynthParam::Gain,
                SynthParam::FilterCutoff,
                SynthParam::FilterResonance,
            ]
        );
    }

    #[test]
    fn no_hands_holds_pitch_and_silences() {
        let mut control = control();
        control.process_frame(&frame(vec![HandPose::new(0.25, 0.5, 0.5).to_hand()]));
        let held = control.state().current_frequency_hz;
        assert_eq!(held, 880.0);

        let out = control.process_frame(&DetectionResult::empty());

        assert_eq!(out.state.current_frequency_hz, held);
        assert_eq!(control.chain().last(SynthParam::OscillatorFrequency), Some(held));
        assert_eq!(out.state.current_volume, 0.0);
        assert!(!out.state.wah_active);
        assert_eq!(out.display.pitch, "---");
        assert_eq!(out.display.volume, "0.00");
        assert_eq!(out.display.wah.to_string(), "OFF");
    }

    #[test]
    fn one_handed_play_uses_fallback_volume() {
        let mut control = control();
        let out = control.process_frame(&frame(vec![HandPose::new(0.3, 0.4, 0.1).to_hand()]));

        assert_eq!(out.state.current_volume, 0.5);
        assert_eq!(out.display.volume, "0.50");
        assert_eq!(control.chain().last(SynthParam::Gain), Some(0.5));
    }

    #[test]
    fn pinch_switches_filter_preset() {
        let mut control = control();
        let pinching = HandPose::new(0.7, 0.5, 0.2).pinched(0.02).to_hand();
        let out = control.process_frame(&frame(vec![pinching]));

        assert!(out.state.wah_active);
        assert_eq!(control.chain().last(SynthParam::FilterCutoff), Some(800.0));
        assert_eq!(control.chain().last(SynthParam::FilterResonance), Some(12.0));

        let open = HandPose::new(0.7, 0.5, 0.2).to_hand();
        control.process_frame(&frame(vec![open]));
        assert_eq!(control.chain().last(SynthParam::FilterCutoff), Some(20_000.0));
        assert_eq!(control.chain().last(SynthParam::FilterResonance), Some(1.0));
    }

    #[test]
    fn unknown_scale_holds_frequency() {
        let mut control = control();
        assert!(!control.select_scale("lydian"));

        let out = control.process_frame(&frame(vec![HandPose::new(0.2, 0.5, 0.5).to_hand()]));

        assert_eq!(out.state.current_frequency_hz, 440.0);
        assert_eq!(out.display.pitch, "100%");
        assert_eq!(control.scale_name(), "lydian");
    }

    #[test]
    fn non_finite_scale_never_reaches_chain() {
        let mut control = control();
        control.insert_scale("broken", MusicalScale::new(vec![f32::NAN; 3]));
        control.select_scale("broken");

        control.process_frame(&frame(vec![HandPose::new(0.2, 0.5, 0.3).to_hand()]));

        assert!(control.chain().calls.iter().all(|(_, v)| v.is_finite()));
        assert_eq!(control.state().current_frequency_hz, 440.0);
    }

    #[test]
    fn scale_switch_applies_next_frame() {
        let mut control = control();
        let closed = frame(vec![HandPose::new(0.2, 0.5, 0.05).to_hand()]);

        control.process_frame(&closed);
        assert_eq!(control.state().current_frequency_hz, 130.81);

        control.select_scale("blues");
        control.process_frame(&frame(vec![HandPose::new(0.2, 0.5, 0.5).to_hand()]));
        assert_eq!(control.state().current_frequency_hz, 466.16);
    }

    #[test]
    fn cycle_scale_wraps() {
        let mut control = control();
        let names: Vec<String> = (0..4).map(|_| control.cycle_scale().to_string()).collect();
        assert_eq!(names, vec!["blues", "major", "minor", "pentatonic"]);
    }
}

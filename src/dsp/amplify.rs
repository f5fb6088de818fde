//! Gain stage.

/*
Gain
====

The last stage of the chain is a VCA: every sample is multiplied by the gain
value for that same sample.

    output[i] = signal[i] × gain[i]

Gain comes in as a buffer rather than a single number because it is smoothed
per sample. Multiplying a whole block by one constant and then changing the
constant at the next block boundary would put a step into the envelope every
block, audible as zipper noise on volume moves.

Level reference points:
    ×1.0   =   0 dB
    ×0.7   ≈  -3 dB   loudest the volume hand goes
    ×0.5   ≈  -6 dB   one-handed play
    ×0.0   =  silence
*/

/// Multiply a signal by a per-sample gain buffer, in place.
#[inline]
pub fn multiply_in_place(signal: &mut [f32], gain: &[f32]) {
    debug_assert_eq!(signal.len(), gain.len());

    for (s, &g) in signal.iter_mut().zip(gain.iter()) {
        *s *= g;
    }
}

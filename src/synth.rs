//! Procedural fallback synthesizer.
//!
//! Turns text into a reproducible placeholder tone — not speech — for when a
//! real TTS backend is unavailable. Two additive passes over one buffer:
//!
//! 1. **Chord**: `chord_size` sine partials, each detuned from the base
//!    frequency by a byte of the seed and mixed at `0.3 / (i + 1)`.
//! 2. **Character overlay**: a 20 ms half-sine blip per printable-ASCII
//!    character (first 100 only), placed proportionally along the buffer,
//!    pitched by the character's code point.
//!
//! All math runs on the absolute time axis `t[k] = k / sample_rate`; the
//! overlay indexes into the same axis so blip phase stays coupled to the
//! global timeline.

use std::f64::consts::PI;

use crate::params::SynthesisParams;
use crate::waveform::Waveform;

/// Blip gain relative to the (pre-normalization) chord bed.
const BLIP_AMPLITUDE: f64 = 0.1;

/// Characters past this index contribute nothing.
const OVERLAY_CHAR_LIMIT: usize = 100;

/// Renders the additive chord into a fresh buffer of `num_samples`.
pub fn render_chord(params: &SynthesisParams, num_samples: usize, sample_rate: u32) -> Waveform {
    let mut wave = Waveform::silent(num_samples, sample_rate);
    let sr = sample_rate as f64;

    for i in 0..params.chord_size {
        // One seed byte per partial; widened to u64 so a fifth partial
        // (shift 32) reads as zero detune instead of an invalid shift.
        let detune_byte = (u64::from(params.seed) >> (i * 8)) & 0xFF;
        let freq_factor = 1.0 + 0.2 * detune_byte as f64 / 256.0;
        let frequency = params.base_freq_hz * freq_factor;
        let amplitude = 0.3 / (i + 1) as f64;

        for (k, sample) in wave.samples.iter_mut().enumerate() {
            let t = k as f64 / sr;
            *sample += (amplitude * (2.0 * PI * frequency * t).sin()) as f32;
        }
    }

    wave
}

/// Overlays per-character blips onto `wave` in place.
///
/// Only the first 100 code points are considered, and only those in the
/// printable ASCII band (64 < code point < 128) produce a blip — everything
/// else is skipped by policy. A blip whose window would run past the end of
/// the buffer is dropped whole; nothing wraps or clips at the tail.
pub fn overlay_character_events(wave: &mut Waveform, text: &str) {
    let num_samples = wave.len();
    let sr = wave.sample_rate as f64;
    let width = (wave.sample_rate / 50) as usize; // 20 ms
    if width < 2 {
        return;
    }

    let char_span = text.chars().count().min(OVERLAY_CHAR_LIMIT);

    for (i, c) in text.chars().take(OVERLAY_CHAR_LIMIT).enumerate() {
        let code = c as u32;
        if code <= 64 || code >= 128 {
            continue;
        }

        let position = (i as f64 / char_span as f64 * num_samples as f64).round() as usize;
        if position + width >= num_samples {
            continue;
        }

        let frequency = 440.0 + (code - 65) as f64 * 20.0;
        for j in 0..width {
            // Half-sine window, zero at both ends
            let envelope = (PI * j as f64 / (width - 1) as f64).sin();
            let t = (position + j) as f64 / sr;
            wave.samples[position + j] +=
                (BLIP_AMPLITUDE * envelope * (2.0 * PI * frequency * t).sin()) as f32;
        }
    }
}

/// Renders the full fallback waveform for `text`: chord, then overlay.
///
/// The result is raw synthesis output — fades and normalization happen at
/// the pipeline's convergence point, not here.
pub fn synthesize_tones(text: &str, num_samples: usize, sample_rate: u32) -> Waveform {
    let params = SynthesisParams::derive(text);
    let mut wave = render_chord(&params, num_samples, sample_rate);
    overlay_character_events(&mut wave, text);
    wave
}

//! Mono waveform buffer, segment aggregation, and post-processing.
//!
//! Every audio path in the crate converges here: the procedural synthesizer
//! emits one [`Waveform`], an external backend may emit several, and both go
//! through [`concat_segments`] → [`Waveform::finalize`] before encoding.

use crate::error::{Error, Result};

/// Duration of the fade-in and fade-out windows, in seconds.
const FADE_SECONDS: f64 = 0.1;

/// Peak level every non-silent waveform is normalized to.
const NORMALIZE_PEAK: f32 = 0.9;

/// A mono buffer of single-precision samples at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Samples in [-1.0, 1.0] (after normalization).
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Waveform {
    /// Creates a silent waveform of `num_samples` zeros.
    pub fn silent(num_samples: usize, sample_rate: u32) -> Self {
        Self { samples: vec![0.0; num_samples], sample_rate }
    }

    /// Number of samples in the buffer.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Buffer length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value, 0.0 for an empty buffer.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Applies 100 ms linear fade-in and fade-out ramps in place.
    ///
    /// Each ramp covers at most half the buffer, so on very short buffers
    /// the two ramps abut at the midpoint instead of overlapping.
    pub fn apply_fades(&mut self) {
        let fade = (FADE_SECONDS * self.sample_rate as f64).round() as usize;
        let fade = fade.min(self.samples.len() / 2);
        if fade < 2 {
            return;
        }

        let len = self.samples.len();
        let denom = (fade - 1) as f32;
        for j in 0..fade {
            let ramp = j as f32 / denom;
            self.samples[j] *= ramp;
            self.samples[len - 1 - j] *= ramp;
        }
    }

    /// Scales the buffer so its peak lands exactly at 0.9.
    ///
    /// Pure silence is left untouched — scaling zeros would be a no-op and
    /// dividing by a zero peak is not. Idempotent: a second pass finds the
    /// peak already at 0.9 and rescales by ~1.0.
    pub fn normalize(&mut self) {
        let peak = self.peak();
        if peak > 0.0 {
            let gain = NORMALIZE_PEAK / peak;
            for s in &mut self.samples {
                *s *= gain;
            }
        }
    }

    /// Post-processing applied to every outgoing waveform: fade window,
    /// then peak normalization.
    pub fn finalize(&mut self) {
        self.apply_fades();
        self.normalize();
    }
}

/// Concatenates segments in order into a single waveform.
///
/// This is the convergence point between the procedural fallback (always one
/// segment) and a multi-segment external backend. An empty list means
/// upstream produced no audio at all and is an error, never silence.
pub fn concat_segments(segments: &[Waveform]) -> Result<Waveform> {
    let first = segments.first().ok_or(Error::EmptySegmentList)?;
    let sample_rate = first.sample_rate;

    let total: usize = segments.iter().map(Waveform::len).sum();
    let mut samples = Vec::with_capacity(total);
    for segment in segments {
        if segment.sample_rate != sample_rate {
            return Err(Error::SampleRateMismatch {
                expected: sample_rate,
                found: segment.sample_rate,
            });
        }
        samples.extend_from_slice(&segment.samples);
    }

    Ok(Waveform { samples, sample_rate })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 24_000;

    fn ramp_wave(len: usize) -> Waveform {
        let samples = (0..len).map(|i| (i % 7) as f32 * 0.1 - 0.3).collect();
        Waveform { samples, sample_rate: SR }
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = Waveform { samples: vec![0.1, 0.2], sample_rate: SR };
        let b = Waveform { samples: vec![0.3], sample_rate: SR };
        let out = concat_segments(&[a, b]).unwrap();
        assert_eq!(out.samples, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_concat_empty_list_is_error() {
        assert!(matches!(concat_segments(&[]), Err(Error::EmptySegmentList)));
    }

    #[test]
    fn test_concat_rejects_rate_mismatch() {
        let a = Waveform { samples: vec![0.1], sample_rate: SR };
        let b = Waveform { samples: vec![0.1], sample_rate: 22_050 };
        assert!(matches!(
            concat_segments(&[a, b]),
            Err(Error::SampleRateMismatch { expected: 24_000, found: 22_050 })
        ));
    }

    #[test]
    fn test_fade_ramps_are_monotonic() {
        let mut w = Waveform { samples: vec![1.0; SR as usize * 2], sample_rate: SR };
        w.apply_fades();

        let fade = 2_400;
        assert_eq!(w.samples[0], 0.0);
        assert_eq!(*w.samples.last().unwrap(), 0.0);
        for j in 1..fade {
            assert!(w.samples[j] >= w.samples[j - 1]);
        }
        let len = w.samples.len();
        for j in (len - fade + 1)..len {
            assert!(w.samples[j] <= w.samples[j - 1]);
        }
        // Middle untouched
        assert_eq!(w.samples[len / 2], 1.0);
    }

    #[test]
    fn short_buffer_fades_do_not_overlap() {
        // 1000 samples < 2 * 2400: each ramp is clamped to 500 samples and
        // no sample is attenuated twice.
        let mut w = Waveform { samples: vec![1.0; 1_000], sample_rate: SR };
        w.apply_fades();

        assert_eq!(w.samples[0], 0.0);
        assert_eq!(w.samples[999], 0.0);
        // The two clamped ramps meet at the midpoint at full level.
        assert_eq!(w.samples[499], 1.0);
        assert_eq!(w.samples[500], 1.0);
    }

    #[test]
    fn test_normalize_hits_target_peak() {
        let mut w = ramp_wave(4_096);
        w.normalize();
        assert!((w.peak() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_leaves_silence_alone() {
        let mut w = Waveform::silent(1_024, SR);
        w.normalize();
        assert!(w.samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut once = ramp_wave(4_096);
        once.normalize();
        let mut twice = once.clone();
        twice.normalize();
        for (a, b) in once.samples.iter().zip(&twice.samples) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}

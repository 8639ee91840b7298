//! Pipeline entry points.
//!
//! Ties the stages together in their fixed order:
//!
//! ```text
//! text ─ params ─ chord ─ overlay ─┐
//!                                  ├─ concat ─ fades ─ normalize ─ encode
//! backend segments ────────────────┘
//! ```
//!
//! Everything the pipeline needs is passed in explicitly — there is no
//! default text, default output directory, or other process-wide state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::params::derive_duration;
use crate::synth::synthesize_tones;
use crate::wav::{self, EncodedWav, WavEncoding};
use crate::waveform::{concat_segments, Waveform};

/// Audio sample rate the pipeline operates at.
pub const SAMPLE_RATE: u32 = 24_000;

/// Configuration for one synthesis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisOptions {
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Explicit output duration in seconds. When absent the duration is
    /// derived from text length and clamped to [2.0, 10.0] seconds; an
    /// explicit value is taken as-is.
    #[serde(default)]
    pub duration_hint: Option<f64>,
}

fn default_sample_rate() -> u32 {
    SAMPLE_RATE
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self { sample_rate: SAMPLE_RATE, duration_hint: None }
    }
}

/// Synthesizes the finalized fallback waveform for `text`.
///
/// Empty (or all-whitespace) text is rejected — a duration cannot
/// meaningfully be derived from it. The returned waveform has already been
/// faded and normalized and is ready for encoding.
pub fn synthesize(text: &str, options: &SynthesisOptions) -> Result<Waveform> {
    if text.trim().is_empty() {
        return Err(Error::EmptyText);
    }

    let duration = derive_duration(text, options.duration_hint);
    let num_samples = (duration * options.sample_rate as f64).round() as usize;

    let wave = synthesize_tones(text, num_samples, options.sample_rate);
    finalize_segments(vec![wave])
}

/// Aggregates backend segments and applies the shared post-processing.
///
/// The convergence point for both audio sources: the procedural fallback
/// hands in exactly one segment, an external backend one per chunk. The
/// segment list is consumed; an empty list is an error.
pub fn finalize_segments(segments: Vec<Waveform>) -> Result<Waveform> {
    let mut combined = concat_segments(&segments)?;
    combined.finalize();
    Ok(combined)
}

/// Synthesizes `text` and writes the result to `output_path` as WAV.
///
/// Returns which encoder path produced the file.
pub fn synthesize_to_file(
    text: &str,
    options: &SynthesisOptions,
    output_path: &Path,
) -> Result<WavEncoding> {
    let wave = synthesize(text, options)?;
    wav::encode_to_file(&wave, output_path)
}

/// Aggregates, post-processes, and writes backend segments to `output_path`.
pub fn encode_segments_to_file(
    segments: Vec<Waveform>,
    output_path: &Path,
) -> Result<WavEncoding> {
    let wave = finalize_segments(segments)?;
    wav::encode_to_file(&wave, output_path)
}

/// Synthesizes `text` and encodes it in memory.
pub fn synthesize_to_vec(text: &str, options: &SynthesisOptions) -> Result<EncodedWav> {
    let wave = synthesize(text, options)?;
    Ok(wav::encode_to_vec(&wave))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_rejected() {
        let opts = SynthesisOptions::default();
        assert!(matches!(synthesize("", &opts), Err(Error::EmptyText)));
        assert!(matches!(synthesize("   \n\t", &opts), Err(Error::EmptyText)));
    }

    #[test]
    fn test_duration_hint_controls_length() {
        let opts = SynthesisOptions { duration_hint: Some(1.5), ..Default::default() };
        let wave = synthesize("short", &opts).unwrap();
        assert_eq!(wave.len(), 36_000);
    }

    #[test]
    fn test_finalize_empty_segment_list_is_error() {
        assert!(matches!(finalize_segments(vec![]), Err(Error::EmptySegmentList)));
    }

    #[test]
    fn test_finalize_normalizes_backend_segments() {
        // Quiet multi-segment backend output gets the same post-processing
        // as the fallback path.
        let seg = |v: f32| Waveform { samples: vec![v; 24_000], sample_rate: SAMPLE_RATE };
        let out = finalize_segments(vec![seg(0.02), seg(-0.05)]).unwrap();
        assert_eq!(out.len(), 48_000);
        assert!((out.peak() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: SynthesisOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.sample_rate, SAMPLE_RATE);
        assert!(opts.duration_hint.is_none());
    }
}

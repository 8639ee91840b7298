//! # tonefall
//!
//! Deterministic text-to-tone fallback synthesis and WAV post-processing
//! for text-to-speech pipelines.
//!
//! When a real TTS backend is unavailable or fails, `tonefall` turns the
//! input text into a reproducible placeholder waveform — an additive chord
//! parameterized by a digest of the text, with short per-character blips
//! layered on top. It is explicitly *not* speech: the point is a stable,
//! content-addressed audio artifact, not intelligibility.
//!
//! The same crate also carries the post-processing shared with the real
//! backend path: segment concatenation, fade-in/out, peak normalization,
//! and a dual-path WAV encoder (32-bit float via `hound`, with a raw 16-bit
//! PCM writer as fallback).
//!
//! ## Quick start
//!
//! ```no_run
//! use tonefall::{synthesize_to_file, SynthesisOptions};
//!
//! let encoding = synthesize_to_file(
//!     "Hello from the fallback synthesizer!",
//!     &SynthesisOptions::default(),
//!     std::path::Path::new("speech.wav"),
//! ).unwrap();
//! println!("wrote WAV via the {encoding:?} path");
//! ```
//!
//! Backend segments flow through the same tail of the pipeline:
//!
//! ```no_run
//! use tonefall::{encode_segments_to_file, Waveform};
//!
//! let segments: Vec<Waveform> = vec![/* from the ML backend */];
//! encode_segments_to_file(segments, std::path::Path::new("speech.wav")).unwrap();
//! ```
//!
//! ## Pipeline
//! 1. **Parameter derivation** — BLAKE3 digest of the text → seed, base
//!    frequency, chord size, duration.
//! 2. **Chord synthesis** — additive sine partials, detuned per seed byte.
//! 3. **Character overlay** — 20 ms half-sine blips for the first 100
//!    printable-ASCII characters.
//! 4. **Aggregation** — backend segments (or the single fallback segment)
//!    concatenated in order.
//! 5. **Fades + normalization** — 100 ms linear ramps, peak scaled to 0.9.
//! 6. **Encoding** — float32 WAV, falling back to raw 16-bit PCM.
//!
//! Every step is deterministic: the same text yields bit-identical samples
//! and bytes, across runs and across threads (all state is per-call).

pub mod error;
pub mod params;
pub mod pipeline;
pub mod synth;
pub mod wav;
pub mod waveform;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use error::{Error, Result};
pub use params::SynthesisParams;
pub use pipeline::{
    encode_segments_to_file, finalize_segments, synthesize, synthesize_to_file,
    synthesize_to_vec, SynthesisOptions, SAMPLE_RATE,
};
pub use wav::{EncodedWav, WavEncoding};
pub use waveform::Waveform;

//! Error types for the synthesis pipeline.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synthesizing or encoding audio.
#[derive(Debug, Error)]
pub enum Error {
    /// Input text was empty (or all whitespace), so no duration or
    /// parameters can be derived from it.
    #[error("input text is empty")]
    EmptyText,

    /// The aggregator received zero segments — upstream synthesis produced
    /// no audio. Never silently converted to silence.
    #[error("no audio segments to aggregate")]
    EmptySegmentList,

    /// Segments handed to the aggregator disagree on sample rate.
    #[error("segment sample rate mismatch: expected {expected} Hz, found {found} Hz")]
    SampleRateMismatch {
        /// Sample rate of the first segment.
        expected: u32,
        /// Offending segment's sample rate.
        found: u32,
    },

    /// Both the float32 writer and the raw PCM fallback failed.
    #[error("both WAV writers failed (float32: {primary}; pcm16: {fallback})")]
    Encoding {
        /// Failure reported by the primary (float32) writer.
        primary: String,
        /// Failure reported by the fallback (16-bit PCM) writer.
        #[source]
        fallback: std::io::Error,
    },

    /// I/O error outside the encoder's fallback chain.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

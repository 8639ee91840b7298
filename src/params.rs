//! Digest-seeded synthesis parameters.
//!
//! Every knob of the fallback synthesizer is derived deterministically from
//! the input text, so the same text always renders the same waveform —
//! byte-for-byte, across runs and platforms. The derivation is:
//!
//! 1. BLAKE3 of the text's UTF-8 bytes; the first 16 digest bytes, read as a
//!    little-endian `u128`, form the 128-bit text digest.
//! 2. `seed`      = low 32 bits of the digest.
//! 3. `base_freq` = 220 Hz + (digest mod 660) — lands in [220, 880).
//! 4. `chord_size`= word_count / 10 + 2, clamped to [2, 5].
//!
//! Duration is derived separately (it also depends on an optional explicit
//! hint): `len(text) / 50` seconds, clamped to [2.0, 10.0]. An explicit hint
//! is used as-is, unclamped.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Computes the 128-bit digest of `text`'s UTF-8 bytes.
///
/// First 16 bytes of the BLAKE3 hash, little-endian. This layout is part of
/// the output contract: changing it changes every derived waveform.
pub fn text_digest(text: &str) -> u128 {
    let hash = blake3::hash(text.as_bytes());
    let bytes: [u8; 16] = hash.as_bytes()[0..16].try_into().expect("BLAKE3 yields 32 bytes");
    u128::from_le_bytes(bytes)
}

/// Deterministic synthesis parameters for one text input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisParams {
    /// Low 32 bits of the text digest. Seeds the per-call RNG and selects
    /// the detune factor of each chord partial.
    pub seed: u32,
    /// Chord root frequency in [220, 880) Hz.
    pub base_freq_hz: f64,
    /// Number of sine partials in the chord, in [2, 5].
    pub chord_size: usize,
}

impl SynthesisParams {
    /// Derives parameters from `text`.
    ///
    /// Pure and total: empty text is fine here (it yields the digest of the
    /// empty byte string and a chord size of 2) — rejecting empty input is
    /// the pipeline entry point's job.
    pub fn derive(text: &str) -> Self {
        let digest = text_digest(text);
        let word_count = text.split_whitespace().count();

        Self {
            seed: (digest & 0xFFFF_FFFF) as u32,
            base_freq_hz: 220.0 + (digest % 660) as f64,
            chord_size: (word_count / 10 + 2).clamp(2, 5),
        }
    }

    /// Creates a PCG32 generator owned by the current call.
    ///
    /// The 32-bit seed is duplicated into both halves of the 64-bit PCG
    /// state seed. The additive mix itself is closed-form and never draws
    /// from this generator; it exists so stochastic extensions (noise beds,
    /// humanized timing) stay per-call and cannot interfere across
    /// concurrent requests.
    pub fn rng(&self) -> Pcg32 {
        let seed64 = (self.seed as u64) | ((self.seed as u64) << 32);
        Pcg32::seed_from_u64(seed64)
    }
}

/// Derives the output duration in seconds.
///
/// With no hint, duration grows with text length (one second per 50
/// characters) and is clamped to [2.0, 10.0]. An explicit hint wins and is
/// not clamped.
pub fn derive_duration(text: &str, duration_hint: Option<f64>) -> f64 {
    match duration_hint {
        Some(hint) => hint,
        None => (text.chars().count() as f64 / 50.0).clamp(2.0, 10.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_derivation_is_deterministic() {
        let a = SynthesisParams::derive("the quick brown fox");
        let b = SynthesisParams::derive("the quick brown fox");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_texts_differ() {
        let a = SynthesisParams::derive("hello");
        let b = SynthesisParams::derive("hello!");
        assert_ne!(a.seed, b.seed);
    }

    #[test]
    fn test_base_freq_range() {
        for text in ["", "a", "some longer input text", "🎵🎵🎵"] {
            let p = SynthesisParams::derive(text);
            assert!(p.base_freq_hz >= 220.0 && p.base_freq_hz < 880.0);
        }
    }

    #[test]
    fn test_chord_size_from_word_count() {
        // 1 word → 2 partials
        assert_eq!(SynthesisParams::derive("Hello").chord_size, 2);
        // 30 words → 5 partials
        let thirty = "word ".repeat(30);
        assert_eq!(SynthesisParams::derive(thirty.trim()).chord_size, 5);
        // 200 words → still clamped to 5
        let two_hundred = "word ".repeat(200);
        assert_eq!(SynthesisParams::derive(two_hundred.trim()).chord_size, 5);
    }

    #[test]
    fn test_empty_text_does_not_panic() {
        let p = SynthesisParams::derive("");
        assert_eq!(p.chord_size, 2);
        assert_eq!(derive_duration("", None), 2.0);
    }

    #[test]
    fn test_duration_clamps() {
        assert_eq!(derive_duration("Hello", None), 2.0);
        let long = "x".repeat(5_000);
        assert_eq!(derive_duration(&long, None), 10.0);
        // 250 chars → 5 seconds, inside the clamp range
        let mid = "x".repeat(250);
        assert_eq!(derive_duration(&mid, None), 5.0);
    }

    #[test]
    fn test_explicit_hint_is_unclamped() {
        assert_eq!(derive_duration("Hello", Some(0.5)), 0.5);
        assert_eq!(derive_duration("Hello", Some(30.0)), 30.0);
    }

    #[test]
    fn test_rng_determinism() {
        let p = SynthesisParams::derive("seed me");
        let mut rng1 = p.rng();
        let mut rng2 = p.rng();
        let a: Vec<f32> = (0..100).map(|_| rng1.gen()).collect();
        let b: Vec<f32> = (0..100).map(|_| rng2.gen()).collect();
        assert_eq!(a, b);
    }
}

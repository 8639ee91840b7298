//! Dual-path WAV encoder.
//!
//! The primary path writes a 32-bit float WAV through [`hound`] — lossless
//! for the f32 pipeline samples. If it fails for any reason the encoder
//! falls back to a minimal hand-rolled writer: samples quantized to 16-bit
//! PCM and a RIFF header emitted with plain byte operations, no container
//! library involved. Which path produced the output is reported as an
//! explicit [`WavEncoding`] tag rather than inferred from side effects, and
//! the fallback writer is public so it can be tested without forcing the
//! primary to fail.
//!
//! Both paths produce files any standard WAV decoder can read. If both fail
//! the error propagates; a partial file is never left behind.

use std::fs::File;
use std::io::{self, Cursor, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::waveform::Waveform;

/// Which encoder path produced the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavEncoding {
    /// Primary path: 32-bit IEEE float samples via `hound`.
    Float32,
    /// Fallback path: 16-bit signed PCM via the raw writer.
    Pcm16,
}

/// An encoded WAV file held in memory, ready for transmission or
/// re-encoding by a downstream collaborator.
#[derive(Debug, Clone)]
pub struct EncodedWav {
    /// Complete WAV file contents, header included.
    pub bytes: Vec<u8>,
    /// Path that produced the bytes.
    pub encoding: WavEncoding,
}

fn float_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    }
}

/// Writes `wave` to `path` as a mono 32-bit float WAV.
pub fn write_float32_wav(wave: &Waveform, path: &Path) -> hound::Result<()> {
    let mut writer = hound::WavWriter::create(path, float_spec(wave.sample_rate))?;
    for &s in &wave.samples {
        writer.write_sample(s)?;
    }
    writer.finalize()
}

/// Encodes `wave` as a mono 32-bit float WAV in memory.
pub fn float32_wav_bytes(wave: &Waveform) -> hound::Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, float_spec(wave.sample_rate))?;
        for &s in &wave.samples {
            writer.write_sample(s)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Quantizes f32 samples to little-endian 16-bit PCM bytes.
///
/// Samples are clamped to [-1.0, 1.0] and scaled by 32767, so the output
/// range is [-32767, 32767].
pub fn samples_to_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
        pcm.extend_from_slice(&value.to_le_bytes());
    }
    pcm
}

/// Writes a minimal mono 16-bit PCM RIFF/WAVE stream: 44-byte header, then
/// the sample data. No metadata, no timestamps, byte-deterministic.
fn write_pcm16_stream<W: Write>(writer: &mut W, sample_rate: u32, pcm: &[u8]) -> io::Result<()> {
    const CHANNELS: u16 = 1;
    const BITS_PER_SAMPLE: u16 = 16;
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = pcm.len() as u32;

    writer.write_all(b"RIFF")?;
    writer.write_all(&(36 + data_size).to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // fmt chunk size
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&CHANNELS.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm)?;

    Ok(())
}

/// Encodes `wave` as a mono 16-bit PCM WAV in memory (fallback format).
pub fn pcm16_wav_bytes(wave: &Waveform) -> Vec<u8> {
    let pcm = samples_to_pcm16(&wave.samples);
    let mut bytes = Vec::with_capacity(44 + pcm.len());
    write_pcm16_stream(&mut bytes, wave.sample_rate, &pcm)
        .expect("writing to a Vec cannot fail");
    bytes
}

/// Writes `wave` to `path` as a mono 16-bit PCM WAV using the raw writer.
pub fn write_pcm16_wav(wave: &Waveform, path: &Path) -> io::Result<()> {
    let pcm = samples_to_pcm16(&wave.samples);
    let mut file = File::create(path)?;
    write_pcm16_stream(&mut file, wave.sample_rate, &pcm)?;
    file.sync_all()
}

/// Writes `wave` to `path`, preferring the float32 path.
///
/// On primary failure any partial file is removed before the fallback
/// writer runs; on fallback failure the partial file is removed and both
/// causes are reported. The returned tag says which writer succeeded.
pub fn encode_to_file(wave: &Waveform, path: &Path) -> Result<WavEncoding> {
    match write_float32_wav(wave, path) {
        Ok(()) => Ok(WavEncoding::Float32),
        Err(primary) => {
            let _ = std::fs::remove_file(path);
            match write_pcm16_wav(wave, path) {
                Ok(()) => Ok(WavEncoding::Pcm16),
                Err(fallback) => {
                    let _ = std::fs::remove_file(path);
                    Err(Error::Encoding { primary: primary.to_string(), fallback })
                }
            }
        }
    }
}

/// Encodes `wave` in memory, preferring the float32 path.
pub fn encode_to_vec(wave: &Waveform) -> EncodedWav {
    match float32_wav_bytes(wave) {
        Ok(bytes) => EncodedWav { bytes, encoding: WavEncoding::Float32 },
        Err(_) => EncodedWav { bytes: pcm16_wav_bytes(wave), encoding: WavEncoding::Pcm16 },
    }
}

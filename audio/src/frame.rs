//! Analysis frame format.
//!
//! Every frame handed to the classification model is 16 kHz mono PCM16
//! with exactly [`FRAME_SAMPLES`] samples (975 ms). The model answers with an
//! [`EMBEDDING_DIM`]-dimensional class-score vector.

use std::time::Duration;

use thiserror::Error;

/// Sample rate of analysis frames in Hz.
pub const SAMPLE_RATE: usize = 16_000;

/// Samples per analysis frame (975 ms @ 16 kHz).
pub const FRAME_SAMPLES: usize = 15_600;

/// Dimension of the embedding produced for each frame.
pub const EMBEDDING_DIM: usize = 521;

/// Samples per 10 ms sub-frame @ 16 kHz.
pub const SUB_FRAME_SAMPLES: usize = 160;

/// Errors returned when a buffer is not a valid analysis frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame length mismatch: expected {expected} samples, got {got}")]
    Length { expected: usize, got: usize },

    #[error("odd byte count {0} for PCM16 data")]
    OddByteCount(usize),
}

/// Checks that `frame` has exactly [`FRAME_SAMPLES`] samples.
pub fn validate_frame(frame: &[i16]) -> Result<(), FrameError> {
    if frame.len() != FRAME_SAMPLES {
        return Err(FrameError::Length {
            expected: FRAME_SAMPLES,
            got: frame.len(),
        });
    }
    Ok(())
}

/// Returns the playback duration of `samples` samples at [`SAMPLE_RATE`].
pub fn duration_of(samples: usize) -> Duration {
    Duration::from_micros((samples as u64 * 1_000_000) / SAMPLE_RATE as u64)
}

/// Decodes PCM16 little-endian bytes into samples.
pub fn samples_from_le_bytes(data: &[u8]) -> Result<Vec<i16>, FrameError> {
    if data.len() % 2 != 0 {
        return Err(FrameError::OddByteCount(data.len()));
    }
    Ok(data
        .chunks_exact(2)
        .map(|bytes| i16::from_le_bytes([bytes[0], bytes[1]]))
        .collect())
}

/// Encodes samples as PCM16 little-endian bytes.
pub fn samples_to_le_bytes(samples: &[i16]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

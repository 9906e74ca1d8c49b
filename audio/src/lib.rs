//! PCM16 frame utilities.
//!
//! This crate provides the audio primitives shared by the detection crates:
//!
//! - `frame`: the fixed analysis frame format (16 kHz mono PCM16, 15,600 samples)
//!   and little-endian conversions
//! - `signal`: loudness and voice-quality features computed over a frame
//!
//! # Example
//!
//! ```rust
//! use aegis_audio::{frame, signal};
//!
//! let samples = vec![8192i16; frame::FRAME_SAMPLES];
//! assert!(frame::validate_frame(&samples).is_ok());
//! assert!((signal::rms(&samples) - 0.25).abs() < 1e-4);
//! ```

pub mod frame;
pub mod signal;

pub use frame::{FrameError, EMBEDDING_DIM, FRAME_SAMPLES, SAMPLE_RATE, SUB_FRAME_SAMPLES};

//! Loudness and voice-quality features over PCM16 frames.
//!
//! All amplitudes are normalized to full scale (`sample / 32768`), so RMS
//! values fall in `[0, 1]`.

const FULL_SCALE: f64 = 32768.0;

/// Root-mean-square amplitude of `frame`, normalized to `[0, 1]`.
///
/// Returns 0 for an empty frame.
pub fn rms(frame: &[i16]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let mut sum_sq: f64 = 0.0;
    for &s in frame {
        let x = s as f64 / FULL_SCALE;
        sum_sq += x * x;
    }
    (sum_sq / frame.len() as f64).sqrt() as f32
}

/// RMS of each consecutive `sub_frame_len`-sample window.
///
/// A trailing partial window is dropped.
pub fn sub_frame_rms(frame: &[i16], sub_frame_len: usize) -> Vec<f32> {
    if sub_frame_len == 0 {
        return Vec::new();
    }
    frame.chunks_exact(sub_frame_len).map(rms).collect()
}

/// Population variance of the sub-frame RMS values.
///
/// Steady speech keeps this low; the volume instability of panic raises it.
/// Returns 0 when fewer than two sub-frames fit in the frame.
pub fn energy_variance(frame: &[i16], sub_frame_len: usize) -> f32 {
    let energies = sub_frame_rms(frame, sub_frame_len);
    if energies.len() < 2 {
        return 0.0;
    }
    let n = energies.len() as f64;
    let mean = energies.iter().map(|&e| e as f64).sum::<f64>() / n;
    let var = energies
        .iter()
        .map(|&e| {
            let d = e as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    var as f32
}

/// Fraction of adjacent sample pairs whose sign differs.
///
/// Zero counts as non-negative. Returns 0 for frames shorter than two samples.
pub fn zero_crossing_rate(frame: &[i16]) -> f32 {
    if frame.len() < 2 {
        return 0.0;
    }
    let crossings = frame
        .windows(2)
        .filter(|w| (w[0] >= 0) != (w[1] >= 0))
        .count();
    crossings as f32 / (frame.len() - 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::SUB_FRAME_SAMPLES;

    fn sine(freq_hz: f64, amplitude: f64, n: usize) -> Vec<i16> {
        (0..n)
            .map(|i| {
                let t = i as f64 / 16000.0;
                (amplitude * 32767.0 * (2.0 * std::f64::consts::PI * freq_hz * t).sin()) as i16
            })
            .collect()
    }

    #[test]
    fn rms_of_silence_and_empty() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(rms(&[0; 1600]), 0.0);
    }

    #[test]
    fn rms_of_constant_and_sine() {
        assert!((rms(&[16384; 100]) - 0.5).abs() < 1e-6);
        // Sine RMS = amplitude / sqrt(2).
        let s = sine(440.0, 0.5, 16000);
        assert!((rms(&s) - 0.5 / 2f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn energy_variance_steady_vs_bursty() {
        let steady = vec![8000i16; 1600];
        assert!(energy_variance(&steady, SUB_FRAME_SAMPLES) < 1e-9);

        let mut bursty = Vec::new();
        for i in 0..10 {
            let level = if i % 2 == 0 { 1000 } else { 20000 };
            bursty.extend(std::iter::repeat_n(level as i16, SUB_FRAME_SAMPLES));
        }
        // RMS alternates ~0.03 / ~0.61: variance ~0.084.
        assert!(energy_variance(&bursty, SUB_FRAME_SAMPLES) > 0.05);
    }

    #[test]
    fn energy_variance_needs_two_sub_frames() {
        assert_eq!(energy_variance(&[100; 100], SUB_FRAME_SAMPLES), 0.0);
        assert_eq!(energy_variance(&[100; 1000], 0), 0.0);
    }

    #[test]
    fn zero_crossing_rate_of_sine() {
        // 1 kHz at 16 kHz: two crossings per 16 samples.
        let s = sine(1000.0, 0.5, 16000);
        let zcr = zero_crossing_rate(&s);
        assert!((zcr - 0.125).abs() < 0.01, "zcr = {zcr}");
    }

    #[test]
    fn zero_crossing_rate_edges() {
        assert_eq!(zero_crossing_rate(&[]), 0.0);
        assert_eq!(zero_crossing_rate(&[5]), 0.0);
        assert_eq!(zero_crossing_rate(&[1, -1, 1, -1, 1]), 1.0);
        assert_eq!(zero_crossing_rate(&[3, 0, 2]), 0.0);
    }
}

/// Number of recent frames remembered by [`DistressHistory`].
pub const HISTORY_LEN: usize = 5;

/// Fixed-size circular record of recent loudness and scream probability.
///
/// There are always exactly [`HISTORY_LEN`] slots. Slots that were never
/// written hold 0.0, so a fresh history counts as calm and quiet.
/// Each [`DistressHistory::push`] overwrites the oldest slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistressHistory {
    rms: [f32; HISTORY_LEN],
    probability: [f32; HISTORY_LEN],
    pos: usize,
    filled: usize,
}

impl DistressHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame.
    pub fn push(&mut self, rms: f32, scream_probability: f32) {
        self.rms[self.pos] = rms;
        self.probability[self.pos] = scream_probability;
        self.pos = (self.pos + 1) % HISTORY_LEN;
        if self.filled < HISTORY_LEN {
            self.filled += 1;
        }
    }

    /// Number of frames recorded since the last reset, at most [`HISTORY_LEN`].
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Scream probability slots in storage order.
    pub fn probabilities(&self) -> &[f32; HISTORY_LEN] {
        &self.probability
    }

    /// RMS slots in storage order.
    pub fn rms_values(&self) -> &[f32; HISTORY_LEN] {
        &self.rms
    }

    /// Slot index of the most recent push.
    fn latest(&self) -> usize {
        (self.pos + HISTORY_LEN - 1) % HISTORY_LEN
    }

    /// Fraction of all slots whose probability is at least `threshold`.
    pub fn sustained_ratio(&self, threshold: f32) -> f32 {
        let elevated = self.probability.iter().filter(|&&p| p >= threshold).count();
        elevated as f32 / HISTORY_LEN as f32
    }

    /// Mean RMS of every slot except the most recent one.
    pub fn mean_rms_excluding_latest(&self) -> f32 {
        let latest = self.latest();
        let sum: f32 = self
            .rms
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != latest)
            .map(|(_, v)| *v)
            .sum();
        sum / (HISTORY_LEN - 1) as f32
    }

    /// Clears all slots.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_wraps_and_overwrites_oldest() {
        let mut h = DistressHistory::new();
        for i in 0..7 {
            h.push(i as f32, i as f32 / 10.0);
        }
        assert_eq!(h.filled(), HISTORY_LEN);
        // Writes 5 and 6 overwrote slots 0 and 1.
        assert_eq!(h.rms_values(), &[5.0, 6.0, 2.0, 3.0, 4.0]);
        assert_eq!(h.probabilities(), &[0.5, 0.6, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn sustained_ratio_counts_all_slots() {
        let mut h = DistressHistory::new();
        h.push(0.1, 0.9);
        // Unwritten slots are calm.
        assert!((h.sustained_ratio(0.35) - 0.2).abs() < 1e-6);
        h.push(0.1, 0.4);
        assert!((h.sustained_ratio(0.35) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn mean_excludes_latest_slot() {
        let mut h = DistressHistory::new();
        for rms in [0.1, 0.1, 0.1, 0.1] {
            h.push(rms, 0.0);
        }
        h.push(0.5, 0.0);
        assert!((h.mean_rms_excluding_latest() - 0.1).abs() < 1e-6);
        // Latest now lands in slot 0 after wrap.
        h.push(0.9, 0.0);
        assert!((h.mean_rms_excluding_latest() - (0.1 * 3.0 + 0.5) / 4.0).abs() < 1e-6);
    }

    #[test]
    fn reset_clears() {
        let mut h = DistressHistory::new();
        h.push(0.3, 0.8);
        h.reset();
        assert_eq!(h, DistressHistory::new());
        assert_eq!(h.sustained_ratio(0.1), 0.0);
    }
}

//! Threshold beat detection on byte-frequency frames.

use crate::params::BeatThresholds;
use crate::terrain::average_intensity;

/// Levels that triggered a beat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beat {
    pub bass: f32,
    pub average: f32,
}

#[derive(Debug, Clone, Default)]
pub struct BeatDetector {
    thresholds: BeatThresholds,
}

impl BeatDetector {
    pub fn new(thresholds: BeatThresholds) -> Self {
        Self { thresholds }
    }

    /// A beat is a loud bass region or a loud frame overall
    pub fn detect(&self, frame: &[u8]) -> Option<Beat> {
        if frame.is_empty() {
            return None;
        }
        let bass_bins = self.thresholds.bass_bins.clamp(1, frame.len());
        let bass = average_intensity(&frame[..bass_bins]);
        let average = average_intensity(frame);

        (bass > self.thresholds.bass_level || average > self.thresholds.average_level)
            .then_some(Beat { bass, average })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bass_or_average_triggers() {
        let detector = BeatDetector::default();

        let mut frame = [0u8; 64];
        assert_eq!(detector.detect(&frame), None);

        frame[..3].copy_from_slice(&[200, 200, 200]);
        let beat = detector.detect(&frame).unwrap();
        assert_eq!(beat.bass, 200.0);

        // Exactly at threshold is not a beat
        frame[..3].copy_from_slice(&[190, 190, 190]);
        assert_eq!(detector.detect(&frame), None);

        assert!(detector.detect(&[170u8; 64]).is_some());
        assert_eq!(detector.detect(&[]), None);
    }
}

//! Audio frame sources and analysis feeding the landscape.
//!
//! Decoding and spectral analysis sit outside the reactive core: the core
//! only ever sees one byte-frequency frame per update.

mod analyser;
mod beat;
mod source;
mod track;

use log::debug;

use crate::error::DataShapeError;

// Re-export public types
pub use analyser::FrequencyAnalyser;
pub use beat::{Beat, BeatDetector};
pub use source::AudioSource;
pub use track::WavTrack;

/// Cap a frame at `width` bins
///
/// Extra bins are dropped. Short frames pass through untouched: the frame
/// mean stays over the bins actually received and missing columns read as
/// silence downstream.
pub fn conform_frame(frame: &[u8], width: usize) -> &[u8] {
    if frame.len() != width {
        debug!(
            "{}",
            DataShapeError::FrameLength {
                expected: width,
                actual: frame.len(),
            }
        );
    }
    &frame[..frame.len().min(width)]
}

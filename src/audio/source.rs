//! Playback state of the audio input.

/// Whether audio frames have started flowing
///
/// Moves from `Idle` to `Active` once; later starts are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AudioSource {
    #[default]
    Idle,
    Active {
        /// Clock time at which playback began (seconds)
        started_at_s: f64,
    },
}

impl AudioSource {
    /// Start playback at `now_s`
    ///
    /// # Returns
    /// * `true` on the first call, `false` if already active
    pub fn activate(&mut self, now_s: f64) -> bool {
        match self {
            AudioSource::Idle => {
                *self = AudioSource::Active {
                    started_at_s: now_s,
                };
                true
            }
            AudioSource::Active { .. } => false,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AudioSource::Active { .. })
    }

    /// Seconds of playback at `now_s`, or `None` while idle
    pub fn elapsed(&self, now_s: f64) -> Option<f64> {
        match *self {
            AudioSource::Idle => None,
            AudioSource::Active { started_at_s } => Some((now_s - started_at_s).max(0.0)),
        }
    }
}

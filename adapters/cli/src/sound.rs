//! Sound sink that reports cues through the log.

use mobile_strike_core::{SoundCue, SoundSink};
use tracing::{debug, info};

/// Logs every cue at debug level until muted.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct TracingSoundSink {
    muted: bool,
}

impl SoundSink for TracingSoundSink {
    fn play(&mut self, cue: SoundCue) {
        if cue == SoundCue::MuteToggle {
            self.muted = !self.muted;
            info!(muted = self.muted, "sound mute toggled");
            return;
        }
        if !self.muted {
            debug!(?cue, "sound cue");
        }
    }
}

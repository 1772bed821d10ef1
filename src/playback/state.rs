//! Playback state management

/// Two-state play/stop control for the frame pull loop.
///
/// Owned by the scheduler; mutated only through its control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No pull loop is running. Initial state.
    #[default]
    Stopped,

    /// The pull loop is fetching frames.
    Playing,
}

impl PlaybackState {
    /// The state a toggle command moves to.
    pub fn toggled(self) -> Self {
        match self {
            PlaybackState::Stopped => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Stopped,
        }
    }

    /// Check if the pull loop should be running.
    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    /// Label for the toggle control: the action the next press takes.
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Stopped => "play",
            PlaybackState::Playing => "stop",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Stopped => write!(f, "Stopped"),
            PlaybackState::Playing => write!(f, "Playing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_transitions() {
        let state = PlaybackState::default();
        assert_eq!(state, PlaybackState::Stopped);

        let state = state.toggled();
        assert_eq!(state, PlaybackState::Playing);
        assert!(state.is_playing());

        let state = state.toggled();
        assert_eq!(state, PlaybackState::Stopped);
        assert!(!state.is_playing());
    }

    #[test]
    fn test_labels_follow_state() {
        assert_eq!(PlaybackState::Stopped.label(), "play");
        assert_eq!(PlaybackState::Playing.label(), "stop");
    }
}

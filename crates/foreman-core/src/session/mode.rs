//! Workflow phase type.

use serde::{Deserialize, Serialize};

/// The backend-assigned workflow phase governing which creative activity
/// is current.
///
/// The backend is the sole arbiter of mode transitions. The client mirrors
/// the value it last saw: it may set the mode optimistically right after a
/// successful start, but overwrites it on every subsequent status refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Structural planning: premise, templates, outline.
    #[default]
    Architect,
    /// Capturing the narrative voice before drafting.
    VoiceCalibration,
    /// Scene-by-scene drafting direction.
    Director,
    /// Revision and line editing.
    Editor,
}

impl Mode {
    /// The wire name of this mode, as the backend reports it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Architect => "ARCHITECT",
            Mode::VoiceCalibration => "VOICE_CALIBRATION",
            Mode::Director => "DIRECTOR",
            Mode::Editor => "EDITOR",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip() {
        let mode: Mode = serde_json::from_str("\"VOICE_CALIBRATION\"").unwrap();
        assert_eq!(mode, Mode::VoiceCalibration);
        assert_eq!(serde_json::to_string(&mode).unwrap(), "\"VOICE_CALIBRATION\"");
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(Mode::Architect.to_string(), "ARCHITECT");
        assert_eq!(Mode::Editor.to_string(), "EDITOR");
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of labels the mock analysis can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprised,
    Neutral,
    Fear,
    Disgust,
}

impl Emotion {
    /// All labels in their canonical order
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Neutral,
        Emotion::Fear,
        Emotion::Disgust,
    ];

    /// Lowercase wire name, as serialized in responses
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprised => "surprised",
            Emotion::Neutral => "neutral",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
        }
    }

    /// Capitalized name for headings
    pub fn display_name(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Angry => "Angry",
            Emotion::Surprised => "Surprised",
            Emotion::Neutral => "Neutral",
            Emotion::Fear => "Fear",
            Emotion::Disgust => "Disgust",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Emotion::Happy => {
                "A positive emotional state characterized by joy, contentment, and satisfaction."
            }
            Emotion::Sad => {
                "A negative emotional state often associated with feelings of loss, disappointment, or sorrow."
            }
            Emotion::Angry => {
                "An intense emotional state triggered by frustration, threat, or perceived injustice."
            }
            Emotion::Surprised => "A brief emotional response to unexpected or novel stimuli.",
            Emotion::Neutral => {
                "A balanced emotional state without strong positive or negative feelings."
            }
            Emotion::Fear => {
                "An emotional response to perceived danger or threat, activating fight-or-flight responses."
            }
            Emotion::Disgust => {
                "An emotional response to something offensive, unpleasant, or morally reprehensible."
            }
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Sad => "😢",
            Emotion::Angry => "😠",
            Emotion::Surprised => "😲",
            Emotion::Neutral => "😐",
            Emotion::Fear => "😨",
            Emotion::Disgust => "🤢",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_labels_are_distinct() {
        let unique: HashSet<_> = Emotion::ALL.iter().collect();
        assert_eq!(unique.len(), 7);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Emotion::Surprised).unwrap();
        assert_eq!(json, "\"surprised\"");

        for emotion in Emotion::ALL {
            let json = serde_json::to_string(&emotion).unwrap();
            assert_eq!(json, format!("\"{}\"", emotion.as_str()));
        }
    }

    #[test]
    fn test_every_label_has_a_description() {
        for emotion in Emotion::ALL {
            assert!(!emotion.description().is_empty());
            assert!(emotion.description().ends_with('.'));
        }
    }
}

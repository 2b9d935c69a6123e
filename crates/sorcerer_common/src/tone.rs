//! The six fixed subject-line tones.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Curiosity,
    Fun,
    Urgency,
    Promo,
    Clear,
    #[serde(rename = "Irreverent / Wild")]
    Wild,
}

impl Tone {
    /// The five tones that follow the active mode's shape.
    pub const PRIMARY: [Tone; 5] = [
        Tone::Curiosity,
        Tone::Fun,
        Tone::Urgency,
        Tone::Promo,
        Tone::Clear,
    ];

    pub const ALL: [Tone; 6] = [
        Tone::Curiosity,
        Tone::Fun,
        Tone::Urgency,
        Tone::Promo,
        Tone::Clear,
        Tone::Wild,
    ];

    /// Label used in prompts and expected back from the model.
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Curiosity => "Curiosity",
            Tone::Fun => "Fun",
            Tone::Urgency => "Urgency",
            Tone::Promo => "Promo",
            Tone::Clear => "Clear",
            Tone::Wild => "Irreverent / Wild",
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Tone::Wild)
    }

    /// Classify a free-form tone label coming back from the model.
    ///
    /// Case-insensitive. "Irreverent", "Irreverent / Wild" and anything
    /// containing "wild" all land in the wild slot.
    pub fn classify(label: &str) -> Option<Tone> {
        let normalized = label.trim().to_lowercase();
        if normalized == "irreverent"
            || normalized == "irreverent / wild"
            || normalized.contains("wild")
        {
            return Some(Tone::Wild);
        }

        Tone::PRIMARY
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(&normalized))
    }

    /// Strict label comparison used by the winner fallback.
    pub fn matches_label(&self, label: &str) -> bool {
        self.label().eq_ignore_ascii_case(label.trim())
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

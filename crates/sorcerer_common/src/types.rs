//! Result types handed back to the view layer.
//!
//! Field names follow the JSON contract requested from the model
//! (`subjectLines`, `chanceOfSuccess`, `subjectA`, ...).

use crate::tone::Tone;
use serde::{Deserialize, Deserializer, Serialize};

/// One generated line. A/B pairs are tried first so that a line carrying
/// `subjectA` is never mistaken for a standard line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectLine {
    Pair {
        tone: String,
        #[serde(rename = "subjectA")]
        subject_a: String,
        #[serde(rename = "subjectB", default, skip_serializing_if = "Option::is_none")]
        subject_b: Option<String>,
        #[serde(rename = "previewA", default, deserialize_with = "null_as_empty")]
        preview_a: String,
        #[serde(rename = "previewB", default, skip_serializing_if = "Option::is_none")]
        preview_b: Option<String>,
    },
    Single {
        tone: String,
        subject: String,
        #[serde(default, deserialize_with = "null_as_empty")]
        preview: String,
    },
}

impl SubjectLine {
    pub fn single(tone: &str, subject: &str, preview: &str) -> Self {
        SubjectLine::Single {
            tone: tone.to_string(),
            subject: subject.to_string(),
            preview: preview.to_string(),
        }
    }

    pub fn pair(tone: &str, subjects: (&str, &str), previews: (&str, &str)) -> Self {
        SubjectLine::Pair {
            tone: tone.to_string(),
            subject_a: subjects.0.to_string(),
            subject_b: Some(subjects.1.to_string()),
            preview_a: previews.0.to_string(),
            preview_b: Some(previews.1.to_string()),
        }
    }

    /// Raw tone label as written by the model.
    pub fn tone_label(&self) -> &str {
        match self {
            SubjectLine::Pair { tone, .. } | SubjectLine::Single { tone, .. } => tone,
        }
    }

    pub fn tone(&self) -> Option<Tone> {
        Tone::classify(self.tone_label())
    }

    pub fn is_wild(&self) -> bool {
        self.tone().map(|t| t.is_wild()).unwrap_or(false)
    }

    /// `subject` for standard lines, `subjectA` for pairs.
    pub fn primary_subject(&self) -> &str {
        match self {
            SubjectLine::Pair { subject_a, .. } => subject_a,
            SubjectLine::Single { subject, .. } => subject,
        }
    }

    pub fn primary_preview(&self) -> &str {
        match self {
            SubjectLine::Pair { preview_a, .. } => preview_a,
            SubjectLine::Single { preview, .. } => preview,
        }
    }

    /// Every subject string on this line, variant B included.
    pub fn subjects(&self) -> Vec<&str> {
        match self {
            SubjectLine::Pair {
                subject_a,
                subject_b,
                ..
            } => {
                let mut out = vec![subject_a.as_str()];
                if let Some(b) = subject_b {
                    out.push(b.as_str());
                }
                out
            }
            SubjectLine::Single { subject, .. } => vec![subject.as_str()],
        }
    }

    pub fn variant_b(&self) -> Option<(&str, Option<&str>)> {
        match self {
            SubjectLine::Pair {
                subject_b: Some(subject_b),
                preview_b,
                ..
            } => Some((subject_b.as_str(), preview_b.as_deref())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerPrediction {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reason: String,
}

/// Models sometimes send `null` for text they had nothing to say about.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub subject_lines: Vec<SubjectLine>,
    #[serde(default)]
    pub chance_of_success: Option<WinnerPrediction>,
}

impl GenerationResult {
    /// Wrap a bare array of lines (legacy array-only schema).
    pub fn from_lines(subject_lines: Vec<SubjectLine>) -> Self {
        Self {
            subject_lines,
            chance_of_success: None,
        }
    }

    pub fn primary_lines(&self) -> impl Iterator<Item = &SubjectLine> {
        self.subject_lines.iter().filter(|line| !line.is_wild())
    }

    pub fn wild_line(&self) -> Option<&SubjectLine> {
        self.subject_lines.iter().find(|line| line.is_wild())
    }

    /// True if `subject` is one of the generated subjects, verbatim.
    pub fn contains_subject(&self, subject: &str) -> bool {
        self.subject_lines
            .iter()
            .any(|line| line.subjects().contains(&subject))
    }

    /// Tones missing from the expected six, in canonical order.
    pub fn missing_tones(&self) -> Vec<Tone> {
        Tone::ALL
            .into_iter()
            .filter(|tone| !self.subject_lines.iter().any(|line| line.tone() == Some(*tone)))
            .collect()
    }
}

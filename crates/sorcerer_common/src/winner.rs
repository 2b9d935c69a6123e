//! Winner prediction resolution.
//!
//! A model-supplied prediction is kept when it names a generated subject.
//! Otherwise the goal picks a tone from a fixed table and that tone's line
//! becomes the prediction. No matching line means no prediction (null).

use crate::tone::Tone;
use crate::types::{GenerationResult, WinnerPrediction};
use tracing::{debug, warn};

/// Goal (lowercase) -> tone whose line is the fallback winner.
pub const GOAL_FALLBACK_TONES: [(&str, Tone); 5] = [
    ("opens", Tone::Curiosity),
    ("engagement", Tone::Curiosity),
    ("clicks", Tone::Urgency),
    ("awareness", Tone::Clear),
    ("conversions", Tone::Promo),
];

/// Tone used when the goal is unset or not in the table
pub const DEFAULT_FALLBACK_TONE: Tone = Tone::Curiosity;

pub fn fallback_tone_for_goal(goal: Option<&str>) -> Tone {
    let Some(goal) = goal.map(str::trim).filter(|g| !g.is_empty()) else {
        return DEFAULT_FALLBACK_TONE;
    };
    GOAL_FALLBACK_TONES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(goal))
        .map(|(_, tone)| *tone)
        .unwrap_or(DEFAULT_FALLBACK_TONE)
}

pub fn resolve_winner(mut result: GenerationResult, goal: Option<&str>) -> GenerationResult {
    if let Some(prediction) = result.chance_of_success.take() {
        match reconcile_prediction(&result, prediction) {
            Some(kept) => {
                result.chance_of_success = Some(kept);
                return result;
            }
            None => warn!("Model prediction does not name a generated subject; using fallback"),
        }
    }

    result.chance_of_success = fallback_prediction(&result, goal);
    if result.chance_of_success.is_none() {
        warn!(
            "No line with fallback tone {} for goal {:?}; leaving prediction empty",
            fallback_tone_for_goal(goal),
            goal
        );
    }
    result
}

/// Keep a model prediction only if it points at a generated subject.
/// Case and surrounding whitespace are forgiven; the subject is then
/// rewritten to the exact generated text.
fn reconcile_prediction(
    result: &GenerationResult,
    prediction: WinnerPrediction,
) -> Option<WinnerPrediction> {
    let wanted = prediction.subject.trim();
    if wanted.is_empty() {
        return None;
    }
    if result.contains_subject(&prediction.subject) {
        return Some(prediction);
    }

    let matched = result
        .subject_lines
        .iter()
        .flat_map(|line| line.subjects())
        .find(|subject| subject.trim().to_lowercase() == wanted.to_lowercase())?;

    debug!("Normalized predicted subject {:?} -> {:?}", prediction.subject, matched);
    Some(WinnerPrediction {
        subject: matched.to_string(),
        reason: prediction.reason,
    })
}

fn fallback_prediction(result: &GenerationResult, goal: Option<&str>) -> Option<WinnerPrediction> {
    let tone = fallback_tone_for_goal(goal);
    let line = result
        .subject_lines
        .iter()
        .find(|line| tone.matches_label(line.tone_label()))?;

    Some(WinnerPrediction {
        subject: line.primary_subject().to_string(),
        reason: fallback_reason(tone, goal),
    })
}

fn fallback_reason(tone: Tone, goal: Option<&str>) -> String {
    match goal.map(str::trim).filter(|g| !g.is_empty()) {
        Some(goal) => format!(
            "The {} line is the strongest fit for a \"{}\" goal: that tone typically performs best for this objective.",
            tone, goal
        ),
        None => format!(
            "The {} line is the safest all-round pick when no specific goal is set.",
            tone
        ),
    }
}

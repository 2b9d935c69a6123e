//! Prompt compilation for subject-line generation.
//!
//! Output is fully determined by the brief and the mode: same input, same
//! text. The schema description embedded in the instruction is the contract
//! the extractor enforces on the way back.

use crate::brief::{non_blank, CampaignBrief, GenerationMode};
use crate::tone::Tone;

/// System prompt sent with every generation request
pub const COPYWRITER_SYSTEM_PROMPT: &str = "You are a helpful assistant that generates great email subject lines and matching preview text for marketing campaigns.";

const COPYWRITER_BRIEFING: &str = r#"You are a high-impact, creative, and brand-sensitive email copywriter. Analyze the following brand and campaign info, using it (including inferred brand keywords, style, and product fit) to maximize relevance and originality, but never generic. Suggest brand-unique or industry-aware subject lines (e.g., if "Glow & Co.", use beauty/skincare language). Prioritize the most creative and brand-matching option for each tone."#;

const LINE_RULES: &str = r#"- Subject lines: punchy (max 10 words), emotionally compelling, and *actually fit the brand/campaign*. Explain nothing in output, just JSON.
- Preview text: complements the subject, max 15 words.
- Draw from brand, campaign goal, and industry for targeted ideas. Avoid generic, repetitive, or copy-paste filler."#;

const AB_TEST_RULES: &str = r#"A/B TEST MODE is ON: For each of the five tones above, generate *two similar but not identical* subject lines and previews as "subjectA"/"subjectB" and "previewA"/"previewB". Differences should follow best A/B testing practices (e.g., 'Last Chance' vs 'Ends Tomorrow'; curiosity vs clarity). The 'Irreverent / Wild' entry gets a single variant only ("subjectA"/"previewA")."#;

const WILD_RULES: &str = r#">> INCLUDE 1 'Irreverent / Wild' tone subject line: Make this the craziest, most wild, internet-breaking, attention-grabbing subject line you could imagine (but not offensive or negative). Must be almost too wild to use: a subject line so strange, funny, unexpected, or ridiculous that it would instantly grab attention and go viral. Preview text should match the energy."#;

const STANDARD_SCHEMA: &str = r#"{
  "subjectLines": [
    {
      "tone": "Curiosity",
      "subject": "...",
      "preview": "..."
    },
    ... (Fun, Urgency, Promo, Clear),
    {
      "tone": "Irreverent / Wild",
      "subject": "...",
      "preview": "..."
    }
  ],
  "chanceOfSuccess": {
    "subject": "The subject line text predicted to do best",
    "reason": "A short friendly explanation"
  }
}"#;

const AB_TEST_SCHEMA: &str = r#"{
  "subjectLines": [
    {
      "tone": "Curiosity",
      "subjectA": "...",
      "subjectB": "...",
      "previewA": "...",
      "previewB": "..."
    },
    ... (Fun, Urgency, Promo, Clear),
    {
      "tone": "Irreverent / Wild",
      "subjectA": "...",
      "previewA": "..."
    }
  ],
  "chanceOfSuccess": {
    "subject": "The subject line text predicted to do best",
    "reason": "A short friendly explanation"
  }
}"#;

/// Which of the two output schemas the instruction asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    Standard,
    AbTest,
}

impl SchemaVariant {
    pub fn for_mode(mode: GenerationMode) -> Self {
        if mode.ab_test {
            SchemaVariant::AbTest
        } else {
            SchemaVariant::Standard
        }
    }

    /// JSON shape description embedded in the instruction.
    pub fn description(&self) -> &'static str {
        match self {
            SchemaVariant::Standard => STANDARD_SCHEMA,
            SchemaVariant::AbTest => AB_TEST_SCHEMA,
        }
    }
}

/// A ready-to-send instruction pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPrompt {
    pub system: String,
    pub user: String,
    pub schema: SchemaVariant,
}

pub fn compile_prompt(brief: &CampaignBrief, mode: GenerationMode) -> CompiledPrompt {
    let schema = SchemaVariant::for_mode(mode);
    let primary_tones = Tone::PRIMARY
        .iter()
        .map(Tone::label)
        .collect::<Vec<_>>()
        .join(", ");

    let mut sections = vec![
        COPYWRITER_BRIEFING.to_string(),
        format!(
            "Write 5 subject line options in these tones: {primary_tones}. For each, include a matching preview text that fits the brand and maximizes open rate.\n{LINE_RULES}"
        ),
    ];

    if mode.ab_test {
        sections.push(AB_TEST_RULES.to_string());
    }
    sections.push(WILD_RULES.to_string());
    sections.push(format!(
        "In total return exactly 6 entries: one each for {primary_tones}, and one '{}'.",
        Tone::Wild.label()
    ));

    let details = render_campaign_details(brief);
    if !details.is_empty() {
        sections.push(format!("Campaign details:\n{details}"));
    }

    sections.push(strategist_instruction(brief.goal.as_deref()));
    sections.push(format!(
        "Respond ONLY with minified JSON in this format, with no prose, comments, or markdown outside the JSON:\n{}",
        schema.description()
    ));

    CompiledPrompt {
        system: COPYWRITER_SYSTEM_PROMPT.to_string(),
        user: sections.join("\n\n"),
        schema,
    }
}

/// One `Label: value` line per present field; empty string if none are.
pub fn render_campaign_details(brief: &CampaignBrief) -> String {
    brief
        .labeled_fields()
        .into_iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn strategist_instruction(goal: Option<&str>) -> String {
    let target = match goal.and_then(non_blank) {
        Some(goal) => format!("the stated goal \"{goal}\""),
        None => "the campaign's goal".to_string(),
    };
    format!(
        "After the list, analyze as a friendly strategist: Which subject line is *most likely* to achieve {target}? Give the field \"subject\" (matching your winning subject line exactly, character for character, as written in subjectLines!) and a sentence explaining *why* in \"reason\"."
    )
}

//! Terminal rendering for generation results. ASCII only.

use owo_colors::OwoColorize;
use sorcerer_common::{GenerationResult, SorcererError, SubjectLine};

/// Subjects longer than this get a hint
pub const SUBJECT_CHAR_HINT: usize = 60;

pub const SUBJECT_LINE_TIPS: [&str; 5] = [
    "Use power words and emotion",
    "Keep it under 60 characters",
    "Pair well with preview text",
    "Match subject line with email content",
    "A/B test ruthlessly",
];

/// Color on or off. Tests render plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Color,
}

impl Style {
    fn paint(self, text: &str, color: fn(&str) -> String) -> String {
        match self {
            Style::Plain => text.to_string(),
            Style::Color => color(text),
        }
    }
}

pub fn render_result(result: &GenerationResult, goal: Option<&str>, style: Style) -> String {
    let winner = result.chance_of_success.as_ref().map(|w| w.subject.as_str());
    let mut out = Vec::new();

    out.push(String::new());
    match &result.chance_of_success {
        Some(prediction) => {
            let goal_text = goal.map(|g| format!(" for {}", g)).unwrap_or_default();
            out.push(format!(
                "{} {}",
                style.paint(&format!("[PREDICTED WINNER{}]", goal_text), |s| {
                    s.bright_green().bold().to_string()
                }),
                prediction.subject
            ));
            if !prediction.reason.is_empty() {
                out.push(format!("  {}", prediction.reason));
            }
        }
        None => out.push(style.paint("[PREDICTED WINNER] none available", |s| {
            s.yellow().to_string()
        })),
    }

    out.push(String::new());
    out.push(style.paint("[SUBJECT LINES]", |s| s.bold().to_string()));
    for line in result.primary_lines() {
        render_line(&mut out, line, winner, style);
    }

    if let Some(wild) = result.wild_line() {
        out.push(String::new());
        out.push(style.paint("[IRREVERENT / WILD]", |s| s.magenta().bold().to_string()));
        render_line(&mut out, wild, winner, style);
    }

    out.push(String::new());
    out.join("\n")
}

fn render_line(out: &mut Vec<String>, line: &SubjectLine, winner: Option<&str>, style: Style) {
    out.push(format!("  {}", style.paint(line.tone_label(), |s| s.cyan().to_string())));

    let label_a = if line.variant_b().is_some() { "A: " } else { "" };
    push_subject(out, label_a, line.primary_subject(), winner, style);
    push_preview(out, line.primary_preview());

    if let Some((subject_b, preview_b)) = line.variant_b() {
        push_subject(out, "B: ", subject_b, winner, style);
        if let Some(preview) = preview_b {
            push_preview(out, preview);
        }
    }
}

fn push_subject(out: &mut Vec<String>, label: &str, subject: &str, winner: Option<&str>, style: Style) {
    let is_winner = winner == Some(subject);
    let marker = if is_winner { "*" } else { "-" };
    let text = if is_winner {
        style.paint(subject, |s| s.bright_green().bold().to_string())
    } else {
        subject.to_string()
    };
    let mut row = format!("    {} {}{}", marker, label, text);

    let chars = subject.chars().count();
    if chars > SUBJECT_CHAR_HINT {
        row.push_str(&style.paint(
            &format!("  ({} chars, aim for under {})", chars, SUBJECT_CHAR_HINT),
            |s| s.dimmed().to_string(),
        ));
    }
    out.push(row);
}

fn push_preview(out: &mut Vec<String>, preview: &str) {
    if !preview.is_empty() {
        out.push(format!("      {}", preview));
    }
}

pub fn render_tips() -> String {
    let mut out = vec!["[WHAT MAKES A GREAT SUBJECT LINE?]".to_string()];
    out.extend(SUBJECT_LINE_TIPS.iter().map(|tip| format!("  * {}", tip)));
    out.join("\n")
}

pub fn render_error(err: &anyhow::Error, style: Style) -> String {
    let mut out = vec![String::new()];
    let message = style.paint(&err.to_string(), |s| s.red().to_string());
    match err.downcast_ref::<SorcererError>() {
        Some(pipeline_err) => {
            out.push(format!(
                "[ERROR {} {}] {}",
                pipeline_err.kind(),
                pipeline_err.code(),
                message
            ));
            if let SorcererError::MalformedResponse { raw, .. } = pipeline_err {
                out.push(String::new());
                out.push("[RAW RESPONSE]".to_string());
                out.push(style.paint(raw, |s| s.dimmed().to_string()));
            }
        }
        None => out.push(format!("[ERROR] {}", message)),
    }
    out.push(String::new());
    out.join("\n")
}

pub fn display_error(err: &anyhow::Error) {
    eprintln!("{}", render_error(err, Style::Color));
}

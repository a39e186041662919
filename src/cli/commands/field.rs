//! Interactive location field driven by stdin.
//!
//! Each line replaces the field text, as if typed. Lines starting with `:`
//! are commands: `:pick N`, `:esc`, `:focus`, `:clear`, `:quit`.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::locations::LocationOutput;
use super::provider_client;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::{FieldView, LookupPolicy, SelectionField};

/// Arguments for the interactive field.
#[derive(Args, Debug)]
pub struct FieldArgs {
    /// Label shown for the field
    #[arg(short, long, default_value = "From")]
    pub label: String,
}

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Replace the field text.
    Text(String),
    /// 1-based row number
    Pick(usize),
    /// Dismiss the suggestion list.
    Escape,
    /// Reopen the suggestion list.
    Focus,
    /// Clear text and value.
    Clear,
    /// Stop reading input.
    Quit,
}

impl FieldInput {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Text(line.to_string()));
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("pick"), Some(n)) => match n.parse::<usize>() {
                Ok(row) if row >= 1 => Ok(Self::Pick(row)),
                _ => Err(format!("Invalid row: {n}. Rows are numbered from 1")),
            },
            (Some("pick"), None) => Err("Usage: :pick N".to_string()),
            (Some("esc"), None) => Ok(Self::Escape),
            (Some("focus"), None) => Ok(Self::Focus),
            (Some("clear"), None) => Ok(Self::Clear),
            (Some("quit" | "q"), None) => Ok(Self::Quit),
            _ => Err(format!(
                "Unknown command: :{command}. Use :pick N, :esc, :focus, :clear or :quit"
            )),
        }
    }
}

/// Field state printed after each change.
#[derive(Debug, PartialEq, Serialize)]
pub struct FieldOutput {
    /// Field label.
    pub label: String,
    /// Current text.
    pub text: String,
    /// Committed value, if any.
    pub value: Option<LocationOutput>,
    /// What the suggestion area shows.
    pub view: FieldView,
}

impl FieldOutput {
    fn capture(field: &SelectionField) -> Self {
        Self {
            label: field.label().to_string(),
            text: field.display_text(),
            value: field.value().as_ref().map(LocationOutput::from),
            view: field.view(),
        }
    }
}

impl CommandOutput for FieldOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!("{}: {}", self.label, self.text)];
        match &self.view {
            FieldView::Closed => {}
            FieldView::Loading => lines.push("  ⠋ Searching airports...".to_string()),
            FieldView::Message { text, is_error } => {
                let marker = if *is_error { "✗" } else { "·" };
                lines.push(format!("  {marker} {text}"));
            }
            FieldView::List { suggestions } => {
                for (index, suggestion) in suggestions.iter().enumerate() {
                    let marker = if suggestion.selected { "*" } else { " " };
                    lines.push(format!("{marker}{:>3}. {}", index + 1, suggestion.label));
                    lines.push(format!("       {}", suggestion.detail));
                }
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn apply(field: &mut SelectionField, input: FieldInput) {
    match input {
        FieldInput::Text(text) => field.input(&text),
        FieldInput::Pick(row) => {
            if let Err(err) = field.activate(row - 1) {
                eprintln!("{err}");
            }
        }
        FieldInput::Escape => field.dismiss(),
        FieldInput::Focus => field.focus(),
        FieldInput::Clear => field.clear(),
        FieldInput::Quit => {}
    }
}

/// Run the field until stdin closes or `:quit`.
pub async fn execute(args: FieldArgs, config: &Config, json_mode: bool) -> Result<()> {
    let client = provider_client(config)?;
    let mut field = SelectionField::new(args.label, client, LookupPolicy::from(&config.lookup));
    let mut renders = field.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last: Option<FieldOutput> = None;

    debug!(field = %field.id(), "interactive field started");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                match FieldInput::parse(&line) {
                    Ok(FieldInput::Quit) => break,
                    Ok(input) => apply(&mut field, input),
                    Err(message) => eprintln!("{message}"),
                }
            }
            changed = renders.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        let current = FieldOutput::capture(&field);
        if last.as_ref() != Some(&current) {
            output(&current, json_mode);
            last = Some(current);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Suggestion;

    #[test]
    fn test_parse_text_and_commands() {
        assert_eq!(FieldInput::parse("Lon"), Ok(FieldInput::Text("Lon".to_string())));
        assert_eq!(FieldInput::parse(""), Ok(FieldInput::Text(String::new())));
        assert_eq!(FieldInput::parse(":pick 2"), Ok(FieldInput::Pick(2)));
        assert_eq!(FieldInput::parse(":esc"), Ok(FieldInput::Escape));
        assert_eq!(FieldInput::parse(":focus"), Ok(FieldInput::Focus));
        assert_eq!(FieldInput::parse(":clear"), Ok(FieldInput::Clear));
        assert_eq!(FieldInput::parse(":q"), Ok(FieldInput::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_commands() {
        assert!(FieldInput::parse(":pick 0").is_err());
        assert!(FieldInput::parse(":pick two").is_err());
        assert!(FieldInput::parse(":pick").is_err());
        assert!(FieldInput::parse(":jump").is_err());
    }

    #[test]
    fn test_human_rendering_of_list() {
        let out = FieldOutput {
            label: "From".to_string(),
            text: "Lon".to_string(),
            value: None,
            view: FieldView::List {
                suggestions: vec![Suggestion {
                    label: "London (LOND)".to_string(),
                    detail: "London, United Kingdom".to_string(),
                    selected: true,
                }],
            },
        };
        let rendered = out.to_human();
        assert!(rendered.starts_with("From: Lon"));
        assert!(rendered.contains("*  1. London (LOND)"));
        assert!(rendered.contains("London, United Kingdom"));
    }

    #[test]
    fn test_json_rendering_tags_view_kind() {
        let out = FieldOutput {
            label: "To".to_string(),
            text: "Par".to_string(),
            value: None,
            view: FieldView::Loading,
        };
        let json = out.to_json();
        assert_eq!(json["view"]["kind"], "loading");
        assert_eq!(json["text"], "Par");
    }
}

//! The built-in manual.
//!
//! The manual is markdown compiled into the binary. It is rendered to plain
//! terminal text and handed to `$PAGER` (default `less`). When stdout is not
//! a terminal, or the pager cannot be started, the text is printed directly.

use log::warn;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use std::io::{self, IsTerminal, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

const MANUAL: &str = include_str!("manual.md");
const DEFAULT_PAGER: &str = "less";

#[derive(Error, Debug)]
pub enum ManualError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("pager {0} exited with an error")]
    Pager(String),
}

/// Render markdown as plain text for a terminal.
///
/// Top-level headings are upper-cased, list items get bullets or numbers,
/// and code blocks are indented.
pub fn render(markdown: &str) -> String {
    let mut out = String::new();
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut heading: Option<HeadingLevel> = None;
    let mut in_code_block = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some(level);
            }
            Event::End(TagEnd::Heading(_)) => {
                heading = None;
                out.push_str("\n\n");
            }
            Event::End(TagEnd::Paragraph) => {
                out.push('\n');
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::List(start)) => lists.push(start),
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                let depth = lists.len().saturating_sub(1);
                out.push_str(&"  ".repeat(depth + 1));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        out.push_str(&format!("{n}. "));
                        *n += 1;
                    }
                    _ => out.push_str("- "),
                }
            }
            Event::End(TagEnd::Item) => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                out.push('\n');
            }
            Event::Text(text) if in_code_block => {
                for line in text.lines() {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            Event::Text(text) => match heading {
                Some(HeadingLevel::H1) => out.push_str(&text.to_uppercase()),
                _ => out.push_str(&text),
            },
            Event::Code(code) => out.push_str(&code),
            Event::SoftBreak | Event::HardBreak => {
                out.push('\n');
                if !lists.is_empty() {
                    out.push_str(&"  ".repeat(lists.len() + 1));
                }
            }
            _ => {}
        }
    }

    out.trim_end().to_string() + "\n"
}

/// The rendered manual text.
pub fn manual_text() -> String {
    render(MANUAL)
}

/// Split a `$PAGER` value into program and arguments.
pub fn pager_command(pager_var: Option<&str>) -> (String, Vec<String>) {
    let value = pager_var
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_PAGER);
    let mut parts = value.split_whitespace().map(String::from);
    let program = parts.next().unwrap_or_else(|| DEFAULT_PAGER.to_string());
    (program, parts.collect())
}

/// Show the manual through the pager.
pub fn show_manual() -> Result<(), ManualError> {
    let text = manual_text();
    if !io::stdout().is_terminal() {
        print!("{text}");
        return Ok(());
    }

    let pager_var = std::env::var("PAGER").ok();
    let (program, args) = pager_command(pager_var.as_deref());
    let mut child = match Command::new(&program)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            warn!("cannot start pager {program}: {e}");
            print!("{text}");
            return Ok(());
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        // The pager closing early (user quit) is not an error.
        match stdin.write_all(text.as_bytes()) {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e.into()),
            _ => {}
        }
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ManualError::Pager(program))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_mentions_every_command() {
        let text = manual_text();
        for command in ["init", "copy", "archive", "cleanup", "gen-config"] {
            assert!(text.contains(command), "manual does not mention {command}");
        }
    }

    #[test]
    fn top_heading_is_upper_cased() {
        assert!(render("# award-deck\n\nBody.\n").starts_with("AWARD-DECK\n\nBody.\n"));
    }

    #[test]
    fn sub_headings_keep_case() {
        let text = render("## Slides\n\ntext\n");
        assert!(text.starts_with("Slides\n\ntext"));
    }

    #[test]
    fn lists_get_markers() {
        let text = render("- one\n- two\n\n1. first\n2. second\n");
        assert!(text.contains("  - one\n  - two\n"));
        assert!(text.contains("  1. first\n  2. second\n"));
    }

    #[test]
    fn code_blocks_are_indented() {
        let text = render("Example:\n\n    7,Armor\n    12a,Aircraft\n");
        assert!(text.contains("    7,Armor\n    12a,Aircraft\n"));
    }

    #[test]
    fn inline_code_is_plain() {
        assert_eq!(render("Run `copy` now.\n"), "Run copy now.\n");
    }

    #[test]
    fn pager_defaults_to_less() {
        assert_eq!(pager_command(None), ("less".to_string(), vec![]));
        assert_eq!(pager_command(Some("  ")), ("less".to_string(), vec![]));
    }

    #[test]
    fn pager_with_arguments() {
        assert_eq!(
            pager_command(Some("less -R -F")),
            ("less".to_string(), vec!["-R".to_string(), "-F".to_string()])
        );
    }
}

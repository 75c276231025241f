//! Terminal markdown rendering for in-flight documents.
//!
//! The whole document is re-derived from the cumulative text on every
//! update, so the renderer must accept any prefix of the final
//! document: an unterminated `**` span parses as literal text until
//! its close arrives, and a half-received heading is just a short
//! heading.

use crossterm::style::Stylize;
use crossterm::{QueueableCommand, cursor, terminal};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::io::{self, Write};

/// Render markdown to a styled terminal string.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut out = String::new();
    let mut bold = false;
    let mut heading: Option<HeadingLevel> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                if !out.is_empty() {
                    out.push('\n');
                }
                heading = Some(level);
            }
            Event::End(TagEnd::Heading(_)) => {
                heading = None;
                out.push('\n');
            }
            Event::Start(Tag::Item) => out.push_str("  • "),
            Event::End(TagEnd::Item) => out.push('\n'),
            Event::End(TagEnd::List(_)) => out.push('\n'),
            Event::Start(Tag::Strong) => bold = true,
            Event::End(TagEnd::Strong) => bold = false,
            Event::End(TagEnd::Paragraph) => out.push_str("\n\n"),
            Event::Text(text) => push_styled(&mut out, &text, heading, bold),
            Event::Code(code) => {
                let styled = format!("`{code}`");
                out.push_str(&format!("{}", styled.green()));
            }
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            _ => {}
        }
    }
    out
}

fn push_styled(out: &mut String, text: &str, heading: Option<HeadingLevel>, bold: bool) {
    match heading {
        Some(HeadingLevel::H1) => out.push_str(&format!("{}", text.bold().magenta())),
        Some(HeadingLevel::H2) => out.push_str(&format!("{}", text.bold().blue())),
        Some(_) => out.push_str(&format!("{}", text.bold().cyan())),
        None if bold => out.push_str(&format!("{}", text.bold())),
        None => out.push_str(text),
    }
}

/// Repaints the live document in place, giving the typewriter reveal.
///
/// Row accounting counts newlines only; a line longer than the
/// terminal width wraps and would offset the repaint.
#[derive(Debug, Default)]
pub struct Repaint {
    rows: u16,
}

impl Repaint {
    /// Create a repainter with no previous frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the previous frame and draw the new one.
    pub fn draw(&mut self, out: &mut impl Write, frame: &str) -> io::Result<()> {
        if self.rows > 0 {
            out.queue(cursor::MoveUp(self.rows))?;
            out.queue(cursor::MoveToColumn(0))?;
            out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        }
        write!(out, "{frame}")?;
        let mut rows = frame.matches('\n').count();
        if !frame.ends_with('\n') {
            writeln!(out)?;
            rows += 1;
        }
        out.flush()?;
        self.rows = u16::try_from(rows).unwrap_or(u16::MAX);
        Ok(())
    }
}

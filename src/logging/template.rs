/*!
 * Log Line Templates
 *
 * A template is a fixed layout of literal text and placeholders:
 *
 * - `{timestamp}`: `YYYY-MM-DD HH:MM:SS.mmm` (UTC)
 * - `{color}` / `{reset}`: ANSI color of the level, and the reset sequence
 * - `{level}`: uppercase level name
 * - `{message}`: the record message
 * - `{attrs}`: a space followed by the JSON attributes, only when there are any
 *
 * `{{` and `}}` produce literal braces. Templates are parsed once, up front;
 * rendering never re-parses.
 */

use super::Record;
use crate::core::limits::ANSI_RESET;
use crate::core::{LogError, LogResult};
use time::format_description::FormatItem;
use time::macros::format_description;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Timestamp,
    Color,
    Reset,
    Level,
    Message,
    Attrs,
}

/// Parsed log line layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> LogResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(LogError::template(pos, "unmatched `}`")),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(LogError::template(pos, "unclosed placeholder"));
                    }

                    let segment = match name.as_str() {
                        "timestamp" => Segment::Timestamp,
                        "color" => Segment::Color,
                        "reset" => Segment::Reset,
                        "level" => Segment::Level,
                        "message" => Segment::Message,
                        "attrs" => Segment::Attrs,
                        other => {
                            return Err(LogError::template(
                                pos,
                                format!("unknown placeholder `{}`", other),
                            ))
                        }
                    };

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Whether the layout includes wall-clock time
    pub fn has_timestamp(&self) -> bool {
        self.segments.contains(&Segment::Timestamp)
    }

    /// Render a record without trailing newline
    pub fn render(&self, record: &Record, colorize: bool) -> LogResult<String> {
        let mut line = String::with_capacity(64 + record.message.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Timestamp => line.push_str(&record.timestamp.format(TIMESTAMP_FORMAT)?),
                Segment::Color if colorize => line.push_str(record.level.ansi_color()),
                Segment::Reset if colorize => line.push_str(ANSI_RESET),
                Segment::Color | Segment::Reset => {}
                Segment::Level => line.push_str(record.level.upper_name()),
                Segment::Message => line.push_str(&record.message),
                Segment::Attrs if !record.attrs.is_empty() => {
                    line.push(' ');
                    line.push_str(&record.attrs.to_json()?);
                }
                Segment::Attrs => {}
            }
        }

        Ok(line)
    }
}

impl std::str::FromStr for Template {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

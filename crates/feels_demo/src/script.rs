//! Demo script parsing
//!
//! One command per line; blank lines and `#` comments are skipped. Widgets
//! are named by their kebab-case kind name.
//!
//! ```text
//! mood extreme
//! bounds emotionally-unavailable 0 0 120 40
//! enter identity-crisis
//! wait 1500
//! click dissociating
//! show
//! ```

use feels_core::events::{Point, Rect};
use feels_core::kind::WidgetKind;
use feels_core::mood::MoodLevel;
use thiserror::Error;

/// Errors from parsing a script
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' needs {expected}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },

    #[error("line {line}: unknown widget '{name}'")]
    UnknownWidget { line: usize, name: String },

    #[error("line {line}: '{value}' is not a number")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: unexpected trailing input '{rest}'")]
    TrailingInput { line: usize, rest: String },
}

/// A single script command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Mood(MoodLevel),
    Enter(WidgetKind),
    Leave(WidgetKind),
    Move(WidgetKind, Point),
    Bounds(WidgetKind, Rect),
    Click(WidgetKind, Point),
    Wait(u64),
    /// Print one widget, or every widget
    Show(Option<WidgetKind>),
    Unmount(WidgetKind),
}

/// A parsed command with its 1-based source line
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

/// Parse a whole script
pub fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, text)| {
            let line = index + 1;
            parse_line(line, text)
                .map(|command| command.map(|command| Step { line, command }))
                .transpose()
        })
        .collect()
}

/// Parse one line; `Ok(None)` for blanks and comments
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ScriptError> {
    let text = text.split('#').next().unwrap_or("").trim();
    let mut words = text.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let mut args = Args { line, words };

    let command = match head {
        "mood" => Command::Mood(MoodLevel::parse_lossy(args.word("mood", "a mood level")?)),
        "enter" => Command::Enter(args.widget("enter")?),
        "leave" => Command::Leave(args.widget("leave")?),
        "move" => {
            let kind = args.widget("move")?;
            Command::Move(kind, args.point("move")?)
        }
        "bounds" => {
            let kind = args.widget("bounds")?;
            let origin = args.point("bounds")?;
            let width = args.number("bounds", "a width")?;
            let height = args.number("bounds", "a height")?;
            Command::Bounds(kind, Rect::new(origin.x, origin.y, width, height))
        }
        "click" => {
            let kind = args.widget("click")?;
            let point = args.optional_point("click")?.unwrap_or_default();
            Command::Click(kind, point)
        }
        "wait" => Command::Wait(args.duration("wait")?),
        "show" => Command::Show(args.optional_widget()?),
        "unmount" => Command::Unmount(args.widget("unmount")?),
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };

    args.finish()?;
    Ok(Some(command))
}

struct Args<'a> {
    line: usize,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(
        &mut self,
        command: &'static str,
        expected: &'static str,
    ) -> Result<&'a str, ScriptError> {
        self.words.next().ok_or(ScriptError::MissingArgument {
            line: self.line,
            command,
            expected,
        })
    }

    fn lookup(&self, name: &str) -> Result<WidgetKind, ScriptError> {
        WidgetKind::from_name(name).ok_or_else(|| ScriptError::UnknownWidget {
            line: self.line,
            name: name.to_string(),
        })
    }

    fn widget(&mut self, command: &'static str) -> Result<WidgetKind, ScriptError> {
        let name = self.word(command, "a widget name")?;
        self.lookup(name)
    }

    fn optional_widget(&mut self) -> Result<Option<WidgetKind>, ScriptError> {
        self.words.next().map(|name| self.lookup(name)).transpose()
    }

    fn parse_number<T: std::str::FromStr>(&self, value: &str) -> Result<T, ScriptError> {
        value.parse().map_err(|_| ScriptError::InvalidNumber {
            line: self.line,
            value: value.to_string(),
        })
    }

    fn number(
        &mut self,
        command: &'static str,
        expected: &'static str,
    ) -> Result<f32, ScriptError> {
        let value = self.word(command, expected)?;
        self.parse_number(value)
    }

    fn duration(&mut self, command: &'static str) -> Result<u64, ScriptError> {
        let value = self.word(command, "a duration in ms")?;
        self.parse_number(value)
    }

    fn point(&mut self, command: &'static str) -> Result<Point, ScriptError> {
        let x = self.number(command, "an x coordinate")?;
        let y = self.number(command, "a y coordinate")?;
        Ok(Point::new(x, y))
    }

    fn optional_point(&mut self, command: &'static str) -> Result<Option<Point>, ScriptError> {
        match self.words.next() {
            None => Ok(None),
            Some(x) => {
                let x = self.parse_number(x)?;
                let y = self.number(command, "a y coordinate")?;
                Ok(Some(Point::new(x, y)))
            }
        }
    }

    fn finish(mut self) -> Result<(), ScriptError> {
        let rest: Vec<&str> = self.words.by_ref().collect();
        if rest.is_empty() {
            Ok(())
        } else {
            Err(ScriptError::TrailingInput {
                line: self.line,
                rest: rest.join(" "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_skips_comments_and_blanks() {
        let steps = parse(
            "# warm up\n\
             mood extreme\n\
             \n\
             bounds emotionally-unavailable 0 0 120 40\n\
             click dissociating 3 4  # with a position\n\
             wait 1500\n\
             show\n",
        )
        .unwrap();

        let commands: Vec<_> = steps.iter().map(|s| s.command.clone()).collect();
        assert_eq!(
            commands,
            vec![
                Command::Mood(MoodLevel::Extreme),
                Command::Bounds(
                    WidgetKind::EmotionallyUnavailable,
                    Rect::new(0.0, 0.0, 120.0, 40.0)
                ),
                Command::Click(WidgetKind::Dissociating, Point::new(3.0, 4.0)),
                Command::Wait(1500),
                Command::Show(None),
            ]
        );
        assert_eq!(steps[1].line, 4);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            parse("wait 10\ndance anxious"),
            Err(ScriptError::UnknownCommand {
                line: 2,
                command: "dance".into()
            })
        );
        assert_eq!(
            parse_line(3, "enter stoic"),
            Err(ScriptError::UnknownWidget {
                line: 3,
                name: "stoic".into()
            })
        );
        assert_eq!(
            parse_line(1, "wait soon"),
            Err(ScriptError::InvalidNumber {
                line: 1,
                value: "soon".into()
            })
        );
        assert!(matches!(
            parse_line(1, "move anxious 1"),
            Err(ScriptError::MissingArgument { .. })
        ));
        assert!(matches!(
            parse_line(1, "leave anxious now"),
            Err(ScriptError::TrailingInput { .. })
        ));
    }

    #[test]
    fn test_unknown_mood_is_lenient() {
        assert_eq!(
            parse_line(1, "mood furious"),
            Ok(Some(Command::Mood(MoodLevel::Normal)))
        );
    }
}

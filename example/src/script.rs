//! Interaction scripts.
//!
//! One command per line; `#` starts a comment and `;` separates commands on
//! the same line.
//!
//! ```text
//! next                # step forward
//! prev                # step backward
//! dot 3               # jump to source item 3 (zero-based)
//! key end             # left | right | home | end
//! drag 500 350        # press, move, release
//! press 500           # raw pointer events
//! move 420
//! release 420
//! leave 420
//! wait 600            # advance the clock in milliseconds
//! resize 320 16       # new card width and gap, then remeasure
//! items 3             # replace the items
//! unmount
//! ```

use std::time::Duration;

use revolve_ui::NavigationKey;
use thiserror::Error;

/// One scripted interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Next,
    Prev,
    Dot(usize),
    Key(NavigationKey),
    Drag { from: f32, to: f32 },
    Press(f32),
    Move(f32),
    Release(f32),
    Leave(f32),
    Wait(Duration),
    Resize { width: i32, gap: i32 },
    Items(usize),
    Unmount,
}

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` expects {expected} argument(s), got {found}")]
    Arity {
        line: usize,
        command: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: `{value}` is not a valid {kind}")]
    InvalidValue {
        line: usize,
        value: String,
        kind: &'static str,
    },
}

/// Script replayed when none is given on the command line.
pub const DEMO: &str = "\
# buttons all the way round
next; next; next; next
wait 600
next
wait 600
# short drag snaps back, long drag advances
drag 500 450
wait 600
drag 500 350
wait 600
# dots and keys
dot 4
wait 600
key home
wait 600
key left
wait 600
# layout changes between and during gestures
resize 0 16
resize 280 12
press 500
resize 600 0
move 380
release 380
wait 600
items 3
next; prev; prev
wait 600
unmount
next
";

/// Parses a whole script.
pub fn parse(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw_line) in source.lines().enumerate() {
        let line = index + 1;
        let content = raw_line.split('#').next().unwrap_or_default();
        for statement in content.split(';') {
            let words: Vec<&str> = statement.split_whitespace().collect();
            if let Some((&name, args)) = words.split_first() {
                commands.push(parse_command(line, name, args)?);
            }
        }
    }
    Ok(commands)
}

fn parse_command(line: usize, name: &str, args: &[&str]) -> Result<Command, ScriptError> {
    let command = match name {
        "next" => {
            arity(line, "next", args, 0)?;
            Command::Next
        }
        "prev" => {
            arity(line, "prev", args, 0)?;
            Command::Prev
        }
        "unmount" => {
            arity(line, "unmount", args, 0)?;
            Command::Unmount
        }
        "dot" => {
            arity(line, "dot", args, 1)?;
            Command::Dot(number(line, args[0], "item index")?)
        }
        "items" => {
            arity(line, "items", args, 1)?;
            Command::Items(number(line, args[0], "item count")?)
        }
        "wait" => {
            arity(line, "wait", args, 1)?;
            Command::Wait(Duration::from_millis(number(line, args[0], "duration")?))
        }
        "key" => {
            arity(line, "key", args, 1)?;
            Command::Key(key(line, args[0])?)
        }
        "press" => {
            arity(line, "press", args, 1)?;
            Command::Press(coordinate(line, args[0])?)
        }
        "move" => {
            arity(line, "move", args, 1)?;
            Command::Move(coordinate(line, args[0])?)
        }
        "release" => {
            arity(line, "release", args, 1)?;
            Command::Release(coordinate(line, args[0])?)
        }
        "leave" => {
            arity(line, "leave", args, 1)?;
            Command::Leave(coordinate(line, args[0])?)
        }
        "drag" => {
            arity(line, "drag", args, 2)?;
            Command::Drag {
                from: coordinate(line, args[0])?,
                to: coordinate(line, args[1])?,
            }
        }
        "resize" => {
            arity(line, "resize", args, 2)?;
            Command::Resize {
                width: number(line, args[0], "width")?,
                gap: number(line, args[1], "gap")?,
            }
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(command)
}

fn arity(
    line: usize,
    command: &'static str,
    args: &[&str],
    expected: usize,
) -> Result<(), ScriptError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ScriptError::Arity {
            line,
            command,
            expected,
            found: args.len(),
        })
    }
}

fn number<N: std::str::FromStr>(
    line: usize,
    value: &str,
    kind: &'static str,
) -> Result<N, ScriptError> {
    value.parse().map_err(|_| ScriptError::InvalidValue {
        line,
        value: value.to_string(),
        kind,
    })
}

fn coordinate(line: usize, value: &str) -> Result<f32, ScriptError> {
    let x: f32 = number(line, value, "coordinate")?;
    if x.is_finite() {
        Ok(x)
    } else {
        Err(ScriptError::InvalidValue {
            line,
            value: value.to_string(),
            kind: "coordinate",
        })
    }
}

fn key(line: usize, value: &str) -> Result<NavigationKey, ScriptError> {
    match value.to_ascii_lowercase().as_str() {
        "left" => Ok(NavigationKey::ArrowLeft),
        "right" => Ok(NavigationKey::ArrowRight),
        "home" => Ok(NavigationKey::Home),
        "end" => Ok(NavigationKey::End),
        _ => Err(ScriptError::InvalidValue {
            line,
            value: value.to_string(),
            kind: "key",
        }),
    }
}

//! Line-oriented event scripts for the simulator.
//!
//! A script drives the two carousels of a scanned site the way a visitor
//! would, one event per line. Blank lines and `#` comments are ignored.
//!
//! ```text
//! # open the third gallery photo, step forward, close with Escape
//! target lightbox
//! open 2
//! next
//! key Escape
//!
//! # watch the hero for ten seconds, hovering half-way through
//! target hero
//! tick 5000
//! hover enter
//! tick 5000
//! ```
//!
//! | Command | Meaning |
//! |---------|---------|
//! | `target lightbox\|hero` | Route following lines to that carousel |
//! | `open N`, `show N` | Open / show item `N` (0-based) |
//! | `next`, `prev`, `close`, `pause`, `resume`, `destroy` | Direct controller calls |
//! | `key NAME [N]` | Key press; with `N`, pressed while gallery item `N` has focus |
//! | `swipe X1 Y1 X2 Y2` | Pointer down at the first point, up at the second |
//! | `click indicator N\|item N\|close\|prev\|next\|backdrop` | Click a control |
//! | `hover enter\|leave` | Pointer enters / leaves the carousel |
//! | `tick MS` | Advance the virtual clock, at most [`MAX_TICK_MS`] per line |
//! | `loaded N`, `failed N` | Report the load outcome of item `N` |
//! | `filter NAME` | Select a gallery filter button (`all` or a category) |

use crate::input::{InputEvent, Key, Point, Target};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest single `tick`: one day of virtual time.
pub const MAX_TICK_MS: u64 = 86_400_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: usage: {usage}")]
    Usage { line: usize, usage: &'static str },
    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },
    #[error("line {line}: tick of {ms}ms exceeds {max}ms")]
    TickTooLong { line: usize, ms: u64, max: u64 },
}

impl ScriptError {
    /// 1-based line the error was found on.
    pub fn line(&self) -> usize {
        match self {
            ScriptError::UnknownCommand { line, .. }
            | ScriptError::Usage { line, .. }
            | ScriptError::InvalidNumber { line, .. }
            | ScriptError::TickTooLong { line, .. } => *line,
        }
    }
}

/// Which carousel a step is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Lightbox,
    Hero,
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Widget::Lightbox => f.write_str("lightbox"),
            Widget::Hero => f.write_str("hero"),
        }
    }
}

/// One parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Target(Widget),
    Open(usize),
    Show(usize),
    Next,
    Prev,
    Close,
    Pause,
    Resume,
    Destroy,
    /// Raw input routed through the carousel's input adapter.
    Input(InputEvent),
    /// A complete pointer gesture.
    Swipe { start: Point, end: Point },
    Tick(u64),
    Loaded(usize),
    Failed(usize),
    Filter(String),
}

/// A step together with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    /// Source text with comments and surrounding whitespace removed.
    pub text: String,
    pub step: Step,
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub lines: Vec<ScriptLine>,
}

impl Script {
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.lines.iter().map(|l| &l.step)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_script(s)
    }
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(text: &str) -> Result<Script, ScriptError> {
    let mut lines = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let content = raw.split_once('#').map_or(raw, |(before, _)| before).trim();
        if content.is_empty() {
            continue;
        }
        let step = parse_step(content, line)?;
        lines.push(ScriptLine {
            line,
            text: content.to_string(),
            step,
        });
    }
    Ok(Script { lines })
}

/// Parse one non-empty, comment-free line.
pub fn parse_step(content: &str, line: usize) -> Result<Step, ScriptError> {
    let words: Vec<&str> = content.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Err(ScriptError::Usage {
            line,
            usage: "<command> [args...]",
        });
    };
    let usage = |usage: &'static str| ScriptError::Usage { line, usage };

    let step = match (command, args) {
        ("target", ["lightbox"]) => Step::Target(Widget::Lightbox),
        ("target", ["hero"]) => Step::Target(Widget::Hero),
        ("target", _) => return Err(usage("target lightbox|hero")),

        ("open", [n]) => Step::Open(number(n, line)?),
        ("open", _) => return Err(usage("open N")),
        ("show", [n]) => Step::Show(number(n, line)?),
        ("show", _) => return Err(usage("show N")),

        ("next", []) => Step::Next,
        ("prev", []) => Step::Prev,
        ("close", []) => Step::Close,
        ("pause", []) => Step::Pause,
        ("resume", []) => Step::Resume,
        ("destroy", []) => Step::Destroy,
        ("next" | "prev" | "close" | "pause" | "resume" | "destroy", _) => {
            return Err(usage("next|prev|close|pause|resume|destroy take no arguments"));
        }

        ("key", [name]) => Step::Input(InputEvent::Key(parse_key(name))),
        ("key", [name, n]) => Step::Input(InputEvent::ItemKey {
            index: number(n, line)?,
            key: parse_key(name),
        }),
        ("key", _) => return Err(usage("key NAME [N]")),

        ("swipe", [x1, y1, x2, y2]) => Step::Swipe {
            start: Point::new(coordinate(x1, line)?, coordinate(y1, line)?),
            end: Point::new(coordinate(x2, line)?, coordinate(y2, line)?),
        },
        ("swipe", _) => return Err(usage("swipe X1 Y1 X2 Y2")),

        ("click", ["indicator", n]) => {
            Step::Input(InputEvent::Click(Target::Indicator(number(n, line)?)))
        }
        ("click", ["item", n]) => Step::Input(InputEvent::Click(Target::Item(number(n, line)?))),
        ("click", ["close"]) => Step::Input(InputEvent::Click(Target::Close)),
        ("click", ["prev"]) => Step::Input(InputEvent::Click(Target::Prev)),
        ("click", ["next"]) => Step::Input(InputEvent::Click(Target::Next)),
        ("click", ["backdrop"]) => Step::Input(InputEvent::Click(Target::Backdrop)),
        ("click", _) => {
            return Err(usage("click indicator N|item N|close|prev|next|backdrop"));
        }

        ("hover", ["enter"]) => Step::Input(InputEvent::PointerEnter),
        ("hover", ["leave"]) => Step::Input(InputEvent::PointerLeave),
        ("hover", _) => return Err(usage("hover enter|leave")),

        ("tick", [ms]) => Step::Tick(tick(ms, line)?),
        ("tick", _) => return Err(usage("tick MS")),

        ("loaded", [n]) => Step::Loaded(number(n, line)?),
        ("loaded", _) => return Err(usage("loaded N")),
        ("failed", [n]) => Step::Failed(number(n, line)?),
        ("failed", _) => return Err(usage("failed N")),

        ("filter", [name]) => Step::Filter((*name).to_string()),
        ("filter", _) => return Err(usage("filter NAME")),

        (other, _) => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(step)
}

fn parse_key(name: &str) -> Key {
    match name.parse() {
        Ok(key) => key,
        Err(never) => match never {},
    }
}

fn number<N: FromStr>(value: &str, line: usize) -> Result<N, ScriptError> {
    value.parse().map_err(|_| ScriptError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

fn tick(value: &str, line: usize) -> Result<u64, ScriptError> {
    let ms: u64 = number(value, line)?;
    if ms > MAX_TICK_MS {
        return Err(ScriptError::TickTooLong {
            line,
            ms,
            max: MAX_TICK_MS,
        });
    }
    Ok(ms)
}

fn coordinate(value: &str, line: usize) -> Result<f64, ScriptError> {
    let v: f64 = number(value, line)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ScriptError::InvalidNumber {
            line,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(text: &str) -> Vec<Step> {
        parse_script(text).unwrap().lines.into_iter().map(|l| l.step).collect()
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(
            steps("target lightbox\nopen 2\nnext\nprev\nshow 0\nclose"),
            vec![
                Step::Target(Widget::Lightbox),
                Step::Open(2),
                Step::Next,
                Step::Prev,
                Step::Show(0),
                Step::Close,
            ]
        );
    }

    #[test]
    fn comments_and_blank_lines_skipped() {
        let script = parse_script("# intro\n\n  next   # trailing\n").unwrap();
        assert_eq!(script.len(), 1);
        assert_eq!(script.lines[0].line, 3);
        assert_eq!(script.lines[0].text, "next");
        assert_eq!(script.lines[0].step, Step::Next);
    }

    #[test]
    fn key_with_and_without_focus() {
        assert_eq!(
            steps("key Escape\nkey Enter 3"),
            vec![
                Step::Input(InputEvent::Key(Key::Escape)),
                Step::Input(InputEvent::ItemKey {
                    index: 3,
                    key: Key::Enter
                }),
            ]
        );
    }

    #[test]
    fn swipe_coordinates() {
        assert_eq!(
            steps("swipe 200 100 140 90"),
            vec![Step::Swipe {
                start: Point::new(200.0, 100.0),
                end: Point::new(140.0, 90.0),
            }]
        );
    }

    #[test]
    fn click_targets() {
        assert_eq!(
            steps("click indicator 1\nclick item 4\nclick backdrop"),
            vec![
                Step::Input(InputEvent::Click(Target::Indicator(1))),
                Step::Input(InputEvent::Click(Target::Item(4))),
                Step::Input(InputEvent::Click(Target::Backdrop)),
            ]
        );
    }

    #[test]
    fn timing_loading_and_filter() {
        assert_eq!(
            steps("tick 5000\nloaded 1\nfailed 2\nfilter rooms\nhover enter"),
            vec![
                Step::Tick(5_000),
                Step::Loaded(1),
                Step::Failed(2),
                Step::Filter("rooms".into()),
                Step::Input(InputEvent::PointerEnter),
            ]
        );
    }

    #[test]
    fn unknown_command_reports_line() {
        let err = parse_script("next\n\njump 3").unwrap_err();
        assert_eq!(
            err,
            ScriptError::UnknownCommand {
                line: 3,
                command: "jump".into()
            }
        );
        assert_eq!(err.to_string(), "line 3: unknown command 'jump'");
    }

    #[test]
    fn bad_number_reports_line() {
        let err = parse_script("open two").unwrap_err();
        assert_eq!(err.line(), 1);
        assert!(matches!(err, ScriptError::InvalidNumber { .. }));
    }

    #[test]
    fn negative_index_rejected() {
        assert!(matches!(
            parse_script("show -1"),
            Err(ScriptError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn wrong_arity_is_usage_error() {
        assert!(matches!(
            parse_script("next 2"),
            Err(ScriptError::Usage { line: 1, .. })
        ));
        assert!(matches!(
            parse_script("swipe 1 2 3"),
            Err(ScriptError::Usage { line: 1, .. })
        ));
        assert!(matches!(
            parse_script("target gallery"),
            Err(ScriptError::Usage { line: 1, .. })
        ));
    }

    #[test]
    fn non_finite_coordinates_rejected() {
        assert!(matches!(
            parse_script("swipe NaN 0 0 0"),
            Err(ScriptError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn oversized_tick_rejected() {
        assert_eq!(steps("tick 86400000"), vec![Step::Tick(MAX_TICK_MS)]);
        let err = parse_script("tick 1\ntick 86400001").unwrap_err();
        assert_eq!(err.line(), 2);
        assert!(matches!(err, ScriptError::TickTooLong { ms: 86_400_001, .. }));
    }

    #[test]
    fn script_from_str() {
        let script: Script = "pause\nresume".parse().unwrap();
        assert_eq!(script.steps().count(), 2);
    }
}

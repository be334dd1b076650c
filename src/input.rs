//! Translation of raw input into carousel commands.
//!
//! The host forwards keyboard, pointer and click events as [`InputEvent`]s;
//! [`InputAdapter`] turns each into at most one [`Command`] and applies it
//! through the [`Carousel`] capability trait.
//!
//! | Input | Lightbox | Slideshow |
//! |-------|----------|-----------|
//! | `ArrowLeft` / `ArrowRight` | prev / next (only while open) | prev / next |
//! | `Escape` | close | ignored |
//! | `Enter` / `Space` on a gallery item | open that item | ignored |
//! | horizontal swipe past the threshold | next (leftwards) / prev | same |
//! | indicator dot click | show | show |
//! | item click | open | show |
//! | prev / next / close buttons, backdrop | prev / next / close / close | prev / next / - / - |
//! | pointer enter / leave | ignored | pause / resume (if enabled) |
//!
//! Navigation commands go through `next`/`prev`/`show`/`open`, each of which
//! restarts a running autoplay timer, so manual navigation always resets the
//! automatic cadence.

use crate::config::SwipeConfig;
use crate::controller::{Carousel, Variant};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Keys the carousels care about. Everything else is [`Key::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Space,
    Other(String),
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    /// Parse a DOM `KeyboardEvent.key` value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            other => Key::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::Escape => f.write_str("Escape"),
            Key::Enter => f.write_str("Enter"),
            Key::Space => f.write_str("Space"),
            Key::Other(name) => f.write_str(name),
        }
    }
}

/// Pointer position in host units (CSS pixels in a browser).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Clickable control of a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Indicator dot for the item at this index.
    Indicator(usize),
    /// The item itself (gallery thumbnail or slide).
    Item(usize),
    Close,
    Prev,
    Next,
    /// The overlay area around the lightbox image.
    Backdrop,
}

/// Raw input forwarded by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key pressed anywhere on the page.
    Key(Key),
    /// A key pressed while a gallery item has focus.
    ItemKey { index: usize, key: Key },
    PointerDown(Point),
    PointerUp(Point),
    /// The gesture was interrupted; forget its start point.
    PointerCancel,
    Click(Target),
    PointerEnter,
    PointerLeave,
}

/// Carousel operation produced by an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Show(usize),
    Open(usize),
    Close,
    Pause,
    Resume,
}

impl Command {
    /// Apply the command through the capability interface.
    pub fn apply<C: Carousel + ?Sized>(self, carousel: &mut C) {
        match self {
            Command::Next => carousel.next(),
            Command::Prev => carousel.prev(),
            Command::Show(index) => carousel.show(index),
            Command::Open(index) => carousel.open(index),
            Command::Close => carousel.close(),
            Command::Pause => carousel.pause(),
            Command::Resume => carousel.resume(),
        }
    }
}

/// Direction of a recognised swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved leftwards: show the next item.
    Left,
    /// Finger moved rightwards: show the previous item.
    Right,
}

/// Classify a gesture from `start` to `end`.
///
/// A swipe needs more than `threshold` units of horizontal travel and must
/// be horizontal-dominant (`|dx| > |dy|`), so vertical scrolling never
/// navigates.
pub fn classify_swipe(start: Point, end: Point, threshold: f64) -> Option<Swipe> {
    let dx = start.x - end.x;
    let dy = start.y - end.y;
    if dx.abs() <= dy.abs() {
        return None;
    }
    if dx > threshold {
        Some(Swipe::Left)
    } else if dx < -threshold {
        Some(Swipe::Right)
    } else {
        None
    }
}

/// Stateful translator from [`InputEvent`] to [`Command`] for one carousel.
#[derive(Debug, Clone)]
pub struct InputAdapter {
    variant: Variant,
    threshold: f64,
    pause_on_hover: bool,
    gesture_start: Option<Point>,
}

impl InputAdapter {
    pub fn new(variant: Variant, swipe: &SwipeConfig) -> Self {
        Self {
            variant,
            threshold: swipe.threshold,
            pause_on_hover: variant == Variant::Slideshow,
            gesture_start: None,
        }
    }

    /// Whether hovering the slideshow pauses autoplay. Ignored for lightboxes.
    pub fn with_pause_on_hover(mut self, enabled: bool) -> Self {
        self.pause_on_hover = enabled && self.variant == Variant::Slideshow;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Turn `event` into a command without touching any carousel.
    ///
    /// `is_open` is the carousel's current [`Carousel::is_open`]; a closed
    /// lightbox only reacts to events that open it.
    pub fn translate(&mut self, event: &InputEvent, is_open: bool) -> Option<Command> {
        let lightbox = self.variant == Variant::Lightbox;
        let command = match event {
            InputEvent::Key(key) => {
                if lightbox && !is_open {
                    None
                } else {
                    match key {
                        Key::ArrowLeft => Some(Command::Prev),
                        Key::ArrowRight => Some(Command::Next),
                        Key::Escape if lightbox => Some(Command::Close),
                        _ => None,
                    }
                }
            }
            InputEvent::ItemKey { index, key } => match key {
                Key::Enter | Key::Space if lightbox => Some(Command::Open(*index)),
                _ => None,
            },
            InputEvent::PointerDown(point) => {
                self.gesture_start = Some(*point);
                None
            }
            InputEvent::PointerUp(end) => {
                let start = self.gesture_start.take()?;
                if lightbox && !is_open {
                    None
                } else {
                    classify_swipe(start, *end, self.threshold).map(|swipe| match swipe {
                        Swipe::Left => Command::Next,
                        Swipe::Right => Command::Prev,
                    })
                }
            }
            InputEvent::PointerCancel => {
                self.gesture_start = None;
                None
            }
            InputEvent::Click(target) => match target {
                Target::Indicator(index) => Some(Command::Show(*index)),
                Target::Item(index) if lightbox => Some(Command::Open(*index)),
                Target::Item(index) => Some(Command::Show(*index)),
                Target::Prev => Some(Command::Prev),
                Target::Next => Some(Command::Next),
                Target::Close | Target::Backdrop if lightbox => Some(Command::Close),
                Target::Close | Target::Backdrop => None,
            },
            InputEvent::PointerEnter if self.pause_on_hover => Some(Command::Pause),
            InputEvent::PointerLeave if self.pause_on_hover => Some(Command::Resume),
            InputEvent::PointerEnter | InputEvent::PointerLeave => None,
        };
        if command.is_none() {
            trace!(variant = ?self.variant, ?event, "input: no command");
        }
        command
    }

    /// Translate `event` and apply the resulting command to `carousel`.
    pub fn dispatch<C: Carousel + ?Sized>(
        &mut self,
        carousel: &mut C,
        event: &InputEvent,
    ) -> Option<Command> {
        let command = self.translate(event, carousel.is_open())?;
        trace!(variant = ?self.variant, ?command, "input: dispatch");
        command.apply(carousel);
        Some(command)
    }
}

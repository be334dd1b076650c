//! # Hotel Carousel
//!
//! Headless carousel engine for hotel sites: the full-screen gallery lightbox
//! and the hero slideshow, driven by one state machine. Rendering, timers and
//! input are seams the host plugs into, so the same controller runs in a
//! browser binding, in tests, and in the bundled simulator.
//!
//! # Architecture
//!
//! ```text
//! site/  ── scan ──▶  Manifest  ──▶  CarouselController × 2  ◀── InputAdapter ◀── events
//!                   (JSON-able)          │        ▲
//!                                        ▼        │ on_timer / settle
//!                                  CarouselView   Timers
//! ```
//!
//! A controller never draws anything and never reads a clock. It tells its
//! [`view::CarouselView`] what changed, asks its [`timer::Timers`] for a
//! repeating timer, and waits for the host to deliver ticks and load
//! outcomes back as method calls.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`cycler`] | Wrap-around index arithmetic for a fixed-length item set |
//! | [`controller`] | The carousel state machine and the [`controller::Carousel`] capability trait |
//! | [`view`] | Render seam, plus a recording view used by tests and the simulator |
//! | [`timer`] | Timer seam and a deterministic virtual clock |
//! | [`input`] | Keyboard, swipe, click and hover translation into commands |
//! | [`filter`] | Gallery category filter buttons |
//! | [`types`] | Image descriptors and load states shared across modules |
//! | [`naming`] | `NNN-name` filename convention parser |
//! | [`scan`] | Walks a site directory into a [`scan::Manifest`] |
//! | [`config`] | `carousel.toml` loading, validation and merging |
//! | [`script`] | Event script parser for the simulator |
//! | [`simulate`] | Runs a script against both carousels of a scanned site |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Controller, Two Variants
//!
//! The lightbox and the slideshow differ only in whether they can be idle.
//! Everything else (wrap-around, autoplay, pause, load tracking, preloading)
//! is shared, so both are a [`controller::CarouselController`] with a
//! [`controller::Variant`].
//!
//! ## Lenient Navigation
//!
//! Out-of-range indices, empty item sets and calls on a destroyed controller
//! are no-ops rather than errors. Navigation is driven by user input that
//! the page cannot validate ahead of time, and a stray click must never take
//! the page down.
//!
//! ## Host-Delivered Asynchrony
//!
//! Timer ticks and image-load completions arrive as explicit calls
//! (`on_timer`, `settle`). The controller checks the timer id against the one
//! it holds, so a tick from a timer that was replaced or cancelled can never
//! advance it.
//!
//! ## Pause Keeps the Timer
//!
//! Pausing suppresses advances but leaves the repeating timer running.
//! Resuming therefore continues on the original cadence instead of starting
//! a fresh interval.

pub mod config;
pub mod controller;
pub mod cycler;
pub mod filter;
pub mod input;
pub mod naming;
pub mod output;
pub mod scan;
pub mod script;
pub mod simulate;
pub mod timer;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;

//! CLI output formatting for scan, check and simulate.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every image is its semantic identity (positional index and alt text),
//! with the source path shown as secondary context on an indented `Source:`
//! line.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Hero (3 slides)
//!     001 Lobby at Dusk
//!         Source: hero/010-Lobby-at-Dusk.jpg
//!
//! Gallery (5 photos)
//!     001 Map
//!         Source: gallery/900-Map.png
//!     002 Deluxe King [rooms]
//!         Source: gallery/010-rooms/001-Deluxe-King.jpg
//!         Caption: King bed with a view over the bay
//!
//! Categories
//!     001 Rooms (2 photos)
//!
//! Config
//!     carousel.toml
//!     slideshow: every 4000ms, autoplay on, pause on hover on
//! ```
//!
//! ## Simulate
//!
//! ```text
//! Setup
//!     hero: show [0] Lobby at Dusk
//!
//! line 2 (lightbox, t=0ms): open 2
//!     lightbox: opened
//!     lightbox: show [2] Twin Room
//!     state: active, current [2], loading
//! ```
//!
//! Transcript indices are 0-based, matching the script.
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::config::{self, CarouselConfig};
use crate::controller::Phase;
use crate::input::Command;
use crate::scan::Manifest;
use crate::simulate::{CarouselState, Notification, Simulation, StepReport};
use crate::types::{ImageDescriptor, LoadOutcome, LoadState};
use crate::view::ViewEvent;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a section header with an optional count.
///
/// ```text
/// Hero (3 slides)
/// Categories
/// ```
fn section_header(title: &str, count: Option<(usize, &str)>) -> String {
    match count {
        Some((n, noun)) => format!("{} ({} {})", title, n, noun),
        None => title.to_string(),
    }
}

/// Format an image line: alt text when present, otherwise the source in parens.
///
/// ```text
/// 001 Lobby at Dusk
/// 002 (hero/020.jpg)
/// ```
fn image_line(index: usize, item: &ImageDescriptor) -> String {
    match item.category.as_deref() {
        Some(category) => format!("{} {} [{}]", format_index(index), item, category),
        None => format!("{} {}", format_index(index), item),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn image_block(lines: &mut Vec<String>, items: &[ImageDescriptor]) {
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{}{}", indent(1), image_line(i + 1, item)));
        lines.push(format!("{}Source: {}", indent(2), item.src));
        if item.caption != item.alt && !item.caption.is_empty() {
            lines.push(format!(
                "{}Caption: {}",
                indent(2),
                truncate_desc(&item.caption, 60)
            ));
        }
    }
}

fn config_lines(config: &CarouselConfig) -> Vec<String> {
    let mut lines = vec![format!(
        "{}slideshow: every {}ms, autoplay {}, pause on hover {}",
        indent(1),
        config.slideshow.interval_ms,
        on_off(config.slideshow.autoplay),
        on_off(config.slideshow.pause_on_hover),
    )];
    let autoplay = match config.lightbox.autoplay_ms {
        Some(ms) => format!("every {}ms", ms),
        None => "off".to_string(),
    };
    lines.push(format!(
        "{}lightbox: preload {}, autoplay {}",
        indent(1),
        on_off(config.lightbox.preload_neighbors),
        autoplay
    ));
    lines.push(format!(
        "{}swipe: threshold {}",
        indent(1),
        config.swipe.threshold
    ));
    lines
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan output showing discovered slides, photos and categories.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(section_header(
        "Hero",
        Some((manifest.hero.len(), "slides")),
    ));
    image_block(&mut lines, &manifest.hero);

    lines.push(String::new());
    lines.push(section_header(
        "Gallery",
        Some((manifest.gallery.len(), "photos")),
    ));
    image_block(&mut lines, &manifest.gallery);

    if !manifest.categories.is_empty() {
        lines.push(String::new());
        lines.push(section_header("Categories", None));
        for (i, category) in manifest.categories.iter().enumerate() {
            let count = manifest
                .gallery
                .iter()
                .filter(|item| item.category.as_deref() == Some(category.slug.as_str()))
                .count();
            lines.push(format!(
                "{}{} {} ({} photos)",
                indent(1),
                format_index(i + 1),
                category.title,
                count
            ));
        }
    }

    lines.push(String::new());
    lines.push(section_header("Config", None));
    if source_root.join(config::CONFIG_FILE).exists() {
        lines.push(format!("{}{}", indent(1), config::CONFIG_FILE));
    } else {
        lines.push(format!("{}(stock defaults)", indent(1)));
    }
    lines.extend(config_lines(&manifest.config));

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

/// One-line summary printed by `check`.
pub fn format_check_output(manifest: &Manifest) -> String {
    let mut summary = format!(
        "Site OK: {} hero slides, {} gallery photos",
        manifest.hero.len(),
        manifest.gallery.len()
    );
    if !manifest.categories.is_empty() {
        summary.push_str(&format!(" in {} categories", manifest.categories.len()));
    }
    summary
}

// ============================================================================
// Simulate output
// ============================================================================

/// Format one view notification, without the widget prefix.
pub fn format_view_event(event: &ViewEvent<ImageDescriptor>) -> String {
    match event {
        ViewEvent::Changed { index, item } => format!("show [{}] {}", index, item),
        ViewEvent::Opened => "opened".to_string(),
        ViewEvent::Closed => "closed".to_string(),
        ViewEvent::Controls { navigable: true } => "controls shown".to_string(),
        ViewEvent::Controls { navigable: false } => "controls hidden".to_string(),
        ViewEvent::Preload { index, item } => format!("preload [{}] {}", index, item),
        ViewEvent::Settled {
            index,
            outcome: LoadOutcome::Loaded,
        } => format!("loaded [{}]", index),
        ViewEvent::Settled {
            index,
            outcome: LoadOutcome::Failed,
        } => format!("failed [{}]", index),
    }
}

fn notification_line(notification: &Notification) -> String {
    format!(
        "{}{}: {}",
        indent(1),
        notification.widget,
        format_view_event(&notification.event)
    )
}

fn format_command(command: Command) -> String {
    match command {
        Command::Next => "next".to_string(),
        Command::Prev => "prev".to_string(),
        Command::Show(index) => format!("show {}", index),
        Command::Open(index) => format!("open {}", index),
        Command::Close => "close".to_string(),
        Command::Pause => "pause".to_string(),
        Command::Resume => "resume".to_string(),
    }
}

/// Format a carousel state summary.
///
/// ```text
/// active, current [2], paused, autoplay, loaded
/// ```
pub fn format_state(state: &CarouselState) -> String {
    let mut parts = vec![
        match state.phase {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::Destroyed => "destroyed",
        }
        .to_string(),
    ];
    match state.current {
        Some(index) => parts.push(format!("current [{}]", index)),
        None => parts.push("empty".to_string()),
    }
    if state.paused {
        parts.push("paused".to_string());
    }
    if state.autoplay {
        parts.push("autoplay".to_string());
    }
    match state.load {
        Some(LoadState::Loading) => parts.push("loading".to_string()),
        Some(LoadState::Settled(LoadOutcome::Loaded)) => parts.push("loaded".to_string()),
        Some(LoadState::Settled(LoadOutcome::Failed)) => parts.push("load failed".to_string()),
        None => {}
    }
    parts.join(", ")
}

/// Format the lines for a single script step.
pub fn format_step_report(report: &StepReport) -> Vec<String> {
    let mut lines = vec![format!(
        "line {} ({}, t={}ms): {}",
        report.line, report.widget, report.now_ms, report.text
    )];
    if let Some(command) = report.command {
        lines.push(format!("{}command: {}", indent(1), format_command(command)));
    }
    lines.extend(report.notifications.iter().map(notification_line));
    if let Some(filter) = &report.filter {
        let shown = if filter.visible.is_empty() {
            "nothing shown".to_string()
        } else {
            let indices: Vec<String> = filter.visible.iter().map(|i| format!("[{}]", i)).collect();
            format!("showing {}", indices.join(" "))
        };
        lines.push(format!("{}filter {}: {}", indent(1), filter.active, shown));
    }
    lines.push(format!("{}state: {}", indent(1), format_state(&report.state)));
    lines
}

/// Format a full simulation transcript.
pub fn format_simulation(simulation: &Simulation) -> Vec<String> {
    let mut lines = Vec::new();
    if !simulation.setup.is_empty() {
        lines.push("Setup".to_string());
        lines.extend(simulation.setup.iter().map(notification_line));
    }
    for report in &simulation.steps {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(format_step_report(report));
    }
    lines
}

/// Print a simulation transcript to stdout.
pub fn print_simulation(simulation: &Simulation) {
    for line in format_simulation(simulation) {
        println!("{}", line);
    }
}

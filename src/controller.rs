//! Carousel controller shared by the lightbox and the hero slideshow.
//!
//! Both widgets are the same machine: an ordered item set, one current index
//! owned by an [`IndexCycler`], an optional autoplay timer, and a pause flag.
//! They differ only in their top-level lifecycle:
//!
//! ```text
//!              open(i)                      close()
//! Lightbox:  Idle ──────────▶ Active ──────────────▶ Idle
//! Slideshow:                  Active  (from construction, never idle)
//!
//! Either:    ── destroy() ──▶ Destroyed  (timer cancelled, inert forever)
//! ```
//!
//! `pause`/`resume` toggle a sub-state of `Active`. While paused the autoplay
//! timer keeps firing but ticks do not advance; the timer is never cancelled
//! just because the carousel is paused.
//!
//! ## Timer Ownership
//!
//! At most one autoplay timer exists per controller. Starting autoplay again,
//! or navigating manually, cancels the current timer before scheduling a new
//! one, which resets the automatic cadence. `close`, `destroy` and `Drop`
//! cancel synchronously. Ticks carrying any id other than the one currently
//! held are ignored.
//!
//! ## Leniency
//!
//! Nothing here returns an error. Operations on an empty item set, on a
//! destroyed controller, or on an idle lightbox are no-ops, and out-of-range
//! indices leave the current index where it was.

use crate::cycler::IndexCycler;
use crate::timer::{ManualTimers, TimerId, Timers};
use crate::types::{LoadOutcome, LoadState};
use crate::view::CarouselView;
use tracing::{debug, trace};

/// Which widget a controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Full-screen image viewer with an overlay that opens and closes.
    Lightbox,
    /// Hero slideshow, always visible once initialized.
    Slideshow,
}

/// Top-level lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Destroyed,
}

/// An item together with its visibility flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T> {
    pub source: T,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy)]
struct Autoplay {
    id: TimerId,
    interval_ms: u64,
}

/// Capability interface shared by every carousel implementation.
///
/// The input adapter only talks to this trait, so a host can put its own
/// object (or a set of closures) behind it instead of [`CarouselController`].
pub trait Carousel {
    fn next(&mut self);
    fn prev(&mut self);
    fn show(&mut self, index: usize);
    fn destroy(&mut self);

    fn open(&mut self, index: usize) {
        self.show(index);
    }

    fn close(&mut self) {}

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    /// Whether the carousel currently accepts navigation.
    fn is_open(&self) -> bool {
        true
    }
}

/// Generic carousel state machine.
///
/// `V` receives render notifications, `S` provides the autoplay timer.
pub struct CarouselController<T, V, S>
where
    S: Timers,
{
    variant: Variant,
    phase: Phase,
    items: Vec<Item<T>>,
    cycler: IndexCycler,
    paused: bool,
    autoplay: Option<Autoplay>,
    load: Option<LoadState>,
    preload_neighbors: bool,
    view: V,
    timers: S,
}

impl<T, V, S> CarouselController<T, V, S>
where
    V: CarouselView<T>,
    S: Timers,
{
    /// A lightbox over `items`, initially idle (overlay hidden).
    pub fn lightbox(items: Vec<T>, view: V, timers: S) -> Self {
        Self::build(Variant::Lightbox, Phase::Idle, items, view, timers)
    }

    /// A slideshow over `items`, active immediately and showing the first item.
    pub fn slideshow(items: Vec<T>, view: V, timers: S) -> Self {
        let mut controller = Self::build(Variant::Slideshow, Phase::Active, items, view, timers);
        if !controller.is_inert() {
            controller.render();
        }
        controller
    }

    fn build(variant: Variant, phase: Phase, items: Vec<T>, view: V, timers: S) -> Self {
        let items: Vec<Item<T>> = items
            .into_iter()
            .map(|source| Item {
                source,
                visible: false,
            })
            .collect();
        debug!(?variant, items = items.len(), "carousel: created");
        Self {
            variant,
            phase,
            cycler: IndexCycler::new(items.len()),
            items,
            paused: false,
            autoplay: None,
            load: None,
            preload_neighbors: true,
            view,
            timers,
        }
    }

    /// Enable or disable neighbour preloading after each show.
    pub fn with_preload(mut self, enabled: bool) -> Self {
        self.preload_neighbors = enabled;
        self
    }

    // ------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cycler.current()
    }

    pub fn current_item(&self) -> Option<&T> {
        self.cycler
            .current()
            .and_then(|i| self.items.get(i))
            .map(|item| &item.source)
    }

    /// Indices of items currently flagged visible (at most one).
    pub fn visible_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.visible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Loading state of the current item, `None` before the first show.
    pub fn load_state(&self) -> Option<LoadState> {
        self.load
    }

    /// The autoplay timer currently held, if any.
    pub fn autoplay_timer(&self) -> Option<TimerId> {
        self.autoplay.map(|a| a.id)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn timers(&self) -> &S {
        &self.timers
    }

    fn is_inert(&self) -> bool {
        self.phase == Phase::Destroyed || self.items.is_empty()
    }

    fn can_navigate(&self) -> bool {
        !self.is_inert() && self.phase == Phase::Active
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Open the carousel at `index`.
    ///
    /// For a lightbox this shows the overlay first. An out-of-range index
    /// opens at the current index instead.
    pub fn open(&mut self, index: usize) {
        if self.is_inert() {
            return;
        }
        if self.phase == Phase::Idle {
            self.phase = Phase::Active;
            debug!(variant = ?self.variant, index, "carousel: opened");
            self.view.opened();
            self.view.controls(self.items.len() > 1);
        }
        self.cycler.jump_to(index);
        self.render();
        self.restart_autoplay();
    }

    /// Show the item at `index`, ignoring out-of-range indices.
    pub fn show(&mut self, index: usize) {
        if !self.can_navigate() {
            return;
        }
        self.cycler.jump_to(index);
        debug!(variant = ?self.variant, index, current = ?self.cycler.current(), "carousel: show");
        self.render();
        self.restart_autoplay();
    }

    /// Advance to the next item, wrapping after the last.
    pub fn next(&mut self) {
        if !self.can_navigate() {
            return;
        }
        self.step_forward();
        self.restart_autoplay();
    }

    /// Go back to the previous item, wrapping before the first.
    pub fn prev(&mut self) {
        if !self.can_navigate() {
            return;
        }
        let index = self.cycler.retreat();
        debug!(variant = ?self.variant, ?index, "carousel: prev");
        self.render();
        self.restart_autoplay();
    }

    /// Hide the lightbox overlay and cancel its autoplay timer.
    ///
    /// Slideshows have no idle state; closing one does nothing.
    pub fn close(&mut self) {
        if self.variant != Variant::Lightbox || self.phase != Phase::Active {
            return;
        }
        self.stop_autoplay();
        self.phase = Phase::Idle;
        self.paused = false;
        self.load = None;
        for item in &mut self.items {
            item.visible = false;
        }
        debug!("carousel: closed");
        self.view.closed();
    }

    fn step_forward(&mut self) {
        let index = self.cycler.advance();
        debug!(variant = ?self.variant, ?index, "carousel: next");
        self.render();
    }

    fn render(&mut self) {
        let Some(current) = self.cycler.current() else {
            return;
        };
        for (i, item) in self.items.iter_mut().enumerate() {
            item.visible = i == current;
        }
        self.load = Some(LoadState::Loading);
        self.view.changed(current, &self.items[current].source);
        if self.preload_neighbors {
            for neighbor in self.cycler.neighbors() {
                self.view.preload(neighbor, &self.items[neighbor].source);
            }
        }
    }

    // ------------------------------------------------------------------
    // Autoplay
    // ------------------------------------------------------------------

    /// Start advancing every `interval_ms`, replacing any running timer.
    pub fn start_autoplay(&mut self, interval_ms: u64) {
        if self.is_inert() {
            return;
        }
        self.stop_autoplay();
        let id = self.timers.start_repeating(interval_ms);
        debug!(variant = ?self.variant, %id, interval_ms, "carousel: autoplay started");
        self.autoplay = Some(Autoplay { id, interval_ms });
    }

    /// Cancel the autoplay timer, if any.
    pub fn stop_autoplay(&mut self) {
        if let Some(autoplay) = self.autoplay.take() {
            self.timers.cancel(autoplay.id);
            debug!(variant = ?self.variant, id = %autoplay.id, "carousel: autoplay cancelled");
        }
    }

    fn restart_autoplay(&mut self) {
        if let Some(autoplay) = self.autoplay {
            self.start_autoplay(autoplay.interval_ms);
        }
    }

    /// Suppress autoplay advances. The timer keeps running.
    pub fn pause(&mut self) {
        if self.is_inert() {
            return;
        }
        self.paused = true;
        debug!(variant = ?self.variant, "carousel: paused");
    }

    /// Let autoplay advance again.
    pub fn resume(&mut self) {
        if self.is_inert() {
            return;
        }
        self.paused = false;
        debug!(variant = ?self.variant, "carousel: resumed");
    }

    /// Handle a timer tick delivered by the host.
    ///
    /// Returns `true` if the tick advanced the carousel.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.autoplay.map(|a| a.id) != Some(id) {
            trace!(%id, "carousel: stale timer tick ignored");
            return false;
        }
        if self.paused {
            trace!(%id, "carousel: tick suppressed while paused");
            return false;
        }
        if !self.can_navigate() {
            return false;
        }
        self.step_forward();
        true
    }

    // ------------------------------------------------------------------
    // Asset loading
    // ------------------------------------------------------------------

    /// Record the load outcome of the item at `index`.
    ///
    /// The loading indicator stops whether or not the asset loaded. Reports
    /// for anything other than the current item are stale and ignored.
    pub fn settle(&mut self, index: usize, outcome: LoadOutcome) {
        if !self.can_navigate() || self.cycler.current() != Some(index) {
            return;
        }
        if self.load != Some(LoadState::Loading) {
            return;
        }
        if outcome == LoadOutcome::Failed {
            debug!(index, "carousel: asset failed to load, settling anyway");
        }
        self.load = Some(LoadState::Settled(outcome));
        self.view.settled(index, outcome);
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Cancel the autoplay timer and make the controller inert. Idempotent.
    pub fn destroy(&mut self) {
        if self.phase == Phase::Destroyed {
            return;
        }
        self.stop_autoplay();
        self.phase = Phase::Destroyed;
        debug!(variant = ?self.variant, "carousel: destroyed");
    }
}

impl<T, V> CarouselController<T, V, ManualTimers>
where
    V: CarouselView<T>,
{
    /// Advance the virtual clock by `ms`, delivering every tick due in between.
    ///
    /// Returns how many ticks advanced the carousel.
    pub fn advance_clock(&mut self, ms: u64) -> usize {
        let until = self.timers.now_ms().saturating_add(ms);
        let mut advanced = 0;
        while let Some(id) = self.timers.fire_next(until) {
            if self.on_timer(id) {
                advanced += 1;
            }
        }
        self.timers.settle_at(until);
        advanced
    }
}

impl<T, V, S> Carousel for CarouselController<T, V, S>
where
    V: CarouselView<T>,
    S: Timers,
{
    fn next(&mut self) {
        CarouselController::next(self)
    }

    fn prev(&mut self) {
        CarouselController::prev(self)
    }

    fn show(&mut self, index: usize) {
        CarouselController::show(self, index)
    }

    fn destroy(&mut self) {
        CarouselController::destroy(self)
    }

    fn open(&mut self, index: usize) {
        CarouselController::open(self, index)
    }

    fn close(&mut self) {
        CarouselController::close(self)
    }

    fn pause(&mut self) {
        CarouselController::pause(self)
    }

    fn resume(&mut self) {
        CarouselController::resume(self)
    }

    fn is_open(&self) -> bool {
        self.is_active()
    }
}

impl<T, V, S> Drop for CarouselController<T, V, S>
where
    S: Timers,
{
    fn drop(&mut self) {
        if let Some(autoplay) = self.autoplay.take() {
            self.timers.cancel(autoplay.id);
        }
    }
}

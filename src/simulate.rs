//! Headless page simulator.
//!
//! Builds the two carousels a hotel page carries from a scanned [`Manifest`]:
//! a lightbox over the gallery and a slideshow over the hero slides. It then
//! replays a [`Script`] against them. Each carousel owns a [`ManualTimers`]
//! virtual clock; `tick` advances both clocks together so the hero keeps
//! cycling while the lightbox is in use, as it would on a real page.
//!
//! Every step yields a [`StepReport`] with the view notifications it caused
//! and the state of the targeted carousel afterwards. `output` renders the
//! reports as a transcript.

use crate::config::CarouselConfig;
use crate::controller::{CarouselController, Phase};
use crate::filter::{self, GalleryFilter};
use crate::input::{Command, InputAdapter, InputEvent};
use crate::scan::{self, Manifest, ScanError};
use crate::script::{self, Script, ScriptError, ScriptLine, Step, Widget};
use crate::timer::ManualTimers;
use crate::types::{ImageDescriptor, LoadOutcome, LoadState};
use crate::view::{Transcript, ViewEvent};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SimulateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),
}

/// Controller type both simulated carousels use.
pub type SimCarousel =
    CarouselController<ImageDescriptor, Transcript<ImageDescriptor>, ManualTimers>;

/// A view notification tagged with the carousel that emitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub widget: Widget,
    pub event: ViewEvent<ImageDescriptor>,
}

/// State of one carousel after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub phase: Phase,
    pub current: Option<usize>,
    pub paused: bool,
    pub autoplay: bool,
    pub load: Option<LoadState>,
}

impl CarouselState {
    fn of(carousel: &SimCarousel) -> Self {
        Self {
            phase: carousel.phase(),
            current: carousel.current_index(),
            paused: carousel.is_paused(),
            autoplay: carousel.autoplay_timer().is_some(),
            load: carousel.load_state(),
        }
    }
}

/// Gallery filter state after a `filter` step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    pub active: String,
    pub visible: Vec<usize>,
}

/// What one script line did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub line: usize,
    pub text: String,
    /// Carousel the step was routed to.
    pub widget: Widget,
    /// Command an input step translated to, if any.
    pub command: Option<Command>,
    pub notifications: Vec<Notification>,
    pub state: CarouselState,
    pub filter: Option<FilterReport>,
    /// Virtual time after the step.
    pub now_ms: u64,
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    /// Notifications emitted while building the carousels.
    pub setup: Vec<Notification>,
    pub steps: Vec<StepReport>,
}

/// The simulated page.
pub struct Simulator {
    lightbox: SimCarousel,
    hero: SimCarousel,
    lightbox_input: InputAdapter,
    hero_input: InputAdapter,
    gallery: Vec<ImageDescriptor>,
    filter: GalleryFilter,
    config: CarouselConfig,
    target: Widget,
}

impl Simulator {
    /// Build both carousels from `manifest`, starting hero autoplay if configured.
    pub fn new(manifest: &Manifest) -> Self {
        let config = manifest.config.clone();

        let lightbox = SimCarousel::lightbox(
            manifest.gallery.clone(),
            Transcript::new(),
            ManualTimers::new(),
        )
        .with_preload(config.lightbox.preload_neighbors);

        let mut hero =
            SimCarousel::slideshow(manifest.hero.clone(), Transcript::new(), ManualTimers::new())
                .with_preload(false);
        if config.slideshow.autoplay {
            hero.start_autoplay(config.slideshow.interval_ms);
        }

        let lightbox_input = InputAdapter::new(lightbox.variant(), &config.swipe);
        let hero_input = InputAdapter::new(hero.variant(), &config.swipe)
            .with_pause_on_hover(config.slideshow.pause_on_hover);

        debug!(
            gallery = manifest.gallery.len(),
            hero = manifest.hero.len(),
            "simulate: page built"
        );

        Self {
            lightbox,
            hero,
            lightbox_input,
            hero_input,
            gallery: manifest.gallery.clone(),
            filter: GalleryFilter::new(),
            config,
            target: Widget::Lightbox,
        }
    }

    pub fn lightbox(&self) -> &SimCarousel {
        &self.lightbox
    }

    pub fn hero(&self) -> &SimCarousel {
        &self.hero
    }

    pub fn filter(&self) -> &GalleryFilter {
        &self.filter
    }

    /// Carousel that steps are currently routed to.
    pub fn target(&self) -> Widget {
        self.target
    }

    /// Virtual time elapsed since the page was built.
    pub fn now_ms(&self) -> u64 {
        self.hero.timers().now_ms()
    }

    /// Take notifications emitted so far (the hero's first slide on a fresh page).
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut out: Vec<Notification> = self
            .lightbox
            .view_mut()
            .drain()
            .into_iter()
            .map(|event| Notification {
                widget: Widget::Lightbox,
                event,
            })
            .collect();
        out.extend(self.hero.view_mut().drain().into_iter().map(|event| Notification {
            widget: Widget::Hero,
            event,
        }));
        out
    }

    /// Run every line of `script`.
    pub fn run(&mut self, script: &Script) -> Simulation {
        let setup = self.drain();
        let steps = script.lines.iter().map(|line| self.step(line)).collect();
        Simulation { setup, steps }
    }

    /// Apply one script line and report what happened.
    pub fn step(&mut self, line: &ScriptLine) -> StepReport {
        let mut command = None;
        let mut filter = None;
        let widget = self.target;

        match &line.step {
            Step::Target(next) => self.target = *next,
            Step::Open(index) => self.carousel(widget).open(*index),
            Step::Show(index) => self.carousel(widget).show(*index),
            Step::Next => self.carousel(widget).next(),
            Step::Prev => self.carousel(widget).prev(),
            Step::Close => self.carousel(widget).close(),
            Step::Pause => self.carousel(widget).pause(),
            Step::Resume => self.carousel(widget).resume(),
            Step::Destroy => self.carousel(widget).destroy(),
            Step::Input(event) => command = self.dispatch(widget, event),
            Step::Swipe { start, end } => {
                self.dispatch(widget, &InputEvent::PointerDown(*start));
                command = self.dispatch(widget, &InputEvent::PointerUp(*end));
            }
            Step::Tick(ms) => {
                let ms = if *ms > script::MAX_TICK_MS {
                    warn!(ms, max = script::MAX_TICK_MS, "simulate: tick clamped");
                    script::MAX_TICK_MS
                } else {
                    *ms
                };
                self.lightbox.advance_clock(ms);
                self.hero.advance_clock(ms);
            }
            Step::Loaded(index) => self.carousel(widget).settle(*index, LoadOutcome::Loaded),
            Step::Failed(index) => self.carousel(widget).settle(*index, LoadOutcome::Failed),
            Step::Filter(name) => filter = Some(self.select_filter(name)),
        }

        self.sync_lightbox_autoplay();

        let widget = self.target;
        StepReport {
            line: line.line,
            text: line.text.clone(),
            widget,
            command,
            notifications: self.drain(),
            state: CarouselState::of(self.carousel(widget)),
            filter,
            now_ms: self.now_ms(),
        }
    }

    fn carousel(&mut self, widget: Widget) -> &mut SimCarousel {
        match widget {
            Widget::Lightbox => &mut self.lightbox,
            Widget::Hero => &mut self.hero,
        }
    }

    fn dispatch(&mut self, widget: Widget, event: &InputEvent) -> Option<Command> {
        let (carousel, input) = match widget {
            Widget::Lightbox => (&mut self.lightbox, &mut self.lightbox_input),
            Widget::Hero => (&mut self.hero, &mut self.hero_input),
        };
        input.dispatch(carousel, event)
    }

    /// Keep an open lightbox cycling when `lightbox.autoplay_ms` is set.
    ///
    /// Closing cancels the timer inside the controller, so only starting is
    /// handled here.
    fn sync_lightbox_autoplay(&mut self) {
        let Some(interval_ms) = self.config.lightbox.autoplay_ms else {
            return;
        };
        if self.lightbox.is_active() && self.lightbox.autoplay_timer().is_none() {
            self.lightbox.start_autoplay(interval_ms);
        }
    }

    fn select_filter(&mut self, name: &str) -> FilterReport {
        if name != filter::ALL && !filter::categories(&self.gallery).contains(&name) {
            warn!(filter = name, "simulate: no gallery item has this category");
        }
        self.filter.select(name);
        FilterReport {
            active: self.filter.active().to_string(),
            visible: self.filter.visible_indices(&self.gallery),
        }
    }
}

/// Scan `root`, parse `script_text`, and run it.
pub fn simulate(root: &Path, script_text: &str) -> Result<Simulation, SimulateError> {
    let script = script::parse_script(script_text)?;
    let manifest = scan::scan(root)?;
    let mut simulator = Simulator::new(&manifest);
    Ok(simulator.run(&script))
}

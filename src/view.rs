//! Render seam between carousel state and whatever draws it.
//!
//! A controller never touches markup. After every mutation it calls into a
//! [`CarouselView`], which is responsible for swapping the visible image,
//! updating the caption and toggling active styling on indicator dots.
//!
//! Two ready-made views ship with the crate:
//!
//! - [`FnView`] wraps a `changed` closure for hosts that only care about the
//!   current item.
//! - [`Transcript`] records every notification as a [`ViewEvent`]; the
//!   simulator prints it and tests assert against it.

use crate::types::LoadOutcome;

/// Receiver of carousel notifications.
///
/// Only [`CarouselView::changed`] is required. The remaining hooks default to
/// no-ops so a slideshow view does not need to care about overlay handling.
pub trait CarouselView<T> {
    /// The current item changed (or was re-shown). Called after every mutation.
    fn changed(&mut self, index: usize, item: &T);

    /// The lightbox overlay became visible. Page-scroll locking belongs here.
    fn opened(&mut self) {}

    /// The lightbox overlay was dismissed.
    fn closed(&mut self) {}

    /// Whether prev/next controls should be shown (more than one item).
    fn controls(&mut self, _navigable: bool) {}

    /// Best-effort request to warm the cache for a neighbouring item.
    fn preload(&mut self, _index: usize, _item: &T) {}

    /// The current item's asset finished loading, successfully or not.
    fn settled(&mut self, _index: usize, _outcome: LoadOutcome) {}
}

/// Closure-backed view that only reacts to `changed`.
pub struct FnView<F>(pub F);

impl<T, F> CarouselView<T> for FnView<F>
where
    F: FnMut(usize, &T),
{
    fn changed(&mut self, index: usize, item: &T) {
        (self.0)(index, item)
    }
}

/// One recorded view notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent<T> {
    Changed { index: usize, item: T },
    Opened,
    Closed,
    Controls { navigable: bool },
    Preload { index: usize, item: T },
    Settled { index: usize, outcome: LoadOutcome },
}

/// View that records notifications in order.
#[derive(Debug, Clone)]
pub struct Transcript<T> {
    events: Vec<ViewEvent<T>>,
}

impl<T> Default for Transcript<T> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<T> Transcript<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ViewEvent<T>] {
        &self.events
    }

    /// Take everything recorded so far, leaving the transcript empty.
    pub fn drain(&mut self) -> Vec<ViewEvent<T>> {
        std::mem::take(&mut self.events)
    }

    /// Indices reported through `changed`, in order.
    pub fn changed_indices(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Changed { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }
}

impl<T: Clone> CarouselView<T> for Transcript<T> {
    fn changed(&mut self, index: usize, item: &T) {
        self.events.push(ViewEvent::Changed {
            index,
            item: item.clone(),
        });
    }

    fn opened(&mut self) {
        self.events.push(ViewEvent::Opened);
    }

    fn closed(&mut self) {
        self.events.push(ViewEvent::Closed);
    }

    fn controls(&mut self, navigable: bool) {
        self.events.push(ViewEvent::Controls { navigable });
    }

    fn preload(&mut self, index: usize, item: &T) {
        self.events.push(ViewEvent::Preload {
            index,
            item: item.clone(),
        });
    }

    fn settled(&mut self, index: usize, outcome: LoadOutcome) {
        self.events.push(ViewEvent::Settled { index, outcome });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fn_view_forwards_changed() {
        let mut seen = Vec::new();
        {
            let mut view = FnView(|index: usize, item: &&str| seen.push((index, item.to_string())));
            view.changed(2, &"C");
        }
        assert_eq!(seen, vec![(2, "C".to_string())]);
    }

    #[test]
    fn transcript_records_in_order() {
        let mut t: Transcript<&str> = Transcript::new();
        t.opened();
        t.changed(0, &"A");
        t.preload(1, &"B");
        t.settled(0, LoadOutcome::Failed);
        t.closed();
        assert_eq!(
            t.events(),
            &[
                ViewEvent::Opened,
                ViewEvent::Changed { index: 0, item: "A" },
                ViewEvent::Preload { index: 1, item: "B" },
                ViewEvent::Settled {
                    index: 0,
                    outcome: LoadOutcome::Failed
                },
                ViewEvent::Closed,
            ]
        );
    }

    #[test]
    fn drain_empties_transcript() {
        let mut t: Transcript<u8> = Transcript::new();
        t.changed(0, &1u8);
        t.changed(1, &2u8);
        assert_eq!(t.changed_indices(), vec![0, 1]);
        assert_eq!(t.drain().len(), 2);
        assert!(t.events().is_empty());
    }
}

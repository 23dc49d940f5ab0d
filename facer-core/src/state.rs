//! Latest-snapshot hand-off between the detection thread and the drawing thread.
//!
//! The slot publishes each snapshot as a fresh `Arc` through an atomic pointer
//! swap. Readers load the pointer once and get a fully built, immutable value;
//! nobody ever mutates a published snapshot in place.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use log::trace;

use crate::render::RedrawRequester;
use crate::snapshot::DetectionSnapshot;

/// Observable lifecycle of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    /// Nothing published yet; draws are no-ops.
    Empty,
    /// A snapshot is held. There is no way back to `Empty`.
    Populated,
}

/// A published snapshot tagged with the update count that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedSnapshot {
    /// 1 for the first update, incremented by every later one.
    pub generation: u64,
    pub snapshot: DetectionSnapshot,
}

/// Single-slot, last-write-wins holder for the newest detection.
pub struct SnapshotSlot {
    current: ArcSwapOption<PublishedSnapshot>,
    redraw: Box<dyn RedrawRequester>,
}

impl SnapshotSlot {
    pub fn new(redraw: impl RedrawRequester + 'static) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            redraw: Box::new(redraw),
        }
    }

    /// Replace the held snapshot, then ask for a redraw. Never blocks.
    ///
    /// The generation is derived from the snapshot being replaced inside one
    /// compare-and-swap, so concurrent writers never store an older
    /// generation over a newer one.
    pub fn publish(&self, snapshot: DetectionSnapshot) {
        let mut generation = 0;
        self.current.rcu(|current| {
            generation = current.as_ref().map_or(0, |held| held.generation) + 1;
            Some(Arc::new(PublishedSnapshot {
                generation,
                snapshot: snapshot.clone(),
            }))
        });
        trace!("published detection snapshot generation {generation}");
        self.redraw.request_redraw();
    }

    /// The newest published snapshot, read with a single atomic load.
    pub fn latest(&self) -> Option<Arc<PublishedSnapshot>> {
        self.current.load_full()
    }

    pub fn state(&self) -> OverlayState {
        if self.current.load().is_some() {
            OverlayState::Populated
        } else {
            OverlayState::Empty
        }
    }
}

impl std::fmt::Debug for SnapshotSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotSlot")
            .field("state", &self.state())
            .field("generation", &self.latest().map(|held| held.generation))
            .finish()
    }
}

/// Producer-side handle that publishes snapshots into a shared slot.
///
/// Cheap to clone so it can be moved onto the detection thread. Clones may
/// publish concurrently; the held snapshot is whichever landed last.
#[derive(Debug, Clone)]
pub struct OverlayUpdater {
    slot: Arc<SnapshotSlot>,
}

impl OverlayUpdater {
    pub(crate) fn new(slot: Arc<SnapshotSlot>) -> Self {
        Self { slot }
    }

    /// Publish the latest detection for the next draw.
    pub fn update(&self, snapshot: DetectionSnapshot) {
        self.slot.publish(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facer_utils::Point;
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread,
    };

    fn snapshot(width: f32) -> DetectionSnapshot {
        DetectionSnapshot::new(Point::new(1.0, 2.0), width, 10.0)
    }

    #[test]
    fn starts_empty_and_becomes_populated() {
        let slot = SnapshotSlot::new(crate::render::NoRedraw);
        assert_eq!(slot.state(), OverlayState::Empty);
        assert!(slot.latest().is_none());

        slot.publish(snapshot(5.0));
        assert_eq!(slot.state(), OverlayState::Populated);
        let latest = slot.latest().unwrap();
        assert_eq!(latest.generation, 1);
        assert_eq!(latest.snapshot.width, 5.0);
    }

    #[test]
    fn last_write_wins_and_requests_redraw_each_time() {
        let redraws = Arc::new(AtomicUsize::new(0));
        let counter = redraws.clone();
        let slot = SnapshotSlot::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        slot.publish(snapshot(1.0).with_nose_base(Point::new(3.0, 3.0)));
        slot.publish(snapshot(2.0));

        let latest = slot.latest().unwrap();
        assert_eq!(latest.generation, 2);
        assert_eq!(latest.snapshot.width, 2.0);
        // The second snapshot replaced the first entirely; nothing was merged.
        assert!(latest.snapshot.nose_base.is_none());
        assert_eq!(redraws.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn reader_keeps_its_snapshot_while_writer_moves_on() {
        let slot = Arc::new(SnapshotSlot::new(crate::render::NoRedraw));
        slot.publish(snapshot(1.0));
        let held = slot.latest().unwrap();

        let updater = OverlayUpdater::new(slot.clone());
        let writer = thread::spawn(move || {
            for i in 2..=100 {
                updater.update(snapshot(i as f32));
            }
        });
        writer.join().unwrap();

        assert_eq!(held.snapshot.width, 1.0);
        let latest = slot.latest().unwrap();
        assert_eq!(latest.generation, 100);
        assert_eq!(latest.snapshot.width, 100.0);
    }

    #[test]
    fn concurrent_writers_never_move_generation_backwards() {
        let slot = Arc::new(SnapshotSlot::new(crate::render::NoRedraw));
        let updater = OverlayUpdater::new(slot.clone());

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let updater = updater.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        updater.update(snapshot(i as f32));
                    }
                })
            })
            .collect();

        let mut seen = 0;
        while writers.iter().any(|writer| !writer.is_finished()) {
            if let Some(latest) = slot.latest() {
                assert!(latest.generation >= seen, "{} < {seen}", latest.generation);
                seen = latest.generation;
            }
        }
        for writer in writers {
            writer.join().unwrap();
        }

        assert_eq!(slot.latest().unwrap().generation, 1_000);
    }
}

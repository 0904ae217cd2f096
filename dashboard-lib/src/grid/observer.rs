//! Content size observation feeding auto-height adjustment.
//!
//! A [`SizeObserver`] hands out one [`Observation`] per mounted item. The
//! renderer calls [`Observation::notify`] whenever the item's content height
//! changes; the owner of the [`LayoutManager`] drains the paired
//! [`SizeEvents`] between frames. Dropping an observation detaches it, and
//! anything it sent that was not yet drained is discarded.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use log::{debug, trace};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::manager::LayoutManager;

/// A measured content height for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentResized {
    pub grid_id: String,
    pub item_id: String,
    /// Content height in pixels.
    pub height: f64,
}

type ObservationKey = (String, String);
type Tokens = Arc<DashMap<ObservationKey, u64>>;

/// Create a connected observer and event queue.
pub fn channel() -> (SizeObserver, SizeEvents) {
    let (tx, rx) = unbounded_channel();
    let active: Tokens = Arc::new(DashMap::new());
    let observer = SizeObserver {
        tx,
        active: Arc::clone(&active),
        next_token: Arc::new(AtomicU64::new(1)),
    };
    (observer, SizeEvents { rx, active })
}

/// Hands out observations; cheap to clone into render code.
#[derive(Debug, Clone)]
pub struct SizeObserver {
    tx: UnboundedSender<(u64, ContentResized)>,
    active: Tokens,
    next_token: Arc<AtomicU64>,
}

impl SizeObserver {
    /// Start observing an item. Observing an item again supersedes the
    /// earlier observation.
    pub fn observe(&self, grid_id: impl Into<String>, item_id: impl Into<String>) -> Observation {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let key = (grid_id.into(), item_id.into());
        trace!("Observing {}/{}", key.0, key.1);
        self.active.insert(key.clone(), token);

        Observation {
            key,
            token,
            tx: self.tx.clone(),
            active: Arc::clone(&self.active),
        }
    }

    /// Number of attached observations.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

/// Attachment of one item; detaches on drop.
#[derive(Debug)]
pub struct Observation {
    key: ObservationKey,
    token: u64,
    tx: UnboundedSender<(u64, ContentResized)>,
    active: Tokens,
}

impl Observation {
    pub fn grid_id(&self) -> &str {
        &self.key.0
    }

    pub fn item_id(&self) -> &str {
        &self.key.1
    }

    /// Report a content height. Returns `false` once the event queue is gone.
    pub fn notify(&self, height: f64) -> bool {
        let event = ContentResized {
            grid_id: self.key.0.clone(),
            item_id: self.key.1.clone(),
            height,
        };
        self.tx.send((self.token, event)).is_ok()
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        // Only remove our own token; a newer observation may own the key.
        self.active.remove_if(&self.key, |_, token| *token == self.token);
    }
}

/// Receiving side of [`channel`].
#[derive(Debug)]
pub struct SizeEvents {
    rx: UnboundedReceiver<(u64, ContentResized)>,
    active: Tokens,
}

impl SizeEvents {
    /// Take every pending event from live observations, keeping only the
    /// latest height per item in first-notified order.
    pub fn take_pending(&mut self) -> Vec<ContentResized> {
        let mut order: Vec<ContentResized> = Vec::new();
        let mut index: HashMap<ObservationKey, usize> = HashMap::new();

        while let Ok((token, event)) = self.rx.try_recv() {
            if !self.is_live(token, &event) {
                continue;
            }
            let key = (event.grid_id.clone(), event.item_id.clone());
            match index.get(&key) {
                Some(&slot) => order[slot].height = event.height,
                None => {
                    index.insert(key, order.len());
                    order.push(event);
                }
            }
        }
        order
    }

    /// Apply pending events to `manager`.
    ///
    /// Grids with auto-height disabled (or not registered) are skipped.
    /// Returns how many items changed height.
    pub fn drain_into(&mut self, manager: &mut LayoutManager) -> usize {
        let mut changed = 0;
        for event in self.take_pending() {
            let auto_height = manager
                .options(&event.grid_id)
                .is_some_and(|options| options.auto_height);
            if !auto_height {
                trace!("Ignoring resize of {}/{}", event.grid_id, event.item_id);
                continue;
            }
            if manager.adjust_item_height(&event.grid_id, &event.item_id, event.height) {
                changed += 1;
            }
        }
        if changed > 0 {
            debug!("Auto-height adjusted {} item(s)", changed);
        }
        changed
    }

    /// Wait for the next event from a live observation.
    ///
    /// Returns `None` once every observer handle is gone.
    pub async fn next(&mut self) -> Option<ContentResized> {
        while let Some((token, event)) = self.rx.recv().await {
            if self.is_live(token, &event) {
                return Some(event);
            }
        }
        None
    }

    fn is_live(&self, token: u64, event: &ContentResized) -> bool {
        self.active
            .get(&(event.grid_id.clone(), event.item_id.clone()))
            .is_some_and(|current| *current == token)
    }
}

/// One-shot height reconciliation right after a grid mounts.
///
/// Items whose content cannot be measured yet stay pending and are retried
/// on the next frame.
#[derive(Debug, Clone)]
pub struct MountPass {
    grid_id: String,
    pending: Vec<String>,
}

impl MountPass {
    pub fn new<I, S>(grid_id: impl Into<String>, item_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            grid_id: grid_id.into(),
            pending: item_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Measure and adjust every pending item. Returns `true` if any height
    /// changed.
    ///
    /// If the grid has auto-height disabled the pass completes without
    /// touching the layout.
    pub fn run_frame<F>(&mut self, manager: &mut LayoutManager, mut measure: F) -> bool
    where
        F: FnMut(&str) -> Option<f64>,
    {
        let auto_height = manager
            .options(&self.grid_id)
            .is_some_and(|options| options.auto_height);
        if !auto_height {
            self.pending.clear();
            return false;
        }

        let grid_id = &self.grid_id;
        let mut changed = false;
        self.pending.retain(|item_id| match measure(item_id) {
            Some(height) => {
                changed |= manager.adjust_item_height(grid_id, item_id, height);
                false
            }
            None => true,
        });

        if !self.pending.is_empty() {
            trace!(
                "Mount pass for {} deferred {} item(s)",
                self.grid_id,
                self.pending.len()
            );
        }
        changed
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Items still waiting for a measurement.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }
}

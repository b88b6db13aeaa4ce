//! Frame sequence loading
//!
//! `FrameLoader` fetches whole frame sequences for item ids. Requests are
//! non-blocking: callers `request()` an id and later `poll()` for outcomes.
//! In `Pool` mode the fetches run on background threads; in `Inline` mode
//! they run on the caller's thread during `poll()`, which keeps virtual-time
//! tests and trace replays deterministic.
//!
//! Either way, outcomes are handed back on the polling thread, so cache
//! mutation stays serialized with the rest of the controller.

pub mod worker;

use std::collections::{HashSet, VecDeque};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::PreviewError;
use super::provider::{fetch_sequence, SharedProvider};
use super::{FrameSequence, ItemId};

pub use worker::DEFAULT_POOL_SIZE;
use worker::spawn_worker_pool;

/// Where fetches run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderMode {
    /// Run queued loads on the polling thread
    Inline,
    /// Run loads on a pool of this many background threads
    Pool(usize),
}

impl LoaderMode {
    /// `0` workers means inline loading.
    pub fn from_workers(workers: usize) -> Self {
        if workers == 0 {
            Self::Inline
        } else {
            Self::Pool(workers)
        }
    }
}

impl Default for LoaderMode {
    fn default() -> Self {
        Self::Pool(DEFAULT_POOL_SIZE)
    }
}

/// Result of one load attempt
#[derive(Debug)]
pub struct LoadOutcome {
    /// The id that was requested
    pub id: ItemId,
    /// The complete sequence, or the first frame failure
    pub result: Result<FrameSequence, PreviewError>,
}

/// What became of a `request()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    /// A new load was started
    Queued,
    /// A load for the same id is already running and will serve this request
    InFlight,
    /// The workers are gone; no outcome will ever arrive
    Dropped,
}

enum Dispatch {
    Inline {
        provider: SharedProvider,
        queue: VecDeque<ItemId>,
    },
    Pool {
        request_tx: Sender<ItemId>,
        result_rx: Receiver<LoadOutcome>,
    },
}

/// Non-blocking frame sequence loader.
pub struct FrameLoader {
    frame_count: usize,
    /// Ids currently being loaded
    pending: HashSet<ItemId>,
    dispatch: Dispatch,
}

impl FrameLoader {
    /// Create a loader fetching `frame_count` frames per item.
    pub fn new(provider: SharedProvider, frame_count: usize, mode: LoaderMode) -> Self {
        let dispatch = match mode {
            LoaderMode::Inline => Dispatch::Inline {
                provider,
                queue: VecDeque::new(),
            },
            LoaderMode::Pool(threads) => {
                let (request_tx, request_rx) = channel::<ItemId>();
                let (result_tx, result_rx) = channel::<LoadOutcome>();
                let job = Arc::new(move |id: &ItemId| LoadOutcome {
                    id: id.clone(),
                    result: fetch_sequence(provider.as_ref(), id, frame_count),
                });
                spawn_worker_pool(threads, request_rx, result_tx, job);
                Dispatch::Pool {
                    request_tx,
                    result_rx,
                }
            }
        };

        Self {
            frame_count,
            pending: HashSet::new(),
            dispatch,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Request a sequence to be loaded (non-blocking).
    ///
    /// A load for an id that is already in flight is not repeated; the
    /// existing load's outcome serves both callers.
    pub fn request(&mut self, id: ItemId) -> RequestStatus {
        if self.pending.contains(&id) {
            debug!(item = %id, "preview load already in flight");
            return RequestStatus::InFlight;
        }

        match &mut self.dispatch {
            Dispatch::Inline { queue, .. } => queue.push_back(id.clone()),
            Dispatch::Pool { request_tx, .. } => {
                if request_tx.send(id.clone()).is_err() {
                    warn!(item = %id, "preview workers have exited; dropping load");
                    return RequestStatus::Dropped;
                }
            }
        }
        debug!(item = %id, "requested preview load");
        self.pending.insert(id);
        RequestStatus::Queued
    }

    /// Check if an id is currently being loaded
    pub fn is_pending(&self, id: &ItemId) -> bool {
        self.pending.contains(id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Collect finished loads without blocking.
    ///
    /// In inline mode this is where queued loads actually run.
    pub fn poll(&mut self) -> Vec<LoadOutcome> {
        let mut finished = Vec::new();
        let mut disconnected = false;
        match &mut self.dispatch {
            Dispatch::Inline { provider, queue } => {
                while let Some(id) = queue.pop_front() {
                    let result = fetch_sequence(provider.as_ref(), &id, self.frame_count);
                    finished.push(LoadOutcome { id, result });
                }
            }
            Dispatch::Pool { result_rx, .. } => loop {
                match result_rx.try_recv() {
                    Ok(outcome) => finished.push(outcome),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            },
        }

        let mut finished = self.accept(finished);
        if disconnected {
            finished.extend(self.fail_pending());
        }
        finished
    }

    /// Like `poll()`, but waits up to `timeout` for at least one pooled
    /// load to finish when nothing is ready yet.
    ///
    /// If every worker has exited, the pending loads are reported as failed
    /// straight away instead.
    pub fn wait(&mut self, timeout: Duration) -> Vec<LoadOutcome> {
        // A disconnected channel is picked up by the `poll()` below
        let first = match &self.dispatch {
            Dispatch::Pool { result_rx, .. } if !self.pending.is_empty() => {
                match result_rx.recv_timeout(timeout) {
                    Ok(outcome) => Some(outcome),
                    Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
                }
            }
            _ => None,
        };

        let mut finished = match first {
            Some(outcome) => self.accept(vec![outcome]),
            None => Vec::new(),
        };
        finished.extend(self.poll());
        finished
    }

    /// Forget every in-flight load. Outcomes that still arrive for them
    /// are discarded.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
        if let Dispatch::Inline { queue, .. } = &mut self.dispatch {
            queue.clear();
        }
    }

    /// Fail every pending load. Used once no worker is left to finish them.
    fn fail_pending(&mut self) -> Vec<LoadOutcome> {
        if !self.pending.is_empty() {
            warn!(
                pending = self.pending.len(),
                "preview workers have exited; failing pending loads"
            );
        }
        self.pending
            .drain()
            .map(|id| LoadOutcome {
                result: Err(PreviewError::WorkersExited { id: id.clone() }),
                id,
            })
            .collect()
    }

    /// Keep only outcomes for ids that are still pending.
    fn accept(&mut self, outcomes: Vec<LoadOutcome>) -> Vec<LoadOutcome> {
        outcomes
            .into_iter()
            .filter(|outcome| {
                let wanted = self.pending.remove(&outcome.id);
                if !wanted {
                    debug!(item = %outcome.id, "discarding outcome of abandoned load");
                }
                wanted
            })
            .collect()
    }
}

#[cfg(test)]
impl FrameLoader {
    /// Pool loader whose workers have already exited
    pub(crate) fn stopped(frame_count: usize) -> Self {
        let (request_tx, _) = channel::<ItemId>();
        let (_, result_rx) = channel::<LoadOutcome>();
        Self {
            frame_count,
            pending: HashSet::new(),
            dispatch: Dispatch::Pool {
                request_tx,
                result_rx,
            },
        }
    }
}

//! Inventory polling loop
//!
//! Drives repeated inventory cycles across one or more reader sessions,
//! feeding each response through a tag tracker so every transponder is
//! reported exactly once per run.
//!
//! Sessions are polled sequentially from one task, each transfer bounded
//! by the reader's timeout, so a dead device can delay a pass but never
//! stall the loop forever.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use rfpad_core::{constants, TagTracker};
use rfpad_types::{DeviceSelector, Tag};

use crate::error::{Error, Result};
use crate::reader::Reader;

/// Where de-duplication state lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupScope {
    /// One seen-set for the whole run, spanning every session
    #[default]
    Run,

    /// An independent seen-set per device session
    PerSession,
}

/// Polling loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Open,
    Closed,
}

/// Receiver of newly-seen tags (the reporting collaborator)
///
/// Implemented for closures:
///
/// ```
/// use rfpad::{DeviceSelector, Tag, TagSink};
///
/// let mut count = 0;
/// let mut sink = |_device: &DeviceSelector, _tag: &Tag| count += 1;
/// sink.report(&DeviceSelector::default(), &Tag::new([0, 3], [0; 8]));
/// assert_eq!(count, 1);
/// ```
pub trait TagSink {
    fn report(&mut self, device: &DeviceSelector, tag: &Tag);
}

impl<F: FnMut(&DeviceSelector, &Tag)> TagSink for F {
    fn report(&mut self, device: &DeviceSelector, tag: &Tag) {
        self(device, tag)
    }
}

struct Session {
    reader: Reader,
    tracker: TagTracker,
}

/// Inventory polling loop over a set of reader sessions
///
/// Lifecycle: [`open_all`](Self::open_all) once (failures there are
/// fatal), then [`run`](Self::run) until the shutdown signal trips. Once
/// devices are open, no per-cycle error is fatal: scan statuses, framing
/// problems, and transport timeouts are reported and the loop moves on.
pub struct Poller {
    sessions: Vec<Session>,
    shared: TagTracker,
    scope: DedupScope,
    interval: Duration,
    state: State,
}

impl Poller {
    /// Create a poller over a set of readers
    pub fn new(readers: Vec<Reader>) -> Self {
        Self {
            sessions: readers
                .into_iter()
                .map(|reader| Session {
                    reader,
                    tracker: TagTracker::new(),
                })
                .collect(),
            shared: TagTracker::new(),
            scope: DedupScope::default(),
            interval: constants::DEFAULT_POLL_INTERVAL,
            state: State::Idle,
        }
    }

    /// Set the de-duplication scope
    pub fn with_dedup_scope(mut self, scope: DedupScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the delay between polling passes
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Number of configured sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Open every configured session
    ///
    /// Any failure here is fatal: the poller must not reach [`run`] with
    /// an unopened device. Sessions opened before the failure are
    /// released again.
    ///
    /// [`run`]: Self::run
    pub async fn open_all(&mut self) -> Result<()> {
        if self.state != State::Idle {
            return Err(Error::InvalidState(format!(
                "cannot open from {:?}",
                self.state
            )));
        }

        for i in 0..self.sessions.len() {
            if let Err(e) = self.sessions[i].reader.open().await {
                warn!(
                    "Failed to open {}: {}",
                    self.sessions[i].reader.selector(),
                    e
                );
                self.close_all().await;
                return Err(e);
            }
        }

        self.state = State::Open;
        info!(sessions = self.sessions.len(), "All readers open");
        Ok(())
    }

    /// Poll until the shutdown signal trips
    ///
    /// Each pass runs one inventory per session and hands newly-seen tags
    /// to the sink; per-cycle errors are reported through their
    /// descriptive text and skipped. On exit, every open transport is
    /// released exactly once, whatever ended the loop.
    pub async fn run<S: TagSink>(
        &mut self,
        sink: &mut S,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        if self.state != State::Open {
            return Err(Error::InvalidState(format!(
                "cannot poll from {:?}",
                self.state
            )));
        }

        info!(interval = ?self.interval, scope = ?self.scope, "Polling started");

        while !*shutdown.borrow() {
            self.poll_once(sink).await;

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!("Polling stopped, releasing readers");
        self.close_all().await;
        self.state = State::Closed;

        Ok(())
    }

    /// One pass over every session
    async fn poll_once<S: TagSink>(&mut self, sink: &mut S) {
        for session in self.sessions.iter_mut() {
            let selector = session.reader.selector();

            let tags = match session.reader.inventory().await {
                Ok(tags) => tags,
                Err(e) => {
                    warn!("Poll failed on {}: {}", selector, e);
                    continue;
                }
            };

            let tracker = match self.scope {
                DedupScope::Run => &mut self.shared,
                DedupScope::PerSession => &mut session.tracker,
            };

            for tag in tags {
                if tracker.record_if_new(&tag.id) {
                    debug!(device = %selector, tag = %tag, "New tag");
                    sink.report(&selector, &tag);
                }
            }
        }
    }

    /// Release every open transport
    async fn close_all(&mut self) {
        for session in &mut self.sessions {
            if let Err(e) = session.reader.close().await {
                warn!("Failed to close {}: {}", session.reader.selector(), e);
            }
        }
    }
}

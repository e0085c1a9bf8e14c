//! Periodic background refresh of the active listing.
//!
//! The scheduler owns at most one timer task. Arming always replaces the
//! previous timer, and dropping the scheduler aborts whatever is armed.
//! Every arming gets a new epoch, so ticks already queued by a replaced or
//! disarmed timer can be told apart from current ones.

use crate::application::events::Update;
use crate::domain::values::tool::Tool;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant};
use tracing::debug;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

struct ArmedTimer {
    tool: Tool,
    epoch: u64,
    handle: JoinHandle<()>,
}

pub struct RefreshScheduler {
    period: Duration,
    updates: UnboundedSender<Update>,
    armed: Option<ArmedTimer>,
    epoch: u64,
}

impl RefreshScheduler {
    pub fn new(period: Duration, updates: UnboundedSender<Update>) -> Self {
        Self {
            period,
            updates,
            armed: None,
            epoch: 0,
        }
    }

    /// Starts ticking for `tool`. The first tick fires one full period from now.
    pub fn arm(&mut self, tool: Tool) {
        self.disarm();
        self.epoch += 1;
        let epoch = self.epoch;
        let period = self.period;
        let updates = self.updates.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if updates.send(Update::RefreshDue { tool, epoch }).is_err() {
                    break;
                }
            }
        });
        debug!(%tool, epoch, period_secs = period.as_secs_f64(), "refresh timer armed");
        self.armed = Some(ArmedTimer {
            tool,
            epoch,
            handle,
        });
    }

    pub fn disarm(&mut self) {
        if let Some(timer) = self.armed.take() {
            timer.handle.abort();
            debug!(tool = %timer.tool, "refresh timer disarmed");
        }
    }

    pub fn armed_for(&self) -> Option<Tool> {
        self.armed.as_ref().map(|t| t.tool)
    }

    /// True when a tick for `tool` from arming `epoch` is still wanted.
    pub fn is_current(&self, tool: Tool, epoch: u64) -> bool {
        self.armed
            .as_ref()
            .is_some_and(|t| t.tool == tool && t.epoch == epoch)
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}

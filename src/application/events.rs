//! Messages flowing into and out of the session controller.

use crate::application::session::SessionState;
use crate::domain::entities::opportunity::Opportunity;
use crate::domain::entities::plan::Plan;
use crate::domain::error::DomainError;
use crate::domain::values::notice::Notice;
use crate::domain::values::tool::Tool;

/// How a listing reload presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reload {
    /// Blocks the list behind a loading indicator.
    Foreground,
    /// Keeps the current list visible behind a small indicator.
    Background,
}

/// Completions delivered back to the controller by spawned tasks and the refresh timer.
#[derive(Debug)]
pub enum Update {
    Listing {
        tool: Tool,
        reload: Reload,
        result: Result<Vec<Opportunity>, DomainError>,
    },
    Plan {
        purchase_id: String,
        result: Result<Plan, DomainError>,
    },
    /// Timer tick; `epoch` identifies the arming that produced it.
    RefreshDue { tool: Tool, epoch: u64 },
}

/// Output for presentation layers.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Notice(Notice),
    ListingLoaded {
        tool: Tool,
        reload: Reload,
        count: usize,
    },
    PlanReady(Plan),
    Snapshot(Box<SessionState>),
}

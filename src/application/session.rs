//! Session orchestration: tool and view transitions, purchases, sales and
//! listing reloads.
//!
//! [`SessionController`] is the single writer of [`SessionState`]. Actions run
//! synchronously to completion; network work is spawned and reported back as
//! an [`Update`] that the owner feeds into [`SessionController::apply`].

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::application::content::{fetch_opportunities, generate_plan};
use crate::application::creator::CreatorAccount;
use crate::application::events::{Reload, SessionEvent, Update};
use crate::application::ledger;
use crate::application::refresh::{RefreshScheduler, DEFAULT_REFRESH_INTERVAL};
use crate::domain::entities::opportunity::Opportunity;
use crate::domain::entities::plan::Plan;
use crate::domain::entities::wallet::{Wallet, DEFAULT_INITIAL_BALANCE};
use crate::domain::error::DomainError;
use crate::domain::ports::content_generator::ContentGenerator;
use crate::domain::values::amount::Amount;
use crate::domain::values::notice::Notice;
use crate::domain::values::tool::Tool;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub initial_balance: f64,
    pub refresh_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

/// Opportunity list for one tool plus its reload status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Listing {
    pub items: Vec<Opportunity>,
    pub foreground_pending: usize,
    pub background_pending: usize,
    /// Last load failure, shown inline with a retry hint until the next reload.
    pub error: Option<String>,
    /// Number of batches applied so far.
    pub generation: u64,
}

impl Listing {
    pub fn is_loading(&self) -> bool {
        self.foreground_pending > 0
    }

    pub fn is_background_loading(&self) -> bool {
        self.background_pending > 0
    }
}

/// The opportunity currently owned by the session.
#[derive(Debug, Clone, Serialize)]
pub struct Acquisition {
    /// Id of the purchase transaction; plan responses are matched against it.
    pub purchase_id: String,
    pub opportunity: Opportunity,
    /// `None` while generation is pending.
    pub plan: Option<Plan>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Mode {
    Browsing,
    Autopilot(Acquisition),
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub subscribed: bool,
    pub tool: Tool,
    pub mode: Mode,
    pub products: Listing,
    pub domains: Listing,
    /// Item awaiting purchase confirmation.
    pub pending_purchase: Option<Opportunity>,
    pub wallet: Wallet,
    pub creator: CreatorAccount,
}

impl SessionState {
    pub fn new(initial_balance: f64) -> Self {
        Self {
            subscribed: false,
            tool: Tool::default(),
            mode: Mode::Browsing,
            products: Listing::default(),
            domains: Listing::default(),
            pending_purchase: None,
            wallet: Wallet::open(initial_balance),
            creator: CreatorAccount::default(),
        }
    }

    pub fn listing(&self, tool: Tool) -> &Listing {
        match tool {
            Tool::Products => &self.products,
            Tool::Domains => &self.domains,
        }
    }

    fn listing_mut(&mut self, tool: Tool) -> &mut Listing {
        match tool {
            Tool::Products => &mut self.products,
            Tool::Domains => &mut self.domains,
        }
    }

    pub fn current_listing(&self) -> &Listing {
        self.listing(self.tool)
    }

    pub fn is_browsing(&self) -> bool {
        matches!(self.mode, Mode::Browsing)
    }

    pub fn acquisition(&self) -> Option<&Acquisition> {
        match &self.mode {
            Mode::Autopilot(acq) => Some(acq),
            Mode::Browsing => None,
        }
    }
}

/// Receiving ends handed to whoever drives the controller.
pub struct SessionChannels {
    pub updates: UnboundedReceiver<Update>,
    pub events: UnboundedReceiver<SessionEvent>,
}

pub struct SessionController {
    state: SessionState,
    content: Arc<dyn ContentGenerator>,
    updates: UnboundedSender<Update>,
    events: UnboundedSender<SessionEvent>,
    refresh: RefreshScheduler,
    plan_task: Option<JoinHandle<()>>,
}

impl SessionController {
    /// Creates a controller together with the channels it reports on.
    pub fn start(
        content: Arc<dyn ContentGenerator>,
        config: SessionConfig,
    ) -> (Self, SessionChannels) {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let controller = Self {
            state: SessionState::new(config.initial_balance),
            content,
            updates: updates_tx.clone(),
            events: events_tx,
            refresh: RefreshScheduler::new(config.refresh_interval, updates_tx),
            plan_task: None,
        };
        (
            controller,
            SessionChannels {
                updates: updates_rx,
                events: events_rx,
            },
        )
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Tool the background refresh timer is currently armed for.
    pub fn armed_refresh(&self) -> Option<Tool> {
        self.refresh.armed_for()
    }

    pub fn subscribe(&mut self) -> Result<(), DomainError> {
        if self.state.subscribed {
            return Err(DomainError::InvalidAction("already subscribed".into()));
        }
        self.state.subscribed = true;
        self.state.creator.collect_subscription();
        info!(generator = self.content.name(), "session subscribed");
        self.notify(Notice::success("Subscription successful! Welcome aboard."));
        self.start_reload(self.state.tool, Reload::Foreground);
        self.refresh.arm(self.state.tool);
        Ok(())
    }

    pub fn select_tool(&mut self, tool: Tool) -> Result<(), DomainError> {
        self.ensure_browsing("switch tools")?;
        self.refresh.disarm();
        self.state.pending_purchase = None;
        self.state.tool = tool;
        info!(%tool, "tool selected");
        self.start_reload(tool, Reload::Foreground);
        self.refresh.arm(tool);
        Ok(())
    }

    /// Foreground reload of the current tool; also the retry after a failed load.
    pub fn refresh(&mut self) -> Result<(), DomainError> {
        self.ensure_browsing("refresh")?;
        self.start_reload(self.state.tool, Reload::Foreground);
        Ok(())
    }

    pub fn initiate_purchase(&mut self, index: usize) -> Result<&Opportunity, DomainError> {
        self.ensure_browsing("start a purchase")?;
        let tool = self.state.tool;
        let item = self
            .state
            .current_listing()
            .items
            .get(index)
            .cloned()
            .ok_or_else(|| {
                DomainError::NotFound(format!("no {tool} listed at position {}", index + 1))
            })?;
        Ok(self.state.pending_purchase.insert(item))
    }

    pub fn cancel_purchase(&mut self) {
        self.state.pending_purchase = None;
    }

    /// Commits the pending purchase and starts plan generation.
    ///
    /// The debit is final: a later generation failure returns the session to
    /// browsing but leaves the purchase on the ledger. Returns the purchase id.
    pub fn confirm_purchase(&mut self) -> Result<String, DomainError> {
        self.ensure_browsing("confirm a purchase")?;
        let item = self
            .state
            .pending_purchase
            .clone()
            .ok_or_else(|| DomainError::InvalidAction("no purchase awaiting confirmation".into()))?;

        let wallet = ledger::apply_purchase(
            &self.state.wallet,
            item.acquisition_cost(),
            item.purchase_description(),
        )?;
        let purchase_id = wallet.latest().map(|t| t.id.clone()).unwrap_or_default();

        self.state.wallet = wallet;
        self.state.pending_purchase = None;
        self.refresh.disarm();
        self.state.mode = Mode::Autopilot(Acquisition {
            purchase_id: purchase_id.clone(),
            opportunity: item.clone(),
            plan: None,
        });
        info!(item = item.name(), cost = item.acquisition_cost(), "opportunity acquired");

        let what = match item {
            Opportunity::Product(_) => "marketing plan",
            Opportunity::Domain(_) => "sales pitch",
        };
        self.notify(Notice::info(format!("{} acquired! Generating {what}...", item.name())));

        let content = self.content.clone();
        let updates = self.updates.clone();
        let id = purchase_id.clone();
        self.plan_task = Some(tokio::spawn(async move {
            let result = generate_plan(content.as_ref(), &item).await;
            let _ = updates.send(Update::Plan {
                purchase_id: id,
                result,
            });
        }));
        Ok(purchase_id)
    }

    /// Sells the acquired opportunity and returns to browsing.
    ///
    /// Products sell at their suggested price; domains at `sale_price`, or the
    /// lower bound of their potential value when none is given.
    pub fn launch(&mut self, sale_price: Option<Amount>) -> Result<(), DomainError> {
        self.ensure_subscribed()?;
        let acq = self.state.acquisition().ok_or_else(|| {
            DomainError::InvalidAction("nothing to launch; acquire an opportunity first".into())
        })?;
        if acq.plan.is_none() {
            return Err(DomainError::InvalidAction(
                "promotional content is still being generated".into(),
            ));
        }
        let opportunity = acq.opportunity.clone();

        let price = match &opportunity {
            Opportunity::Product(p) => {
                let fixed = Amount::new(p.suggested_sale_price)?;
                if let Some(requested) = sale_price {
                    if (requested.value() - fixed.value()).abs() > f64::EPSILON {
                        return Err(DomainError::InvalidInput(format!(
                            "{} sells at its suggested price of {fixed}",
                            p.product_name
                        )));
                    }
                }
                fixed
            }
            Opportunity::Domain(d) => match sale_price {
                Some(price) => price,
                None => Amount::new(d.suggested_listing_price())?,
            },
        };

        let name = opportunity.name();
        self.state.wallet =
            ledger::apply_sale(&self.state.wallet, price, format!("Sale: {name}"));
        let profit = price.value() - opportunity.acquisition_cost();
        info!(item = name, price = price.value(), profit, "opportunity sold");
        let message = match &opportunity {
            Opportunity::Product(_) => format!(
                "Campaign for {name} launched! Sold for {price}, profit of ${profit:.2}."
            ),
            Opportunity::Domain(_) => {
                format!("{name} listed! Sold for {price}, profit of ${profit:.2}.")
            }
        };
        self.notify(Notice::success(message));

        self.return_to_browsing();
        self.start_reload(self.state.tool, Reload::Foreground);
        Ok(())
    }

    /// Leaves autopilot without any financial effect.
    pub fn back(&mut self) -> Result<(), DomainError> {
        self.ensure_subscribed()?;
        if self.state.is_browsing() {
            return Err(DomainError::InvalidAction("already browsing".into()));
        }
        self.return_to_browsing();
        self.state.listing_mut(self.state.tool).error = None;
        Ok(())
    }

    pub fn deposit(&mut self, amount: Amount) -> Result<(), DomainError> {
        self.ensure_subscribed()?;
        self.state.wallet = ledger::apply_deposit(&self.state.wallet, amount);
        self.notify(Notice::success(format!("{amount} successfully deposited.")));
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Amount) -> Result<(), DomainError> {
        self.ensure_subscribed()?;
        self.state.wallet = ledger::apply_withdrawal(&self.state.wallet, amount)?;
        self.notify(Notice::success(format!("{amount} successfully withdrawn.")));
        Ok(())
    }

    pub fn withdraw_revenue(&mut self, amount: Amount) -> Result<(), DomainError> {
        self.ensure_subscribed()?;
        self.state.creator.withdraw(amount)?;
        self.notify(Notice::success(format!(
            "Withdrawal of {amount} initiated to your Visa card."
        )));
        Ok(())
    }

    /// Emits the current state for presentation layers.
    pub fn show(&self) {
        self.emit(SessionEvent::Snapshot(Box::new(self.state.clone())));
    }

    /// Applies a completion reported by a spawned task or the refresh timer.
    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Listing {
                tool,
                reload,
                result,
            } => self.apply_listing(tool, reload, result),
            Update::Plan {
                purchase_id,
                result,
            } => self.apply_plan(purchase_id, result),
            Update::RefreshDue { tool, epoch } => {
                let due = self.state.subscribed
                    && self.state.is_browsing()
                    && self.state.tool == tool
                    && self.refresh.is_current(tool, epoch);
                if due {
                    self.start_reload(tool, Reload::Background);
                } else {
                    debug!(%tool, epoch, "ignoring stale refresh tick");
                }
            }
        }
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.emit(SessionEvent::Notice(notice));
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    fn apply_listing(
        &mut self,
        tool: Tool,
        reload: Reload,
        result: Result<Vec<Opportunity>, DomainError>,
    ) {
        let listing = self.state.listing_mut(tool);
        match reload {
            Reload::Foreground => {
                listing.foreground_pending = listing.foreground_pending.saturating_sub(1)
            }
            Reload::Background => {
                listing.background_pending = listing.background_pending.saturating_sub(1)
            }
        }
        match result {
            Ok(items) => {
                let count = items.len();
                listing.items = items;
                listing.generation += 1;
                debug!(%tool, ?reload, count, "listing replaced");
                self.emit(SessionEvent::ListingLoaded {
                    tool,
                    reload,
                    count,
                });
            }
            Err(e) => {
                warn!(%tool, ?reload, error = %e, "listing load failed");
                listing.error = Some(e.to_string());
                self.notify(Notice::error(format!("Failed to load {tool}.")));
            }
        }
    }

    fn apply_plan(&mut self, purchase_id: String, result: Result<Plan, DomainError>) {
        let acq = match &mut self.state.mode {
            Mode::Autopilot(acq) if acq.purchase_id == purchase_id => acq,
            _ => {
                debug!(%purchase_id, "discarding plan for an abandoned acquisition");
                return;
            }
        };
        self.plan_task = None;
        match result {
            Ok(plan) => {
                acq.plan = Some(plan.clone());
                self.emit(SessionEvent::PlanReady(plan));
            }
            Err(e) => {
                let what = match acq.opportunity {
                    Opportunity::Product(_) => "marketing plan",
                    Opportunity::Domain(_) => "sales pitch",
                };
                warn!(%purchase_id, error = %e, "plan generation failed");
                self.notify(Notice::error(format!("Failed to generate {what}.")));
                self.return_to_browsing();
            }
        }
    }

    fn start_reload(&mut self, tool: Tool, reload: Reload) {
        let listing = self.state.listing_mut(tool);
        listing.error = None;
        match reload {
            Reload::Foreground => listing.foreground_pending += 1,
            Reload::Background => listing.background_pending += 1,
        }
        debug!(%tool, ?reload, "reload started");

        let content = self.content.clone();
        let updates = self.updates.clone();
        tokio::spawn(async move {
            let result = fetch_opportunities(content.as_ref(), tool).await;
            let _ = updates.send(Update::Listing {
                tool,
                reload,
                result,
            });
        });
    }

    fn return_to_browsing(&mut self) {
        if let Some(task) = self.plan_task.take() {
            task.abort();
        }
        self.state.mode = Mode::Browsing;
        self.refresh.arm(self.state.tool);
    }

    fn ensure_subscribed(&self) -> Result<(), DomainError> {
        if !self.state.subscribed {
            return Err(DomainError::InvalidAction(
                "subscribe to start flipping".into(),
            ));
        }
        Ok(())
    }

    fn ensure_browsing(&self, action: &str) -> Result<(), DomainError> {
        self.ensure_subscribed()?;
        if !self.state.is_browsing() {
            return Err(DomainError::InvalidAction(format!(
                "cannot {action} during autopilot; go back first"
            )));
        }
        Ok(())
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(task) = self.plan_task.take() {
            task.abort();
        }
    }
}

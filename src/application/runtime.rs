//! Event loop that owns a [`SessionController`].
//!
//! User commands and asynchronous completions are handled one at a time,
//! each to completion, so ledger and mode changes never interleave.

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use crate::application::events::Update;
use crate::application::session::SessionController;
use crate::domain::error::DomainError;
use crate::domain::values::amount::Amount;
use crate::domain::values::notice::Notice;
use crate::domain::values::tool::Tool;

/// Commands issued by presentation layers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Subscribe,
    SelectTool(Tool),
    Refresh,
    /// Zero-based index into the current listing.
    Buy(usize),
    Confirm,
    Cancel,
    Launch(Option<Amount>),
    Back,
    Deposit(Amount),
    Withdraw(Amount),
    WithdrawRevenue(Amount),
    Show,
    Quit,
}

impl SessionController {
    pub fn dispatch(&mut self, cmd: SessionCommand) -> Result<(), DomainError> {
        match cmd {
            SessionCommand::Subscribe => self.subscribe(),
            SessionCommand::SelectTool(tool) => self.select_tool(tool),
            SessionCommand::Refresh => self.refresh(),
            SessionCommand::Buy(index) => {
                let item = self.initiate_purchase(index)?;
                let message = format!(
                    "Confirm purchase of {} for ${:.2}? (confirm / cancel)",
                    item.name(),
                    item.acquisition_cost()
                );
                self.notify(Notice::info(message));
                Ok(())
            }
            SessionCommand::Confirm => self.confirm_purchase().map(|_| ()),
            SessionCommand::Cancel => {
                self.cancel_purchase();
                Ok(())
            }
            SessionCommand::Launch(price) => self.launch(price),
            SessionCommand::Back => self.back(),
            SessionCommand::Deposit(amount) => self.deposit(amount),
            SessionCommand::Withdraw(amount) => self.withdraw(amount),
            SessionCommand::WithdrawRevenue(amount) => self.withdraw_revenue(amount),
            SessionCommand::Show => {
                self.show();
                Ok(())
            }
            SessionCommand::Quit => Ok(()),
        }
    }
}

/// Runs until `Quit` arrives or every command sender is dropped.
///
/// Action errors become error notices; they never end the loop.
pub async fn run_session(
    mut controller: SessionController,
    mut commands: UnboundedReceiver<SessionCommand>,
    mut updates: UnboundedReceiver<Update>,
) {
    loop {
        tokio::select! {
            cmd = commands.recv() => match cmd {
                Some(SessionCommand::Quit) | None => break,
                Some(cmd) => {
                    debug!(?cmd, "session command");
                    if let Err(e) = controller.dispatch(cmd) {
                        warn!(error = %e, "session action rejected");
                        controller.notify(Notice::error(e.to_string()));
                    }
                }
            },
            Some(update) = updates.recv() => controller.apply(update),
        }
    }
}

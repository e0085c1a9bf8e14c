//! Platform operator side of the simulation: subscription revenue.

use crate::domain::error::DomainError;
use crate::domain::values::amount::Amount;
use serde::Serialize;

/// One-off price of a session subscription.
pub const SUBSCRIPTION_FEE: f64 = 36.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreatorAccount {
    revenue: f64,
}

impl CreatorAccount {
    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn collect_subscription(&mut self) {
        self.revenue += SUBSCRIPTION_FEE;
    }

    pub fn withdraw(&mut self, amount: Amount) -> Result<(), DomainError> {
        if amount.value() > self.revenue {
            return Err(DomainError::InsufficientFunds {
                requested: amount.value(),
                available: self.revenue,
            });
        }
        self.revenue -= amount.value();
        Ok(())
    }
}

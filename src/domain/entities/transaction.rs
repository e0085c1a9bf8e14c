use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Sale,
    Purchase,
}

impl TransactionKind {
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::Sale)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "deposit"),
            TransactionKind::Withdrawal => write!(f, "withdrawal"),
            TransactionKind::Sale => write!(f, "sale"),
            TransactionKind::Purchase => write!(f, "purchase"),
        }
    }
}

/// Immutable ledger entry. `amount` is unsigned; the kind carries the sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(kind: TransactionKind, description: impl Into<String>, amount: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            description: description.into(),
            amount,
            date: Local::now().date_naive(),
        }
    }

    pub fn signed_amount(&self) -> f64 {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}

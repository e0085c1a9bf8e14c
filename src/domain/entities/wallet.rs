use crate::domain::entities::transaction::{Transaction, TransactionKind};
use serde::Serialize;

pub const DEFAULT_INITIAL_BALANCE: f64 = 1000.0;

/// Simulated balance plus its transaction log, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wallet {
    balance: f64,
    transactions: Vec<Transaction>,
}

impl Wallet {
    /// Opens a wallet whose first transaction is the initial deposit.
    pub fn open(initial_balance: f64) -> Self {
        Self {
            balance: initial_balance,
            transactions: vec![Transaction::new(
                TransactionKind::Deposit,
                "Initial Balance",
                initial_balance,
            )],
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn latest(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    /// Prepends `tx` and moves the balance by its signed amount.
    pub(crate) fn post(&mut self, tx: Transaction) {
        self.balance += tx.signed_amount();
        self.transactions.insert(0, tx);
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Wallet::open(DEFAULT_INITIAL_BALANCE)
    }
}

//! Wallet ledger operations.
//!
//! Each function takes the current wallet and returns the next one, so a
//! rejected operation leaves the caller's wallet untouched. Every successful
//! operation prepends exactly one transaction.

use crate::domain::entities::transaction::{Transaction, TransactionKind};
use crate::domain::entities::wallet::Wallet;
use crate::domain::error::DomainError;
use crate::domain::values::amount::Amount;

pub fn apply_deposit(wallet: &Wallet, amount: Amount) -> Wallet {
    let mut next = wallet.clone();
    next.post(Transaction::new(
        TransactionKind::Deposit,
        "Card Deposit",
        amount.value(),
    ));
    next
}

pub fn apply_withdrawal(wallet: &Wallet, amount: Amount) -> Result<Wallet, DomainError> {
    ensure_funds(wallet, amount.value())?;
    let mut next = wallet.clone();
    next.post(Transaction::new(
        TransactionKind::Withdrawal,
        "Card Withdrawal",
        amount.value(),
    ));
    Ok(next)
}

/// Debits an acquisition cost. Costs come from generated opportunities, so
/// they are checked here rather than through [`Amount`].
pub fn apply_purchase(
    wallet: &Wallet,
    cost: f64,
    description: impl Into<String>,
) -> Result<Wallet, DomainError> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(DomainError::InvalidAmount(format!(
            "acquisition cost must be a non-negative number, got {cost}"
        )));
    }
    ensure_funds(wallet, cost)?;
    let mut next = wallet.clone();
    next.post(Transaction::new(TransactionKind::Purchase, description, cost));
    Ok(next)
}

pub fn apply_sale(wallet: &Wallet, price: Amount, description: impl Into<String>) -> Wallet {
    let mut next = wallet.clone();
    next.post(Transaction::new(TransactionKind::Sale, description, price.value()));
    next
}

fn ensure_funds(wallet: &Wallet, requested: f64) -> Result<(), DomainError> {
    if requested > wallet.balance() {
        return Err(DomainError::InsufficientFunds {
            requested,
            available: wallet.balance(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(v: f64) -> Amount {
        Amount::new(v).unwrap()
    }

    #[test]
    fn deposit_prepends_and_credits() {
        let w = apply_deposit(&Wallet::open(1000.0), amount(25.0));
        assert_eq!(w.balance(), 1025.0);
        assert_eq!(w.transactions().len(), 2);
        assert_eq!(w.transactions()[0].kind, TransactionKind::Deposit);
        assert_eq!(w.transactions()[0].description, "Card Deposit");
    }

    #[test]
    fn withdrawal_of_entire_balance_is_allowed() {
        let w = apply_withdrawal(&Wallet::open(100.0), amount(100.0)).unwrap();
        assert_eq!(w.balance(), 0.0);
    }

    #[test]
    fn overdraw_is_rejected_without_change() {
        let w = Wallet::open(950.0);
        let err = apply_withdrawal(&w, amount(2000.0)).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientFunds { .. }));
        assert_eq!(w.balance(), 950.0);
        assert_eq!(w.transactions().len(), 1);
    }

    #[test]
    fn purchase_requires_funds() {
        let w = Wallet::open(10.0);
        assert!(apply_purchase(&w, 10.5, "Purchase: X").is_err());
        let w = apply_purchase(&w, 10.0, "Purchase: X").unwrap();
        assert_eq!(w.balance(), 0.0);
        assert_eq!(w.transactions()[0].kind, TransactionKind::Purchase);
    }

    #[test]
    fn purchase_rejects_invalid_cost() {
        let w = Wallet::open(10.0);
        assert!(apply_purchase(&w, f64::NAN, "Purchase: X").is_err());
        assert!(apply_purchase(&w, -1.0, "Purchase: X").is_err());
    }
}

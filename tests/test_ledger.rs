use autoflip::application::ledger::{apply_deposit, apply_purchase, apply_sale, apply_withdrawal};
use autoflip::domain::entities::transaction::TransactionKind;
use autoflip::domain::entities::wallet::Wallet;
use autoflip::domain::error::DomainError;
use autoflip::domain::values::amount::Amount;

fn amount(v: f64) -> Amount {
    Amount::new(v).unwrap()
}

/// Balance equals the signed sum of the ledger at every step.
fn assert_consistent(wallet: &Wallet) {
    let sum: f64 = wallet.transactions().iter().map(|t| t.signed_amount()).sum();
    assert!((wallet.balance() - sum).abs() < 1e-9);
    assert!(wallet.balance() >= 0.0);
}

#[test]
fn test_mixed_sequence_stays_consistent() {
    let mut wallet = Wallet::open(1000.0);
    assert_consistent(&wallet);

    wallet = apply_purchase(&wallet, 50.0, "Purchase: Planner").unwrap();
    assert_consistent(&wallet);
    wallet = apply_sale(&wallet, amount(200.0), "Sale: Planner");
    assert_consistent(&wallet);
    wallet = apply_deposit(&wallet, amount(25.5));
    assert_consistent(&wallet);
    wallet = apply_withdrawal(&wallet, amount(75.5)).unwrap();
    assert_consistent(&wallet);

    assert_eq!(wallet.balance(), 1100.0);
    assert_eq!(wallet.transactions().len(), 5);
    assert_eq!(wallet.latest().unwrap().kind, TransactionKind::Withdrawal);
    assert_eq!(wallet.latest().unwrap().description, "Card Withdrawal");
}

#[test]
fn test_rejections_leave_wallet_untouched() {
    let wallet = Wallet::open(100.0);

    let err = apply_withdrawal(&wallet, amount(100.01)).unwrap_err();
    assert!(matches!(err, DomainError::InsufficientFunds { .. }));
    assert!(apply_purchase(&wallet, 150.0, "Purchase: Too much").is_err());
    assert!(apply_purchase(&wallet, -5.0, "Purchase: Negative").is_err());

    assert_eq!(wallet.balance(), 100.0);
    assert_eq!(wallet.transactions().len(), 1);
}

#[test]
fn test_exact_balance_can_be_spent() {
    let wallet = Wallet::open(100.0);
    let drained = apply_withdrawal(&wallet, amount(100.0)).unwrap();
    assert_eq!(drained.balance(), 0.0);
    assert_consistent(&drained);
}

#[test]
fn test_transaction_ids_are_unique() {
    let mut wallet = Wallet::open(500.0);
    for _ in 0..10 {
        wallet = apply_deposit(&wallet, amount(1.0));
    }
    let mut ids: Vec<_> = wallet.transactions().iter().map(|t| t.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 11);
}

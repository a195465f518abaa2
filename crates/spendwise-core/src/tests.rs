use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spendwise_domain::{ExpenseCategory, ExpenseDraft, ExpenseId};

use crate::{
    storage::{KeyValueStore, MemoryStore, BALANCE_KEY, EXPENSES_KEY},
    SharedWallet, Wallet,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn open_wallet() -> (Wallet, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let wallet = Wallet::open_default(Box::new(Arc::clone(&store)));
    (wallet, store)
}

#[test]
fn lunch_and_taxi_scenario() {
    let (mut wallet, _) = open_wallet();
    assert_eq!(wallet.balance(), dec!(5000));

    let lunch = wallet
        .add_expense(ExpenseDraft::new(
            "Lunch",
            dec!(200),
            ExpenseCategory::Food,
            date(2024, 1, 10),
        ))
        .expect("lunch");
    assert_eq!(wallet.balance(), dec!(4800));
    assert_eq!(wallet.records().len(), 1);

    wallet
        .add_expense(ExpenseDraft::new(
            "Taxi",
            dec!(50),
            ExpenseCategory::Travel,
            date(2024, 1, 11),
        ))
        .expect("taxi");
    assert_eq!(wallet.balance(), dec!(4750));
    assert_eq!(wallet.records().len(), 2);

    wallet
        .delete_expense(&lunch)
        .expect("delete")
        .expect("lunch removed");
    assert_eq!(wallet.balance(), dec!(4950));
    assert_eq!(wallet.records().len(), 1);
    assert_eq!(wallet.records()[0].title, "Taxi");
}

#[test]
fn add_balance_persists_only_the_balance_key() {
    let (mut wallet, store) = open_wallet();
    wallet.add_balance(dec!(250)).expect("top up");

    let stored = store.get(BALANCE_KEY).unwrap().expect("balance written");
    assert_eq!(serde_json::from_value::<Decimal>(stored).unwrap(), dec!(5250));
    assert!(store.get(EXPENSES_KEY).unwrap().is_none());
}

#[test]
fn persisted_amounts_keep_every_digit() {
    let (mut wallet, store) = open_wallet();
    wallet.add_balance(dec!(0.1234567890123456789)).unwrap();
    wallet
        .add_expense(ExpenseDraft::new(
            "Rounding",
            dec!(1234.567890123456789012),
            ExpenseCategory::Other,
            date(2024, 5, 1),
        ))
        .unwrap();

    let stored = store.get(BALANCE_KEY).unwrap().expect("balance written");
    assert_eq!(stored.to_string(), "3765.5555666655555566669");
    assert!(stored.is_number());

    let reopened = Wallet::open_default(Box::new(Arc::clone(&store)));
    assert_eq!(reopened.snapshot(), wallet.snapshot());
    assert_eq!(reopened.records()[0].amount, dec!(1234.567890123456789012));
}

#[test]
fn failed_validation_writes_nothing() {
    let (mut wallet, store) = open_wallet();
    assert!(wallet.add_balance(dec!(-5)).is_err());
    assert!(wallet
        .add_expense(ExpenseDraft::new(
            "Yacht",
            dec!(9000),
            ExpenseCategory::Shopping,
            date(2024, 2, 1),
        ))
        .is_err());
    assert!(store.is_empty());
}

#[test]
fn deleting_unknown_id_writes_nothing() {
    let (mut wallet, store) = open_wallet();
    assert!(wallet
        .delete_expense(&ExpenseId::from("nope"))
        .unwrap()
        .is_none());
    assert!(store.is_empty());
    assert_eq!(wallet.balance(), dec!(5000));
}

#[test]
fn reopening_restores_identical_state() {
    let (mut wallet, store) = open_wallet();
    wallet.add_balance(dec!(100.5)).unwrap();
    wallet
        .add_expense(ExpenseDraft::new(
            "Concert",
            dec!(75.25),
            ExpenseCategory::Entertainment,
            date(2023, 12, 31),
        ))
        .unwrap();
    let id = wallet
        .add_expense(ExpenseDraft::new(
            "Course",
            dec!(300),
            ExpenseCategory::Education,
            date(2024, 1, 2),
        ))
        .unwrap();
    wallet
        .edit_expense(
            &id,
            ExpenseDraft::new("Course", dec!(320), ExpenseCategory::Education, date(2024, 1, 3)),
        )
        .unwrap();

    let reopened = Wallet::open_default(Box::new(Arc::clone(&store)));
    assert_eq!(reopened.snapshot(), wallet.snapshot());
}

#[test]
fn shared_wallet_serialises_concurrent_top_ups() {
    let (wallet, _) = open_wallet();
    let shared = SharedWallet::new(wallet);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let handle = shared.clone();
            std::thread::spawn(move || {
                for _ in 0..10 {
                    handle.add_balance(Decimal::ONE).expect("top up");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread joined");
    }

    assert_eq!(shared.snapshot().balance, dec!(5080));
    assert_eq!(shared.read(|wallet| wallet.records().len()), 0);
}

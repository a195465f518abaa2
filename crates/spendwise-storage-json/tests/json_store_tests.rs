use std::fs;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use spendwise_core::{KeyValueStore, Wallet, BALANCE_KEY, EXPENSES_KEY};
use spendwise_domain::{ExpenseCategory, ExpenseDraft};
use spendwise_storage_json::JsonFileStore;
use tempfile::tempdir;

#[test]
fn json_store_sets_gets_and_removes_values() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("data")).expect("create store");

    assert!(store.get(BALANCE_KEY).expect("read").is_none());

    store.set(BALANCE_KEY, &json!(4750.0)).expect("write");
    assert_eq!(store.get(BALANCE_KEY).expect("read"), Some(json!(4750.0)));
    assert!(store.key_path(BALANCE_KEY).exists());

    store.remove(BALANCE_KEY).expect("remove");
    assert!(store.get(BALANCE_KEY).expect("read").is_none());
    store.remove(BALANCE_KEY).expect("removing twice is fine");
}

#[test]
fn json_store_reports_corrupt_files() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    fs::write(store.key_path(EXPENSES_KEY), "[{ not json").expect("write garbage");

    let err = store.get(EXPENSES_KEY).expect_err("corrupt file must fail");
    assert!(err.to_string().contains("Serialization error"));
}

#[test]
fn wallet_round_trips_through_json_files() {
    let dir = tempdir().expect("tempdir");
    let store = Arc::new(JsonFileStore::new(dir.path().to_path_buf()).expect("create store"));

    let mut wallet = Wallet::open_default(Box::new(Arc::clone(&store)));
    let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    wallet
        .add_expense(ExpenseDraft::new("Lunch", dec!(200), ExpenseCategory::Food, date))
        .expect("add lunch");
    wallet
        .add_expense(ExpenseDraft::new("Taxi", dec!(50.5), ExpenseCategory::Travel, date))
        .expect("add taxi");
    wallet.add_balance(dec!(1000)).expect("top up");

    let reopened = Wallet::open_default(Box::new(Arc::clone(&store)));
    assert_eq!(reopened.snapshot(), wallet.snapshot());
    assert_eq!(reopened.balance(), dec!(5749.5));
    assert_eq!(reopened.records()[0].title, "Taxi");
}

#[test]
fn corrupt_expense_file_falls_back_to_empty_list() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    store.set(BALANCE_KEY, &json!(1234)).expect("write balance");
    fs::write(store.key_path(EXPENSES_KEY), "oops").expect("write garbage");

    let wallet = Wallet::open_default(Box::new(store));
    assert_eq!(wallet.balance(), dec!(1234));
    assert!(wallet.records().is_empty());
}

#[test]
fn balance_file_holds_the_exact_decimal() {
    let dir = tempdir().expect("tempdir");
    let store = Arc::new(JsonFileStore::new(dir.path().to_path_buf()).expect("create store"));

    let mut wallet = Wallet::open(Box::new(Arc::clone(&store)), dec!(0));
    wallet
        .add_balance(dec!(9876543210.0123456789012345))
        .expect("top up");

    let raw = fs::read_to_string(store.key_path(BALANCE_KEY)).expect("read file");
    assert_eq!(raw.trim(), "9876543210.0123456789012345");

    let reopened = Wallet::open(Box::new(Arc::clone(&store)), dec!(0));
    assert_eq!(reopened.balance(), dec!(9876543210.0123456789012345));
}

use super::{Category, NewTransaction, Summary, Transaction};

use anyhow::{anyhow, Result};
use rust_decimal_macros::dec;
use serde_json::json;

use crate::types::{TransactionId, UserId};

fn user() -> Result<UserId> {
    UserId::parse("user_1").ok_or_else(|| anyhow!("user id rejected"))
}

#[test]
fn test_category_lookup_is_exact() {
    assert_eq!(Category::from_label("Food & Drinks"), Some(Category::FoodAndDrinks));
    assert_eq!(Category::from_label("Income"), Some(Category::Income));
    assert_eq!(Category::from_label("income"), None);
    assert_eq!(Category::from_label("Food"), None);
    assert_eq!(Category::from_label(""), None);
}

#[test]
fn test_every_category_label_resolves_to_itself() {
    for category in Category::ALL {
        assert_eq!(Category::from_label(category.label()), Some(category));
    }
}

#[test]
fn test_category_tags_are_distinct() {
    let tags: Vec<_> = Category::ALL.into_iter().map(Category::tag).collect();

    assert_eq!(Category::FoodAndDrinks.tag(), "food");
    assert_eq!(Category::Income.tag(), "income");
    assert!(tags.iter().enumerate().all(|(index, tag)| !tags[index + 1..].contains(tag)));
}

#[test]
fn test_transaction_deserializes_from_service_row() -> Result<()> {
    let row = json!({
        "id": 12,
        "user_id": "user_1",
        "title": "Coffee",
        "amount": "-4.50",
        "category": "Food & Drinks",
        "created_at": "2025-07-01T08:15:00.000Z"
    });

    let transaction: Transaction = serde_json::from_value(row)?;

    assert_eq!(transaction.id, TransactionId::from(12));
    assert_eq!(transaction.amount, dec!(-4.50));
    assert_eq!(transaction.category, Category::FoodAndDrinks);
    assert!(transaction.is_expense());

    Ok(())
}

#[test]
fn test_transaction_with_unknown_category_is_rejected() {
    let row = json!({
        "id": "t1",
        "user_id": "user_1",
        "title": "Gift",
        "amount": 20,
        "category": "Gifts",
        "created_at": "2025-07-01"
    });

    assert!(serde_json::from_value::<Transaction>(row).is_err());
}

#[test]
fn test_summary_accepts_strings_numbers_and_nulls() -> Result<()> {
    let summary: Summary = serde_json::from_value(json!({
        "balance": "95.50",
        "income": 100,
        "expense": null
    }))?;

    assert_eq!(summary.balance, dec!(95.50));
    assert_eq!(summary.income, dec!(100));
    assert!(summary.expense.is_zero());

    Ok(())
}

#[test]
fn test_summary_from_transactions_keeps_expense_signed() -> Result<()> {
    let rows = json!([
        { "id": 1, "user_id": "user_1", "title": "Salary", "amount": 1000, "category": "Income", "created_at": "2025-07-02" },
        { "id": 2, "user_id": "user_1", "title": "Rent", "amount": -600, "category": "Bills", "created_at": "2025-07-01" },
        { "id": 3, "user_id": "user_1", "title": "Bus", "amount": -2.75, "category": "Transportation", "created_at": "2025-07-01" }
    ]);
    let transactions: Vec<Transaction> = serde_json::from_value(rows)?;

    let summary = Summary::from_transactions(&transactions);

    assert_eq!(summary.income, dec!(1000));
    assert_eq!(summary.expense, dec!(-602.75));
    assert_eq!(summary.balance, dec!(397.25));
    assert!(summary.is_balanced());

    Ok(())
}

#[test]
fn test_summary_exclude_reverses_include() {
    let mut summary = Summary::default();
    summary.include(dec!(50));
    summary.include(dec!(-20));
    summary.exclude(dec!(-20));

    assert_eq!(summary, Summary { balance: dec!(50), income: dec!(50), expense: dec!(0) });
}

#[test]
fn test_new_transaction_uses_service_field_names() -> Result<()> {
    let request = NewTransaction::new(user()?, "Lunch".to_string(), dec!(-12.5), Category::FoodAndDrinks, true);

    let body = serde_json::to_value(&request)?;

    assert_eq!(body, json!({
        "user_id": "user_1",
        "title": "Lunch",
        "amount": -12.5,
        "category": "Food & Drinks",
        "isExpense": true
    }));

    Ok(())
}

mod common;

use std::time::Duration;

use anyhow::{anyhow, Result};
use finance_sync::validation::validate;
use finance_sync::{
    HttpTransactionService, LoadOutcome, ServiceError, SyncController, SyncError, TransactionDraft, TransactionId,
    TransactionService, UserId
};
use rust_decimal_macros::dec;
use serde_json::json;
use tokio::net::TcpListener;

use common::spawn_backend;

fn user(id: &str) -> Result<UserId> {
    UserId::parse(id).ok_or_else(|| anyhow!("user id rejected"))
}

fn client(api_url: &str) -> Result<HttpTransactionService> {
    Ok(HttpTransactionService::new(api_url, Duration::from_secs(5))?)
}

#[tokio::test]
async fn test_list_and_summary_decode_service_payloads() -> Result<()> {
    let backend = spawn_backend().await?;
    let service = client(&backend.api_url)?;
    let user_1 = user("user_1")?;

    let transactions = service.list_transactions(&user_1).await?;
    let summary = service.get_summary(&user_1).await?;

    let ids: Vec<_> = transactions.iter().map(|transaction| transaction.id.to_string()).collect();

    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(transactions[0].amount, dec!(-4.50));
    assert_eq!(summary.balance, dec!(95.50));
    assert!(summary.is_balanced());

    Ok(())
}

#[tokio::test]
async fn test_non_success_status_carries_error_body() -> Result<()> {
    let backend = spawn_backend().await?;
    let service = client(&backend.api_url)?;

    let result = service.list_transactions(&user("broken")?).await;

    assert_eq!(result, Err(ServiceError::status(500, Some("database unavailable"))));
    assert_eq!(service.get_summary(&user("broken")?).await, Err(ServiceError::status(500, None)));

    Ok(())
}

#[tokio::test]
async fn test_unexpected_shape_is_a_decode_error() -> Result<()> {
    let backend = spawn_backend().await?;
    let service = client(&backend.api_url)?;

    let result = service.list_transactions(&user("garbled")?).await;

    assert!(matches!(result, Err(ServiceError::Decode { .. })));

    Ok(())
}

#[tokio::test]
async fn test_create_posts_signed_numeric_amount() -> Result<()> {
    let backend = spawn_backend().await?;
    let service = client(&backend.api_url)?;
    let request = validate(&TransactionDraft::expense("Lunch", "12.50", "Food & Drinks"), &user("user_1")?)?;

    let created = service.create_transaction(&request).await?.ok_or_else(|| anyhow!("no transaction echoed"))?;

    assert_eq!(created.id, TransactionId::from(99));
    assert_eq!(created.amount, dec!(-12.5));
    assert_eq!(backend.received(), vec![json!({
        "user_id": "user_1",
        "title": "Lunch",
        "amount": -12.5,
        "category": "Food & Drinks",
        "isExpense": true
    })]);

    Ok(())
}

#[tokio::test]
async fn test_create_acknowledgement_without_transaction() -> Result<()> {
    let backend = spawn_backend().await?;
    let service = client(&backend.api_url)?;
    let request = validate(&TransactionDraft::income("Ack", "5", "Income"), &user("user_1")?)?;

    assert_eq!(service.create_transaction(&request).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_rejected_create_surfaces_server_reason() -> Result<()> {
    let backend = spawn_backend().await?;
    let controller = SyncController::new(client(&backend.api_url)?, Some(user("user_1")?));

    let result = controller.submit(&TransactionDraft::expense("Reject", "3", "Other")).await;

    assert!(matches!(&result, Err(SyncError::CreateFailed { reason, .. }) if reason == "Title is not allowed"));

    Ok(())
}

#[tokio::test]
async fn test_delete_success_and_not_found() -> Result<()> {
    let backend = spawn_backend().await?;
    let service = client(&backend.api_url)?;

    service.delete_transaction(&TransactionId::from(2)).await?;

    assert_eq!(service.delete_transaction(&TransactionId::from(404)).await, Err(ServiceError::status(404, None)));

    Ok(())
}

#[tokio::test]
async fn test_slow_responses_time_out() -> Result<()> {
    let backend = spawn_backend().await?;
    let service = HttpTransactionService::new(&backend.api_url, Duration::from_millis(100))?;

    let result = service.get_summary(&user("slow")?).await;

    assert!(matches!(result, Err(ServiceError::Transport { message, .. }) if message == "timed out"));

    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    drop(listener);

    let service = client(&format!("http://{address}/api"))?;

    assert!(matches!(service.list_transactions(&user("user_1")?).await, Err(ServiceError::Transport { .. })));

    Ok(())
}

#[tokio::test]
async fn test_controller_syncs_against_http_backend() -> Result<()> {
    let backend = spawn_backend().await?;
    let controller = SyncController::new(client(&backend.api_url)?, Some(user("user_1")?));

    assert_eq!(controller.load_all().await, LoadOutcome::Loaded);

    let state = controller.store().snapshot();

    assert_eq!(state.transactions.len(), 2);
    assert_eq!(state.summary.income, dec!(100));
    assert!(!state.loading);

    controller.delete_transaction(&TransactionId::from(2)).await?;
    assert!(!controller.store().is_loading());

    Ok(())
}

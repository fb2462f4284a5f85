//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use finwell_core::{AIClient, MockBackend};
use tempfile::TempDir;

use crate::commands::{self, truncate, RunContext};

const SNAPSHOT_JSON: &str = r#"{
    "transactions": [
        {"id": "1", "amount": 50, "category": "Food", "type": "expense", "date": "2024-03-05", "description": "Groceries"},
        {"id": "2", "amount": "100.00", "category": "Food", "type": "expense", "date": "2024-02-10"},
        {"id": "3", "amount": 1200, "category": "Rent", "type": "withdrawal", "date": "2024-03-01"},
        {"id": "4", "amount": 4000, "category": "Salary", "type": "income", "date": "2024-03-01"},
        {"id": "5", "amount": "oops", "type": "expense", "date": "2024-03-02"}
    ],
    "profile": {"age": 30, "occupation": "Engineer", "monthly_income": 9000, "monthly_expenses": 4000},
    "accounts": [{"name": "Checking", "balance": 2500.5}],
    "goals": [{"name": "Emergency fund", "current": 1500, "target": 6000}]
}"#;

const SNAPSHOT_CSV: &str = "\
transaction_id,amount,category,transaction_type,transaction_date,description
1,50,Food,expense,2024-03-05,Groceries
2,100,Food,expense,2024-02-10,Market
3,30,,withdrawal,2024-03-07,ATM
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

/// Context pinned to the built-in config so a local override cannot leak into tests
fn test_context(dir: &TempDir) -> RunContext {
    let config = write_file(dir, "finwell.toml", finwell_core::config::DEFAULT_CONFIG);
    RunContext::new(Some(&config), Some("2024-03-15")).unwrap()
}

// ========== Context Tests ==========

#[test]
fn test_resolve_today_explicit() {
    let today = commands::resolve_today(Some("2024-01-31")).unwrap();
    assert_eq!(today, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
}

#[test]
fn test_resolve_today_invalid() {
    assert!(commands::resolve_today(Some("31/01/2024")).is_err());
}

#[test]
fn test_resolve_today_defaults_to_local_date() {
    assert!(commands::resolve_today(None).is_ok());
}

#[test]
fn test_missing_explicit_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(RunContext::new(Some(&missing), None).is_err());
}

#[test]
fn test_invalid_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.toml", "[aggregation]\ntop_categories = 0\n");
    assert!(commands::load_config(Some(&path)).is_err());
}

#[test]
fn test_context_uses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "custom.toml", "[aggregation]\nothers_label = \"Rest\"\n");
    let ctx = RunContext::new(Some(&path), Some("2024-03-15")).unwrap();
    assert_eq!(ctx.analyzer.config().aggregation.others_label, "Rest");
}

#[test]
fn test_load_snapshot_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(commands::load_snapshot(&dir.path().join("missing.json")).is_err());
}

// ========== Insight Command Tests ==========

#[test]
fn test_cmd_insights() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "snapshot.json", SNAPSHOT_JSON);
    let ctx = test_context(&dir);

    assert!(commands::cmd_insights(&ctx, &path, false).is_ok());
    assert!(commands::cmd_insights(&ctx, &path, true).is_ok());
}

#[test]
fn test_cmd_insights_empty_batch() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "empty.json", "[]");
    let ctx = test_context(&dir);

    assert!(commands::cmd_insights(&ctx, &path, false).is_ok());
}

#[test]
fn test_cmd_insights_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "export.csv", SNAPSHOT_CSV);
    let ctx = test_context(&dir);

    assert!(commands::cmd_insights(&ctx, &path, false).is_ok());
}

#[test]
fn test_cmd_insights_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "broken.json", "{ not json");
    let ctx = test_context(&dir);

    assert!(commands::cmd_insights(&ctx, &path, false).is_err());
}

#[test]
fn test_cmd_categories() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "snapshot.json", SNAPSHOT_JSON);
    let ctx = test_context(&dir);

    assert!(commands::cmd_categories(&ctx, &path, None, false).is_ok());
    assert!(commands::cmd_categories(&ctx, &path, Some(1), false).is_ok());
    assert!(commands::cmd_categories(&ctx, &path, Some(0), true).is_ok());
}

#[test]
fn test_cmd_categories_no_spending() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "income.json",
        r#"[{"amount": 10, "type": "income", "date": "2024-03-01"}]"#,
    );
    let ctx = test_context(&dir);

    assert!(commands::cmd_categories(&ctx, &path, None, false).is_ok());
}

// ========== Risk Command Tests ==========

#[test]
fn test_cmd_risk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "snapshot.json", SNAPSHOT_JSON);
    let ctx = test_context(&dir);

    assert!(commands::cmd_risk(&ctx, &path, false).is_ok());
    assert!(commands::cmd_risk(&ctx, &path, true).is_ok());
}

#[test]
fn test_cmd_risk_without_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "export.csv", SNAPSHOT_CSV);
    let ctx = test_context(&dir);

    assert!(commands::cmd_risk(&ctx, &path, false).is_ok());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "snapshot.json", SNAPSHOT_JSON);
    let ctx = test_context(&dir);

    assert!(commands::cmd_report(&ctx, &path, false).is_ok());
    assert!(commands::cmd_report(&ctx, &path, true).is_ok());
}

#[test]
fn test_cmd_report_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "empty.json", "{}");
    let ctx = test_context(&dir);

    assert!(commands::cmd_report(&ctx, &path, false).is_ok());
}

// ========== Recommend Command Tests ==========

#[tokio::test]
async fn test_recommend_with_mock_client() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "snapshot.json", SNAPSHOT_JSON);
    let ctx = test_context(&dir);
    let client = AIClient::mock();
    let goals = vec!["Buy a house".to_string()];

    assert!(commands::recommend_with_client(&ctx, &client, &path, &goals, false)
        .await
        .is_ok());
    assert!(commands::recommend_with_client(&ctx, &client, &path, &[], true)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_recommend_backend_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "snapshot.json", SNAPSHOT_JSON);
    let ctx = test_context(&dir);
    let client = AIClient::Mock(MockBackend::unhealthy());

    let result = commands::recommend_with_client(&ctx, &client, &path, &[], false).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_recommend_missing_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);
    let client = AIClient::mock();

    let result =
        commands::recommend_with_client(&ctx, &client, &dir.path().join("missing.json"), &[], true)
            .await;
    assert!(result.is_err());
}

// ========== Config Command Tests ==========

#[test]
fn test_cmd_config_show() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(&dir, "finwell.toml", finwell_core::config::DEFAULT_CONFIG);
    assert!(commands::cmd_config_show(Some(&config)).is_ok());
}

#[test]
fn test_cmd_config_show_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(commands::cmd_config_show(Some(&dir.path().join("missing.toml"))).is_err());
}

#[test]
fn test_cmd_config_path() {
    assert!(commands::cmd_config_path().is_ok());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Groceries", 20), "Groceries");
    assert_eq!(truncate("A very long category name", 10), "A very ...");
    assert_eq!(truncate("Café Crème Brûlée", 8), "Café ...");
}

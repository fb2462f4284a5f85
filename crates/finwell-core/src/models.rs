//! Domain models for Finwell
//!
//! Records arrive from the data service loosely typed (`TransactionRecord`,
//! `ProfileRecord`) and are normalized once into the strict types the
//! analysis code works with.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ========== Transactions ==========

/// Kind of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
    Deposit,
    Withdrawal,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }

    /// Money leaving the user's accounts
    pub fn is_spending(&self) -> bool {
        matches!(self, Self::Expense | Self::Withdrawal)
    }

    /// Money arriving in the user's accounts
    pub fn is_inflow(&self) -> bool {
        matches!(self, Self::Income | Self::Deposit)
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "deposit" => Ok(Self::Deposit),
            "withdrawal" => Ok(Self::Withdrawal),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<String>,
    /// Signed amount as reported by the bank
    pub amount: f64,
    pub category: Option<String>,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl Transaction {
    /// Build a transaction without id or description (mostly for tests and demos)
    pub fn new(
        amount: f64,
        category: Option<&str>,
        transaction_type: TransactionType,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            amount,
            category: category.map(str::to_string),
            transaction_type,
            date,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    pub fn is_spending(&self) -> bool {
        self.transaction_type.is_spending()
    }

    /// Whether the transaction falls within the given calendar month
    pub fn in_month(&self, month: YearMonth) -> bool {
        YearMonth::of(self.date) == month
    }

    /// Category name, or `fallback` when the transaction has none
    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.category.as_deref().unwrap_or(fallback)
    }

    /// Description for display
    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or("Unknown")
    }
}

/// A calendar month, used to partition transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The immediately preceding calendar month (January wraps to December)
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Amount as delivered by the data service (numeric columns may arrive as strings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Ok(*n),
            Self::Number(n) => Err(Error::InvalidData(format!("Non-finite amount: {}", n))),
            Self::Text(s) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '$').collect();
                cleaned
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| Error::InvalidData(format!("Invalid amount: {}", s)))
            }
        }
    }
}

/// Transaction as fetched from the data service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, alias = "id")]
    pub transaction_id: Option<String>,
    pub amount: RawAmount,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(alias = "type")]
    pub transaction_type: String,
    #[serde(alias = "date")]
    pub transaction_date: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        let amount = record.amount.to_f64()?;
        let transaction_type = record
            .transaction_type
            .parse::<TransactionType>()
            .map_err(Error::InvalidData)?;
        let date = parse_transaction_date(&record.transaction_date)?;

        Ok(Self {
            id: non_empty(record.transaction_id),
            amount,
            category: non_empty(record.category),
            transaction_type,
            date,
            description: non_empty(record.description),
        })
    }
}

/// Result of normalizing a fetched batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedBatch {
    pub transactions: Vec<Transaction>,
    /// Records dropped because they could not be normalized
    pub skipped: usize,
}

/// Normalize a batch of records, skipping (and logging) the ones that are malformed
pub fn normalize_batch(records: Vec<TransactionRecord>) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for (index, record) in records.into_iter().enumerate() {
        let id = record.transaction_id.clone();
        match Transaction::try_from(record) {
            Ok(tx) => batch.transactions.push(tx),
            Err(e) => {
                tracing::warn!(index, id = ?id, error = %e, "Skipping malformed transaction");
                batch.skipped += 1;
            }
        }
    }

    batch
}

/// Parse an ISO-8601 date or timestamp into a calendar date
pub fn parse_transaction_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::InvalidData(format!("Invalid transaction date: {}", s)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// ========== Profiles ==========

/// Profile as fetched from the profile store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub monthly_expenses: Option<f64>,
}

/// Financial profile used for risk classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFinancialProfile {
    pub age: u32,
    pub occupation: String,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

impl UserFinancialProfile {
    pub fn new(age: u32, occupation: &str, monthly_income: f64, monthly_expenses: f64) -> Self {
        Self {
            age,
            occupation: occupation.to_string(),
            monthly_income,
            monthly_expenses,
        }
    }

    /// Build a profile from the stored record, estimating missing income and
    /// expenses from the transaction batch.
    ///
    /// Returns `None` when there is not enough data to classify: no record, no
    /// age, or a missing figure that cannot be estimated because the batch is empty.
    pub fn resolve(record: Option<&ProfileRecord>, transactions: &[Transaction]) -> Option<Self> {
        let record = record?;
        let age = record.age?;

        let monthly_income = match record.monthly_income {
            Some(income) => income,
            None => estimate_monthly(transactions, |t| t.transaction_type.is_inflow())?,
        };
        let monthly_expenses = match record.monthly_expenses {
            Some(expenses) => expenses,
            None => estimate_monthly(transactions, |t| t.transaction_type.is_spending())?,
        };

        Some(Self {
            age,
            occupation: record.occupation.clone().unwrap_or_default(),
            monthly_income,
            monthly_expenses,
        })
    }
}

/// Average monthly amount of matching transactions, treating every 30
/// transactions as one month of history.
fn estimate_monthly(transactions: &[Transaction], predicate: impl Fn(&Transaction) -> bool) -> Option<f64> {
    if transactions.is_empty() {
        return None;
    }
    let months = transactions.len().div_ceil(30) as f64;
    let total: f64 = transactions
        .iter()
        .filter(|t| predicate(*t))
        .map(Transaction::abs_amount)
        .sum();
    Some(total / months)
}

// ========== Accounts & Goals ==========

/// A bank or brokerage account balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default)]
    pub account_type: Option<String>,
    pub balance: f64,
}

/// A savings goal with progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub name: String,
    pub current: f64,
    pub target: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: RawAmount, tx_type: &str, date: &str) -> TransactionRecord {
        TransactionRecord {
            transaction_id: Some("tx-1".to_string()),
            amount,
            category: Some("Food".to_string()),
            transaction_type: tx_type.to_string(),
            transaction_date: date.to_string(),
            description: Some("  ".to_string()),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_transaction_type_parsing_is_case_insensitive() {
        assert_eq!(
            "Withdrawal".parse::<TransactionType>().unwrap(),
            TransactionType::Withdrawal
        );
        assert_eq!(
            "EXPENSE".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
        assert!("transfer".parse::<TransactionType>().is_err());
        assert!(TransactionType::Expense.is_spending());
        assert!(!TransactionType::Deposit.is_spending());
    }

    #[test]
    fn test_record_normalization() {
        let tx = Transaction::try_from(record(
            RawAmount::Text("-1,250.50".to_string()),
            "expense",
            "2024-03-15T10:30:00Z",
        ))
        .unwrap();

        assert_eq!(tx.amount, -1250.5);
        assert_eq!(tx.date, date(2024, 3, 15));
        assert_eq!(tx.category.as_deref(), Some("Food"));
        // Blank description is treated as missing
        assert!(tx.description.is_none());
        assert_eq!(tx.display_description(), "Unknown");
    }

    #[test]
    fn test_parse_transaction_date_formats() {
        assert_eq!(parse_transaction_date("2024-01-31").unwrap(), date(2024, 1, 31));
        assert_eq!(
            parse_transaction_date("2024-01-31T23:59:59.123").unwrap(),
            date(2024, 1, 31)
        );
        assert_eq!(
            parse_transaction_date("2024-01-31 08:00:00").unwrap(),
            date(2024, 1, 31)
        );
        assert_eq!(
            parse_transaction_date("2024-02-01T01:00:00+05:00").unwrap(),
            date(2024, 2, 1)
        );
        assert!(parse_transaction_date("31/01/2024").is_err());
    }

    #[test]
    fn test_normalize_batch_skips_malformed() {
        let records = vec![
            record(RawAmount::Number(-10.0), "expense", "2024-01-01"),
            record(RawAmount::Text("abc".to_string()), "expense", "2024-01-01"),
            record(RawAmount::Number(5.0), "refund", "2024-01-01"),
            record(RawAmount::Number(5.0), "income", "not a date"),
        ];

        let batch = normalize_batch(records);
        assert_eq!(batch.transactions.len(), 1);
        assert_eq!(batch.skipped, 3);
    }

    #[test]
    fn test_record_deserializes_aliases() {
        let json = r#"{"id": "abc", "amount": "12.5", "type": "Deposit", "date": "2024-05-01"}"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        let tx = Transaction::try_from(record).unwrap();
        assert_eq!(tx.id.as_deref(), Some("abc"));
        assert_eq!(tx.transaction_type, TransactionType::Deposit);
        assert!(tx.category.is_none());
    }

    #[test]
    fn test_year_month_previous_wraps() {
        let jan = YearMonth::of(date(2024, 1, 10));
        assert_eq!(jan.previous(), YearMonth { year: 2023, month: 12 });
        let jun = YearMonth::of(date(2024, 6, 1));
        assert_eq!(jun.previous(), YearMonth { year: 2024, month: 5 });
        assert_eq!(jun.to_string(), "2024-06");
    }

    #[test]
    fn test_profile_resolve_uses_record_values() {
        let record = ProfileRecord {
            age: Some(30),
            occupation: Some("Teacher".to_string()),
            monthly_income: Some(4000.0),
            monthly_expenses: Some(2000.0),
        };
        let profile = UserFinancialProfile::resolve(Some(&record), &[]).unwrap();
        assert_eq!(profile, UserFinancialProfile::new(30, "Teacher", 4000.0, 2000.0));
    }

    #[test]
    fn test_profile_resolve_estimates_from_transactions() {
        let d = date(2024, 5, 1);
        let txs = vec![
            Transaction::new(3000.0, None, TransactionType::Income, d),
            Transaction::new(-1000.0, Some("Rent"), TransactionType::Expense, d),
            Transaction::new(-200.0, Some("Food"), TransactionType::Withdrawal, d),
        ];
        let record = ProfileRecord {
            age: Some(40),
            occupation: None,
            monthly_income: None,
            monthly_expenses: None,
        };

        let profile = UserFinancialProfile::resolve(Some(&record), &txs).unwrap();
        assert_eq!(profile.monthly_income, 3000.0);
        assert_eq!(profile.monthly_expenses, 1200.0);
        assert_eq!(profile.occupation, "");
    }

    #[test]
    fn test_profile_resolve_estimates_ignore_sign() {
        let d = date(2024, 5, 1);
        // Mixed sign conventions: spend recorded both negative and positive,
        // inflow split across income and deposit rows
        let mut txs = vec![
            Transaction::new(-500.0, Some("Rent"), TransactionType::Expense, d),
            Transaction::new(300.0, Some("Food"), TransactionType::Expense, d),
            Transaction::new(-100.0, None, TransactionType::Withdrawal, d),
            Transaction::new(2000.0, None, TransactionType::Income, d),
            Transaction::new(-400.0, None, TransactionType::Deposit, d),
        ];
        // 35 rows count as two months of history
        txs.extend((0..30).map(|_| Transaction::new(0.0, None, TransactionType::Deposit, d)));

        let record = ProfileRecord {
            age: Some(35),
            occupation: Some("Nurse".to_string()),
            monthly_income: None,
            monthly_expenses: None,
        };

        let profile = UserFinancialProfile::resolve(Some(&record), &txs).unwrap();
        assert_eq!(profile.monthly_expenses, 450.0);
        assert_eq!(profile.monthly_income, 1200.0);
        assert!(profile.monthly_expenses > 0.0);
    }

    #[test]
    fn test_profile_resolve_insufficient_data() {
        assert!(UserFinancialProfile::resolve(None, &[]).is_none());

        let missing_income = ProfileRecord {
            age: Some(40),
            occupation: Some("Engineer".to_string()),
            monthly_income: None,
            monthly_expenses: Some(100.0),
        };
        assert!(UserFinancialProfile::resolve(Some(&missing_income), &[]).is_none());

        let missing_age = ProfileRecord {
            age: None,
            ..Default::default()
        };
        assert!(UserFinancialProfile::resolve(Some(&missing_age), &[]).is_none());
    }
}

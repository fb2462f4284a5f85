//! Financial snapshots
//!
//! One fetched batch of a user's data: transactions, the stored profile,
//! account balances, and goals. Snapshots are read from JSON (the data
//! service's shape) or from a CSV transaction export.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Account, FinancialGoal, ProfileRecord, RawAmount, TransactionRecord};

/// Raw input for one analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub profile: Option<ProfileRecord>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub goals: Vec<FinancialGoal>,
    /// Monthly income for bill estimates; falls back to the profile's income
    #[serde(default)]
    pub monthly_income: Option<f64>,
}

/// A JSON file is either a full snapshot or a bare transaction list
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Full(FinancialSnapshot),
    Transactions(Vec<TransactionRecord>),
}

impl FinancialSnapshot {
    pub fn from_transactions(transactions: Vec<TransactionRecord>) -> Self {
        Self {
            transactions,
            ..Default::default()
        }
    }

    /// Load a snapshot, picking the format from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

        let snapshot = if is_csv {
            Self::from_transactions(parse_transactions_csv(File::open(path)?)?)
        } else {
            Self::from_json_str(&std::fs::read_to_string(path)?)?
        };

        debug!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            accounts = snapshot.accounts.len(),
            goals = snapshot.goals.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        match serde_json::from_str::<SnapshotFile>(content) {
            Ok(SnapshotFile::Full(snapshot)) => Ok(snapshot),
            Ok(SnapshotFile::Transactions(transactions)) => Ok(Self::from_transactions(transactions)),
            // Re-parse as a snapshot to surface a useful error message
            Err(_) => Ok(serde_json::from_str::<FinancialSnapshot>(content)?),
        }
    }

    /// Income used for bill estimates (explicit value first, then the profile)
    pub fn effective_monthly_income(&self) -> Option<f64> {
        self.monthly_income
            .or_else(|| self.profile.as_ref().and_then(|p| p.monthly_income))
    }
}

/// Column names accepted for each transaction field
const COLUMNS: [(&str, &[&str]); 6] = [
    ("transaction_id", &["transaction_id", "id"]),
    ("amount", &["amount"]),
    ("category", &["category"]),
    ("transaction_type", &["transaction_type", "type"]),
    ("transaction_date", &["transaction_date", "date"]),
    ("description", &["description"]),
];

/// Parse a CSV transaction export
///
/// Format: transaction_id,amount,category,transaction_type,transaction_date,description
/// (header names are case-insensitive; `id`, `type`, and `date` are accepted).
/// Values are kept raw; normalization happens when the batch is analyzed.
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let index = column_index(&headers)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let field = |name: &str| -> Option<String> {
            index
                .get(name)
                .and_then(|i| row.get(*i))
                .map(str::to_string)
                .filter(|s| !s.is_empty())
        };

        records.push(TransactionRecord {
            transaction_id: field("transaction_id"),
            amount: RawAmount::Text(field("amount").unwrap_or_default()),
            category: field("category"),
            transaction_type: field("transaction_type").unwrap_or_default(),
            transaction_date: field("transaction_date").unwrap_or_default(),
            description: field("description"),
        });
    }

    debug!("Parsed {} CSV transaction rows", records.len());
    Ok(records)
}

fn column_index(headers: &StringRecord) -> Result<HashMap<&'static str, usize>> {
    let mut index = HashMap::new();
    for (field, aliases) in COLUMNS {
        if let Some(pos) = headers
            .iter()
            .position(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
        {
            index.insert(field, pos);
        }
    }

    for required in ["amount", "transaction_type", "transaction_date"] {
        if !index.contains_key(required) {
            return Err(Error::InvalidData(format!(
                "CSV is missing required column: {}",
                required
            )));
        }
    }
    Ok(index)
}

//! Transaction aggregation
//!
//! Reduces a transaction batch into per-category totals and current/previous
//! month totals. Every sum is over `abs(amount)` of the transactions matched by
//! the configured [`ExpensePredicate`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{AggregationConfig, ExpensePredicate};
use crate::models::{Transaction, YearMonth};

/// Accumulated spending per category
///
/// Iteration order is by category name; use [`CategoryTotals::ranked`] for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    totals: BTreeMap<String, f64>,
}

/// One row of a ranked category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Share of the overall total (0-100)
    pub percent: f64,
}

impl CategoryTotals {
    pub fn add(&mut self, category: &str, amount: f64) {
        *self.totals.entry(category.to_string()).or_insert(0.0) += amount.abs();
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.totals.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum over all categories
    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    /// Highest-spending category (ties resolved by name)
    pub fn top(&self) -> Option<(&str, f64)> {
        self.sorted().into_iter().next()
    }

    /// Categories sorted by amount descending, truncated to `limit` entries with
    /// the remainder folded into a single `others_label` bucket
    pub fn ranked(&self, limit: usize, others_label: &str) -> Vec<CategoryShare> {
        let total = self.total();
        let share = |amount: f64| if total > 0.0 { amount / total * 100.0 } else { 0.0 };

        let sorted = self.sorted();
        let mut ranked: Vec<CategoryShare> = sorted
            .iter()
            .take(limit)
            .map(|(category, amount)| CategoryShare {
                category: category.to_string(),
                amount: *amount,
                percent: share(*amount),
            })
            .collect();

        if sorted.len() > limit {
            let rest: f64 = sorted[limit..].iter().map(|(_, amount)| amount).sum();
            ranked.push(CategoryShare {
                category: others_label.to_string(),
                amount: rest,
                percent: share(rest),
            });
        }

        ranked
    }

    fn sorted(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Spending in the current and previous calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub current_month: YearMonth,
    pub current_month_total: f64,
    pub last_month_total: f64,
    /// `None` when there was no spending last month
    pub percent_change: Option<f64>,
}

impl MonthlyTotals {
    pub fn new(current_month: YearMonth, current_month_total: f64, last_month_total: f64) -> Self {
        let percent_change = (last_month_total > 0.0)
            .then(|| (current_month_total - last_month_total) / last_month_total * 100.0);
        Self {
            current_month,
            current_month_total,
            last_month_total,
            percent_change,
        }
    }

    pub fn increased(&self) -> bool {
        self.current_month_total > self.last_month_total
    }

    /// Percent change formatted for display ("N/A" without a prior month)
    pub fn percent_change_label(&self) -> String {
        match self.percent_change {
            Some(p) => format!("{:+.1}%", p),
            None => "N/A".to_string(),
        }
    }
}

/// Combined output of one aggregation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub categories: CategoryTotals,
    pub monthly: MonthlyTotals,
}

/// Reduces transaction batches using one fixed predicate
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregationConfig,
}

impl Aggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Whether a transaction counts toward spending totals
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self.config.expense_predicate {
            ExpensePredicate::Spending => tx.is_spending(),
            ExpensePredicate::Categorized => tx.category.is_some(),
        }
    }

    /// Category bucket for a matched transaction
    pub fn category_of<'a>(&'a self, tx: &'a Transaction) -> &'a str {
        tx.category_or(&self.config.uncategorized_label)
    }

    pub fn category_totals(&self, transactions: &[Transaction]) -> CategoryTotals {
        let mut totals = CategoryTotals::default();
        for tx in transactions.iter().filter(|t| self.matches(t)) {
            totals.add(self.category_of(tx), tx.amount);
        }
        totals
    }

    pub fn monthly_totals(&self, transactions: &[Transaction], today: NaiveDate) -> MonthlyTotals {
        let current = YearMonth::of(today);
        let last = current.previous();

        let sum_for = |month: YearMonth| -> f64 {
            transactions
                .iter()
                .filter(|t| self.matches(t) && t.in_month(month))
                .map(Transaction::abs_amount)
                .sum()
        };

        MonthlyTotals::new(current, sum_for(current), sum_for(last))
    }

    pub fn aggregate(&self, transactions: &[Transaction], today: NaiveDate) -> Aggregation {
        let categories = self.category_totals(transactions);
        let monthly = self.monthly_totals(transactions, today);

        tracing::debug!(
            transactions = transactions.len(),
            categories = categories.len(),
            current = monthly.current_month_total,
            last = monthly.last_month_total,
            "Aggregated transactions"
        );

        Aggregation {
            categories,
            monthly,
        }
    }

    /// Matched transactions in the calendar month of `today`
    pub fn current_month<'a>(
        &'a self,
        transactions: &'a [Transaction],
        today: NaiveDate,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        let month = YearMonth::of(today);
        transactions
            .iter()
            .filter(move |t| self.matches(t) && t.in_month(month))
    }
}

//! Insight Generator - runs the registered builders over one aggregated batch

use chrono::NaiveDate;

use crate::aggregate::{Aggregation, Aggregator};
use crate::config::InsightConfig;
use crate::models::Transaction;

use super::types::{Insight, InsightKind};
use super::{
    BudgetRecommendationInsight, CategoryBreakdownInsight, RecentActivityInsight,
    SpendingPatternsInsight,
};

/// Context provided to insight builders
pub struct InsightContext<'a> {
    /// Aggregator that produced `aggregation` (for its predicate and labels)
    pub aggregator: &'a Aggregator,
    pub aggregation: &'a Aggregation,
    /// The originating transaction batch
    pub transactions: &'a [Transaction],
    pub today: NaiveDate,
}

impl<'a> InsightContext<'a> {
    pub fn new(
        aggregator: &'a Aggregator,
        aggregation: &'a Aggregation,
        transactions: &'a [Transaction],
        today: NaiveDate,
    ) -> Self {
        Self {
            aggregator,
            aggregation,
            transactions,
            today,
        }
    }

    /// Matched transactions in the current month, newest first
    pub fn current_month_spending(&self) -> Vec<&'a Transaction> {
        let mut txs: Vec<&Transaction> = self
            .aggregator
            .current_month(self.transactions, self.today)
            .collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        txs
    }

    /// Matched transactions that landed in `category`
    pub fn spending_in_category(&self, category: &str) -> impl Iterator<Item = &'a Transaction> + '_ {
        let aggregator = self.aggregator;
        let category = category.to_string();
        self.transactions
            .iter()
            .filter(move |t| aggregator.matches(t) && aggregator.category_of(t) == category)
    }
}

/// Produces one insight of a fixed kind
pub trait InsightBuilder: Send + Sync {
    fn kind(&self) -> InsightKind;

    fn build(&self, ctx: &InsightContext<'_>) -> Insight;
}

/// Produces the fixed, ordered insight catalogue
pub struct InsightGenerator {
    builders: Vec<Box<dyn InsightBuilder>>,
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new(InsightConfig::default())
    }
}

impl InsightGenerator {
    /// Create a generator with the four built-in insights, in display order
    pub fn new(config: InsightConfig) -> Self {
        let mut generator = Self { builders: vec![] };

        generator.register(Box::new(SpendingPatternsInsight::new(
            config.largest_transactions,
        )));
        generator.register(Box::new(CategoryBreakdownInsight::new()));
        generator.register(Box::new(RecentActivityInsight::new(
            config.example_transactions,
        )));
        generator.register(Box::new(BudgetRecommendationInsight::new(
            config.budget_reduction_percent,
        )));

        generator
    }

    pub fn register(&mut self, builder: Box<dyn InsightBuilder>) {
        self.builders.push(builder);
    }

    /// Build every registered insight; an empty batch yields no insights
    pub fn generate(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        if ctx.transactions.is_empty() {
            tracing::debug!("No transactions, skipping insight generation");
            return vec![];
        }

        self.builders
            .iter()
            .map(|builder| {
                let insight = builder.build(ctx);
                tracing::debug!(insight = builder.kind().as_str(), "Insight built");
                insight
            })
            .collect()
    }

    pub fn kinds(&self) -> Vec<InsightKind> {
        self.builders.iter().map(|b| b.kind()).collect()
    }
}

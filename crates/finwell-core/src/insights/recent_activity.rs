//! Recent Transactions insight
//!
//! Counts the current month's spending transactions. The reported total is the
//! aggregator's current-month total, so the two always agree.

use crate::format::format_currency;

use super::engine::{InsightBuilder, InsightContext};
use super::types::{Insight, InsightKind};

pub struct RecentActivityInsight {
    examples: usize,
}

impl RecentActivityInsight {
    pub fn new(examples: usize) -> Self {
        Self { examples }
    }
}

impl InsightBuilder for RecentActivityInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::TransactionCount
    }

    fn build(&self, ctx: &InsightContext<'_>) -> Insight {
        let current = ctx.current_month_spending();
        let month = ctx.aggregation.monthly.current_month;

        if current.is_empty() {
            return Insight::new(
                self.kind(),
                "No transactions recorded this month.".to_string(),
                format!("Spending dated {} will appear here.", month),
            );
        }

        let description = format!(
            "You made {} {} this month totaling {}.",
            current.len(),
            if current.len() == 1 { "transaction" } else { "transactions" },
            format_currency(ctx.aggregation.monthly.current_month_total)
        );

        let examples: Vec<String> = current
            .iter()
            .take(self.examples)
            .map(|t| {
                format!(
                    "{} on {}: {}",
                    t.display_description(),
                    t.date.format("%b %-d"),
                    format_currency(t.abs_amount())
                )
            })
            .collect();
        let explanation = format!("Recent transactions: {}.", examples.join("; "));

        Insight::new(self.kind(), description, explanation)
    }
}

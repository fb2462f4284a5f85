//! Spending Patterns insight
//!
//! Reports the month-over-month change in spending and lists the largest
//! transactions of the current month.

use crate::format::{format_currency, format_percent};
use crate::models::Transaction;

use super::engine::{InsightBuilder, InsightContext};
use super::types::{Insight, InsightKind};

pub struct SpendingPatternsInsight {
    largest: usize,
}

impl SpendingPatternsInsight {
    pub fn new(largest: usize) -> Self {
        Self { largest }
    }

    fn largest_transactions<'a>(&self, current: &[&'a Transaction]) -> Vec<&'a Transaction> {
        let mut sorted = current.to_vec();
        sorted.sort_by(|a, b| {
            b.abs_amount()
                .total_cmp(&a.abs_amount())
                .then_with(|| b.date.cmp(&a.date))
        });
        sorted.truncate(self.largest);
        sorted
    }
}

impl InsightBuilder for SpendingPatternsInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::SpendingChange
    }

    fn build(&self, ctx: &InsightContext<'_>) -> Insight {
        let monthly = &ctx.aggregation.monthly;

        let description = match monthly.percent_change {
            Some(p) if p > 0.0 => format!(
                "Your spending increased by {} compared to last month.",
                format_percent(p)
            ),
            Some(p) if p < 0.0 => format!(
                "Your spending decreased by {} compared to last month.",
                format_percent(p.abs())
            ),
            Some(_) => "Your spending is unchanged from last month.".to_string(),
            None if monthly.current_month_total > 0.0 => format!(
                "You have spent {} this month, with no spending last month to compare against.",
                format_currency(monthly.current_month_total)
            ),
            None => "No spending recorded this month or last month.".to_string(),
        };

        let mut explanation = format!(
            "You spent {} this month versus {} last month.",
            format_currency(monthly.current_month_total),
            format_currency(monthly.last_month_total)
        );

        let largest = self.largest_transactions(&ctx.current_month_spending());
        if !largest.is_empty() {
            let items: Vec<String> = largest
                .iter()
                .map(|t| format!("{} ({})", t.display_description(), format_currency(t.abs_amount())))
                .collect();
            explanation.push_str(&format!(
                " Largest transactions this month: {}.",
                items.join(", ")
            ));
        }

        Insight::new(self.kind(), description, explanation)
    }
}

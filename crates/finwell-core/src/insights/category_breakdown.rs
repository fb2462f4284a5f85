//! Category Breakdown insight - the single highest-spending category

use crate::format::{format_currency, format_percent};

use super::engine::{InsightBuilder, InsightContext};
use super::types::{Insight, InsightKind};

#[derive(Default)]
pub struct CategoryBreakdownInsight;

impl CategoryBreakdownInsight {
    pub fn new() -> Self {
        Self
    }
}

impl InsightBuilder for CategoryBreakdownInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::TopCategory
    }

    fn build(&self, ctx: &InsightContext<'_>) -> Insight {
        let categories = &ctx.aggregation.categories;
        let total = categories.total();

        let (description, explanation) = match categories.top() {
            Some((name, amount)) if total > 0.0 => (
                format!(
                    "{} is your highest spending category at {} of total spending.",
                    name,
                    format_percent(amount / total * 100.0)
                ),
                format!(
                    "You spent {} on {} out of {} across {} {}.",
                    format_currency(amount),
                    name,
                    format_currency(total),
                    categories.len(),
                    if categories.len() == 1 { "category" } else { "categories" }
                ),
            ),
            _ => (
                "No spending categories to break down yet.".to_string(),
                "Once spending transactions are recorded, this shows where most of your money goes."
                    .to_string(),
            ),
        };

        Insight::new(self.kind(), description, explanation)
    }
}

//! Budget Recommendations insight
//!
//! Templated suggestion to trim the top category, parameterized by its
//! average spend per transaction.

use crate::format::format_currency;

use super::engine::{InsightBuilder, InsightContext};
use super::types::{Insight, InsightKind};

pub struct BudgetRecommendationInsight {
    reduction_percent: u32,
}

impl BudgetRecommendationInsight {
    pub fn new(reduction_percent: u32) -> Self {
        Self { reduction_percent }
    }
}

impl InsightBuilder for BudgetRecommendationInsight {
    fn kind(&self) -> InsightKind {
        InsightKind::BudgetRecommendation
    }

    fn build(&self, ctx: &InsightContext<'_>) -> Insight {
        let Some((category, amount)) = ctx.aggregation.categories.top() else {
            return Insight::new(
                self.kind(),
                "Set a monthly budget for each spending category.".to_string(),
                "Once spending is recorded, recommendations will target your largest category."
                    .to_string(),
            );
        };

        let count = ctx.spending_in_category(category).count().max(1);
        let average = amount / count as f64;
        let savings = amount * self.reduction_percent as f64 / 100.0;

        let description = format!(
            "Consider reducing your {} spending by {}%.",
            category, self.reduction_percent
        );
        let explanation = format!(
            "You average {} per transaction on {} across {} {}. Cutting back by {}% would save about {}.",
            format_currency(average),
            category,
            count,
            if count == 1 { "transaction" } else { "transactions" },
            self.reduction_percent,
            format_currency(savings)
        );

        Insight::new(self.kind(), description, explanation)
    }
}

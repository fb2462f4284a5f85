//! Dashboard smart alerts: spending alert, upcoming bills, savings opportunity

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregation;
use crate::config::AlertsConfig;
use crate::format::format_currency;

/// Raised when this month's spending exceeds last month's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAlert {
    pub increase: f64,
    pub top_category: Option<String>,
    pub top_category_amount: Option<f64>,
    pub message: String,
}

/// Expected recurring bill, estimated from monthly income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingBill {
    pub name: String,
    pub amount: f64,
    pub due: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsOpportunity {
    pub category: String,
    pub amount: f64,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmartAlerts {
    pub spending_alert: Option<SpendingAlert>,
    pub upcoming_bills: Vec<UpcomingBill>,
    pub savings_opportunity: Option<SavingsOpportunity>,
}

impl SmartAlerts {
    pub fn build(
        aggregation: &Aggregation,
        monthly_income: Option<f64>,
        config: &AlertsConfig,
    ) -> Self {
        let top = aggregation.categories.top();
        let monthly = &aggregation.monthly;

        let spending_alert = monthly.increased().then(|| {
            let increase = monthly.current_month_total - monthly.last_month_total;
            let mut message = format!(
                "Your spending is {} higher than last month.",
                format_currency(increase)
            );
            if let Some((name, amount)) = top {
                message.push_str(&format!(
                    " Consider reviewing your expenses in {} ({}).",
                    name,
                    format_currency(amount)
                ));
            }
            SpendingAlert {
                increase,
                top_category: top.map(|(name, _)| name.to_string()),
                top_category_amount: top.map(|(_, amount)| amount),
                message,
            }
        });

        let upcoming_bills = match monthly_income {
            Some(income) if income > 0.0 => config
                .bills
                .iter()
                .map(|bill| UpcomingBill {
                    name: bill.name.clone(),
                    amount: income * bill.income_share,
                    due: bill.due.clone(),
                })
                .collect(),
            _ => vec![],
        };

        let savings_opportunity = top.map(|(name, amount)| {
            let savings = amount * config.savings_reduction_rate;
            SavingsOpportunity {
                category: name.to_string(),
                amount: savings,
                message: format!(
                    "Based on your spending patterns, you could save approximately {} by reducing expenses in {}.",
                    format_currency(savings),
                    name
                ),
            }
        });

        tracing::debug!(
            alert = spending_alert.is_some(),
            bills = upcoming_bills.len(),
            savings = savings_opportunity.is_some(),
            "Built smart alerts"
        );

        Self {
            spending_alert,
            upcoming_bills,
            savings_opportunity,
        }
    }
}

//! Prompt construction for the recommendation service

use super::types::RecommendationRequest;

/// System message sent with every recommendation request
pub const SYSTEM_PROMPT: &str = "You are a knowledgeable financial advisor.";

/// Number of recommendations requested from the model
pub const RECOMMENDATION_COUNT: usize = 3;

pub fn recommendation_prompt(request: &RecommendationRequest) -> String {
    let income = request
        .monthly_income
        .map(|i| format!("${:.2}", i))
        .unwrap_or_else(|| "Unknown".to_string());
    let goals = if request.goals.is_empty() {
        "None specified".to_string()
    } else {
        request.goals.join(", ")
    };
    let transactions = if request.recent_transactions.is_empty() {
        "None".to_string()
    } else {
        request.recent_transactions.join("; ")
    };

    format!(
        r#"As a financial advisor, analyze this user's financial data and provide {count} personalized recommendations:
Monthly Income: {income}
Risk Tolerance: {risk}
Current Goals: {goals}
Recent Transactions: {transactions}

Provide {count} specific, actionable recommendations in JSON format with the following structure:
{{
  "recommendations": [
    {{
      "title": "recommendation title",
      "description": "detailed explanation",
      "type": "savings/investment/budgeting/debt/insurance",
      "priority": 1-5 (1 being highest priority)
    }}
  ]
}}
Respond with JSON only."#,
        count = RECOMMENDATION_COUNT,
        income = income,
        risk = request.risk_tolerance,
        goals = goals,
        transactions = transactions,
    )
}

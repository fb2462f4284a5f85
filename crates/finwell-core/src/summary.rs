//! Net worth and goal progress

use serde::{Deserialize, Serialize};

use crate::models::{Account, FinancialGoal};

/// Progress toward one savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub name: String,
    pub current: f64,
    pub target: f64,
    /// Completion percentage, clamped to 0-100
    pub percent: f64,
}

/// Sum of all account balances
pub fn net_worth(accounts: &[Account]) -> f64 {
    accounts.iter().map(|a| a.balance).sum()
}

pub fn goal_progress(goal: &FinancialGoal) -> GoalProgress {
    let percent = if goal.target > 0.0 {
        (goal.current / goal.target * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    GoalProgress {
        name: goal.name.clone(),
        current: goal.current,
        target: goal.target,
        percent,
    }
}

//! Recurring expense normalization.

use serde::{Deserialize, Serialize};

/// How often a recurring expense is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Convert one charge to a month's worth.
    pub fn to_monthly(self, amount: f64) -> f64 {
        match self {
            Frequency::Daily => amount * 30.0,
            Frequency::Weekly => amount * 4.0,
            Frequency::Monthly => amount,
            Frequency::Yearly => amount / 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: f64,
    pub frequency: Frequency,
}

impl RecurringExpense {
    pub fn monthly_amount(&self) -> f64 {
        self.frequency.to_monthly(self.amount)
    }
}

pub fn recurring_monthly_total(expenses: &[RecurringExpense]) -> f64 {
    expenses.iter().map(RecurringExpense::monthly_amount).sum()
}

pub fn recurring_yearly_total(expenses: &[RecurringExpense]) -> f64 {
    recurring_monthly_total(expenses) * 12.0
}

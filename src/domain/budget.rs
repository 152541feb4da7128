//! Budget breakdown of a trip: per-category sums, shares and daily average.

use serde::Serialize;

use crate::domain::expense::TripExpense;
use crate::domain::types::{Amount, ExpenseCategory};

/// Per-category totals in display order.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct CategoryTotals {
    pub transport: f64,
    pub accommodation: f64,
    pub activities: f64,
    pub food: f64,
    pub other: f64,
}

impl CategoryTotals {
    pub fn from_expenses<'a>(expenses: impl IntoIterator<Item = &'a TripExpense>) -> Self {
        expenses
            .into_iter()
            .fold(Self::default(), |mut acc, expense| {
                *acc.slot_mut(expense.category) += expense.amount.get();
                acc
            })
    }

    fn slot_mut(&mut self, category: ExpenseCategory) -> &mut f64 {
        match category {
            ExpenseCategory::Transport => &mut self.transport,
            ExpenseCategory::Accommodation => &mut self.accommodation,
            ExpenseCategory::Activities => &mut self.activities,
            ExpenseCategory::Food => &mut self.food,
            ExpenseCategory::Other => &mut self.other,
        }
    }

    pub fn get(&self, category: ExpenseCategory) -> f64 {
        match category {
            ExpenseCategory::Transport => self.transport,
            ExpenseCategory::Accommodation => self.accommodation,
            ExpenseCategory::Activities => self.activities,
            ExpenseCategory::Food => self.food,
            ExpenseCategory::Other => self.other,
        }
    }

    pub fn total(&self) -> f64 {
        ExpenseCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// One slice of the budget chart.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BudgetSlice {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BudgetBreakdown {
    pub categories: CategoryTotals,
    /// Non-zero categories only.
    pub slices: Vec<BudgetSlice>,
    pub total: f64,
    pub estimated_budget: Option<f64>,
    pub over_budget: bool,
    pub average_per_day: Option<f64>,
}

impl BudgetBreakdown {
    /// `duration_days` is the trip duration; zero-length trips count as one day.
    pub fn compute(
        categories: CategoryTotals,
        estimated_budget: Amount,
        duration_days: Option<i64>,
    ) -> Self {
        let total = categories.total();
        let slices = ExpenseCategory::ALL
            .iter()
            .filter_map(|category| {
                let amount = categories.get(*category);
                (amount > 0.0).then(|| BudgetSlice {
                    category: *category,
                    amount,
                    percentage: percentage(amount, total),
                })
            })
            .collect();

        let estimated_budget = (estimated_budget.get() > 0.0).then_some(estimated_budget.get());
        let over_budget = estimated_budget.is_some_and(|budget| total > budget);
        let average_per_day = duration_days.map(|days| round2(total / days.max(1) as f64));

        Self {
            categories,
            slices,
            total: round2(total),
            estimated_budget,
            over_budget,
            average_per_day,
        }
    }
}

fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        round2(part / total * 100.0)
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ExpenseId, TripId};

    fn expense(id: i32, category: ExpenseCategory, amount: f64) -> TripExpense {
        TripExpense {
            id: ExpenseId::new(id).unwrap(),
            trip_id: TripId::new(1).unwrap(),
            category,
            amount: Amount::new(amount).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn sums_per_category_and_skips_empty_slices() {
        let expenses = vec![
            expense(1, ExpenseCategory::Transport, 800.0),
            expense(2, ExpenseCategory::Accommodation, 1200.0),
            expense(3, ExpenseCategory::Transport, 200.0),
        ];
        let totals = CategoryTotals::from_expenses(&expenses);
        assert_eq!(totals.transport, 1000.0);

        let breakdown = BudgetBreakdown::compute(totals, Amount::ZERO, Some(10));
        assert_eq!(breakdown.total, 2200.0);
        assert_eq!(breakdown.slices.len(), 2);
        assert_eq!(breakdown.slices[0].category, ExpenseCategory::Transport);
        assert_eq!(breakdown.slices[0].percentage, 45.45);
        assert_eq!(breakdown.slices[1].percentage, 54.55);
        assert_eq!(breakdown.estimated_budget, None);
        assert!(!breakdown.over_budget);
        assert_eq!(breakdown.average_per_day, Some(220.0));
    }

    #[test]
    fn flags_over_budget() {
        let totals = CategoryTotals {
            food: 600.0,
            ..CategoryTotals::default()
        };
        let breakdown = BudgetBreakdown::compute(totals.clone(), Amount::new(500.0).unwrap(), None);
        assert!(breakdown.over_budget);
        assert_eq!(breakdown.average_per_day, None);

        let breakdown = BudgetBreakdown::compute(totals, Amount::new(600.0).unwrap(), Some(0));
        assert!(!breakdown.over_budget);
        assert_eq!(breakdown.average_per_day, Some(600.0));
    }

    #[test]
    fn empty_breakdown_has_no_slices() {
        let breakdown = BudgetBreakdown::compute(CategoryTotals::default(), Amount::ZERO, Some(5));
        assert_eq!(breakdown.total, 0.0);
        assert!(breakdown.slices.is_empty());
        assert_eq!(breakdown.average_per_day, Some(0.0));
    }
}

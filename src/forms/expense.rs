use serde::Deserialize;

use crate::domain::expense::NewTripExpense;
use crate::domain::types::{Amount, ExpenseCategory, SanitizedText, TripId};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
/// Body of the add-expense request.
pub struct AddExpenseForm {
    pub category: String,
    pub amount: f64,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct AddExpensePayload {
    pub category: ExpenseCategory,
    pub amount: Amount,
    pub notes: Option<SanitizedText>,
}

impl AddExpensePayload {
    pub fn into_domain(self, trip_id: TripId) -> NewTripExpense {
        NewTripExpense {
            trip_id,
            category: self.category,
            amount: self.amount,
            notes: self.notes,
        }
    }
}

impl TryFrom<AddExpenseForm> for AddExpensePayload {
    type Error = FormError;

    fn try_from(form: AddExpenseForm) -> Result<Self, Self::Error> {
        Ok(Self {
            category: form.category.parse()?,
            amount: Amount::new(form.amount)?,
            notes: SanitizedText::optional(form.notes),
        })
    }
}

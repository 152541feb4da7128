use serde::{Deserialize, Serialize};

use crate::domain::types::{Amount, ExpenseCategory, ExpenseId, SanitizedText, TripId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TripExpense {
    pub id: ExpenseId,
    pub trip_id: TripId,
    pub category: ExpenseCategory,
    pub amount: Amount,
    pub notes: Option<SanitizedText>,
}

#[derive(Clone, Debug)]
pub struct NewTripExpense {
    pub trip_id: TripId,
    pub category: ExpenseCategory,
    pub amount: Amount,
    pub notes: Option<SanitizedText>,
}

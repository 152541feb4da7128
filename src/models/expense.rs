//! Diesel models representing trip expenses.

use diesel::prelude::*;

use crate::domain::expense::{
    NewTripExpense as DomainNewTripExpense, TripExpense as DomainTripExpense,
};
use crate::domain::types::{Amount, ExpenseId, SanitizedText, TripId, TypeConstraintError};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::trip_expenses)]
/// Diesel model for [`crate::domain::expense::TripExpense`].
pub struct TripExpense {
    pub id: i32,
    pub trip_id: i32,
    pub category: String,
    pub amount: f64,
    pub notes: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::trip_expenses)]
pub struct NewTripExpense<'a> {
    pub trip_id: i32,
    pub category: &'a str,
    pub amount: f64,
    pub notes: Option<&'a str>,
}

impl TryFrom<TripExpense> for DomainTripExpense {
    type Error = TypeConstraintError;

    fn try_from(expense: TripExpense) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ExpenseId::try_from(expense.id)?,
            trip_id: TripId::try_from(expense.trip_id)?,
            category: expense.category.parse()?,
            amount: Amount::new(expense.amount)?,
            notes: optional(expense.notes, SanitizedText::new),
        })
    }
}

impl<'a> From<&'a DomainNewTripExpense> for NewTripExpense<'a> {
    fn from(expense: &'a DomainNewTripExpense) -> Self {
        Self {
            trip_id: expense.trip_id.get(),
            category: expense.category.as_str(),
            amount: expense.amount.get(),
            notes: expense.notes.as_ref().map(SanitizedText::as_str),
        }
    }
}

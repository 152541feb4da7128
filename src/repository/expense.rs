//! Repository implementation for trip expenses.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::{
        expense::{NewTripExpense, TripExpense},
        types::{ExpenseId, TripId},
    },
    models::expense::{NewTripExpense as DbNewTripExpense, TripExpense as DbTripExpense},
    repository::{
        DieselRepository, ExpenseReader, ExpenseWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Expenses of `trip_ids` grouped per trip in insertion order.
pub(crate) fn load_expenses(
    conn: &mut SqliteConnection,
    trip_ids: &[i32],
) -> RepositoryResult<HashMap<TripId, Vec<TripExpense>>> {
    use crate::schema::trip_expenses;

    if trip_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = trip_expenses::table
        .filter(trip_expenses::trip_id.eq_any(trip_ids.to_vec()))
        .order(trip_expenses::id.asc())
        .load::<DbTripExpense>(conn)?;

    let mut by_trip: HashMap<TripId, Vec<TripExpense>> = HashMap::new();
    for row in rows {
        let expense = TripExpense::try_from(row)?;
        by_trip.entry(expense.trip_id).or_default().push(expense);
    }
    Ok(by_trip)
}

impl ExpenseReader for DieselRepository {
    fn get_expense_by_id(&self, id: ExpenseId) -> RepositoryResult<Option<TripExpense>> {
        use crate::schema::trip_expenses;

        let mut conn = self.conn()?;
        let db_expense = trip_expenses::table
            .find(id.get())
            .first::<DbTripExpense>(&mut conn)
            .optional()?;

        db_expense
            .map(|e| TripExpense::try_from(e).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_expenses(&self, trip_id: TripId) -> RepositoryResult<Vec<TripExpense>> {
        let mut conn = self.conn()?;
        Ok(load_expenses(&mut conn, &[trip_id.get()])?
            .remove(&trip_id)
            .unwrap_or_default())
    }
}

impl ExpenseWriter for DieselRepository {
    fn add_expense(&self, new_expense: &NewTripExpense) -> RepositoryResult<TripExpense> {
        use crate::schema::trip_expenses;

        let mut conn = self.conn()?;
        let db_new_expense: DbNewTripExpense = new_expense.into();
        let db_expense = diesel::insert_into(trip_expenses::table)
            .values(&db_new_expense)
            .get_result::<DbTripExpense>(&mut conn)?;

        TripExpense::try_from(db_expense).map_err(RepositoryError::from)
    }

    fn remove_expense(&self, id: ExpenseId) -> RepositoryResult<()> {
        use crate::schema::trip_expenses;

        let mut conn = self.conn()?;
        let affected = diesel::delete(trip_expenses::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::calendar::{CalendarMonth, YearMonth};
use crate::domain::trip::Trip;
use crate::models::auth::AuthenticatedUser;
use crate::repository::TripReader;
use crate::services::{ServiceResult, current_user_id};

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Month grid with the user's trips; missing parts default to `today`'s month.
pub fn month_view<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: CalendarQuery,
    today: NaiveDate,
) -> ServiceResult<CalendarMonth>
where
    R: TripReader + ?Sized,
{
    let user_id = current_user_id(user)?;
    let current = YearMonth::containing(today);
    let month = YearMonth::new(
        params.year.unwrap_or(current.year),
        params.month.unwrap_or(current.month),
    )?;

    let trips: Vec<Trip> = repo
        .list_trips_by_user(user_id)?
        .into_iter()
        .map(|details| details.trip)
        .collect();

    Ok(CalendarMonth::build(month, &trips))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::trip::TripDetails;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::services::test_support::{auth_user, trip};

    #[test]
    fn defaults_to_current_month() {
        let mut repo = MockRepository::new();
        repo.expect_list_trips_by_user().returning(|_| {
            let mut t = trip(1, 1);
            t.start_date = NaiveDate::from_ymd_opt(2024, 3, 10);
            t.end_date = NaiveDate::from_ymd_opt(2024, 3, 12);
            Ok(vec![TripDetails::new(t, Vec::new(), Vec::new())])
        });

        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let view = month_view(&repo, &auth_user(1), CalendarQuery::default(), today).unwrap();
        assert_eq!((view.year, view.month), (2024, 3));
        assert_eq!(view.busy_days().count(), 3);

        let params = CalendarQuery {
            year: None,
            month: Some(4),
        };
        let april = month_view(&repo, &auth_user(1), params, today).unwrap();
        assert_eq!(april.busy_days().count(), 0);
    }

    #[test]
    fn invalid_month_is_rejected() {
        let repo = MockRepository::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let params = CalendarQuery {
            year: Some(2024),
            month: Some(13),
        };
        assert!(matches!(
            month_view(&repo, &auth_user(1), params, today),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn far_future_year_is_rejected() {
        let repo = MockRepository::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let params = CalendarQuery {
            year: Some(262_142),
            month: Some(12),
        };
        assert!(matches!(
            month_view(&repo, &auth_user(1), params, today),
            Err(ServiceError::Form(_))
        ));
    }
}

//! Community feed of public trips, shared links and trip copies.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::domain::community::{CommunityFilter, SharedTrip};
use crate::domain::trip::{NewTrip, TripDetails};
use crate::domain::types::{ShareToken, TripId, TripName, TripStatus};
use crate::dto::CommunityFeed;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{TripReader, TripWriter, UserReader};
use crate::services::{ServiceError, ServiceResult, load_current_user};

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub q: Option<String>,
    pub tag: Option<String>,
}

fn not_found() -> ServiceError {
    ServiceError::NotFound("Trip not found".to_string())
}

/// Public trips matching the search and tag filter, newest first.
pub fn feed<R>(repo: &R, params: FeedQuery) -> ServiceResult<CommunityFeed>
where
    R: TripReader + ?Sized,
{
    let mut filter = CommunityFilter::new();
    if let Some(q) = &params.q {
        filter = filter.search(q);
    }
    if let Some(tag) = &params.tag {
        filter = filter.tag(tag);
    }

    let shared: Vec<SharedTrip> = repo
        .list_public_trips()?
        .iter()
        .map(|(details, author)| SharedTrip::new(details, author))
        .collect();

    let tags: BTreeSet<String> = shared.iter().flat_map(|s| s.tags.iter().cloned()).collect();
    let trips = shared.into_iter().filter(|s| filter.matches(s)).collect();

    Ok(CommunityFeed {
        trips,
        tags: tags.into_iter().collect(),
    })
}

/// Trip behind a share link. Malformed tokens are reported as unknown.
pub fn shared_trip<R>(repo: &R, token: &str) -> ServiceResult<TripDetails>
where
    R: TripReader + ?Sized,
{
    let token = token.parse::<ShareToken>().map_err(|_| not_found())?;
    repo.get_trip_by_share_token(&token)?.ok_or_else(not_found)
}

/// Copies a public (or own) trip into the user's drafts. Stops and planned
/// activities are kept; dates and times are left for the new owner to pick.
pub fn copy_trip<R>(repo: &R, user: &AuthenticatedUser, trip_id: i32) -> ServiceResult<TripDetails>
where
    R: TripReader + TripWriter + UserReader + ?Sized,
{
    let owner = load_current_user(repo, user)?;
    let trip_id = TripId::new(trip_id).map_err(|_| not_found())?;
    let source = repo.get_trip_details(trip_id)?.ok_or_else(not_found)?;
    if !source.trip.is_visible_to(owner.id) {
        return Err(ServiceError::Forbidden(
            "Not authorized to copy this trip".to_string(),
        ));
    }

    let new_trip = NewTrip {
        user_id: owner.id,
        name: TripName::new(format!("Copy of {}", source.trip.name))?,
        description: source.trip.description.clone(),
        start_date: None,
        end_date: None,
        cover_image: source.trip.cover_image.clone(),
        status: TripStatus::Draft,
        is_public: false,
        estimated_budget: source.trip.estimated_budget,
    };

    let copy = repo.copy_trip(&source, &new_trip).map_err(|err| {
        log::error!("Failed to copy trip {trip_id}: {err}");
        err
    })?;
    log::info!("User {} copied trip {trip_id} as {}", owner.id, copy.id);

    repo.get_trip_details(copy.id)?.ok_or_else(not_found)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::city::City;
    use crate::domain::itinerary::{StopDetails, TripStop};
    use crate::domain::types::{
        CityId, CityName, CostIndex, CountryName, NonEmptyString, Rating, StopId,
    };
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{auth_user, trip, user};

    fn stop_in(trip_id: TripId, id: i32, name: &str, region: &str) -> StopDetails {
        StopDetails {
            stop: TripStop {
                id: StopId::new(id).unwrap(),
                trip_id,
                city_id: CityId::new(id).unwrap(),
                order_index: id,
                start_date: None,
                end_date: None,
            },
            city: City {
                id: CityId::new(id).unwrap(),
                name: CityName::new(name).unwrap(),
                country: CountryName::new("Somewhere").unwrap(),
                region: Some(NonEmptyString::new(region).unwrap()),
                image_url: None,
                cost_index: CostIndex::Moderate,
                rating: Rating::new(4.5).unwrap(),
                description: None,
            },
            activities: Vec::new(),
        }
    }

    fn public_trip(id: i32, owner: i32, name: &str, stops: &[(&str, &str)]) -> TripDetails {
        let mut t = trip(id, owner);
        t.name = TripName::new(name).unwrap();
        t.is_public = true;
        let stops = stops
            .iter()
            .enumerate()
            .map(|(i, (city, region))| stop_in(t.id, i as i32 + 1, city, region))
            .collect();
        TripDetails::new(t, stops, Vec::new())
    }

    #[test]
    fn feed_filters_by_tag_and_lists_all_tags() {
        let mut repo = MockRepository::new();
        repo.expect_list_public_trips().returning(|| {
            Ok(vec![
                (
                    public_trip(1, 1, "Ultimate Japan", &[("Tokyo", "Asia"), ("Kyoto", "Asia")]),
                    user(1),
                ),
                (public_trip(2, 2, "Euro Summer", &[("Paris", "Europe")]), user(2)),
            ])
        });

        let all = feed(&repo, FeedQuery::default()).unwrap();
        assert_eq!(all.trips.len(), 2);
        assert_eq!(all.tags, ["Asia", "Europe"]);
        assert_eq!(all.trips[0].destination, "Tokyo, Kyoto");

        let asia = feed(
            &repo,
            FeedQuery {
                q: None,
                tag: Some("asia".into()),
            },
        )
        .unwrap();
        assert_eq!(asia.trips.len(), 1);
        assert_eq!(asia.tags.len(), 2);
    }

    #[test]
    fn malformed_share_token_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_trip_by_share_token().never();
        assert!(matches!(
            shared_trip(&repo, "not-a-token"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn copy_of_private_foreign_trip_is_forbidden() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(user(id.get()))));
        repo.expect_get_trip_details().returning(|id| {
            let mut details = public_trip(id.get(), 2, "Secret", &[]);
            details.trip.is_public = false;
            Ok(Some(details))
        });
        repo.expect_copy_trip().never();

        assert!(matches!(
            copy_trip(&repo, &auth_user(1), 5),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn copy_is_private_draft_without_dates() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(user(id.get()))));
        repo.expect_get_trip_details().returning(|id| {
            Ok(Some(public_trip(
                id.get(),
                if id.get() == 5 { 2 } else { 1 },
                "Japan",
                &[("Tokyo", "Asia")],
            )))
        });
        repo.expect_copy_trip()
            .withf(|source, new_trip| {
                source.trip.id.get() == 5
                    && new_trip.name.as_str() == "Copy of Japan"
                    && new_trip.status == TripStatus::Draft
                    && !new_trip.is_public
                    && new_trip.start_date.is_none()
                    && new_trip.user_id.get() == 1
            })
            .times(1)
            .returning(|_, _| Ok(trip(6, 1)));

        let copy = copy_trip(&repo, &auth_user(1), 5).unwrap();
        assert_eq!(copy.trip.id.get(), 6);
    }
}

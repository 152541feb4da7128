//! Public catalog of cities and activities.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::activity::Activity;
use crate::domain::city::City;
use crate::domain::search::{
    SearchGroup, SearchKind, SearchResult, SearchSort, group_results, sort_results,
};
use crate::domain::types::{ActivityCategory, CityId, CostIndex};
use crate::dto::SearchResponse;
use crate::repository::{ActivityListQuery, ActivityReader, CityListQuery, CityReader};
use crate::services::{DEFAULT_LIMIT, MAX_LIMIT, ServiceResult};

#[derive(Debug, Default, Deserialize)]
pub struct CitiesQuery {
    /// Substring of the city name or country.
    pub q: Option<String>,
    pub region: Option<String>,
    pub cost_index: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivitiesQuery {
    pub q: Option<String>,
    pub city_id: Option<i32>,
    pub category: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub kind: SearchKind,
    pub q: Option<String>,
    #[serde(default)]
    pub sort: SearchSort,
    #[serde(default)]
    pub group: SearchGroup,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn page(skip: Option<usize>, limit: Option<usize>) -> (usize, usize) {
    (
        skip.unwrap_or(0),
        limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
    )
}

pub fn list_cities<R>(repo: &R, params: CitiesQuery) -> ServiceResult<Vec<City>>
where
    R: CityReader + ?Sized,
{
    let (skip, limit) = page(params.skip, params.limit);
    let mut query = CityListQuery::new().paginate(skip, limit);
    if let Some(q) = non_blank(params.q) {
        query = query.search(q);
    }
    if let Some(region) = non_blank(params.region) {
        query = query.region(region);
    }
    if let Some(cost_index) = non_blank(params.cost_index) {
        query = query.cost_index(cost_index.parse::<CostIndex>()?);
    }
    Ok(repo.list_cities(query)?)
}

pub fn list_activities<R>(repo: &R, params: ActivitiesQuery) -> ServiceResult<Vec<Activity>>
where
    R: ActivityReader + ?Sized,
{
    let (skip, limit) = page(params.skip, params.limit);
    let mut query = ActivityListQuery::new().paginate(skip, limit);
    if let Some(q) = non_blank(params.q) {
        query = query.search(q);
    }
    if let Some(city_id) = params.city_id {
        query = query.city(CityId::new(city_id)?);
    }
    if let Some(category) = non_blank(params.category) {
        query = query.category(category.parse::<ActivityCategory>()?);
    }
    Ok(repo.list_activities(query)?)
}

/// Search page: filters the whole catalog of one kind, sorts and groups it.
pub fn search<R>(repo: &R, params: SearchQuery) -> ServiceResult<SearchResponse>
where
    R: CityReader + ActivityReader + ?Sized,
{
    let cities = repo.list_cities(CityListQuery::new())?;
    let mut results: Vec<SearchResult> = match params.kind {
        SearchKind::Cities => cities.iter().map(SearchResult::from_city).collect(),
        SearchKind::Activities => {
            let by_id: HashMap<CityId, &City> = cities.iter().map(|c| (c.id, c)).collect();
            repo.list_activities(ActivityListQuery::new())?
                .iter()
                .map(|a| SearchResult::from_activity(a, by_id.get(&a.city_id).copied()))
                .collect()
        }
    };

    let q = params.q.unwrap_or_default();
    results.retain(|r| r.matches(&q));
    sort_results(&mut results, params.sort);

    Ok(SearchResponse {
        kind: params.kind,
        total: results.len(),
        groups: group_results(results, params.group),
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::{
        ActivityId, ActivityName, Amount, CityName, CountryName, NonEmptyString, Rating,
    };
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    fn city(id: i32, name: &str, country: &str, rating: f64) -> City {
        City {
            id: CityId::new(id).unwrap(),
            name: CityName::new(name).unwrap(),
            country: CountryName::new(country).unwrap(),
            region: Some(NonEmptyString::new("Europe").unwrap()),
            image_url: None,
            cost_index: CostIndex::Moderate,
            rating: Rating::new(rating).unwrap(),
            description: None,
        }
    }

    fn activity(id: i32, city_id: i32, name: &str, cost: f64, category: ActivityCategory) -> Activity {
        Activity {
            id: ActivityId::new(id).unwrap(),
            city_id: CityId::new(city_id).unwrap(),
            name: ActivityName::new(name).unwrap(),
            description: None,
            image_url: None,
            duration_minutes: None,
            cost: Amount::new(cost).unwrap(),
            category,
        }
    }

    #[test]
    fn city_query_is_built_from_params() {
        let mut repo = MockRepository::new();
        repo.expect_list_cities()
            .withf(|query| {
                query.search.as_deref() == Some("par")
                    && query.region.is_none()
                    && query.cost_index == Some(CostIndex::Luxury)
                    && query.pagination.is_some_and(|p| p.skip == 0 && p.limit == DEFAULT_LIMIT)
            })
            .returning(|_| Ok(vec![city(1, "Paris", "France", 4.8)]));

        let params = CitiesQuery {
            q: Some(" par ".into()),
            region: Some("".into()),
            cost_index: Some("luxury".into()),
            ..CitiesQuery::default()
        };
        assert_eq!(list_cities(&repo, params).unwrap().len(), 1);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let repo = MockRepository::new();
        let params = ActivitiesQuery {
            category: Some("flying".into()),
            ..ActivitiesQuery::default()
        };
        assert!(matches!(
            list_activities(&repo, params),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn search_sorts_and_groups_activities() {
        let mut repo = MockRepository::new();
        repo.expect_list_cities().returning(|_| {
            Ok(vec![
                city(1, "Paris", "France", 4.8),
                city(2, "Interlaken", "Switzerland", 4.9),
            ])
        });
        repo.expect_list_activities().returning(|_| {
            Ok(vec![
                activity(1, 1, "Louvre Museum", 17.0, ActivityCategory::Culture),
                activity(2, 2, "Paragliding", 150.0, ActivityCategory::Adventure),
                activity(3, 1, "Seine Cruise", 15.0, ActivityCategory::Sightseeing),
            ])
        });

        let response = search(
            &repo,
            SearchQuery {
                kind: SearchKind::Activities,
                q: Some("france".into()),
                sort: SearchSort::PriceLow,
                group: SearchGroup::Default,
            },
        )
        .unwrap();
        assert_eq!(response.total, 2);
        assert_eq!(response.groups[0].items[0].name, "Seine Cruise");

        let grouped = search(
            &repo,
            SearchQuery {
                group: SearchGroup::Category,
                ..SearchQuery::default()
            },
        )
        .unwrap();
        let keys: Vec<_> = grouped.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["adventure", "culture", "sightseeing"]);
    }
}

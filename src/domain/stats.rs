//! Platform aggregates for the admin panel.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::city::City;
use crate::domain::trip::TripStatusCounts;
use crate::domain::types::{ActivityCategory, CityId, TripStatus, UserId};
use crate::domain::user::User;

/// Minimal projection of a trip used for aggregation.
#[derive(Clone, Debug, PartialEq)]
pub struct TripFact {
    pub user_id: UserId,
    pub status: TripStatus,
    pub start_date: Option<NaiveDate>,
    pub is_public: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MonthlyCount {
    /// `YYYY-MM`.
    pub month: String,
    pub trips: usize,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PopularCity {
    pub city_id: CityId,
    pub name: String,
    pub country: String,
    pub trips: usize,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: ActivityCategory,
    pub count: usize,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RegionShare {
    pub name: String,
    pub value: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PlatformStats {
    pub total_users: usize,
    pub total_trips: usize,
    pub public_trips: usize,
    pub trips_by_status: TripStatusCounts,
    pub monthly_trips: Vec<MonthlyCount>,
    pub popular_cities: Vec<PopularCity>,
    pub popular_categories: Vec<CategoryCount>,
    pub region_distribution: Vec<RegionShare>,
}

pub const POPULAR_LIMIT: usize = 5;

impl PlatformStats {
    /// `stop_cities` holds one city per trip stop.
    pub fn compute(
        total_users: usize,
        trips: &[TripFact],
        stop_cities: &[City],
        scheduled_categories: &[ActivityCategory],
    ) -> Self {
        let mut trips_by_status = TripStatusCounts::default();
        for fact in trips {
            trips_by_status.all += 1;
            match fact.status {
                TripStatus::Draft => trips_by_status.draft += 1,
                TripStatus::Upcoming => trips_by_status.upcoming += 1,
                TripStatus::Ongoing => trips_by_status.ongoing += 1,
                TripStatus::Completed => trips_by_status.completed += 1,
            }
        }

        Self {
            total_users,
            total_trips: trips.len(),
            public_trips: trips.iter().filter(|t| t.is_public).count(),
            trips_by_status,
            monthly_trips: monthly_counts(trips),
            popular_cities: popular_cities(stop_cities, POPULAR_LIMIT),
            popular_categories: popular_categories(scheduled_categories, POPULAR_LIMIT),
            region_distribution: region_distribution(stop_cities),
        }
    }
}

/// Trips per start month, oldest first. Undated trips are skipped.
pub fn monthly_counts(trips: &[TripFact]) -> Vec<MonthlyCount> {
    let mut counts: HashMap<(i32, u32), usize> = HashMap::new();
    for date in trips.iter().filter_map(|t| t.start_date) {
        *counts.entry((date.year(), date.month())).or_default() += 1;
    }
    let mut months: Vec<_> = counts.into_iter().collect();
    months.sort_unstable_by_key(|(key, _)| *key);
    months
        .into_iter()
        .map(|((year, month), trips)| MonthlyCount {
            month: format!("{year:04}-{month:02}"),
            trips,
        })
        .collect()
}

/// Most visited cities by stop count; ties resolved by name.
pub fn popular_cities(stop_cities: &[City], limit: usize) -> Vec<PopularCity> {
    let mut counts: HashMap<CityId, (usize, &City)> = HashMap::new();
    for city in stop_cities {
        counts.entry(city.id).or_insert((0, city)).0 += 1;
    }
    let mut ranked: Vec<PopularCity> = counts
        .into_values()
        .map(|(trips, city)| PopularCity {
            city_id: city.id,
            name: city.name.as_str().to_string(),
            country: city.country.as_str().to_string(),
            trips,
        })
        .collect();
    ranked.sort_by(|a, b| b.trips.cmp(&a.trips).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

pub fn popular_categories(categories: &[ActivityCategory], limit: usize) -> Vec<CategoryCount> {
    let mut counts: HashMap<ActivityCategory, usize> = HashMap::new();
    for category in categories {
        *counts.entry(*category).or_default() += 1;
    }
    let mut ranked: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    ranked.truncate(limit);
    ranked
}

/// Percentage of stops per city region; cities without a region count as `Other`.
pub fn region_distribution(stop_cities: &[City]) -> Vec<RegionShare> {
    if stop_cities.is_empty() {
        return Vec::new();
    }
    let mut counts: HashMap<String, usize> = HashMap::new();
    for city in stop_cities {
        let region = city
            .region
            .as_ref()
            .map(|r| r.as_str().to_string())
            .unwrap_or_else(|| "Other".to_string());
        *counts.entry(region).or_default() += 1;
    }
    let total = stop_cities.len() as f64;
    let mut shares: Vec<(String, usize)> = counts.into_iter().collect();
    shares.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    shares
        .into_iter()
        .map(|(name, count)| RegionShare {
            name,
            value: (count as f64 / total * 1000.0).round() / 10.0,
        })
        .collect()
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserActivity {
    Active,
    Inactive,
}

/// Row of the admin users table.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UserRow {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub trips: usize,
    /// `"Jan 2024"`.
    pub joined: String,
    pub status: UserActivity,
    pub is_admin: bool,
}

impl UserRow {
    /// Users with at least one trip are reported as active.
    pub fn new(user: &User, trips: usize) -> Self {
        Self {
            id: user.id,
            name: user.display_name().to_string(),
            email: user.email.as_str().to_string(),
            trips,
            joined: user.created_at.format("%b %Y").to_string(),
            status: if trips > 0 {
                UserActivity::Active
            } else {
                UserActivity::Inactive
            },
            is_admin: user.is_admin,
        }
    }

    /// Case-insensitive match on name or email.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }
}

/// Counts trips per owner.
pub fn trips_per_user(trips: &[TripFact]) -> HashMap<UserId, usize> {
    let mut counts = HashMap::new();
    for fact in trips {
        *counts.entry(fact.user_id).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::tests::date;
    use crate::domain::types::{CityName, CostIndex, CountryName, NonEmptyString, Rating};

    fn city(id: i32, name: &str, region: Option<&str>) -> City {
        City {
            id: CityId::new(id).unwrap(),
            name: CityName::new(name).unwrap(),
            country: CountryName::new("Somewhere").unwrap(),
            region: region.map(|r| NonEmptyString::new(r).unwrap()),
            image_url: None,
            cost_index: CostIndex::Moderate,
            rating: Rating::new(4.0).unwrap(),
            description: None,
        }
    }

    fn fact(user: i32, status: TripStatus, start: Option<&str>, public: bool) -> TripFact {
        TripFact {
            user_id: UserId::new(user).unwrap(),
            status,
            start_date: start.map(date),
            is_public: public,
        }
    }

    #[test]
    fn computes_platform_stats() {
        let trips = vec![
            fact(1, TripStatus::Upcoming, Some("2024-02-10"), true),
            fact(1, TripStatus::Draft, None, false),
            fact(2, TripStatus::Completed, Some("2024-01-03"), false),
            fact(2, TripStatus::Upcoming, Some("2024-02-20"), false),
        ];
        let paris = city(1, "Paris", Some("Europe"));
        let tokyo = city(2, "Tokyo", Some("Asia"));
        let stops = vec![paris.clone(), tokyo, paris, city(3, "Nowhere", None)];
        let categories = vec![
            ActivityCategory::Food,
            ActivityCategory::Sightseeing,
            ActivityCategory::Food,
        ];

        let stats = PlatformStats::compute(3, &trips, &stops, &categories);
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_trips, 4);
        assert_eq!(stats.public_trips, 1);
        assert_eq!(stats.trips_by_status.upcoming, 2);
        assert_eq!(
            stats.monthly_trips,
            vec![
                MonthlyCount {
                    month: "2024-01".into(),
                    trips: 1
                },
                MonthlyCount {
                    month: "2024-02".into(),
                    trips: 2
                },
            ]
        );
        assert_eq!(stats.popular_cities[0].name, "Paris");
        assert_eq!(stats.popular_cities[0].trips, 2);
        assert_eq!(stats.popular_categories[0].category, ActivityCategory::Food);
        assert_eq!(stats.region_distribution[0].name, "Europe");
        assert_eq!(stats.region_distribution[0].value, 50.0);
        assert_eq!(stats.region_distribution.len(), 3);
    }

    #[test]
    fn empty_platform() {
        let stats = PlatformStats::compute(0, &[], &[], &[]);
        assert_eq!(stats.total_trips, 0);
        assert!(stats.monthly_trips.is_empty());
        assert!(stats.popular_cities.is_empty());
        assert!(stats.region_distribution.is_empty());
    }

    #[test]
    fn counts_trips_per_user() {
        let trips = vec![
            fact(1, TripStatus::Draft, None, false),
            fact(1, TripStatus::Draft, None, false),
            fact(2, TripStatus::Draft, None, false),
        ];
        let counts = trips_per_user(&trips);
        assert_eq!(counts[&UserId::new(1).unwrap()], 2);
        assert_eq!(counts.get(&UserId::new(3).unwrap()), None);
    }
}

//! Response bodies that are not plain domain values.

use serde::Serialize;

use crate::domain::city::City;
use crate::domain::community::SharedTrip;
use crate::domain::dashboard::TravelStats;
use crate::domain::search::{ResultGroup, SearchKind};
use crate::domain::trip::{TripStatusCounts, TripSummary};

#[derive(Debug, Serialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardData {
    /// Name used in the greeting.
    pub name: String,
    pub stats: TravelStats,
    pub counts: TripStatusCounts,
    pub upcoming_trips: Vec<TripSummary>,
    pub recommended_cities: Vec<City>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub kind: SearchKind,
    pub total: usize,
    pub groups: Vec<ResultGroup>,
}

#[derive(Debug, Serialize)]
pub struct CommunityFeed {
    pub trips: Vec<SharedTrip>,
    /// Every tag present on a public trip, sorted.
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub success: bool,
}

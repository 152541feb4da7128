//! Public trips as shown on the community feed.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::trip::TripDetails;
use crate::domain::types::TripId;
use crate::domain::user::User;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Author {
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SharedTrip {
    pub trip_id: TripId,
    pub title: String,
    /// Comma separated stop cities, e.g. `"Tokyo, Kyoto, Osaka"`.
    pub destination: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub author: Author,
    pub dates: Option<String>,
    pub duration_days: Option<i64>,
    /// Distinct regions of the stop cities in stop order.
    pub tags: Vec<String>,
    pub share_token: Option<String>,
}

impl SharedTrip {
    pub fn new(details: &TripDetails, author: &User) -> Self {
        let trip = &details.trip;
        let mut tags: Vec<String> = Vec::new();
        for region in details.stops.iter().filter_map(|s| s.city.region.as_ref()) {
            if !tags.iter().any(|t| t == region.as_str()) {
                tags.push(region.as_str().to_string());
            }
        }

        Self {
            trip_id: trip.id,
            title: trip.name.as_str().to_string(),
            destination: details.destinations().join(", "),
            description: trip.description.as_ref().map(|d| d.as_str().to_string()),
            cover_image: trip.cover_image.as_ref().map(|c| c.as_str().to_string()),
            author: Author {
                name: author.display_name().to_string(),
                avatar: author.avatar_url.as_ref().map(|a| a.as_str().to_string()),
            },
            dates: date_range_label(trip.start_date, trip.end_date),
            duration_days: details.duration_days,
            tags,
            share_token: trip.share_token.as_ref().map(|t| t.as_str().to_string()),
        }
    }
}

/// `"Mar 10 - Mar 25, 2024"`, or with both years when the range spans years.
pub fn date_range_label(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) if start.year() == end.year() => Some(format!(
            "{} - {}",
            start.format("%b %-d"),
            end.format("%b %-d, %Y")
        )),
        (Some(start), Some(end)) => Some(format!(
            "{} - {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        )),
        (Some(start), None) => Some(start.format("%b %-d, %Y").to_string()),
        _ => None,
    }
}

/// Search and tag filter for the community feed.
#[derive(Clone, Debug, Default)]
pub struct CommunityFilter {
    search: Option<String>,
    tag: Option<String>,
}

impl CommunityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl AsRef<str>) -> Self {
        let query = query.as_ref().trim().to_lowercase();
        self.search = (!query.is_empty()).then_some(query);
        self
    }

    /// `"all"` and blank tags match everything.
    pub fn tag(mut self, tag: impl AsRef<str>) -> Self {
        let tag = tag.as_ref().trim().to_lowercase();
        self.tag = (!tag.is_empty() && tag != "all").then_some(tag);
        self
    }

    pub fn matches(&self, shared: &SharedTrip) -> bool {
        let matches_search = self.search.as_ref().is_none_or(|q| {
            shared.title.to_lowercase().contains(q) || shared.destination.to_lowercase().contains(q)
        });
        let matches_tag = self
            .tag
            .as_ref()
            .is_none_or(|tag| shared.tags.iter().any(|t| t.to_lowercase() == *tag));
        matches_search && matches_tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::tests::date;

    fn shared(title: &str, destination: &str, tags: &[&str]) -> SharedTrip {
        SharedTrip {
            trip_id: TripId::new(1).unwrap(),
            title: title.to_string(),
            destination: destination.to_string(),
            description: None,
            cover_image: None,
            author: Author {
                name: "Sarah Chen".to_string(),
                avatar: None,
            },
            dates: None,
            duration_days: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            share_token: None,
        }
    }

    #[test]
    fn date_labels() {
        assert_eq!(
            date_range_label(Some(date("2024-03-10")), Some(date("2024-03-25"))).as_deref(),
            Some("Mar 10 - Mar 25, 2024")
        );
        assert_eq!(
            date_range_label(Some(date("2024-12-28")), Some(date("2025-01-04"))).as_deref(),
            Some("Dec 28, 2024 - Jan 4, 2025")
        );
        assert_eq!(date_range_label(None, Some(date("2024-03-25"))), None);
    }

    #[test]
    fn filter_by_search_and_tag() {
        let japan = shared("Ultimate Japan Adventure", "Tokyo, Kyoto, Osaka", &["Asia"]);
        assert!(CommunityFilter::new().matches(&japan));
        assert!(CommunityFilter::new().search("kyoto").matches(&japan));
        assert!(CommunityFilter::new().search("ultimate").matches(&japan));
        assert!(!CommunityFilter::new().search("paris").matches(&japan));
        assert!(CommunityFilter::new().tag("asia").matches(&japan));
        assert!(CommunityFilter::new().tag("all").matches(&japan));
        assert!(!CommunityFilter::new().tag("europe").matches(&japan));
    }
}

//! Unified search results over cities and activities with sort and grouping.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::activity::Activity;
use crate::domain::city::City;

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    Activities,
    Cities,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SearchSort {
    /// Highest rated first.
    #[default]
    Popular,
    PriceLow,
    PriceHigh,
    Name,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchGroup {
    #[default]
    Default,
    Category,
    Location,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    City,
    Activity,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SearchResult {
    pub id: i32,
    #[serde(rename = "type")]
    pub result_type: ResultType,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}

impl SearchResult {
    pub fn from_city(city: &City) -> Self {
        Self {
            id: city.id.get(),
            result_type: ResultType::City,
            name: city.name.as_str().to_string(),
            description: city
                .description
                .as_ref()
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
            image: city.image_url.as_ref().map(|u| u.as_str().to_string()),
            rating: Some(city.rating.get()),
            price: None,
            duration: None,
            location: Some(city.country.as_str().to_string()),
            category: city.region.as_ref().map(|r| r.as_str().to_string()),
        }
    }

    /// `city` supplies the location label when known.
    pub fn from_activity(activity: &Activity, city: Option<&City>) -> Self {
        Self {
            id: activity.id.get(),
            result_type: ResultType::Activity,
            name: activity.name.as_str().to_string(),
            description: activity
                .description
                .as_ref()
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
            image: activity.image_url.as_ref().map(|u| u.as_str().to_string()),
            rating: None,
            price: Some(activity.cost.get()),
            duration: activity.duration_label(),
            location: city.map(City::location),
            category: Some(activity.category.as_str().to_string()),
        }
    }

    /// Case-insensitive substring match on name, description or location.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self
                .location
                .as_ref()
                .is_some_and(|l| l.to_lowercase().contains(&query))
    }
}

/// Sorts in place; ties keep their relative order.
pub fn sort_results(results: &mut [SearchResult], sort: SearchSort) {
    match sort {
        SearchSort::Popular => results.sort_by(|a, b| desc_none_last(a.rating, b.rating)),
        SearchSort::PriceLow => results.sort_by(|a, b| asc_none_last(a.price, b.price)),
        SearchSort::PriceHigh => results.sort_by(|a, b| desc_none_last(a.price, b.price)),
        SearchSort::Name => results.sort_by_key(|r| r.name.to_lowercase()),
    }
}

fn asc_none_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn desc_none_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        _ => asc_none_last(a, b),
    }
}

pub const UNGROUPED_KEY: &str = "Other";

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ResultGroup {
    pub key: String,
    pub items: Vec<SearchResult>,
}

/// Groups results by key in ascending key order, preserving item order inside
/// each group. `SearchGroup::Default` yields a single unnamed group.
pub fn group_results(results: Vec<SearchResult>, group: SearchGroup) -> Vec<ResultGroup> {
    let key_of = |r: &SearchResult| -> Option<String> {
        match group {
            SearchGroup::Default => None,
            SearchGroup::Category => r.category.clone(),
            SearchGroup::Location => r.location.clone(),
        }
    };

    if group == SearchGroup::Default {
        return vec![ResultGroup {
            key: String::new(),
            items: results,
        }];
    }

    let mut groups: BTreeMap<String, Vec<SearchResult>> = BTreeMap::new();
    for result in results {
        let key = key_of(&result).unwrap_or_else(|| UNGROUPED_KEY.to_string());
        groups.entry(key).or_default().push(result);
    }
    groups
        .into_iter()
        .map(|(key, items)| ResultGroup { key, items })
        .collect()
}

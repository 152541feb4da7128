//! Destination cities offered by the explore catalog.

use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CityId, CityName, CostIndex, CountryName, ImageUrl, NonEmptyString, Rating, SanitizedText,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct City {
    pub id: CityId,
    pub name: CityName,
    pub country: CountryName,
    /// Continent-level grouping such as `Europe` or `Asia`.
    pub region: Option<NonEmptyString>,
    pub image_url: Option<ImageUrl>,
    pub cost_index: CostIndex,
    pub rating: Rating,
    pub description: Option<SanitizedText>,
}

impl City {
    /// `"Paris, France"` style label used as a search result location.
    pub fn location(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

#[derive(Clone, Debug)]
pub struct NewCity {
    pub name: CityName,
    pub country: CountryName,
    pub region: Option<NonEmptyString>,
    pub image_url: Option<ImageUrl>,
    pub cost_index: CostIndex,
    pub rating: Rating,
    pub description: Option<SanitizedText>,
}

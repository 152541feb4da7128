//! Diesel models representing catalog cities.

use diesel::prelude::*;

use crate::domain::city::{City as DomainCity, NewCity as DomainNewCity};
use crate::domain::types::{
    CityId, CityName, CountryName, ImageUrl, NonEmptyString, Rating, SanitizedText,
    TypeConstraintError,
};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::cities)]
/// Diesel model for [`crate::domain::city::City`].
pub struct City {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub region: Option<String>,
    pub image_url: Option<String>,
    pub cost_index: String,
    pub rating: f64,
    pub description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cities)]
/// Insertable form of [`City`].
pub struct NewCity<'a> {
    pub name: &'a str,
    pub country: &'a str,
    pub region: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub cost_index: &'a str,
    pub rating: f64,
    pub description: Option<&'a str>,
}

impl TryFrom<City> for DomainCity {
    type Error = TypeConstraintError;

    fn try_from(city: City) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CityId::try_from(city.id)?,
            name: CityName::new(city.name)?,
            country: CountryName::new(city.country)?,
            region: optional(city.region, NonEmptyString::new),
            image_url: optional(city.image_url, ImageUrl::new),
            cost_index: city.cost_index.parse()?,
            rating: Rating::new(city.rating)?,
            description: optional(city.description, SanitizedText::new),
        })
    }
}

impl<'a> From<&'a DomainNewCity> for NewCity<'a> {
    fn from(city: &'a DomainNewCity) -> Self {
        Self {
            name: city.name.as_str(),
            country: city.country.as_str(),
            region: city.region.as_ref().map(NonEmptyString::as_str),
            image_url: city.image_url.as_ref().map(ImageUrl::as_str),
            cost_index: city.cost_index.as_str(),
            rating: city.rating.get(),
            description: city.description.as_ref().map(SanitizedText::as_str),
        }
    }
}

//! Diesel models representing catalog activities.

use diesel::prelude::*;

use crate::domain::activity::{Activity as DomainActivity, NewActivity as DomainNewActivity};
use crate::domain::types::{
    ActivityId, ActivityName, Amount, CityId, ImageUrl, SanitizedText, TypeConstraintError,
};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::activities)]
/// Diesel model for [`crate::domain::activity::Activity`].
pub struct Activity {
    pub id: i32,
    pub city_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub cost: f64,
    pub category: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::activities)]
/// Insertable form of [`Activity`].
pub struct NewActivity<'a> {
    pub city_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub duration_minutes: Option<i32>,
    pub cost: f64,
    pub category: &'a str,
}

impl TryFrom<Activity> for DomainActivity {
    type Error = TypeConstraintError;

    fn try_from(activity: Activity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActivityId::try_from(activity.id)?,
            city_id: CityId::try_from(activity.city_id)?,
            name: ActivityName::new(activity.name)?,
            description: optional(activity.description, SanitizedText::new),
            image_url: optional(activity.image_url, ImageUrl::new),
            duration_minutes: activity.duration_minutes,
            cost: Amount::new(activity.cost)?,
            category: activity.category.parse()?,
        })
    }
}

impl<'a> From<&'a DomainNewActivity> for NewActivity<'a> {
    fn from(activity: &'a DomainNewActivity) -> Self {
        Self {
            city_id: activity.city_id.get(),
            name: activity.name.as_str(),
            description: activity.description.as_ref().map(SanitizedText::as_str),
            image_url: activity.image_url.as_ref().map(ImageUrl::as_str),
            duration_minutes: activity.duration_minutes,
            cost: activity.cost.get(),
            category: activity.category.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ActivityCategory;

    #[test]
    fn activity_into_domain() {
        let db = Activity {
            id: 1,
            city_id: 2,
            name: "Eiffel Tower Tour".into(),
            description: Some("Skip-the-line access".into()),
            image_url: None,
            duration_minutes: Some(180),
            cost: 65.0,
            category: "sightseeing".into(),
        };
        let activity = DomainActivity::try_from(db).expect("valid activity");
        assert_eq!(activity.category, ActivityCategory::Sightseeing);
        assert_eq!(activity.duration_label().as_deref(), Some("3 hours"));
    }

    #[test]
    fn negative_cost_is_rejected() {
        let db = Activity {
            id: 1,
            city_id: 2,
            name: "Broken".into(),
            description: None,
            image_url: None,
            duration_minutes: None,
            cost: -1.0,
            category: "food".into(),
        };
        assert_eq!(
            DomainActivity::try_from(db),
            Err(TypeConstraintError::InvalidAmount)
        );
    }
}

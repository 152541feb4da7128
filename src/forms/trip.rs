use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::trip::{NewTrip, UpdateTrip, ensure_date_order};
use crate::domain::types::{Amount, ImageUrl, SanitizedText, TripName, TripStatus, UserId};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
/// Body of the create-trip request.
pub struct CreateTripForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    pub status: Option<String>,
    pub is_public: Option<bool>,
    pub estimated_budget: Option<f64>,
}

#[derive(Debug)]
pub struct CreateTripPayload {
    pub name: TripName,
    pub description: Option<SanitizedText>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_image: Option<ImageUrl>,
    pub status: TripStatus,
    pub is_public: bool,
    pub estimated_budget: Amount,
}

impl CreateTripPayload {
    pub fn into_domain(self, user_id: UserId) -> NewTrip {
        NewTrip {
            user_id,
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            cover_image: self.cover_image,
            status: self.status,
            is_public: self.is_public,
            estimated_budget: self.estimated_budget,
        }
    }
}

impl TryFrom<CreateTripForm> for CreateTripPayload {
    type Error = FormError;

    fn try_from(form: CreateTripForm) -> Result<Self, Self::Error> {
        form.validate()?;
        ensure_date_order(form.start_date, form.end_date)?;
        Ok(Self {
            name: TripName::new(form.name)?,
            description: SanitizedText::optional(form.description),
            start_date: form.start_date,
            end_date: form.end_date,
            cover_image: non_blank(form.cover_image).map(ImageUrl::new).transpose()?,
            status: non_blank(form.status)
                .map(|s| s.parse::<TripStatus>())
                .transpose()?
                .unwrap_or_default(),
            is_public: form.is_public.unwrap_or(false),
            estimated_budget: form
                .estimated_budget
                .map(Amount::new)
                .transpose()?
                .unwrap_or(Amount::ZERO),
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Body of the update-trip request; absent fields are left unchanged.
pub struct UpdateTripForm {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    pub status: Option<String>,
    pub is_public: Option<bool>,
    pub estimated_budget: Option<f64>,
}

impl TryFrom<UpdateTripForm> for UpdateTrip {
    type Error = FormError;

    fn try_from(form: UpdateTripForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: form.name.map(TripName::new).transpose()?,
            description: SanitizedText::optional(form.description),
            start_date: form.start_date,
            end_date: form.end_date,
            cover_image: non_blank(form.cover_image).map(ImageUrl::new).transpose()?,
            status: non_blank(form.status)
                .map(|s| s.parse::<TripStatus>())
                .transpose()?,
            is_public: form.is_public,
            estimated_budget: form.estimated_budget.map(Amount::new).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_form() -> CreateTripForm {
        CreateTripForm {
            name: "Summer in Europe".into(),
            description: Some("<b>Paris</b> and Barcelona".into()),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 15),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 28),
            cover_image: Some(" ".into()),
            status: None,
            is_public: None,
            estimated_budget: Some(3500.0),
        }
    }

    #[test]
    fn create_defaults_to_private_draft() {
        let payload = CreateTripPayload::try_from(create_form()).unwrap();
        assert_eq!(payload.status, TripStatus::Draft);
        assert!(!payload.is_public);
        assert!(payload.cover_image.is_none());
        assert_eq!(payload.estimated_budget.get(), 3500.0);

        let trip = payload.into_domain(UserId::new(3).unwrap());
        assert_eq!(trip.user_id.get(), 3);
    }

    #[test]
    fn create_rejects_reversed_dates_and_unknown_status() {
        let mut form = create_form();
        form.end_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert!(CreateTripPayload::try_from(form).is_err());

        let mut form = create_form();
        form.status = Some("cancelled".into());
        assert!(matches!(
            CreateTripPayload::try_from(form),
            Err(FormError::InvalidValue(_))
        ));

        let mut form = create_form();
        form.name = "   ".into();
        assert!(CreateTripPayload::try_from(form).is_err());
    }

    #[test]
    fn update_keeps_only_given_fields() {
        let form = UpdateTripForm {
            status: Some("Completed".into()),
            ..UpdateTripForm::default()
        };
        let update = UpdateTrip::try_from(form).unwrap();
        assert_eq!(update.status, Some(TripStatus::Completed));
        assert!(update.name.is_none());
        assert!(update.estimated_budget.is_none());
    }

    #[test]
    fn update_rejects_negative_budget() {
        let form = UpdateTripForm {
            estimated_budget: Some(-5.0),
            ..UpdateTripForm::default()
        };
        assert!(matches!(
            UpdateTrip::try_from(form),
            Err(FormError::InvalidAmount)
        ));
    }
}

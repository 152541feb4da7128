//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, normalized
//! email, non-empty names, known enum labels) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::{ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::{ValidateEmail, ValidateUrl};

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Provided amount was negative or not a finite number.
    #[error("amount must be a non-negative number")]
    InvalidAmount,
    /// Provided rating was outside of `0..=5`.
    #[error("rating must be between 0 and 5")]
    InvalidRating,
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for a registered user.");
id_newtype!(TripId, "Unique identifier for a trip.");
id_newtype!(StopId, "Unique identifier for a trip stop.");
id_newtype!(CityId, "Unique identifier for a city.");
id_newtype!(ActivityId, "Unique identifier for a catalog activity.");
id_newtype!(
    StopActivityId,
    "Unique identifier for an activity scheduled at a stop."
);
id_newtype!(ExpenseId, "Unique identifier for a trip expense.");

/// Lower-cased and validated email address of a user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserEmail(String);

impl UserEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for UserEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserEmail {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserEmail> for String {
    fn from(value: UserEmail) -> Self {
        value.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(TripName, "Trip title enforcing trimmed, non-empty values.");
non_empty_string_newtype!(CityName, "City name enforcing trimmed, non-empty values.");
non_empty_string_newtype!(
    CountryName,
    "Country name enforcing trimmed, non-empty values."
);
non_empty_string_newtype!(
    ActivityName,
    "Activity name enforcing trimmed, non-empty values."
);

/// Free text that has been stripped of unsafe HTML and trimmed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SanitizedText(String);

impl SanitizedText {
    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    /// Sanitizes an optional input, mapping blank results to `None`.
    pub fn optional<S: Into<String>>(value: Option<S>) -> Option<Self> {
        value.and_then(|v| Self::new(v).ok())
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SanitizedText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SanitizedText> for String {
    fn from(value: SanitizedText) -> Self {
        value.0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Non-empty, trimmed image URL.
pub struct ImageUrl(String);

impl ImageUrl {
    /// Ensures a trimmed URL is non-empty and well formed before wrapping.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let url = NonEmptyString::new(value)?;

        if !url.as_str().validate_url() {
            Err(TypeConstraintError::InvalidUrl)
        } else {
            Ok(Self(url.into_inner()))
        }
    }

    /// Borrow the URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the owned URL.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ImageUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImageUrl> for String {
    fn from(value: ImageUrl) -> Self {
        value.0
    }
}

/// Non-negative, finite monetary amount.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd, Default)]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    /// Rejects negative and non-finite amounts.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidAmount)
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Amount {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// City rating on a `0..=5` scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd, Default)]
pub struct Rating(f64);

impl Rating {
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if (0.0..=5.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidRating)
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Opaque token used to share a trip by link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareToken(String);

impl ShareToken {
    /// Generate a new random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ShareToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShareToken {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = Uuid::parse_str(s.trim()).map_err(|_| TypeConstraintError::InvalidUuid)?;
        Ok(Self(parsed.simple().to_string()))
    }
}

/// Generates a lower-case string enum with `as_str`, `Display`, `FromStr` and
/// the list of all variants.
macro_rules! label_enum {
    ($name:ident, $doc:expr, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($label => Ok($name::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(other.to_string())),
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

label_enum!(TripStatus, "Lifecycle label of a trip.", {
    Draft => "draft",
    Upcoming => "upcoming",
    Ongoing => "ongoing",
    Completed => "completed",
});

impl Default for TripStatus {
    fn default() -> Self {
        TripStatus::Draft
    }
}

label_enum!(CostIndex, "Relative price level of a city.", {
    Budget => "budget",
    Moderate => "moderate",
    Expensive => "expensive",
    Luxury => "luxury",
});

label_enum!(ActivityCategory, "Kind of a catalog activity.", {
    Sightseeing => "sightseeing",
    Food => "food",
    Adventure => "adventure",
    Culture => "culture",
    Relaxation => "relaxation",
    Shopping => "shopping",
});

label_enum!(ExpenseCategory, "Bucket a trip expense is booked under.", {
    Transport => "transport",
    Accommodation => "accommodation",
    Activities => "activities",
    Food => "food",
    Other => "other",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert!(TripId::new(1).is_ok());
        assert_eq!(TripId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(CityId::new(-3), Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn email_is_normalized() {
        let email = UserEmail::new("  Sarah@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "sarah@example.com");
        assert_eq!(
            UserEmail::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn names_are_trimmed_and_non_empty() {
        assert_eq!(TripName::new("  Japan  ").unwrap().as_str(), "Japan");
        assert_eq!(TripName::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn sanitized_text_strips_scripts() {
        let text = SanitizedText::new("Day <script>alert(1)</script>one").unwrap();
        assert_eq!(text.as_str(), "Day one");
        assert!(SanitizedText::optional(Some("<script>x</script>")).is_none());
        assert!(SanitizedText::optional::<String>(None).is_none());
    }

    #[test]
    fn amount_rejects_negative_and_nan() {
        assert!(Amount::new(0.0).is_ok());
        assert_eq!(Amount::new(-1.0), Err(TypeConstraintError::InvalidAmount));
        assert_eq!(Amount::new(f64::NAN), Err(TypeConstraintError::InvalidAmount));
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(4.9).is_ok());
        assert_eq!(Rating::new(5.1), Err(TypeConstraintError::InvalidRating));
    }

    #[test]
    fn label_enums_parse_case_insensitively() {
        assert_eq!("Upcoming".parse::<TripStatus>(), Ok(TripStatus::Upcoming));
        assert_eq!(" luxury ".parse::<CostIndex>(), Ok(CostIndex::Luxury));
        assert!("flying".parse::<ActivityCategory>().is_err());
        assert_eq!(ExpenseCategory::Accommodation.to_string(), "accommodation");
        assert_eq!(TripStatus::default(), TripStatus::Draft);
    }

    #[test]
    fn share_token_round_trips_through_uuid() {
        let token = ShareToken::generate();
        assert_eq!(token.as_str().len(), 32);
        let parsed: ShareToken = token.as_str().parse().unwrap();
        assert_eq!(parsed, token);
        assert!("nope".parse::<ShareToken>().is_err());
    }
}

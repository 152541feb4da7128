//! Bookable activities attached to a city.

use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ActivityCategory, ActivityId, ActivityName, Amount, CityId, ImageUrl, SanitizedText,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub city_id: CityId,
    pub name: ActivityName,
    pub description: Option<SanitizedText>,
    pub image_url: Option<ImageUrl>,
    pub duration_minutes: Option<i32>,
    pub cost: Amount,
    pub category: ActivityCategory,
}

impl Activity {
    /// Human readable duration such as `"3 hours"` or `"1 hour 30 min"`.
    pub fn duration_label(&self) -> Option<String> {
        self.duration_minutes.filter(|m| *m > 0).map(format_duration)
    }
}

fn format_duration(minutes: i32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    let hours_label = match hours {
        0 => None,
        1 => Some("1 hour".to_string()),
        n => Some(format!("{n} hours")),
    };
    match (hours_label, rest) {
        (Some(h), 0) => h,
        (Some(h), m) => format!("{h} {m} min"),
        (None, m) => format!("{m} min"),
    }
}

#[derive(Clone, Debug)]
pub struct NewActivity {
    pub city_id: CityId,
    pub name: ActivityName,
    pub description: Option<SanitizedText>,
    pub image_url: Option<ImageUrl>,
    pub duration_minutes: Option<i32>,
    pub cost: Amount,
    pub category: ActivityCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_labels() {
        assert_eq!(format_duration(180), "3 hours");
        assert_eq!(format_duration(60), "1 hour");
        assert_eq!(format_duration(90), "1 hour 30 min");
        assert_eq!(format_duration(45), "45 min");
    }
}

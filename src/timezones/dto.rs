use serde::{Deserialize, Serialize};

use crate::timezones::repo_types::{TimezoneDetails, TimezoneRecord};
use crate::validation::{text, Validate};

#[derive(Debug, Default, Deserialize)]
pub struct AddTimezoneRequest {
    pub uid: Option<String>,
    pub timezone: Option<String>,
    pub city: Option<String>,
    pub gmt: Option<String>,
}

impl Validate for AddTimezoneRequest {
    type Output = TimezoneRecord;
    const REQUIRED: &'static str = "userID, timezone, city and GMT";

    fn validate(self) -> Option<TimezoneRecord> {
        Some(TimezoneRecord {
            timezone: text(self.timezone)?,
            city: text(self.city)?,
            user_id: text(self.uid)?,
            gmt: text(self.gmt)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimezoneRequest {
    pub timezone_id: Option<String>,
    pub timezone: Option<String>,
    pub city: Option<String>,
    pub gmt: Option<String>,
}

impl Validate for UpdateTimezoneRequest {
    type Output = (String, TimezoneDetails);
    const REQUIRED: &'static str = "timezoneID, timezone, city and GMT";

    fn validate(self) -> Option<Self::Output> {
        let id = text(self.timezone_id)?;
        let details = TimezoneDetails {
            timezone: text(self.timezone)?,
            city: text(self.city)?,
            gmt: text(self.gmt)?,
        };
        Some((id, details))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneIdRequest {
    pub timezone_id: Option<String>,
}

impl Validate for TimezoneIdRequest {
    type Output = String;
    const REQUIRED: &'static str = "timezoneID";

    fn validate(self) -> Option<String> {
        text(self.timezone_id)
    }
}

/// Listing entry for a timezone.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneView {
    pub city: String,
    pub timezone: String,
    pub timezone_id: String,
    pub gmt: String,
}

impl TimezoneView {
    pub fn new(timezone_id: String, record: TimezoneRecord) -> Self {
        Self {
            city: record.city,
            timezone: record.timezone,
            timezone_id,
            gmt: record.gmt,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Document in the `Timezones` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneRecord {
    pub timezone: String,
    pub city: String,
    pub user_id: String, // owner uid, not enforced
    pub gmt: String,
}

/// Mutable fields of a timezone, written as a merge patch.
#[derive(Debug, Clone, Serialize)]
pub struct TimezoneDetails {
    pub timezone: String,
    pub city: String,
    pub gmt: String,
}

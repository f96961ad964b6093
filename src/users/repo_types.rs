use serde::{Deserialize, Serialize};

/// Profile document in the `Users` collection, keyed by identity uid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub full_name: String,
    pub role: i64,
    pub password_verifier: String, // fixed-salt argon2 PHC string
}

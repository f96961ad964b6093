use serde::{Deserialize, Serialize};

use crate::validation::{text, Validate};

/// Request body for role update.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub uid: Option<String>,
    pub update_role: Option<i64>,
}

pub struct RoleChange {
    pub uid: String,
    pub role: i64,
}

impl Validate for UpdateUserRequest {
    type Output = RoleChange;
    const REQUIRED: &'static str = "userID and userRole";

    fn validate(self) -> Option<RoleChange> {
        Some(RoleChange {
            uid: text(self.uid)?,
            role: self.update_role?,
        })
    }
}

/// Request body carrying only a user id (deleteUser, getAllTimezonesByUID).
#[derive(Debug, Default, Deserialize)]
pub struct UserIdRequest {
    pub uid: Option<String>,
}

impl Validate for UserIdRequest {
    type Output = String;
    const REQUIRED: &'static str = "userID";

    fn validate(self) -> Option<String> {
        text(self.uid)
    }
}

/// Listing entry; the verifier is never exposed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub email: String,
    pub full_name: String,
    pub uid: String,
    pub role: i64,
}

use serde::{Deserialize, Serialize};

use crate::validation::{text, Validate};

/// Request body for signup.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<i64>,
}

pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: i64,
}

impl Validate for SignupRequest {
    type Output = NewAccount;
    const REQUIRED: &'static str = "email, password, fullName and role";

    fn validate(self) -> Option<NewAccount> {
        Some(NewAccount {
            email: text(self.email)?,
            password: text(self.password)?,
            full_name: text(self.full_name)?,
            role: self.role?,
        })
    }
}

/// Request body for signin.
#[derive(Debug, Default, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for SigninRequest {
    type Output = Credentials;
    const REQUIRED: &'static str = "email and password";

    fn validate(self) -> Option<Credentials> {
        Some(Credentials {
            email: text(self.email)?,
            password: text(self.password)?,
        })
    }
}

/// Returned on successful signin.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub full_name: String,
    pub email: String,
    pub role: i64,
    pub uid: String,
}

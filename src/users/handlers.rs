use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    error::AppError,
    state::AppState,
    users::{
        dto::{PublicUser, RoleChange, UpdateUserRequest},
        repo_types::UserProfile,
    },
    validation::validated,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/updateUser", post(update_user))
        .route("/getAllUsers", post(get_all_users))
}

#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    body: Option<Json<UpdateUserRequest>>,
) -> Result<&'static str, AppError> {
    let RoleChange { uid, role } = validated(body)?;
    UserProfile::set_role(state.store.as_ref(), &uid, role).await?;
    info!(%uid, role, "user role updated");
    Ok("Successfully updated")
}

#[instrument(skip_all)]
pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>, AppError> {
    let users = UserProfile::list(state.store.as_ref())
        .await?
        .into_iter()
        .map(|(uid, p)| PublicUser {
            email: p.email,
            full_name: p.full_name,
            uid,
            role: p.role,
        })
        .collect();
    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::{state::AppState, testing::post_json};

    async fn signup(state: &AppState, email: &str, role: i64) -> String {
        let (status, uid) = post_json(
            state,
            "/signup",
            json!({"email": email, "password": "pw", "fullName": "A B", "role": role}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        uid
    }

    async fn all_users(state: &AppState) -> Vec<Value> {
        let (status, body) = post_json(state, "/getAllUsers", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn update_role_to_zero_round_trips() {
        let state = AppState::fake();
        let uid = signup(&state, "a@b.com", 2).await;

        let (status, body) =
            post_json(&state, "/updateUser", json!({"uid": uid, "updateRole": 0})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Successfully updated");

        let users = all_users(&state).await;
        assert_eq!(
            users,
            vec![json!({"email": "a@b.com", "fullName": "A B", "uid": uid, "role": 0})]
        );
    }

    #[tokio::test]
    async fn listing_never_exposes_the_verifier() {
        let state = AppState::fake();
        signup(&state, "a@b.com", 1).await;
        signup(&state, "c@d.com", 2).await;
        let users = all_users(&state).await;
        assert_eq!(users.len(), 2);
        for user in &users {
            assert!(user.get("passwordVerifier").is_none());
        }
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let state = AppState::fake();
        let (status, _) =
            post_json(&state, "/updateUser", json!({"uid": "ghost", "updateRole": 1})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_requires_uid_and_role() {
        let state = AppState::fake();
        let (status, body) = post_json(&state, "/updateUser", json!({"uid": "u1"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid parameter. Required userID and userRole.");

        let (status, body) = post_json(&state, "/deleteUser", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid parameter. Required userID.");
    }

    #[tokio::test]
    async fn listing_accepts_an_empty_body() {
        let state = AppState::fake();
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/getAllUsers")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, body) = crate::testing::send(&state, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }
}

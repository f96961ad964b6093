use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{Credentials, NewAccount, SigninRequest, SigninResponse, SignupRequest},
        password::VerifierKey,
        services::{restore_profile, roll_back_identity},
    },
    error::AppError,
    identity::IdentityError,
    state::AppState,
    store::{Collection, StoreError},
    users::{dto::UserIdRequest, repo_types::UserProfile},
    validation::{normalize_email, validated},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/deleteUser", post(delete_user))
}

#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    body: Option<Json<SignupRequest>>,
) -> Result<String, AppError> {
    let NewAccount {
        email,
        password,
        full_name,
        role,
    } = validated(body)?;
    let email = normalize_email(&email);

    let verifier = VerifierKey::from_ref(&state).derive(&password)?;
    let uid = state.identity.create_identity(&email, &verifier).await?;

    let profile = UserProfile {
        email,
        full_name,
        role,
        password_verifier: verifier,
    };
    if let Err(e) = profile.put(state.store.as_ref(), &uid).await {
        return Err(roll_back_identity(&state, &uid, e.into()).await);
    }

    info!(%uid, email = %profile.email, "user signed up");
    Ok(uid)
}

#[instrument(skip_all)]
pub async fn signin(
    State(state): State<AppState>,
    body: Option<Json<SigninRequest>>,
) -> Result<Json<SigninResponse>, AppError> {
    let Credentials { email, password } = validated(body)?;
    let email = normalize_email(&email);

    let verifier = VerifierKey::from_ref(&state).derive(&password)?;
    let uid = state.identity.lookup_by_email(&email).await?;
    let profile = UserProfile::find(state.store.as_ref(), &uid).await?;

    if profile.password_verifier != verifier {
        warn!(%uid, "signin password mismatch");
        return Err(AppError::PasswordIncorrect);
    }

    info!(%uid, "user signed in");
    Ok(Json(SigninResponse {
        full_name: profile.full_name,
        email: profile.email,
        role: profile.role,
        uid,
    }))
}

#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    body: Option<Json<UserIdRequest>>,
) -> Result<&'static str, AppError> {
    let uid = validated(body)?;

    let snapshot = match state.store.get(Collection::Users, &uid).await {
        Ok(doc) => Some(doc),
        Err(StoreError::NotFound { .. }) => None,
        Err(e) => return Err(e.into()),
    };
    state.store.delete(Collection::Users, &uid).await?;

    match state.identity.delete_identity(&uid).await {
        Ok(()) => {}
        // Profile without an identity: removing the profile finishes the delete.
        Err(IdentityError::NotFound(_)) if snapshot.is_some() => {
            warn!(%uid, "deleted profile had no identity");
        }
        Err(e) => return Err(restore_profile(&state, &uid, snapshot, e).await),
    }

    info!(%uid, "user deleted");
    Ok("Successfully deleted")
}

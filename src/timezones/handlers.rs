use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    error::AppError,
    state::AppState,
    timezones::{
        dto::{AddTimezoneRequest, TimezoneIdRequest, TimezoneView, UpdateTimezoneRequest},
        repo_types::TimezoneRecord,
    },
    users::dto::UserIdRequest,
    validation::validated,
};

pub fn timezone_routes() -> Router<AppState> {
    Router::new()
        .route("/addTimezone", post(add_timezone))
        .route("/updateTimezone", post(update_timezone))
        .route("/deleteTimezone", post(delete_timezone))
        .route("/getAllTimezonesByUID", post(get_all_timezones_by_uid))
        .route("/getAllTimezones", post(get_all_timezones))
}

#[instrument(skip_all)]
pub async fn add_timezone(
    State(state): State<AppState>,
    body: Option<Json<AddTimezoneRequest>>,
) -> Result<&'static str, AppError> {
    let record = validated(body)?;
    let id = record.insert(state.store.as_ref()).await?;
    info!(timezone_id = %id, user_id = %record.user_id, "timezone created");
    Ok("Successfully created")
}

#[instrument(skip_all)]
pub async fn update_timezone(
    State(state): State<AppState>,
    body: Option<Json<UpdateTimezoneRequest>>,
) -> Result<&'static str, AppError> {
    let (id, details) = validated(body)?;
    details.apply(state.store.as_ref(), &id).await?;
    info!(timezone_id = %id, "timezone updated");
    Ok("Successfully updated")
}

#[instrument(skip_all)]
pub async fn delete_timezone(
    State(state): State<AppState>,
    body: Option<Json<TimezoneIdRequest>>,
) -> Result<&'static str, AppError> {
    let id = validated(body)?;
    TimezoneRecord::remove(state.store.as_ref(), &id).await?;
    info!(timezone_id = %id, "timezone deleted");
    Ok("Successfully deleted")
}

#[instrument(skip_all)]
pub async fn get_all_timezones_by_uid(
    State(state): State<AppState>,
    body: Option<Json<UserIdRequest>>,
) -> Result<Json<Vec<TimezoneView>>, AppError> {
    let uid = validated(body)?;
    let items = TimezoneRecord::list_by_user(state.store.as_ref(), &uid)
        .await?
        .into_iter()
        .map(|(id, record)| TimezoneView::new(id, record))
        .collect();
    Ok(Json(items))
}

#[instrument(skip_all)]
pub async fn get_all_timezones(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimezoneView>>, AppError> {
    let items = TimezoneRecord::list(state.store.as_ref())
        .await?
        .into_iter()
        .map(|(id, record)| TimezoneView::new(id, record))
        .collect();
    Ok(Json(items))
}

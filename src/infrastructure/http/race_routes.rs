//! Race API routes

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::dto::race::{
    CreateRaceRequest, RaceDetailResponse, RaceResponse, UpdateRaceRequest,
};
use crate::application::dto::{parse_uuid, MessageResponse, PageMeta, Paginated};
use crate::application::error::ApiError;
use crate::domain::value_objects::RaceId;
use crate::infrastructure::persistence::RACE_LIST_FIELDS;
use crate::infrastructure::query::ListParams;
use crate::infrastructure::state::AppState;

/// List races, paginated and filterable
pub async fn list_races(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Paginated<RaceResponse>>, ApiError> {
    let params = ListParams::from_query(&query);
    params.check_fields(RACE_LIST_FIELDS)?;

    let (races, total) = state
        .repository
        .races()
        .list(&params)
        .await
        .map_err(|e| e.into_api("Race"))?;

    Ok(Json(Paginated {
        data: races.into_iter().map(RaceResponse::from).collect(),
        meta: PageMeta::new(total, params.page, params.limit),
    }))
}

/// Create a new race
pub async fn create_race(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRaceRequest>,
) -> Result<(StatusCode, Json<RaceResponse>), ApiError> {
    let race = req.into_entity()?;
    state
        .repository
        .races()
        .create(&race)
        .await
        .map_err(|e| e.into_api("Race"))?;
    Ok((StatusCode::CREATED, Json(race.into())))
}

/// Get a race by ID, with its characters
pub async fn get_race(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RaceDetailResponse>, ApiError> {
    let id = RaceId::from_uuid(parse_uuid(&id, "race")?);
    let race = state
        .repository
        .races()
        .get(id)
        .await
        .map_err(|e| e.into_api("Race"))?
        .ok_or_else(|| ApiError::not_found("Race not found"))?;
    let characters = state
        .repository
        .characters()
        .list_by_race(id)
        .await
        .map_err(|e| e.into_api("Race"))?;
    Ok(Json(RaceDetailResponse::new(race, characters)))
}

/// Update a race
pub async fn update_race(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRaceRequest>,
) -> Result<Json<RaceResponse>, ApiError> {
    let id = RaceId::from_uuid(parse_uuid(&id, "race")?);
    let patch = req.into_patch()?;
    let race = state
        .repository
        .races()
        .update(id, &patch)
        .await
        .map_err(|e| e.into_api("Race"))?;
    Ok(Json(race.into()))
}

/// Delete a race
pub async fn delete_race(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = RaceId::from_uuid(parse_uuid(&id, "race")?);
    state
        .repository
        .races()
        .delete(id)
        .await
        .map_err(|e| e.into_delete_api("Race"))?;
    Ok(Json(MessageResponse::new("Race deleted successfully")))
}

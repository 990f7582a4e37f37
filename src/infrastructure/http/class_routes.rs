//! Class and subclass API routes

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::dto::class::{
    ClassDetailResponse, ClassResponse, CreateClassRequest, CreateSubclassRequest,
    SubclassResponse, UpdateClassRequest,
};
use crate::application::dto::{parse_uuid, MessageResponse};
use crate::application::error::ApiError;
use crate::domain::value_objects::{ClassId, SubclassId};
use crate::infrastructure::state::AppState;

/// List all classes
pub async fn list_classes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClassResponse>>, ApiError> {
    let classes = state
        .repository
        .classes()
        .list()
        .await
        .map_err(|e| e.into_api("Class"))?;
    Ok(Json(classes.into_iter().map(ClassResponse::from).collect()))
}

/// Create a new class
pub async fn create_class(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), ApiError> {
    let class = req.into_entity()?;
    state
        .repository
        .classes()
        .create(&class)
        .await
        .map_err(|e| e.into_api("Class"))?;
    Ok((StatusCode::CREATED, Json(class.into())))
}

/// Get a class by ID, with its characters and subclasses
pub async fn get_class(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ClassDetailResponse>, ApiError> {
    let id = ClassId::from_uuid(parse_uuid(&id, "class")?);
    let class = state
        .repository
        .classes()
        .get(id)
        .await
        .map_err(|e| e.into_api("Class"))?
        .ok_or_else(|| ApiError::not_found("Class not found"))?;
    let characters = state
        .repository
        .characters()
        .list_by_class(id)
        .await
        .map_err(|e| e.into_api("Class"))?;
    let subclasses = state
        .repository
        .classes()
        .list_subclasses(id)
        .await
        .map_err(|e| e.into_api("Class"))?;
    Ok(Json(ClassDetailResponse::new(class, characters, subclasses)))
}

/// Update a class
pub async fn update_class(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateClassRequest>,
) -> Result<Json<ClassResponse>, ApiError> {
    let id = ClassId::from_uuid(parse_uuid(&id, "class")?);
    let patch = req.into_patch()?;
    let class = state
        .repository
        .classes()
        .update(id, &patch)
        .await
        .map_err(|e| e.into_api("Class"))?;
    Ok(Json(class.into()))
}

/// Delete a class; refused while characters still reference it
pub async fn delete_class(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ClassId::from_uuid(parse_uuid(&id, "class")?);
    let count = state
        .repository
        .characters()
        .count_by_class(id)
        .await
        .map_err(|e| e.into_api("Class"))?;
    if count > 0 {
        return Err(ApiError::DeleteBlocked {
            message: "Cannot delete class while characters are using it".to_string(),
            characters_count: count,
        });
    }
    state
        .repository
        .classes()
        .delete(id)
        .await
        .map_err(|e| e.into_api("Class"))?;
    Ok(Json(MessageResponse::new("Class deleted successfully")))
}

/// List a class's subclasses
pub async fn list_subclasses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SubclassResponse>>, ApiError> {
    let id = ClassId::from_uuid(parse_uuid(&id, "class")?);
    state
        .repository
        .classes()
        .get(id)
        .await
        .map_err(|e| e.into_api("Class"))?
        .ok_or_else(|| ApiError::not_found("Class not found"))?;
    let subclasses = state
        .repository
        .classes()
        .list_subclasses(id)
        .await
        .map_err(|e| e.into_api("Subclass"))?;
    Ok(Json(
        subclasses.into_iter().map(SubclassResponse::from).collect(),
    ))
}

/// Add a subclass to a class
pub async fn create_subclass(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CreateSubclassRequest>,
) -> Result<(StatusCode, Json<SubclassResponse>), ApiError> {
    let id = ClassId::from_uuid(parse_uuid(&id, "class")?);
    state
        .repository
        .classes()
        .get(id)
        .await
        .map_err(|e| e.into_api("Class"))?
        .ok_or_else(|| ApiError::not_found("Class not found"))?;
    let subclass = req.into_entity(id)?;
    state
        .repository
        .classes()
        .create_subclass(&subclass)
        .await
        .map_err(|e| e.into_api("Subclass"))?;
    Ok((StatusCode::CREATED, Json(subclass.into())))
}

/// Remove a subclass from a class
pub async fn delete_subclass(
    State(state): State<Arc<AppState>>,
    Path((id, subclass_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ClassId::from_uuid(parse_uuid(&id, "class")?);
    let subclass_id = SubclassId::from_uuid(parse_uuid(&subclass_id, "subclass")?);
    state
        .repository
        .classes()
        .delete_subclass(id, subclass_id)
        .await
        .map_err(|e| e.into_delete_api("Subclass"))?;
    Ok(Json(MessageResponse::new("Subclass deleted successfully")))
}

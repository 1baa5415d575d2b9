use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use super::{require_body, require_field};
use crate::context::AppContext;
use crate::error::ApiError;
use crate::store::{NewUser, StoreError, UserPatch};

/// GET /user - all records, no pagination.
pub async fn list(State(ctx): State<AppContext>) -> Result<Json<Value>, ApiError> {
    let users = ctx.store.find_all().await?;
    Ok(Json(json!(users)))
}

/// GET /user/:id - a malformed id answers 403 with the id in the message;
/// a well-formed id that matches nothing answers 200 with a null body.
pub async fn get(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match ctx.store.find_by_id(&id).await {
        Ok(user) => Ok(Json(json!(user))),
        Err(StoreError::InvalidId(_)) => {
            Err(ApiError::forbidden(format!("User with id {id} not found!")))
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /user - each missing field gets its own 400 message.
pub async fn create(
    State(ctx): State<AppContext>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let body = body.as_deref();
    let body = require_body(body)?;

    let name = require_field(body, "name", "Name is empty!")?;
    let password = require_field(body, "password", "Password is empty!")?;
    let account_type = require_field(body, "account_type", "Account type is empty!")?;

    let user = ctx
        .store
        .insert(NewUser {
            name: name.to_string(),
            account_type: account_type.to_string(),
            password: password.to_string(),
        })
        .await?;

    tracing::info!(user_id = %user.id, "added user");
    Ok(Json(json!({ "data": user, "message": "Added user" })))
}

/// PATCH /user/:id - responds with the stored post-update record
/// shallow-merged with the request body, so client-supplied fields always
/// appear in the response.
pub async fn update(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let body = match body.as_deref().and_then(Value::as_object) {
        Some(map) => map.clone(),
        None => serde_json::Map::new(),
    };
    let patch = UserPatch::from_body(&Value::Object(body.clone()));

    let stored = match ctx.store.update_by_id(&id, &patch).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(ApiError::not_found("ID not found")),
        Err(StoreError::InvalidId(_)) => {
            return Err(ApiError::forbidden(format!("User with id {id} not found!")))
        }
        Err(err) => return Err(err.into()),
    };

    let mut merged = json!(stored).as_object().cloned().unwrap_or_default();
    for (key, value) in body {
        merged.insert(key, value);
    }

    tracing::info!(user_id = %stored.id, "updated user");
    Ok(Json(json!({ "data": merged, "message": "Updated user" })))
}

/// DELETE /user/:id - 404 when nothing matched, otherwise the removed
/// record comes back. Malformed ids surface as plain store failures here.
pub async fn remove(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let removed = ctx.store.delete_by_id(&id).await?;
    let user = removed.ok_or_else(|| ApiError::not_found("ID not found"))?;

    tracing::info!(user_id = %user.id, "removed user");
    Ok(Json(json!({ "data": user, "message": "Removed user" })))
}

use axum::{extract::State, response::Json};
use serde_json::{json, Map, Value};

use super::{require_body, require_field};
use crate::auth;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::store::UserFilter;

/// POST /user/login - exact-equality credential lookup (observed plaintext
/// contract), then a token signed over the submitted name/password pair.
/// Not over the stored record, and with no expiry, so the same credentials
/// always produce the same token.
pub async fn login(
    State(ctx): State<AppContext>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let body = body.as_deref();
    let body = require_body(body)?;

    let name = require_field(body, "name", "Name is empty!")?;
    let password = require_field(body, "password", "Password is empty!")?;

    let user = ctx
        .store
        .find_one(&UserFilter::credentials(name, password))
        .await?;

    if user.is_none() {
        return Err(ApiError::bad_request("Incorrect credentials!"));
    }

    let mut payload = Map::new();
    payload.insert("name".to_string(), json!(name));
    payload.insert("password".to_string(), json!(password));

    let token = auth::sign(payload, &ctx.config.token_secret, None).map_err(|err| {
        tracing::error!("token signing failed: {}", err);
        ApiError::internal("Could not sign token")
    })?;

    tracing::info!(name, "login user");
    Ok(Json(json!({ "token": token, "message": "Login user" })))
}

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::context::AppContext;
use crate::handlers::{login, users};
use crate::middleware::require_auth;

/// Builds the full application router over the given context.
pub fn app(ctx: AppContext) -> Router {
    Router::new()
        .nest("/user", user_routes(ctx.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// The /user surface: login is public, everything else sits behind the
/// bearer-token gate.
fn user_routes(ctx: AppContext) -> Router<AppContext> {
    let protected = Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/:id",
            get(users::get).patch(users::update).delete(users::remove),
        )
        .route_layer(from_fn_with_state(ctx, require_auth));

    Router::new()
        .route("/login", post(login::login))
        .merge(protected)
}

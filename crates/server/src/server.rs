use axum::{
    Extension, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use std::sync::Arc;

use crate::{ServerError, auth, events, matches, predictions, user};
use engine::{Engine, EngineError, User};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub auth: Arc<auth::AuthConfig>,
}

/// `Authorization: Bearer <token>`, kept as a result so that a missing or
/// malformed header becomes a 401 instead of the extractor's 400.
pub(crate) type BearerHeader = Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>;

/// Resolve the bearer token to an active user.
pub(crate) async fn authenticate(
    state: &ServerState,
    header: BearerHeader,
) -> Result<User, ServerError> {
    let TypedHeader(Authorization(bearer)) = header.map_err(|_| ServerError::Unauthorized)?;
    let user_id =
        auth::verify_token(bearer.token(), &state.auth).ok_or(ServerError::Unauthorized)?;

    match state.engine.user(user_id).await {
        Ok(user) if user.is_active => Ok(user),
        Ok(_) | Err(EngineError::UserNotFound(_)) => Err(ServerError::Unauthorized),
        Err(err) => Err(err.into()),
    }
}

async fn require_user(
    State(state): State<ServerState>,
    header: BearerHeader,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let user = authenticate(&state, header).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Runs after [`require_user`].
async fn require_superuser(
    Extension(user): Extension<User>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if !user.is_superuser {
        tracing::warn!("user {} tried an admin operation", user.id);
        return Err(ServerError::Forbidden(
            "the user doesn't have enough privileges".to_string(),
        ));
    }
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let public = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/events", get(events::list))
        .route("/events/{id}", get(events::get));

    let users = Router::new()
        .route("/users/me", get(user::me))
        .route("/predictions", post(predictions::create))
        .route("/predictions/{id}", get(predictions::list_for_event))
        .route("/predictions/{id}", put(predictions::update))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let admin = Router::new()
        .route("/events", post(events::create))
        .route("/events/{id}", axum::routing::delete(events::delete))
        .route("/events/{id}/upgrade", patch(events::upgrade))
        .route("/events/{id}/run", patch(events::run))
        .route("/events/{id}/start", patch(events::start))
        .route("/events/{id}/close", patch(events::close))
        .route("/events/{id}/finish", patch(events::finish))
        .route("/events/{id}/cancel", patch(events::cancel))
        .route("/events/{id}/archive", patch(events::archive))
        .route("/events/{id}/matches", post(matches::create))
        .route("/matches/{id}", axum::routing::delete(matches::delete))
        .route("/matches/{id}/start", patch(matches::start))
        .route("/matches/{id}/finish", patch(matches::finish))
        .route_layer(middleware::from_fn(require_superuser))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    public.merge(users).merge(admin).with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    auth: auth::AuthConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        auth: Arc::new(auth),
    };

    axum::serve(listener, router(state)).await
}

//! Token issuing and the login/register endpoints.

use api_types::auth::{LoginForm, Token, UserNew, UserView};
use axum::{Form, Json, extract::State, http::StatusCode};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user::user_view};

/// Signing settings of the bearer tokens.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    exp: usize,
}

/// Sign an HS256 token for `user_id`.
pub(crate) fn create_token(
    user_id: Uuid,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = Utc::now() + Duration::minutes(config.access_token_expire_minutes);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: usize::try_from(expiration.timestamp()).unwrap_or_default(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
}

/// Return the user id carried by a valid, unexpired token.
pub(crate) fn verify_token(token: &str, config: &AuthConfig) -> Option<Uuid> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    Uuid::parse_str(&data.claims.sub).ok()
}

/// Exchange email and password for a bearer token.
pub async fn login(
    State(state): State<ServerState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<Token>, ServerError> {
    let user = state
        .engine
        .authenticate(&form.username, &form.password)
        .await?;
    let access_token = create_token(user.id, &state.auth)
        .map_err(|err| ServerError::Internal(format!("failed to sign token: {err}")))?;
    tracing::info!("user {} logged in", user.id);

    Ok(Json(Token {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .engine
        .register(&payload.email, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user_view(user))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(minutes: i64) -> AuthConfig {
        AuthConfig {
            secret_key: "test-secret".to_string(),
            access_token_expire_minutes: minutes,
        }
    }

    #[test]
    fn token_carries_the_user_id() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, &config(5)).unwrap();
        assert_eq!(verify_token(&token, &config(5)), Some(user_id));
    }

    #[test]
    fn token_signed_with_another_key_is_rejected() {
        let token = create_token(Uuid::new_v4(), &config(5)).unwrap();
        let other = AuthConfig {
            secret_key: "other".to_string(),
            ..config(5)
        };
        assert_eq!(verify_token(&token, &other), None);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = create_token(Uuid::new_v4(), &config(-10)).unwrap();
        assert_eq!(verify_token(&token, &config(5)), None);
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(verify_token("not.a.token", &config(5)), None);
    }
}

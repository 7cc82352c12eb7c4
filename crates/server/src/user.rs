//! Endpoints about the authenticated user.

use api_types::auth::UserView;
use axum::{Extension, Json};
use engine::User;

pub(crate) fn user_view(user: User) -> UserView {
    UserView {
        id: user.id,
        email: user.email,
        is_active: user.is_active,
        is_superuser: user.is_superuser,
    }
}

pub async fn me(Extension(user): Extension<User>) -> Json<UserView> {
    Json(user_view(user))
}

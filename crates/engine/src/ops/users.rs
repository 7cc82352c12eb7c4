use sea_orm::{ActiveValue, SqlErr, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, User,
    password::{hash_password, verify_password},
    users, util,
};

use super::{Engine, with_tx};

impl Engine {
    /// Create an active, non-superuser account.
    pub async fn register(&self, email: &str, password: &str) -> ResultEngine<User> {
        let email = util::normalize_email(email)?;
        if password.is_empty() {
            return Err(EngineError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }
        let hashed_password = hash_password(password, self.password_cost).await?;

        with_tx!(self, |db_tx| {
            if self.find_user_by_email(&db_tx, &email).await?.is_some() {
                return Err(EngineError::UserAlreadyExists(email));
            }

            let model = match users::ActiveModel::new_user(email.clone(), hashed_password)
                .insert(&db_tx)
                .await
            {
                Ok(model) => model,
                Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    return Err(EngineError::UserAlreadyExists(email));
                }
                Err(err) => return Err(err.into()),
            };
            tracing::info!("user {} has registered", model.id);
            User::try_from(model)
        })
    }

    /// Check credentials. Unknown emails, wrong passwords and inactive
    /// accounts are indistinguishable to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let Ok(email) = util::normalize_email(email) else {
            return Err(EngineError::InvalidEmailOrPassword);
        };

        let model = with_tx!(self, |db_tx| {
            self.find_user_by_email(&db_tx, &email)
                .await?
                .filter(|user| user.is_active)
                .ok_or(EngineError::InvalidEmailOrPassword)
        })?;
        if !verify_password(password, &model.hashed_password).await? {
            return Err(EngineError::InvalidEmailOrPassword);
        }
        User::try_from(model)
    }

    pub async fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, user_id).await?;
            User::try_from(model)
        })
    }

    pub async fn user_by_email(&self, email: &str) -> ResultEngine<User> {
        let email = util::normalize_email(email)?;
        with_tx!(self, |db_tx| {
            let model = self
                .find_user_by_email(&db_tx, &email)
                .await?
                .ok_or_else(|| EngineError::UserNotFound(email.clone()))?;
            User::try_from(model)
        })
    }

    pub async fn set_superuser(&self, user_id: Uuid, is_superuser: bool) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, user_id).await?;
            let mut active: users::ActiveModel = model.into();
            active.is_superuser = ActiveValue::Set(is_superuser);
            let model = active.update(&db_tx).await?;
            tracing::info!("user {user_id}: superuser = {is_superuser}");
            User::try_from(model)
        })
    }

    pub async fn set_active(&self, user_id: Uuid, is_active: bool) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, user_id).await?;
            let mut active: users::ActiveModel = model.into();
            active.is_active = ActiveValue::Set(is_active);
            let model = active.update(&db_tx).await?;
            tracing::info!("user {user_id}: active = {is_active}");
            User::try_from(model)
        })
    }

    /// Delete an account and, through the foreign keys, its predictions.
    pub async fn delete_user(&self, user_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, user_id).await?;
            model.delete(&db_tx).await?;
            tracing::info!("deleted user {user_id}");
            Ok(())
        })
    }
}

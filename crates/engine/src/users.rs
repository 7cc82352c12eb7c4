//! Users table.
//!
//! The id is a UUID stored as its canonical string; emails are stored
//! lower-cased so lookups are case-insensitive.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, util::parse_uuid};

/// A registered account, without its password hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::predictions::Entity")]
    Predictions,
}

impl Related<super::predictions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Predictions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// A fresh, active, non-superuser account.
    pub(crate) fn new_user(email: String, hashed_password: String) -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            email: ActiveValue::Set(email),
            hashed_password: ActiveValue::Set(hashed_password),
            is_active: ActiveValue::Set(true),
            is_superuser: ActiveValue::Set(false),
        }
    }
}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&value.id, "user")?,
            email: value.email,
            is_active: value.is_active,
            is_superuser: value.is_superuser,
        })
    }
}

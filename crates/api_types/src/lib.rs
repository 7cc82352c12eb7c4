use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub mod auth {
    use super::*;

    /// `application/x-www-form-urlencoded` login form.
    ///
    /// `username` carries the email, as in the OAuth2 password flow.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginForm {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Token {
        pub access_token: String,
        /// Always `bearer`.
        pub token_type: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub email: String,
        pub password: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub email: String,
        pub is_active: bool,
        pub is_superuser: bool,
    }
}

pub mod matches {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum MatchStatus {
        Upcoming,
        Ongoing,
        Completed,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MatchNew {
        pub home_team: String,
        pub away_team: String,
        /// RFC3339 kick-off. One day from now when omitted.
        pub start_time: Option<DateTime<Utc>>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MatchView {
        pub id: i32,
        pub event_id: i32,
        pub home_team: String,
        pub away_team: String,
        pub status: MatchStatus,
        pub home_goals: Option<i32>,
        pub away_goals: Option<i32>,
        pub start_time: DateTime<Utc>,
    }

    /// Query string of `PATCH /matches/{id}/finish`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MatchFinish {
        pub home_goals: i32,
        pub away_goals: i32,
    }
}

pub mod event {
    use super::*;
    use crate::matches::{MatchNew, MatchView};

    /// Lifecycle of an event.
    ///
    /// The main ladder is `created → upcoming → ongoing → closed →
    /// completed`. A completed event can be `archived`; any earlier one can
    /// be `cancelled`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum EventStatus {
        Created,
        Upcoming,
        Ongoing,
        Closed,
        Completed,
        Archived,
        Cancelled,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventNew {
        pub name: String,
        /// Last moment predictions are meant to be placed.
        pub deadline: DateTime<Utc>,
        #[serde(default)]
        pub matches: Vec<MatchNew>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EventView {
        pub id: i32,
        pub name: String,
        pub deadline: DateTime<Utc>,
        pub status: EventStatus,
        pub matches: Vec<MatchView>,
    }

    /// Query string of `GET /events`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EventList {
        /// Also list `created` events. Superusers only.
        pub admin_mode: Option<bool>,
        pub offset: Option<u64>,
        pub limit: Option<u64>,
    }
}

pub mod prediction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PredictionNew {
        pub match_id: i32,
        pub home_goals: i32,
        pub away_goals: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PredictionUpdate {
        pub home_goals: i32,
        pub away_goals: i32,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PredictionView {
        pub id: i32,
        pub match_id: i32,
        pub user_id: Uuid,
        pub home_goals: Option<i32>,
        pub away_goals: Option<i32>,
        /// Set once the match is completed.
        pub points: Option<i32>,
    }
}

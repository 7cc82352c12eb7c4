//! Internal helpers for input validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Highest goal count accepted for a result or a guess.
pub(crate) const MAX_GOALS: i32 = 9;

const MAX_EMAIL_LEN: usize = 320;
const MAX_NAME_LEN: usize = 128;
const MIN_TEAM_LEN: usize = 3;

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidInput(format!("invalid {label} id")))
}

/// Trim and lower-case an email, rejecting anything that is not
/// `local@domain.tld` shaped.
pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = value.trim().to_lowercase();
    let invalid = || EngineError::InvalidInput(format!("invalid email: {value}"));

    if email.is_empty() || email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !domain.ends_with('.') => {
            Ok(email)
        }
        _ => Err(invalid()),
    }
}

/// Trim a name and check it fits `min..=MAX_NAME_LEN` characters.
pub(crate) fn normalize_name(value: &str, label: &str, min: usize) -> ResultEngine<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min.max(1) || len > MAX_NAME_LEN {
        return Err(EngineError::InvalidInput(format!(
            "{label} must be between {} and {MAX_NAME_LEN} characters",
            min.max(1)
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_team(value: &str, label: &str) -> ResultEngine<String> {
    normalize_name(value, label, MIN_TEAM_LEN)
}

pub(crate) fn validate_goals(home_goals: i32, away_goals: i32) -> ResultEngine<()> {
    for goals in [home_goals, away_goals] {
        if !(0..=MAX_GOALS).contains(&goals) {
            return Err(EngineError::InvalidInput(format!(
                "goals must be between 0 and {MAX_GOALS}, got {goals}"
            )));
        }
    }
    Ok(())
}

use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod access;
mod events;
mod matches;
mod predictions;
mod users;

/// Number of matches an event needs before it can leave `created`.
pub const DEFAULT_MATCHES_COUNT: usize = 5;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    matches_count: usize,
    password_cost: u32,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Matches an event must hold to be run.
    pub fn matches_count(&self) -> usize {
        self.matches_count
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    matches_count: Option<usize>,
    password_cost: Option<u32>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override [`DEFAULT_MATCHES_COUNT`].
    pub fn matches_count(mut self, count: usize) -> EngineBuilder {
        self.matches_count = Some(count);
        self
    }

    /// Override the bcrypt cost (`bcrypt::DEFAULT_COST` by default).
    pub fn password_cost(mut self, cost: u32) -> EngineBuilder {
        self.password_cost = Some(cost);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let matches_count = self.matches_count.unwrap_or(DEFAULT_MATCHES_COUNT);
        if matches_count == 0 {
            return Err(EngineError::InvalidInput(
                "matches count must be greater than zero".to_string(),
            ));
        }
        let password_cost = self.password_cost.unwrap_or(bcrypt::DEFAULT_COST);
        if !(4..=31).contains(&password_cost) {
            return Err(EngineError::InvalidInput(format!(
                "invalid password cost: {password_cost}"
            )));
        }

        Ok(Engine {
            database: self.database,
            matches_count,
            password_cost,
        })
    }
}

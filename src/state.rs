use crate::config::Config;
use crate::db::SqlitePool;

pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Config,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Config) -> Self {
        Self { db_pool, config }
    }
}

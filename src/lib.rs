#[macro_use]
extern crate rocket;

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod form;
pub mod models;
pub mod routes;
pub mod state;
pub mod verify;

use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;
use tracing::info;

use crate::config::Config;
use crate::db::{init_db, init_pool};
use crate::error::StartupError;
use crate::state::AppState;

/// Assembles the server around an already prepared state.
pub fn rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount("/", routes::routes())
        .attach(Template::fairing())
}

/// Opens the database named by `config`, creates the tables if needed and
/// assembles the server.
pub fn build(config: Config) -> Result<Rocket<Build>, StartupError> {
    info!(path = %config.database_path, "opening database");
    let pool = init_pool(&config.database_path)?;
    let conn = pool.get()?;
    init_db(&conn)?;
    drop(conn);

    Ok(rocket(AppState::new(pool, config)))
}

use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use crate::db;
use crate::error::ConfirmError;
use crate::models::access_code;
use crate::models::submission::{ConfirmRequest, ConfirmResponse, Submission};
use crate::state::AppState;

/// Stores one confirmation and hands back its access code.
///
/// The body is parsed here rather than through a `Json` guard so that a
/// malformed payload fails like every other error: 500 with a JSON message.
#[post("/api/confirmar", data = "<body>")]
pub fn confirmar(body: String, state: &State<AppState>) -> Result<Json<ConfirmResponse>, ConfirmError> {
    let codigo = process(state, &body)?;
    Ok(Json(ConfirmResponse::confirmed(codigo)))
}

pub fn process(state: &AppState, body: &str) -> Result<String, ConfirmError> {
    let request: ConfirmRequest = serde_json::from_str(body)?;
    info!(?request, "confirmation received");

    let codigo = access_code::generate(state.config.code_length);

    match Submission::from(request) {
        Submission::Persona(persona) => {
            let conn = state.db_pool.get()?;
            let id = db::insert_persona(&conn, &persona, &codigo)?;
            info!(id, codigo = %codigo, "persona stored");
        }
        Submission::Familia(familia) => {
            let conn = state.db_pool.get()?;
            let id = db::insert_familia(&conn, &familia, &codigo)?;
            info!(id, codigo = %codigo, "familia stored");
        }
        // nothing is stored, and the code is still returned
        Submission::Unknown(tipo) => {
            warn!(?tipo, codigo = %codigo, "unrecognized tipo, nothing stored");
        }
    }

    Ok(codigo)
}

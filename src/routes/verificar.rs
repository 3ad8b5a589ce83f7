use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use rocket_dyn_templates::{context, Template};
use serde::Serialize;
use tracing::error;

use crate::db;
use crate::models::Record;
use crate::state::AppState;
use crate::verify::Collections;

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valido: bool,
    pub mensaje: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registro: Option<Record>,
}

fn load_collections(state: &AppState) -> Result<Collections, Status> {
    let conn = state.db_pool.get().map_err(|e| {
        error!(error = %e, "no database connection");
        Status::InternalServerError
    })?;

    let personas = db::list_personas(&conn);
    let familias = db::list_familias(&conn);
    match (personas, familias) {
        (Ok(personas), Ok(familias)) => Ok(Collections::split(personas, familias)),
        (Err(e), _) | (_, Err(e)) => {
            error!(error = %e, "failed to load confirmations");
            Err(Status::InternalServerError)
        }
    }
}

#[get("/verificar?<codigo>")]
pub fn pagina(codigo: Option<&str>, state: &State<AppState>) -> Result<Template, Status> {
    // first visit: show the empty form
    let Some(codigo) = codigo else {
        return Ok(Template::render(
            "verificar",
            context! { codigo: "", consultado: false },
        ));
    };

    let collections = load_collections(state)?;
    let result = collections.verify(codigo);

    Ok(Template::render(
        "verificar",
        context! {
            codigo,
            consultado: true,
            valido: result.is_valid(),
            mensaje: result.message(),
            detalles: result.details(),
        },
    ))
}

fn lookup(state: &AppState, codigo: &str) -> Result<Json<VerifyResponse>, Status> {
    let collections = load_collections(state)?;
    let result = collections.verify(codigo);

    Ok(Json(VerifyResponse {
        valido: result.is_valid(),
        mensaje: result.message(),
        registro: result.record(),
    }))
}

#[get("/api/verificar/<codigo>")]
pub fn api(codigo: &str, state: &State<AppState>) -> Result<Json<VerifyResponse>, Status> {
    lookup(state, codigo)
}

// query form, so an empty code can be sent too
#[get("/api/verificar?<codigo>")]
pub fn api_query(codigo: Option<&str>, state: &State<AppState>) -> Result<Json<VerifyResponse>, Status> {
    lookup(state, codigo.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::{init_db, insert_familia, insert_persona, memory_pool};
    use crate::models::familia::NewFamilia;
    use crate::models::persona::NewPersona;
    use rocket::local::blocking::Client;
    use serde_json::Value;

    fn setup_client() -> Client {
        let pool = memory_pool().expect("pool");
        {
            let conn = pool.get().expect("conn");
            init_db(&conn).expect("schema");
            let ana = NewPersona {
                nombre: Some("Ana".to_string()),
                correo: Some("a@x.com".to_string()),
                acompanado: false,
                num_acompanantes: 0,
                mensaje: None,
            };
            insert_persona(&conn, &ana, "AB12CD34").expect("insert");
            let luis = NewPersona {
                nombre: Some("Luis".to_string()),
                acompanado: true,
                num_acompanantes: 1,
                ..ana
            };
            insert_persona(&conn, &luis, "LU15AAAA").expect("insert");
            let perez = NewFamilia {
                nombre_familia: Some("Pérez".to_string()),
                correo: Some("p@x.com".to_string()),
                num_integrantes: Some(4),
                mensaje: Some("Gracias".to_string()),
            };
            insert_familia(&conn, &perez, "FAM00001").expect("insert");
        }

        let rocket = rocket::build()
            .manage(AppState::new(pool, Config::default()))
            .mount("/", routes![pagina, api, api_query])
            .attach(Template::fairing());
        Client::tracked(rocket).expect("valid rocket instance")
    }

    fn get_json(client: &Client, codigo: &str) -> Value {
        let response = client.get(format!("/api/verificar?codigo={}", codigo)).dispatch();
        assert_eq!(response.status(), Status::Ok);
        response.into_json().expect("json body")
    }

    #[test]
    fn test_api_lookup_persona() {
        let client = setup_client();
        let body = get_json(&client, "ab12cd34");
        assert_eq!(body["valido"], true);
        assert_eq!(body["mensaje"], "Código válido: Ana (Persona sola)");
        assert_eq!(body["registro"]["tipo"], "persona");
        assert_eq!(body["registro"]["nombre"], "Ana");
    }

    #[test]
    fn test_api_lookup_accompanied_and_family() {
        let client = setup_client();
        assert_eq!(get_json(&client, "LU15AAAA")["mensaje"], "Código válido: Luis (Persona acompañada)");

        let body = get_json(&client, "fam00001");
        assert_eq!(body["mensaje"], "Código válido: Familia Pérez");
        assert_eq!(body["registro"]["tipo"], "familia");
        assert_eq!(body["registro"]["num_integrantes"], 4);
    }

    #[test]
    fn test_api_lookup_invalid_and_empty() {
        let client = setup_client();
        let body = get_json(&client, "ZZZZZZZZ");
        assert_eq!(body["valido"], false);
        assert_eq!(body["mensaje"], "Código inválido.");
        assert!(body.get("registro").is_none());

        let body = get_json(&client, "");
        assert_eq!(body["mensaje"], "Por favor, ingrese un código.");
        assert!(body.get("registro").is_none());
    }

    #[test]
    fn test_api_lookup_by_path() {
        let client = setup_client();
        let response = client.get("/api/verificar/ab12cd34").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().expect("json body");
        assert_eq!(body["valido"], true);
        assert_eq!(body["registro"]["codigo_acceso"], "AB12CD34");

        let body: Value = client.get("/api/verificar/NOPE0000").dispatch().into_json().expect("json body");
        assert_eq!(body["mensaje"], "Código inválido.");
    }

    #[test]
    fn test_page_shows_details() {
        let client = setup_client();
        let response = client.get("/verificar?codigo=fam00001").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let html = response.into_string().expect("html body");
        assert!(html.contains("Código válido: Familia Pérez"));
        assert!(html.contains("# Integrantes"));
        assert!(html.contains("FAM00001"));
    }

    #[test]
    fn test_page_without_code() {
        let client = setup_client();
        let response = client.get("/verificar").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let html = response.into_string().expect("html body");
        assert!(!html.contains("Código inválido."));
    }
}

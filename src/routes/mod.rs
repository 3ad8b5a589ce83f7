use rocket::Route;

pub mod confirmar;
pub mod index;
pub mod verificar;

pub fn routes() -> Vec<Route> {
    routes![
        index::index,

        // confirmation API
        confirmar::confirmar,

        // code lookup (page + API)
        verificar::pagina,
        verificar::api,
        verificar::api_query,
    ]
}

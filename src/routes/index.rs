use rocket::response::Redirect;

#[get("/")]
pub fn index() -> Redirect {
    Redirect::to(uri!(crate::routes::verificar::pagina(codigo = _)))
}

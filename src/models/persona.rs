use serde::{Deserialize, Serialize};

/// A stored individual confirmation, solo or accompanied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: Option<i64>,
    pub nombre: String,
    pub correo: String,
    pub acompanado: bool,
    pub num_acompanantes: i64,
    pub mensaje: Option<String>,
    pub codigo_acceso: String,
    pub creado: Option<String>,
}

/// Row values for a persona insert, before an access code is attached.
///
/// Name and email stay optional here: the endpoint does not validate them and
/// leaves it to the table constraints to refuse a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPersona {
    pub nombre: Option<String>,
    pub correo: Option<String>,
    pub acompanado: bool,
    pub num_acompanantes: i64,
    pub mensaje: Option<String>,
}

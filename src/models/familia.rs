use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Familia {
    pub id: Option<i64>,
    pub nombre_familia: String,
    pub correo: String,
    pub num_integrantes: i64,
    pub mensaje: Option<String>,
    pub codigo_acceso: String,
    pub creado: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFamilia {
    pub nombre_familia: Option<String>,
    pub correo: Option<String>,
    pub num_integrantes: Option<i64>,
    pub mensaje: Option<String>,
}

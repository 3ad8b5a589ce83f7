use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const CONFIRM_PATH: &str = "/api/confirmar";

pub const PERSONA_REQUIRED: &str = "Nombre y correo son requeridos.";
pub const FAMILIA_REQUIRED: &str = "Nombre de familia, correo y número de integrantes son requeridos.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Persona,
    Familia,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    pub nombre_persona: String,
    pub correo_persona: String,
    pub acompanado: String,
    pub num_acompanantes: String,
    pub mensaje_persona: String,
    pub nombre_familia: String,
    pub correo_familia: String,
    pub integrantes: String,
    pub mensaje_familia: String,
}

impl Default for Fields {
    fn default() -> Self {
        Self {
            nombre_persona: String::new(),
            correo_persona: String::new(),
            acompanado: "no".to_string(),
            num_acompanantes: String::new(),
            mensaje_persona: String::new(),
            nombre_familia: String::new(),
            correo_familia: String::new(),
            integrantes: String::new(),
            mensaje_familia: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tipo", rename_all = "lowercase")]
pub enum Payload {
    Persona {
        nombre: String,
        correo: String,
        acompanado: String,
        #[serde(rename = "numAcompanantes")]
        num_acompanantes: i64,
        mensaje: Option<String>,
    },
    Familia {
        #[serde(rename = "nombreFamilia")]
        nombre_familia: String,
        correo: String,
        integrantes: i64,
        mensaje: Option<String>,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0}")]
    Required(&'static str),

    #[error("Número de integrantes inválido: {0}")]
    InvalidCount(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),

    #[error("Ya hay una confirmación en curso.")]
    Busy,

    #[error("{0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

pub trait Transport {
    fn post_json(&self, path: &str, body: &str) -> Result<RawResponse, TransportError>;
}

fn optional_message(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Fields {
    pub fn payload(&self, mode: Mode) -> Result<Payload, FormError> {
        match mode {
            Mode::Persona => {
                let nombre = self.nombre_persona.trim();
                let correo = self.correo_persona.trim();
                if nombre.is_empty() || correo.is_empty() {
                    return Err(FormError::Required(PERSONA_REQUIRED));
                }

                // a stray count is ignored unless the guest said they are accompanied
                let num_acompanantes: i64 = if self.acompanado == "si" {
                    self.num_acompanantes.trim().parse().unwrap_or(0)
                } else {
                    0
                };

                Ok(Payload::Persona {
                    nombre: nombre.to_string(),
                    correo: correo.to_string(),
                    acompanado: self.acompanado.clone(),
                    num_acompanantes,
                    mensaje: optional_message(&self.mensaje_persona),
                })
            }
            Mode::Familia => {
                let nombre_familia = self.nombre_familia.trim();
                let correo = self.correo_familia.trim();
                let integrantes = self.integrantes.trim();
                if nombre_familia.is_empty() || correo.is_empty() || integrantes.is_empty() {
                    return Err(FormError::Required(FAMILIA_REQUIRED));
                }

                // presence only: zero or negative counts go through
                let integrantes: i64 = integrantes
                    .parse()
                    .map_err(|_| FormError::InvalidCount(integrantes.to_string()))?;

                Ok(Payload::Familia {
                    nombre_familia: nombre_familia.to_string(),
                    correo: correo.to_string(),
                    integrantes,
                    mensaje: optional_message(&self.mensaje_familia),
                })
            }
        }
    }
}

// non-empty strings only, like a falsy check
fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null | Value::Bool(false) => None,
        other => Some(other.to_string()),
    }
}

fn present_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Turns an endpoint reply into the access code it carries.
pub fn interpret_response(response: &RawResponse) -> Result<String, SubmitError> {
    let is_json = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("application/json"));

    let result: Value = if is_json {
        serde_json::from_str(&response.body).map_err(|e| SubmitError::Rejected(e.to_string()))?
    } else {
        // some proxies drop the header; the body may still be JSON
        serde_json::from_str(&response.body).map_err(|_| {
            if response.body.is_empty() {
                SubmitError::Rejected(format!("HTTP {}", response.status))
            } else {
                SubmitError::Rejected(response.body.clone())
            }
        })?
    };

    if !(200..300).contains(&response.status) {
        let message = text_field(&result, "error")
            .or_else(|| text_field(&result, "message"))
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        return Err(SubmitError::Rejected(message));
    }

    // only a literal `true` counts
    if result.get("success").and_then(Value::as_bool) == Some(true) {
        Ok(present_field(&result, "codigo")
            .or_else(|| present_field(&result, "code"))
            .unwrap_or_else(|| "(sin código)".to_string()))
    } else {
        Err(SubmitError::Rejected(
            text_field(&result, "error").unwrap_or_else(|| "Error desconocido".to_string()),
        ))
    }
}

#[derive(Debug, Default)]
pub struct SubmissionForm {
    pub mode: Mode,
    pub fields: Fields,
    loading: bool,
    error: Option<String>,
    success_code: Option<String>,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_code(&self) -> Option<&str> {
        self.success_code.as_deref()
    }

    /// Validates and serializes the active mode, marking the form as loading.
    ///
    /// Returns the JSON body to post. Fails with [`SubmitError::Busy`] while
    /// an earlier submission has not been finished.
    pub fn begin(&mut self) -> Result<String, SubmitError> {
        if self.loading {
            return Err(SubmitError::Busy);
        }
        self.error = None;
        self.success_code = None;

        let prepared = self
            .fields
            .payload(self.mode)
            .map_err(SubmitError::from)
            .and_then(|payload| serde_json::to_string(&payload).map_err(SubmitError::from));

        match prepared {
            Ok(body) => {
                self.loading = true;
                Ok(body)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Records the outcome of the request started by [`begin`](Self::begin).
    ///
    /// On success the fields go back to their initial values; on failure they
    /// are kept so the guest can retry.
    pub fn finish(&mut self, response: Result<RawResponse, TransportError>) -> Result<String, SubmitError> {
        self.loading = false;

        let outcome = response
            .map_err(SubmitError::from)
            .and_then(|raw| interpret_response(&raw));

        match &outcome {
            Ok(codigo) => {
                self.success_code = Some(codigo.clone());
                self.fields = Fields::default();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        outcome
    }

    pub fn submit<T: Transport>(&mut self, transport: &T) -> Result<String, SubmitError> {
        let body = self.begin()?;
        let response = transport.post_json(CONFIRM_PATH, &body);
        self.finish(response)
    }
}

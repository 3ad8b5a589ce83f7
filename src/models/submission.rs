use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::familia::NewFamilia;
use crate::models::persona::NewPersona;

/// Body accepted by `POST /api/confirmar`.
///
/// Fields are kept as raw JSON: the only checks are the ones the table
/// columns make on insert.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub tipo: Option<Value>,
    pub nombre: Option<Value>,
    pub correo: Option<Value>,
    pub acompanado: Option<Value>,
    pub num_acompanantes: Option<Value>,
    pub mensaje: Option<Value>,
    pub nombre_familia: Option<Value>,
    pub integrantes: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Persona(NewPersona),
    Familia(NewFamilia),
    /// Missing or unrecognized `tipo`, as sent.
    Unknown(Option<Value>),
}

fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

// numbers and numeric strings; anything else is left for the column to refuse
fn count(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl From<ConfirmRequest> for Submission {
    fn from(request: ConfirmRequest) -> Self {
        let tipo = match &request.tipo {
            Some(Value::String(s)) => s.as_str(),
            _ => "",
        };

        match tipo {
            "persona" => Submission::Persona(NewPersona {
                nombre: text(request.nombre),
                correo: text(request.correo),
                acompanado: matches!(&request.acompanado, Some(Value::String(s)) if s == "si"),
                num_acompanantes: count(request.num_acompanantes.as_ref()).unwrap_or(0),
                mensaje: text(request.mensaje),
            }),
            "familia" => Submission::Familia(NewFamilia {
                nombre_familia: text(request.nombre_familia),
                correo: text(request.correo),
                num_integrantes: count(request.integrantes.as_ref()),
                mensaje: text(request.mensaje),
            }),
            _ => Submission::Unknown(request.tipo),
        }
    }
}

/// Reply of the confirmation endpoint, success and failure alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConfirmResponse {
    pub fn confirmed(codigo: String) -> Self {
        Self {
            success: true,
            codigo: Some(codigo),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            codigo: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Submission {
        let request: ConfirmRequest = serde_json::from_str(body).expect("valid json");
        Submission::from(request)
    }

    #[test]
    fn test_persona_without_companions() {
        let submission = parse(r#"{"tipo":"persona","nombre":"Ana","correo":"a@x.com","acompanado":"no"}"#);
        assert_eq!(
            submission,
            Submission::Persona(NewPersona {
                nombre: Some("Ana".to_string()),
                correo: Some("a@x.com".to_string()),
                acompanado: false,
                num_acompanantes: 0,
                mensaje: None,
            })
        );
    }

    #[test]
    fn test_persona_accompanied() {
        let submission = parse(
            r#"{"tipo":"persona","nombre":"Luis","correo":"l@x.com","acompanado":"si","numAcompanantes":2,"mensaje":"Ahí estaremos"}"#,
        );
        match submission {
            Submission::Persona(persona) => {
                assert!(persona.acompanado);
                assert_eq!(persona.num_acompanantes, 2);
                assert_eq!(persona.mensaje.as_deref(), Some("Ahí estaremos"));
            }
            other => panic!("expected persona, got {:?}", other),
        }
    }

    #[test]
    fn test_acompanado_only_true_for_si() {
        for value in [r#""SI""#, "true", r#""yes""#, "null"] {
            let body = format!(r#"{{"tipo":"persona","acompanado":{}}}"#, value);
            match parse(&body) {
                Submission::Persona(persona) => assert!(!persona.acompanado, "{} counted as accompanied", value),
                other => panic!("expected persona, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_familia_fields() {
        let submission = parse(r#"{"tipo":"familia","nombreFamilia":"Pérez","correo":"p@x.com","integrantes":4,"mensaje":null}"#);
        assert_eq!(
            submission,
            Submission::Familia(NewFamilia {
                nombre_familia: Some("Pérez".to_string()),
                correo: Some("p@x.com".to_string()),
                num_integrantes: Some(4),
                mensaje: None,
            })
        );
    }

    #[test]
    fn test_unknown_tipo() {
        assert_eq!(parse(r#"{"tipo":"grupo"}"#), Submission::Unknown(Some(Value::from("grupo"))));
        assert_eq!(parse(r#"{"nombre":"Ana"}"#), Submission::Unknown(None));
        assert_eq!(parse(r#"{"tipo":1}"#), Submission::Unknown(Some(Value::from(1))));
        assert_eq!(parse(r#"{"tipo":["persona"]}"#), Submission::Unknown(Some(serde_json::json!(["persona"]))));
    }

    #[test]
    fn test_loose_field_types_are_accepted() {
        let submission = parse(
            r#"{"tipo":"persona","nombre":"Luis","correo":"l@x.com","acompanado":"si","numAcompanantes":"2","mensaje":5}"#,
        );
        match submission {
            Submission::Persona(persona) => {
                assert_eq!(persona.num_acompanantes, 2);
                assert_eq!(persona.mensaje.as_deref(), Some("5"));
            }
            other => panic!("expected persona, got {:?}", other),
        }

        match parse(r#"{"tipo":"familia","nombreFamilia":"Ruiz","correo":"r@x.com","integrantes":"3"}"#) {
            Submission::Familia(familia) => assert_eq!(familia.num_integrantes, Some(3)),
            other => panic!("expected familia, got {:?}", other),
        }
    }

    #[test]
    fn test_unusable_counts() {
        match parse(r#"{"tipo":"persona","acompanado":"si","numAcompanantes":"dos"}"#) {
            Submission::Persona(persona) => assert_eq!(persona.num_acompanantes, 0),
            other => panic!("expected persona, got {:?}", other),
        }
        match parse(r#"{"tipo":"familia","integrantes":"cuatro"}"#) {
            Submission::Familia(familia) => assert_eq!(familia.num_integrantes, None),
            other => panic!("expected familia, got {:?}", other),
        }
    }

    #[test]
    fn test_response_shapes() {
        let ok = serde_json::to_value(ConfirmResponse::confirmed("AB12CD34".to_string())).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "codigo": "AB12CD34"}));

        let failed = serde_json::to_value(ConfirmResponse::failed("boom".to_string())).unwrap();
        assert_eq!(failed, serde_json::json!({"success": false, "error": "boom"}));
    }
}

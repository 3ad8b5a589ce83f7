use serde::Serialize;

use crate::models::access_code::normalize;
use crate::models::familia::Familia;
use crate::models::persona::Persona;
use crate::models::Record;

pub const MISSING_CODE: &str = "Por favor, ingrese un código.";
pub const INVALID_CODE: &str = "Código inválido.";

#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub personas_solas: Vec<Persona>,
    pub personas_acompanadas: Vec<Persona>,
    pub familias: Vec<Familia>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verification<'a> {
    MissingCode,
    Invalid,
    Valid(Match<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Match<'a> {
    PersonaSola(&'a Persona),
    PersonaAcompanada(&'a Persona),
    Familia(&'a Familia),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub label: &'static str,
    pub value: String,
}

impl Detail {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

impl Collections {
    pub fn new(personas_solas: Vec<Persona>, personas_acompanadas: Vec<Persona>, familias: Vec<Familia>) -> Self {
        Self {
            personas_solas,
            personas_acompanadas,
            familias,
        }
    }

    /// Builds the three lists from the two stored tables, splitting persons on
    /// their `acompanado` flag.
    pub fn split(personas: Vec<Persona>, familias: Vec<Familia>) -> Self {
        let (personas_acompanadas, personas_solas) = personas.into_iter().partition(|p| p.acompanado);
        Self::new(personas_solas, personas_acompanadas, familias)
    }

    /// First match wins, in list order: solo, accompanied, families.
    pub fn verify(&self, input: &str) -> Verification<'_> {
        let codigo = normalize(input);
        if codigo.is_empty() {
            return Verification::MissingCode;
        }

        let same = |stored: &str| normalize(stored) == codigo;

        if let Some(p) = self.personas_solas.iter().find(|p| same(&p.codigo_acceso)) {
            return Verification::Valid(Match::PersonaSola(p));
        }
        if let Some(p) = self.personas_acompanadas.iter().find(|p| same(&p.codigo_acceso)) {
            return Verification::Valid(Match::PersonaAcompanada(p));
        }
        if let Some(f) = self.familias.iter().find(|f| same(&f.codigo_acceso)) {
            return Verification::Valid(Match::Familia(f));
        }
        Verification::Invalid
    }
}

impl<'a> Verification<'a> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid(_))
    }

    pub fn message(&self) -> String {
        match self {
            Verification::MissingCode => MISSING_CODE.to_string(),
            Verification::Invalid => INVALID_CODE.to_string(),
            Verification::Valid(Match::PersonaSola(p)) => format!("Código válido: {} (Persona sola)", p.nombre),
            Verification::Valid(Match::PersonaAcompanada(p)) => {
                format!("Código válido: {} (Persona acompañada)", p.nombre)
            }
            Verification::Valid(Match::Familia(f)) => format!("Código válido: Familia {}", f.nombre_familia),
        }
    }

    pub fn record(&self) -> Option<Record> {
        match self {
            Verification::Valid(Match::PersonaSola(p)) | Verification::Valid(Match::PersonaAcompanada(p)) => {
                Some(Record::Persona((*p).clone()))
            }
            Verification::Valid(Match::Familia(f)) => Some(Record::Familia((*f).clone())),
            _ => None,
        }
    }

    pub fn details(&self) -> Vec<Detail> {
        match self.record() {
            Some(Record::Persona(p)) => vec![
                Detail::new("Nombre", p.nombre),
                Detail::new("Correo", p.correo),
                Detail::new("Acompañantes", p.num_acompanantes.to_string()),
                Detail::new("Mensaje", p.mensaje.unwrap_or_default()),
                Detail::new("Código", p.codigo_acceso),
            ],
            Some(Record::Familia(f)) => vec![
                Detail::new("Familia", f.nombre_familia),
                Detail::new("Correo", f.correo),
                Detail::new("# Integrantes", f.num_integrantes.to_string()),
                Detail::new("Mensaje", f.mensaje.unwrap_or_default()),
                Detail::new("Código", f.codigo_acceso),
            ],
            None => Vec::new(),
        }
    }
}

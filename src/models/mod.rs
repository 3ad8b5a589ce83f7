use serde::{Deserialize, Serialize};

pub mod access_code;
pub mod familia;
pub mod persona;
pub mod submission;

use familia::Familia;
use persona::Persona;

/// A stored confirmation with its kind made explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "lowercase")]
pub enum Record {
    Persona(Persona),
    Familia(Familia),
}

//! Command-line RSVP form: fills in one confirmation and posts it to a
//! running server.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rsvp::client::HttpTransport;
use rsvp::form::{Mode, SubmissionForm};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "rsvp-confirmar", about = "Confirmar asistencia")]
struct Cli {
    /// Base URL of the RSVP server
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    url: String,

    #[command(subcommand)]
    tipo: Tipo,
}

#[derive(Subcommand)]
enum Tipo {
    /// Attending alone or accompanied
    Persona {
        #[arg(long, default_value = "")]
        nombre: String,
        #[arg(long, default_value = "")]
        correo: String,
        /// "si" or "no"
        #[arg(long, default_value = "no")]
        acompanado: String,
        #[arg(long, default_value = "")]
        acompanantes: String,
        #[arg(long, default_value = "")]
        mensaje: String,
    },
    /// Attending as a family
    Familia {
        #[arg(long, default_value = "")]
        nombre: String,
        #[arg(long, default_value = "")]
        correo: String,
        #[arg(long, default_value = "")]
        integrantes: String,
        #[arg(long, default_value = "")]
        mensaje: String,
    },
}

fn fill(form: &mut SubmissionForm, tipo: Tipo) {
    match tipo {
        Tipo::Persona {
            nombre,
            correo,
            acompanado,
            acompanantes,
            mensaje,
        } => {
            form.select(Mode::Persona);
            form.fields.nombre_persona = nombre;
            form.fields.correo_persona = correo;
            form.fields.acompanado = acompanado;
            form.fields.num_acompanantes = acompanantes;
            form.fields.mensaje_persona = mensaje;
        }
        Tipo::Familia {
            nombre,
            correo,
            integrantes,
            mensaje,
        } => {
            form.select(Mode::Familia);
            form.fields.nombre_familia = nombre;
            form.fields.correo_familia = correo;
            form.fields.integrantes = integrantes;
            form.fields.mensaje_familia = mensaje;
        }
    }
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let transport = HttpTransport::new(cli.url);

    let mut form = SubmissionForm::new();
    fill(&mut form, cli.tipo);

    match form.submit(&transport) {
        Ok(codigo) => {
            println!("✅ Confirmación guardada. Tu código es: {codigo}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {e}");
            ExitCode::FAILURE
        }
    }
}

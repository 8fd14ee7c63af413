mod api;
mod openrouter_response;

pub use self::api::OpenRouterApi;

use crate::movements::Category;
use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

/**
Candidate movement as returned by the model, before any validation.

Keys follow the extraction prompt. Category membership and type
normalization are checked downstream by the webhook handler, not here.
*/
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtractedMovement {
    pub tipo: String,
    pub monto: f64,
    pub categoria: String,
}

/**
Typed result of one extraction attempt. A failed attempt is a value, not
an error: nothing is raised past this boundary.
*/
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Extracted(ExtractedMovement),
    ParseFailure { raw: String },
    RequestFailure { reason: String },
}

pub async fn ai_extract_movement(api: &OpenRouterApi, text: &str) -> ExtractionOutcome {
    let prompt = build_extraction_prompt(text);

    info!("Calling OpenRouter to extract a movement from the message");
    let raw = match api.chat(prompt).await {
        Ok(raw) => raw,
        Err(e) => return ExtractionOutcome::RequestFailure { reason: e.to_string() },
    };

    match parse_extraction(&raw) {
        Ok(extracted) => {
            info!("OpenRouter returned movement: {:?}", extracted);
            ExtractionOutcome::Extracted(extracted)
        }
        Err(e) => {
            warn!("Failed to parse OpenRouter output: {}; raw: {}", e, raw);
            ExtractionOutcome::ParseFailure { raw }
        }
    }
}

pub fn build_extraction_prompt(text: &str) -> String {
    let categories = Category::ALL
        .iter()
        .map(|categoria| categoria.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    PROMPT
        .to_string()
        .replace("{CATEGORIES}", &categories)
        .replace("{TEXT}", text)
}

/// Models tend to wrap the object in a Markdown fence; accept both forms.
fn parse_extraction(raw: &str) -> Result<ExtractedMovement, serde_json::Error> {
    let fence = Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").unwrap();
    let json_str = match fence.captures(raw).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => raw.trim(),
    };

    serde_json::from_str(json_str)
}

const PROMPT: &str = r#"
Extrae el tipo, monto y la categoría desde el siguiente texto con las siguientes indicaciones.
El tipo siempre debe ser gasto por defecto a menos que el texto indica que se debe agregar (o cualquier sinonimo de adicionar).
El monto siempre debe positivo
La categoría debe estar dentro del siguiente listado: {CATEGORIES}. Nota: Si se recibe una palabra con errores ortográficos o con tilde (por ejemplo, alimentación), esta debe normalizarse eliminando las tildes y considerarse como alimentacion, a fin de coincidir con las categorías predefinidas. El objetivo es asegurar una correcta categorización aunque la palabra no esté escrita con exactitud ortográfica.

Devuelve solo un JSON con las claves: "tipo" (texto gasto o ingreso), "monto" (número), "categoria" (texto exacto del listado). Nada más.
Texto: "{TEXT}"
"#;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::str::FromStr;
use tracing::{error, info, warn};

use crate::app_state::AppState;
use crate::genai::{ExtractionOutcome, ai_extract_movement};
use crate::movements::{Category, MovementKind};
use crate::reports;
use crate::telegram::TelegramUpdate;

const GENERAL_REPORT_KEYWORDS: [&str; 3] = ["reporte", "reporte general", "todo"];
const CATEGORY_REPORT_PREFIX: &str = "reporte de ";

/// What one incoming message asks for, decided once up front.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageIntent {
    GeneralReport,
    CategoryReport(String),
    RecordMovement,
}

pub fn classify_message(text: &str) -> MessageIntent {
    let normalized = text.trim().to_lowercase();

    if GENERAL_REPORT_KEYWORDS.contains(&normalized.as_str()) {
        return MessageIntent::GeneralReport;
    }

    if let Some(rest) = normalized.strip_prefix(CATEGORY_REPORT_PREFIX) {
        return MessageIntent::CategoryReport(rest.trim().to_string());
    }

    MessageIntent::RecordMovement
}

pub async fn telegram_webhook_handler(
    State(app_state): State<AppState>,
    Json(body): Json<Value>,
) -> Response {
    match handle_update(app_state, body).await {
        Ok(ack) => ack.into_response(),
        Err(e) => {
            error!("Unexpected error handling update: {:#?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn handle_update(
    app_state: AppState,
    body: Value,
) -> Result<Json<Value>, Box<dyn std::error::Error + Send + Sync>> {
    info!("Update received: {}", body);

    let update: TelegramUpdate = serde_json::from_value(body)?;
    let Some(message) = update.message else {
        return Ok(ack());
    };

    let chat_id = message.chat.id;
    let text = message.text.unwrap_or_default().trim().to_string();
    if text.is_empty() {
        return Ok(ack());
    }

    let reply = match classify_message(&text) {
        MessageIntent::GeneralReport => general_report_reply(&app_state, chat_id),
        MessageIntent::CategoryReport(raw_category) => {
            category_report_reply(&app_state, chat_id, &raw_category)
        }
        MessageIntent::RecordMovement => {
            let outcome = ai_extract_movement(&app_state.openrouter_api, &text).await;
            record_movement_reply(&app_state, chat_id, &text, outcome)?
        }
    };

    app_state.telegram_api.send_message(chat_id, &reply).await;

    Ok(ack())
}

fn ack() -> Json<Value> {
    Json(json!({ "ok": true }))
}

fn general_report_reply(app_state: &AppState, chat_id: i64) -> String {
    let totals = app_state.movement_db.report(chat_id);
    reports::general_report_message(&totals, &app_state.sheet_url)
}

fn category_report_reply(app_state: &AppState, chat_id: i64, raw_category: &str) -> String {
    match Category::from_str(raw_category) {
        Ok(categoria) => {
            let saldo = app_state.movement_db.balance(chat_id, categoria);
            reports::category_balance_message(categoria, saldo, &app_state.sheet_url)
        }
        Err(_) => reports::invalid_category_message(),
    }
}

fn record_movement_reply(
    app_state: &AppState,
    chat_id: i64,
    text: &str,
    outcome: ExtractionOutcome,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let extracted = match outcome {
        ExtractionOutcome::Extracted(extracted) => extracted,
        ExtractionOutcome::ParseFailure { raw } => {
            warn!("Extraction returned unparseable output: {}", raw);
            return Ok(reports::could_not_interpret_message());
        }
        ExtractionOutcome::RequestFailure { reason } => {
            warn!("Extraction request failed: {}", reason);
            return Ok(reports::could_not_interpret_message());
        }
    };

    let Ok(categoria) = Category::from_str(&extracted.categoria) else {
        warn!("Extraction returned unknown category: {}", extracted.categoria);
        return Ok(reports::could_not_interpret_message());
    };

    let tipo = if extracted.tipo == "ingreso" {
        MovementKind::Ingreso
    } else {
        MovementKind::Gasto
    };
    let monto = extracted.monto.abs();

    app_state.movement_db.insert(chat_id, tipo, monto, categoria, text)?;
    let saldo = app_state.movement_db.balance(chat_id, categoria);

    Ok(reports::recorded_message(tipo, monto, categoria, saldo, &app_state.sheet_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LedgerFileDb;
    use crate::genai::{ExtractedMovement, OpenRouterApi};
    use crate::telegram::TelegramApi;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movimientos.json");
        let movement_db = LedgerFileDb::new(path.to_string_lossy().into_owned()).unwrap();
        let app_state = AppState {
            movement_db,
            openrouter_api: OpenRouterApi::from_parts("test-key".to_string(), "test-model".to_string()),
            telegram_api: TelegramApi::from_token("test-token".to_string()),
            sheet_url: "https://sheets.example/reporte".to_string(),
            export_pass: "0000".to_string(),
        };
        (app_state, dir)
    }

    fn extracted(tipo: &str, monto: f64, categoria: &str) -> ExtractionOutcome {
        ExtractionOutcome::Extracted(ExtractedMovement {
            tipo: tipo.to_string(),
            monto,
            categoria: categoria.to_string(),
        })
    }

    #[test]
    fn report_keywords_classify_as_general_report() {
        assert_eq!(classify_message("reporte"), MessageIntent::GeneralReport);
        assert_eq!(classify_message("Reporte General"), MessageIntent::GeneralReport);
        assert_eq!(classify_message("  TODO  "), MessageIntent::GeneralReport);
    }

    #[test]
    fn report_prefix_classifies_as_category_report() {
        assert_eq!(
            classify_message("Reporte de Transporte"),
            MessageIntent::CategoryReport("transporte".to_string())
        );
    }

    #[test]
    fn anything_else_classifies_as_record() {
        assert_eq!(classify_message("gasté 30 en transporte"), MessageIntent::RecordMovement);
        assert_eq!(classify_message("reportes"), MessageIntent::RecordMovement);
    }

    #[test]
    fn recorded_expense_persists_and_summarizes() {
        let (app_state, _dir) = test_state();

        let reply = record_movement_reply(
            &app_state,
            42,
            "gasté 30 en transporte",
            extracted("gasto", 30.0, "transporte"),
        )
        .unwrap();

        let records = app_state.movement_db.data();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].monto, 30.0);
        assert_eq!(records[0].tipo, MovementKind::Gasto);
        assert_eq!(records[0].mensaje_original, "gasté 30 en transporte");
        assert!(reply.contains("30.00"));
        assert!(reply.contains("Gasto"));
    }

    #[test]
    fn negative_extracted_amount_is_stored_absolute() {
        let (app_state, _dir) = test_state();

        record_movement_reply(&app_state, 42, "gasté 30", extracted("gasto", -30.0, "ropa"))
            .unwrap();

        assert_eq!(app_state.movement_db.data()[0].monto, 30.0);
    }

    #[test]
    fn unknown_extracted_type_defaults_to_expense() {
        let (app_state, _dir) = test_state();

        record_movement_reply(&app_state, 42, "30 en plantas", extracted("compra", 30.0, "plantas"))
            .unwrap();

        assert_eq!(app_state.movement_db.data()[0].tipo, MovementKind::Gasto);
    }

    #[test]
    fn unknown_category_persists_nothing() {
        let (app_state, _dir) = test_state();

        let reply = record_movement_reply(
            &app_state,
            42,
            "gasté 30 en cripto",
            extracted("gasto", 30.0, "cripto"),
        )
        .unwrap();

        assert!(app_state.movement_db.is_data_empty());
        assert_eq!(reply, reports::could_not_interpret_message());
    }

    #[test]
    fn extraction_failures_ask_for_a_rephrase() {
        let (app_state, _dir) = test_state();

        let parse_reply = record_movement_reply(
            &app_state,
            42,
            "???",
            ExtractionOutcome::ParseFailure { raw: "no JSON here".to_string() },
        )
        .unwrap();
        let request_reply = record_movement_reply(
            &app_state,
            42,
            "???",
            ExtractionOutcome::RequestFailure { reason: "timeout".to_string() },
        )
        .unwrap();

        assert_eq!(parse_reply, reports::could_not_interpret_message());
        assert_eq!(request_reply, reports::could_not_interpret_message());
        assert!(app_state.movement_db.is_data_empty());
    }

    #[test]
    fn general_report_reply_lists_both_categories() {
        let (app_state, _dir) = test_state();
        app_state
            .movement_db
            .insert(42, MovementKind::Ingreso, 50.0, Category::Salud, "ahorré 50")
            .unwrap();
        app_state
            .movement_db
            .insert(42, MovementKind::Gasto, 20.0, Category::Alimentacion, "gasté 20")
            .unwrap();

        let reply = general_report_reply(&app_state, 42);
        assert!(reply.contains("• salud: S/ 50.00"));
        assert!(reply.contains("• alimentacion: S/ -20.00"));
    }

    #[test]
    fn category_report_with_unknown_category_lists_valid_ones() {
        let (app_state, _dir) = test_state();
        let reply = category_report_reply(&app_state, 42, "invalidcat");
        assert_eq!(reply, reports::invalid_category_message());
    }

    #[test]
    fn category_report_without_records_shows_zero() {
        let (app_state, _dir) = test_state();
        let reply = category_report_reply(&app_state, 42, "salud");
        assert!(reply.contains("S/ 0.00"));
    }
}

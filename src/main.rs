use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::time::Duration;
use telegram_gastos_bot::app_state::AppState;
use telegram_gastos_bot::db::MovementsDb;
use telegram_gastos_bot::genai::OpenRouterApi;
use telegram_gastos_bot::handlers::{DEFAULT_EXPORT_PASS, export_handler, telegram_webhook_handler};
use telegram_gastos_bot::telegram::TelegramApi;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::error;
use tracing::info;

#[tokio::main]
async fn main() {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // init file DB
    let movement_db: MovementsDb = match MovementsDb::new_movements_db() {
        Ok(db) => db,
        Err(e) => {
            error!("Error creating MovementsDb: {:#?}", e);
            return;
        }
    };

    // init Telegram Bot API caller
    let telegram_api = match TelegramApi::new() {
        Ok(api) => api,
        Err(e) => {
            error!("Error creating TelegramApi: {:#?}", e);
            return;
        }
    };

    // init OpenRouter API caller
    let openrouter_api = match OpenRouterApi::new() {
        Ok(api) => api,
        Err(e) => {
            error!("Error creating OpenRouterApi: {:#?}", e);
            return;
        }
    };

    let sheet_url = match dotenv::var("GOOGLE_SHEET_URL") {
        Ok(url) => url,
        Err(e) => {
            error!("GOOGLE_SHEET_URL is not set: {:#?}", e);
            return;
        }
    };

    let export_pass =
        dotenv::var("EXPORT_PASS").unwrap_or_else(|_| DEFAULT_EXPORT_PASS.to_string());

    // Telegram is configured to call POST /{BOT_TOKEN}
    let webhook_path = telegram_api.webhook_path();

    // App State
    let app_state = AppState {
        movement_db,
        openrouter_api,
        telegram_api,
        sheet_url,
        export_pass,
    };

    // build our application with a route
    let app = Router::new()
        // `GET /` goes to `root`
        .route("/", get(root))
        .route(&webhook_path, post(telegram_webhook_handler))
        .route("/exportar", get(export_handler))
        .with_state(app_state)
        .layer((
            TraceLayer::new_for_http(),
            // Graceful shutdown will wait for outstanding requests to complete. Add a timeout so
            // requests don't hang forever. Must outlast the 30s extraction call.
            TimeoutLayer::new(Duration::from_secs(60)),
        ));

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Bot de gastos activo ✅" }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down.");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down.");
        },
    }
}

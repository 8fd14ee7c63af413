use crate::db::MovementsDb;
use crate::genai::OpenRouterApi;
use crate::telegram::TelegramApi;

#[derive(Clone)]
pub struct AppState {
    pub movement_db: MovementsDb,
    pub openrouter_api: OpenRouterApi,
    pub telegram_api: TelegramApi,
    pub sheet_url: String,
    pub export_pass: String,
}

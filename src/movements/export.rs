use serde::{Deserialize, Serialize};

use super::{Category, Movement, MovementKind};

/// Timestamp rendering used by the export endpoint.
pub const EXPORT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/**
Export view of a movement: same fields, `fecha` rendered to a fixed
human-readable format.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementExport {
    pub chat_id: i64,
    pub tipo: MovementKind,
    pub monto: f64,
    pub categoria: Category,
    pub mensaje_original: String,
    pub fecha: String,
}

impl From<&Movement> for MovementExport {
    fn from(movement: &Movement) -> Self {
        Self {
            chat_id: movement.chat_id,
            tipo: movement.tipo,
            monto: movement.monto,
            categoria: movement.categoria,
            mensaje_original: movement.mensaje_original.clone(),
            fecha: movement.fecha.format(EXPORT_DATETIME_FORMAT).to_string(),
        }
    }
}

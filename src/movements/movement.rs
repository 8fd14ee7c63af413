/*!
Structs and Enums for the persisted movement ledger.
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/**
A single recorded expense or income.

Field names double as the persisted JSON keys, which the export endpoint
returns as-is. Records are immutable once created: the ledger exposes no
update or delete, and balances are always derived by aggregation.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// Telegram chat the movement belongs to.
    pub chat_id: i64,

    /// Whether the amount counts against or towards the balance.
    pub tipo: MovementKind,

    /// Amount in S/. Always non-negative; the sign lives in `tipo`.
    pub monto: f64,

    /// Category label out of the closed set.
    pub categoria: Category,

    /// Verbatim user text the movement was extracted from.
    pub mensaje_original: String,

    /// Insertion time, assigned by the store.
    pub fecha: DateTime<Utc>,
}

impl Movement {
    pub fn new(
        chat_id: i64,
        tipo: MovementKind,
        monto: f64,
        categoria: Category,
        mensaje_original: &str,
    ) -> Self {
        Self {
            chat_id,
            tipo,
            monto: monto.abs(),
            categoria,
            mensaje_original: mensaje_original.to_string(),
            fecha: Utc::now(),
        }
    }

    /// Amount with the sign implied by `tipo`.
    pub fn signed_amount(&self) -> f64 {
        match self.tipo {
            MovementKind::Ingreso => self.monto,
            MovementKind::Gasto => -self.monto,
        }
    }
}

/**
Movement type.

Extraction defaults to `Gasto` unless the text asks to add or save money.
*/
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Expense.
    #[default]
    Gasto,
    /// Income.
    Ingreso,
}

use serde::{Deserialize, Serialize};

/**
Categories a movement can be filed under.

The set is closed: the extraction prompt instructs the model to answer with
one of these exact labels, and anything else is rejected before
persistence. The labels are the unaccented lowercase forms users see in
replies and in exported data.
*/
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    /// Health.
    Salud,
    /// Cleaning.
    Limpieza,
    /// Food.
    Alimentacion,
    /// Transport.
    Transporte,
    /// Outings.
    Salidas,
    /// Clothing.
    Ropa,
    /// Plants.
    Plantas,
    /// Home repairs.
    #[serde(rename = "arreglos casa")]
    #[strum(serialize = "arreglos casa")]
    ArreglosCasa,
    /// Vacations.
    Vacaciones,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Salud,
        Category::Limpieza,
        Category::Alimentacion,
        Category::Transporte,
        Category::Salidas,
        Category::Ropa,
        Category::Plantas,
        Category::ArreglosCasa,
        Category::Vacaciones,
    ];
}

//! Reply message formatting. Pure functions over store query results.

use crate::movements::{Category, MovementKind};

/// Lines follow the order the store aggregated them in, not alphabetical.
pub fn general_report_message(totals: &[(Category, f64)], sheet_url: &str) -> String {
    let mut message = String::from("📊 *Reporte general de categorías:*\n");
    for (categoria, saldo) in totals {
        message.push_str(&format!("• {}: S/ {:.2}\n", categoria, saldo));
    }
    message.push_str(&sheet_link(sheet_url));
    message
}

pub fn category_balance_message(categoria: Category, saldo: f64, sheet_url: &str) -> String {
    format!(
        "💼 *Saldo en '{}':*\nS/ {:.2}\n{}",
        categoria,
        saldo,
        sheet_link(sheet_url)
    )
}

pub fn recorded_message(
    tipo: MovementKind,
    monto: f64,
    categoria: Category,
    saldo: f64,
    sheet_url: &str,
) -> String {
    format!(
        "✅ {} de S/ {:.2} registrado en '{}'.\n💰 Saldo actual: S/ {:.2}\n{}",
        tipo,
        monto,
        categoria,
        saldo,
        sheet_link(sheet_url)
    )
}

pub fn invalid_category_message() -> String {
    format!("❌ Categoría inválida. Usa:\n{}", category_lines())
}

pub fn could_not_interpret_message() -> String {
    format!(
        "⚠️ No pude interpretar tu mensaje.\nEjemplo: 'gasté 30 en transporte' o 'ahorré 50 para salud'\nCategorías válidas:\n{}",
        category_lines()
    )
}

fn category_lines() -> String {
    Category::ALL
        .iter()
        .map(|categoria| format!("- {}", categoria))
        .collect::<Vec<_>>()
        .join("\n")
}

fn sheet_link(sheet_url: &str) -> String {
    format!("\n[📄 Ver reporte en Google Sheets]({})", sheet_url)
}

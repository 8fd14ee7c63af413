use super::db_base::LedgerFileDb;
use crate::movements::{Category, Movement, MovementExport, MovementKind};
use chrono::NaiveDateTime;
use tracing::info;

pub type MovementsDb = LedgerFileDb<Movement>;

impl MovementsDb {
    pub fn new_movements_db() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let res = LedgerFileDb::<Movement>::new("db/movimientos.json".to_string());
        info!("Movements DB initialized.");
        res
    }

    /// Appends one immutable record with a store-assigned UTC timestamp.
    /// Repeated identical calls create distinct records.
    pub fn insert(
        &self,
        chat_id: i64,
        tipo: MovementKind,
        monto: f64,
        categoria: Category,
        mensaje_original: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let movement = Movement::new(chat_id, tipo, monto, categoria, mensaje_original);
        self.append(movement)?;
        info!(
            "Saved movement: {} S/ {:.2} in {} ({})",
            tipo,
            monto.abs(),
            categoria,
            chat_id
        );
        Ok(())
    }

    /// Net balance of one category: income minus expense.
    pub fn balance(&self, chat_id: i64, categoria: Category) -> f64 {
        self.data()
            .iter()
            .filter(|m| m.chat_id == chat_id && m.categoria == categoria)
            .map(Movement::signed_amount)
            .sum()
    }

    /// Net balance per category with at least one record, in first-appearance
    /// order. Categories with no activity are omitted, not zero-filled.
    pub fn report(&self, chat_id: i64) -> Vec<(Category, f64)> {
        let mut totals: Vec<(Category, f64)> = Vec::new();
        for movement in self.data().iter().filter(|m| m.chat_id == chat_id) {
            match totals
                .iter_mut()
                .find(|(categoria, _)| *categoria == movement.categoria)
            {
                Some((_, total)) => *total += movement.signed_amount(),
                None => totals.push((movement.categoria, movement.signed_amount())),
            }
        }
        totals
    }

    /// All records whose `fecha` falls inside the optional inclusive
    /// `[desde, hasta]` window.
    pub fn export(
        &self,
        desde: Option<NaiveDateTime>,
        hasta: Option<NaiveDateTime>,
    ) -> Vec<MovementExport> {
        self.data()
            .iter()
            .filter(|m| {
                let fecha = m.fecha.naive_utc();
                desde.map_or(true, |d| fecha >= d) && hasta.map_or(true, |h| fecha <= h)
            })
            .map(MovementExport::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn test_db() -> (MovementsDb, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movimientos.json");
        let db = LedgerFileDb::new(path.to_string_lossy().into_owned()).unwrap();
        (db, dir)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(NaiveTime::MIN)
    }

    #[test]
    fn balance_without_records_is_zero() {
        let (db, _dir) = test_db();
        assert!(db.is_data_empty());
        assert_eq!(db.balance(7, Category::Salud), 0.0);
    }

    #[test]
    fn balance_nets_income_against_expense() {
        let (db, _dir) = test_db();
        db.insert(7, MovementKind::Ingreso, 50.0, Category::Salud, "ahorré 50").unwrap();
        db.insert(7, MovementKind::Gasto, 20.0, Category::Salud, "gasté 20").unwrap();
        db.insert(8, MovementKind::Gasto, 99.0, Category::Salud, "otro chat").unwrap();

        assert_eq!(db.balance(7, Category::Salud), 30.0);
    }

    #[test]
    fn repeated_inserts_create_distinct_records() {
        let (db, _dir) = test_db();
        db.insert(7, MovementKind::Gasto, 30.0, Category::Transporte, "gasté 30").unwrap();
        db.insert(7, MovementKind::Gasto, 30.0, Category::Transporte, "gasté 30").unwrap();

        assert_eq!(db.data().len(), 2);
        assert_eq!(db.balance(7, Category::Transporte), -60.0);
    }

    #[test]
    fn report_keeps_first_appearance_order() {
        let (db, _dir) = test_db();
        db.insert(7, MovementKind::Ingreso, 50.0, Category::Salud, "a").unwrap();
        db.insert(7, MovementKind::Gasto, 20.0, Category::Alimentacion, "b").unwrap();
        db.insert(7, MovementKind::Gasto, 5.0, Category::Salud, "c").unwrap();

        let report = db.report(7);
        assert_eq!(
            report,
            vec![(Category::Salud, 45.0), (Category::Alimentacion, -20.0)]
        );
    }

    #[test]
    fn report_scopes_to_chat() {
        let (db, _dir) = test_db();
        db.insert(7, MovementKind::Gasto, 20.0, Category::Ropa, "a").unwrap();
        db.insert(8, MovementKind::Gasto, 10.0, Category::Plantas, "b").unwrap();

        assert_eq!(db.report(7), vec![(Category::Ropa, -20.0)]);
    }

    #[test]
    fn export_filters_inclusive_window() {
        let (db, _dir) = test_db();
        db.insert(7, MovementKind::Gasto, 30.0, Category::Transporte, "gasté 30").unwrap();

        assert_eq!(db.export(None, None).len(), 1);
        assert_eq!(db.export(Some(date(2000, 1, 1)), None).len(), 1);
        assert_eq!(db.export(None, Some(date(2000, 1, 1))).len(), 0);
        assert_eq!(db.export(Some(date(2100, 1, 1)), None).len(), 0);
    }

    #[test]
    fn export_strips_nothing_but_formats_fecha() {
        let (db, _dir) = test_db();
        db.insert(7, MovementKind::Ingreso, 50.0, Category::Vacaciones, "ahorré 50").unwrap();

        let exported = db.export(None, None);
        assert_eq!(exported[0].chat_id, 7);
        assert_eq!(exported[0].mensaje_original, "ahorré 50");
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(exported[0].fecha.len(), 19);
    }

    #[test]
    fn reopening_reads_persisted_records() {
        let (db, dir) = test_db();
        db.insert(7, MovementKind::Gasto, 30.0, Category::Transporte, "gasté 30").unwrap();

        let path = dir.path().join("movimientos.json");
        let reopened: MovementsDb = LedgerFileDb::new(path.to_string_lossy().into_owned()).unwrap();
        assert_eq!(reopened.data().len(), 1);
    }
}

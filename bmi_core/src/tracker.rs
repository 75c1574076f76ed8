//! Tracker facade: the calls a presentation layer makes into the core.
//!
//! A typical interaction is two steps. `compute_bmi` returns a
//! [`PendingMeasurement`] the caller keeps; `save_measurement` commits it
//! if the user confirms. The tracker holds no pending state of its own.

use crate::{
    Config, MeasurementRecord, MeasurementStore, PendingMeasurement, RecordId, Result,
    SqliteStore,
};

/// Facade over the BMI engine and a measurement store
pub struct Tracker<S: MeasurementStore> {
    store: S,
}

impl Tracker<SqliteStore> {
    /// Build a tracker over the SQLite file named by `config`.
    ///
    /// The store is not opened yet; call [`Tracker::initialize_store`].
    pub fn open(config: &Config) -> Self {
        Self::new(SqliteStore::new(config.database_path()))
    }
}

impl<S: MeasurementStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Prepare the store; call once at process start
    pub fn initialize_store(&mut self) -> Result<()> {
        self.store.initialize()
    }

    /// Compute BMI and category for kilograms and meters
    pub fn compute_bmi(&self, weight_kg: f64, height_m: f64) -> Result<PendingMeasurement> {
        PendingMeasurement::new(weight_kg, height_m)
    }

    /// Persist a previously computed measurement
    pub fn save_measurement(&mut self, measurement: &PendingMeasurement) -> Result<RecordId> {
        let record_id = self.store.append(measurement)?;
        tracing::info!(
            "Saved measurement {} ({:.2}, {})",
            record_id,
            measurement.bmi_value(),
            measurement.category()
        );
        Ok(record_id)
    }

    /// All saved measurements, newest first
    pub fn list_history(&self) -> Result<Vec<MeasurementRecord>> {
        self.store.list_all()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{logging, BmiCategory};

    fn tracker() -> Tracker<SqliteStore> {
        logging::init_test();
        let mut tracker = Tracker::new(SqliteStore::in_memory());
        tracker.initialize_store().unwrap();
        tracker
    }

    #[test]
    fn test_compute_then_save_roundtrip() {
        let mut tracker = tracker();

        let pending = tracker.compute_bmi(45.0, 1.60).unwrap();
        assert_eq!(pending.category(), BmiCategory::Underweight);

        let id = tracker.save_measurement(&pending).unwrap();
        let history = tracker.list_history().unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].record_id, id);
        assert_eq!(history[0].bmi_value, pending.bmi_value());
        assert_eq!(history[0].bmi_category, BmiCategory::Underweight);
    }

    #[test]
    fn test_invalid_compute_produces_no_record() {
        let tracker = tracker();

        let err = tracker.compute_bmi(0.0, 1.70).unwrap_err();

        assert!(err.is_invalid_measurement());
        assert!(tracker.list_history().unwrap().is_empty());
    }

    #[test]
    fn test_compute_without_save_leaves_history_untouched() {
        let tracker = tracker();

        tracker.compute_bmi(70.0, 1.75).unwrap();

        assert!(tracker.list_history().unwrap().is_empty());
    }

    #[test]
    fn test_save_before_initialize_fails() {
        let mut tracker = Tracker::new(SqliteStore::in_memory());
        let pending = tracker.compute_bmi(70.0, 1.75).unwrap();

        let err = tracker.save_measurement(&pending).unwrap_err();

        assert!(err.is_storage_unavailable());
        assert!(!tracker.store().is_ready());
    }

    #[test]
    fn test_open_uses_configured_database() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.data.data_dir = temp_dir.path().to_path_buf();

        let mut tracker = Tracker::open(&config);
        tracker.initialize_store().unwrap();

        assert_eq!(tracker.store().path(), Some(config.database_path().as_path()));
        assert!(config.database_path().exists());
    }
}

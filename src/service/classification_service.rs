use std::collections::BTreeMap;

use tracing::{error, info};

use crate::classifiers::{ClassifierEngine, FeatureProjection, Model, ModelSummary};
use crate::core::material_class::MaterialClass;
use crate::core::sample::{Features, Sample};
use crate::service::config::{ServiceConfig, StatsMode};
use crate::service::error::ServiceError;
use crate::storage::atomic_file::StagedFile;
use crate::storage::{SampleStore, StatsError, StatsRegister, StorageError, StorageLock};

/// Owns the sample store, the stats register and the current model, and keeps
/// the three consistent across mutations.
///
/// A successful [`add_sample`](Self::add_sample) commits both files before
/// anything in memory changes; a failed one leaves disk and memory as they
/// were.
pub struct ClassificationService {
    engine: ClassifierEngine,
    store: SampleStore,
    stats: StatsRegister,
    model: Model,
    _lock: StorageLock,
}

impl ClassificationService {
    pub fn open(config: ServiceConfig) -> Result<Self, ServiceError> {
        let lock = StorageLock::acquire(&config.data_file)?;
        let store = SampleStore::load(&config.data_file)?;
        let stats = match config.stats_mode {
            StatsMode::Ledger => StatsRegister::load(&config.stats_file)?,
            StatsMode::Derived => {
                StatsRegister::derive_from(&config.stats_file, store.samples())
            }
        };
        let engine = ClassifierEngine::new(config.projection, config.tree.clone());
        let model = engine.train(store.samples());

        info!(
            data = %config.data_file.display(),
            stats = %config.stats_file.display(),
            stats_mode = %config.stats_mode,
            projection = %config.projection,
            "service opened"
        );

        Ok(Self {
            engine,
            store,
            stats,
            model,
            _lock: lock,
        })
    }

    /// Validates, persists and learns from one labeled sample. Returns the
    /// per-class counts after the insertion.
    pub fn add_sample(
        &mut self,
        features: Features,
        class_id: i64,
    ) -> Result<BTreeMap<MaterialClass, u64>, ServiceError> {
        let pending = self.stage_sample(features, class_id)?;
        self.apply(pending)
    }

    /// Builds the next store and register on copies and writes both temp
    /// files. Nothing visible changes until [`apply`](Self::apply).
    fn stage_sample(&self, features: Features, class_id: i64) -> Result<PendingSample, ServiceError> {
        check_finite(&features)?;
        let label =
            MaterialClass::try_from(class_id).map_err(|_| ServiceError::InvalidClass(class_id))?;

        let mut store = self.store.clone();
        store.append(Sample::new(features, label));
        let mut stats = self.stats.clone();
        stats.increment(class_id).map_err(|e| match e {
            StatsError::UnknownClass(id) => ServiceError::InvalidClass(id),
            StatsError::CountOverflow(class) => ServiceError::CountOverflow(class),
        })?;

        let staged_samples = store.stage()?;
        let staged_stats = stats.stage()?;
        Ok(PendingSample {
            label,
            store,
            stats,
            staged_samples,
            staged_stats,
        })
    }

    fn apply(&mut self, pending: PendingSample) -> Result<BTreeMap<MaterialClass, u64>, ServiceError> {
        let PendingSample {
            label,
            store,
            stats,
            staged_samples,
            staged_stats,
        } = pending;

        commit_staged(staged_samples, staged_stats)?;

        let model = self.engine.train(store.samples());
        self.store = store;
        self.stats = stats;
        self.model = model;

        info!(label = %label, samples = self.store.len(), "sample added");
        Ok(self.stats.counts().clone())
    }

    pub fn classify(&self, features: &Features) -> Result<MaterialClass, ServiceError> {
        check_finite(features)?;
        Ok(self.model.predict(features))
    }

    pub fn list_samples(&self) -> &[Sample] {
        self.store.samples()
    }

    pub fn list_statistics(&self) -> BTreeMap<MaterialClass, u64> {
        self.stats.counts().clone()
    }

    pub fn projection(&self) -> FeatureProjection {
        self.engine.projection()
    }

    pub fn model_summary(&self) -> ModelSummary {
        self.model.summary()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

fn check_finite(features: &Features) -> Result<(), ServiceError> {
    match features.first_non_finite() {
        Some((field, value)) => Err(ServiceError::InvalidInput { field, value }),
        None => Ok(()),
    }
}

/// Next store and register with both files staged beside their targets.
struct PendingSample {
    label: MaterialClass,
    store: SampleStore,
    stats: StatsRegister,
    staged_samples: StagedFile,
    staged_stats: StagedFile,
}

/// Samples are renamed into place first, then stats. If the stats rename
/// fails, the samples file is put back.
fn commit_staged(staged_samples: StagedFile, staged_stats: StagedFile) -> Result<(), StorageError> {
    let samples_path = staged_samples.target().to_path_buf();
    let committed_samples = staged_samples.commit()?;
    if let Err(e) = staged_stats.commit() {
        if let Err(restore_err) = committed_samples.restore_previous() {
            error!(
                error = %restore_err,
                path = %samples_path.display(),
                "failed to restore samples after stats commit failure"
            );
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::bootstrap_samples;
    use crate::testing::fixtures::TempWorkspace;
    use std::fs;

    fn features(l: f64, w: f64, g: f64, c: f64) -> Features {
        Features::new(l, w, g, c)
    }

    #[test]
    fn fresh_install_serves_bootstrap_rows_and_zero_stats() {
        let ws = TempWorkspace::new();
        let svc = ClassificationService::open(ws.config()).unwrap();

        assert_eq!(svc.list_samples(), bootstrap_samples().as_slice());
        let stats = svc.list_statistics();
        assert_eq!(stats.len(), MaterialClass::COUNT);
        assert!(stats.values().all(|&c| c == 0));
    }

    #[test]
    fn adding_a_metal_sample_persists_and_retrains() {
        let ws = TempWorkspace::new();
        let mut svc = ClassificationService::open(ws.config()).unwrap();

        let counts = svc.add_sample(features(12.0, 6.0, 80.0, 0.7), 3).unwrap();
        assert_eq!(counts[&MaterialClass::Metal], 1);
        assert_eq!(svc.list_samples().len(), 6);
        assert_eq!(
            svc.classify(&features(12.0, 6.0, 80.0, 0.7)).unwrap(),
            MaterialClass::Metal
        );
        assert_eq!(svc.model_summary().samples, 6);

        assert_eq!(ws.read_data().lines().count(), 6);
        assert!(ws.read_data().ends_with("12,6,80,0.7,3\n"));
        assert!(ws.read_stats().contains("3:1\n"));
    }

    #[test]
    fn added_samples_survive_reopen() {
        let ws = TempWorkspace::new();
        {
            let mut svc = ClassificationService::open(ws.config()).unwrap();
            svc.add_sample(features(1.0, 1.0, 1.0, 0.9), 3).unwrap();
            svc.add_sample(features(2.0, 2.0, 2.0, 0.01), 2).unwrap();
        }
        let svc = ClassificationService::open(ws.config()).unwrap();
        assert_eq!(svc.list_samples().len(), 7);
        assert_eq!(svc.list_statistics()[&MaterialClass::Metal], 1);
        assert_eq!(svc.list_statistics()[&MaterialClass::Plastic], 1);
    }

    #[test]
    fn conductivity_only_projection_matches_paper_reading() {
        let ws = TempWorkspace::new();
        let mut cfg = ws.config();
        cfg.projection = FeatureProjection::ConductivityOnly;
        let svc = ClassificationService::open(cfg).unwrap();

        assert_eq!(
            svc.classify(&features(0.0, 0.0, 0.0, 0.05)).unwrap(),
            MaterialClass::Paper
        );
        assert_eq!(svc.projection(), FeatureProjection::ConductivityOnly);
    }

    #[test]
    fn unknown_class_id_changes_nothing() {
        let ws = TempWorkspace::new();
        let mut svc = ClassificationService::open(ws.config()).unwrap();
        svc.add_sample(features(12.0, 6.0, 80.0, 0.7), 3).unwrap();
        let data_before = ws.read_data();
        let stats_before = ws.read_stats();
        let samples_before = svc.list_samples().to_vec();
        let counts_before = svc.list_statistics();

        for bad in [9, 6, -1, i64::MAX] {
            let err = svc.add_sample(features(1.0, 2.0, 3.0, 0.4), bad).unwrap_err();
            assert!(matches!(err, ServiceError::InvalidClass(id) if id == bad));
            assert!(err.is_recoverable());
        }

        assert_eq!(ws.read_data(), data_before);
        assert_eq!(ws.read_stats(), stats_before);
        assert_eq!(svc.list_samples(), samples_before.as_slice());
        assert_eq!(svc.list_statistics(), counts_before);
        assert_eq!(svc.model_summary().samples, 6);
    }

    #[test]
    fn non_finite_features_are_rejected_before_class_check() {
        let ws = TempWorkspace::new();
        let mut svc = ClassificationService::open(ws.config()).unwrap();

        let err = svc
            .add_sample(features(1.0, f64::INFINITY, 3.0, 0.4), 9)
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput { field: "width", .. }));

        let err = svc.classify(&features(1.0, 2.0, 3.0, f64::NAN)).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput { field: "conductivity", .. }));

        assert!(!ws.data_path().exists());
        assert_eq!(svc.list_samples().len(), 5);
    }

    #[test]
    fn every_successful_add_grows_store_and_count_by_one() {
        let ws = TempWorkspace::new();
        let mut svc = ClassificationService::open(ws.config()).unwrap();

        for (i, class_id) in [0_i64, 1, 2, 3, 4, 5, 3, 3, 0].into_iter().enumerate() {
            let label = MaterialClass::try_from(class_id).unwrap();
            let len_before = svc.list_samples().len();
            let count_before = svc.list_statistics()[&label];

            let c = i as f64 / 10.0;
            let counts = svc.add_sample(features(c, c, c, c), class_id).unwrap();

            assert_eq!(svc.list_samples().len(), len_before + 1);
            assert_eq!(counts[&label], count_before + 1);
        }
    }

    #[test]
    fn classify_is_repeatable_and_read_only() {
        let ws = TempWorkspace::new();
        let svc = ClassificationService::open(ws.config()).unwrap();
        let x = features(11.0, 7.0, 40.0, 0.25);

        let first = svc.classify(&x).unwrap();
        assert_eq!(svc.classify(&x).unwrap(), first);
        assert_eq!(svc.list_samples().len(), 5);
        assert!(!ws.data_path().exists());
        assert!(!ws.stats_path().exists());
    }

    #[test]
    fn unstageable_stats_file_leaves_samples_untouched() {
        let ws = TempWorkspace::new();
        let blocker = ws.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let mut cfg = ws.config();
        let mut svc = ClassificationService::open(cfg.clone()).unwrap();
        svc.add_sample(features(12.0, 6.0, 80.0, 0.7), 3).unwrap();
        drop(svc);
        let data_before = ws.read_data();

        cfg.stats_file = blocker.join("stats.txt");
        cfg.stats_mode = StatsMode::Derived;
        let mut svc = ClassificationService::open(cfg).unwrap();
        let samples_before = svc.list_samples().to_vec();
        let counts_before = svc.list_statistics();

        let err = svc.add_sample(features(3.0, 3.0, 3.0, 0.3), 4).unwrap_err();
        assert!(matches!(err, ServiceError::StorageUnavailable(_)));
        assert!(!err.is_recoverable());

        assert_eq!(ws.read_data(), data_before);
        assert_eq!(svc.list_samples(), samples_before.as_slice());
        assert_eq!(svc.list_statistics(), counts_before);
        assert_eq!(svc.model_summary().samples, 6);
    }

    fn ledger_in_subdir(ws: &TempWorkspace) -> (ServiceConfig, std::path::PathBuf) {
        let stats_dir = ws.path().join("ledger");
        fs::create_dir(&stats_dir).unwrap();
        let mut cfg = ws.config();
        cfg.stats_file = stats_dir.join("material_stats.txt");
        (cfg, stats_dir)
    }

    #[test]
    fn stats_commit_failure_removes_samples_file_created_by_it() {
        let ws = TempWorkspace::new();
        let (cfg, stats_dir) = ledger_in_subdir(&ws);
        let mut svc = ClassificationService::open(cfg).unwrap();
        let summary_before = svc.model_summary();

        let pending = svc.stage_sample(features(12.0, 6.0, 80.0, 0.7), 3).unwrap();
        fs::remove_dir_all(&stats_dir).unwrap();
        let err = svc.apply(pending).unwrap_err();

        assert!(matches!(err, ServiceError::StorageUnavailable(_)));
        assert!(!ws.data_path().exists());
        assert_eq!(svc.list_samples(), bootstrap_samples().as_slice());
        assert!(svc.list_statistics().values().all(|&c| c == 0));
        assert_eq!(svc.model_summary(), summary_before);
    }

    #[test]
    fn stats_commit_failure_restores_previous_samples_bytes() {
        let ws = TempWorkspace::new();
        let (cfg, stats_dir) = ledger_in_subdir(&ws);
        let mut svc = ClassificationService::open(cfg).unwrap();
        svc.add_sample(features(12.0, 6.0, 80.0, 0.7), 3).unwrap();

        let data_before = ws.read_data();
        let samples_before = svc.list_samples().to_vec();
        let counts_before = svc.list_statistics();
        let summary_before = svc.model_summary();
        let x = features(3.0, 3.0, 3.0, 0.3);
        let label_before = svc.classify(&x).unwrap();

        let pending = svc.stage_sample(x, 4).unwrap();
        fs::remove_dir_all(&stats_dir).unwrap();
        let err = svc.apply(pending).unwrap_err();

        assert!(matches!(err, ServiceError::StorageUnavailable(_)));
        assert!(!err.is_recoverable());
        assert_eq!(ws.read_data(), data_before);
        assert_eq!(svc.list_samples(), samples_before.as_slice());
        assert_eq!(svc.list_statistics(), counts_before);
        assert_eq!(svc.model_summary(), summary_before);
        assert_eq!(svc.classify(&x).unwrap(), label_before);
    }

    #[test]
    fn count_overflow_is_rejected_without_writing() {
        let ws = TempWorkspace::new();
        fs::write(ws.stats_path(), format!("3:{}\n", u64::MAX)).unwrap();
        let mut svc = ClassificationService::open(ws.config()).unwrap();

        let err = svc.add_sample(features(12.0, 6.0, 80.0, 0.7), 3).unwrap_err();
        assert!(matches!(err, ServiceError::CountOverflow(MaterialClass::Metal)));
        assert_eq!(svc.list_statistics()[&MaterialClass::Metal], u64::MAX);
        assert_eq!(svc.list_samples().len(), 5);
        assert!(!ws.data_path().exists());
    }

    #[test]
    fn second_open_on_same_storage_is_locked() {
        let ws = TempWorkspace::new();
        let _first = ClassificationService::open(ws.config()).unwrap();
        match ClassificationService::open(ws.config()) {
            Err(ServiceError::StorageUnavailable(StorageError::Locked { .. })) => {}
            Err(other) => panic!("expected lock conflict, got {other}"),
            Ok(_) => panic!("expected lock conflict"),
        }
    }

    #[test]
    fn derived_mode_counts_bootstrap_rows() {
        let ws = TempWorkspace::new();
        let mut cfg = ws.config();
        cfg.stats_mode = StatsMode::Derived;
        let mut svc = ClassificationService::open(cfg).unwrap();

        let stats = svc.list_statistics();
        assert_eq!(stats[&MaterialClass::Glass], 1);
        assert_eq!(stats[&MaterialClass::Organic], 1);
        assert_eq!(stats[&MaterialClass::Unknown], 0);

        let counts = svc.add_sample(features(12.0, 6.0, 80.0, 0.7), 3).unwrap();
        assert_eq!(counts[&MaterialClass::Metal], 2);
    }

    #[test]
    fn malformed_data_file_fails_open() {
        let ws = TempWorkspace::new();
        fs::write(ws.data_path(), "1,2,3\n").unwrap();
        let err = ClassificationService::open(ws.config()).err().unwrap();
        assert!(matches!(
            err,
            ServiceError::StorageUnavailable(StorageError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn empty_data_file_classifies_unknown() {
        let ws = TempWorkspace::new();
        fs::write(ws.data_path(), "").unwrap();
        let svc = ClassificationService::open(ws.config()).unwrap();
        assert_eq!(
            svc.classify(&features(1.0, 1.0, 1.0, 1.0)).unwrap(),
            MaterialClass::Unknown
        );
    }
}

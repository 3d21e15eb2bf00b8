use crate::cli::DataArgs;
use ai_maturity::assessment::MaturityEngine;
use ai_maturity::config::AssessmentSettings;
use ai_maturity::error::AppError;
use ai_maturity::survey::{SurveyDataset, SurveyLoader};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine plus the survey fallback chain. Data is re-read on every call so an
/// updated export is picked up without a restart.
#[derive(Debug, Clone)]
pub(crate) struct AssessmentService {
    engine: Arc<MaturityEngine>,
    survey_paths: Arc<Vec<PathBuf>>,
}

impl AssessmentService {
    pub(crate) fn new(engine: MaturityEngine, survey_paths: Vec<PathBuf>) -> Self {
        Self {
            engine: Arc::new(engine),
            survey_paths: Arc::new(survey_paths),
        }
    }

    /// Applies CLI overrides on top of the configured settings.
    pub(crate) fn from_settings(mut settings: AssessmentSettings, args: DataArgs) -> Self {
        if let Some(variant) = args.variant.variant {
            settings.variant = variant;
        }
        if !args.csv.is_empty() {
            settings.survey_paths = args.csv;
        }
        Self::new(
            MaturityEngine::for_variant(settings.variant),
            settings.survey_paths,
        )
    }

    pub(crate) fn engine(&self) -> &MaturityEngine {
        &self.engine
    }

    pub(crate) fn loader(&self) -> SurveyLoader {
        SurveyLoader::from_paths(self.survey_paths.iter().cloned())
    }

    pub(crate) fn load_dataset(&self) -> Result<SurveyDataset, AppError> {
        Ok(self.loader().load().into_result()?)
    }

    /// Runs the file reads on the blocking pool so request workers stay free.
    pub(crate) async fn load_dataset_blocking(&self) -> Result<SurveyDataset, AppError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.load_dataset())
            .await
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    pub(crate) const SAMPLE_CSV: &str = "Submission ID,Dimensi 1,Dimensi 2,Dimensi 3,Dimensi 4,Dimensi 5,Nama Responden,Jabatan,Nama Rumah Sakit,Lokasi Rumah Sakit,Jumlah Tempat Tidur\n\
101,12,10,14,9,8,Dewi Lestari,Direktur Utama,RS Harapan,Bandung,250\n\
102,15,15,15,15,15,Budi Santoso,Kepala IT,RS Sentosa,Surabaya,120\n\
103,3,,4,5,6,Rina Wati,Kepala Mutu,RS Mawar,Medan,80\n";

    /// Writes `body` to a per-test file under the system temp directory.
    pub(crate) fn write_survey(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "ai-maturity-api-{}-{name}.csv",
            std::process::id()
        ));
        std::fs::write(&path, body).expect("temp survey written");
        path
    }
}

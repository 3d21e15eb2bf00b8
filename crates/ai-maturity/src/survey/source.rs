use super::{SurveyDataset, SurveyImportError, SurveyImporter};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Somewhere a survey export can be read from.
pub trait SurveySource: Send + Sync {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<String, SurveyImportError>;
}

/// CSV file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SurveySource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, SurveyImportError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// CSV text already held in memory, e.g. posted to the HTTP API.
#[derive(Debug, Clone)]
pub struct InlineSource {
    label: String,
    body: String,
}

impl InlineSource {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }
}

impl SurveySource for InlineSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn fetch(&self) -> Result<String, SurveyImportError> {
        Ok(self.body.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceAttempt {
    pub source: String,
    pub error: String,
}

/// Every configured source failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyUnavailable {
    pub attempts: Vec<SourceAttempt>,
}

impl fmt::Display for SurveyUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts.is_empty() {
            return write!(f, "no survey sources configured");
        }
        write!(f, "survey data unavailable from every source: ")?;
        for (index, attempt) in self.attempts.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{} ({})", attempt.source, attempt.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SurveyUnavailable {}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(SurveyDataset),
    Unavailable(SurveyUnavailable),
}

impl LoadOutcome {
    pub fn into_result(self) -> Result<SurveyDataset, SurveyUnavailable> {
        match self {
            Self::Loaded(dataset) => Ok(dataset),
            Self::Unavailable(unavailable) => Err(unavailable),
        }
    }
}

/// Ordered fallback chain of survey sources. The first source that yields a
/// usable dataset wins; failures are logged and the next source is tried.
#[derive(Default)]
pub struct SurveyLoader {
    sources: Vec<Box<dyn SurveySource>>,
}

impl SurveyLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths
            .into_iter()
            .fold(Self::new(), |loader, path| loader.with_source(FileSource::new(path)))
    }

    pub fn with_source<S: SurveySource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn sources(&self) -> Vec<String> {
        self.sources.iter().map(|source| source.describe()).collect()
    }

    pub fn load(&self) -> LoadOutcome {
        let mut attempts = Vec::new();

        for source in &self.sources {
            let name = source.describe();
            match source
                .fetch()
                .and_then(|body| SurveyImporter::from_text(&body, name.clone()))
            {
                Ok(dataset) => {
                    info!(
                        source = %name,
                        submissions = dataset.len(),
                        rejected = dataset.rejected_rows.len(),
                        fallbacks = attempts.len(),
                        "survey data loaded"
                    );
                    return LoadOutcome::Loaded(dataset);
                }
                Err(err) => {
                    warn!(source = %name, error = %err, "survey source unavailable, trying next");
                    attempts.push(SourceAttempt {
                        source: name,
                        error: err.to_string(),
                    });
                }
            }
        }

        LoadOutcome::Unavailable(SurveyUnavailable { attempts })
    }
}

impl fmt::Debug for SurveyLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurveyLoader")
            .field("sources", &self.sources())
            .finish()
    }
}

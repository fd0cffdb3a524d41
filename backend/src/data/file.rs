//! File-backed dataset source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};

use super::error::{ErrorContext, SourceError, SourceResult};
use super::source::{DatasetKind, DatasetSource};
use crate::config::DataSettings;

/// Reads the datasets as CSV files from one directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    data_dir: PathBuf,
    geo_file: String,
    kpi_file: String,
    kpi_stats_file: String,
}

impl FileSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::from_settings(&DataSettings {
            data_dir: data_dir.into().to_string_lossy().into_owned(),
            ..DataSettings::default()
        })
    }

    pub fn from_settings(settings: &DataSettings) -> Self {
        Self {
            data_dir: PathBuf::from(&settings.data_dir),
            geo_file: settings.geo_file.clone(),
            kpi_file: settings.kpi_file.clone(),
            kpi_stats_file: settings.kpi_stats_file.clone(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the file backing `kind`.
    pub fn path_for(&self, kind: DatasetKind) -> PathBuf {
        let name = match kind {
            DatasetKind::Geo => &self.geo_file,
            DatasetKind::Kpi => &self.kpi_file,
            DatasetKind::KpiStats => &self.kpi_stats_file,
        };
        self.data_dir.join(name)
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn load(&self, kind: DatasetKind) -> SourceResult<Option<String>> {
        let path = self.path_for(kind);
        let context = || {
            ErrorContext::new("load")
                .with_dataset(kind)
                .with_path(path.display().to_string())
        };

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Dataset {} not found at {}", kind, path.display());
                return Ok(None);
            }
            Err(e) => return Err(SourceError::io(e.to_string(), context())),
        };

        let text = String::from_utf8(bytes)
            .map_err(|e| SourceError::decode(format!("file is not UTF-8: {}", e), context()))?;

        debug!("Read {} ({} bytes)", path.display(), text.len());
        Ok(Some(text))
    }

    async fn health_check(&self) -> bool {
        tokio::fs::metadata(&self.data_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    fn describe(&self) -> String {
        format!("files:{}", self.data_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_use_default_names() {
        let source = FileSource::new("/srv/data");
        assert_eq!(source.path_for(DatasetKind::Geo), PathBuf::from("/srv/data/geo.csv"));
        assert_eq!(
            source.path_for(DatasetKind::KpiStats),
            PathBuf::from("/srv/data/kpi_stats.csv")
        );
        assert_eq!(source.describe(), "files:/srv/data");
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path());
        assert!(source.health_check().await);
        assert_eq!(source.load(DatasetKind::Kpi).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("geo.csv"), [0xff, 0xfe, 0x00]).unwrap();
        let source = FileSource::new(dir.path());
        let err = source.load(DatasetKind::Geo).await.unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));
        assert_eq!(err.context().dataset, Some(DatasetKind::Geo));
    }

    #[tokio::test]
    async fn test_missing_directory_is_unhealthy() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("absent"));
        assert!(!source.health_check().await);
    }
}

//! In-memory dataset source for tests and embedding.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::error::SourceResult;
use super::source::{DatasetKind, DatasetSource};

/// Dataset texts held in memory.
///
/// Cloning shares the underlying storage, so texts set through one handle
/// are visible through every clone.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    texts: Arc<RwLock<HashMap<DatasetKind, String>>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source with geo and KPI texts set.
    pub fn with_texts(geo: impl Into<String>, kpi: impl Into<String>) -> Self {
        let source = Self::new();
        source.set(DatasetKind::Geo, geo);
        source.set(DatasetKind::Kpi, kpi);
        source
    }

    pub fn set(&self, kind: DatasetKind, text: impl Into<String>) {
        self.texts.write().insert(kind, text.into());
    }

    pub fn remove(&self, kind: DatasetKind) -> Option<String> {
        self.texts.write().remove(&kind)
    }
}

#[async_trait]
impl DatasetSource for InMemorySource {
    async fn load(&self, kind: DatasetKind) -> SourceResult<Option<String>> {
        Ok(self.texts.read().get(&kind).cloned())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

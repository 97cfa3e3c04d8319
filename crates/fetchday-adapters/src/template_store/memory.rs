//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::info;

use fetchday_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{Lang, StubTemplate},
    error::FetchDayResult,
};

use crate::{builtin_templates, template_loader::FilesystemTemplateLoader};

/// Thread-safe in-memory template store keyed by language.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<Lang, StubTemplate>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> FetchDayResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Built-ins, then overrides from `dir` for the languages it has.
    pub fn with_overrides(dir: &Path) -> FetchDayResult<Self> {
        let store = Self::with_builtin()?;
        store.load_directory(dir)?;
        Ok(store)
    }

    /// Load built-in templates.
    pub fn load_builtin(&self) -> FetchDayResult<()> {
        for template in builtin_templates::all_templates()? {
            self.insert(template)?;
        }
        Ok(())
    }

    /// Load every language directory found under `dir`, replacing whatever
    /// the store held for that language.
    pub fn load_directory(&self, dir: &Path) -> FetchDayResult<()> {
        let loader = FilesystemTemplateLoader::new(dir);
        for template in loader.load_all()? {
            info!(lang = %template.lang, origin = %template.origin, "Using template override");
            self.insert(template)?;
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, lang: Lang) -> FetchDayResult<StubTemplate> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(&lang).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                lang: lang.to_string(),
            }
            .into()
        })
    }

    fn insert(&self, template: StubTemplate) -> FetchDayResult<()> {
        // Validate before insertion
        template.validate()?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(template.lang, template);
        Ok(())
    }
}

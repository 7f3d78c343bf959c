//! Loader capability and format dispatch
//!
//! Each solver format implements [`Loader`] once and returns a plain
//! [`HydroStore`]. A loader leaves families it does not read as not loaded
//! and keeps `w`, `head` and the body list consistent with every tensor it
//! fills. [`LoaderRegistry`] picks a loader from the file extension.

use crate::config::HydroConfig;
use crate::error::{HydroError, Result};
use crate::store::HydroStore;
use std::path::Path;

/// A file format reader populating a coefficient store
pub trait Loader: Send + Sync {
    /// Human readable format name
    fn name(&self) -> &str;

    /// Handled file extensions, lower case without the dot
    fn extensions(&self) -> &[&str];

    /// Read `path` into a new store
    fn load(&self, path: &Path, config: &HydroConfig) -> Result<HydroStore>;
}

/// Registered loaders, looked up by file extension
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn Loader>>,
}

impl LoaderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader; earlier registrations win on shared extensions
    pub fn register(&mut self, loader: Box<dyn Loader>) {
        log::debug!("registered loader {} for {:?}", loader.name(), loader.extensions());
        self.loaders.push(loader);
    }

    /// Number of registered loaders
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// `true` when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Loader handling the extension of `path`, case-insensitive
    pub fn find_for(&self, path: &Path) -> Option<&dyn Loader> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.loaders
            .iter()
            .find(|l| l.extensions().iter().any(|e| e.eq_ignore_ascii_case(&ext)))
            .map(|l| l.as_ref())
    }

    /// Load `path` with the matching loader and check the result
    pub fn load(&self, path: &Path, config: &HydroConfig) -> Result<HydroStore> {
        let loader = self.find_for(path).ok_or_else(|| HydroError::UnsupportedFormat {
            path: path.display().to_string(),
        })?;
        log::info!("loading {} with {}", path.display(), loader.name());
        let store = loader.load(path, config)?;
        store.validate_dimensions("load")?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Family;

    struct Dummy;

    impl Loader for Dummy {
        fn name(&self) -> &str {
            "dummy"
        }

        fn extensions(&self) -> &[&str] {
            &["hyd", "1"]
        }

        fn load(&self, path: &Path, config: &HydroConfig) -> Result<HydroStore> {
            let mut s = HydroStore::new(1, vec![0.5, 1.0], vec![0.0], config);
            s.name = path.file_stem().and_then(|n| n.to_str()).unwrap_or_default().to_string();
            s.init(Family::A);
            Ok(s)
        }
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        let mut reg = LoaderRegistry::new();
        assert!(reg.is_empty());
        reg.register(Box::new(Dummy));
        assert_eq!(reg.len(), 1);
        assert!(reg.find_for(Path::new("case.HYD")).is_some());
        assert!(reg.find_for(Path::new("dir/case.1")).is_some());
        assert!(reg.find_for(Path::new("case")).is_none());

        let s = reg.load(Path::new("barge.Hyd"), &HydroConfig::default()).unwrap();
        assert_eq!(s.name, "barge");
        assert!(s.is_loaded(Family::A));
    }

    #[test]
    fn test_unknown_extension() {
        let reg = LoaderRegistry::new();
        let err = reg.load(Path::new("case.out"), &HydroConfig::default()).unwrap_err();
        assert!(matches!(err, HydroError::UnsupportedFormat { .. }));
        assert!(err.is_config_error());
    }
}

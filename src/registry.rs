//! Per-country bank datasets.
//!
//! A dataset maps a full normalized BIC (8 or 11 characters) to the
//! institution, city and branch it identifies. Datasets are looked up by the
//! lowercase country code; a missing dataset and a missing key are the same
//! outcome for callers: no match.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

pub const DATA_DIR_ENV: &str = "BIC_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BankRecord {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

pub type CountryDataset = HashMap<String, BankRecord>;

pub trait BankRegistry: Send + Sync {
    /// `country` is the lowercase alpha-2 code, `code` the formatted BIC.
    fn lookup(&self, country: &str, code: &str) -> Option<BankRecord>;
}

/// Registry that never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegistry;

impl BankRegistry for NoRegistry {
    fn lookup(&self, _country: &str, _code: &str) -> Option<BankRecord> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    datasets: HashMap<String, CountryDataset>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, country: &str, code: &str, record: BankRecord) {
        self.datasets
            .entry(country.to_lowercase())
            .or_default()
            .insert(code.to_string(), record);
    }
}

impl BankRegistry for MemoryRegistry {
    fn lookup(&self, country: &str, code: &str) -> Option<BankRecord> {
        self.datasets.get(country)?.get(code).cloned()
    }
}

/// Reads `<dir>/<country>.yml` on first use and keeps the outcome, including
/// absence, for the lifetime of the registry.
#[derive(Debug)]
pub struct DirectoryRegistry {
    dir: PathBuf,
    cache: RwLock<HashMap<String, Option<Arc<CountryDataset>>>>,
}

impl DirectoryRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn dataset(&self, country: &str) -> Option<Arc<CountryDataset>> {
        if !is_country_key(country) {
            return None;
        }
        if let Ok(cache) = self.cache.read() {
            if let Some(entry) = cache.get(country) {
                return entry.clone();
            }
        }

        let loaded = self.load(country).map(Arc::new);
        if let Ok(mut cache) = self.cache.write() {
            cache
                .entry(country.to_string())
                .or_insert_with(|| loaded.clone());
        }
        loaded
    }

    fn load(&self, country: &str) -> Option<CountryDataset> {
        let path = self.dir.join(format!("{country}.yml"));
        if !path.is_file() {
            log::debug!("no bank dataset for '{}' at {}", country, path.display());
            return None;
        }
        match load_dataset(&path) {
            Ok(dataset) => {
                log::debug!(
                    "loaded {} bank entries for '{}' from {}",
                    dataset.len(),
                    country,
                    path.display()
                );
                Some(dataset)
            }
            Err(err) => {
                log::warn!("ignoring bank dataset {}: {}", path.display(), err);
                None
            }
        }
    }
}

impl BankRegistry for DirectoryRegistry {
    fn lookup(&self, country: &str, code: &str) -> Option<BankRecord> {
        self.dataset(country)?.get(code).cloned()
    }
}

/// Parses one dataset file. An empty file is an empty dataset; entries that
/// are not `{institution, city, branch}` mappings are skipped with a warning.
pub fn load_dataset(path: &Path) -> Result<CountryDataset, String> {
    let content = std::fs::read_to_string(path).map_err(|err| err.to_string())?;
    if content.trim().is_empty() {
        return Ok(CountryDataset::new());
    }
    let root: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|err| err.to_string())?;
    let entries = match root {
        serde_yaml::Value::Null => return Ok(CountryDataset::new()),
        serde_yaml::Value::Mapping(entries) => entries,
        _ => return Err("expected a mapping of BIC codes".to_string()),
    };

    let mut dataset = CountryDataset::with_capacity(entries.len());
    for (key, value) in entries {
        let Some(code) = key.as_str() else {
            log::warn!("skipping non-string key {:?} in {}", key, path.display());
            continue;
        };
        match serde_yaml::from_value::<BankRecord>(value) {
            Ok(record) => {
                dataset.insert(code.to_string(), record);
            }
            Err(err) => log::warn!("skipping entry {} in {}: {}", code, path.display(), err),
        }
    }
    Ok(dataset)
}

/// `BIC_DATA_DIR` when set, otherwise `data` relative to the working directory.
pub fn default_data_dir() -> PathBuf {
    resolve_data_dir(std::env::var(DATA_DIR_ENV).ok().as_deref())
}

fn resolve_data_dir(value: Option<&str>) -> PathBuf {
    match value {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("data"),
    }
}

static DEFAULT_REGISTRY: Lazy<DirectoryRegistry> =
    Lazy::new(|| DirectoryRegistry::new(default_data_dir()));

/// Process-wide registry over [`default_data_dir`].
pub fn default_registry() -> &'static DirectoryRegistry {
    &DEFAULT_REGISTRY
}

// Keeps lookups from escaping the data directory.
fn is_country_key(country: &str) -> bool {
    country.len() == 2 && country.chars().all(|ch| ch.is_ascii_lowercase())
}

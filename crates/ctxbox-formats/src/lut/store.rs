//! Named LUT resolution
//!
//! The RGB mapper does not hard-link its default table. It asks a
//! [`LutProvider`] for a LUT by name, so an application can swap the
//! built-in in-memory store for a directory of `.lut` files (or any other
//! backend) through configuration.

use crate::lut::error::{LutError, Result};
use crate::lut::table::Lut;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the built-in grayscale ramp
pub const DEFAULT_LUT_NAME: &str = "default-grayscale";

/// Environment variable overriding the LUT directory
pub const LUT_DIR_ENV: &str = "CTXBOX_LUT_DIR";

/// Trait for named LUT backends
pub trait LutProvider {
    /// Get a LUT by name, `None` if the backend has no such table
    fn get_lut(&self, name: &str) -> Result<Option<Lut>>;

    /// Names of all LUTs the backend can serve
    fn list_names(&self) -> Result<Vec<String>>;

    /// Check if a LUT exists
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.get_lut(name)?.is_some())
    }

    /// Get a LUT by name, failing with [`LutError::NotFound`] if missing
    fn require_lut(&self, name: &str) -> Result<Lut> {
        self.get_lut(name)?
            .ok_or_else(|| LutError::NotFound(name.to_string()))
    }
}

/// In-memory LUT store
#[derive(Debug, Clone)]
pub struct LutStore {
    luts: HashMap<String, Lut>,
}

impl LutStore {
    /// Create a store holding the built-in `default-grayscale` table
    pub fn new() -> Self {
        let mut store = Self::empty();
        store.insert(DEFAULT_LUT_NAME, Lut::default_grayscale());
        store
    }

    /// Create an empty store
    pub fn empty() -> Self {
        Self {
            luts: HashMap::new(),
        }
    }

    /// Register a LUT, returning the table it replaced
    pub fn insert(&mut self, name: impl Into<String>, lut: Lut) -> Option<Lut> {
        self.luts.insert(name.into(), lut)
    }

    /// Remove a LUT
    pub fn remove(&mut self, name: &str) -> Option<Lut> {
        self.luts.remove(name)
    }

    /// Borrow a LUT
    pub fn get(&self, name: &str) -> Option<&Lut> {
        self.luts.get(name)
    }

    /// Number of stored LUTs
    pub fn len(&self) -> usize {
        self.luts.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.luts.is_empty()
    }
}

impl Default for LutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LutProvider for LutStore {
    fn get_lut(&self, name: &str) -> Result<Option<Lut>> {
        Ok(self.luts.get(name).cloned())
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.luts.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}

/// Configuration for [`DirectoryLutStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLutStoreConfig {
    /// Directory holding `<name>.<extension>` files
    pub directory: PathBuf,
    /// File extension without the leading dot
    pub extension: String,
}

impl Default for DirectoryLutStoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl DirectoryLutStoreConfig {
    /// Configuration for an explicit directory
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            extension: "lut".to_string(),
        }
    }

    /// Resolve the directory from `CTXBOX_LUT_DIR`, falling back to the XDG
    /// data directory
    pub fn from_env() -> Self {
        let directory = std::env::var_os(LUT_DIR_ENV)
            .map(PathBuf::from)
            .or_else(Self::get_default_lut_dir)
            .unwrap_or_else(|| PathBuf::from(".ctxbox/luts"));
        Self::new(directory)
    }

    /// Set the file extension
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Default LUT directory under the XDG data home
    fn get_default_lut_dir() -> Option<PathBuf> {
        // Use XDG_DATA_HOME or fallback to ~/.local/share
        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".local").join("share")))
            .ok()?;

        Some(data_dir.join("ctxbox").join("luts"))
    }
}

/// LUT backend reading one 1024-byte file per name from a directory
#[derive(Debug, Clone)]
pub struct DirectoryLutStore {
    config: DirectoryLutStoreConfig,
}

impl DirectoryLutStore {
    /// Create a store over the configured directory
    ///
    /// The directory does not need to exist; a missing directory serves no
    /// LUTs.
    pub fn new(config: DirectoryLutStoreConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &DirectoryLutStoreConfig {
        &self.config
    }

    /// Path a LUT name maps to
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\'])
            || Path::new(name).components().count() != 1
        {
            return Err(LutError::InvalidName(name.to_string()));
        }

        Ok(self
            .config
            .directory
            .join(format!("{}.{}", name, self.config.extension)))
    }

    /// Write a LUT under `name`, creating the directory if needed
    pub fn save_lut(&self, name: &str, lut: &Lut) -> Result<()> {
        let path = self.path_for(name)?;
        std::fs::create_dir_all(&self.config.directory)?;
        std::fs::write(&path, lut.build()?)?;
        debug!("Saved LUT {} to {}", name, path.display());
        Ok(())
    }
}

impl LutProvider for DirectoryLutStore {
    fn get_lut(&self, name: &str) -> Result<Option<Lut>> {
        let path = self.path_for(name)?;
        match std::fs::read(&path) {
            Ok(data) => {
                debug!("Loaded LUT {} from {}", name, path.display());
                Lut::parse(&data).map(Some)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.config.directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.config.extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort_unstable();
        Ok(names)
    }
}

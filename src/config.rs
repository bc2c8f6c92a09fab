//! Durable preference slots.
//!
//! Two named slots survive restarts: `font` holds a plain family name and
//! `theme` holds a JSON theme record. A missing or unparsable slot is an
//! expected condition recovered silently with the first candidate; only
//! writes can fail loudly, and callers log rather than surface those.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::fonts::FONTS;
use crate::theme::{THEMES, Theme};

const FONT_SLOT: &str = "font";
const THEME_SLOT: &str = "theme";

/// Reads and writes the named preference slots under a store directory.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    root: PathBuf,
}

impl PreferenceStore {
    /// Store rooted at an explicit directory (tests, `--store-dir`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the platform config directory.
    pub fn open_default() -> Self {
        Self::new(default_store_dir())
    }

    /// The directory holding the slots.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.root.join(slot)
    }

    fn read_slot(&self, slot: &str) -> Option<String> {
        fs::read_to_string(self.slot_path(slot)).ok()
    }

    fn write_slot(&self, slot: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create store dir {}", self.root.display()))?;
        let path = self.slot_path(slot);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write slot {}", path.display()))
    }

    /// The persisted font family, or the first candidate when the slot is
    /// absent or empty.
    pub fn load_font(&self) -> String {
        match self.read_slot(FONT_SLOT) {
            Some(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
            _ => FONTS[0].to_string(),
        }
    }

    /// Persist the font slot.
    pub fn save_font(&self, family: &str) -> Result<()> {
        self.write_slot(FONT_SLOT, family)
    }

    /// The persisted theme record, or the first candidate when the slot is
    /// absent or does not parse.
    pub fn load_theme(&self) -> Theme {
        self.read_slot(THEME_SLOT)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_else(|| THEMES[0].clone())
    }

    /// Persist the theme slot as JSON.
    pub fn save_theme(&self, theme: &Theme) -> Result<()> {
        let json = serde_json::to_string(theme).context("Failed to encode theme")?;
        self.write_slot(THEME_SLOT, &json)
    }
}

/// Platform config directory for the store.
pub fn default_store_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("parlance");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("parlance");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("parlance");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("parlance");
        }
    }

    PathBuf::from(".parlance")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_font_defaults_when_slot_absent() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        assert_eq!(store.load_font(), FONTS[0]);
    }

    #[test]
    fn test_load_theme_defaults_when_slot_absent() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        assert_eq!(store.load_theme(), THEMES[0]);
    }

    #[test]
    fn test_font_round_trip() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        store.save_font("Fira Code").unwrap();
        assert_eq!(store.load_font(), "Fira Code");
    }

    #[test]
    fn test_theme_round_trip() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        store.save_theme(&THEMES[2]).unwrap();
        assert_eq!(store.load_theme(), THEMES[2]);
    }

    #[test]
    fn test_corrupt_theme_slot_recovers_to_default() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        std::fs::write(dir.path().join("theme"), "{not json").unwrap();
        assert_eq!(store.load_theme(), THEMES[0]);
    }

    #[test]
    fn test_save_creates_missing_store_dir() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("nested").join("store"));
        store.save_font("Consolas").unwrap();
        assert_eq!(store.load_font(), "Consolas");
    }
}

//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::pdf::CommandRenderer;

const MAX_RECENT_FILES: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the file dialogs start in
    pub last_directory: Option<PathBuf>,
    /// Recently opened or saved files, newest first
    pub recent_files: Vec<PathBuf>,
    /// Editor settings
    pub editor: EditorConfig,
    /// Preview settings
    pub preview: PreviewConfig,
    /// PDF export settings
    pub export: ExportConfig,
}

/// Editor-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font size in points
    pub font_size: f32,
    /// Tab inserts a tab instead of moving focus
    pub capture_tab: bool,
}

/// Preview settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Show the preview pane on startup
    pub visible: bool,
}

/// PDF export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// HTML-to-PDF converter, reading HTML on stdin and writing PDF to stdout
    pub renderer_program: String,
    pub renderer_args: Vec<String>,
    /// HTML file prepended to the exported body instead of the built-in header
    pub header_template: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            capture_tab: true,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        let renderer = CommandRenderer::default();
        Self {
            renderer_program: renderer.program().to_string(),
            renderer_args: renderer.args().to_vec(),
            header_template: None,
        }
    }
}

impl ExportConfig {
    pub fn renderer(&self) -> CommandRenderer {
        CommandRenderer::new(self.renderer_program.clone(), self.renderer_args.clone())
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "littera", "Littera")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Remember a file that was just opened or saved
    pub fn add_recent_file(&mut self, path: &Path) {
        self.recent_files.retain(|p| p != path);
        self.recent_files.insert(0, path.to_path_buf());
        self.recent_files.truncate(MAX_RECENT_FILES);

        if let Some(parent) = path.parent() {
            self.last_directory = Some(parent.to_path_buf());
        }
    }
}

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Discrete horizontal slots a generation row distributes into.
    pub lanes: u32,
    pub lane_spacing: f32,
    pub vertical_scale: f32,
    pub row_interval_ms: f64,
    /// Age below which a block gets the emissive highlight.
    pub fresh_ms: f64,
    pub seed_rows: u32,
    pub particle_count: usize,
    pub particle_ceiling: f32,
    pub show_edges: bool,
    pub show_particles: bool,
    pub start_paused: bool,
    pub rng_seed: u64,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            lanes: 9,
            lane_spacing: 1.6,
            vertical_scale: 0.9,
            row_interval_ms: 900.0,
            fresh_ms: 2500.0,
            seed_rows: 20,
            particle_count: 64,
            particle_ceiling: 14.0,
            show_edges: true,
            show_particles: true,
            start_paused: false,
            rng_seed: 0xda65c09e,
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "dagscope")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> VizConfig {
    let Some(path) = config_file_path() else {
        return VizConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> VizConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return VizConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|_| VizConfig::default())
}

pub fn save(cfg: &VizConfig) -> anyhow::Result<()> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)
}

fn save_to_path(cfg: &VizConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn viz_config_roundtrip_save_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        let cfg = VizConfig {
            lanes: 7,
            start_paused: true,
            rng_seed: 42,
            ..VizConfig::default()
        };

        save_to_path(&cfg, &path).expect("save config");
        let loaded = load_or_default_from_path(&path);

        assert_eq!(cfg, loaded);
    }

    #[test]
    fn malformed_config_falls_back_to_default() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "lanes = \"many\"").expect("write");

        let loaded = load_or_default_from_path(&path);
        assert_eq!(loaded, VizConfig::default());
    }

    #[test]
    fn missing_config_falls_back_to_default() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("does-not-exist.toml");

        let loaded = load_or_default_from_path(&path);
        assert_eq!(loaded, VizConfig::default());
    }
}

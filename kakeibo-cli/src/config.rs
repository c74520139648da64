use anyhow::{Context, Result};
use kakeibo_ingest::ParserConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_kakeibo_home;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSection {
    /// `tracing_subscriber` filter used when RUST_LOG is unset
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: "kakeibo=info,kakeibo_ingest=info,kakeibo_finance=info".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_kakeibo_home()?.join(CONFIG_FILE))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    println!("# {}", p.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

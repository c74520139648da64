use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// `$KAKEIBO_HOME`, or `~/.kakeibo`.
pub fn kakeibo_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("KAKEIBO_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".kakeibo"))
}

pub fn ensure_kakeibo_home() -> Result<PathBuf> {
    let dir = kakeibo_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Hash keys already stored, one per line. A missing file means none.
pub fn read_seen_keys(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn append_seen_keys<'a>(path: &Path, keys: impl IntoIterator<Item = &'a str>) -> Result<usize> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    let mut written = 0;
    for key in keys {
        writeln!(file, "{key}").with_context(|| format!("write {}", path.display()))?;
        written += 1;
    }
    Ok(written)
}

use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default nanogen data directory: ~/.nanogen
pub fn get_nanogen_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".nanogen"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.nanogen/config.toml (highest)
    let user_config = get_nanogen_data_dir()?.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", path.display(), e))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

/// Environment variable overrides (Priority 0: highest). Blank values are ignored;
/// an unparseable timeout is an error rather than a silently dropped setting.
pub fn apply_env_overrides(
    cfg: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("NANOGEN_GEMINI_BIN") {
        cfg.gemini.bin = v;
    }
    if let Some(v) = get("NANOGEN_OUTPUT_DIR") {
        cfg.gemini.output_dir = v;
    }
    if let Some(v) = get("NANOGEN_TIMEOUT_SECS") {
        let secs = v.trim().parse::<u64>().map_err(|_| {
            anyhow::anyhow!("NANOGEN_TIMEOUT_SECS={v:?} is not a whole number of seconds")
        })?;
        cfg.gemini.timeout_secs = Some(secs);
    }
    if let Some(v) = get("NANOGEN_LOG") {
        cfg.logging.level = v;
    }
    Ok(())
}

use std::sync::Arc;

use anyhow::Result;

use nanogen_core::api::{AppConfig, CommandExecutor, EnvProvider, Invoker, TaskRunner};

use crate::env::{parse_env_file, InheritedEnv, StaticEnv};
use crate::runner::CodeCliExecutor;

pub fn build_executor() -> Arc<dyn CommandExecutor> {
    Arc::new(CodeCliExecutor::new())
}

/// Env overlay precedence: env file < `[gemini.env]` < explicit `extra` pairs.
pub fn build_env(cfg: &AppConfig, extra: Vec<(String, String)>) -> Result<Arc<dyn EnvProvider>> {
    let mut env = StaticEnv::default();
    if let Some(path) = cfg
        .gemini
        .env_file
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        env.extend(parse_env_file(path)?);
    }
    env.extend(cfg.gemini.env.clone());
    env.extend(extra);

    if env.is_empty() {
        return Ok(Arc::new(InheritedEnv));
    }
    Ok(Arc::new(env))
}

pub fn build_task_runner(cfg: &AppConfig, extra_env: Vec<(String, String)>) -> Result<TaskRunner> {
    let invoker = Invoker::new(&cfg.gemini, build_executor(), build_env(cfg, extra_env)?);
    Ok(TaskRunner::new(invoker, cfg.gemini.output_dir.clone()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn explicit_pairs_override_config_and_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NANOBANANA_MODEL=from-file\nGEMINI_API_KEY=file-key").unwrap();

        let mut cfg = AppConfig::default();
        cfg.gemini.env_file = Some(file.path().to_string_lossy().to_string());
        cfg.gemini
            .env
            .insert("NANOBANANA_MODEL".into(), "from-config".into());

        let env = build_env(
            &cfg,
            vec![("GEMINI_API_KEY".into(), "cli-key".into())],
        )
        .unwrap();
        let vars = env.envs();
        assert_eq!(vars["NANOBANANA_MODEL"], "from-config");
        assert_eq!(vars["GEMINI_API_KEY"], "cli-key");
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let mut cfg = AppConfig::default();
        cfg.gemini.env_file = Some("/definitely/not/here/.env".into());
        assert!(build_env(&cfg, Vec::new()).is_err());
    }

    #[test]
    fn empty_overlay_inherits() {
        let env = build_env(&AppConfig::default(), Vec::new()).unwrap();
        assert!(env.envs().is_empty());
    }

    #[test]
    fn runner_uses_configured_output_dir() {
        let mut cfg = AppConfig::default();
        cfg.gemini.output_dir = "renders".into();
        let runner = build_task_runner(&cfg, Vec::new()).unwrap();
        assert_eq!(runner.output_dir(), "renders");
    }
}

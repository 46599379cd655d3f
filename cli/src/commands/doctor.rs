use std::time::Duration;

use nanogen_core::api::{AppConfig, CommandExecutor, Invocation};
use nanogen_core::error::CliError;
use nanogen_plugins::backend::resolve_executable_path;
use nanogen_plugins::factory;
use nanogen_plugins::runner::CodeCliExecutor;

use crate::app::parse_extra_env;

const VERSION_TIMEOUT: Duration = Duration::from_secs(15);

/// Locates the creative CLI and asks it for its version. Returns the exit code.
pub async fn run_doctor(cfg: &AppConfig, extra_env: &[String]) -> Result<i32, CliError> {
    let bin = cfg.gemini.bin.clone();
    let resolved = tokio::task::spawn_blocking(move || resolve_executable_path(&bin))
        .await
        .map_err(|e| CliError::Anyhow(e.into()))?;

    let path = match resolved {
        Ok(p) => p,
        Err(e) => {
            println!("gemini binary : NOT FOUND ({})", cfg.gemini.bin);
            println!("  {e}");
            println!("  install it with `npm install -g @google/gemini-cli`");
            return Ok(20);
        }
    };
    println!("gemini binary : {path}");

    let inv = version_invocation(cfg, path, extra_env)?;
    match CodeCliExecutor::without_resolution().execute(&inv).await {
        Ok(res) if res.success() => println!("version       : {}", res.stdout.trim()),
        Ok(res) => println!(
            "version       : unknown (exit {:?}) {}",
            res.exit_code,
            res.stderr.trim()
        ),
        Err(e) => {
            tracing::warn!(error = %e, "version probe failed");
            println!("version       : unknown ({e})");
        }
    }
    println!("output dir    : {}", cfg.gemini.output_dir);
    println!(
        "timeout       : {}",
        cfg.gemini
            .timeout()
            .map(|d| format!("{}s", d.as_secs()))
            .unwrap_or_else(|| "none".to_string())
    );
    Ok(0)
}

/// `<bin> --version` with the same env overlay a task run would get.
fn version_invocation(
    cfg: &AppConfig,
    program: String,
    extra_env: &[String],
) -> Result<Invocation, CliError> {
    let extra = parse_extra_env(extra_env)?;
    let env = factory::build_env(cfg, extra).map_err(|e| CliError::Config(format!("{e:#}")))?;
    Ok(Invocation {
        program,
        args: vec!["--version".to_string()],
        envs: env.envs(),
        timeout: Some(VERSION_TIMEOUT),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn version_check_uses_configured_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "GEMINI_API_KEY=from-file").unwrap();

        let mut cfg = AppConfig::default();
        cfg.gemini.env_file = Some(file.path().to_string_lossy().to_string());
        cfg.gemini
            .env
            .insert("NANOBANANA_MODEL".into(), "from-config".into());

        let inv = version_invocation(
            &cfg,
            "/usr/bin/gemini".into(),
            &["HTTPS_PROXY=http://proxy:8080".to_string()],
        )
        .unwrap();
        assert_eq!(inv.args, ["--version"]);
        assert_eq!(inv.envs["GEMINI_API_KEY"], "from-file");
        assert_eq!(inv.envs["NANOBANANA_MODEL"], "from-config");
        assert_eq!(inv.envs["HTTPS_PROXY"], "http://proxy:8080");
        assert_eq!(inv.timeout, Some(VERSION_TIMEOUT));
    }

    #[test]
    fn bad_env_pair_is_input_error() {
        let err = version_invocation(&AppConfig::default(), "gemini".into(), &["NOPE".into()])
            .unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
    }
}

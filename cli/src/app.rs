//! CLI wiring: merge flag overrides into config, build the runner, print the outcome.
use std::io::Write;

use nanogen_core::api::{AppConfig, CliError, ExecutionError, TaskError, TaskRequest};
use nanogen_core::config::{apply_env_overrides, load_default, load_from_path};
use nanogen_core::task::TaskParams;
use nanogen_plugins::env::parse_env_assignment;
use nanogen_plugins::factory;

use crate::commands::cli::{Args, OutputFormat};

pub fn load_config(args: &Args) -> Result<AppConfig, CliError> {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = path.to_string_lossy();
            let expanded = shellexpand::tilde(&raw);
            let mut cfg = load_from_path(std::path::Path::new(expanded.as_ref()))
                .map_err(|e| CliError::Config(format!("{e:#}")))?;
            apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())
                .map_err(|e| CliError::Config(format!("{e:#}")))?;
            cfg
        }
        None => load_default().map_err(|e| CliError::Config(format!("{e:#}")))?,
    };
    apply_cli_overrides(&mut cfg, args);
    Ok(cfg)
}

/// Flags win over file and environment.
pub fn apply_cli_overrides(cfg: &mut AppConfig, args: &Args) {
    if let Some(bin) = args.gemini_bin.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        cfg.gemini.bin = bin.to_string();
    }
    if let Some(secs) = args.timeout_secs {
        cfg.gemini.timeout_secs = Some(secs);
    }
    if let Some(dir) = args.output_dir.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        cfg.gemini.output_dir = dir.to_string();
    }
}

#[tracing::instrument(name = "cli.run_task", skip_all)]
pub async fn run_task_command(
    params: TaskParams,
    args: &Args,
    cfg: &AppConfig,
) -> Result<i32, CliError> {
    tracing::debug!(task = params_name(&params), dry_run = args.dry_run, "task requested");
    let request = TaskRequest::try_from(params).map_err(TaskError::from)?;

    let extra_env = parse_extra_env(&args.env)?;

    let runner = factory::build_task_runner(cfg, extra_env)
        .map_err(|e| CliError::Config(format!("{e:#}")))?;

    if args.dry_run {
        let line = runner.plan(&request)?;
        match args.format {
            OutputFormat::Text => println!("{}", line.echo()),
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "command": line.command.joined(),
                    "program": line.program,
                    "args": line.args(),
                });
                println!("{}", to_pretty(&value)?);
            }
        }
        return Ok(0);
    }

    let report = runner.run(&request).await?;
    match args.format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!("{}", to_pretty(&report)?),
    }
    Ok(0)
}

/// `--env KEY=VALUE` pairs, in the order given.
pub fn parse_extra_env(raw: &[String]) -> Result<Vec<(String, String)>, CliError> {
    raw.iter()
        .map(|pair| parse_env_assignment(pair).map_err(|e| CliError::Input(e.to_string())))
        .collect()
}

fn params_name(params: &TaskParams) -> &'static str {
    match params {
        TaskParams::Generate(_) => "generate",
        TaskParams::Edit(_) => "edit",
        TaskParams::Icon(_) => "icon",
        TaskParams::Pattern(_) => "pattern",
        TaskParams::Story(_) => "story",
        TaskParams::Diagram(_) => "diagram",
        TaskParams::Restore(_) => "restore",
        TaskParams::Freeform(_) => "nanobanana",
    }
}

fn to_pretty<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Anyhow(e.into()))
}

pub fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 12: invalid request (validation, quoting, malformed input)
    // 20: external CLI missing / spawn or IO failure
    // 30: external CLI exited non-zero
    // 31: external CLI timed out
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Input(_) => 12,
        CliError::Task(te) => match te {
            TaskError::Validation(_) | TaskError::Render(_) => 12,
            TaskError::Execution(ee) => match ee {
                ExecutionError::NotFound { .. }
                | ExecutionError::Spawn { .. }
                | ExecutionError::Io { .. } => 20,
                ExecutionError::NonZeroExit { .. } => 30,
                ExecutionError::Timeout { .. } => 31,
            },
        },
        CliError::Io(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}

/// Prints whatever the external process produced before failing, then the error.
///
/// In JSON mode the whole failure is one object on stdout.
pub fn report_error(e: &CliError, format: OutputFormat) {
    if format == OutputFormat::Json {
        match serde_json::to_string_pretty(&error_json(e)) {
            Ok(rendered) => println!("{rendered}"),
            Err(_) => eprintln!("{e}"),
        }
        return;
    }
    if let CliError::Task(TaskError::Execution(ee)) = e {
        if let Some(out) = ee.partial_stdout() {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{}", out.trim_end());
        }
        if let Some(err) = ee.stderr() {
            eprintln!("{}", err.trim_end());
        }
    }
    eprintln!("{e}");
}

pub fn error_json(e: &CliError) -> serde_json::Value {
    let (stdout, stderr) = match e {
        CliError::Task(TaskError::Execution(ee)) => (ee.partial_stdout(), ee.stderr()),
        _ => (None, None),
    };
    serde_json::json!({
        "error": e.to_string(),
        "category": error_category(e),
        "exit_code": exit_code_for_error(e),
        "stdout": stdout,
        "stderr": stderr,
    })
}

fn error_category(e: &CliError) -> &'static str {
    match e {
        CliError::Config(_) => "config",
        CliError::Input(_) => "input",
        CliError::Task(TaskError::Validation(_)) => "validation",
        CliError::Task(TaskError::Render(_)) => "render",
        CliError::Task(TaskError::Execution(_)) => "execution",
        CliError::Io(_) => "io",
        CliError::Anyhow(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use nanogen_core::api::{RenderError, ValidationError};

    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flags_override_config() {
        let mut cfg = AppConfig::default();
        let a = args(&[
            "nanogen",
            "generate",
            "x",
            "--gemini-bin",
            "/opt/gemini",
            "--timeout-secs",
            "90",
            "--output-dir",
            "out",
        ]);
        apply_cli_overrides(&mut cfg, &a);
        assert_eq!(cfg.gemini.bin, "/opt/gemini");
        assert_eq!(cfg.gemini.timeout(), Some(Duration::from_secs(90)));
        assert_eq!(cfg.gemini.output_dir, "out");
    }

    #[test]
    fn blank_flags_keep_config() {
        let mut cfg = AppConfig::default();
        let a = args(&["nanogen", "generate", "x", "--gemini-bin", "  "]);
        apply_cli_overrides(&mut cfg, &a);
        assert_eq!(cfg.gemini.bin, "gemini");
    }

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(exit_code_for_error(&CliError::Config("x".into())), 11);
        assert_eq!(
            exit_code_for_error(&CliError::Task(
                ValidationError::empty("prompt").into()
            )),
            12
        );
        assert_eq!(
            exit_code_for_error(&CliError::Task(
                RenderError::EmbeddedQuote { field: "prompt" }.into()
            )),
            12
        );
        assert_eq!(
            exit_code_for_error(&CliError::Task(
                ExecutionError::NotFound {
                    program: "gemini".into(),
                    detail: "not on PATH".into(),
                }
                .into()
            )),
            20
        );
        assert_eq!(
            exit_code_for_error(&CliError::Task(
                ExecutionError::NonZeroExit {
                    program: "gemini".into(),
                    code: Some(1),
                    stdout: String::new(),
                    stderr: String::new(),
                }
                .into()
            )),
            30
        );
        assert_eq!(
            exit_code_for_error(&CliError::Task(
                ExecutionError::Timeout {
                    program: "gemini".into(),
                    after: Duration::from_secs(5),
                    stdout: String::new(),
                    stderr: String::new(),
                }
                .into()
            )),
            31
        );
    }

    #[test]
    fn json_error_carries_partial_output_and_exit_code() {
        let err = CliError::Task(
            ExecutionError::NonZeroExit {
                program: "gemini".into(),
                code: Some(2),
                stdout: "half done\n".into(),
                stderr: "quota exceeded".into(),
            }
            .into(),
        );
        let value = error_json(&err);
        assert_eq!(value["category"], "execution");
        assert_eq!(value["exit_code"], 30);
        assert_eq!(value["stdout"], "half done\n");
        assert_eq!(value["stderr"], "quota exceeded");
        assert!(value["error"].as_str().unwrap().contains("gemini"));
    }

    #[test]
    fn json_error_for_config_has_no_process_output() {
        let value = error_json(&CliError::Config("bad timeout".into()));
        assert_eq!(value["category"], "config");
        assert_eq!(value["exit_code"], 11);
        assert!(value["stdout"].is_null());
    }

    #[tokio::test]
    async fn dry_run_spawns_nothing() {
        let mut cfg = AppConfig::default();
        cfg.gemini.bin = "/definitely/not/a/real/gemini".into();
        let a = args(&["nanogen", "icon", "gear", "--dry-run"]);
        let params = crate::commands::task::task_params(a.command.clone()).unwrap().unwrap();
        assert_eq!(run_task_command(params, &a, &cfg).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn invalid_env_pair_is_input_error() {
        let cfg = AppConfig::default();
        let a = args(&["nanogen", "generate", "x", "--env", "NOEQUALS", "--dry-run"]);
        let params = crate::commands::task::task_params(a.command.clone()).unwrap().unwrap();
        assert!(matches!(
            run_task_command(params, &a, &cfg).await,
            Err(CliError::Input(_))
        ));
    }
}

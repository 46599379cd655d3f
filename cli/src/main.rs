use clap::Parser;
use nanogen_cli::app;
use nanogen_cli::commands::{cli, doctor, task};
use nanogen_core::api::{CliError, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    let format = args.format;
    let exit = match real_main(args).await {
        Ok(code) => code,
        Err(e) => {
            app::report_error(&e, format);
            app::exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main(args: cli::Args) -> Result<i32, CliError> {
    let cfg = app::load_config(&args)?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;
    tracing::debug!(bin = %cfg.gemini.bin, output_dir = %cfg.gemini.output_dir, "config loaded");

    match task::task_params(args.command.clone())? {
        Some(params) => app::run_task_command(params, &args, &cfg).await,
        None => doctor::run_doctor(&cfg, &args.env).await,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(shellexpand::tilde(d).as_ref()),
            None => nanogen_core::config::get_nanogen_data_dir()
                .map(|d| d.join("logs"))
                .unwrap_or_else(|_| std::env::temp_dir().join("nanogen")),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("nanogen.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

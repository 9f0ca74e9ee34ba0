use super::args::*;
use evalboard_core::config::{load_score_registry, write_sample_config, ClientConfig};
use evalboard_core::registry::ScoreRegistry;
use std::path::Path;

pub mod kb;
pub mod metrics;
pub mod scores;

pub mod exit_codes {
    use evalboard_core::errors::{as_config_error, as_fetch_error};

    pub const OK: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    pub const FETCH_ERROR: i32 = 3;
    pub const NOT_FOUND: i32 = 4;

    pub fn for_error(err: &anyhow::Error) -> i32 {
        if as_config_error(err).is_some() {
            CONFIG_ERROR
        } else if as_fetch_error(err).is_some() {
            FETCH_ERROR
        } else {
            FAILURE
        }
    }
}

pub async fn dispatch(cli: Cli, cfg: ClientConfig) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Metrics(args) => metrics::run(args, cfg).await,
        Command::Kb(args) => kb::run(args, cfg).await,
        Command::Scores(args) => scores::run(args, cfg),
        Command::Init(args) => cmd_init(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

/// Defaults, then `EVALBOARD_*` environment, then flags.
pub fn client_config(global: &GlobalArgs) -> ClientConfig {
    let mut cfg = ClientConfig::from_env();
    if let Some(url) = &global.base_url {
        cfg.base_url = url.clone();
    }
    if let Some(ms) = global.timeout_ms {
        cfg.timeout_ms = ms;
    }
    if let Some(level) = &global.log_level {
        cfg.log_level = level.clone();
    }
    cfg
}

pub(crate) fn load_registry(args: &ScoreConfigArgs, cfg: &ClientConfig) -> anyhow::Result<ScoreRegistry> {
    let path = args.scores.as_deref().unwrap_or(cfg.scores_path.as_path());
    let registry = load_score_registry(path, args.strict)?;
    tracing::debug!(event = "registry.loaded", path = %path.display(), scores = registry.len());
    Ok(registry)
}

pub(crate) fn write_output(output: &OutputArgs, rendered: &str) -> anyhow::Result<()> {
    match &output.out {
        Some(p) => {
            std::fs::write(p, rendered)?;
            eprintln!("wrote file: {}", p.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn cmd_init(args: InitArgs) -> anyhow::Result<i32> {
    write_sample_config_if_missing(&args.scores)?;
    Ok(exit_codes::OK)
}

fn write_sample_config_if_missing(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        eprintln!("exists: {}", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_sample_config(path)?;
    eprintln!("created: {}", path.display());
    Ok(())
}

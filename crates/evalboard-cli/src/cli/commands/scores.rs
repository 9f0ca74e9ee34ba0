use super::{exit_codes, load_registry, write_output};
use crate::cli::args::{OutputFormat, ScoresArgs};
use evalboard_core::config::ClientConfig;

pub fn run(args: ScoresArgs, cfg: ClientConfig) -> anyhow::Result<i32> {
    let registry = load_registry(&args.config, &cfg)?;

    let rendered = match args.output.format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string(&registry)?),
        OutputFormat::Text => registry.iter().map(|s| format!("{}\n", s)).collect(),
    };
    write_output(&args.output, &rendered)?;

    Ok(exit_codes::OK)
}

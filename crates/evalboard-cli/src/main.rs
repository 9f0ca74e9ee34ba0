use clap::Parser;

mod cli;
mod logging;

use cli::args::Cli;
use cli::commands::{client_config, dispatch, exit_codes};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();
    let cfg = client_config(&cli.global);
    logging::init(&cfg.log_level, cli.global.log_json);

    tracing::debug!(event = "cli.start", config = ?cfg);

    let code = match dispatch(cli, cfg).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_codes::for_error(&e)
        }
    };
    std::process::exit(code);
}

use super::{exit_codes, load_registry, write_output};
use crate::cli::args::{MetricsArgs, OutputFormat};
use evalboard_core::config::ClientConfig;
use evalboard_core::pipeline::{FetchMode, MetricsPipeline};
use evalboard_core::providers::http::HttpDashboardClient;
use evalboard_core::report::{console, series_json};
use std::sync::Arc;

pub async fn run(args: MetricsArgs, cfg: ClientConfig) -> anyhow::Result<i32> {
    // Registry problems must surface before any request goes out.
    let registry = Arc::new(load_registry(&args.config, &cfg)?);
    let client = Arc::new(HttpDashboardClient::new(cfg)?);

    let mode = if args.concurrent {
        FetchMode::Concurrent
    } else {
        FetchMode::Sequential
    };
    let pipeline = MetricsPipeline::new(registry, client.clone(), client).with_mode(mode);

    let chatbot = args.chatbot.as_deref();
    let series = pipeline.chatbot_metrics(chatbot).await?;

    let rendered = match args.output.format {
        OutputFormat::Json => format!("{}\n", series_json(&series, true)?),
        OutputFormat::Text => console::render_series(chatbot, &series),
    };
    write_output(&args.output, &rendered)?;

    Ok(exit_codes::OK)
}

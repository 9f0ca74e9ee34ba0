use super::{exit_codes, write_output};
use crate::cli::args::{KbArgs, OutputFormat};
use evalboard_core::config::ClientConfig;
use evalboard_core::providers::http::HttpDashboardClient;
use evalboard_core::providers::KnowledgeBaseSource;
use evalboard_core::report::console;

pub async fn run(args: KbArgs, cfg: ClientConfig) -> anyhow::Result<i32> {
    let client = HttpDashboardClient::new(cfg)?;

    let Some(rendered) = render(&client, &args.id, args.output.format).await? else {
        eprintln!("knowledge base '{}' does not exist", args.id);
        return Ok(exit_codes::NOT_FOUND);
    };
    write_output(&args.output, &rendered)?;

    Ok(exit_codes::OK)
}

/// Rendered catalog of knowledge base `id`, or `None` when it does not exist.
pub async fn render(
    source: &dyn KnowledgeBaseSource,
    id: &str,
    format: OutputFormat,
) -> anyhow::Result<Option<String>> {
    let Some(kb) = source.fetch_knowledge_base(id).await? else {
        return Ok(None);
    };

    let dups = console::duplicate_file_names(&kb);
    if !dups.is_empty() {
        tracing::warn!(
            event = "kb.duplicate_file_names",
            kb = %kb.kb_name,
            files = ?dups,
            "file names are not unique"
        );
    }

    let rendered = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&kb)?),
        OutputFormat::Text => console::render_knowledge_base(&kb),
    };
    Ok(Some(rendered))
}

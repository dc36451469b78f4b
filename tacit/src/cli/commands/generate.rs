//! Full documentation pipeline against the configured provider

use super::load_actions;
use crate::cli::app::GenerateArgs;
use anyhow::{Context, Result};
use std::sync::Arc;
use tacit_core::docgen::DocumentationPipeline;
use tacit_core::llm::{AnthropicBackend, GenerationClient, LLMConfig};
use tracing::info;

pub async fn execute(args: GenerateArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => LLMConfig::from_file(path)?,
        None => LLMConfig::default(),
    };

    let models = config.model_chain();
    info!(preferred = %models[0], fallbacks = models.len() - 1, "configured model chain");

    let backend = AnthropicBackend::new(config)?;
    let client = GenerationClient::new(Arc::new(backend), models);
    let pipeline = DocumentationPipeline::new(client);

    let actions = load_actions(&args.input)?;
    info!(actions = actions.len(), "generating documentation");
    let result = pipeline.generate_documentation(&actions).await?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &result.output.raw_markdown)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), chunks = result.chunks.len(), "documentation written");
        }
        None => println!("{}", result.output.raw_markdown),
    }

    Ok(())
}

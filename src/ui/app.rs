use std::sync::Arc;

use color_eyre::{Result, eyre::eyre};
use tracing::{debug, info};

use crate::{
    config::AppConfig,
    content::{
        Segment,
        block::{self, CardAction},
        segment, table,
    },
    event::bus::EventBus,
    preview::{PreviewController, PreviewRequest, PreviewTab},
    store::{
        Conversation, ConversationStore, FileStore, Message, RestStore, Role,
        resolve_conversation_id,
    },
    util::clock::SystemClock,
};

use super::{
    cli::{Cli, Commands, ExportCsvArgs, ExportHtmlArgs, SourceArgs},
    outline::render_outline,
};

pub struct App {
    pub config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        match cli.command {
            Commands::Show(source) => {
                let conversation = self.load(&source).await?;
                print!("{}", render_outline(&conversation));
            }
            Commands::ExportHtml(args) => self.export_html(args).await?,
            Commands::ExportCsv(args) => self.export_csv(args).await?,
            Commands::Resolve { input } => {
                let id = resolve_conversation_id(&input)
                    .ok_or_else(|| eyre!("No conversation id in {input:?}"))?;
                println!("{id}");
            }
        }
        Ok(())
    }

    async fn load(&self, source: &SourceArgs) -> Result<Conversation> {
        let id = resolve_conversation_id(&source.target)
            .ok_or_else(|| eyre!("No conversation id in {:?}", source.target))?;

        let store: Box<dyn ConversationStore> = match &source.file {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(RestStore::new(&self.config.store)?),
        };
        Ok(store.fetch(&id).await?)
    }

    async fn export_html(&self, args: ExportHtmlArgs) -> Result<()> {
        let conversation = self.load(&args.source).await?;
        let message = nth_message(&conversation, args.message)?;

        let class = markdown_parts(message)
            .iter()
            .flat_map(|text| block::code_blocks(text))
            .map(|code| block::classify(&code))
            .filter(|class| class.is_previewable())
            .nth(args.block)
            .ok_or_else(|| {
                eyre!(
                    "Message {} has no previewable block {}",
                    args.message,
                    args.block
                )
            })?;
        let request = class
            .open_request(CardAction::Preview)
            .ok_or_else(|| eyre!("Block {} cannot be previewed", args.block))?;

        let html = self.exported_html(request, args.sandboxed)?;
        tokio::fs::write(&args.out, html).await?;
        info!(out = %args.out.display(), sandboxed = args.sandboxed, "Exported HTML");
        println!("{}", args.out.display());
        Ok(())
    }

    /// The block's HTML source, or the isolated preview document built from it.
    fn exported_html(&self, request: PreviewRequest, sandboxed: bool) -> Result<String> {
        let mut preview = PreviewController::new(
            self.config.panel,
            self.config.sandbox,
            EventBus::new(),
            Arc::new(SystemClock),
        );
        preview.open(request);

        if !sandboxed {
            return preview
                .source_text()
                .map(str::to_string)
                .ok_or_else(|| eyre!("Preview has no source"));
        }
        let document = preview
            .sandbox_document()
            .ok_or_else(|| eyre!("Preview produced no document"))?;
        debug!(sandbox = %document.sandbox, "Built sandbox document");
        Ok(document.html)
    }

    async fn export_csv(&self, args: ExportCsvArgs) -> Result<()> {
        let conversation = self.load(&args.source).await?;
        let message = nth_message(&conversation, args.message)?;

        let table = markdown_parts(message)
            .iter()
            .flat_map(|text| table::tables(text))
            .nth(args.table)
            .ok_or_else(|| eyre!("Message {} has no table {}", args.message, args.table))?;

        tokio::fs::write(&args.out, table.to_csv()).await?;
        info!(out = %args.out.display(), "Exported table");
        println!("{}", args.out.display());
        Ok(())
    }
}

fn nth_message(conversation: &Conversation, index: usize) -> Result<&Message> {
    conversation.messages.get(index).ok_or_else(|| {
        eyre!(
            "Conversation has {} messages, no message {index}",
            conversation.messages.len()
        )
    })
}

/// Markdown text of a message: its markdown segments when it comes from the
/// assistant, the whole content otherwise.
fn markdown_parts(message: &Message) -> Vec<String> {
    if message.role != Role::Assistant {
        return vec![message.content.clone()];
    }
    segment(&message.content)
        .into_iter()
        .filter_map(|part| match part {
            Segment::Markdown(text) => Some(text),
            _ => None,
        })
        .collect()
}

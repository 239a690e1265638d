use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};

use super::web_analysis::{self, WebAnalysis};
use crate::preview::controller::{PreviewRequest, PreviewTab};

/// A fenced code block found while rendering a markdown segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// First word of the info string, empty when none was given.
    pub language: String,
    pub code: String,
}

pub fn code_blocks(markdown: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<CodeBlock> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                current = Some(CodeBlock {
                    language: info.split_whitespace().next().unwrap_or_default().to_string(),
                    code: String::new(),
                });
            }
            Event::Text(text) => {
                if let Some(block) = current.as_mut() {
                    block.code.push_str(&text);
                }
            }
            Event::End(Tag::CodeBlock(_)) => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            _ => {}
        }
    }

    blocks
}

/// How a fenced block is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockClass {
    PlainCode { language: String, code: String },
    HtmlPreview { html: String },
    WebAnalysis(WebAnalysis),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Copy,
    Preview,
    Source,
    Content,
}

pub fn classify(block: &CodeBlock) -> BlockClass {
    if let Some(analysis) = web_analysis::parse(&block.code) {
        return BlockClass::WebAnalysis(analysis);
    }

    match block.language.to_ascii_lowercase().as_str() {
        "html" | "xml" => BlockClass::HtmlPreview {
            html: block.code.clone(),
        },
        _ => BlockClass::PlainCode {
            language: block.language.clone(),
            code: block.code.trim_end_matches('\n').to_string(),
        },
    }
}

impl BlockClass {
    /// Buttons shown on the block's card.
    pub fn actions(&self) -> &'static [CardAction] {
        match self {
            BlockClass::PlainCode { .. } => &[CardAction::Copy],
            BlockClass::HtmlPreview { .. } => &[CardAction::Preview, CardAction::Source],
            BlockClass::WebAnalysis(_) => &[CardAction::Preview, CardAction::Content],
        }
    }

    pub fn is_previewable(&self) -> bool {
        !matches!(self, BlockClass::PlainCode { .. })
    }

    /// The preview panel request for `action`, if the action opens one.
    pub fn open_request(&self, action: CardAction) -> Option<PreviewRequest> {
        match (self, action) {
            (BlockClass::HtmlPreview { html }, CardAction::Preview | CardAction::Source) => {
                let tab = if action == CardAction::Preview {
                    PreviewTab::Preview
                } else {
                    PreviewTab::Source
                };
                Some(PreviewRequest::new(html.clone(), tab))
            }
            (BlockClass::WebAnalysis(analysis), CardAction::Preview | CardAction::Content) => {
                let tab = if action == CardAction::Preview {
                    PreviewTab::Preview
                } else {
                    PreviewTab::Source
                };
                Some(
                    PreviewRequest::new(analysis.document.clone(), tab)
                        .source_content(analysis.body.clone())
                        .show_controls(false)
                        .web_analysis(analysis.url.clone()),
                )
            }
            _ => None,
        }
    }

    /// Text placed on the clipboard by the copy action.
    pub fn copy_text(&self) -> &str {
        match self {
            BlockClass::PlainCode { code, .. } => code,
            BlockClass::HtmlPreview { html } => html,
            BlockClass::WebAnalysis(analysis) => &analysis.body,
        }
    }
}

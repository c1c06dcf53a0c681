use anyhow::Result;
use crate::ollama::OllamaClient;
use super::Tool;

pub const NO_CONTENT: &str = "[No content]";
pub const LLM_ERROR: &str = "[LLM error: no title]";

/// A proposed page title, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    Generated(String),
    /// The page had no text to summarise.
    NoContent,
    /// The model call failed; holds the error message.
    Failed(String),
}

impl Suggestion {
    /// The title shown to the user and written to Notion.
    pub fn as_str(&self) -> &str {
        match self {
            Suggestion::Generated(title) => title,
            Suggestion::NoContent => NO_CONTENT,
            Suggestion::Failed(_) => LLM_ERROR,
        }
    }
}

/// Asks the local model for a short title describing a page's text.
pub struct TitleSuggester {
    ollama: OllamaClient,
}

impl TitleSuggester {
    pub fn new(ollama: OllamaClient) -> Self {
        Self { ollama }
    }

    fn prompt(text: &str) -> String {
        format!(
            "Suggest a short, clear title (max 10 words) that captures the main idea of this note. \
             Respond with the title only — no formatting, no quotes, no Markdown::\n\n{}",
            text
        )
    }
}

#[async_trait::async_trait]
impl Tool for TitleSuggester {
    type Input = String;
    type Output = Suggestion;

    fn name(&self) -> &str {
        "title_suggester"
    }

    /// Never fails: model errors become `Suggestion::Failed`.
    async fn run(&self, text: String) -> Result<Suggestion> {
        log::info!(
            "TitleSuggester: asking {} for a title ({} chars)",
            self.ollama.model,
            text.len()
        );

        match self.ollama.generate(&Self::prompt(&text)).await {
            Ok(title) => Ok(Suggestion::Generated(title.trim().to_string())),
            Err(e) => Ok(Suggestion::Failed(format!("{:#}", e))),
        }
    }
}

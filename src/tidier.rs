use anyhow::{Context, Result};

use crate::content::{page_is_empty, page_text};
use crate::notion::{NotionApi, Page};
use crate::prompt::Prompter;
use crate::scanner::UntitledPages;
use crate::tools::{Suggestion, Tool};

/// Run-wide switches from the command line and config.
#[derive(Debug, Clone)]
pub struct TidyOptions {
    pub auto_apply: bool,
    pub confirm_delete: bool,
    pub page_url_base: String,
}

/// What happened to one untitled page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Deleted,
    DeletionDeclined,
    TitleApplied,
    TitleDeclined,
    /// No usable suggestion, nothing was shown.
    Skipped,
}

/// Per-outcome counts for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub pages_scanned: usize,
    pub untitled: usize,
    pub deleted: usize,
    pub deletion_declined: usize,
    pub titles_applied: usize,
    pub titles_declined: usize,
    pub skipped: usize,
}

impl ScanSummary {
    fn record(&mut self, outcome: PageOutcome) {
        self.untitled += 1;
        match outcome {
            PageOutcome::Deleted => self.deleted += 1,
            PageOutcome::DeletionDeclined => self.deletion_declined += 1,
            PageOutcome::TitleApplied => self.titles_applied += 1,
            PageOutcome::TitleDeclined => self.titles_declined += 1,
            PageOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Walks untitled pages one at a time and offers deletion or a new title.
pub struct Tidier<'a, N: ?Sized, S, P> {
    notion: &'a N,
    suggester: S,
    prompter: P,
    options: TidyOptions,
}

impl<'a, N, S, P> Tidier<'a, N, S, P>
where
    N: NotionApi + ?Sized,
    S: Tool<Input = String, Output = Suggestion>,
    P: Prompter,
{
    pub fn new(notion: &'a N, suggester: S, prompter: P, options: TidyOptions) -> Self {
        Self {
            notion,
            suggester,
            prompter,
            options,
        }
    }

    /// Process every untitled page in the workspace. Any Notion error aborts the run.
    pub async fn run(&mut self) -> Result<ScanSummary> {
        println!("Scanning for Untitled Pages:\n");

        let mut summary = ScanSummary::default();
        let mut pages = UntitledPages::new(self.notion);
        let mut idx = 0;

        while let Some(page) = pages.next_page().await.context("Workspace search failed")? {
            idx += 1;
            let outcome = self.process_page(idx, &page).await?;
            log::info!("Tidier: page {} -> {:?}", page.id, outcome);
            summary.record(outcome);
        }
        summary.pages_scanned = pages.pages_seen();

        println!("Scan complete.\n");
        log::info!("Tidier: {:?}", summary);
        Ok(summary)
    }

    async fn process_page(&mut self, idx: usize, page: &Page) -> Result<PageOutcome> {
        let url = page.url(&self.options.page_url_base);
        log::debug!(
            "Tidier: {} untitled page {} (last edited {})",
            idx,
            page.id,
            page.last_edited_date()
        );

        // Step 1: Text and suggestion
        let text = page_text(self.notion, &page.id)
            .await
            .with_context(|| format!("Failed to read blocks of page {}", page.id))?;
        let suggestion = if text.is_empty() {
            Suggestion::NoContent
        } else {
            log::debug!("Tidier: running {} on {} chars", self.suggester.name(), text.len());
            self.suggester.run(text).await?
        };
        if let Suggestion::Failed(reason) = &suggestion {
            log::warn!("Tidier: no title suggestion for {}: {}", page.id, reason);
        }

        // Step 2: Empty pages are only offered for deletion
        let empty = page_is_empty(self.notion, &page.id)
            .await
            .with_context(|| format!("Failed to read blocks of page {}", page.id))?;
        if empty && self.options.confirm_delete {
            println!("{}. Untitled and empty — {}", idx, url);
            if !self.prompter.confirm("Delete this empty page?")? {
                log::info!("Tidier: kept empty page {}", page.id);
                return Ok(PageOutcome::DeletionDeclined);
            }

            self.notion
                .delete_block(&page.id)
                .await
                .with_context(|| format!("Failed to delete page {}", page.id))?;
            println!("Page deleted.\n");
            return Ok(PageOutcome::Deleted);
        }

        // Step 3: Offer the title, sentinels included
        let title = suggestion.as_str();
        if title.is_empty() {
            return Ok(PageOutcome::Skipped);
        }

        println!("{}. [Untitled] — Suggested: \"{}\"", idx, title);
        println!("   Open: {}\n", url);

        if !self.options.auto_apply && !self.prompter.confirm("Apply this title?")? {
            return Ok(PageOutcome::TitleDeclined);
        }

        self.notion
            .update_page_title(&page.id, title)
            .await
            .with_context(|| format!("Failed to update title of page {}", page.id))?;
        println!("Title applied.\n");
        Ok(PageOutcome::TitleApplied)
    }
}

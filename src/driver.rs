use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tracing::debug;

use crate::config::AppConfig;
use crate::export::{self, ExportFormat};
use crate::extract::{self, choose, tables, ExtractionMode, ResultSet};
use crate::fetch;

/// The interactive session: collect inputs, fetch, extract, save. One page,
/// one output file, then exit. Strictly sequential.
pub struct Driver {
    input: BufReader<Stdin>,
    config: AppConfig,
}

/// What a successful run produced.
pub struct RunSummary {
    pub path: PathBuf,
    pub records: usize,
}

impl Driver {
    pub fn new(config: AppConfig) -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()),
            config,
        }
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        let url = self.ask("Web page URL to extract from: ").await?;
        let mode_token = self
            .ask(concat!(
                "What should be extracted?\n",
                "    [1] Tables\n",
                "    [2] Links\n",
                "    [3] Paragraph text\n",
                "    [4] Custom CSS selector\n",
                "Choice (1-4): ",
            ))
            .await?;
        let mode = ExtractionMode::from_menu_choice(&mode_token)?;
        let dynamic =
            is_affirmative(&self.ask("Is the page rendered by JavaScript? [y/N] ").await?);

        let html = fetch::fetch(&url, dynamic, &self.config.fetch).await?;
        println!("Fetched {} bytes of HTML.", html.len());

        let result = match mode {
            ExtractionMode::Tables => self.choose_tables(&html).await?,
            ExtractionMode::Links => extract::links(&html),
            ExtractionMode::Paragraphs => extract::paragraphs(&html),
            ExtractionMode::CssSelector => {
                let selector = self.ask("CSS selector (e.g. div.article p): ").await?;
                extract::by_css(&html, &selector)
            }
        };

        let format_token = self.ask("Output format (csv/json) [csv]: ").await?;
        let format = if format_token.is_empty() {
            ExportFormat::from_user_input(&self.config.export.default_format)
        } else {
            ExportFormat::from_user_input(&format_token)
        };

        let basename_token = self.ask("File name (without extension) [extracted]: ").await?;
        let basename = if basename_token.is_empty() {
            self.config.export.default_basename.clone()
        } else {
            basename_token
        };

        let records = result.len();
        let path = export::write(&result, format, &basename)?;
        println!("Saved {records} record(s) to {}", path.display());
        Ok(RunSummary { path, records })
    }

    /// Tables mode: parse, preview each candidate, resolve the user's
    /// selection into a single stacked result.
    async fn choose_tables(&mut self, html: &str) -> Result<ResultSet> {
        let parsed = tables::require_tables(html)?;

        println!("\nFound {} table(s):", parsed.len());
        for (index, table) in parsed.iter().enumerate() {
            println!("\nTable #{index}\n-----------\n{}", table.preview(2));
        }

        let selection_token = self
            .ask("\nTable(s) to save (comma-separated #, 'all', empty = first): ")
            .await?;
        let selection = choose::parse_selection(&selection_token, parsed.len());
        debug!("table selection: {selection:?}");
        Ok(choose::concat_selected(&parsed, &selection))
    }

    /// Print a prompt and read one trimmed line. Async so the top-level
    /// Ctrl-C select can preempt a pending prompt.
    async fn ask(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt}");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .await
            .context("failed to read from stdin")?;
        if read == 0 {
            anyhow::bail!("stdin closed before input was complete");
        }
        Ok(line.trim().to_string())
    }
}

/// Only an affirmative token selects the dynamic path; anything else,
/// including empty input, stays static.
fn is_affirmative(token: &str) -> bool {
    matches!(token.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_affirmative_tokens_select_dynamic() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("YES"));
        assert!(is_affirmative(" y "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("true"));
        assert!(!is_affirmative("yep"));
    }
}

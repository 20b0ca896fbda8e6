//! The interactive read-eval loop around the pipeline.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::pipeline::{CollaboratorFactory, PipelineError};
use crate::research::{SearchOutcome, StructureOutcome};
use crate::storage::ReportStore;

/// Inputs that end the session (case-insensitive).
pub const EXIT_TOKENS: [&str; 3] = ["q", "quit", "exit"];

const PROMPT: &str = "Enter your research topic (or 'q' to quit): ";
const RULE_WIDTH: usize = 60;

/// Where the driver is in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    AwaitingInput,
    RunningPipeline,
}

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Blank,
    Query(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Command::Blank
        } else if EXIT_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
        {
            Command::Exit
        } else {
            Command::Query(trimmed.to_string())
        }
    }
}

/// Counters for one interactive session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Pipeline runs started.
    pub runs: usize,
    /// Reports written to the store.
    pub reports: usize,
    /// Runs that ended without a report.
    pub failures: usize,
}

/// Reads queries, runs the pipeline for each and saves the reports.
pub struct Driver<R, W, S> {
    input: R,
    output: W,
    store: S,
    state: DriverState,
}

impl<R, W, S> Driver<R, W, S>
where
    R: BufRead,
    W: Write,
    S: ReportStore,
{
    pub fn new(input: R, output: W, store: S) -> Self {
        Self {
            input,
            output,
            store,
            state: DriverState::AwaitingInput,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Consumes the driver and returns its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the loop until an exit token or end of input.
    ///
    /// Errors inside a run are reported and the loop continues; only a
    /// failure to read input or write the console ends the session early.
    pub async fn run<F>(&mut self, factory: &F) -> io::Result<SessionStats>
    where
        F: CollaboratorFactory,
    {
        let mut stats = SessionStats::default();

        loop {
            self.state = DriverState::AwaitingInput;
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input");
                writeln!(self.output)?;
                break;
            }

            let query = match Command::parse(&line) {
                Command::Exit => break,
                Command::Blank => continue,
                Command::Query(query) => query,
            };

            self.state = DriverState::RunningPipeline;
            stats.runs += 1;

            match self.run_pipeline(&query, factory).await {
                Ok(Some(_)) => stats.reports += 1,
                Ok(None) => stats.failures += 1,
                Err(e) => {
                    stats.failures += 1;
                    error!(error = %e, "Pipeline run failed");
                    writeln!(self.output, "\n Pipeline Error: {}", e)?;
                    writeln!(
                        self.output,
                        "Tip: Check your API keys in .env or your internet connection.\n"
                    )?;
                }
            }
        }

        self.state = DriverState::AwaitingInput;
        writeln!(self.output, "\nShutting down. Goodbye!")?;
        info!(?stats, "Session ended");
        Ok(stats)
    }

    /// Runs search, analysis and structuring for one query.
    ///
    /// Returns the saved report path, or `None` when the search failed.
    pub async fn run_pipeline<F>(
        &mut self,
        query: &str,
        factory: &F,
    ) -> Result<Option<PathBuf>, PipelineError>
    where
        F: CollaboratorFactory,
    {
        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;
        let start = Instant::now();

        let collaborators = factory.build()?;

        writeln!(self.output, "1. [Searcher AI] Scanning web for: '{}'...", query)?;
        let search = collaborators.searcher.search(query).await;

        if let SearchOutcome::Failed { message } = &search {
            writeln!(self.output, "Search failed: {}", message)?;
            writeln!(self.output, "Please check your internet or API key.")?;
            return Ok(None);
        }

        writeln!(self.output, "2. [Analyst AI]  Synthesizing data & checking logic...")?;
        let analysis = collaborators.analyst.analyze(&search.to_json()).await;

        writeln!(self.output, "3. [Structurer AI] Formatting final report...")?;
        let report = match collaborators
            .structurer
            .structure(&analysis.into_payload())
            .await
        {
            StructureOutcome::Markdown(markdown) => markdown,
            StructureOutcome::Failed { message } => {
                return Err(PipelineError::Structuring(message));
            }
        };

        writeln!(self.output, "\n{0} FINAL REPORT {0}\n", "=".repeat(20))?;
        writeln!(self.output, "{}", report)?;
        writeln!(self.output, "\n{}", "=".repeat(54))?;

        let path = self.store.save_report(query, &report)?;
        let elapsed = start.elapsed().as_secs_f64();

        writeln!(self.output, "\n Report saved to: {}", path.display())?;
        writeln!(self.output, " Total time elapsed: {:.2} seconds\n", elapsed)?;

        Ok(Some(path))
    }
}

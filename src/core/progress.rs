//! Progress bar rendering of batch events

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

use super::config::{
    LAYOUT_HELP, NOTHING_TO_CLONE_MESSAGE, NO_REPOS_MESSAGE, PROGRESS_CHARS, PROGRESS_TEMPLATE,
    SEPARATOR_WIDTH,
};
use super::discovery::OrphanSets;
use super::stats::BatchStatistics;
use crate::batch::{BatchEvent, BatchKind, BatchReporter};

/// Renders batch events as a progress bar with one result line per repository
pub struct ProgressReporter {
    style: ProgressStyle,
    bar: Option<ProgressBar>,
    statistics: BatchStatistics,
    start_time: Instant,
}

impl ProgressReporter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            style: create_progress_style()?,
            bar: None,
            statistics: BatchStatistics::new(),
            start_time: Instant::now(),
        })
    }

    pub fn statistics(&self) -> &BatchStatistics {
        &self.statistics
    }

    /// Prints above the bar, or directly when the bar is not drawn
    fn println(&self, line: &str) {
        match &self.bar {
            Some(bar) if !bar.is_hidden() => bar.println(line),
            _ => println!("{line}"),
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl BatchReporter for ProgressReporter {
    fn report(&mut self, event: &BatchEvent) {
        match event {
            BatchEvent::Started { kind, total } => {
                self.start_time = Instant::now();
                println!("{} {} repositories", kind.verb(), total);
                let bar = ProgressBar::new(*total as u64);
                bar.set_style(self.style.clone());
                bar.set_prefix(kind.verb());
                self.bar = Some(bar);
            }
            BatchEvent::ItemStarted { name, .. } => {
                if let Some(bar) = &self.bar {
                    bar.set_message(name.clone());
                }
            }
            BatchEvent::StepStarted { name, description } => {
                if let Some(bar) = &self.bar {
                    bar.set_message(format!("{name}  {description}"));
                }
            }
            BatchEvent::ItemFinished { result, .. } => {
                self.statistics.update(result);
                self.println(&result.to_string());
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
            }
            BatchEvent::Done { kind, .. } => {
                self.finish();
                let summary = self
                    .statistics
                    .generate_summary(*kind, self.start_time.elapsed());
                println!();
                println!("{}", "━".repeat(SEPARATOR_WIDTH));
                println!("{summary}");
                let detailed = self.statistics.generate_detailed_summary();
                if !detailed.is_empty() {
                    println!();
                    println!("{detailed}");
                }
            }
            BatchEvent::NothingToDo { kind } => match kind {
                BatchKind::Clone => println!("{NOTHING_TO_CLONE_MESSAGE}"),
                BatchKind::Pull | BatchKind::Push => {
                    println!("{NO_REPOS_MESSAGE}");
                    println!("{LAYOUT_HELP}");
                }
            },
            BatchEvent::Cancelled {
                kind,
                counters,
                total,
            } => {
                self.finish();
                println!();
                println!(
                    "⚠️  {} cancelled after {}/{} repositories ({} succeeded, {} failed)",
                    kind,
                    counters.processed(),
                    total,
                    counters.succeeded,
                    counters.failed
                );
            }
        }
    }
}

/// Prints pairing warnings once, before any repository is processed
pub fn print_orphan_warnings(orphans: &OrphanSets) {
    if !orphans.directories_without_feedback_file.is_empty() {
        println!(
            "⚠️  Repositories without a feedback file ({}):",
            orphans.directories_without_feedback_file.len()
        );
        for name in &orphans.directories_without_feedback_file {
            println!("   - {name}");
        }
    }
    if !orphans.feedback_files_without_directory.is_empty() {
        println!(
            "⚠️  Feedback files without a repository ({}):",
            orphans.feedback_files_without_directory.len()
        );
        for name in &orphans.feedback_files_without_directory {
            println!("   - {name}");
        }
    }
}

/// Creates a progress bar style configuration
pub(crate) fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)?
        .progress_chars(PROGRESS_CHARS))
}

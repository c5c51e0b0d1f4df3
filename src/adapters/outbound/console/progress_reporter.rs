use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

const BAR_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Progress goes to stderr so a report written to stdout stays clean JSON.
/// Counted operations (definition lookups) are drawn with indicatif.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut current = self.progress_bar.borrow_mut();
        match current.as_ref() {
            Some(pb) => {
                pb.set_length(total as u64);
                pb.clone()
            }
            None => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(Self::bar_style());
                *current = Some(pb.clone());
                pb
            }
        }
    }

    /// Clears a running bar so the next counted operation starts fresh
    fn finish_progress_bar(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!();
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_lifecycle() {
        let reporter = StderrProgressReporter::new();
        reporter.report("📖 Loading dependency graph");
        reporter.report_progress(1, 3, Some("definition-a"));
        assert!(reporter.progress_bar.borrow().is_some());

        reporter.report_error("⚠️  Warning");
        assert!(reporter.progress_bar.borrow().is_none());

        reporter.report_progress(2, 4, None);
        reporter.report_completion("✅ Done");
        assert!(reporter.progress_bar.borrow().is_none());
    }

    #[test]
    fn test_progress_bar_reused_within_operation() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(0, 5, Some("a"));
        reporter.report_progress(3, 5, Some("b"));
        let pb = reporter.progress_bar.borrow().clone().unwrap();
        assert_eq!(pb.position(), 3);
        assert_eq!(pb.length(), Some(5));
    }

    #[test]
    fn test_bar_template_is_valid() {
        assert!(ProgressStyle::default_bar().template(BAR_TEMPLATE).is_ok());
    }
}

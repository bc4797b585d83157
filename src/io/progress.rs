//! Per-phase progress bars shared across worker threads

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Write};
use std::sync::LazyLock;
use tracing_subscriber::fmt::MakeWriter;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates the progress bars of the catalog and compositing phases
pub struct ProgressManager {
    multi_progress: MultiProgress,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
        }
    }

    /// Create a manager whose bars are never drawn
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        }
    }

    /// Add a bar for a phase with `len` units of work
    pub fn phase(&self, label: &str, len: u64) -> PhaseProgress {
        let bar = ProgressBar::new(len);
        bar.set_style(PHASE_STYLE.clone());
        bar.set_prefix(label.to_string());
        PhaseProgress {
            bar: self.multi_progress.add(bar),
        }
    }

    /// Remove all bars from the terminal
    pub fn clear(&self) {
        let _ = self.multi_progress.clear();
    }

    /// Stderr sink for log lines that keeps the bars intact
    pub fn log_writer(&self) -> ProgressLogWriter {
        ProgressLogWriter {
            multi_progress: self.multi_progress.clone(),
        }
    }
}

/// Writes to stderr with every bar of a [`ProgressManager`] hidden for the
/// duration of the write, so log lines never land inside a bar
#[derive(Clone, Debug)]
pub struct ProgressLogWriter {
    multi_progress: MultiProgress,
}

impl Write for ProgressLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi_progress.suspend(|| io::stderr().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.multi_progress.suspend(|| io::stderr().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressLogWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Handle to one phase's bar; clones update the same bar
#[derive(Clone, Debug)]
pub struct PhaseProgress {
    bar: ProgressBar,
}

impl Default for PhaseProgress {
    fn default() -> Self {
        Self::hidden()
    }
}

impl PhaseProgress {
    /// A bar that counts but never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Reset the total amount of work
    pub fn set_length(&self, len: u64) {
        self.bar.set_length(len);
    }

    /// Record one finished unit of work
    pub fn tick(&self) {
        self.bar.inc(1);
    }

    /// Units of work finished so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Mark the phase finished with a closing message
    pub fn finish(&self, message: impl Into<String>) {
        self.bar.finish_with_message(message.into());
    }
}

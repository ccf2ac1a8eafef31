//! Progress display for batch map generation

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Maps: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// One bar over the seeds of a batch, labeled with the seed being generated
pub struct ProgressManager {
    bar: ProgressBar,
    failures: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with an empty, hidden-until-initialised bar
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            failures: 0,
        }
    }

    /// Size the bar for `map_count` maps and start drawing it
    pub fn initialize(&mut self, map_count: usize) {
        let bar = ProgressBar::new(map_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = bar;
    }

    /// Show which seed is being generated
    pub fn start_map(&self, seed: u64) {
        self.bar.set_message(format!("seed {seed}"));
    }

    /// Advance after a map finished, successfully or not
    pub fn complete_map(&mut self, succeeded: bool) {
        if !succeeded {
            self.failures += 1;
        }
        self.bar.inc(1);
    }

    /// Maps that ended in an error so far
    pub const fn failures(&self) -> usize {
        self.failures
    }

    /// Number of maps completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Current label, the seed in flight or the closing summary
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Close the bar with a summary line
    pub fn finish(&self) {
        self.bar
            .finish_with_message(format!("done ({} failed)", self.failures));
    }
}

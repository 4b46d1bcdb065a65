//! Progress display while patches are computed chunk by chunk

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static CHUNK_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Chunks: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks chunks processed and patches emitted
pub struct ChunkProgress {
    bar: ProgressBar,
    patches: u64,
}

impl ChunkProgress {
    /// Create a visible progress bar over `chunk_count` chunks
    pub fn new(chunk_count: usize) -> Self {
        let bar = ProgressBar::new(chunk_count as u64);
        bar.set_style(CHUNK_STYLE.clone());
        Self { bar, patches: 0 }
    }

    /// Create a progress tracker that draws nothing
    pub fn hidden(chunk_count: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(chunk_count as u64);
        Self { bar, patches: 0 }
    }

    /// Record one finished chunk and the patches it produced
    pub fn advance(&mut self, patches: usize) {
        self.patches += patches as u64;
        self.bar.inc(1);
        self.bar.set_message(format!("{} patches", self.patches));
    }

    /// Chunks processed so far
    pub fn chunks_done(&self) -> u64 {
        self.bar.position()
    }

    /// Patches emitted so far
    pub const fn patches_done(&self) -> u64 {
        self.patches
    }

    /// Leave the bar at its final state
    pub fn finish(&self) {
        self.bar
            .finish_with_message(format!("{} patches", self.patches));
    }
}

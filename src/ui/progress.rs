use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for the bulk note loader; hidden when stdout is not a terminal
pub struct SeedProgress {
    bar: ProgressBar,
}

impl SeedProgress {
    pub fn new(total: usize) -> Self {
        let bar = if console::Term::stdout().is_term() {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };

        if let Ok(style) = ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} notes ({per_sec})",
        ) {
            bar.set_style(style);
        }

        Self { bar }
    }

    pub fn advance(&self, rows: usize) {
        self.bar.inc(rows as u64);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

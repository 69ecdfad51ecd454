use std::sync::Arc;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use kg2_fetch::ProgressFn;

use crate::ui;

/// Spinner or byte counter drawn on stderr; inert when progress is disabled.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Byte progress for a download whose length may be unknown.
    ///
    /// Stays hidden until the first chunk arrives, so a dataset that is
    /// already present draws nothing.
    #[must_use]
    pub fn download(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {msg} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Callback feeding this bar from fetcher progress reports.
    #[must_use]
    pub fn as_callback(&self) -> Option<ProgressFn> {
        let bar = self.bar.clone()?;
        Some(Arc::new(move |written, total| {
            if bar.is_hidden() {
                bar.set_draw_target(ProgressDrawTarget::stderr());
            }
            if let Some(total) = total {
                bar.set_length(total);
            }
            bar.set_position(written);
            if total.is_some_and(|total| written >= total) {
                bar.finish_and_clear();
            }
        }))
    }

    /// Clear on success, leave a failure note otherwise.
    pub fn finish(&self, ok: bool) {
        if ok {
            self.finish_clear();
        } else {
            self.finish_err("failed");
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

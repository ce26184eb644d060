use indicatif::{ProgressBar, ProgressStyle};

/// Styled progress bar for long-running passes. Returns `None` if the style
/// template fails to parse; callers treat the bar as optional.
pub fn progress_bar(len: u64, message: String) -> Option<ProgressBar> {
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
        .ok()?
        .progress_chars("##-");

    let bar = ProgressBar::new(len);
    bar.set_style(style);
    bar.set_message(message);

    Some(bar)
}

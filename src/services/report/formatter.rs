pub const BAR_WIDTH: usize = 25;
const MAX_LABEL_CHARS: usize = 15;
const ELLIPSIS: &str = "...";
const TAB_STOP: usize = 8;

/// Truncate `text` to 15 characters (the last three becoming `...`) and pad it
/// with tabs so the next column starts at a predictable tab stop.
pub fn format_label(text: &str, min_columns: usize) -> String {
    let mut label: String = if text.chars().count() > MAX_LABEL_CHARS {
        text.chars()
            .take(MAX_LABEL_CHARS - ELLIPSIS.len())
            .chain(ELLIPSIS.chars())
            .collect()
    } else {
        text.to_string()
    };

    let tabs = min_columns.saturating_sub(label.chars().count() / TAB_STOP);
    label.extend(std::iter::repeat('\t').take(tabs));
    label
}

/// `#` for the filled share of 25 cells, `-` for the rest. The fill count is
/// `floor(fraction * 25)`; callers keep `fraction` within `[0, 1]`.
pub fn progress_bar(fraction: f64) -> String {
    let filled = (fraction * BAR_WIDTH as f64).floor();
    let filled = if filled.is_nan() || filled < 0.0 {
        0
    } else {
        (filled as usize).min(BAR_WIDTH)
    };

    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(BAR_WIDTH - filled));
    bar
}

/// One aligned stats row: label, amount, bar, and the percentage.
pub fn stat_line(label: &str, amount: &str, fraction: f64, percent: f64) -> String {
    format!(
        "{}{}{}\t{:.2}%\n",
        format_label(label, 2),
        format_label(amount, 2),
        progress_bar(fraction),
        percent
    )
}

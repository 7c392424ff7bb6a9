//! Column-bar text chart for an intraday price series.
//!
//! ```text
//!       215 |            ##
//!       214 |  ###      ####
//!       213 |#######  #######
//!           +----------------
//!            09:30     09:45
//!            16 points, 1m interval
//! ```
//!
//! Each column is one point of the trailing window. A column is filled in
//! every row whose midpoint threshold its value clears, so bars grow from the
//! bottom up. Time labels come from the trailing-aligned timestamps when
//! present. Points older than the first timestamp count back from it, and a
//! series without timestamps is estimated backwards from "now".

use std::fmt::Display;

use chrono::{DateTime, Duration, Local, TimeZone};

use crate::models::aligned_timestamp;

/// Returned for an empty series.
pub const NO_CHART_DATA: &str = "No chart data available\n";

/// Width of the right-justified value label.
const LABEL_WIDTH: usize = 9;
/// Label plus the " |" separator; bars start at this column.
const GUTTER_WIDTH: usize = LABEL_WIDTH + 2;
/// Maximum number of time-axis labels.
const MAX_TIME_LABELS: usize = 5;

const FILLED: char = '#';
const BLANK: char = ' ';

/// Chart dimensions in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartOptions {
    /// Maximum number of columns (trailing points shown)
    pub width: usize,
    /// Number of value rows
    pub height: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 60,
            height: 10,
        }
    }
}

/// Render `prices` with time labels in the local time zone.
pub fn render_chart(prices: &[f64], timestamps: &[i64], options: &ChartOptions) -> String {
    render_chart_at(prices, timestamps, options, Local::now())
}

/// Render `prices` with time labels in the zone of `now`.
///
/// `timestamps` are Unix seconds aligned to the most recent entries of
/// `prices`. `now` anchors estimated labels when no timestamp is available.
pub fn render_chart_at<Tz>(
    prices: &[f64],
    timestamps: &[i64],
    options: &ChartOptions,
    now: DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if prices.is_empty() {
        return NO_CHART_DATA.to_string();
    }

    let width = options.width.max(1);
    let height = options.height.max(1);

    let window_start = prices.len().saturating_sub(width);
    let window = &prices[window_start..];

    let min = window.iter().copied().fold(f64::INFINITY, f64::min);
    let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let flat = max - min == 0.0;
    let range = if flat { 1.0 } else { max - min };

    let mut out = String::new();

    for row in (0..height).rev() {
        let threshold = min + range * (row as f64 + 0.5) / height as f64;
        let upper = min + range * (row as f64 + 1.0) / height as f64;

        out.push_str(&format!("{:>width$} |", upper as i64, width = LABEL_WIDTH));
        for &value in window {
            // A zero-range series has nothing to compare against; draw it flat
            let filled = if flat { row == 0 } else { value >= threshold };
            out.push(if filled { FILLED } else { BLANK });
        }
        out.push('\n');
    }

    out.push_str(&" ".repeat(LABEL_WIDTH + 1));
    out.push('+');
    out.push_str(&"-".repeat(window.len()));
    out.push('\n');

    let estimate = estimated_step(window.len());
    let gap = first_gap(timestamps);
    // Uncovered points count back from the oldest timestamp, at the observed step
    let first_covered = prices.len().saturating_sub(timestamps.len());
    let step_seconds = gap.unwrap_or_else(|| estimate.num_seconds());
    let label_for = |index: usize| -> String {
        let full_index = window_start + index;
        let seconds = timestamps.first().map(|&oldest| {
            aligned_timestamp(prices.len(), timestamps, full_index).unwrap_or_else(|| {
                let points_back = first_covered.saturating_sub(full_index) as i64;
                oldest - step_seconds * points_back
            })
        });
        let at = seconds
            .and_then(|ts| now.timezone().timestamp_opt(ts, 0).single())
            .unwrap_or_else(|| {
                let points_back = (window.len() - 1 - index) as i32;
                now.clone() - estimate * points_back
            });
        at.format("%H:%M").to_string()
    };

    out.push_str(&" ".repeat(GUTTER_WIDTH));
    out.push_str(&time_axis(window.len(), label_for));
    out.push('\n');

    out.push_str(&" ".repeat(GUTTER_WIDTH));
    out.push_str(&describe_series(window.len(), gap, estimate));
    out.push('\n');

    out
}

/// Window indices that get a time label: up to five, evenly spaced.
fn label_indices(len: usize) -> Vec<usize> {
    let count = len.min(MAX_TIME_LABELS);
    match count {
        0 => Vec::new(),
        1 => vec![0],
        _ => (0..count).map(|k| k * (len - 1) / (count - 1)).collect(),
    }
}

/// Labels placed at their column, pushed right to keep a one-space gap.
fn time_axis(len: usize, label_for: impl Fn(usize) -> String) -> String {
    let mut line = String::new();
    for (n, index) in label_indices(len).into_iter().enumerate() {
        let min_column = if n == 0 { 0 } else { line.len() + 1 };
        let column = index.max(min_column);
        line.push_str(&" ".repeat(column - line.len()));
        line.push_str(&label_for(index));
    }
    line
}

/// Sampling step assumed when no timestamps are available.
fn estimated_step(points: usize) -> Duration {
    match points {
        0..=78 => Duration::minutes(1),
        79..=200 => Duration::minutes(2),
        _ => Duration::minutes(5),
    }
}

/// Seconds between the first two timestamps, when positive.
fn first_gap(timestamps: &[i64]) -> Option<i64> {
    match timestamps {
        [first, second, ..] if second > first => Some(second - first),
        _ => None,
    }
}

/// "N points, 1m interval", observed from the first timestamp gap when possible.
fn describe_series(points: usize, gap: Option<i64>, step: Duration) -> String {
    let noun = if points == 1 { "point" } else { "points" };
    match gap {
        Some(seconds) => format!("{} {}, {} interval", points, noun, format_interval(seconds)),
        None => format!(
            "{} {}, {} interval (est.)",
            points,
            noun,
            format_interval(step.num_seconds())
        ),
    }
}

fn format_interval(seconds: i64) -> String {
    if seconds % 86_400 == 0 {
        format!("{}d", seconds / 86_400)
    } else if seconds % 3_600 == 0 {
        format!("{}h", seconds / 3_600)
    } else if seconds % 60 == 0 {
        format!("{}m", seconds / 60)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 10, 30, 0).unwrap()
    }

    fn render(prices: &[f64], timestamps: &[i64], width: usize, height: usize) -> String {
        render_chart_at(prices, timestamps, &ChartOptions { width, height }, now())
    }

    /// Bar cells of each value row, top row first.
    fn bar_rows(chart: &str, height: usize) -> Vec<String> {
        chart
            .lines()
            .take(height)
            .map(|line| line[GUTTER_WIDTH..].to_string())
            .collect()
    }

    fn is_filled(rows: &[String], row_from_top: usize, column: usize) -> bool {
        rows[row_from_top].as_bytes()[column] == FILLED as u8
    }

    #[test]
    fn test_empty_series_returns_placeholder() {
        assert_eq!(render(&[], &[], 60, 10), NO_CHART_DATA);
        assert_eq!(render(&[], &[100, 200], 60, 10), NO_CHART_DATA);
    }

    #[test]
    fn test_single_point_is_flat_bar_with_one_label() {
        let chart = render(&[5.0], &[], 60, 10);
        let rows = bar_rows(&chart, 10);
        assert_eq!(rows.len(), 10);
        for row in &rows[..9] {
            assert_eq!(row, " ");
        }
        assert_eq!(rows[9], "#");

        let labels = chart.lines().nth(11).unwrap();
        assert_eq!(labels.trim(), "10:30");
        assert!(chart.contains("1 point, 1m interval (est.)"));
    }

    #[test]
    fn test_flat_series_renders_bottom_row_only() {
        let chart = render(&[3.0, 3.0, 3.0], &[], 60, 4);
        let rows = bar_rows(&chart, 4);
        assert_eq!(rows, vec!["   ", "   ", "   ", "###"]);
    }

    #[test]
    fn test_ramp_fill_is_monotonic() {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        let height = 10;
        let chart = render(&prices, &[], 60, height);
        let rows = bar_rows(&chart, height);

        for column in 0..prices.len() {
            // Once a cell is filled, every cell below it is filled too
            let mut seen_fill = false;
            for row in 0..height {
                let filled = is_filled(&rows, row, column);
                if seen_fill {
                    assert!(filled, "gap below fill at row {} col {}", row, column);
                }
                seen_fill |= filled;
            }
        }

        // Minimum clears no threshold, maximum clears all of them
        assert!((0..height).all(|row| !is_filled(&rows, row, 0)));
        assert!((0..height).all(|row| is_filled(&rows, row, 4)));
        // Top threshold is 4.8: only the 5.0 column reaches it
        assert_eq!(rows[0], "    #");
    }

    #[test]
    fn test_row_labels_are_truncated_upper_bounds() {
        let chart = render(&[0.0, 100.0], &[], 60, 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert!(lines[0].starts_with("      100 |"));
        assert!(lines[9].starts_with("       10 |"));

        let chart = render(&[1.0, 2.0], &[], 60, 3);
        let lines: Vec<&str> = chart.lines().collect();
        // 1 + 1/3 truncates to 1
        assert!(lines[2].starts_with("        1 |"));
        assert!(lines[0].starts_with("        2 |"));
    }

    #[test]
    fn test_baseline_matches_window_width() {
        let prices: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let chart = render(&prices, &[], 60, 5);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[5], format!("{}+{}", " ".repeat(10), "-".repeat(60)));
        for row in bar_rows(&chart, 5) {
            assert_eq!(row.len(), 60);
        }
        assert!(chart.contains("60 points"));
    }

    #[test]
    fn test_window_keeps_most_recent_points() {
        // Older points are far below; the window only sees the last three
        let chart = render(&[-1000.0, 10.0, 20.0, 30.0], &[], 3, 3);
        let rows = bar_rows(&chart, 3);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 3));
        assert_eq!(rows[2], " ##");
        assert!(chart.lines().next().unwrap().starts_with("       30 |"));
    }

    #[test]
    fn test_observed_time_labels() {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        let timestamps = [0, 60, 120, 180, 240];
        let chart = render(&prices, &timestamps, 60, 4);
        let labels = chart.lines().nth(5).unwrap();
        assert_eq!(labels.trim(), "00:00 00:01 00:02 00:03 00:04");
        assert!(chart.contains("5 points, 1m interval"));
        assert!(!chart.contains("(est.)"));
    }

    #[test]
    fn test_labels_are_spaced_by_column() {
        let prices: Vec<f64> = (0..60).map(|i| i as f64).collect();
        let timestamps: Vec<i64> = (0..60).map(|i| i * 60).collect();
        let chart = render(&prices, &timestamps, 60, 2);
        let labels = &chart.lines().nth(3).unwrap()[GUTTER_WIDTH..];
        // indices 0, 14, 29, 44, 59
        assert_eq!(labels.find("00:00"), Some(0));
        assert_eq!(labels.find("00:14"), Some(14));
        assert_eq!(labels.find("00:29"), Some(29));
        assert_eq!(labels.find("00:44"), Some(44));
        assert_eq!(labels.find("00:59"), Some(59));
    }

    #[test]
    fn test_estimated_labels_walk_back_from_now() {
        let chart = render(&[1.0, 2.0, 3.0], &[], 60, 2);
        let labels = chart.lines().nth(3).unwrap();
        assert_eq!(labels.trim(), "10:28 10:29 10:30");
        assert!(chart.contains("3 points, 1m interval (est.)"));
    }

    #[test]
    fn test_estimated_step_grows_with_window() {
        assert_eq!(estimated_step(1), Duration::minutes(1));
        assert_eq!(estimated_step(78), Duration::minutes(1));
        assert_eq!(estimated_step(79), Duration::minutes(2));
        assert_eq!(estimated_step(200), Duration::minutes(2));
        assert_eq!(estimated_step(201), Duration::minutes(5));

        let prices: Vec<f64> = (0..120).map(|i| i as f64).collect();
        let chart = render(&prices, &[], 120, 2);
        assert!(chart.contains("120 points, 2m interval (est.)"));
    }

    #[test]
    fn test_partial_timestamps_use_trailing_alignment() {
        let prices: Vec<f64> = (0..70).map(|i| i as f64).collect();
        // Only the last ten points have timestamps, 5 minutes apart from 10:00
        let timestamps: Vec<i64> = (0..10).map(|i| 36_000 + i * 300).collect();
        let chart = render(&prices, &timestamps, 60, 2);
        let labels = chart.lines().nth(3).unwrap().trim().to_string();
        let parts: Vec<&str> = labels.split_whitespace().collect();
        // Window indices 0, 14, 29, 44, 59 are prices[10], [24], [39], [54], [69]
        assert_eq!(parts, vec!["05:50", "07:00", "08:15", "09:30", "10:45"]);
        assert!(parts.windows(2).all(|w| w[0] <= w[1]));
        assert!(chart.contains("60 points, 5m interval"));
    }

    #[test]
    fn test_uncovered_points_count_back_from_oldest_timestamp() {
        let chart = render(&[0.0, 1.0, 2.0, 3.0, 4.0], &[3_600, 3_660, 3_720], 60, 2);
        let labels = chart.lines().nth(3).unwrap().trim().to_string();
        assert_eq!(labels, "00:58 00:59 01:00 01:01 01:02");
    }

    #[test]
    fn test_single_timestamp_counts_back_at_estimated_step() {
        let chart = render(&[1.0, 2.0, 3.0], &[7_200], 60, 2);
        let labels = chart.lines().nth(3).unwrap().trim().to_string();
        assert_eq!(labels, "01:58 01:59 02:00");
        assert!(chart.contains("3 points, 1m interval (est.)"));
    }

    #[test]
    fn test_interval_uses_first_gap_only() {
        let chart = render(&[1.0, 2.0, 3.0], &[0, 60, 600], 60, 2);
        assert!(chart.contains("3 points, 1m interval"));

        let chart = render(&[1.0, 2.0], &[0, 3_600], 60, 2);
        assert!(chart.contains("2 points, 1h interval"));
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(30), "30s");
        assert_eq!(format_interval(60), "1m");
        assert_eq!(format_interval(300), "5m");
        assert_eq!(format_interval(90), "90s");
        assert_eq!(format_interval(3_600), "1h");
        assert_eq!(format_interval(86_400), "1d");
    }

    #[test]
    fn test_label_indices() {
        assert!(label_indices(0).is_empty());
        assert_eq!(label_indices(1), vec![0]);
        assert_eq!(label_indices(3), vec![0, 1, 2]);
        assert_eq!(label_indices(60), vec![0, 14, 29, 44, 59]);
    }

    #[test]
    fn test_zero_dimensions_are_clamped() {
        let chart = render(&[1.0, 2.0], &[], 0, 0);
        let rows = bar_rows(&chart, 1);
        assert_eq!(rows, vec!["#"]);
    }
}

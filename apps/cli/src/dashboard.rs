//! Text dashboard around a snapshot: header, stats block, chart and footer.

use std::ffi::OsString;
use std::time::Duration;

use crossterm::style::{Color, Stylize};
use quote_market_data::{render_chart, ChartOptions, FetchStats, MarketDataError, Snapshot};

#[derive(Clone, Debug)]
pub struct DashboardOptions {
    pub chart: ChartOptions,
    /// Watch-mode refresh interval, shown in the footer
    pub refresh: Option<Duration>,
    /// Emit ANSI colors
    pub color: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            chart: ChartOptions::default(),
            refresh: None,
            color: false,
        }
    }
}

/// Render one full frame for a fetch outcome.
///
/// `label` names the ticker when the outcome carries no symbol.
pub fn render_dashboard(
    label: &str,
    outcome: &Result<Snapshot, MarketDataError>,
    stats: &FetchStats,
    options: &DashboardOptions,
) -> String {
    let mut out = String::new();

    match outcome {
        Ok(snapshot) if snapshot.has_data => render_snapshot(&mut out, snapshot, options),
        Ok(_) => {
            out.push_str(&paint(
                format!("No valid data for {}", label),
                Color::Yellow,
                options.color,
            ));
            out.push('\n');
        }
        Err(e) => {
            out.push_str(&paint(format!("Error: {}", e), Color::Red, options.color));
            out.push('\n');
        }
    }

    out.push('\n');
    render_footer(&mut out, stats, options);
    out
}

fn render_snapshot(out: &mut String, snapshot: &Snapshot, options: &DashboardOptions) {
    let title = if snapshot.name.is_empty() {
        bold(snapshot.symbol.clone(), options.color)
    } else {
        format!("{}  {}", bold(snapshot.symbol.clone(), options.color), snapshot.name)
    };
    out.push_str(&title);
    out.push('\n');

    let change = snapshot.change();
    let trend = if change > 0.0 {
        Color::Green
    } else if change < 0.0 {
        Color::Red
    } else {
        Color::DarkGrey
    };
    let change_text = match snapshot.change_percent() {
        Some(percent) => format!("{:+.2} ({:+.2}%)", change, percent),
        None => "n/a".to_string(),
    };
    let price = format!("{:.2} {}", snapshot.current_price, snapshot.currency);
    out.push_str(&format!(
        "{}  {}\n\n",
        bold(price.trim_end().to_string(), options.color),
        paint(change_text, trend, options.color)
    ));

    let rows = [
        ("Prev Close", format!("{:.2}", snapshot.previous_close)),
        (
            "Day Range",
            format!("{:.2} - {:.2}", snapshot.day_low, snapshot.day_high),
        ),
        (
            "52W Range",
            format!(
                "{:.2} - {:.2}",
                snapshot.fifty_two_week_low, snapshot.fifty_two_week_high
            ),
        ),
        ("Volume", group_thousands(snapshot.volume)),
        ("Exchange", snapshot.exchange_name.clone()),
    ];
    for (name, value) in rows {
        if value.is_empty() {
            continue;
        }
        out.push_str(&format!("  {:<12}{}\n", name, value));
    }
    out.push('\n');

    out.push_str(&render_chart(
        &snapshot.prices,
        &snapshot.timestamps,
        &options.chart,
    ));
}

fn render_footer(out: &mut String, stats: &FetchStats, options: &DashboardOptions) {
    if let Some(at) = stats.last_fetch_time {
        out.push_str(&paint(
            format!(
                "Updated {} (fetched in {} ms)",
                at.format("%H:%M:%S"),
                stats.fetch_duration_ms
            ),
            Color::DarkGrey,
            options.color,
        ));
        out.push('\n');
    }
    if let Some(refresh) = options.refresh {
        out.push_str(&paint(
            format!(
                "Refreshing every {}. Press Ctrl+C to exit.",
                format_interval(refresh)
            ),
            Color::DarkGrey,
            options.color,
        ));
        out.push('\n');
    }
}

/// Colors only on a terminal, and never while `NO_COLOR` holds a non-empty value.
pub fn color_enabled(is_terminal: bool, no_color: Option<OsString>) -> bool {
    is_terminal && no_color.map_or(true, |value| value.is_empty())
}

fn paint(text: String, color: Color, enabled: bool) -> String {
    if enabled {
        text.with(color).to_string()
    } else {
        text
    }
}

fn bold(text: String, enabled: bool) -> String {
    if enabled {
        text.bold().to_string()
    } else {
        text
    }
}

/// 70122748 -> "70,122,748"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_interval(interval: Duration) -> String {
    if interval.subsec_millis() == 0 {
        format!("{}s", interval.as_secs())
    } else {
        format!("{}ms", interval.as_millis())
    }
}

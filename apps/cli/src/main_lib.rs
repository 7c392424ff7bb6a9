use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use quote_market_data::{ChartRequest, YahooChartProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Cli;
use crate::config::{Config, LogFormat};
use crate::dashboard::{color_enabled, render_dashboard, DashboardOptions};
use crate::session::QuoteSession;
use crate::watch::{cancel_on_ctrl_c, run_watch, StopToken, WatchOptions};

/// Logs go to stderr so they never interleave with the dashboard on stdout.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_format == LogFormat::Json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Fetch once, or keep refreshing in watch mode.
///
/// A one-shot run exits 1 when the fetch fails or yields no valid data.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<ExitCode> {
    let symbol = cli.symbol.clone().unwrap_or_default();
    let request = ChartRequest::new(symbol).with_exchange(cli.exchange.clone());
    // Fail before any network traffic on an unusable symbol
    request.provider_symbol()?;

    let provider = Arc::new(YahooChartProvider::with_config(
        config.api_base_url.clone(),
        config.request_timeout,
    ));
    let mut session = QuoteSession::new(provider, request);

    let mut stdout = std::io::stdout();
    let dashboard = DashboardOptions {
        chart: config.chart,
        refresh: None,
        color: color_enabled(stdout.is_terminal(), std::env::var_os("NO_COLOR")),
    };

    if cli.watch {
        let interval = cli.refresh_interval();
        let options = WatchOptions {
            interval,
            clear_screen: stdout.is_terminal(),
            dashboard: DashboardOptions {
                refresh: Some(interval),
                ..dashboard
            },
        };

        let stop = StopToken::new();
        cancel_on_ctrl_c(stop.clone());
        run_watch(&mut session, &options, &stop, &mut stdout).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = session.refresh().await;
    let frame = render_dashboard(&session.label(), &outcome, session.stats(), &dashboard);
    print!("{}", frame);

    match outcome {
        Ok(snapshot) if snapshot.has_data => Ok(ExitCode::SUCCESS),
        _ => Ok(ExitCode::FAILURE),
    }
}

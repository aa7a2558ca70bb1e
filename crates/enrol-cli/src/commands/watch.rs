//! `enrol watch`: listen to a live-reload dev server until it closes or
//! the user presses Ctrl-C.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use enrol_adapters::{MemoryPage, SystemClock, WsListener};
use enrol_core::{application::LiveReload, domain::StylesheetLink};

use crate::{
    cli::{OutputFormat, WatchArgs},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
    terminal::TerminalPage,
};

#[instrument(skip_all)]
pub fn execute(args: WatchArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let page_url = args.url.unwrap_or(config.live_reload.url);
    let listener = WsListener::for_page(&page_url)?;
    debug!(endpoint = %listener.endpoint(), "derived live-reload endpoint");

    let links = args
        .stylesheets
        .into_iter()
        .map(StylesheetLink::stylesheet)
        .collect();
    let page = MemoryPage::new(links, Arc::new(SystemClock::new()));
    let live = LiveReload::new(TerminalPage::new(page, output.clone()));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .with_cli_context(|| "failed to start the async runtime")?;

    let spinner = spinner(&output, &format!("Listening on {}", listener.endpoint()));
    let outcome = runtime.block_on(async {
        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                trigger.cancel();
            }
        });
        listener.listen(&live, shutdown).await
    });
    spinner.finish_and_clear();

    let summary = outcome?;
    output.success(&format!(
        "Live-reload session ended: {} message(s), {} applied",
        summary.received,
        summary.applied.len()
    ))?;
    Ok(())
}

/// Steady spinner on stderr; hidden unless a human is watching.
fn spinner(output: &OutputManager, message: &str) -> ProgressBar {
    if output.is_quiet()
        || output.format() != OutputFormat::Human
        || !std::io::stderr().is_terminal()
    {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::default_spinner());
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

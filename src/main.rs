mod domain;
mod clients;
mod catalog_source;
mod controller;
mod view;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod error;

use std::io::IsTerminal;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, CatalogSystem, Cli, Command, HELP};
use crate::catalog_source::{CatalogSource, HttpCatalog};
use crate::controller::FilterController;
use crate::view::{render_on_change, ImagePolicy, ListView};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let Cli { url_query, config } = Cli::parse();
    info!(base_url = %config.base_url, page_limit = config.page_limit, "Starting catalog browser");

    let source = HttpCatalog::new(&config.base_url, config.page_limit).map_err(|e| e.to_string())?;
    let system = CatalogSystem::new(source);

    let view = ListView::new(config.grid_columns, ImagePolicy::new(config.image_host.clone()));
    let stdout = std::io::stdout();
    let clear_screen = stdout.is_terminal();
    let renderer = tokio::spawn(render_on_change(
        view,
        stdout,
        clear_screen,
        system.products.subscribe(),
        system.categories.subscribe(),
        system.controller.subscribe_query(),
    ));

    // The positional argument plays the part of the page URL's query string.
    let url_query = url_query.unwrap_or_default();
    let span = tracing::info_span!("mount");
    system
        .controller
        .mount(&url_query)
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

    run_prompt(&system.controller).await;

    system.shutdown().await?;
    if let Err(e) = renderer.await {
        error!(error = %e, "Render task failed");
    }

    info!("Catalog browser exited");
    Ok(())
}

/// Reads commands from stdin until `quit` or end of input.
async fn run_prompt<S: CatalogSource>(controller: &FilterController<S>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "Failed to read input");
                break;
            }
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        let result = match command {
            Command::All => controller.show_all().await,
            Command::Category(slug) => controller.select_category(&slug).await,
            Command::Search(term) => controller.submit_search(&term).await,
            Command::Reload => controller.reload().await,
            Command::Url => {
                let query = controller.url_query();
                eprintln!("/{}", query);
                Ok(())
            }
            Command::Help => {
                eprintln!("{}", HELP);
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(e) = result {
            warn!(error = %e, "Command failed");
        }
    }
}

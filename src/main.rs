//! Binary entry point: resolve file locations, open the store, run the
//! Ratatui event loop, and close the store on the way out.
use anyhow::Context;
use coffee_catalog::config::Config;
use coffee_catalog::{logging, run_app, App, CatalogStore};
use log::{error, info};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_path)?;
    info!("starting coffee catalog with store {}", config.db_path.display());

    let store = CatalogStore::open(&config.db_path).inspect_err(|err| error!("{err}"))?;
    let mut app = App::new(store)?;

    let result = run_app(&mut app);
    if let Err(err) = &result {
        error!("event loop stopped: {err:#}");
    }

    app.into_store()
        .close()
        .context("failed to close the coffee catalog")?;
    info!("coffee catalog closed");
    result
}

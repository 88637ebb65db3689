//! # stockroom: inventory tree inspector
//!
//! Composition root that wires the storage adapter into the location store.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the location store, injecting the repository via its port trait
//! - Load every location and print the tree
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;
mod report;

use std::error::Error;
use std::process::ExitCode;

use stockroom_adapter_storage_sqlite_sqlx::SqliteLocationRepository;
use stockroom_app::services::location_store::LocationStore;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("stockroom: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .with_writer(std::io::stderr)
        .init();

    // Database
    let db = config.storage().build().await?;
    let repo = SqliteLocationRepository::new(db.pool().clone());

    // Store
    let store = LocationStore::new(repo);
    let _changes = store.subscribe(|locations| {
        tracing::debug!(count = locations.len(), "locations changed");
    });

    store.load_locations().await?;
    print!("{}", report::render(&store.locations()));

    Ok(())
}

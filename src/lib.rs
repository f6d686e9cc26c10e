#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;

pub use config::Config;

use config::{ConfigFairing, StoreFairing};
use logging::LoggerFairing;
use store::Store;

/// Assemble the server. The store is opened from config when it ignites.
pub fn build() -> Rocket<Build> {
    base_rocket().attach(StoreFairing)
}

/// Assemble the server around an already-open store.
pub(crate) fn rocket_for_store(store: Store) -> Rocket<Build> {
    base_rocket().manage(store)
}

fn base_rocket() -> Rocket<Build> {
    rocket::build()
        .attach(ConfigFairing)
        .attach(LoggerFairing)
        .mount("/api", api::routes())
        .register("/", api::catchers())
}

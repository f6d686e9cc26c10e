use log::{error, info};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Orbit, Rocket,
};
use serde::Deserialize;

use crate::store::{MongoStore, Store, StoreKind};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_options_per_question")]
    options_per_question: usize,
    #[serde(default = "default_max_page_size")]
    max_page_size: u32,
}

fn default_options_per_question() -> usize {
    4
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options_per_question: default_options_per_question(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl Config {
    /// How many options every quiz question must have.
    pub fn options_per_question(&self) -> usize {
        self.options_per_question
    }

    /// Largest page of job postings a client may request.
    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    fn check(&self) -> Result<(), String> {
        if self.options_per_question < 2 {
            return Err(format!(
                "`options_per_question` must be at least 2, got {}",
                self.options_per_question
            ));
        }
        if self.max_page_size == 0 {
            return Err("`max_page_size` must be at least 1".to_string());
        }
        Ok(())
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        if let Err(e) = config.check() {
            error!("Invalid application config: {e}");
            return Err(rocket);
        }
        info!(
            "Quiz questions have {} options, job pages hold at most {} postings",
            config.options_per_question, config.max_page_size
        );

        Ok(rocket.manage(config))
    }
}

/// Configuration for the record store.
#[derive(Debug, Deserialize)]
struct StoreConfig {
    #[serde(default)]
    store: StoreKind,
    // secrets
    db_uri: Option<String>,
    #[serde(default = "default_db_name")]
    db_name: String,
}

fn default_db_name() -> String {
    "quizboard".to_string()
}

/// A fairing that opens the configured [`Store`] at ignite, places it into
/// managed state, and closes it again on shutdown.
pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Store",
            kind: Kind::Ignite | Kind::Shutdown,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<StoreConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load store config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        let store = match config.store {
            StoreKind::Memory => {
                info!("Using an in-memory store; records will not survive a restart");
                Store::memory()
            }
            StoreKind::MongoDb => {
                let Some(uri) = config.db_uri else {
                    error!("`db_uri` must be set when `store` is \"mongodb\"");
                    return Err(rocket);
                };
                info!("Loaded database config, connecting...");
                match MongoStore::connect(&uri, &config.db_name).await {
                    Ok(store) => Store::MongoDb(store),
                    Err(e) => {
                        error!("Failed to connect to database: {e}");
                        return Err(rocket);
                    }
                }
            }
        };
        info!("...{} store online!", store.kind());

        Ok(rocket.manage(store))
    }

    async fn on_shutdown(&self, rocket: &Rocket<Orbit>) {
        if let Some(store) = rocket.state::<Store>() {
            store.close().await;
        }
    }
}

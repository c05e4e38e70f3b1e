//! Application state management
use enhancer_core::{Client, Config, Database, Result};

/// Client state shared by every command of one invocation
pub struct AppState {
    client: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            client: Client::new(config)?,
        })
    }

    /// State over an existing database; the path in `config` is ignored.
    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        Ok(Self {
            client: Client::with_database(config, db)?,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn with_client<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Client) -> Result<T>,
    {
        f(&self.client)
    }
}

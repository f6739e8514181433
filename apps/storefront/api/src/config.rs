use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_products::StoreConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 unless set
        let store = StoreConfig::from_env()?; // Unknown PRODUCT_STORE fails startup

        Ok(Self {
            app: app_info!(),
            server,
            store,
            environment,
        })
    }
}

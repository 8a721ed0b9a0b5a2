use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_products::ProductsConfig;

pub use core_config::Environment;

/// Service configuration composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub products: ProductsConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            database: PostgresConfig::from_env()?, // DATABASE_URL is required
            products: ProductsConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/inventory")),
                ("PORT", Some("3100")),
                ("PRODUCTS_LIST_ENVELOPE", Some("true")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "inventory_api");
                assert_eq!(config.database.url(), "postgresql://localhost/inventory");
                assert_eq!(config.server.port, 3100);
                assert!(config.products.list_envelope);
            },
        );
    }

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert!(Config::from_env().is_err());
        });
    }
}

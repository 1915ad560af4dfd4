use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_users::OrderServiceConfig;
use std::str::FromStr;

pub use core_config::Environment;

/// Where user records live
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserStore {
    #[default]
    Postgres,
    /// Process memory; records are lost on restart
    Memory,
}

impl FromStr for UserStore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(UserStore::Postgres),
            "memory" => Ok(UserStore::Memory),
            other => Err(format!("unknown store '{other}', expected 'postgres' or 'memory'")),
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: UserStore,
    /// Set only when `store` is [`UserStore::Postgres`]
    pub database: Option<PostgresConfig>,
    pub order_service: OrderServiceConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080
        let store = env_or_default("USER_STORE", "postgres")
            .parse()
            .map_err(|details| ConfigError::ParseError {
                key: "USER_STORE".to_string(),
                details,
            })?;
        let database = match store {
            UserStore::Postgres => Some(PostgresConfig::from_env()?), // DATABASE_URL required
            UserStore::Memory => None,
        };
        let order_service = OrderServiceConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            store,
            database,
            order_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_postgres_store_requires_database_url() {
        temp_env::with_vars(
            [("USER_STORE", None::<&str>), ("DATABASE_URL", None::<&str>)],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "DATABASE_URL"));
            },
        );
    }

    #[test]
    fn test_postgres_store_defaults() {
        temp_env::with_vars(
            [
                ("USER_STORE", None::<&str>),
                ("DATABASE_URL", Some("postgresql://localhost/users")),
                ("PORT", None::<&str>),
                ("ORDER_SERVICE_URL", None::<&str>),
                ("ORDER_SERVICE_TIMEOUT_SECS", None::<&str>),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.store, UserStore::Postgres);
                assert_eq!(config.server.port, 8080);
                assert_eq!(
                    config.database.map(|db| db.url),
                    Some("postgresql://localhost/users".to_string())
                );
                assert_eq!(config.order_service.base_url, "http://order-service/api/orders");
                assert_eq!(config.order_service.timeout, Duration::from_secs(5));
                assert_eq!(config.app.name, "user_service");
            },
        );
    }

    #[test]
    fn test_memory_store_needs_no_database() {
        temp_env::with_vars(
            [("USER_STORE", Some("Memory")), ("DATABASE_URL", None::<&str>)],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.store, UserStore::Memory);
                assert!(config.database.is_none());
            },
        );
    }

    #[test]
    fn test_unknown_store_is_rejected() {
        temp_env::with_var("USER_STORE", Some("mongo"), || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("USER_STORE"));
        });
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        temp_env::with_vars(
            [("USER_STORE", Some("memory")), ("PORT", Some("eighty"))],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("PORT"));
            },
        );
    }
}

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::path::PathBuf;

/// Socket directory prefix used by the managed Postgres platform.
pub const CLOUDSQL_SOCKET_ROOT: &str = "/cloudsql";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Host name, `host:port`, socket directory or managed instance name.
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: Option<String>,
    pub name: String,
    pub pool_size: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
}

/// Where the store lives once the configured host string is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbEndpoint {
    Socket(PathBuf),
    Tcp { host: String, port: u16 },
}

impl DatabaseSettings {
    /// Interprets the configured host string.
    ///
    /// A leading `/` is a socket directory and `host:port` is taken literally.
    /// Any other value with a colon is a managed instance connection name
    /// (`project:region:instance`) and maps to its socket directory under
    /// [`CLOUDSQL_SOCKET_ROOT`]. A bare host name uses the configured port.
    pub fn resolve_host(&self) -> DbEndpoint {
        let raw = self.host.trim();
        if raw.is_empty() {
            return DbEndpoint::Tcp {
                host: "localhost".to_string(),
                port: self.port,
            };
        }

        if raw.starts_with('/') {
            return DbEndpoint::Socket(PathBuf::from(raw));
        }

        if let Some((host, port)) = split_host_port(raw) {
            return DbEndpoint::Tcp {
                host: host.to_string(),
                port,
            };
        }

        if raw.contains(':') {
            return DbEndpoint::Socket(PathBuf::from(format!("{}/{}", CLOUDSQL_SOCKET_ROOT, raw)));
        }

        DbEndpoint::Tcp {
            host: raw.to_string(),
            port: self.port,
        }
    }

    /// Builds sqlx connection options for the resolved endpoint.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .username(&self.user)
            .database(&self.name);

        let options = match &self.password {
            Some(password) if !password.is_empty() => options.password(password),
            _ => options,
        };

        match self.resolve_host() {
            DbEndpoint::Socket(dir) => options.socket(dir),
            DbEndpoint::Tcp { host, port } => options.host(&host).port(port),
        }
    }
}

fn split_host_port(raw: &str) -> Option<(&str, u16)> {
    let (host, port) = raw.split_once(':')?;
    if host.is_empty() || port.contains(':') {
        return None;
    }
    port.parse::<u16>().ok().map(|port| (host, port))
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "postgres")?
            .set_default("database.name", "ledger")?
            .set_default("database.pool_size", 5)?
            .set_default("database.acquire_timeout_secs", 5)?
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("application.log_level", "info")?
            .set_default("application.log_format", "pretty")?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("database.host", env_var("SQL_CONN"))?
            .set_override_option("database.user", env_var("DB_USER"))?
            .set_override_option("database.password", env_var("DB_PASS"))?
            .set_override_option("database.name", env_var("DB_NAME"))?
            .set_override_option("application.port", env_var("PORT"))?;

        builder.build()?.try_deserialize()
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

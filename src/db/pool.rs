//! Connection pool settings and creation.

use std::str::FromStr;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

use crate::error::{DataError, Result};

/// Query run against a fresh pool to prove the server is reachable.
pub(crate) const LIVENESS_QUERY: &str = "SELECT 1";

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Postgres,
}

impl FromStr for Driver {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(DataError::UnsupportedDriver(s.to_string())),
        }
    }
}

/// Pool bounds and checkout behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Upper bound on open connections.
    pub max_total: u32,

    /// Idle connections kept warm between bursts. Surplus idle connections
    /// are closed once they have sat unused for `idle_timeout`.
    pub max_idle: u32,

    /// How long a caller waits for a free connection.
    pub acquire_timeout: Duration,

    pub idle_timeout: Duration,

    /// Ping each connection before handing it out.
    pub test_on_borrow: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_total: 16,
            max_idle: 8,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            test_on_borrow: true,
        }
    }
}

impl PoolSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_total == 0 {
            return Err(DataError::InvalidSettings(
                "max_total must be at least 1".to_string(),
            ));
        }
        if self.max_idle > self.max_total {
            return Err(DataError::InvalidSettings(format!(
                "max_idle ({}) exceeds max_total ({})",
                self.max_idle, self.max_total
            )));
        }
        Ok(())
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_total)
            .min_connections(self.max_idle)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .test_before_acquire(self.test_on_borrow)
    }
}

/// Everything needed to open the pool.
#[derive(Clone)]
pub struct ConnectionSettings {
    pub driver: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub pool: PoolSettings,
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("driver", &self.driver)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("pool", &self.pool)
            .finish()
    }
}

impl ConnectionSettings {
    pub fn new(
        driver: impl Into<String>,
        url: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            driver: driver.into(),
            url: url.into(),
            username,
            password,
            pool: PoolSettings::default(),
        }
    }

    pub fn with_pool(mut self, pool: PoolSettings) -> Self {
        self.pool = pool;
        self
    }

    /// Parse the URL and apply the explicit credentials on top of it.
    pub(crate) fn connect_options(&self) -> Result<PgConnectOptions> {
        let Driver::Postgres = self.driver.parse::<Driver>()?;

        let mut options = PgConnectOptions::from_str(&self.url)
            .map_err(|e| DataError::InvalidSettings(format!("bad database url: {e}")))?;

        if let Some(username) = &self.username {
            options = options.username(username);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }

        Ok(options)
    }
}

/// Create the pool and prove it works.
///
/// One connection is checked out, probed with the liveness query and
/// returned, so an unreachable server fails here rather than on first use.
pub(crate) async fn create_pool(settings: &ConnectionSettings) -> Result<PgPool> {
    settings.pool.validate()?;
    let options = settings.connect_options()?;

    info!(
        driver = %settings.driver,
        max_total = settings.pool.max_total,
        max_idle = settings.pool.max_idle,
        "configuring database pool"
    );

    let pool = settings.pool.pool_options().connect_lazy_with(options);

    let mut conn = pool.acquire().await.map_err(DataError::Connect)?;
    sqlx::query(LIVENESS_QUERY)
        .execute(&mut *conn)
        .await
        .map_err(DataError::Connect)?;
    drop(conn);

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_names_are_case_insensitive() {
        assert_eq!("postgres".parse::<Driver>().unwrap(), Driver::Postgres);
        assert_eq!("PostgreSQL".parse::<Driver>().unwrap(), Driver::Postgres);
        assert_eq!(" pg ".parse::<Driver>().unwrap(), Driver::Postgres);
    }

    #[test]
    fn unknown_driver_is_rejected() {
        let err = "mysql".parse::<Driver>().expect_err("mysql is not supported");
        assert!(matches!(err, DataError::UnsupportedDriver(name) if name == "mysql"));
    }

    #[test]
    fn default_pool_bounds() {
        let settings = PoolSettings::default();
        assert_eq!(settings.max_total, 16);
        assert_eq!(settings.max_idle, 8);
        assert!(settings.test_on_borrow);
        settings.validate().expect("defaults should be valid");
    }

    #[test]
    fn idle_above_total_is_invalid() {
        let settings = PoolSettings {
            max_total: 4,
            max_idle: 5,
            ..PoolSettings::default()
        };
        assert!(matches!(settings.validate(), Err(DataError::InvalidSettings(_))));
    }

    #[test]
    fn zero_total_is_invalid() {
        let settings = PoolSettings {
            max_total: 0,
            max_idle: 0,
            ..PoolSettings::default()
        };
        assert!(matches!(settings.validate(), Err(DataError::InvalidSettings(_))));
    }

    #[test]
    fn connect_options_reject_bad_url() {
        let settings = ConnectionSettings::new("postgres", "not a url", None, None);
        assert!(matches!(
            settings.connect_options(),
            Err(DataError::InvalidSettings(_))
        ));
    }

    #[test]
    fn connect_options_reject_unknown_driver() {
        let settings = ConnectionSettings::new("oracle", "postgres://localhost/scrum", None, None);
        assert!(matches!(
            settings.connect_options(),
            Err(DataError::UnsupportedDriver(_))
        ));
    }

    #[test]
    fn connect_options_accept_explicit_credentials() {
        let settings = ConnectionSettings::new(
            "postgres",
            "postgres://localhost:5432/scrum",
            Some("scrum".to_string()),
            Some("hunter2".to_string()),
        );
        settings.connect_options().expect("options should build");
    }

    #[test]
    fn debug_output_hides_password() {
        let settings = ConnectionSettings::new(
            "postgres",
            "postgres://localhost/scrum",
            Some("scrum".to_string()),
            Some("hunter2".to_string()),
        );
        let debug = format!("{settings:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn unreachable_server_fails_fast() {
        let settings = ConnectionSettings::new(
            "postgres",
            "postgres://scrum@127.0.0.1:1/scrum",
            None,
            None,
        )
        .with_pool(PoolSettings {
            max_total: 1,
            max_idle: 0,
            acquire_timeout: Duration::from_secs(2),
            ..PoolSettings::default()
        });

        let err = create_pool(&settings)
            .await
            .expect_err("nothing listens on port 1");
        assert!(matches!(err, DataError::Connect(_)));
    }
}

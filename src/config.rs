/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, VALKEY_URL, JWT, session, CORS など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Where members, stations, lines and favorites live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
        run_migrations: bool,
    },
    Memory,
}

/// Where session attributes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    Valkey { url: String },
    Memory,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub storage: StorageBackend,
    pub session: SessionBackend,
    pub session_ttl_seconds: u64,
    pub session_cookie_secure: bool,

    pub jwt_secret: String,
    pub auth_issuer: String,
    pub access_token_ttl_seconds: u64,
    pub access_token_leeway_seconds: u64,

    pub password_hash_cost: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // jwt_secret / database_url は出さない
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("auth_issuer", &self.auth_issuer)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("password_hash_cost", &self.password_hash_cost)
            .finish()
    }
}

fn env_parse<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        _ => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env_parse("PORT", 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let storage = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => StorageBackend::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10)?,
                run_migrations: env_parse("RUN_MIGRATIONS", true)?,
            },
            "memory" => StorageBackend::Memory,
            _ => return Err(ConfigError::Invalid("STORAGE_BACKEND")),
        };

        let session = match std::env::var("SESSION_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "valkey" | "redis" => SessionBackend::Valkey {
                url: std::env::var("VALKEY_URL").map_err(|_| ConfigError::Missing("VALKEY_URL"))?,
            },
            "memory" => SessionBackend::Memory,
            _ => return Err(ConfigError::Invalid("SESSION_BACKEND")),
        };

        let session_ttl_seconds = env_parse("SESSION_TTL_SECONDS", 1800)?;
        let session_cookie_secure = env_parse("SESSION_COOKIE_SECURE", app_env.is_production())?;

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.len() < 32 {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let auth_issuer = std::env::var("AUTH_ISSUER").unwrap_or_else(|_| "subway-api".into());
        let access_token_ttl_seconds = env_parse("ACCESS_TOKEN_TTL_SECONDS", 3600)?;
        let access_token_leeway_seconds = env_parse("ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;

        let password_hash_cost: u32 = env_parse("PASSWORD_HASH_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&password_hash_cost) {
            return Err(ConfigError::Invalid("PASSWORD_HASH_COST"));
        }

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            storage,
            session,
            session_ttl_seconds,
            session_cookie_secure,
            jwt_secret,
            auth_issuer,
            access_token_ttl_seconds,
            access_token_leeway_seconds,
            password_hash_cost,
        })
    }

    /// In-memory configuration used by tests and local tinkering.
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            app_env: AppEnv::Development,
            cors_allowed_origins: Vec::new(),
            storage: StorageBackend::Memory,
            session: SessionBackend::Memory,
            session_ttl_seconds: 1800,
            session_cookie_secure: false,
            jwt_secret: jwt_secret.into(),
            auth_issuer: "subway-api".to_string(),
            access_token_ttl_seconds: 3600,
            access_token_leeway_seconds: 60,
            password_hash_cost: 4,
        }
    }
}

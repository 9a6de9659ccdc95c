use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Bearer token verification settings.
///
/// Tokens are issued by the upstream identity provider and signed with a
/// shared HMAC secret; this service only verifies them.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub audience: String,
    pub jwt_leeway: Duration,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"***")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("jwt_leeway", &self.jwt_leeway)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Catalog presentation settings
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Number of available bikes highlighted on the home listing
    pub featured_bike_count: i64,
}

/// Read an optional variable, falling back to `default`, and parse it.
fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid value", key)),
        Err(_) => Ok(default),
    }
}

fn required_var(key: &str) -> Result<String, String> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{} environment variable is required", key))
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env(),
            catalog: CatalogConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("APP_PORT", 8080u16)?;

        // Comma-separated; "*" allows any origin
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            url: required_var("DATABASE_URL")?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_var("DATABASE_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_var(
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_var(
                "DATABASE_IDLE_TIMEOUT_SECS",
                Self::DEFAULT_IDLE_TIMEOUT_SECS,
            )?,
            max_lifetime_secs: parse_var(
                "DATABASE_MAX_LIFETIME_SECS",
                Self::DEFAULT_MAX_LIFETIME_SECS,
            )?,
        })
    }
}

impl AuthConfig {
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = required_var("AUTH_JWT_SECRET")?;
        let issuer = required_var("AUTH_ISSUER")?;
        let audience =
            env::var("AUTH_AUDIENCE").unwrap_or_else(|_| "bike-rental-api".to_string());
        let leeway_secs = parse_var("AUTH_JWT_LEEWAY_SECS", Self::DEFAULT_JWT_LEEWAY_SECS)?;

        Ok(Self {
            jwt_secret,
            issuer,
            audience,
            jwt_leeway: Duration::from_secs(leeway_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Self {
        // Empty credentials disable basic auth
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());

        Self {
            username,
            password,
            title: env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Bike Rental API".to_string()),
            version: env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string()),
            description: env::var("SWAGGER_DESCRIPTION")
                .unwrap_or_else(|_| "Bike catalog and booking API".to_string()),
        }
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl CatalogConfig {
    const DEFAULT_FEATURED_BIKE_COUNT: i64 = 3;

    pub fn from_env() -> Result<Self, String> {
        let featured_bike_count =
            parse_var("FEATURED_BIKE_COUNT", Self::DEFAULT_FEATURED_BIKE_COUNT)?;
        if featured_bike_count < 0 {
            return Err("FEATURED_BIKE_COUNT must not be negative".to_string());
        }
        Ok(Self {
            featured_bike_count,
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            featured_bike_count: Self::DEFAULT_FEATURED_BIKE_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials().as_deref(), Some("admin:secret"));
    }

    #[test]
    fn test_server_address() {
        let app = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origins: vec!["*".to_string()],
        };
        assert_eq!(app.server_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_auth_config_debug_hides_secret() {
        let auth = AuthConfig {
            jwt_secret: "super-secret".to_string(),
            issuer: "https://id.example.com".to_string(),
            audience: "bike-rental-api".to_string(),
            jwt_leeway: Duration::from_secs(60),
        };
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("https://id.example.com"));
    }
}

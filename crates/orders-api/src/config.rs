use anyhow::{Context, Result, anyhow};
use std::{fmt, str::FromStr};
use tracing::warn;

pub const DEFAULT_SECRET_KEY: &str = "development-testing";

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const GOOGLE_PEOPLE_URL: &str = "https://people.googleapis.com/v1/people/me";
const SMS_BASE_URL: &str = "https://api.africastalking.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Testing,
    Staging,
    Production,
}

impl AppEnvironment {
    pub fn database_url_var(&self) -> &'static str {
        match self {
            AppEnvironment::Development => "DEVELOPMENT_DATABASE_URL",
            AppEnvironment::Testing => "TEST_DATABASE_URL",
            AppEnvironment::Staging => "STAGING_DATABASE_URL",
            AppEnvironment::Production => "PRODUCTION_DATABASE_URL",
        }
    }

    pub fn is_debug(&self) -> bool {
        !matches!(self, AppEnvironment::Production)
    }
}

impl FromStr for AppEnvironment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "testing" => Ok(AppEnvironment::Testing),
            "staging" => Ok(AppEnvironment::Staging),
            "production" => Ok(AppEnvironment::Production),
            other => Err(anyhow!(
                "APP_ENV must be one of development, testing, staging, production, got '{other}'"
            )),
        }
    }
}

#[derive(Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub people_url: String,
}

#[derive(Clone)]
pub struct SmsConfig {
    pub username: String,
    pub api_key: String,
    pub sender_id: Option<String>,
    pub base_url: String,
}

#[derive(Clone)]
pub struct Config {
    pub app_env: AppEnvironment,
    pub debug: bool,
    pub database_url: String,
    pub secret_key: String,
    pub port: u16,
    pub base_url: String,
    pub run_migrations: bool,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub google: OAuthConfig,
    /// `None` sends confirmations to the log only.
    pub sms: Option<SmsConfig>,
    pub otel_endpoint: Option<String>,
    pub enable_file_log: bool,
}

const REDACTED: &str = "[redacted]";

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &REDACTED)
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("userinfo_url", &self.userinfo_url)
            .field("people_url", &self.people_url)
            .finish()
    }
}

impl fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsConfig")
            .field("username", &self.username)
            .field("api_key", &REDACTED)
            .field("sender_id", &self.sender_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_env", &self.app_env)
            .field("debug", &self.debug)
            .field("database_url", &REDACTED)
            .field("secret_key", &REDACTED)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("run_migrations", &self.run_migrations)
            .field("db_max_conn", &self.db_max_conn)
            .field("db_min_conn", &self.db_min_conn)
            .field("google", &self.google)
            .field("sms", &self.sms)
            .field("otel_endpoint", &self.otel_endpoint)
            .field("enable_file_log", &self.enable_file_log)
            .finish()
    }
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app_env = match var("APP_ENV") {
            Some(value) => value.parse::<AppEnvironment>()?,
            None => AppEnvironment::Development,
        };

        let url_var = app_env.database_url_var();
        let database_url = var(url_var)
            .or_else(|| var("DATABASE_URL"))
            .with_context(|| format!("Missing environment variable: {url_var} or DATABASE_URL"))?;

        let secret_key = match var("SECRET_KEY") {
            Some(secret) => secret,
            None => {
                if matches!(
                    app_env,
                    AppEnvironment::Staging | AppEnvironment::Production
                ) {
                    warn!("⚠️ SECRET_KEY is not set, falling back to the development key");
                }
                DEFAULT_SECRET_KEY.to_string()
            }
        };

        let port = var("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let base_url = var("BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        let run_migrations = match var("RUN_MIGRATIONS").as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let db_max_conn: u32 = var("DB_MAX_CONNECTION")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MAX_CONNECTION as u32")?;

        let db_min_conn: u32 = var("DB_MIN_CONNECTION")
            .unwrap_or_else(|| "1".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MIN_CONNECTION as u32")?;

        // google
        let google = OAuthConfig {
            client_id: var("GOOGLE_CLIENT_ID")
                .context("Missing environment variable: GOOGLE_CLIENT_ID")?,
            client_secret: var("GOOGLE_CLIENT_SECRET")
                .context("Missing environment variable: GOOGLE_CLIENT_SECRET")?,
            redirect_uri: format!("{base_url}/google-login"),
            auth_url: var("GOOGLE_AUTH_URL").unwrap_or_else(|| GOOGLE_AUTH_URL.to_string()),
            token_url: var("GOOGLE_TOKEN_URL").unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
            userinfo_url: var("GOOGLE_USERINFO_URL")
                .unwrap_or_else(|| GOOGLE_USERINFO_URL.to_string()),
            people_url: var("GOOGLE_PEOPLE_URL").unwrap_or_else(|| GOOGLE_PEOPLE_URL.to_string()),
        };

        // sms
        let sms = match (var("SMS_USERNAME"), var("SMS_API_KEY")) {
            (Some(username), Some(api_key)) => Some(SmsConfig {
                username,
                api_key,
                sender_id: var("SMS_SENDER_ID"),
                base_url: var("SMS_BASE_URL")
                    .unwrap_or_else(|| SMS_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
            }),
            (None, None) => None,
            _ => {
                return Err(anyhow!(
                    "SMS_USERNAME and SMS_API_KEY must be set together"
                ));
            }
        };

        let enable_file_log = var("ENABLE_FILE_LOG").is_some_and(|v| v == "true");

        Ok(Self {
            app_env,
            debug: app_env.is_debug(),
            database_url,
            secret_key,
            port,
            base_url,
            run_migrations,
            db_max_conn,
            db_min_conn,
            google,
            sms,
            otel_endpoint: var("OTEL_ENDPOINT"),
            enable_file_log,
        })
    }
}

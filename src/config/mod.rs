use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub supabase: SupabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. https://<ref>.supabase.co
    pub url: Option<String>,
    /// Public anon key, sent as both `apikey` and bearer token
    #[serde(skip_serializing)]
    pub anon_key: Option<String>,
    pub table: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Pre-rendered site output; served with an index.html fallback when present
    pub static_dir: String,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Supabase
        if let Ok(v) = env::var("PUBLIC_SUPABASE_URL") {
            self.supabase.url = Some(v.trim().to_string()).filter(|s| !s.is_empty());
        }
        if let Ok(v) = env::var("PUBLIC_SUPABASE_ANON_KEY") {
            self.supabase.anon_key = Some(v.trim().to_string()).filter(|s| !s.is_empty());
        }
        if let Ok(v) = env::var("DIAMANTES_TABLE") {
            if !v.trim().is_empty() {
                self.supabase.table = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("SUPABASE_TIMEOUT_SECS") {
            if let Some(secs) = parse_timeout_secs(&v) {
                self.supabase.timeout_secs = secs;
            }
        }

        // Server
        let port = env::var("DIAMANTES_PORT").ok().or_else(|| env::var("PORT").ok());
        if let Some(v) = port {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("STATIC_DIR") {
            self.server.static_dir = v;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Security
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            supabase: SupabaseConfig {
                url: None,
                anon_key: None,
                table: "diamantes".to_string(),
                timeout_secs: 30,
            },
            server: ServerConfig {
                port: 3000,
                static_dir: "build".to_string(),
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            supabase: SupabaseConfig {
                url: None,
                anon_key: None,
                table: "diamantes".to_string(),
                timeout_secs: 15,
            },
            server: ServerConfig {
                port: 3000,
                static_dir: "build".to_string(),
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:5173".to_string(), "tauri://localhost".to_string()],
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            supabase: SupabaseConfig {
                url: None,
                anon_key: None,
                table: "diamantes".to_string(),
                timeout_secs: 10,
            },
            server: ServerConfig {
                port: 3000,
                static_dir: "build".to_string(),
                enable_request_logging: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                // Desktop shell webview origins
                cors_origins: vec![
                    "tauri://localhost".to_string(),
                    "http://tauri.localhost".to_string(),
                    "https://tauri.localhost".to_string(),
                ],
            },
        }
    }
}

/// Positive seconds only; zero or garbage leaves the default in place
fn parse_timeout_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

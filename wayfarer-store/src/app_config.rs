use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub session_ttl_seconds: u64,
}

/// Administrator account seeded at startup if absent.
#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapConfig {
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("server.port", 3000_i64)?
            .set_default("auth.session_ttl_seconds", 10_800_i64)?
            .set_default("bootstrap.admin_email", "admin@wayfarer.local")?
            .set_default("bootstrap.admin_password", "change-me")?
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment file, selected by RUN_MODE
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // WAYFARER__SERVER__PORT=8080 style environment overrides
            .add_source(config::Environment::with_prefix("WAYFARER").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_key() {
        let config = Config::load().unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.session_ttl_seconds, 10_800);
        assert!(!config.bootstrap.admin_email.is_empty());
    }
}

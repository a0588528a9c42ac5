use std::{env, fmt};

use serde::Deserialize;
use tracing::info;

#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_env")]
    pub env: String, // file / server
    pub host: String,
    pub port: u16,
    pub prefix: Option<String>,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub jwt_secret: String,
    /// access token lifetime, in minutes
    pub jwt_exp: u16,
    /// refresh token lifetime, in minutes
    pub jwt_refresh_exp: u16,
    /// email confirmation token lifetime, in minutes
    #[serde(default = "default_confirmation_exp")]
    pub confirmation_exp: u16,
    #[serde(default)]
    pub auto_confirm_email: bool,
    pub log_dir: Option<String>,
}

fn default_env() -> String {
    "file".to_string()
}

fn default_confirmation_exp() -> u16 {
    24 * 60
}

// jwt_secret is never printed
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("env", &self.env)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("prefix", &self.prefix)
            .field("database_url", &self.database_url)
            .field("redis_url", &self.redis_url)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_exp", &self.jwt_exp)
            .field("jwt_refresh_exp", &self.jwt_refresh_exp)
            .field("confirmation_exp", &self.confirmation_exp)
            .field("auto_confirm_email", &self.auto_confirm_email)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

impl Config {
    pub fn log_dir(&self) -> String {
        self.log_dir.clone().unwrap_or("./logs".to_string())
    }
}

pub fn get_config() -> anyhow::Result<Config> {
    let env_var = env::var("env").unwrap_or("file".to_string());
    if env_var == "file" {
        info!("using .env file as environtment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environtment as environtment variable");
    }
    Ok(envy::from_env::<Config>()?)
}

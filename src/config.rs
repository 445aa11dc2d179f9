//! Runtime configuration.
//!
//! Every option is a command-line flag that falls back to an environment
//! variable, then to a default.

use clap::Parser;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_KEY: &str = "my-secret-api-key";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "shelf")]
#[command(about = "In-memory product catalog HTTP API")]
pub struct Config {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Value clients must send in the `x-api-key` header
    #[arg(long, env = "API_KEY", default_value = DEFAULT_API_KEY, hide_env_values = true)]
    pub api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            api_key: DEFAULT_API_KEY.to_owned(),
        }
    }
}

impl Config {
    /// `host:port`, ready for [`Server::bind`](crate::Server::bind).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

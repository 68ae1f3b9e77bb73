use std::{env, net::SocketAddr, str::FromStr};

use anyhow::{anyhow, bail, Context};
use log::LevelFilter;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://battleship.db";

/// Server settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub log_level: LevelFilter,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("$LISTEN_ADDR is not a socket address: {addr}"))?,
            None => SocketAddr::from(([0, 0, 0, 0], 3000)),
        };

        let log_level = match lookup("LOG_LEVEL") {
            Some(level) => LevelFilter::from_str(&level)
                .map_err(|_| anyhow!("$LOG_LEVEL is not a log level: {level}"))?,
            None => LevelFilter::Debug,
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(max) => max
                .parse::<u32>()
                .with_context(|| format!("$DATABASE_MAX_CONNECTIONS is not numeric: {max}"))?,
            None => 1,
        };
        if max_connections == 0 {
            bail!("$DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        Ok(Config {
            database_url,
            listen_addr,
            log_level,
            max_connections,
        })
    }
}

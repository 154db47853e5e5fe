use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ASSETS_DIR: &str = "web/dist";

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub assets_dir: PathBuf,
}

impl ServerConfig {
    /// Read `PORT` and `ASSETS_DIR`, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };
        let assets_dir = lookup("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));
        Ok(Self { port, assets_dir })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn index_file(&self) -> PathBuf {
        self.assets_dir.join("index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.index_file(), PathBuf::from("web/dist/index.html"));
    }

    #[test]
    fn test_overrides_and_bad_port() {
        let config = ServerConfig::from_lookup(|key| match key {
            "PORT" => Some("8080".into()),
            "ASSETS_DIR" => Some("/srv/race".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.addr().port(), 8080);
        assert_eq!(config.assets_dir, PathBuf::from("/srv/race"));

        assert!(ServerConfig::from_lookup(|_| Some("fast".into())).is_err());
    }
}

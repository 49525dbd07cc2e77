// src/config.rs
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_DATA_PATH: &str = "cost_data.xlsx";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: parse_port(env::var("PORT").ok().as_deref()),
            data_path: parse_data_path(env::var("COST_DATA_PATH").ok()),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn parse_data_path(value: Option<String>) -> PathBuf {
    value
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset_or_invalid() {
        assert_eq!(parse_port(None), 8050);
        assert_eq!(parse_port(Some("not-a-port")), 8050);
        assert_eq!(parse_port(Some("70000")), 8050);
        assert_eq!(parse_port(Some(" 9000 ")), 9000);
    }

    #[test]
    fn data_path_defaults_to_workbook_in_working_dir() {
        assert_eq!(parse_data_path(None), PathBuf::from("cost_data.xlsx"));
        assert_eq!(parse_data_path(Some("  ".to_string())), PathBuf::from("cost_data.xlsx"));
        assert_eq!(
            parse_data_path(Some("/srv/costs/exports".to_string())),
            PathBuf::from("/srv/costs/exports")
        );
    }

    #[test]
    fn binds_all_interfaces() {
        let config = Config {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8050,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        };
        assert_eq!(config.addr().to_string(), "0.0.0.0:8050");
    }
}

use crate::configuration::command_line::Opt;
use crate::configuration::constants::{defaults, env};
use crate::configuration::Error;
use config::{Config, Environment, File};
use serde_derive::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub chart: ChartSettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(with = "crate::configuration::deserialize::socket_addr")]
    pub bind: SocketAddr,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartSettings {
    pub title: String,
    /// Most reports drawn on the chart page; the CSV dump is never capped.
    pub report_limit: usize,
    pub point_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    /// Form field holding the JSON document in urlencoded uploads.
    #[serde(with = "crate::configuration::deserialize::non_empty")]
    pub field: String,
}

impl Settings {
    /// Defaults, then the optional file, then `PERFBOARD_*` variables, then
    /// command line overrides.
    pub fn load(options: &Opt) -> Result<Self, Error> {
        let mut config = Self::defaults()?;
        if let Some(file) = &options.file {
            config.merge(File::from(file.clone()))?;
        }
        config.merge(Environment::with_prefix(env::SETTINGS_PREFIX).separator(env::SETTINGS_SEPARATOR))?;

        if let Some(bind) = options.bind {
            config.set("server.bind", bind.to_string())?;
        }
        if let Some(database) = &options.database {
            config.set("storage.backend", "sqlite")?;
            config.set("storage.path", database.to_string_lossy().into_owned())?;
        }
        if options.in_memory {
            config.set("storage.backend", "memory")?;
        }

        let settings: Settings = config.try_into()?;
        settings.validate()
    }

    fn defaults() -> Result<Config, Error> {
        let mut config = Config::new();
        config
            .set_default("server.bind", defaults::BIND_ADDRESS)?
            .set_default("storage.backend", "sqlite")?
            .set_default("storage.path", defaults::DATABASE_PATH)?
            .set_default("chart.title", defaults::CHART_TITLE)?
            .set_default("chart.report_limit", defaults::CHART_REPORT_LIMIT)?
            .set_default("chart.point_size", defaults::CHART_POINT_SIZE)?
            .set_default("upload.field", defaults::UPLOAD_FIELD)?;
        Ok(config)
    }

    fn validate(self) -> Result<Self, Error> {
        if self.chart.report_limit == 0 {
            return Err(Error::Invalid("chart.report_limit must be greater than zero".to_owned()));
        }
        if self.chart.point_size == 0 {
            return Err(Error::Invalid("chart.point_size must be greater than zero".to_owned()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use structopt::StructOpt;

    fn opt(args: &[&str]) -> Opt {
        let mut full = vec!["perfboard"];
        full.extend_from_slice(args);
        Opt::from_iter_safe(full).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load(&opt(&[])).unwrap();
        assert_eq!(settings.server.bind, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(settings.storage.backend, StorageBackend::Sqlite);
        assert_eq!(settings.storage.path, PathBuf::from("perfboard.sqlite3"));
        assert_eq!(settings.chart.report_limit, 100);
        assert_eq!(settings.chart.point_size, 5);
        assert_eq!(settings.upload.field, "fileupload");
    }

    #[test]
    fn test_file_then_command_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perfboard.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nbind = \"0.0.0.0:9999\"\n[chart]\ntitle = \"MDTraj Performance\"\nreport_limit = 10\n[upload]\nfield = \"payload\""
        )
        .unwrap();

        let settings = Settings::load(&opt(&[path.to_str().unwrap(), "--in-memory"])).unwrap();
        assert_eq!(settings.server.bind, "0.0.0.0:9999".parse().unwrap());
        assert_eq!(settings.chart.title, "MDTraj Performance");
        assert_eq!(settings.chart.report_limit, 10);
        assert_eq!(settings.upload.field, "payload");
        assert_eq!(settings.storage.backend, StorageBackend::Memory);

        let settings = Settings::load(&opt(&[path.to_str().unwrap(), "-b", "127.0.0.1:1234"])).unwrap();
        assert_eq!(settings.server.bind, "127.0.0.1:1234".parse().unwrap());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in &[
            ("limit.toml", "[chart]\nreport_limit = 0\n"),
            ("bind.toml", "[server]\nbind = \"not an address\"\n"),
            ("field.toml", "[upload]\nfield = \"  \"\n"),
            ("backend.toml", "[storage]\nbackend = \"postgres\"\n"),
        ] {
            let path = dir.path().join(name);
            std::fs::write(&path, body).unwrap();
            let result = Settings::load(&opt(&[path.to_str().unwrap()]));
            assert!(result.is_err(), "{} was accepted", name);
        }
    }
}

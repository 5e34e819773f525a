//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[catalog]
source = csv
path = data/products.csv

[alerts]
margin_floor = 0.2

[web]
listen = 127.0.0.1:3000
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("catalog", "path"),
            Some("data/products.csv".to_string())
        );
        assert_eq!(
            adapter.get_string("web", "listen"),
            Some("127.0.0.1:3000".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[catalog]\nsource = demo\n").unwrap();
        assert_eq!(adapter.get_string("catalog", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[web]\nmax_sessions = 5\n").unwrap();
        assert_eq!(adapter.get_int("web", "max_sessions", 0), 5);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[web]\n").unwrap();
        assert_eq!(adapter.get_int("web", "missing", 42), 42);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[web]\nmax_sessions = abc\n").unwrap();
        assert_eq!(adapter.get_int("web", "max_sessions", 42), 42);
    }

    #[test]
    fn get_double_returns_value() {
        let adapter = FileConfigAdapter::from_string("[alerts]\nmargin_floor = 0.18\n").unwrap();
        assert_eq!(adapter.get_double("alerts", "margin_floor", 0.0), 0.18);
    }

    #[test]
    fn get_double_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[alerts]\n").unwrap();
        assert_eq!(adapter.get_double("alerts", "missing", 99.9), 99.9);
    }

    #[test]
    fn get_double_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[alerts]\nmargin_floor = not_a_number\n").unwrap();
        assert_eq!(adapter.get_double("alerts", "margin_floor", 99.9), 99.9);
    }

    #[test]
    fn get_bool_returns_true_values() {
        let adapter =
            FileConfigAdapter::from_string("[catalog]\na = true\nb = yes\nc = 1\n").unwrap();
        assert!(adapter.get_bool("catalog", "a", false));
        assert!(adapter.get_bool("catalog", "b", false));
        assert!(adapter.get_bool("catalog", "c", false));
    }

    #[test]
    fn get_bool_returns_false_values() {
        let adapter =
            FileConfigAdapter::from_string("[catalog]\na = false\nb = no\nc = 0\n").unwrap();
        assert!(!adapter.get_bool("catalog", "a", true));
        assert!(!adapter.get_bool("catalog", "b", true));
        assert!(!adapter.get_bool("catalog", "c", true));
    }

    #[test]
    fn get_bool_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[catalog]\n").unwrap();
        assert!(adapter.get_bool("catalog", "missing", true));
        assert!(!adapter.get_bool("catalog", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let content = "[catalog]\nsource = csv\npath = /data/products.csv\n";
        let file = create_temp_config(content);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("catalog", "path"),
            Some("/data/products.csv".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }

    #[test]
    fn handles_all_config_sections() {
        let content = r#"
[catalog]
source = demo

[pricing]
demand_up_max = 0.12

[alerts]
margin_floor = 0.2
deviation_ceiling = 0.15

[auth]
username = reviewer
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();

        assert_eq!(
            adapter.get_string("catalog", "source"),
            Some("demo".to_string())
        );
        assert_eq!(adapter.get_double("pricing", "demand_up_max", 0.0), 0.12);
        assert_eq!(adapter.get_double("alerts", "margin_floor", 0.0), 0.2);
        assert_eq!(
            adapter.get_string("auth", "username"),
            Some("reviewer".to_string())
        );
    }
}

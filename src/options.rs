use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};

/// Database engines the provisioning recipe knows how to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Database {
    Postgresql,
    Mysql,
}

impl Database {
    /// Maps an engine name to a supported engine, if any.
    ///
    /// Unrecognized names yield `None`: the run proceeds, engine fragments
    /// render empty, and the provisioning step is skipped.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "postgresql" => Some(Database::Postgresql),
            "mysql" => Some(Database::Mysql),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Postgresql => "postgresql",
            Database::Mysql => "mysql",
        }
    }
}

/// Option values accepted through `--options` as a JSON map.
///
/// Mirrors the option hash the Rails template DSL supplies; explicit CLI
/// flags win over values given here.
#[derive(Debug, Default, Deserialize)]
pub struct RawOptions {
    pub database: Option<String>,
    pub app_name: Option<String>,
}

/// The immutable configuration driving template and step selection.
///
/// Constructed once at startup and read-only for the rest of the run.
#[derive(Debug)]
pub struct Options {
    pub app_name: String,
    pub database: Option<Database>,
    /// Skip bundler and Rails generator invocations. Filesystem mutations
    /// and commits still happen.
    pub skip_install: bool,
}

impl Options {
    /// Resolves the final option set from CLI flags, the parsed `--options`
    /// map, and the application directory name.
    pub fn resolve(
        app_dir: &Path,
        app_name: Option<String>,
        database: Option<String>,
        raw: RawOptions,
        skip_install: bool,
    ) -> Result<Self> {
        let app_name = match app_name.or(raw.app_name) {
            Some(name) => name,
            None => app_dir
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
                .ok_or_else(|| Error::AppNameError {
                    app_dir: app_dir.display().to_string(),
                })?,
        };

        let database = match database.or(raw.database) {
            Some(name) => {
                let parsed = Database::parse(&name);
                if parsed.is_none() {
                    log::warn!(
                        "unsupported database engine '{}': provisioning step will be skipped",
                        name
                    );
                }
                parsed
            }
            None => {
                log::warn!("no database engine selected: provisioning step will be skipped");
                None
            }
        };

        Ok(Options { app_name, database, skip_install })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_supported_engines() {
        assert_eq!(Database::parse("postgresql"), Some(Database::Postgresql));
        assert_eq!(Database::parse("mysql"), Some(Database::Mysql));
    }

    #[test]
    fn test_parse_unsupported_engine() {
        assert_eq!(Database::parse("sqlite3"), None);
        assert_eq!(Database::parse(""), None);
        assert_eq!(Database::parse("Postgresql"), None);
    }

    #[test]
    fn test_resolve_defaults_app_name_from_directory() {
        let options = Options::resolve(
            &PathBuf::from("/tmp/myapp"),
            None,
            Some("postgresql".into()),
            RawOptions::default(),
            false,
        )
        .unwrap();
        assert_eq!(options.app_name, "myapp");
        assert_eq!(options.database, Some(Database::Postgresql));
    }

    #[test]
    fn test_resolve_explicit_flags_win_over_raw() {
        let raw = RawOptions {
            database: Some("mysql".into()),
            app_name: Some("from_json".into()),
        };
        let options = Options::resolve(
            &PathBuf::from("/tmp/myapp"),
            Some("from_flag".into()),
            Some("postgresql".into()),
            raw,
            false,
        )
        .unwrap();
        assert_eq!(options.app_name, "from_flag");
        assert_eq!(options.database, Some(Database::Postgresql));
    }

    #[test]
    fn test_resolve_falls_back_to_raw_options() {
        let raw = RawOptions {
            database: Some("mysql".into()),
            app_name: Some("from_json".into()),
        };
        let options =
            Options::resolve(&PathBuf::from("/tmp/myapp"), None, None, raw, false).unwrap();
        assert_eq!(options.app_name, "from_json");
        assert_eq!(options.database, Some(Database::Mysql));
    }

    #[test]
    fn test_resolve_unsupported_engine_is_none() {
        let options = Options::resolve(
            &PathBuf::from("/tmp/myapp"),
            None,
            Some("oracle".into()),
            RawOptions::default(),
            false,
        )
        .unwrap();
        assert_eq!(options.database, None);
    }
}

use std::{env, io};
use std::io::{BufRead, BufReader};
use std::fs::File;
use std::path::Path;

use crate::environment::DEFAULT_SEARCH_PATH;

/// Names a `key=value` file to load at startup.
pub const CONFIG_ENV: &str = "ANUBIS_CONFIG";
/// Overrides `verbose_errors` when set.
pub const VERBOSE_ENV: &str = "ANUBIS_VERBOSE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub search_path: Vec<String>,
    pub verbose_errors: bool,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "anubis> ".to_string(),
            search_path: DEFAULT_SEARCH_PATH.iter().map(|s| s.to_string()).collect(),
            verbose_errors: false,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let mut src = String::new();
        for line in BufReader::new(file).lines() {
            src.push_str(&line?);
            src.push('\n');
        }
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!("Line {}: No '=' found: {}", lineno + 1, line)));
            };

            match key.trim() {
                // the prompt keeps its surrounding spaces
                "prompt" => config.prompt = value.to_string(),
                "path" => config.search_path = value.split_whitespace().map(str::to_string).collect(),
                "verbose_errors" => match parse_bool(value) {
                    Some(b) => config.verbose_errors = b,
                    None => return Err(ConfigError::Parse(format!("Line {}: Invalid bool: {}", lineno + 1, line))),
                },
                k => return Err(ConfigError::Parse(format!("Line {}: Unknown key: {}", lineno + 1, k))),
            }
        }

        Ok(config)
    }
}

impl Config {
    /// Defaults, then the file named by `ANUBIS_CONFIG`, then `ANUBIS_VERBOSE`.
    /// A file that fails to load is logged and skipped.
    pub fn from_env() -> Config {
        let mut config = match env::var_os(CONFIG_ENV) {
            Some(path) => ConfigLoader::load_from_file(&path).unwrap_or_else(|e| {
                log::warn!("ignoring config {}: {}", Path::new(&path).display(), e);
                ConfigLoader::default_config()
            }),
            None => ConfigLoader::default_config(),
        };
        if let Some(verbose) = env::var(VERBOSE_ENV).ok().as_deref().and_then(parse_bool) {
            config.verbose_errors = verbose;
        }
        config
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_source_gives_defaults() {
        let config = ConfigLoader::load_from_str("").unwrap();
        assert_eq!(config, ConfigLoader::default_config());
        assert_eq!(config.search_path, vec!["/bin"]);
        assert!(!config.verbose_errors);
    }

    #[test]
    fn test_all_keys() {
        let src = "# comment\n\nprompt=$ \npath=/bin  /usr/bin\nverbose_errors=true\n";
        let config = ConfigLoader::load_from_str(src).unwrap();
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.search_path, vec!["/bin", "/usr/bin"]);
        assert!(config.verbose_errors);
    }

    #[test]
    fn test_empty_path_is_allowed() {
        let config = ConfigLoader::load_from_str("path=\n").unwrap();
        assert!(config.search_path.is_empty());
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = ConfigLoader::load_from_str("prompt=x\nbogus=1\n").unwrap_err();
        assert!(err.to_string().contains("Line 2"));
        let err = ConfigLoader::load_from_str("no equals sign").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = ConfigLoader::load_from_str("verbose_errors=maybe").unwrap_err();
        assert!(err.to_string().contains("Invalid bool"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "verbose_errors=1").unwrap();
        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert!(config.verbose_errors);

        let missing = ConfigLoader::load_from_file("/nonexistent/anubis.conf");
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}

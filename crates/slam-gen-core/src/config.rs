//! Configuration types for the configuration generator
//!
//! A [`GeneratorConfig`] is built once per generation run, drives exactly one
//! output (fresh file or in-place update) and is then discarded.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Output file designator meaning "standard output"
pub const STDOUT_DESIGNATOR: &str = "-";

/// Main generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Free-form label for this configuration
    #[serde(default)]
    pub name: String,

    /// Where generated text goes
    #[serde(default)]
    pub outputfile: OutputTarget,

    /// File copied verbatim before the managed section
    #[serde(default)]
    pub header: Option<PathBuf>,

    /// File copied verbatim after the managed section
    #[serde(default)]
    pub footer: Option<PathBuf>,

    /// Previously published files scanned for conflicting host names
    #[serde(default)]
    pub checkfile: Vec<PathBuf>,

    /// Target format and its options
    pub format: FormatConfig,
}

impl GeneratorConfig {
    /// Create a configuration for the given format, writing to standard output
    pub fn new(format: FormatConfig) -> Self {
        Self {
            name: String::new(),
            outputfile: OutputTarget::Stdout,
            header: None,
            footer: None,
            checkfile: Vec::new(),
            format,
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| crate::Error::file(path, e))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the label
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the output target
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.outputfile = output;
        self
    }

    /// Set the header source
    pub fn with_header(mut self, path: impl Into<PathBuf>) -> Self {
        self.header = Some(path.into());
        self
    }

    /// Set the footer source
    pub fn with_footer(mut self, path: impl Into<PathBuf>) -> Self {
        self.footer = Some(path.into());
        self
    }

    /// Add a check file
    pub fn with_checkfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkfile.push(path.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if let OutputTarget::File(path) = &self.outputfile {
            if path.as_os_str().is_empty() {
                return Err(crate::Error::config("Output file path cannot be empty"));
            }
        }

        for path in &self.checkfile {
            if path.as_os_str().is_empty() {
                return Err(crate::Error::config("Check file path cannot be empty"));
            }
        }

        self.format.validate()
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), output file: \"{}\"",
            self.name,
            self.format.type_name(),
            self.outputfile
        )
    }
}

/// Output destination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output (`-`)
    #[default]
    Stdout,
    /// A file on disk
    File(PathBuf),
}

impl OutputTarget {
    /// Parse the `outputfile` designator
    pub fn parse(value: &str) -> Self {
        if value == STDOUT_DESIGNATOR {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str(STDOUT_DESIGNATOR),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Serialize for OutputTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OutputTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(OutputTarget::parse(&value))
    }
}

/// Target format configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormatConfig {
    /// BIND forward zone records
    Bind {
        /// TTL written in every record
        #[serde(default = "default_timeout", alias = "ttl")]
        timeout: String,
    },

    /// BIND reverse (PTR) zone records
    #[serde(rename = "revbind", alias = "reverse_bind")]
    RevBind {
        /// TTL written in every record
        #[serde(default = "default_timeout", alias = "ttl")]
        timeout: String,
    },

    /// ISC dhcpd host declarations
    Dhcp {
        /// Domain emitted as `option domain-name`
        #[serde(default)]
        domain: Option<String>,
    },

    /// Quattor host/address list
    Quattor,
}

impl FormatConfig {
    /// BIND format with the default TTL
    pub fn bind() -> Self {
        FormatConfig::Bind {
            timeout: default_timeout(),
        }
    }

    /// Reverse BIND format with the default TTL
    pub fn rev_bind() -> Self {
        FormatConfig::RevBind {
            timeout: default_timeout(),
        }
    }

    /// DHCP format without a domain
    pub fn dhcp() -> Self {
        FormatConfig::Dhcp { domain: None }
    }

    /// Get the format type name
    pub fn type_name(&self) -> &'static str {
        match self {
            FormatConfig::Bind { .. } => "bind",
            FormatConfig::RevBind { .. } => "revbind",
            FormatConfig::Dhcp { .. } => "dhcp",
            FormatConfig::Quattor => "quattor",
        }
    }

    /// Validate the format options
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            FormatConfig::Bind { timeout } | FormatConfig::RevBind { timeout } => {
                if timeout.trim().is_empty() {
                    return Err(crate::Error::config(format!(
                        "{} timeout cannot be empty",
                        self.type_name()
                    )));
                }
                if timeout.contains(char::is_whitespace) {
                    return Err(crate::Error::config(format!(
                        "{} timeout cannot contain whitespace: '{}'",
                        self.type_name(),
                        timeout
                    )));
                }
                Ok(())
            }
            FormatConfig::Dhcp {
                domain: Some(domain),
            } if domain.trim().is_empty() => {
                Err(crate::Error::config("DHCP domain cannot be empty"))
            }
            FormatConfig::Dhcp { .. } | FormatConfig::Quattor => Ok(()),
        }
    }
}

fn default_timeout() -> String {
    "1D".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_label_format_and_output() {
        let config = GeneratorConfig::new(FormatConfig::dhcp()).with_name("newgen");
        assert_eq!(config.to_string(), "newgen (dhcp), output file: \"-\"");

        let config = GeneratorConfig::new(FormatConfig::bind())
            .with_name("zone")
            .with_output(OutputTarget::parse("/etc/bind/db.example"));
        assert_eq!(
            config.to_string(),
            "zone (bind), output file: \"/etc/bind/db.example\""
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "name": "rev",
            "outputfile": "/var/named/rev.zone",
            "checkfile": ["/var/named/legacy.zone"],
            "format": { "type": "revbind", "ttl": "6H" }
        }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.outputfile,
            OutputTarget::File(PathBuf::from("/var/named/rev.zone"))
        );
        assert_eq!(config.header, None);
        assert_eq!(config.checkfile.len(), 1);
        assert_eq!(
            config.format,
            FormatConfig::RevBind {
                timeout: "6H".to_string()
            }
        );

        let json = r#"{ "format": { "type": "bind" } }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.outputfile, OutputTarget::Stdout);
        assert_eq!(config.format, FormatConfig::bind());
    }

    #[test]
    fn output_target_round_trips_through_json() {
        let config = GeneratorConfig::new(FormatConfig::Quattor)
            .with_output(OutputTarget::parse("out.tpl"));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""outputfile":"out.tpl""#), "got: {json}");
        let back: GeneratorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn validation_rejects_bad_options() {
        let config = GeneratorConfig::new(FormatConfig::Bind {
            timeout: " ".to_string(),
        });
        assert!(config.validate().is_err());

        let config = GeneratorConfig::new(FormatConfig::Dhcp {
            domain: Some(String::new()),
        });
        assert!(config.validate().is_err());

        let config = GeneratorConfig::new(FormatConfig::Quattor)
            .with_output(OutputTarget::File(PathBuf::new()));
        assert!(config.validate().is_err());

        let config = GeneratorConfig::new(FormatConfig::Dhcp {
            domain: Some("foo.example".to_string()),
        });
        assert!(config.validate().is_ok());
    }
}

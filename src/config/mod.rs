use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use serde::Deserialize;

use crate::config::error::ConfigError;
use crate::config::error::ConfigError::{
    InvalidPort, Malformed, MissingFile, MissingKeys, Unreadable,
};
use crate::template::TemplateDescriptor;
use crate::template::error::TemplateError;
use crate::template::registry::TemplateRegistry;

pub mod arguments;
pub mod error;

type Result<T, E = ConfigError> = std::result::Result<T, E>;

pub const DEFAULT_SMTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Shown to the user when the config file can't be used.
pub const SAMPLE_CONFIG: &str = r#"{
  "email": "youremail@example.com",
  "app_password": "your_app_password",
  "smtp_server": "smtp.gmail.com",
  "smtp_port": 587
}"#;

const EMAIL_KEY: &str = "email";
const APP_PASSWORD_KEY: &str = "app_password";
const SMTP_SERVER_KEY: &str = "smtp_server";
const SMTP_PORT_KEY: &str = "smtp_port";

#[derive(Clone, Getters)]
pub struct SmtpConfig {
    sender_address: String,
    sender_name: Option<String>,
    password: String,
    host: String,
    port: u16,
    timeout: Duration,
}

impl Debug for SmtpConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("sender_address", &self.sender_address)
            .field("sender_name", &self.sender_name)
            .field("password", &"********")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
impl SmtpConfig {
    pub fn new_test() -> Self {
        Self::new_test_with_server("sandbox.smtp.mailtrap.io", 587, DEFAULT_SMTP_TIMEOUT)
    }

    pub fn new_test_without_sender_name() -> Self {
        Self {
            sender_name: None,
            ..Self::new_test()
        }
    }

    pub fn new_test_with_server(host: &str, port: u16, timeout: Duration) -> Self {
        Self {
            sender_address: "sender@address.com".to_owned(),
            sender_name: Some("Sender".to_owned()),
            password: "s3cr3t-app-password".to_owned(),
            host: host.to_owned(),
            port,
            timeout,
        }
    }
}

#[derive(Debug, Getters)]
pub struct Config {
    smtp: SmtpConfig,
    output_dir: Option<PathBuf>,
    registry: TemplateRegistry,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    email: Option<String>,
    app_password: Option<String>,
    smtp_server: Option<String>,
    smtp_port: Option<Port>,
    sender_name: Option<String>,
    output_dir: Option<PathBuf>,
    timeout_seconds: Option<u64>,
    templates: Option<BTreeMap<String, TemplateDescriptor>>,
    default_group: Option<String>,
}

/// The port is sometimes written as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Port {
    Number(u16),
    Text(String),
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MissingFile(path.to_path_buf()),
        _ => Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_config(&content, path)
}

fn parse_config(content: &str, path: &Path) -> Result<Config> {
    let file: ConfigFile = serde_json::from_str(content).map_err(|source| Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let email = non_blank(file.email);
    let app_password = file.app_password.filter(|password| !password.is_empty());
    let smtp_server = non_blank(file.smtp_server);
    let missing_keys: Vec<&'static str> = [
        (EMAIL_KEY, email.is_none()),
        (APP_PASSWORD_KEY, app_password.is_none()),
        (SMTP_SERVER_KEY, smtp_server.is_none()),
        (SMTP_PORT_KEY, file.smtp_port.is_none()),
    ]
    .into_iter()
    .filter_map(|(key, missing)| missing.then_some(key))
    .collect();
    let (Some(email), Some(app_password), Some(smtp_server), Some(smtp_port)) =
        (email, app_password, smtp_server, file.smtp_port)
    else {
        return Err(MissingKeys(missing_keys));
    };

    let registry = build_registry(file.templates, file.default_group)?;
    registry.validate()?;

    Ok(Config {
        smtp: SmtpConfig {
            sender_address: email,
            sender_name: non_blank(file.sender_name),
            password: app_password,
            host: smtp_server,
            port: parse_port(smtp_port)?,
            timeout: file
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_SMTP_TIMEOUT),
        },
        output_dir: file.output_dir,
        registry,
    })
}

/// No mapping means the default template for everyone.
/// So does a mapping with a single template, unless a default group is explicitly set.
fn build_registry(
    templates: Option<BTreeMap<String, TemplateDescriptor>>,
    default_group: Option<String>,
) -> Result<TemplateRegistry, TemplateError> {
    match templates {
        None => Ok(TemplateRegistry::single(TemplateDescriptor::default())),
        Some(mut templates) if templates.len() == 1 && default_group.is_none() => {
            let (_, descriptor) = templates.pop_first().ok_or(TemplateError::EmptyRegistry)?;
            Ok(TemplateRegistry::single(descriptor))
        }
        Some(templates) => TemplateRegistry::grouped(templates, default_group),
    }
}

fn parse_port(port: Port) -> Result<u16> {
    let port = match port {
        Port::Number(port) => Some(port),
        Port::Text(text) => text.trim().parse::<u16>().ok(),
    };
    match port {
        Some(port) if port != 0 => Ok(port),
        _ => Err(InvalidPort(format!("{port:?}"))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

//! Container configuration from a TOML file, environment and CLI flags.
//!
//! ```toml
//! tag = "2.00.045.00.20200121.1"
//! password = "RandomPassword1"
//! init_script = "sql/init_hana.sql"
//! accept_license = true
//! startup_timeout = "15m"
//! ```

mod duration;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use db_container::DockerImageName;
use serde::{Deserialize, Serialize};

pub use duration::parse_duration;

use crate::image::{HanaImage, IMAGE};

/// Settings for a HANA container. Every field is optional; unset fields keep
/// the image defaults.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HanaConfig {
    /// Image repository (default: store/saplabs/hanaexpress)
    #[arg(long, env = "HANA_IMAGE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Image tag
    #[arg(long, env = "HANA_TAG")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// SYSTEM user password
    #[arg(long, env = "HANA_PASSWORD")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// SQL script to run after startup
    #[arg(long, value_name = "PATH", env = "HANA_INIT_SCRIPT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_script: Option<PathBuf>,

    /// Accept the SAP HANA Express license
    #[arg(long, env = "HANA_ACCEPT_LICENSE")]
    pub accept_license: bool,

    /// Startup timeout ("600", "600s", "10m", "1h")
    #[arg(long, env = "HANA_STARTUP_TIMEOUT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_timeout: Option<String>,
}

impl HanaConfig {
    /// Reads a TOML configuration file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Layers `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: HanaConfig) -> Self {
        Self {
            image: overrides.image.or(self.image),
            tag: overrides.tag.or(self.tag),
            password: overrides.password.or(self.password),
            init_script: overrides.init_script.or(self.init_script),
            accept_license: overrides.accept_license || self.accept_license,
            startup_timeout: overrides.startup_timeout.or(self.startup_timeout),
        }
    }

    /// Builds the container configuration, validating image name, password
    /// and timeout.
    pub fn into_image(self) -> anyhow::Result<HanaImage> {
        let repository = self.image.as_deref().unwrap_or(IMAGE);
        let mut name = DockerImageName::parse(repository)
            .with_context(|| format!("Invalid image: {repository}"))?;
        if let Some(tag) = &self.tag {
            name = name
                .with_tag(tag)
                .with_context(|| format!("Invalid image tag: {tag}"))?;
        } else if self.image.is_none() {
            name = HanaImage::default().image_name().clone();
        }

        let mut image = HanaImage::new(name);
        if let Some(password) = self.password {
            image = image.with_password(password)?;
        }
        if let Some(init_script) = self.init_script {
            image = image.with_init_script(init_script);
        }
        if self.accept_license {
            image = image.accept_license();
        }
        if let Some(timeout) = &self.startup_timeout {
            image = image.with_startup_timeout(parse_duration(timeout)?);
        }
        Ok(image)
    }
}

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Configuration options

#[cfg(feature = "serde")] use super::Format;
use super::{AnimationConfig, Error};
#[cfg(feature = "serde")] use crate::util::warn_about_error;
use std::env::var;
use std::path::PathBuf;

/// Config mode
///
/// See [`Options::from_env`] documentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConfigMode {
    /// Read-only mode
    #[default]
    Read,
    /// Read on start, write back changes
    ReadWrite,
    /// Write out default config without reading
    WriteDefault,
}

impl ConfigMode {
    /// Parse a mode name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "READ" => Some(ConfigMode::Read),
            "READWRITE" => Some(ConfigMode::ReadWrite),
            "WRITEDEFAULT" => Some(ConfigMode::WriteDefault),
            _ => None,
        }
    }
}

/// Where and how animation config is loaded
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Options {
    /// Config file path. Default: empty (no file). See `SHEEN_CONFIG` doc.
    pub config_path: PathBuf,
    /// Config mode. Default: Read.
    pub config_mode: ConfigMode,
}

impl Options {
    /// Construct a new instance, reading from environment variables
    ///
    /// The `SHEEN_CONFIG` variable, if given, provides a path to the
    /// animation config file. Its format is guessed from the file extension
    /// (`json`, `toml`, `yaml`, `ron`; each requires the matching feature).
    /// If not given, default configuration is used.
    ///
    /// The `SHEEN_CONFIG_MODE` variable determines the read/write mode
    /// (case-insensitive):
    ///
    /// -   `Read` (default): read-only
    /// -   `ReadWrite`: read on start-up, write back if changed
    /// -   `WriteDefault`: write default configuration to the config path,
    ///     overwriting any existing file
    pub fn from_env() -> Self {
        let mut options = Options::default();

        if let Ok(v) = var("SHEEN_CONFIG") {
            options.config_path = v.into();
        }

        if let Ok(v) = var("SHEEN_CONFIG_MODE") {
            match ConfigMode::parse(&v) {
                Some(mode) => options.config_mode = mode,
                None => {
                    log::error!(target: "sheen_core::config", "from_env: bad var SHEEN_CONFIG_MODE={v}");
                    log::error!(target: "sheen_core::config", "from_env: supported config modes: READ, READWRITE, WRITEDEFAULT");
                }
            }
        }

        options
    }

    /// Load animation config
    ///
    /// Without feature "serde" or a config path, this returns defaults.
    pub fn read_config(&self) -> Result<AnimationConfig, Error> {
        #[cfg(feature = "serde")]
        if !self.config_path.as_os_str().is_empty() {
            return match self.config_mode {
                ConfigMode::Read | ConfigMode::ReadWrite => {
                    Ok(Format::guess_and_read_path(&self.config_path)?)
                }
                ConfigMode::WriteDefault => {
                    let config = AnimationConfig::default();
                    if let Err(error) = Format::guess_and_write_path(&self.config_path, &config) {
                        warn_about_error("failed to write default animation config", &error);
                    }
                    Ok(config)
                }
            };
        }

        Ok(Default::default())
    }

    /// Save config if in read-write mode and changed
    pub fn write_config(&self, _config: &AnimationConfig) -> Result<(), Error> {
        #[cfg(feature = "serde")]
        if self.config_mode == ConfigMode::ReadWrite
            && !self.config_path.as_os_str().is_empty()
            && _config.is_dirty()
        {
            Format::guess_and_write_path(&self.config_path, _config)?;
        }

        Ok(())
    }
}

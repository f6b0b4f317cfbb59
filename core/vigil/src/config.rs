//! Loading the counter configuration from TOML files.
//!
//! The [`Loader`] reads a TOML file and returns it as a [`toml::Table`],
//! which the caller then deserializes into its own configuration structure.
//! When the file does not exist, a [`DefaultConfigProvider`] can supply the
//! default configuration and optionally write it to the file, so that the
//! first run of an application leaves an editable config behind.

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use error::{LoadError, LoadErrorCause};

/// Loads a configuration from a TOML file.
pub struct Loader<'d> {
    file: PathBuf,
    default_provider: Option<Box<dyn DefaultConfigProvider + 'd>>,
    save_default: bool,
    overrides: Option<toml::Table>,
}

/// Provides the default configuration to use when the config file is missing.
pub trait DefaultConfigProvider {
    fn default_config(&self) -> anyhow::Result<String>;
}

impl<'d> Loader<'d> {
    /// Creates a new `Loader` that will read `config_file` on [`load`](Self::load).
    pub fn parse_file<P: Into<PathBuf>>(config_file: P) -> Self {
        Self {
            file: config_file.into(),
            default_provider: None,
            save_default: false,
            overrides: None,
        }
    }

    /// If the configuration file does not exist, use the provider's default.
    ///
    /// Set `save_to_file` to `true` to write the default config to the file
    /// specified by [`parse_file`](Self::parse_file).
    pub fn or_default<D: DefaultConfigProvider + 'd>(mut self, default_provider: D, save_to_file: bool) -> Self {
        self.default_provider = Some(Box::new(default_provider));
        self.save_default = save_to_file;
        self
    }

    /// Overrides the content of the configuration by [merging](merge_override)
    /// it with another config.
    ///
    /// Multiple overrides can be set. The overrides are applied in order.
    pub fn with_override(mut self, config_override: toml::Table) -> Self {
        match &mut self.overrides {
            Some(existing) => merge_override(existing, config_override),
            None => self.overrides = Some(config_override),
        }
        self
    }

    /// Loads the configuration with the provided settings.
    pub fn load(mut self) -> Result<toml::Table, LoadError> {
        self.load_impl().map_err(|e| LoadError {
            config_file: self.file,
            kind: e,
        })
    }

    fn load_impl(&mut self) -> Result<toml::Table, LoadErrorCause> {
        let config_content = self.read_config_or_default()?;
        let mut parsed_config = toml::Table::from_str(&config_content)?;
        if let Some(overrides) = self.overrides.take() {
            merge_override(&mut parsed_config, overrides);
        }
        Ok(parsed_config)
    }

    fn read_config_or_default(&mut self) -> Result<String, LoadErrorCause> {
        match std::fs::read_to_string(&self.file) {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // no config file, try the default
                if let Some(default_provider) = self.default_provider.take() {
                    log::info!(
                        "config file {} not found, using the default configuration",
                        self.file.display()
                    );
                    let default_content = default_provider
                        .default_config()
                        .map_err(LoadErrorCause::DefaultProvider)?;

                    // save the default if the option is enabled
                    if self.save_default {
                        std::fs::write(&self.file, &default_content).map_err(LoadErrorCause::DefaultWrite)?;
                    }

                    Ok(default_content)
                } else {
                    // no default
                    Err(LoadErrorCause::Read(e))
                }
            }
            Err(e) => Err(LoadErrorCause::Read(e)),
        }
    }
}

impl<'f, F: Fn() -> anyhow::Result<toml::Table> + 'f> DefaultConfigProvider for F {
    fn default_config(&self) -> anyhow::Result<String> {
        let table = self()?;
        Ok(toml::ser::to_string_pretty(&toml::Value::Table(table))?)
    }
}

/// Merges two toml tables by overriding the content of `original`
/// with the content of `overrider`.
///
/// This function performs a **deep merge**: sub-tables present on both sides
/// are merged key by key instead of being replaced wholesale.
pub fn merge_override(original: &mut toml::Table, overrider: toml::Table) {
    for (key, value) in overrider.into_iter() {
        match original.entry(key) {
            toml::map::Entry::Vacant(vacant_entry) => {
                vacant_entry.insert(value);
            }
            toml::map::Entry::Occupied(mut occupied_entry) => {
                let existing_value = occupied_entry.get_mut();
                match (existing_value, value) {
                    (toml::Value::Table(map), toml::Value::Table(map_override)) => {
                        merge_override(map, map_override);
                    }
                    (_, value) => {
                        occupied_entry.insert(value);
                    }
                };
            }
        };
    }
}

pub mod error {
    use std::{io, path::PathBuf};
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("could not load config from '{config_file}'")]
    pub struct LoadError {
        pub config_file: PathBuf,
        #[source]
        pub(super) kind: LoadErrorCause,
    }

    #[derive(Error, Debug)]
    pub(super) enum LoadErrorCause {
        #[error("read failed")]
        Read(#[source] io::Error),
        #[error("default provider returned an error")]
        DefaultProvider(#[source] anyhow::Error),
        #[error("write (of default config) failed")]
        DefaultWrite(#[source] io::Error),
        #[error("invalid TOML config")]
        InvalidToml(#[from] toml::de::Error),
    }
}

//! Configurable-setting descriptors owned by script descriptors.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

bitflags! {
    /// Behavior flags a script may attach to one of its settings.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ConfigFlags: u8 {
        /// Value may be picked at random when the script itself is a random pick.
        const RANDOM = 0x1;
        /// Value is a boolean toggle rather than a numeric range.
        const BOOLEAN = 0x2;
        /// Value may be changed while the simulation is running.
        const INGAME = 0x4;
        /// Value is only shown when developer tools are enabled.
        const DEVELOPER = 0x8;
    }
}

/// Modern token spellings followed by the legacy aliases older script
/// declarations still use. Both columns resolve to identical flag values.
const FLAG_TOKENS: [(&str, ConfigFlags); 9] = [
    ("CONFIG_NONE", ConfigFlags::empty()),
    ("CONFIG_RANDOM", ConfigFlags::RANDOM),
    ("CONFIG_BOOLEAN", ConfigFlags::BOOLEAN),
    ("CONFIG_INGAME", ConfigFlags::INGAME),
    ("CONFIG_DEVELOPER", ConfigFlags::DEVELOPER),
    ("AICONFIG_NONE", ConfigFlags::empty()),
    ("AICONFIG_RANDOM", ConfigFlags::RANDOM),
    ("AICONFIG_BOOLEAN", ConfigFlags::BOOLEAN),
    ("AICONFIG_INGAME", ConfigFlags::INGAME),
];

impl ConfigFlags {
    /// Resolves a declared flag token, accepting the legacy alias spellings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFlagToken`] for any token outside the table.
    pub fn from_token(token: &str) -> Result<Self> {
        FLAG_TOKENS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, flags)| *flags)
            .ok_or_else(|| Error::UnknownFlagToken {
                token: token.to_owned(),
            })
    }
}

/// One user-tunable setting belonging to a script descriptor.
///
/// String fields are independently owned so the item can outlive the
/// transient registration call that produced it; `Clone` deep-copies them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    name: String,
    description: String,
    #[serde(with = "bitflags::serde")]
    flags: ConfigFlags,
    default_value: i32,
    min_value: i32,
    max_value: i32,
}

impl ConfigItem {
    /// Starts building a config item with the given unique name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ConfigItemBuilder {
        ConfigItemBuilder {
            name: name.into(),
            description: None,
            flags: ConfigFlags::empty(),
            default_value: 0,
            min_value: 0,
            max_value: 0,
        }
    }

    /// Returns the unique setting name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the behavior flags.
    #[must_use]
    pub const fn flags(&self) -> ConfigFlags {
        self.flags
    }

    /// Returns the default value.
    #[must_use]
    pub const fn default_value(&self) -> i32 {
        self.default_value
    }

    /// Returns the lowest accepted value.
    #[must_use]
    pub const fn min_value(&self) -> i32 {
        self.min_value
    }

    /// Returns the highest accepted value.
    #[must_use]
    pub const fn max_value(&self) -> i32 {
        self.max_value
    }
}

/// Builder for [`ConfigItem`].
#[derive(Debug)]
pub struct ConfigItemBuilder {
    name: String,
    description: Option<String>,
    flags: ConfigFlags,
    default_value: i32,
    min_value: i32,
    max_value: i32,
}

impl ConfigItemBuilder {
    /// Sets the human-readable description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the behavior flags.
    #[must_use]
    pub fn flags(mut self, flags: ConfigFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: i32) -> Self {
        self.default_value = value;
        self
    }

    /// Sets the accepted value range.
    #[must_use]
    pub fn range(mut self, min: i32, max: i32) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Finalises the config item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfigItem`] when the name is empty, the range
    /// is inverted, or the default falls outside the declared range.
    pub fn build(self) -> Result<ConfigItem> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfigItem {
                reason: "setting name cannot be empty".into(),
            });
        }
        if self.min_value > self.max_value {
            return Err(Error::InvalidConfigItem {
                reason: format!(
                    "setting `{}` declares min {} above max {}",
                    self.name, self.min_value, self.max_value
                ),
            });
        }
        if self.default_value < self.min_value || self.default_value > self.max_value {
            return Err(Error::InvalidConfigItem {
                reason: format!(
                    "setting `{}` default {} outside range {}..={}",
                    self.name, self.default_value, self.min_value, self.max_value
                ),
            });
        }

        Ok(ConfigItem {
            name: self.name,
            description: self.description.unwrap_or_default(),
            flags: self.flags,
            default_value: self.default_value,
            min_value: self.min_value,
            max_value: self.max_value,
        })
    }
}

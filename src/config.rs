//! Naming conventions shared with the downstream C++ build.
//!
//! Every string the generator matches on or emits lives here. The defaults
//! are what the MKLDNN plugin's `*_subset.h` macros expect; a JSON file can
//! override any subset of fields.

use crate::error::{Result, StatError};
use serde::Deserialize;
use std::path::Path;

/// Field-0 tags identifying the three record categories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DomainTags {
    pub scope: String,
    pub switch: String,
    pub factory: String,
}

impl Default for DomainTags {
    fn default() -> Self {
        Self {
            scope: "CC0MKLDNNPlugin".to_string(),
            switch: "CC1MKLDNNPlugin".to_string(),
            factory: "CC2MKLDNNPlugin".to_string(),
        }
    }
}

/// Symbol prefixes of the emitted `#define`s, one per record category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MacroPrefixes {
    pub scope: String,
    pub switch: String,
    pub factory: String,
}

impl Default for MacroPrefixes {
    fn default() -> Self {
        Self {
            scope: "CC0MKLDNNPlugin".to_string(),
            switch: "CC1MKLDNNPlugin".to_string(),
            factory: "CC2MKLDNNPlugin".to_string(),
        }
    }
}

/// Sub-field 0 of a factory record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActionTags {
    pub register: String,
    pub create: String,
}

impl Default for ActionTags {
    fn default() -> Self {
        Self {
            register: "REG".to_string(),
            create: "CREATE".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Conventions {
    pub domains: DomainTags,
    pub actions: ActionTags,
    /// Joins switch name/case and factory sub-fields inside field 1.
    pub delimiter: char,
    /// Macro prefixes; same strings as the domain tags unless overridden.
    pub prefixes: MacroPrefixes,
    pub cases_suffix: String,
    pub header: String,
    pub footer: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            domains: DomainTags::default(),
            actions: ActionTags::default(),
            delimiter: '$',
            prefixes: MacroPrefixes::default(),
            cases_suffix: "_cases".to_string(),
            header: "#pragma once\n\n".to_string(),
            footer: "\n".to_string(),
        }
    }
}

impl Conventions {
    /// Load overrides from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| StatError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json).map_err(|e| StatError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

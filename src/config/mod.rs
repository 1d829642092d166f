// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for clint.
//!
//! This module handles loading and parsing configuration files, and
//! resolving presets named in `extends` into a single rule table.

pub mod default;
mod loader;
pub mod presets;
mod schema;

pub use default::default_config;
pub use loader::{find_config_file, find_config_file_from, load_config, parse_config, CONFIG_FILES};
pub use presets::resolve_rules;
pub use schema::*;

//! CLI Integration Test Modules

pub mod argument_parsing;
pub mod run;
pub mod toml_config;

//! Configuration file (`~/.vehicle-summon/config.ini`).
//!
//! A missing file yields defaults. Values present in the file overlay the
//! defaults section by section.

mod file;
mod parser;
mod writer;

pub use file::{
    config_directory, config_file_path, ConfigFile, ConfigFileError, EndpointSettings,
    MapSettings, SessionSettings,
};

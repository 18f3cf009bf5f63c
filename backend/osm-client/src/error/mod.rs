pub mod config;
pub mod osm;
pub mod parse;

pub use config::ConfigError;
pub use osm::{AppMessage, OsmError, OsmErrorKind, StatusPolicy};
pub use parse::ParseError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Osm(#[from] OsmError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

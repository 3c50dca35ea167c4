mod config;
mod config_builder;
mod zip_responder;

pub use config::*;
pub use config_builder::*;
pub use zip_responder::*;

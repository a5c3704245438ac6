//! Resolution of a configuration document into validated logger settings

mod config_resolver;

pub use config_resolver::{ConfigResolver, ResolvedConfig};

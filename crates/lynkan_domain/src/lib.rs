mod capability;
mod config;
mod error;
mod identifier;
mod platform;
mod record;
mod resolution;

pub use capability::*;
pub use config::*;
pub use error::*;
pub use identifier::*;
pub use platform::*;
pub use record::*;
pub use resolution::*;

mod channel;
mod native;
mod persisted;
mod resolver;

pub use channel::*;
pub use native::*;
pub use persisted::*;
pub use resolver::*;

pub mod backends;
pub mod dump;
pub mod setup;

pub use backends::*;
pub use dump::*;
pub use setup::*;

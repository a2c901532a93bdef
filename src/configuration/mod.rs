pub mod command_line;
pub mod constants;
pub mod deserialize;
pub mod error;
pub mod settings;

pub use self::error::Error;

//! Configuration loading and flash persistence

pub mod flash;
pub mod loader;

pub use flash::ConfigFlash;
pub use loader::{load_or_default, ConfigStore};

//! CLI command implementations.

mod clean;
mod install_bundle;
mod list;
mod uninstall;

pub use clean::clean;
pub use install_bundle::install_bundle;
pub use list::list;
pub use uninstall::uninstall;

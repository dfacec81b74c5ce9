//! Domain model for notebook launches.

mod command;
mod request;
mod result;
mod url;

pub use command::LaunchCommand;
pub use request::{DEFAULT_LAUNCH_HOST, LaunchRequest};
pub use result::LaunchResult;
pub use url::display_url;

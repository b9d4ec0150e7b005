#[allow(clippy::module_inception)]
pub mod config;
pub mod remote;
pub use config::{ConfigLoader, Configuration};
pub use remote::{detect_code_host, GitRemote, RemoteSource};

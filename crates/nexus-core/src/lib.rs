pub mod capabilities;
pub mod config;
pub mod error;
pub mod formatting;
pub mod interfaces;
pub mod registry;
pub mod selector;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use capabilities::{Capability, CapabilitySet};
pub use config::{ConfigLoader, Configuration, GitRemote, RemoteSource};
pub use error::NexusError;
pub use formatting::OutputFormatter;
pub use interfaces::{CodeHost, Interface, InterfaceId, IssueTracker, Provides, Vcs};
pub use registry::{Factory, Implementation, ImplementationRegistry};
pub use selector::ToolSelector;
pub use validation::InputValidator;

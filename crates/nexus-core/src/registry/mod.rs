pub mod implementation;
#[allow(clippy::module_inception)]
pub mod registry;

pub use implementation::{Factory, Implementation};
pub use registry::ImplementationRegistry;

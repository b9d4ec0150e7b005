use anyhow::Result;
use nexus_core::{Configuration, ImplementationRegistry, ToolSelector};
use std::io::Write;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// State shared by every command: built once per process, handed down by
/// reference.
pub struct App {
    pub config: Configuration,
    pub registry: ImplementationRegistry,
}

impl App {
    /// No concrete clients ship with the CLI, so the registry starts empty.
    pub fn new() -> Self {
        Self::with(Configuration::load(), ImplementationRegistry::new())
    }

    pub fn with(config: Configuration, registry: ImplementationRegistry) -> Self {
        Self { config, registry }
    }

    pub fn selector(&self) -> ToolSelector<'_> {
        ToolSelector::new(&self.registry)
    }
}

pub fn print_version(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Nexus v{}", VERSION)?;
    Ok(())
}

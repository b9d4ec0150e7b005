use crate::capabilities::CapabilitySet;
use crate::error::{NexusError, Result};
use crate::interfaces::Interface;
use crate::registry::ImplementationRegistry;
use tracing::debug;

/// Picks one concrete implementation of an interface from the registry.
pub struct ToolSelector<'a> {
    registry: &'a ImplementationRegistry,
}

impl<'a> ToolSelector<'a> {
    pub fn new(registry: &'a ImplementationRegistry) -> Self {
        Self { registry }
    }

    /// Build the best available implementation of `I`.
    ///
    /// Selection order:
    /// - `preferred_name`, if registered. Its capabilities are still checked
    ///   against `required_capabilities` and a mismatch is an error. An
    ///   unknown name falls through to automatic selection without error.
    /// - Otherwise the highest-priority implementation whose capabilities
    ///   cover `required_capabilities`.
    ///
    /// An empty requirement set is treated like `None`, and so is an empty
    /// `preferred_name`.
    pub fn get_tool<I>(
        &self,
        required_capabilities: Option<&CapabilitySet>,
        preferred_name: Option<&str>,
    ) -> Result<Box<I>>
    where
        I: Interface + ?Sized,
    {
        let required = required_capabilities.filter(|caps| !caps.is_empty());

        if let Some(name) = preferred_name.filter(|n| !n.is_empty()) {
            match self.registry.get_implementation_by_name::<I>(name) {
                Some(imp) => {
                    if let Some(required) = required {
                        if !imp.satisfies(required) {
                            return Err(NexusError::NoCapableImplementation {
                                interface: I::NAME,
                                preferred: Some(name.to_string()),
                                required: required.clone(),
                                missing: imp.capabilities.missing(required),
                            });
                        }
                    }
                    debug!(interface = I::NAME, name, "selected preferred implementation");
                    return Ok(imp.instantiate());
                }
                None => {
                    debug!(
                        interface = I::NAME,
                        name, "preferred implementation not registered, selecting automatically"
                    );
                }
            }
        }

        let implementations = self.registry.get_implementations::<I>();
        let Some(first) = implementations.first() else {
            return Err(NexusError::NoImplementation {
                interface: I::NAME,
            });
        };

        let chosen = match required {
            Some(required) => {
                let capable = self
                    .registry
                    .get_implementations_with_capabilities::<I>(required);
                match capable.first() {
                    Some(imp) => *imp,
                    None => {
                        return Err(NexusError::NoCapableImplementation {
                            interface: I::NAME,
                            preferred: None,
                            required: required.clone(),
                            missing: required.clone(),
                        })
                    }
                }
            }
            None => first,
        };

        debug!(
            interface = I::NAME,
            name = %chosen.name,
            priority = chosen.priority,
            "selected implementation"
        );
        Ok(chosen.instantiate())
    }

    /// Names of the implementations of `I`, highest priority first.
    pub fn list_available_tools<I>(&self) -> Vec<String>
    where
        I: Interface + ?Sized,
    {
        self.registry
            .get_implementations::<I>()
            .iter()
            .map(|imp| imp.name.clone())
            .collect()
    }

    /// Capabilities registered for `tool_name`; empty if it is unknown.
    pub fn get_tool_capabilities<I>(&self, tool_name: &str) -> CapabilitySet
    where
        I: Interface + ?Sized,
    {
        self.registry
            .get_implementation_by_name::<I>(tool_name)
            .map(|imp| imp.capabilities.clone())
            .unwrap_or_default()
    }
}

use crate::capabilities::CapabilitySet;

/// Errors raised by the registry, the selector and their collaborators.
///
/// The core never catches these; callers decide how to surface them.
#[derive(Debug, thiserror::Error)]
pub enum NexusError {
    /// Configuration could not be loaded. Only raised by the config loader.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No implementation registered at all for the interface.
    #[error("No implementations registered for {interface}")]
    NoImplementation { interface: &'static str },

    /// Implementations exist, but none (or the preferred one) satisfies the
    /// required capabilities.
    #[error("{}", no_capable_message(.preferred, .required, .missing))]
    NoCapableImplementation {
        interface: &'static str,
        preferred: Option<String>,
        required: CapabilitySet,
        missing: CapabilitySet,
    },

    /// An external command or client failed. Only raised by collaborators.
    #[error("tool execution error: {0}")]
    ToolExecution(String),
}

fn no_capable_message(
    preferred: &Option<String>,
    required: &CapabilitySet,
    missing: &CapabilitySet,
) -> String {
    match preferred {
        Some(name) => format!(
            "Implementation '{}' does not have required capabilities: {} (missing: {})",
            name, required, missing
        ),
        None => format!("No implementation has required capabilities: {}", required),
    }
}

pub type Result<T> = std::result::Result<T, NexusError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capability;

    #[test]
    fn no_implementation_names_interface() {
        let err = NexusError::NoImplementation {
            interface: "CodeHost",
        };
        assert_eq!(err.to_string(), "No implementations registered for CodeHost");
    }

    #[test]
    fn no_capable_lists_required() {
        let err = NexusError::NoCapableImplementation {
            interface: "CodeHost",
            preferred: None,
            required: CapabilitySet::from([Capability::Webhooks]),
            missing: CapabilitySet::from([Capability::Webhooks]),
        };
        assert_eq!(
            err.to_string(),
            "No implementation has required capabilities: [webhooks]"
        );
    }

    #[test]
    fn no_capable_preferred_mentions_name_and_missing() {
        let err = NexusError::NoCapableImplementation {
            interface: "CodeHost",
            preferred: Some("gitlab-cli".into()),
            required: CapabilitySet::from([Capability::BasicRead, Capability::AdvancedSearch]),
            missing: CapabilitySet::from([Capability::AdvancedSearch]),
        };
        let msg = err.to_string();
        assert!(msg.contains("'gitlab-cli'"));
        assert!(msg.contains("does not have required capabilities"));
        assert!(msg.contains("[basic_read, advanced_search]"));
        assert!(msg.contains("(missing: [advanced_search])"));
    }
}

use crate::capabilities::CapabilitySet;
use crate::error::Result;
use serde_json::{Map, Value};
use std::any::TypeId;
use std::fmt;

/// Marker for an abstract contract that implementations can be registered
/// against. Implemented for trait object types such as `dyn CodeHost`.
pub trait Interface: 'static {
    /// Human readable name used in errors and listings.
    const NAME: &'static str;
}

/// Conversion from a concrete implementation into the boxed interface it
/// satisfies. Lets a [`crate::registry::Factory`] be built from a plain
/// constructor without the caller spelling out the coercion.
pub trait Provides<I: ?Sized> {
    fn into_interface(self) -> Box<I>;
}

/// Identity of a registered interface.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceId {
    type_id: TypeId,
    name: &'static str,
}

impl InterfaceId {
    pub fn of<I: Interface + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<I>(),
            name: I::NAME,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl PartialEq for InterfaceId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for InterfaceId {}

impl std::hash::Hash for InterfaceId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Code hosting platforms (GitLab, GitHub).
pub trait CodeHost {
    fn capabilities(&self) -> CapabilitySet;

    fn get_merge_request(&self, mr_id: u64) -> Result<Value>;

    /// `state` is one of `opened`, `closed`, `merged` or `all`.
    fn list_merge_requests(&self, state: &str) -> Result<Vec<Value>>;

    fn get_discussions(&self, mr_id: u64) -> Result<Vec<Value>>;
}

/// Issue tracking systems (JIRA, Linear, GitHub Issues).
pub trait IssueTracker {
    fn capabilities(&self) -> CapabilitySet;

    fn get_issue(&self, issue_id: &str) -> Result<Value>;

    /// Returns the id of the created issue.
    fn create_issue(
        &self,
        title: &str,
        description: &str,
        fields: &Map<String, Value>,
    ) -> Result<String>;

    fn update_issue(&self, issue_id: &str, fields: &Map<String, Value>) -> Result<()>;

    fn search_issues(&self, query: &str) -> Result<Vec<Value>>;
}

/// Version control operations.
pub trait Vcs {
    fn capabilities(&self) -> CapabilitySet;

    fn get_current_branch(&self) -> Result<String>;

    /// Branches from `base`, or from the current branch when `None`.
    fn create_branch(&self, name: &str, base: Option<&str>) -> Result<()>;

    fn create_worktree(&self, path: &str, branch: &str) -> Result<()>;

    fn list_worktrees(&self) -> Result<Vec<Value>>;
}

impl Interface for dyn CodeHost {
    const NAME: &'static str = "CodeHost";
}

impl Interface for dyn IssueTracker {
    const NAME: &'static str = "IssueTracker";
}

impl Interface for dyn Vcs {
    const NAME: &'static str = "Vcs";
}

impl<T: CodeHost + 'static> Provides<dyn CodeHost> for T {
    fn into_interface(self) -> Box<dyn CodeHost> {
        Box::new(self)
    }
}

impl<T: IssueTracker + 'static> Provides<dyn IssueTracker> for T {
    fn into_interface(self) -> Box<dyn IssueTracker> {
        Box::new(self)
    }
}

impl<T: Vcs + 'static> Provides<dyn Vcs> for T {
    fn into_interface(self) -> Box<dyn Vcs> {
        Box::new(self)
    }
}

//! Stand-in implementations shared by the unit tests.

use crate::capabilities::{Capability, CapabilitySet};
use crate::error::Result;
use crate::interfaces::{CodeHost, IssueTracker};
use crate::registry::{Factory, ImplementationRegistry};
use serde_json::{json, Map, Value};

fn merge_request(mr_id: u64, state: &str) -> Value {
    json!({"id": mr_id, "title": format!("Mock MR #{mr_id}"), "state": state})
}

#[derive(Default)]
pub struct MockCodeHost;

impl CodeHost for MockCodeHost {
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::from([Capability::BasicRead])
    }

    fn get_merge_request(&self, mr_id: u64) -> Result<Value> {
        Ok(merge_request(mr_id, "opened"))
    }

    fn list_merge_requests(&self, state: &str) -> Result<Vec<Value>> {
        Ok(vec![merge_request(1, state), merge_request(2, state)])
    }

    fn get_discussions(&self, _mr_id: u64) -> Result<Vec<Value>> {
        Ok(vec![
            json!({"id": "disc1", "body": "Test discussion", "resolved": false}),
        ])
    }
}

/// Delegates the `CodeHost` calls to [`MockCodeHost`] and overrides the
/// advertised capabilities.
macro_rules! mock_code_host {
    ($name:ident, [$($cap:ident),*]) => {
        #[derive(Default)]
        pub struct $name;

        impl CodeHost for $name {
            fn capabilities(&self) -> CapabilitySet {
                CapabilitySet::from([$(Capability::$cap),*])
            }

            fn get_merge_request(&self, mr_id: u64) -> Result<Value> {
                MockCodeHost.get_merge_request(mr_id)
            }

            fn list_merge_requests(&self, state: &str) -> Result<Vec<Value>> {
                MockCodeHost.list_merge_requests(state)
            }

            fn get_discussions(&self, mr_id: u64) -> Result<Vec<Value>> {
                MockCodeHost.get_discussions(mr_id)
            }
        }
    };
}

mock_code_host!(MockGitLabCli, [BasicRead, CliAvailable]);
mock_code_host!(MockGitLabApi, [BasicRead, BasicWrite, AdvancedSearch, ApiAccess]);

#[derive(Default)]
pub struct MockJiraCli;

impl IssueTracker for MockJiraCli {
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::from([
            Capability::BasicRead,
            Capability::BasicWrite,
            Capability::CliAvailable,
        ])
    }

    fn get_issue(&self, issue_id: &str) -> Result<Value> {
        Ok(json!({"id": issue_id, "title": format!("Mock Issue {issue_id}"), "status": "Open"}))
    }

    fn create_issue(
        &self,
        _title: &str,
        _description: &str,
        _fields: &Map<String, Value>,
    ) -> Result<String> {
        Ok("TEST-123".to_string())
    }

    fn update_issue(&self, _issue_id: &str, _fields: &Map<String, Value>) -> Result<()> {
        Ok(())
    }

    fn search_issues(&self, _query: &str) -> Result<Vec<Value>> {
        Ok(vec![
            json!({"id": "TEST-1", "title": "Found Issue 1"}),
            json!({"id": "TEST-2", "title": "Found Issue 2"}),
        ])
    }
}

/// CodeHost: `gitlab-cli` (priority 1) and `gitlab-api` (priority 2).
/// IssueTracker: `jira-cli` (priority 1).
pub fn populated_registry() -> ImplementationRegistry {
    let mut registry = ImplementationRegistry::new();

    registry.register::<dyn CodeHost>(
        Factory::of::<MockGitLabCli>(),
        [Capability::BasicRead, Capability::CliAvailable],
        1,
        Some("gitlab-cli"),
    );
    registry.register::<dyn CodeHost>(
        Factory::of::<MockGitLabApi>(),
        [
            Capability::BasicRead,
            Capability::BasicWrite,
            Capability::AdvancedSearch,
            Capability::ApiAccess,
        ],
        2,
        Some("gitlab-api"),
    );
    registry.register::<dyn IssueTracker>(
        Factory::of::<MockJiraCli>(),
        [Capability::BasicRead, Capability::BasicWrite, Capability::CliAvailable],
        1,
        Some("jira-cli"),
    );

    registry
}

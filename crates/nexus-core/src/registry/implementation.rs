use crate::capabilities::CapabilitySet;
use crate::interfaces::Provides;
use std::fmt;
use std::sync::Arc;

/// Zero-argument constructor for an implementation of interface `I`.
///
/// Carries the concrete type name so registrations can default their name
/// to it.
pub struct Factory<I: ?Sized> {
    type_name: &'static str,
    make: Arc<dyn Fn() -> Box<I> + Send + Sync>,
}

impl<I: ?Sized + 'static> Factory<I> {
    /// Factory for a `Default` implementation.
    pub fn of<T>() -> Self
    where
        T: Default + Provides<I> + 'static,
    {
        Self::with(T::default)
    }

    /// Factory from a constructor returning the concrete type.
    pub fn with<T, F>(ctor: F) -> Self
    where
        T: Provides<I> + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            type_name: short_type_name::<T>(),
            make: Arc::new(move || ctor().into_interface()),
        }
    }

    /// Factory from a constructor that already yields the boxed interface.
    /// `type_name` stands in for the concrete type.
    pub fn from_fn<F>(type_name: &'static str, make: F) -> Self
    where
        F: Fn() -> Box<I> + Send + Sync + 'static,
    {
        Self {
            type_name,
            make: Arc::new(make),
        }
    }
}

impl<I: ?Sized> Factory<I> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn build(&self) -> Box<I> {
        (self.make)()
    }
}

impl<I: ?Sized> Clone for Factory<I> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            make: Arc::clone(&self.make),
        }
    }
}

impl<I: ?Sized> fmt::Debug for Factory<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A registered implementation of interface `I`.
pub struct Implementation<I: ?Sized> {
    pub factory: Factory<I>,
    pub capabilities: CapabilitySet,
    pub priority: i32,
    pub name: String,
}

impl<I: ?Sized + 'static> Implementation<I> {
    /// Build a fresh instance.
    pub fn instantiate(&self) -> Box<I> {
        self.factory.build()
    }

    pub fn satisfies(&self, required: &CapabilitySet) -> bool {
        self.capabilities.is_superset(required)
    }
}

impl<I: ?Sized> Clone for Implementation<I> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            capabilities: self.capabilities.clone(),
            priority: self.priority,
            name: self.name.clone(),
        }
    }
}

impl<I: ?Sized> fmt::Debug for Implementation<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("capabilities", &self.capabilities)
            .field("factory", &self.factory)
            .finish()
    }
}

/// Last path segment of a type name, generics stripped.
/// `my_crate::hosts::GitLabApi<u8>` becomes `GitLabApi`.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod hosts {
        pub struct GitLabApi;
        pub struct Wrapper<T>(pub T);
    }

    #[test]
    fn short_type_name_drops_path_and_generics() {
        assert_eq!(short_type_name::<hosts::GitLabApi>(), "GitLabApi");
        assert_eq!(short_type_name::<hosts::Wrapper<u8>>(), "Wrapper");
        assert_eq!(short_type_name::<u32>(), "u32");
    }

    #[test]
    fn implementation_instantiates_through_its_factory() {
        use crate::capabilities::Capability;
        use crate::interfaces::CodeHost;
        use crate::testing::MockGitLabApi;

        let imp: Implementation<dyn CodeHost> = Implementation {
            factory: Factory::of::<MockGitLabApi>(),
            capabilities: CapabilitySet::from([Capability::ApiAccess]),
            priority: 2,
            name: "gitlab-api".to_string(),
        };
        assert_eq!(imp.factory.type_name(), "MockGitLabApi");
        let host = imp.instantiate();
        assert!(host.capabilities().contains(Capability::AdvancedSearch));
        assert_eq!(host.list_merge_requests("merged").unwrap().len(), 2);
        assert!(imp.satisfies(&CapabilitySet::from([Capability::ApiAccess])));
        assert!(!imp.satisfies(&CapabilitySet::from([Capability::Webhooks])));
    }
}

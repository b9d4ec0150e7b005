use super::implementation::{Factory, Implementation};
use crate::capabilities::{Capability, CapabilitySet};
use crate::interfaces::{Interface, InterfaceId};
use std::any::{Any, TypeId};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

/// In-memory registry of implementations, bucketed per interface and kept
/// in descending priority order.
///
/// No internal synchronization: mutation takes `&mut self`. Duplicate names
/// are accepted; name lookup returns the first match in priority order, so a
/// later registration with an equal or lower priority under the same name is
/// shadowed.
pub struct ImplementationRegistry {
    // TypeId of `I` -> Vec<Implementation<I>>
    buckets: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    interfaces: Vec<InterfaceId>,
}

impl ImplementationRegistry {
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
            interfaces: Vec::new(),
        }
    }

    /// Register an implementation of `I`. `name` defaults to the factory's
    /// concrete type name.
    pub fn register<I>(
        &mut self,
        factory: Factory<I>,
        capabilities: impl IntoIterator<Item = Capability>,
        priority: i32,
        name: Option<&str>,
    ) where
        I: Interface + ?Sized,
    {
        let name = name.unwrap_or(factory.type_name()).to_string();
        let capabilities: CapabilitySet = capabilities.into_iter().collect();
        debug!(
            interface = I::NAME,
            name = %name,
            priority,
            capabilities = %capabilities,
            "implementation registered"
        );

        let id = InterfaceId::of::<I>();
        if !self.interfaces.contains(&id) {
            self.interfaces.push(id);
        }

        let bucket = self.bucket_mut::<I>();
        bucket.push(Implementation {
            factory,
            capabilities,
            priority,
            name,
        });
        // sort_by_key is stable: equal priorities keep registration order
        bucket.sort_by_key(|imp| Reverse(imp.priority));
    }

    /// All implementations of `I`, highest priority first.
    pub fn get_implementations<I>(&self) -> &[Implementation<I>]
    where
        I: Interface + ?Sized,
    {
        self.buckets
            .get(&TypeId::of::<I>())
            .and_then(|b| b.downcast_ref::<Vec<Implementation<I>>>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get_implementation_by_name<I>(&self, name: &str) -> Option<&Implementation<I>>
    where
        I: Interface + ?Sized,
    {
        self.get_implementations::<I>()
            .iter()
            .find(|imp| imp.name == name)
    }

    /// Implementations whose capabilities are a superset of `required`,
    /// in priority order.
    pub fn get_implementations_with_capabilities<I>(
        &self,
        required: &CapabilitySet,
    ) -> Vec<&Implementation<I>>
    where
        I: Interface + ?Sized,
    {
        self.get_implementations::<I>()
            .iter()
            .filter(|imp| imp.satisfies(required))
            .collect()
    }

    /// Registered interfaces in order of first registration.
    pub fn list_interfaces(&self) -> Vec<InterfaceId> {
        self.interfaces.clone()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.interfaces.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    fn bucket_mut<I>(&mut self) -> &mut Vec<Implementation<I>>
    where
        I: Interface + ?Sized,
    {
        self.buckets
            .entry(TypeId::of::<I>())
            .or_insert_with(|| Box::new(Vec::<Implementation<I>>::new()))
            .downcast_mut::<Vec<Implementation<I>>>()
            // the bucket for TypeId::of::<I>() only ever holds Vec<Implementation<I>>
            .expect("registry bucket type mismatch")
    }
}

impl Default for ImplementationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

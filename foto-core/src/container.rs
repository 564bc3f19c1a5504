//! Minimal DI container: register shared instances by type, resolve them as `Arc<T>`.
//!
//! Filled once at startup and read-only afterwards, so controller factories can resolve
//! from it concurrently.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("no registration for type {0}")]
    NotFound(&'static str),
}

#[derive(Default)]
pub struct Container {
    store: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn register_instance<T: Send + Sync + 'static>(&mut self, value: T) {
        self.register_arc(Arc::new(value));
    }

    pub fn register_arc<T: Send + Sync + 'static>(&mut self, value: Arc<T>) {
        self.store.insert(TypeId::of::<T>(), value);
    }

    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ContainerError> {
        self.store
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|any| any.downcast::<T>().ok())
            .ok_or(ContainerError::NotFound(std::any::type_name::<T>()))
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.store.contains_key(&TypeId::of::<T>())
    }
}

//! Foreign-key resolution for joined table columns.
//!
//! Both resolvers give the same observable result: the label of the referenced
//! entity, or `None` when the key does not resolve. Neither ever fails.

use crate::model::entity::{Entity, EntityId, Labelled};
use crate::repo::store::{EntityStore, StoreError, StoreResult};
use log::warn;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Resolves a foreign key to the display label of the referenced entity.
pub trait Relation {
    fn resolve(&self, id: EntityId) -> Option<String>;
}

/// Labels batch-loaded once per refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedRelation {
    labels: HashMap<EntityId, String>,
}

impl CachedRelation {
    pub fn from_entities<T: Entity + Labelled>(entities: &[T]) -> Self {
        Self {
            labels: entities
                .iter()
                .map(|entity| (entity.id(), entity.label().to_string()))
                .collect(),
        }
    }

    /// Loads every row of `T` through the store.
    pub fn load<T: Entity + Labelled>(store: &impl EntityStore<T>) -> StoreResult<Self> {
        Ok(Self::from_entities(&store.get_all()?))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Relation for CachedRelation {
    fn resolve(&self, id: EntityId) -> Option<String> {
        self.labels.get(&id).cloned()
    }
}

/// Looks the key up in the store on every render.
pub struct LazyRelation<T, S> {
    store: S,
    kind: PhantomData<fn() -> T>,
}

impl<T: Entity + Labelled, S: EntityStore<T>> LazyRelation<T, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            kind: PhantomData,
        }
    }
}

impl<T: Entity + Labelled, S: EntityStore<T>> Relation for LazyRelation<T, S> {
    fn resolve(&self, id: EntityId) -> Option<String> {
        match self.store.get_by_id(id) {
            Ok(entity) => Some(entity.label().to_string()),
            Err(StoreError::NotFound { .. }) => None,
            Err(err) => {
                warn!(
                    "event=relation_resolve module=view_model status=error kind={:?} id={id} error={err}",
                    T::KIND
                );
                None
            }
        }
    }
}

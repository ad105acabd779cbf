//! Per-component-type storage.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

use super::entity::Entity;

/// Marker for plain-data component types.
///
/// Components are copied out of the store for the duration of a callback
/// and written back afterwards, so they must be cheap to clone.
pub trait Component: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Component for T {}

/// `Entity -> T` mapping with an auxiliary presence set.
///
/// The presence set is logically redundant with the data map and is kept in
/// lock-step under the store's reader-writer discipline. All operations are
/// total; none can fail.
pub struct Store<T> {
    data: RwLock<HashMap<Entity, T>>,
    index: RwLock<HashSet<Entity>>,
}

impl<T: Component> Store<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            index: RwLock::new(HashSet::new()),
        }
    }

    /// Attaches a component value, replacing any prior value for `e`.
    pub fn insert(&self, e: Entity, value: T) {
        let mut data = self.data.write();
        let mut index = self.index.write();
        data.insert(e, value);
        index.insert(e);
    }

    /// Returns a copy of the component attached to `e`, if any.
    #[must_use]
    pub fn get(&self, e: Entity) -> Option<T> {
        self.data.read().get(&e).cloned()
    }

    /// Detaches the component from `e`. A no-op if absent.
    pub fn remove(&self, e: Entity) {
        let mut data = self.data.write();
        let mut index = self.index.write();
        data.remove(&e);
        index.remove(&e);
    }

    /// Returns true if `e` has a component in this store.
    #[must_use]
    pub fn contains(&self, e: Entity) -> bool {
        self.index.read().contains(&e)
    }

    /// Number of entities with a component in this store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    /// Returns true if the store holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    /// Removes every component from the store.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let mut index = self.index.write();
        data.clear();
        index.clear();
    }

    /// Snapshot of the current key set.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.index.read().iter().copied().collect()
    }

    /// Visits every component, releasing all locks during the callback.
    ///
    /// The key set is captured at entry, so no entity is visited twice in
    /// one traversal and the callback is free to insert or remove
    /// components (including on this store). Whether an entity inserted
    /// mid-traversal is visited in the same pass is unspecified. The
    /// mutated copy is written back unless the callback removed the
    /// entity's component meanwhile.
    pub fn for_each(&self, mut f: impl FnMut(Entity, &mut T)) {
        for e in self.entities() {
            let Some(mut value) = self.get(e) else {
                continue;
            };
            f(e, &mut value);
            self.write_back(e, value);
        }
    }

    /// Persists a mutated copy if the entity still has a component here.
    pub(crate) fn write_back(&self, e: Entity, value: T) {
        let mut data = self.data.write();
        let index = self.index.read();
        if index.contains(&e) {
            data.insert(e, value);
        }
    }
}

impl<T: Component> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

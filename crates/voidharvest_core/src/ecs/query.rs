//! Joined views over entities owning a set of component types.

use std::sync::Arc;

use super::entity::Entity;
use super::store::{Component, Store};
use super::world::World;

/// View over every entity with a component of type `A`.
pub struct View1<A> {
    a: Arc<Store<A>>,
}

/// View over every entity owning components of both `A` and `B`.
pub struct View2<A, B> {
    a: Arc<Store<A>>,
    b: Arc<Store<B>>,
}

/// View over every entity owning components of `A`, `B`, and `C`.
pub struct View3<A, B, C> {
    a: Arc<Store<A>>,
    b: Arc<Store<B>>,
    c: Arc<Store<C>>,
}

impl World {
    /// Builds a unary view.
    #[must_use]
    pub fn view1<A: Component>(&self) -> View1<A> {
        View1 {
            a: self.store_of::<A>(),
        }
    }

    /// Builds a binary joined view.
    #[must_use]
    pub fn view2<A: Component, B: Component>(&self) -> View2<A, B> {
        View2 {
            a: self.store_of::<A>(),
            b: self.store_of::<B>(),
        }
    }

    /// Builds a ternary joined view.
    #[must_use]
    pub fn view3<A: Component, B: Component, C: Component>(&self) -> View3<A, B, C> {
        View3 {
            a: self.store_of::<A>(),
            b: self.store_of::<B>(),
            c: self.store_of::<C>(),
        }
    }
}

impl<A: Component> View1<A> {
    /// Visits every entity with an `A` component.
    ///
    /// Mutations through the reference persist after the callback unless
    /// the callback detached the component. Safe to call re-entrantly from
    /// within another view's iteration.
    pub fn each(&self, mut f: impl FnMut(Entity, &mut A)) {
        self.a.for_each(|e, a| f(e, a));
    }
}

impl<A: Component, B: Component> View2<A, B> {
    /// Visits every entity owning both components.
    ///
    /// The smaller store drives the join; the other is probed per entity.
    /// Entities gaining or losing membership mid-traversal may or may not
    /// be reflected in the same pass.
    pub fn each(&self, mut f: impl FnMut(Entity, &mut A, &mut B)) {
        if self.a.len() <= self.b.len() {
            for e in self.a.entities() {
                let (Some(mut a), Some(mut b)) = (self.a.get(e), self.b.get(e)) else {
                    continue;
                };
                f(e, &mut a, &mut b);
                self.a.write_back(e, a);
                self.b.write_back(e, b);
            }
        } else {
            for e in self.b.entities() {
                let (Some(mut a), Some(mut b)) = (self.a.get(e), self.b.get(e)) else {
                    continue;
                };
                f(e, &mut a, &mut b);
                self.a.write_back(e, a);
                self.b.write_back(e, b);
            }
        }
    }
}

impl<A: Component, B: Component, C: Component> View3<A, B, C> {
    /// Visits every entity owning all three components.
    pub fn each(&self, mut f: impl FnMut(Entity, &mut A, &mut B, &mut C)) {
        let lens = [self.a.len(), self.b.len(), self.c.len()];
        let driver = lens
            .iter()
            .enumerate()
            .min_by_key(|(_, len)| **len)
            .map_or(0, |(i, _)| i);
        let entities = match driver {
            1 => self.b.entities(),
            2 => self.c.entities(),
            _ => self.a.entities(),
        };
        for e in entities {
            let (Some(mut a), Some(mut b), Some(mut c)) =
                (self.a.get(e), self.b.get(e), self.c.get(e))
            else {
                continue;
            };
            f(e, &mut a, &mut b, &mut c);
            self.a.write_back(e, a);
            self.b.write_back(e, b);
            self.c.write_back(e, c);
        }
    }
}

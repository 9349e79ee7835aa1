// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistent per-container state keyed by identity.

use alloc::collections::BTreeMap;

use sprig_draw::{Rect, SpanId, Vec2};

use crate::id::Id;

/// State of one window, panel, popup, or collapsible section.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Container {
    /// Identity this record is keyed by.
    pub id: Id,
    /// Outer rectangle.
    pub rect: Rect,
    /// Content rectangle, after title bar and scrollbars.
    pub body: Rect,
    /// Extent of the content laid out last time the container was declared.
    pub content_size: Vec2,
    /// Scroll offset.
    pub scroll: Vec2,
    /// Whether the window is open or the section expanded.
    pub open: bool,
    /// Paint and hover order; higher is nearer.
    pub z: i32,
    /// Command span of the current frame, for root containers.
    pub span: Option<SpanId>,
}

impl Container {
    /// A fresh, open record at depth zero.
    pub fn new(id: Id, rect: Rect) -> Self {
        Self {
            id,
            rect,
            body: rect,
            content_size: Vec2::ZERO,
            scroll: Vec2::ZERO,
            open: true,
            z: 0,
            span: None,
        }
    }
}

/// Identity-keyed container records. Nothing is evicted automatically.
#[derive(Clone, Debug, Default)]
pub struct ContainerRegistry {
    map: BTreeMap<Id, Container>,
    last_z: i32,
}

impl ContainerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `id`, created open and in front with `initial` as its rect
    /// if it does not exist yet.
    pub fn get(&mut self, id: Id, initial: Rect) -> &mut Container {
        let last_z = &mut self.last_z;
        self.map.entry(id).or_insert_with(|| {
            *last_z += 1;
            tracing::debug!(?id, z = *last_z, "container created");
            Container {
                z: *last_z,
                ..Container::new(id, initial)
            }
        })
    }

    /// The record for `id`, created by `f` if it does not exist yet.
    ///
    /// Unlike [`get`](Self::get) this does not touch the z order.
    pub fn get_or_insert_with(
        &mut self,
        id: Id,
        f: impl FnOnce(Id) -> Container,
    ) -> &mut Container {
        self.map.entry(id).or_insert_with(|| f(id))
    }

    /// Look up a record without creating it.
    pub fn find(&self, id: Id) -> Option<&Container> {
        self.map.get(&id)
    }

    /// Look up a record mutably without creating it.
    pub fn get_mut(&mut self, id: Id) -> Option<&mut Container> {
        self.map.get_mut(&id)
    }

    /// Whether a record exists.
    pub fn contains(&self, id: Id) -> bool {
        self.map.contains_key(&id)
    }

    /// Explicitly drop a record.
    pub fn remove(&mut self, id: Id) -> Option<Container> {
        self.map.remove(&id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if there are no records.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All records, in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &Container> + '_ {
        self.map.values()
    }

    /// Highest z handed out so far.
    pub fn last_z(&self) -> i32 {
        self.last_z
    }

    /// Move a container above every other one. Returns its new z.
    pub fn bring_to_front(&mut self, id: Id) -> Option<i32> {
        let c = self.map.get_mut(&id)?;
        self.last_z += 1;
        c.z = self.last_z;
        tracing::debug!(?id, z = c.z, "brought to front");
        Some(c.z)
    }

    /// The nearest open container among `ids` whose rect contains `point`.
    ///
    /// Equal z resolves to the later entry in `ids`.
    pub fn topmost_at(&self, ids: &[Id], point: Vec2) -> Option<Id> {
        ids.iter()
            .filter_map(|id| self.map.get(id))
            .filter(|c| c.open && c.rect.contains(point))
            .max_by_key(|c| c.z)
            .map(|c| c.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_creates_once_and_is_idempotent() {
        let mut reg = ContainerRegistry::new();
        let id = Id(1);
        reg.get(id, Rect::new(0, 0, 10, 10)).scroll = Vec2::new(0, 5);
        let again = reg.get(id, Rect::new(99, 99, 1, 1));
        assert_eq!(again.rect, Rect::new(0, 0, 10, 10), "initial rect only used on creation");
        assert_eq!(again.scroll, Vec2::new(0, 5));
        assert!(again.open);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn new_containers_stack_in_front() {
        let mut reg = ContainerRegistry::new();
        let a = reg.get(Id(1), Rect::ZERO).z;
        let b = reg.get(Id(2), Rect::ZERO).z;
        assert!(b > a);
        let a2 = reg.bring_to_front(Id(1)).unwrap();
        assert!(a2 > b);
        assert_eq!(reg.last_z(), a2);
    }

    #[test]
    fn get_or_insert_with_leaves_z_alone() {
        let mut reg = ContainerRegistry::new();
        let c = reg.get_or_insert_with(Id(3), |id| Container {
            open: false,
            ..Container::new(id, Rect::ZERO)
        });
        assert!(!c.open);
        assert_eq!(reg.last_z(), 0);
    }

    #[test]
    fn topmost_at_picks_highest_z_containing_point() {
        let mut reg = ContainerRegistry::new();
        reg.get(Id(1), Rect::new(0, 0, 100, 100));
        reg.get(Id(2), Rect::new(50, 50, 100, 100));
        let ids = [Id(1), Id(2)];
        assert_eq!(reg.topmost_at(&ids, Vec2::new(75, 75)), Some(Id(2)));
        assert_eq!(reg.topmost_at(&ids, Vec2::new(10, 10)), Some(Id(1)));
        reg.bring_to_front(Id(1));
        assert_eq!(reg.topmost_at(&ids, Vec2::new(75, 75)), Some(Id(1)));
        assert_eq!(reg.topmost_at(&ids, Vec2::new(500, 500)), None);
    }

    #[test]
    fn closed_containers_are_not_hover_roots() {
        let mut reg = ContainerRegistry::new();
        reg.get(Id(1), Rect::new(0, 0, 100, 100)).open = false;
        assert_eq!(reg.topmost_at(&[Id(1)], Vec2::new(5, 5)), None);
    }

    #[test]
    fn remove_is_explicit() {
        let mut reg = ContainerRegistry::new();
        reg.get(Id(1), Rect::ZERO);
        assert!(reg.remove(Id(1)).is_some());
        assert!(!reg.contains(Id(1)));
        assert!(reg.find(Id(1)).is_none());
    }
}

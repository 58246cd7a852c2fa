use smallvec::SmallVec;
use vk_core::{Bounds, Group, GroupId, Unit, UnitHandle};

/// Ordered set of selected groups. The primary group is the one added last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    groups: SmallVec<[GroupId; 4]>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.groups.contains(&id)
    }

    pub fn primary(&self) -> Option<GroupId> {
        self.groups.last().copied()
    }

    pub fn ids(&self) -> &[GroupId] {
        &self.groups
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Replace the selection with a single group.
    pub fn select_only(&mut self, id: GroupId) {
        self.groups.clear();
        self.groups.push(id);
    }

    /// Add `id`, making it primary. An existing entry moves to the end.
    pub fn add(&mut self, id: GroupId) {
        self.groups.retain(|g| *g != id);
        self.groups.push(id);
    }

    pub fn set<I: IntoIterator<Item = GroupId>>(&mut self, ids: I) {
        self.groups.clear();
        for id in ids {
            self.add(id);
        }
    }

    /// Selected groups, in selection order.
    pub fn groups<'a>(&'a self, all: &'a [Group]) -> impl Iterator<Item = &'a Group> + 'a {
        self.groups
            .iter()
            .filter_map(move |id| all.iter().find(|g| g.id == *id))
    }

    /// Handles of every unit in every selected group.
    pub fn unit_handles(&self, all: &[Group]) -> Vec<UnitHandle> {
        self.groups(all).flat_map(|g| g.members.iter().copied()).collect()
    }

    /// Union of the selected groups' bounds.
    pub fn bounds(&self, all: &[Group], units: &[Unit]) -> Option<Bounds> {
        Bounds::union_all(self.groups(all).map(|g| g.bounds(units)))
    }

    /// True if any selected group is visible.
    pub fn any_visible(&self, all: &[Group], units: &[Unit]) -> bool {
        self.groups(all).any(|g| g.is_visible(units))
    }
}

//! Groups: named views over the flat unit list.
//!
//! A group owns nothing. It holds handles into `OverlayConfig::units` and is
//! rebuilt whenever that list changes.

use crate::bounds::Bounds;
use crate::id::GroupId;
use crate::model::{Unit, UnitHandle};
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub display_name: String,
    pub members: SmallVec<[UnitHandle; 8]>,
}

/// Partition units by group id, in order of first appearance.
pub fn build_groups(units: &[Unit]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for (i, unit) in units.iter().enumerate() {
        match groups.iter_mut().find(|g| g.id == unit.group) {
            Some(group) => group.members.push(UnitHandle(i)),
            None => {
                let mut members = SmallVec::new();
                members.push(UnitHandle(i));
                groups.push(Group {
                    id: unit.group,
                    display_name: display_name(unit.group),
                    members,
                });
            }
        }
    }
    log::debug!("built {} groups from {} units", groups.len(), units.len());
    groups
}

/// Friendly name for well-known group ids; anything else is upper-cased.
pub fn display_name(id: GroupId) -> String {
    let name = match id.as_str() {
        "wasd" => "WASD",
        "space" => "SPACE",
        "shift" => "SHIFT",
        "ctrl" => "CTRL",
        "lmb" => "LMB",
        "rmb" => "RMB",
        "mmb" => "MMB",
        "keyboard" => "Mini Keyboard",
        "numbers" => "Number Row",
        "function" => "Function Keys",
        "arrows" => "Arrow Keys",
        "utility" => "Utility Keys",
        "full_keyboard" => "Full Keyboard",
        "cps" => "CPS Counter",
        "cps_rmb" => "RMB CPS",
        "cps_mmb" => "MMB CPS",
        other => return other.to_uppercase(),
    };
    name.to_string()
}

impl Group {
    fn units<'a>(&'a self, units: &'a [Unit]) -> impl Iterator<Item = &'a Unit> + 'a {
        self.members.iter().filter_map(|h| units.get(h.0))
    }

    /// Union of the visible members' rectangles. A hidden group reports the
    /// union of all members; an empty group reports zero bounds.
    pub fn bounds(&self, units: &[Unit]) -> Bounds {
        Bounds::union_all(self.units(units).filter(|u| u.visible).map(Unit::bounds))
            .or_else(|| Bounds::union_all(self.units(units).map(Unit::bounds)))
            .unwrap_or_default()
    }

    /// Visible iff at least one member is visible.
    pub fn is_visible(&self, units: &[Unit]) -> bool {
        self.units(units).any(|u| u.visible)
    }

    pub fn all_visible(&self, units: &[Unit]) -> bool {
        self.units(units).all(|u| u.visible)
    }

    pub fn set_visible(&self, units: &mut [Unit], visible: bool) {
        for h in &self.members {
            if let Some(u) = units.get_mut(h.0) {
                u.visible = visible;
            }
        }
    }

    pub fn translate(&self, units: &mut [Unit], dx: i32, dy: i32) {
        for h in &self.members {
            if let Some(u) = units.get_mut(h.0) {
                u.translate(dx, dy);
            }
        }
    }

    pub fn contains(&self, units: &[Unit], px: f64, py: f64) -> bool {
        self.bounds(units).contains(px, py)
    }

    pub fn intersects(&self, units: &[Unit], rect: &Bounds) -> bool {
        self.bounds(units).intersects(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InputSource;
    use pretty_assertions::assert_eq;

    fn unit(group: &str, x: i32, y: i32, w: i32, h: i32) -> Unit {
        Unit::new("k", InputSource::Key(65), Bounds::new(x, y, w, h), GroupId::intern(group))
    }

    #[test]
    fn partitions_in_first_appearance_order() {
        let units = vec![
            unit("b", 0, 0, 10, 10),
            unit("a", 20, 0, 10, 10),
            unit("b", 0, 20, 10, 10),
        ];
        let groups = build_groups(&units);
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(groups[0].members.as_slice(), &[UnitHandle(0), UnitHandle(2)]);
        assert_eq!(groups[0].bounds(&units), Bounds::new(0, 0, 10, 30));
    }

    #[test]
    fn bounds_skip_hidden_members() {
        let mut units = vec![unit("g", 0, 0, 10, 10), unit("g", 50, 50, 10, 10)];
        units[1].visible = false;
        let groups = build_groups(&units);
        assert_eq!(groups[0].bounds(&units), Bounds::new(0, 0, 10, 10));
        assert!(groups[0].is_visible(&units));
        assert!(!groups[0].all_visible(&units));

        groups[0].set_visible(&mut units, false);
        assert!(!groups[0].is_visible(&units));
        assert_eq!(groups[0].bounds(&units), Bounds::new(0, 0, 60, 60));
    }

    #[test]
    fn translate_moves_every_member() {
        let mut units = vec![unit("g", 0, 0, 10, 10), unit("g", 12, 0, 10, 10)];
        let groups = build_groups(&units);
        groups[0].translate(&mut units, 5, -3);
        assert_eq!(units[0].bounds(), Bounds::new(5, -3, 10, 10));
        assert_eq!(units[1].bounds(), Bounds::new(17, -3, 10, 10));
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name(GroupId::intern("cps_rmb")), "RMB CPS");
        assert_eq!(display_name(GroupId::intern("my_keys")), "MY_KEYS");
    }
}

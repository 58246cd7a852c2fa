use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for group ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Interned identifier shared by every unit of one group.
/// Internally a `Spur` index: 4 bytes, Copy, Eq and Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(Spur);

impl GroupId {
    /// Intern a string as a GroupId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        GroupId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Fallback group for units loaded without one.
    pub fn ungrouped() -> Self {
        Self::intern("custom")
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::ungrouped()
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GroupId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GroupId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(GroupId::intern(&s))
    }
}

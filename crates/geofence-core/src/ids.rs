use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a finalized region. Assigned in creation order starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(u64);

impl RegionId {
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic region id counter. Ids handed out are never handed out again,
/// even after the region they named is deleted.
#[derive(Debug, Clone)]
pub struct RegionIdAllocator {
    next: u64,
}

impl RegionIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> RegionId {
        let id = RegionId(self.next);
        self.next += 1;
        id
    }

    pub fn peek(&self) -> RegionId {
        RegionId(self.next)
    }
}

impl Default for RegionIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(SourceId);

impl SourceId {
    /// The device's own location feed.
    pub fn primary() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::primary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_starts_at_one_and_increments() {
        let mut ids = RegionIdAllocator::new();
        assert_eq!(ids.next_id(), RegionId::from_raw(1));
        assert_eq!(ids.next_id(), RegionId::from_raw(2));
        assert_eq!(ids.peek(), RegionId::from_raw(3));
    }

    #[test]
    fn primary_source_is_stable() {
        assert_eq!(SourceId::primary(), SourceId::default());
        assert_ne!(SourceId::new(), SourceId::primary());
    }
}

//! Variable and literal identifiers.
//!
//! `VarId` is the opaque, client-supplied identifier for a Boolean
//! variable. `Level` is the manager-internal position of
//! a variable in the current ordering; levels increase from root toward
//! leaves.

use std::fmt;

/// An opaque, client-supplied variable identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(transparent)]
pub struct VarId(pub u32);

impl VarId {
    #[inline]
    pub fn new(id: u32) -> Self {
        VarId(id)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u32> for VarId {
    fn from(id: u32) -> Self {
        VarId(id)
    }
}

/// The manager-internal position of a variable in the DAG's ordering.
/// Lower level is closer to the root.
pub type Level = u32;

/// Sentinel level used to mark the end of the registered variable
/// domain; also reserved as the dump format's end-of-nodes marker.
pub const LEVEL_SENTINEL: Level = u32::MAX;

/// A literal: a variable together with a polarity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Literal {
    pub var: VarId,
    /// `true` for the positive literal, `false` for the negative one.
    pub polarity: bool,
}

impl Literal {
    #[inline]
    pub fn positive(var: VarId) -> Self {
        Literal {
            var,
            polarity: true,
        }
    }

    #[inline]
    pub fn negative(var: VarId) -> Self {
        Literal {
            var,
            polarity: false,
        }
    }
}

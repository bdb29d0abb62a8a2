//! Operation selectors: the (family, kind) pair a node invokes.
//!
//! Families group related operations the way the editor groups node
//! archetypes. The numbering is part of the persisted graph format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation family ids.
pub mod family {
    /// Graph infrastructure: sink and random generators.
    pub const NUMBER_GRAPH: u16 = 1;
    /// Constant values.
    pub const CONSTANTS: u16 = 2;
    /// Scalar arithmetic.
    pub const MATH: u16 = 3;
    /// Parameter readers.
    pub const PARAMETERS: u16 = 6;
}

/// Identifies a registered operation by (family, kind).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpSelector {
    pub family: u16,
    pub kind: u16,
}

impl OpSelector {
    /// The sink ("main") node. Exactly one per graph.
    pub const MAIN: OpSelector = OpSelector::new(family::NUMBER_GRAPH, 1);
    pub const RANDOM_VECTOR3: OpSelector = OpSelector::new(family::NUMBER_GRAPH, 2);

    pub const CONST_BOOL: OpSelector = OpSelector::new(family::CONSTANTS, 1);
    pub const CONST_INTEGER: OpSelector = OpSelector::new(family::CONSTANTS, 2);
    pub const CONST_SCALAR: OpSelector = OpSelector::new(family::CONSTANTS, 3);
    pub const CONST_VECTOR2: OpSelector = OpSelector::new(family::CONSTANTS, 4);
    pub const CONST_VECTOR3: OpSelector = OpSelector::new(family::CONSTANTS, 5);
    pub const CONST_VECTOR4: OpSelector = OpSelector::new(family::CONSTANTS, 6);

    pub const ADD: OpSelector = OpSelector::new(family::MATH, 1);
    pub const SUBTRACT: OpSelector = OpSelector::new(family::MATH, 2);
    pub const MULTIPLY: OpSelector = OpSelector::new(family::MATH, 3);
    pub const MODULO: OpSelector = OpSelector::new(family::MATH, 4);
    pub const DIVIDE: OpSelector = OpSelector::new(family::MATH, 5);

    pub const PARAMETER_READ: OpSelector = OpSelector::new(family::PARAMETERS, 1);

    pub const fn new(family: u16, kind: u16) -> Self {
        Self { family, kind }
    }

    #[inline]
    pub fn is_main(self) -> bool {
        self == Self::MAIN
    }

    #[inline]
    pub fn is_constant(self) -> bool {
        self.family == family::CONSTANTS
    }

    #[inline]
    pub fn is_parameter_read(self) -> bool {
        self.family == family::PARAMETERS
    }
}

impl fmt::Debug for OpSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpSelector({}:{})", self.family, self.kind)
    }
}

impl fmt::Display for OpSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.kind)
    }
}

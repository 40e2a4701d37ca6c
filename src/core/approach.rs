//! Intersection topology: approaches and the two direction pairs.
//!
//! An intersection has a fixed set of approaches, split into two mutually
//! exclusive pairs that share a green phase. Pair membership is configuration;
//! the partition invariant is checked once when a controller is built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One of the traffic streams entering the intersection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Approach {
    North,
    East,
    South,
    West,
}

impl Approach {
    /// Every approach of the intersection, in clockwise order.
    pub const ALL: [Approach; 4] = [
        Approach::North,
        Approach::East,
        Approach::South,
        Approach::West,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of one of the two direction pairs.
///
/// Which approaches belong to each pair is held by [`PairGroups`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionPair {
    #[default]
    A,
    B,
}

impl DirectionPair {
    /// The pair that conflicts with this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for DirectionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// Approach membership of both direction pairs.
///
/// The default groups North/South as pair A and East/West as pair B.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairGroups {
    pub a: BTreeSet<Approach>,
    pub b: BTreeSet<Approach>,
}

impl Default for PairGroups {
    fn default() -> Self {
        Self {
            a: [Approach::North, Approach::South].into_iter().collect(),
            b: [Approach::East, Approach::West].into_iter().collect(),
        }
    }
}

impl PairGroups {
    pub fn new(
        a: impl IntoIterator<Item = Approach>,
        b: impl IntoIterator<Item = Approach>,
    ) -> Self {
        Self {
            a: a.into_iter().collect(),
            b: b.into_iter().collect(),
        }
    }

    /// Approaches that receive green together with `pair`.
    pub fn members(&self, pair: DirectionPair) -> &BTreeSet<Approach> {
        match pair {
            DirectionPair::A => &self.a,
            DirectionPair::B => &self.b,
        }
    }

    /// Approaches configured in either pair.
    pub fn approaches(&self) -> impl Iterator<Item = Approach> + '_ {
        self.a.iter().chain(self.b.iter()).copied()
    }

    /// Human-readable pair name built from its members, e.g. `North-South`.
    pub fn label(&self, pair: DirectionPair) -> String {
        self.members(pair)
            .iter()
            .map(Approach::name)
            .collect::<Vec<_>>()
            .join("-")
    }
}

//! Quarter-turn rotations and mirrors about the vertical axis.
//!
//! Positions and states are transformed with the same composition: rotate
//! about the local origin first, then mirror. Clockwise is as seen from above
//! (+Y), with north = -Z and east = +X.

use glam::IVec3;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Rotation about the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    None,
    Clockwise90,
    Clockwise180,
    CounterClockwise90,
}

impl Rotation {
    /// Every rotation, in draw order.
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Clockwise90,
        Rotation::Clockwise180,
        Rotation::CounterClockwise90,
    ];

    /// Draws a rotation uniformly. Always consumes exactly one value.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Number of clockwise quarter turns (0..4).
    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 1,
            Rotation::Clockwise180 => 2,
            Rotation::CounterClockwise90 => 3,
        }
    }
}

/// Mirror across a vertical plane through the local origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mirror {
    None,
    /// Flips the Z axis (north <-> south).
    LeftRight,
    /// Flips the X axis (east <-> west).
    FrontBack,
}

impl Mirror {
    /// Every mirror, in draw order.
    pub const ALL: [Mirror; 3] = [Mirror::None, Mirror::LeftRight, Mirror::FrontBack];

    /// Draws a mirror uniformly. Always consumes exactly one value.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Horizontal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Horizontal directions in clockwise order starting at north.
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "north" => Some(Direction::North),
            "east" => Some(Direction::East),
            "south" => Some(Direction::South),
            "west" => Some(Direction::West),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }

    /// Unit offset of this direction.
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::North => IVec3::NEG_Z,
            Direction::East => IVec3::X,
            Direction::South => IVec3::Z,
            Direction::West => IVec3::NEG_X,
        }
    }

    pub fn opposite(self) -> Self {
        self.rotate(Rotation::Clockwise180)
    }

    pub fn rotate(self, rotation: Rotation) -> Self {
        let index = Self::HORIZONTAL
            .iter()
            .position(|d| *d == self)
            .unwrap_or_default();
        Self::HORIZONTAL[(index + rotation.quarter_turns() as usize) % 4]
    }

    pub fn mirror(self, mirror: Mirror) -> Self {
        match (mirror, self) {
            (Mirror::LeftRight, Direction::North | Direction::South) => self.opposite(),
            (Mirror::FrontBack, Direction::East | Direction::West) => self.opposite(),
            _ => self,
        }
    }
}

/// Rotates `pos` about the origin, then mirrors it. Y is unchanged.
///
/// Negation wraps, so `i32::MIN` maps to itself.
pub fn transform_pos(pos: IVec3, rotation: Rotation, mirror: Mirror) -> IVec3 {
    let (x, y, z) = (pos.x, pos.y, pos.z);
    let (x, z) = match rotation {
        Rotation::None => (x, z),
        Rotation::Clockwise90 => (z.wrapping_neg(), x),
        Rotation::Clockwise180 => (x.wrapping_neg(), z.wrapping_neg()),
        Rotation::CounterClockwise90 => (z, x.wrapping_neg()),
    };
    match mirror {
        Mirror::None => IVec3::new(x, y, z),
        Mirror::LeftRight => IVec3::new(x, y, z.wrapping_neg()),
        Mirror::FrontBack => IVec3::new(x.wrapping_neg(), y, z),
    }
}

use glam::IVec3;

/// Inclusive axis-aligned bounding box over voxel coordinates.
///
/// Invariant: min.x <= max.x, min.y <= max.y, min.z <= max.z.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min: IVec3,
    pub max: IVec3,
}

impl Bounds {
    /// Create bounds from two corners. Automatically sorts components so
    /// that min <= max on every axis.
    pub fn new(a: IVec3, b: IVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Bounds covering a single voxel.
    pub fn of_point(p: IVec3) -> Self {
        Self { min: p, max: p }
    }

    /// Grows the bounds to cover `p`.
    pub fn include(&mut self, p: IVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Returns true if the voxel lies inside or on the boundary.
    pub fn contains(&self, p: IVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Returns the smallest box enclosing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the box shifted by `offset`.
    pub fn translate(&self, offset: IVec3) -> Bounds {
        Bounds {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Number of voxels along each axis.
    pub fn size(&self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }
}

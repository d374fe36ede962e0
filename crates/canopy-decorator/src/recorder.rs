//! Write-observing proxy over a [`VoxelGrid`].
//!
//! A [`RecordingEnvironment`] forwards every write to the wrapped grid and
//! remembers what was written: a bounding volume over all writes, and one
//! coordinate set per category for states the [`Classifier`] recognises.
//! It lives for a single placement call and is discarded afterwards.

use std::collections::BTreeMap;

use canopy_voxel::{Bounds, VoxelGrid, VoxelState};
use glam::IVec3;
use rustc_hash::FxHashSet;

/// Category of trunk-like writes under [`Classifier::tree`].
pub const TRUNK: &str = "trunk";
/// Category of foliage-like writes under [`Classifier::tree`].
pub const FOLIAGE: &str = "foliage";

/// Maps material tags to recording categories.
///
/// Rules are checked in order; the first tag the written state carries wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classifier {
    rules: Vec<(String, String)>,
}

impl Classifier {
    /// A classifier that records nothing but bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// `leaves` → [`FOLIAGE`], then `logs` → [`TRUNK`].
    pub fn tree() -> Self {
        Self::new().with("leaves", FOLIAGE).with("logs", TRUNK)
    }

    /// Appends a rule sending states tagged `tag` to `category`.
    pub fn with(mut self, tag: impl Into<String>, category: impl Into<String>) -> Self {
        self.rules.push((tag.into(), category.into()));
        self
    }

    pub fn classify(&self, state: &VoxelState) -> Option<&str> {
        self.rules
            .iter()
            .find(|(tag, _)| state.has_tag(tag))
            .map(|(_, category)| category.as_str())
    }
}

/// Builds the environment a decorated generator writes through.
pub trait WorldFactory {
    fn wrap<'w>(&self, world: &'w mut dyn VoxelGrid) -> RecordingEnvironment<'w>;
}

impl WorldFactory for Classifier {
    fn wrap<'w>(&self, world: &'w mut dyn VoxelGrid) -> RecordingEnvironment<'w> {
        RecordingEnvironment::new(world, self.clone())
    }
}

#[derive(Debug, Default)]
struct Bucket {
    positions: FxHashSet<IVec3>,
    /// Memoised ascending-height view; only rebuilt by `translate`.
    sorted: Option<Vec<IVec3>>,
}

impl Bucket {
    fn sorted(&mut self) -> &[IVec3] {
        self.sorted
            .get_or_insert_with(|| sort_by_height(&self.positions))
    }
}

fn sort_by_height(positions: &FxHashSet<IVec3>) -> Vec<IVec3> {
    let mut list: Vec<IVec3> = positions.iter().copied().collect();
    list.sort_unstable_by_key(|p| (p.y, p.x, p.z));
    list
}

/// Records writes to a borrowed grid while forwarding them.
///
/// Recorded coordinates are relative to a record origin (zero unless set).
/// [`translate`](Self::translate) moves everything recorded so far, so a
/// generator can record in local space and hand world-space coordinates to
/// decorators.
pub struct RecordingEnvironment<'w> {
    world: &'w mut dyn VoxelGrid,
    classifier: Classifier,
    origin: IVec3,
    bounds: Option<Bounds>,
    buckets: BTreeMap<String, Bucket>,
    writes: usize,
}

impl<'w> RecordingEnvironment<'w> {
    pub fn new(world: &'w mut dyn VoxelGrid, classifier: Classifier) -> Self {
        Self {
            world,
            classifier,
            origin: IVec3::ZERO,
            bounds: None,
            buckets: BTreeMap::new(),
            writes: 0,
        }
    }

    /// Subsequent writes are recorded relative to `origin`.
    pub fn set_record_origin(&mut self, origin: IVec3) {
        self.origin = origin;
    }

    pub fn record_origin(&self) -> IVec3 {
        self.origin
    }

    /// Shifts every recorded coordinate and the bounds by `offset`, and
    /// rebuilds the sorted views.
    ///
    /// Writes made afterwards are recorded in the shifted space.
    pub fn translate(&mut self, offset: IVec3) {
        self.origin -= offset;
        self.bounds = self.bounds.map(|b| b.translate(offset));
        for bucket in self.buckets.values_mut() {
            bucket.positions = bucket.positions.iter().map(|p| *p + offset).collect();
            bucket.sorted = Some(sort_by_height(&bucket.positions));
        }
    }

    /// Box around every write so far, `None` before the first write.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Number of writes observed, including ones the grid rejected.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Names of categories that have received at least one write.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn count(&self, category: &str) -> usize {
        self.buckets.get(category).map_or(0, |b| b.positions.len())
    }

    pub fn contains(&self, category: &str, pos: IVec3) -> bool {
        self.buckets
            .get(category)
            .is_some_and(|b| b.positions.contains(&pos))
    }

    /// Recorded coordinates of `category` in unspecified order.
    pub fn positions(&self, category: &str) -> impl Iterator<Item = IVec3> + '_ {
        self.buckets
            .get(category)
            .into_iter()
            .flat_map(|b| b.positions.iter().copied())
    }

    /// Recorded coordinates of `category` by ascending height (ties by X,
    /// then Z).
    ///
    /// The list is memoised; writes made after the first call appear only
    /// once [`translate`](Self::translate) rebuilds it.
    pub fn sorted(&mut self, category: &str) -> &[IVec3] {
        match self.buckets.get_mut(category) {
            Some(bucket) => bucket.sorted(),
            None => &[],
        }
    }

    pub fn trunk(&mut self) -> &[IVec3] {
        self.sorted(TRUNK)
    }

    pub fn foliage(&mut self) -> &[IVec3] {
        self.sorted(FOLIAGE)
    }

    fn record(&mut self, pos: IVec3, state: &VoxelState) {
        let local = pos - self.origin;
        self.writes += 1;
        match self.bounds.as_mut() {
            Some(bounds) => bounds.include(local),
            None => self.bounds = Some(Bounds::of_point(local)),
        }
        if let Some(category) = self.classifier.classify(state) {
            self.buckets
                .entry(category.to_string())
                .or_default()
                .positions
                .insert(local);
        }
    }
}

impl VoxelGrid for RecordingEnvironment<'_> {
    fn voxel(&self, pos: IVec3) -> VoxelState {
        self.world.voxel(pos)
    }

    fn set_voxel(&mut self, pos: IVec3, state: VoxelState, flags: u8) -> bool {
        self.record(pos, &state);
        self.world.set_voxel(pos, state, flags)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Prefabricated structures placed with a random orientation.
//!
//! Block coordinates are stored relative to a derived origin: the lowest
//! opaque block, with ties broken by distance to the horizontal centre of the
//! structure. Placing at `origin` puts that block exactly on `origin`.

use std::io::Read;

use canopy_voxel::{
    FeatureType, GenerationContext, Generator, Mirror, Rotation, Typed, UPDATE_CLIENTS, VoxelGrid,
    VoxelState, VoxelTypeRegistry, transform_pos,
};
use glam::IVec3;
use rand::RngCore;

use crate::config::TemplateConfig;
use crate::error::TemplateError;
use crate::nbt;

/// One block of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockRecord {
    /// Position relative to the template origin.
    pub pos: IVec3,
    pub state: VoxelState,
}

/// An immutable, origin-normalised block list.
#[derive(Clone, Debug)]
pub struct StructureTemplate {
    blocks: Vec<BlockRecord>,
    feature_type: FeatureType,
}

impl StructureTemplate {
    /// Loads a template from a structure file stream.
    ///
    /// Returns `None` when the stream is unreadable or malformed; the cause
    /// is logged at debug level. Use [`StructureTemplate::try_load`] to get
    /// the error itself.
    pub fn load(reader: impl Read, registry: &VoxelTypeRegistry) -> Option<Self> {
        match Self::try_load(reader, registry) {
            Ok(template) => Some(template),
            Err(err) => {
                tracing::debug!(%err, "template load failed");
                None
            }
        }
    }

    /// Loads a template from a structure file stream.
    pub fn try_load(reader: impl Read, registry: &VoxelTypeRegistry) -> Result<Self, TemplateError> {
        let blocks = nbt::read_blocks(reader, registry)?;
        Self::from_blocks(blocks)
    }

    /// Builds a template from blocks in absolute coordinates, deriving the
    /// origin and relativising every position against it.
    ///
    /// Without any opaque block the coordinates are kept as given. Fails with
    /// [`TemplateError::Extent`] when a relative position does not fit in `i32`.
    pub fn from_blocks(mut blocks: Vec<BlockRecord>) -> Result<Self, TemplateError> {
        if let Some(origin) = derive_origin(&blocks) {
            let relative = blocks
                .iter()
                .enumerate()
                .map(|(index, block)| {
                    relativize(block.pos, origin).ok_or(TemplateError::Extent { index })
                })
                .collect::<Result<Vec<_>, _>>()?;
            for (block, pos) in blocks.iter_mut().zip(relative) {
                block.pos = pos;
            }
        }
        Ok(Self {
            blocks,
            feature_type: FeatureType::default(),
        })
    }

    pub fn with_feature_type(mut self, feature_type: FeatureType) -> Self {
        self.feature_type = feature_type;
        self
    }

    pub fn blocks(&self) -> &[BlockRecord] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Places the template at `origin` with a random mirror and rotation.
    ///
    /// The mirror is drawn before the rotation. Returns `true` if any
    /// template block was written; footing writes alone do not count.
    pub fn place(
        &self,
        world: &mut dyn VoxelGrid,
        rng: &mut dyn RngCore,
        origin: IVec3,
        config: &TemplateConfig,
    ) -> bool {
        let mirror = Mirror::random(rng);
        let rotation = Rotation::random(rng);

        let mut placed = false;
        for block in &self.blocks {
            let state = block.state.rotate(rotation).mirror(mirror);
            if state.is_air() && !config.paste_air {
                continue;
            }

            let pos = transform_pos(block.pos, rotation, mirror).wrapping_add(origin);
            if block.pos.y <= 0 && block.state.is_full_cube() {
                place_footing(world, pos, &state, config.base_depth);
            }

            if !config.replace_solid && world.voxel(pos).is_opaque() {
                continue;
            }

            world.set_voxel(pos, state, UPDATE_CLIENTS);
            placed = true;
        }

        tracing::trace!(?origin, ?rotation, ?mirror, placed, "template placed");
        placed
    }
}

/// Fills below `pos` with `state` for up to `depth` voxels, stopping at the
/// first solid or opaque voxel.
fn place_footing(world: &mut dyn VoxelGrid, pos: IVec3, state: &VoxelState, depth: u32) {
    let mut pos = pos;
    for _ in 0..depth {
        let Some(y) = pos.y.checked_sub(1) else {
            return;
        };
        pos.y = y;
        let current = world.voxel(pos);
        if current.is_solid() || current.is_opaque() {
            return;
        }
        world.set_voxel(pos, state.clone(), UPDATE_CLIENTS);
    }
}

/// Finds the lowest opaque block closest to the horizontal centre.
///
/// The centre is half the X/Z extent of the block list, measured from zero.
/// Ties on distance keep the first block encountered.
fn derive_origin(blocks: &[BlockRecord]) -> Option<IVec3> {
    let first = blocks.first()?;
    let (min, max) = blocks.iter().fold((first.pos, first.pos), |(min, max), block| {
        (min.min(block.pos), max.max(block.pos))
    });
    // Squared distances on extreme coordinates exceed i64.
    let center_x = (i128::from(max.x) - i128::from(min.x)) / 2;
    let center_z = (i128::from(max.z) - i128::from(min.z)) / 2;
    let dist2 = |pos: IVec3| {
        let dx = center_x - i128::from(pos.x);
        let dz = center_z - i128::from(pos.z);
        dx * dx + dz * dz
    };

    let mut best: Option<(IVec3, i128)> = None;
    for block in blocks.iter().filter(|b| b.state.is_opaque()) {
        let d = dist2(block.pos);
        best = match best {
            Some((pos, best_d)) if pos.y < block.pos.y || (pos.y == block.pos.y && best_d <= d) => {
                Some((pos, best_d))
            }
            _ => Some((block.pos, d)),
        };
    }
    best.map(|(pos, _)| pos)
}

fn relativize(pos: IVec3, origin: IVec3) -> Option<IVec3> {
    Some(IVec3::new(
        pos.x.checked_sub(origin.x)?,
        pos.y.checked_sub(origin.y)?,
        pos.z.checked_sub(origin.z)?,
    ))
}

impl Generator for StructureTemplate {
    type Config = TemplateConfig;

    fn generate(
        &self,
        world: &mut dyn VoxelGrid,
        _ctx: &GenerationContext,
        rng: &mut dyn RngCore,
        origin: IVec3,
        config: &TemplateConfig,
    ) -> bool {
        self.place(world, rng, origin, config)
    }
}

impl Typed for StructureTemplate {
    fn feature_type(&self) -> FeatureType {
        self.feature_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_voxel::{SparseGrid, Transparency, VoxelTypeDef};
    use fastnbt::Value;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;
    use std::io::Write;

    fn registry() -> VoxelTypeRegistry {
        VoxelTypeRegistry::from_defs([
            VoxelTypeDef::solid("stone"),
            VoxelTypeDef::solid("planks"),
            VoxelTypeDef {
                name: "glass".to_string(),
                solid: true,
                transparency: Transparency::SemiTransparent,
                full_cube: true,
                tags: Vec::new(),
            },
            VoxelTypeDef {
                name: "torch".to_string(),
                solid: false,
                transparency: Transparency::FullyTransparent,
                full_cube: false,
                tags: Vec::new(),
            },
        ])
        .unwrap()
    }

    fn state(registry: &VoxelTypeRegistry, name: &str) -> VoxelState {
        registry.default_state(name).unwrap()
    }

    fn block(x: i32, y: i32, z: i32, state: &VoxelState) -> BlockRecord {
        BlockRecord {
            pos: IVec3::new(x, y, z),
            state: state.clone(),
        }
    }

    fn compound(entries: Vec<(&str, Value)>) -> Value {
        Value::Compound(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<HashMap<_, _>>(),
        )
    }

    fn nbt_block(state: i32, pos: [i32; 3]) -> Value {
        compound(vec![
            ("state", Value::Int(state)),
            ("pos", Value::List(pos.iter().map(|&c| Value::Int(c)).collect())),
        ])
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    fn structure_file(palette: Vec<Value>, blocks: Vec<Value>) -> Vec<u8> {
        let root = compound(vec![
            ("palette", Value::List(palette)),
            ("blocks", Value::List(blocks)),
        ]);
        gzip(&fastnbt::to_bytes(&root).unwrap())
    }

    fn named(name: &str) -> Value {
        compound(vec![("Name", Value::String(name.to_string()))])
    }

    #[test]
    fn test_origin_is_unique_lowest_opaque_block() {
        let reg = registry();
        let stone = state(&reg, "stone");
        let template = StructureTemplate::from_blocks(vec![
            block(2, 5, 2, &stone),
            block(1, 5, 1, &stone),
            block(4, 3, 0, &stone),
        ]).unwrap();
        let origin_block = template
            .blocks()
            .iter()
            .find(|b| b.pos == IVec3::ZERO)
            .expect("one block should sit on the origin");
        assert_eq!(origin_block.state, stone);
        assert_eq!(template.blocks()[2].pos, IVec3::ZERO, "the y=3 block should be the origin");
        assert_eq!(template.blocks()[0].pos, IVec3::new(-2, 2, 2));
    }

    #[test]
    fn test_origin_tie_prefers_block_nearest_center() {
        let reg = registry();
        let stone = state(&reg, "stone");
        // Extent 0..=4 on both axes, so the centre is (2, 2).
        let template = StructureTemplate::from_blocks(vec![
            block(0, 1, 0, &stone),
            block(2, 1, 3, &stone),
            block(4, 4, 4, &stone),
        ]).unwrap();
        assert_eq!(template.blocks()[1].pos, IVec3::ZERO, "the block at (2,1,3) is nearest the centre");
        assert_eq!(template.blocks()[0].pos, IVec3::new(-2, 0, -3));
    }

    #[test]
    fn test_origin_tie_on_distance_keeps_first() {
        let reg = registry();
        let stone = state(&reg, "stone");
        // Centre (1, 2); both y=0 blocks are one step away from it.
        let template = StructureTemplate::from_blocks(vec![
            block(0, 0, 2, &stone),
            block(2, 0, 2, &stone),
            block(1, 5, 0, &stone),
            block(1, 5, 4, &stone),
        ]).unwrap();
        assert_eq!(template.blocks()[0].pos, IVec3::ZERO);
        assert_eq!(template.blocks()[1].pos, IVec3::new(2, 0, 0));
    }

    #[test]
    fn test_origin_ignores_non_opaque_blocks() {
        let reg = registry();
        let torch = state(&reg, "torch");
        let glass = state(&reg, "glass");
        let stone = state(&reg, "stone");
        let template = StructureTemplate::from_blocks(vec![
            block(0, 0, 0, &torch),
            block(1, 0, 0, &glass),
            block(0, 2, 0, &stone),
        ]).unwrap();
        assert_eq!(template.blocks()[2].pos, IVec3::ZERO);
        assert_eq!(template.blocks()[0].pos, IVec3::new(0, -2, 0));
    }

    #[test]
    fn test_no_opaque_block_keeps_coordinates() {
        let reg = registry();
        let torch = state(&reg, "torch");
        let template = StructureTemplate::from_blocks(vec![block(5, 6, 7, &torch)]).unwrap();
        assert_eq!(template.blocks()[0].pos, IVec3::new(5, 6, 7));
        assert!(StructureTemplate::from_blocks(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_load_gzip_structure() {
        let reg = registry();
        let bytes = structure_file(
            vec![named("stone"), named("torch")],
            vec![nbt_block(0, [3, 1, 3]), nbt_block(1, [3, 2, 3])],
        );
        let template = StructureTemplate::load(bytes.as_slice(), &reg).expect("template should load");
        assert_eq!(template.len(), 2);
        assert_eq!(template.blocks()[0].pos, IVec3::ZERO);
        assert_eq!(template.blocks()[1].pos, IVec3::new(0, 1, 0));
        assert_eq!(template.blocks()[1].state.name(), "torch");
        assert_eq!(template.feature_type(), FeatureType::Structure);
    }

    #[test]
    fn test_load_uncompressed_structure() {
        let reg = registry();
        let root = compound(vec![
            ("palette", Value::List(vec![named("stone")])),
            ("blocks", Value::List(vec![nbt_block(0, [0, 0, 0])])),
        ]);
        let bytes = fastnbt::to_bytes(&root).unwrap();
        assert!(StructureTemplate::load(bytes.as_slice(), &reg).is_some());
    }

    #[test]
    fn test_load_reads_properties() {
        let reg = registry();
        let palette = vec![compound(vec![
            ("Name", Value::String("torch".to_string())),
            (
                "Properties",
                compound(vec![("facing", Value::String("east".to_string()))]),
            ),
        ])];
        let bytes = structure_file(palette, vec![nbt_block(0, [0, 0, 0])]);
        let template = StructureTemplate::load(bytes.as_slice(), &reg).unwrap();
        assert_eq!(template.blocks()[0].state.property("facing"), Some("east"));
    }

    #[test]
    fn test_corrupt_palette_entry_becomes_air() {
        let reg = registry();
        let bad_property = compound(vec![
            ("Name", Value::String("torch".to_string())),
            ("Properties", compound(vec![("lit", Value::Byte(1))])),
        ]);
        let bytes = structure_file(
            vec![
                named("stone"),
                named("unobtainium"),
                compound(vec![("Nom", Value::String("stone".to_string()))]),
                bad_property,
            ],
            vec![
                nbt_block(0, [0, 0, 0]),
                nbt_block(1, [0, 1, 0]),
                nbt_block(2, [0, 2, 0]),
                nbt_block(3, [0, 3, 0]),
            ],
        );
        let template = StructureTemplate::load(bytes.as_slice(), &reg).expect("bad entries are not fatal");
        assert_eq!(template.blocks()[0].state.name(), "stone");
        for block in &template.blocks()[1..] {
            assert!(block.state.is_air(), "undecodable palette entry should read as air");
        }
    }

    #[test]
    fn test_missing_lists_are_absent() {
        let reg = registry();
        let root = compound(vec![("palette", Value::List(vec![named("stone")]))]);
        let bytes = gzip(&fastnbt::to_bytes(&root).unwrap());
        assert!(matches!(
            StructureTemplate::try_load(bytes.as_slice(), &reg),
            Err(TemplateError::MissingKey("blocks"))
        ));
        assert!(StructureTemplate::load(bytes.as_slice(), &reg).is_none());
    }

    #[test]
    fn test_bad_block_entries_are_absent() {
        let reg = registry();
        let out_of_range = structure_file(vec![named("stone")], vec![nbt_block(3, [0, 0, 0])]);
        assert!(matches!(
            StructureTemplate::try_load(out_of_range.as_slice(), &reg),
            Err(TemplateError::PaletteIndex { state: 3, len: 1, .. })
        ));

        let short_pos = structure_file(
            vec![named("stone")],
            vec![compound(vec![
                ("state", Value::Int(0)),
                ("pos", Value::List(vec![Value::Int(1), Value::Int(2)])),
            ])],
        );
        assert!(matches!(
            StructureTemplate::try_load(short_pos.as_slice(), &reg),
            Err(TemplateError::Position { len: 2, .. })
        ));
    }

    #[test]
    fn test_corrupt_stream_is_absent() {
        let reg = registry();
        let mut bytes = structure_file(vec![named("stone")], vec![nbt_block(0, [0, 0, 0])]);
        bytes.truncate(bytes.len() / 2);
        assert!(StructureTemplate::load(bytes.as_slice(), &reg).is_none());
        assert!(StructureTemplate::load(&b"not nbt"[..], &reg).is_none());
    }

    #[test]
    fn test_extreme_coordinates_are_rejected() {
        let reg = registry();
        let stone = state(&reg, "stone");
        let spread = vec![block(i32::MIN, 0, 0, &stone), block(i32::MAX, 0, 0, &stone)];
        assert!(matches!(
            StructureTemplate::from_blocks(spread),
            Err(TemplateError::Extent { index: 0 })
        ));

        let bytes = structure_file(
            vec![named("stone")],
            vec![nbt_block(0, [i32::MIN, 0, 0]), nbt_block(0, [i32::MAX, 0, 0])],
        );
        assert!(StructureTemplate::load(bytes.as_slice(), &reg).is_none());
    }

    #[test]
    fn test_extreme_coordinates_within_range_load() {
        let reg = registry();
        let stone = state(&reg, "stone");
        let template = StructureTemplate::from_blocks(vec![
            block(i32::MAX, i32::MIN, i32::MAX, &stone),
            block(i32::MAX - 1, i32::MIN + 1, i32::MAX, &stone),
        ])
        .unwrap();
        assert_eq!(template.blocks()[0].pos, IVec3::ZERO);
        assert_eq!(template.blocks()[1].pos, IVec3::new(-1, 1, 0));
    }

    #[test]
    fn test_place_near_coordinate_limits_wraps() {
        let reg = registry();
        let planks = state(&reg, "planks");
        let template =
            StructureTemplate::from_blocks(vec![block(0, 0, 0, &planks), block(1, 0, 0, &planks)]).unwrap();
        let config = TemplateConfig {
            base_depth: 2,
            ..TemplateConfig::default()
        };
        for seed in 0..8 {
            let mut grid = SparseGrid::new(0, 64);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let origin = IVec3::new(i32::MAX, 10, i32::MIN);
            assert!(template.place(&mut grid, &mut rng, origin, &config));
            assert_eq!(grid.voxel(origin), planks);
        }
    }

    fn house(reg: &VoxelTypeRegistry) -> StructureTemplate {
        let planks = state(reg, "planks");
        let mut blocks = Vec::new();
        for x in 0..3 {
            for z in 0..3 {
                blocks.push(block(x, 0, z, &planks));
                blocks.push(block(x, 2, z, &planks));
            }
        }
        blocks.push(block(1, 1, 1, &VoxelState::air()));
        StructureTemplate::from_blocks(blocks).unwrap()
    }

    #[test]
    fn test_replace_solid_false_never_overwrites_opaque() {
        let reg = registry();
        let stone = state(&reg, "stone");
        let template = house(&reg);
        let config = TemplateConfig::default();

        for seed in 0..16 {
            let mut grid = SparseGrid::new(0, 64);
            let origin = IVec3::new(0, 10, 0);
            let occupied = [origin, origin + IVec3::new(1, 2, 0), origin + IVec3::new(-1, 0, 1)];
            for pos in occupied {
                grid.set_voxel(pos, stone.clone(), UPDATE_CLIENTS);
            }
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert!(template.place(&mut grid, &mut rng, origin, &config));
            for pos in occupied {
                assert_eq!(grid.voxel(pos), stone, "seed {seed}: opaque voxel at {pos} was replaced");
            }
        }
    }

    #[test]
    fn test_replace_solid_true_overwrites() {
        let reg = registry();
        let stone = state(&reg, "stone");
        let template = house(&reg);
        let mut grid = SparseGrid::new(0, 64);
        let origin = IVec3::new(0, 10, 0);
        grid.set_voxel(origin, stone, UPDATE_CLIENTS);

        let config = TemplateConfig {
            replace_solid: true,
            ..TemplateConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(template.place(&mut grid, &mut rng, origin, &config));
        assert_eq!(grid.voxel(origin).name(), "planks");
    }

    #[test]
    fn test_all_skipped_reports_failure() {
        let reg = registry();
        let stone = state(&reg, "stone");
        let template = StructureTemplate::from_blocks(vec![block(0, 0, 0, &stone)]).unwrap();
        let mut grid = SparseGrid::new(0, 64);
        grid.set_voxel(IVec3::new(4, 4, 4), stone, UPDATE_CLIENTS);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(!template.place(&mut grid, &mut rng, IVec3::new(4, 4, 4), &TemplateConfig::default()));
    }

    #[test]
    fn test_air_skipped_unless_paste_air() {
        let reg = registry();
        let template = house(&reg);
        let origin = IVec3::new(0, 10, 0);
        let hollow = origin + IVec3::Y;

        let mut grid = SparseGrid::new(0, 64);
        grid.set_voxel(hollow, state(&reg, "torch"), UPDATE_CLIENTS);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        template.place(&mut grid, &mut rng, origin, &TemplateConfig::default());
        assert_eq!(grid.voxel(hollow).name(), "torch", "air cells are skipped by default");

        let config = TemplateConfig {
            paste_air: true,
            ..TemplateConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        template.place(&mut grid, &mut rng, origin, &config);
        assert!(grid.voxel(hollow).is_air(), "air cells carve out the interior");
    }

    #[test]
    fn test_footing_descends_at_most_base_depth() {
        let reg = registry();
        let planks = state(&reg, "planks");
        let template = StructureTemplate::from_blocks(vec![block(0, 0, 0, &planks)]).unwrap();
        let mut grid = SparseGrid::new(0, 64);
        let origin = IVec3::new(0, 20, 0);
        let config = TemplateConfig {
            base_depth: 3,
            ..TemplateConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(template.place(&mut grid, &mut rng, origin, &config));
        for dy in 1..=3 {
            assert_eq!(grid.voxel(origin - IVec3::new(0, dy, 0)), planks, "footing at depth {dy}");
        }
        assert!(grid.voxel(origin - IVec3::new(0, 4, 0)).is_air(), "footing stops at base_depth");
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_footing_stops_at_solid_ground() {
        let reg = registry();
        let planks = state(&reg, "planks");
        let stone = state(&reg, "stone");
        let template = StructureTemplate::from_blocks(vec![block(0, 0, 0, &planks)]).unwrap();
        let mut grid = SparseGrid::new(0, 64);
        let origin = IVec3::new(0, 20, 0);
        let ground = origin - IVec3::new(0, 2, 0);
        let below = ground - IVec3::Y;
        grid.set_voxel(ground, stone.clone(), UPDATE_CLIENTS);

        let config = TemplateConfig {
            base_depth: 8,
            ..TemplateConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        template.place(&mut grid, &mut rng, origin, &config);
        assert_eq!(grid.voxel(origin - IVec3::Y), planks);
        assert_eq!(grid.voxel(ground), stone, "footing never replaces solid ground");
        assert!(grid.voxel(below).is_air(), "footing never passes through solid ground");
    }

    #[test]
    fn test_footing_only_under_full_cube_base_blocks() {
        let reg = registry();
        let torch = state(&reg, "torch");
        let planks = state(&reg, "planks");
        let template = StructureTemplate::from_blocks(vec![
            block(0, 0, 0, &planks),
            block(0, 0, 1, &torch),
            block(0, 1, 1, &planks),
        ]).unwrap();
        let config = TemplateConfig {
            base_depth: 2,
            ..TemplateConfig::default()
        };
        let mut grid = SparseGrid::new(0, 64);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        template.place(&mut grid, &mut rng, IVec3::new(0, 20, 0), &config);
        // one planks footing column of 2, plus the three template blocks
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.iter().filter(|(_, s)| s.name() == "torch").count(), 1);
    }

    #[test]
    fn test_placement_is_deterministic_per_seed() {
        let reg = registry();
        let planks = state(&reg, "planks");
        let template = StructureTemplate::from_blocks(vec![
            block(0, 0, 0, &planks),
            block(1, 0, 0, &planks),
            block(2, 0, 1, &planks),
        ]).unwrap();
        let run = |seed: u64| {
            let mut grid = SparseGrid::new(0, 64);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            template.place(&mut grid, &mut rng, IVec3::new(8, 8, 8), &TemplateConfig::default());
            let mut cells: Vec<IVec3> = grid.iter().map(|(p, _)| p).collect();
            cells.sort_by_key(|p| (p.x, p.y, p.z));
            cells
        };
        assert_eq!(run(42), run(42));
        assert!(run(42).contains(&IVec3::new(8, 8, 8)), "the origin block lands on the origin");
    }

    #[test]
    fn test_generator_and_typed() {
        let reg = registry();
        let stone = state(&reg, "stone");
        let template =
            StructureTemplate::from_blocks(vec![block(0, 0, 0, &stone)]).unwrap().with_feature_type(FeatureType::Tree);
        assert_eq!(template.feature_type(), FeatureType::Tree);

        let mut grid = SparseGrid::new(0, 64);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let ctx = GenerationContext::default();
        assert!(template.generate(&mut grid, &ctx, &mut rng, IVec3::new(1, 2, 3), &TemplateConfig::default()));
        assert_eq!(grid.voxel(IVec3::new(1, 2, 3)), stone);
    }
}

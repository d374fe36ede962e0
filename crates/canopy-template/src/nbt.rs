//! Structure file decoding.
//!
//! ## Layout
//!
//! A gzip-compressed NBT compound with (at least):
//!
//! | Key | Type | Content |
//! |-----|------|---------|
//! | `palette` | List of Compound | `{ Name: String, Properties?: Compound of String }` |
//! | `blocks` | List of Compound | `{ state: Int (palette index), pos: List of 3 Int }` |
//!
//! Uncompressed NBT is accepted as well.

use std::collections::HashMap;
use std::io::Read;

use canopy_voxel::{VoxelState, VoxelTypeRegistry};
use fastnbt::Value;
use flate2::read::GzDecoder;
use glam::IVec3;
use serde::Deserialize;

use crate::error::{PaletteEntryError, TemplateError};
use crate::template::BlockRecord;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Deserialize)]
struct RawTemplate {
    palette: Option<Vec<Value>>,
    blocks: Option<Vec<RawBlock>>,
}

#[derive(Deserialize)]
struct RawBlock {
    state: i32,
    pos: Vec<i32>,
}

/// Reads the whole stream, inflating it if it is gzip-compressed.
fn read_nbt(mut reader: impl Read) -> Result<Vec<u8>, TemplateError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    if raw.starts_with(&GZIP_MAGIC) {
        let mut inflated = Vec::new();
        GzDecoder::new(raw.as_slice()).read_to_end(&mut inflated)?;
        Ok(inflated)
    } else {
        Ok(raw)
    }
}

/// Decodes every block of a structure file, in file order, with absolute
/// positions.
pub(crate) fn read_blocks(
    reader: impl Read,
    registry: &VoxelTypeRegistry,
) -> Result<Vec<BlockRecord>, TemplateError> {
    let bytes = read_nbt(reader)?;
    let root: RawTemplate = fastnbt::from_bytes(&bytes)?;
    let palette = root.palette.ok_or(TemplateError::MissingKey("palette"))?;
    let blocks = root.blocks.ok_or(TemplateError::MissingKey("blocks"))?;

    let palette: Vec<VoxelState> = palette
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            read_state(entry, registry).unwrap_or_else(|err| {
                tracing::debug!(index, %err, "palette entry replaced with air");
                VoxelState::air()
            })
        })
        .collect();

    blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let state = usize::try_from(block.state)
                .ok()
                .and_then(|i| palette.get(i))
                .ok_or(TemplateError::PaletteIndex {
                    index,
                    state: block.state,
                    len: palette.len(),
                })?;
            let [x, y, z] = block.pos[..] else {
                return Err(TemplateError::Position {
                    index,
                    len: block.pos.len(),
                });
            };
            Ok(BlockRecord {
                pos: IVec3::new(x, y, z),
                state: state.clone(),
            })
        })
        .collect()
}

/// Decodes one palette entry against the registry.
fn read_state(entry: &Value, registry: &VoxelTypeRegistry) -> Result<VoxelState, PaletteEntryError> {
    let Value::Compound(fields) = entry else {
        return Err(PaletteEntryError::NotCompound);
    };
    let Some(Value::String(name)) = fields.get("Name") else {
        return Err(PaletteEntryError::MissingName);
    };
    let mut state = registry
        .default_state(name)
        .ok_or_else(|| PaletteEntryError::UnknownVoxel(name.clone()))?;

    if let Some(Value::Compound(properties)) = fields.get("Properties") {
        state = apply_properties(state, properties)?;
    }
    Ok(state)
}

fn apply_properties(
    mut state: VoxelState,
    properties: &HashMap<String, Value>,
) -> Result<VoxelState, PaletteEntryError> {
    for (key, value) in properties {
        let Value::String(value) = value else {
            return Err(PaletteEntryError::Property(key.clone()));
        };
        state = state.with_property(key.clone(), value.clone());
    }
    Ok(state)
}

//! Template error types.

/// Errors that abort loading a whole template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The stream could not be read or decompressed.
    #[error("failed to read template stream: {0}")]
    Io(#[from] std::io::Error),

    /// The NBT structure does not have the expected shape.
    #[error("malformed template data: {0}")]
    Nbt(#[from] fastnbt::error::Error),

    /// A required top-level list is absent.
    #[error("template has no `{0}` list")]
    MissingKey(&'static str),

    /// A block references a palette entry that does not exist.
    #[error("block {index} references palette entry {state}, palette has {len}")]
    PaletteIndex { index: usize, state: i32, len: usize },

    /// A block position is not an X/Y/Z triple.
    #[error("block {index} position has {len} components, expected 3")]
    Position { index: usize, len: usize },

    /// A block lies too far from the derived origin for an `i32` offset.
    #[error("block {index} is out of range of the template origin")]
    Extent { index: usize },
}

/// Reasons a single palette entry falls back to air.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PaletteEntryError {
    #[error("entry is not a compound")]
    NotCompound,
    #[error("entry has no string `Name`")]
    MissingName,
    #[error("unknown voxel type `{0}`")]
    UnknownVoxel(String),
    #[error("property `{0}` is not a string")]
    Property(String),
}

/// Errors raised while loading a template manifest.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// Failed to read the manifest from disk.
    #[error("failed to read template manifest: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to parse the RON manifest.
    #[error("failed to parse template manifest: {0}")]
    Parse(#[source] ron::error::SpannedError),
}

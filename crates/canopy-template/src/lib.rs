//! Prefabricated voxel structures.
//!
//! A [`StructureTemplate`] is decoded once from a palette-indexed structure
//! file and placed any number of times with a random mirror and rotation.
//! [`TemplateLibrary`] loads a set of named templates from a manifest.

mod config;
mod error;
mod library;
mod nbt;
mod template;

pub use config::TemplateConfig;
pub use error::{LibraryError, TemplateError};
pub use library::{TemplateFeature, TemplateLibrary};
pub use template::{BlockRecord, StructureTemplate};

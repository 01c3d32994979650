//! LDM Vocabulary - shape index
//!
//! Indexes a SHACL vocabulary graph by property and by class:
//! - [`VocabularyIndex`] answers shape, label and namespace lookups
//! - [`Shape`] holds the constraints of one property
//! - [`ClassShape`] describes what a new entity of given types may have
//! - [`ShapeResolution`] decides between conflicting shapes of several types
//!
//! # Example
//!
//! ```rust,ignore
//! use ldm_vocabulary::VocabularyIndex;
//!
//! let index = VocabularyIndex::from_graph(vocabulary_graph);
//! let shape = index.shape_for(&subject_types, &property);
//! println!("{} allows at most {:?} values", index.label_of(&property), shape.max_count);
//! ```

#![warn(unreachable_pub)]

pub mod index;
pub mod namespace;
pub mod shape;

pub use index::VocabularyIndex;
pub use namespace::Namespace;
pub use shape::{ClassShape, Shape, ShapeResolution};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Runtime: section assembly and the linear summarization pipeline.
//!
//! extract → split/score → assemble → rewrite → return.

pub mod pipeline;
pub mod sections;

pub use pipeline::{HybridDraft, Pipeline};
pub use sections::{assemble, condense, AssembledSections, Section, SectionKind};

//! Rollup synthesis - the core of the crate.
//!
//! A rollup applies an aggregate function to a column reached across a
//! relationship. This module resolves the relationship's concrete topology
//! ([`topology`]), then emits a correlated aggregate subquery fragment
//! ([`synth`]) the caller embeds into an outer statement ([`fragment`]).
//!
//! All failures ([`error`]) are synchronous, terminal, and carry enough
//! context for the embedding system to surface a precise diagnostic.

mod error;
mod fragment;
mod synth;
mod topology;

pub use error::{RollupError, RollupResult};
pub use fragment::Fragment;
pub use synth::{
    unique_source_alias, RollupSynthesizer, SynthOptions, ROLLUP_SOURCE_ALIAS,
};
pub use topology::{DirectLink, JunctionTopology, RelationTopology};

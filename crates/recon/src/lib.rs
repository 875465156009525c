//! `targetdiff-recon` — reference/variant target reconciliation engine.
//!
//! Splits the targets of a variant file into those shared verbatim with a
//! reference file (common), those sharing a position key with it
//! (semi-common) and the rest (unique).

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod model;
pub mod normalize;
pub mod output;

pub use config::ReconConfig;
pub use engine::{reconcile, run};
pub use error::ReconError;
pub use model::{
    ArtifactPaths, Classification, PositionKey, ReconInput, ReconReport, Record, RecordSet,
    ResultSet, TargetClass,
};

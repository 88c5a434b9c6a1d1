//! Descriptor estimators
//!
//! Each estimator is a pure function from provider output to one part of
//! the final record:
//! - Key (dominant pitch class)
//! - Rhythm summary (tempo, beat/onset counts, inter-beat regularity)
//! - Spectral summary (series means)
//! - Energy (mean RMS)
//! - Danceability (centroid stability)
//! - Sections (duration-proportional heuristic)

mod danceability;
mod energy;
mod key;
mod rhythm;
mod sections;
mod spectral;

pub use danceability::{estimate_danceability, DANCEABILITY_FALLBACK};
pub use energy::estimate_energy;
pub use key::estimate_key;
pub use rhythm::{rhythm_regularity, summarize_rhythm};
pub use sections::segment_sections;
pub use spectral::summarize_spectral;

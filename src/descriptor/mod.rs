//! Descriptor record returned by an analysis

mod result;

pub use result::{
    AnalysisResult, RhythmFeatures, Section, SectionType, SpectralFeatures, TIME_SIGNATURE,
};

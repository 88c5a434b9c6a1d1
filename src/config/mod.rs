//! Configuration module for trackscope

mod segmentation;
mod settings;

pub use segmentation::{SectionConfidence, SegmentationConfig};
pub use settings::{AnalysisConfig, DEFAULT_EXTENSIONS, DEFAULT_MAX_FILE_SIZE};

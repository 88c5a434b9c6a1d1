// src/core/analysis/key.rs
//
// Key estimation: the pitch class with the highest time-averaged chroma energy.

use crate::core::dsp::stats::argmax;
use crate::core::types::{ChromaMatrix, PITCH_CLASS_NAMES};

/// Name of the dominant pitch class. Ties go to the lowest pitch class;
/// an empty chromagram yields "C".
pub fn estimate_key(chroma: &ChromaMatrix) -> &'static str {
    let means = chroma.pitch_class_means();
    let index = argmax(&means).unwrap_or(0);
    PITCH_CLASS_NAMES[index]
}

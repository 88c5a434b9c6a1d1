//! Digital signal processing primitives behind the default provider

pub mod chroma;
pub mod fft;
pub mod mfcc;
pub mod rhythm;
pub mod spectral;
pub mod stats;

pub use fft::{Spectrogram, Stft};

// src/core/types.rs
//
// Intermediate data exchanged between the signal-analysis provider and
// the descriptor estimators.

/// Number of pitch classes in a chroma vector
pub const PITCH_CLASSES: usize = 12;

/// Pitch-class names in chromatic order starting at C
pub const PITCH_CLASS_NAMES: [&str; PITCH_CLASSES] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Mono waveform handed to the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Length in seconds; 0.0 when the sample rate is unknown
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Chromagram: 12 pitch-class rows by N time frames, stored frame-major
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChromaMatrix {
    frames: Vec<[f32; PITCH_CLASSES]>,
}

impl ChromaMatrix {
    pub fn from_frames(frames: Vec<[f32; PITCH_CLASSES]>) -> Self {
        Self { frames }
    }

    /// Build from 12 rows of equal length (row `p` = energy of pitch class `p`
    /// over time). Shorter rows are padded with zeros.
    pub fn from_rows(rows: &[Vec<f32>; PITCH_CLASSES]) -> Self {
        let num_frames = rows.iter().map(Vec::len).max().unwrap_or(0);
        let frames = (0..num_frames)
            .map(|t| {
                let mut frame = [0.0f32; PITCH_CLASSES];
                for (p, row) in rows.iter().enumerate() {
                    frame[p] = row.get(t).copied().unwrap_or(0.0);
                }
                frame
            })
            .collect();
        Self { frames }
    }

    pub fn frames(&self) -> &[[f32; PITCH_CLASSES]] {
        &self.frames
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Time-averaged energy per pitch class; all zeros when there are no frames
    pub fn pitch_class_means(&self) -> [f64; PITCH_CLASSES] {
        let mut sums = [0.0f64; PITCH_CLASSES];
        if self.frames.is_empty() {
            return sums;
        }
        for frame in &self.frames {
            for (sum, &v) in sums.iter_mut().zip(frame.iter()) {
                *sum += v as f64;
            }
        }
        let n = self.frames.len() as f64;
        sums.map(|s| s / n)
    }
}

/// Beat tracker output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeatTimeline {
    /// Tempo estimate in BPM; 0.0 when no pulse was found
    pub tempo: f64,
    /// Strictly increasing beat times in seconds
    pub beat_times: Vec<f64>,
}

impl BeatTimeline {
    pub fn new(tempo: f64, beat_times: Vec<f64>) -> Self {
        Self { tempo, beat_times }
    }
}

// src/core/analysis/sections.rs
//
// Section segmentation. Boundaries are derived from the track duration alone:
// fixed fractions of the duration, each capped at a maximum length after the
// previous boundary. No audio content is consulted.

use crate::config::SegmentationConfig;
use crate::descriptor::{Section, SectionType};

/// Split `[0, duration]` into labelled, contiguous sections.
///
/// The list is never empty, starts at 0.0 and ends at `duration`.
pub fn segment_sections(duration: f64, config: &SegmentationConfig) -> Vec<Section> {
    let d = duration;
    let conf = &config.confidence;

    if d < config.short_track_secs {
        return vec![Section::new(0.0, d, SectionType::FullSong, conf.full_song)];
    }

    let mut sections = Vec::with_capacity(5);

    let intro_end = (d * config.intro_fraction).min(config.intro_max_secs);
    sections.push(Section::new(0.0, intro_end, SectionType::Intro, conf.intro));

    let verse_end = (d * config.verse_fraction).min(intro_end + config.verse_max_secs);
    sections.push(Section::new(intro_end, verse_end, SectionType::Verse, conf.verse));

    let chorus_end = (d * config.chorus_fraction).min(verse_end + config.chorus_max_secs);
    sections.push(Section::new(verse_end, chorus_end, SectionType::Chorus, conf.chorus));

    let outro_start = if d > config.bridge_min_track_secs {
        let bridge_end = (d * config.bridge_fraction).min(chorus_end + config.bridge_max_secs);
        sections.push(Section::new(chorus_end, bridge_end, SectionType::Bridge, conf.bridge));
        bridge_end
    } else {
        chorus_end
    };

    sections.push(Section::new(outro_start, d, SectionType::Outro, conf.outro));
    sections
}

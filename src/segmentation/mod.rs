/*!
 * Segmentation engine: recognizer tokens in, subtitle entries out.
 *
 * The stages run strictly forward and share no state between calls:
 * - `words`: glue sub-word tokens into words
 * - `segmenter`: close candidate segments at gaps, speaker changes and sentence ends
 * - `readability`: split segments that break duration/speed/length bounds, merge short ones
 * - `layout`: wrap each segment's text into a bounded number of lines
 * - `punctuation`: character sets and the safe-boundary rule shared by all stages
 */

pub mod layout;
pub mod punctuation;
pub mod readability;
pub mod segmenter;
pub mod words;

use log::debug;

use crate::app_config::SubtitleConfig;
use crate::errors::SegmentationError;
use crate::subtitle_processor::SubtitleEntry;
use crate::transcript::Token;

pub use layout::{LayoutOptions, wrap_segment};
pub use readability::{ReadabilityLimits, enforce_readability};
pub use segmenter::{Segment, SegmenterOptions, build_segments};
pub use words::{Word, tokens_to_words};

impl From<&SubtitleConfig> for SegmenterOptions {
    fn from(config: &SubtitleConfig) -> Self {
        Self {
            gap_ms: config.gap_ms,
            split_on_speaker: config.split_on_speaker,
            segment_on_sentence: config.segment_on_sentence,
        }
    }
}

impl From<&SubtitleConfig> for ReadabilityLimits {
    fn from(config: &SubtitleConfig) -> Self {
        Self {
            max_cps: config.max_cps,
            min_dur_ms: config.min_dur_ms,
            max_dur_ms: config.max_dur_ms,
            max_chars: Some(config.max_chars()),
            use_ellipses: config.ellipses,
            preserve_sentence_breaks: config.segment_on_sentence,
        }
    }
}

impl<'a> From<&'a SubtitleConfig> for LayoutOptions<'a> {
    fn from(config: &'a SubtitleConfig) -> Self {
        Self {
            max_cpl: config.max_cpl,
            max_lines: config.max_lines,
            delimiters: &config.line_split_delimiters,
        }
    }
}

/// Turn tokens into finished segments: words, candidate segments, then the
/// split and merge passes. An empty result is not an error here.
pub fn tokens_to_segments(tokens: &[Token], config: &SubtitleConfig) -> Vec<Segment> {
    let words = tokens_to_words(tokens);
    let segments = build_segments(&words, config.into());
    if segments.is_empty() {
        return segments;
    }
    enforce_readability(segments, &config.into())
}

/// Render finished segments as numbered entries
pub fn render_segments(segments: &[Segment], config: &SubtitleConfig) -> Vec<SubtitleEntry> {
    let options = LayoutOptions::from(config);
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            SubtitleEntry::new(
                i + 1,
                segment.start_ms,
                segment.end_ms,
                wrap_segment(segment, &options),
            )
        })
        .collect()
}

/// Full pipeline; an empty entry list for trivial input
pub fn generate_entries(tokens: &[Token], config: &SubtitleConfig) -> Vec<SubtitleEntry> {
    let segments = tokens_to_segments(tokens, config);
    let entries = render_segments(&segments, config);
    debug!("Generated {} subtitle entries from {} tokens", entries.len(), tokens.len());
    entries
}

/// Full pipeline, treating an empty result as a failure
pub fn generate_entries_strict(
    tokens: &[Token],
    config: &SubtitleConfig,
) -> Result<Vec<SubtitleEntry>, SegmentationError> {
    let entries = generate_entries(tokens, config);
    if entries.is_empty() {
        return Err(SegmentationError::NoSegments);
    }
    Ok(entries)
}

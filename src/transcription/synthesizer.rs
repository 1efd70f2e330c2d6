/*!
 * Turns recognized segments into numbered subtitle entries.
 *
 * Two renderings are supported:
 * - `Simple`: one entry per segment with the segment text verbatim
 * - `WordHighlight`: one entry per token, each showing the full segment line
 *   with the token's surface wrapped in highlight markup
 *
 * Numbering is one continuous counter over the whole output.
 */

use log::debug;

use crate::highlight;
use crate::subtitle_processor::SubtitleEntry;
use crate::transcription::segment::Segment;

/// Rendering mode for synthesized subtitles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthesisMode {
    /// One entry per segment
    #[default]
    Simple,
    /// One entry per token with the token highlighted (karaoke)
    WordHighlight,
}

/// Builds subtitle entries from segments
#[derive(Debug, Clone, Default)]
pub struct SubtitleSynthesizer {
    mode: SynthesisMode,
}

impl SubtitleSynthesizer {
    pub fn new(mode: SynthesisMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SynthesisMode {
        self.mode
    }

    /// Produce the ordered entry list for `segments`
    pub fn synthesize(&self, segments: &[Segment]) -> Vec<SubtitleEntry> {
        let mut entries = Vec::with_capacity(segments.len());
        let mut next_index = 1;

        for segment in segments {
            match self.mode {
                SynthesisMode::Simple => {
                    entries.push(Self::whole_line(segment, next_index));
                    next_index += 1;
                }
                SynthesisMode::WordHighlight => {
                    let produced = Self::highlighted_lines(segment, next_index);
                    if produced.is_empty() {
                        entries.push(Self::whole_line(segment, next_index));
                        next_index += 1;
                    } else {
                        next_index += produced.len();
                        entries.extend(produced);
                    }
                }
            }
        }

        debug!(
            "Synthesized {} entries from {} segments ({:?})",
            entries.len(),
            segments.len(),
            self.mode
        );
        entries
    }

    fn whole_line(segment: &Segment, index: usize) -> SubtitleEntry {
        SubtitleEntry::new(index, segment.start, segment.end, segment.text.clone())
    }

    /// One entry per non-empty token; empty when the segment has no usable tokens
    fn highlighted_lines(segment: &Segment, first_index: usize) -> Vec<SubtitleEntry> {
        let Some(tokens) = segment.tokens.as_ref() else {
            return Vec::new();
        };

        tokens
            .iter()
            .filter(|token| !token.trimmed_surface().is_empty())
            .enumerate()
            .map(|(offset, token)| {
                SubtitleEntry::new(
                    first_index + offset,
                    token.start,
                    token.end,
                    highlight::wrap_first(&segment.text, token.trimmed_surface()),
                )
            })
            .collect()
    }
}

//! Marker block strategies: `Question N:` and labeled `Answer N` / `Q N` / `A N`.

use tracing::{debug, trace};

use super::markers::{scan_blocks, MarkerSet, LABELED_MARKERS, QUESTION_MARKERS};
use super::AnswerStrategy;
use crate::models::answers::{AnswerMap, Strategy};

/// Captures the text after each marker up to the next marker.
#[derive(Debug, Clone, Copy)]
pub struct BlockStrategy {
    markers: MarkerSet,
    kind: Strategy,
}

impl BlockStrategy {
    /// Blocks introduced by `Question N`.
    pub fn question() -> Self {
        Self {
            markers: QUESTION_MARKERS,
            kind: Strategy::Block,
        }
    }

    /// Blocks introduced by `Question N`, `Answer N`, `Q N` or `A N`.
    pub fn labeled() -> Self {
        Self {
            markers: LABELED_MARKERS,
            kind: Strategy::Labeled,
        }
    }
}

impl AnswerStrategy for BlockStrategy {
    fn kind(&self) -> Strategy {
        self.kind
    }

    fn extract(&self, text: &str, question_count: usize) -> AnswerMap {
        let mut answers = AnswerMap::new();
        let blocks = scan_blocks(text, &self.markers);
        let mut discarded = 0;

        for block in &blocks {
            if !answers.insert_bounded(block.number, block.body, question_count) {
                trace!(
                    "Discarded {} block {} at {}..{}",
                    self.kind, block.number, block.start, block.end
                );
                discarded += 1;
            }
        }

        if discarded > 0 {
            debug!(
                "{} strategy kept {} of {} blocks",
                self.kind,
                blocks.len() - discarded,
                blocks.len()
            );
        }

        answers
    }
}

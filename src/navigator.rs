//! Sentence-boundary navigation over segmented text.
//!
//! Backs the skip-forward/skip-backward controls: queries resolve the first
//! and last word of the sentence containing an element, and the starts of the
//! neighboring sentences.

use crate::segment::DocumentSegmenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceBoundaries {
    /// Start of the previous sentence; absent at the start of the document.
    pub prev: Option<usize>,
    /// Start of the sentence containing the queried element.
    pub curr: usize,
    /// Element after the current sentence's last word.
    pub next: usize,
}

pub struct SentenceNavigator<'a> {
    document: &'a DocumentSegmenter,
}

impl<'a> SentenceNavigator<'a> {
    pub fn new(document: &'a DocumentSegmenter) -> Self {
        Self { document }
    }

    /// Index of the first word (not gap) in the sentence containing `index`.
    pub fn first_word_of_sentence(&self, index: usize) -> Option<usize> {
        let sentence = self.document.sentence_containing(index)?;
        for element in sentence.first_element..=sentence.last_element {
            if let Some(word) = self.document.element(element) {
                if !word.is_gap {
                    return Some(element);
                }
            }
        }
        // A sentence of pure separators; fall back to its first element.
        Some(sentence.first_element)
    }

    /// Index of the last word in that sentence; a terminating gap is excluded.
    pub fn last_word_of_sentence(&self, index: usize) -> Option<usize> {
        let sentence = self.document.sentence_containing(index)?;
        for element in (sentence.first_element..=sentence.last_element).rev() {
            if let Some(word) = self.document.element(element) {
                if !word.is_gap {
                    return Some(element);
                }
            }
        }
        Some(sentence.first_element)
    }

    pub fn adjacent_starts(&self, index: usize) -> Option<SentenceBoundaries> {
        let curr = self.first_word_of_sentence(index)?;
        let prev = curr
            .checked_sub(1)
            .and_then(|before| self.first_word_of_sentence(before));
        let next = self.last_word_of_sentence(index)? + 1;
        Some(SentenceBoundaries { prev, curr, next })
    }

    /// Skip-backward target: the previous sentence when already at the start
    /// of the current one, otherwise the start of the current sentence.
    pub fn skip_backward_target(&self, index: usize) -> Option<usize> {
        let boundaries = self.adjacent_starts(index)?;
        if index == boundaries.curr {
            Some(boundaries.prev.unwrap_or(boundaries.curr))
        } else {
            Some(boundaries.curr)
        }
    }

    /// Skip-forward target: the element after the current sentence's last
    /// word, when the document continues that far.
    pub fn skip_forward_target(&self, index: usize) -> Option<usize> {
        let boundaries = self.adjacent_starts(index)?;
        let last = self.document.last_element_index()?;
        (boundaries.next <= last).then_some(boundaries.next)
    }
}

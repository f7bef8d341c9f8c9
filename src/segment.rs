//! Word and sentence segmentation.
//!
//! Document text is split into alternating word and gap runs, each assigned a
//! stable zero-based index in document order. Both caches and on-disk
//! positions key off these indices, so segmentation must be deterministic for
//! identical input and start index.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, warn};
use unicode_normalization::is_nfc;

static WORD_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(pre-)?word-(\d+)$").expect("word id pattern"));

/// Characters that belong to a word: letters, digits and apostrophe variants.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '\'' | '\u{2018}' | '\u{2019}' | '\u{201B}')
}

fn ends_sentence(gap: &str) -> bool {
    gap.chars().any(|ch| matches!(ch, '.' | '!' | '?'))
}

/// One maximal run of word or separator characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub index: usize,
    pub text: String,
    pub is_gap: bool,
    /// Char offset of the first char, relative to the segmented text.
    pub start: usize,
    /// Char offset one past the last char.
    pub end: usize,
}

/// Inclusive element-index range of one sentence, terminating gap included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence {
    pub first_element: usize,
    pub last_element: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub words: Vec<Word>,
    pub sentences: Vec<Sentence>,
}

/// Split `text` into indexed words and gaps, numbering from `start_index`.
pub fn segment(text: &str, start_index: usize) -> Segmentation {
    let mut words: Vec<Word> = Vec::new();
    let mut run = String::new();
    let mut run_start = 0usize;
    let mut run_is_word = false;
    let mut pos = 0usize;

    for ch in text.chars() {
        let in_word = is_word_char(ch);
        if run.is_empty() {
            run_start = pos;
            run_is_word = in_word;
        } else if in_word != run_is_word {
            push_run(&mut words, &mut run, run_start, pos, run_is_word, start_index);
            run_start = pos;
            run_is_word = in_word;
        }
        run.push(ch);
        pos += 1;
    }
    push_run(&mut words, &mut run, run_start, pos, run_is_word, start_index);

    let sentences = group_sentences(&words);
    Segmentation { words, sentences }
}

fn push_run(
    words: &mut Vec<Word>,
    run: &mut String,
    start: usize,
    end: usize,
    is_word: bool,
    start_index: usize,
) {
    if run.is_empty() {
        return;
    }
    words.push(Word {
        index: start_index + words.len(),
        text: std::mem::take(run),
        is_gap: !is_word,
        start,
        end,
    });
}

/// Group elements into sentences: a sentence ends at a gap containing
/// sentence-ending punctuation, or at end of input.
fn group_sentences(words: &[Word]) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut first: Option<usize> = None;
    for word in words {
        let first_element = *first.get_or_insert(word.index);
        if word.is_gap && ends_sentence(&word.text) {
            sentences.push(Sentence {
                first_element,
                last_element: word.index,
            });
            first = None;
        }
    }
    if let (Some(first_element), Some(last)) = (first, words.last()) {
        sentences.push(Sentence {
            first_element,
            last_element: last.index,
        });
    }
    sentences
}

/// Identifier the renderer tags each run with: `word-<n>` / `pre-word-<n>`.
pub fn word_id(index: usize, is_gap: bool) -> String {
    if is_gap {
        format!("pre-word-{index}")
    } else {
        format!("word-{index}")
    }
}

/// Reverse lookup for tapped identifiers: `(is_gap, index)`.
pub fn parse_word_id(id: &str) -> Option<(bool, usize)> {
    let caps = WORD_ID_RE.captures(id)?;
    let index = caps.get(2)?.as_str().parse().ok()?;
    Some((caps.get(1).is_some(), index))
}

/// Segments a document section by section, numbering elements and char
/// offsets globally. Re-segmenting a known section id returns the cached
/// result, so renderer reloads cannot shift indices.
#[derive(Debug, Default)]
pub struct DocumentSegmenter {
    sections: Vec<SectionRecord>,
    by_id: HashMap<String, usize>,
    next_index: usize,
    next_char: usize,
}

#[derive(Debug)]
struct SectionRecord {
    base_char: usize,
    first_element: usize,
    segmentation: Segmentation,
}

impl DocumentSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment_section(&mut self, id: &str, text: &str) -> &Segmentation {
        if let Some(&slot) = self.by_id.get(id) {
            debug!(section = id, "Section already segmented; reusing");
            return &self.sections[slot].segmentation;
        }
        if !is_nfc(text) {
            // Char offsets must agree with the renderer's extraction.
            warn!(section = id, "Section text is not NFC-normalized");
        }
        let segmentation = segment(text, self.next_index);
        let record = SectionRecord {
            base_char: self.next_char,
            first_element: self.next_index,
            segmentation,
        };
        self.next_index += record.segmentation.words.len();
        self.next_char += text.chars().count();
        self.by_id.insert(id.to_string(), self.sections.len());
        self.sections.push(record);
        &self.sections[self.sections.len() - 1].segmentation
    }

    fn section_for_element(&self, index: usize) -> Option<&SectionRecord> {
        let slot = self.sections.partition_point(|s| s.first_element <= index);
        let record = self.sections.get(slot.checked_sub(1)?)?;
        (index < record.first_element + record.segmentation.words.len()).then_some(record)
    }

    pub fn element(&self, index: usize) -> Option<&Word> {
        let record = self.section_for_element(index)?;
        record.segmentation.words.get(index - record.first_element)
    }

    /// Absolute char offset of an element's first character.
    pub fn char_offset_of(&self, index: usize) -> Option<usize> {
        let record = self.section_for_element(index)?;
        let word = record.segmentation.words.get(index - record.first_element)?;
        Some(record.base_char + word.start)
    }

    pub fn last_element_index(&self) -> Option<usize> {
        self.next_index.checked_sub(1)
    }

    pub fn sentence_containing(&self, index: usize) -> Option<Sentence> {
        let record = self.section_for_element(index)?;
        let sentences = &record.segmentation.sentences;
        let slot = sentences.partition_point(|s| s.first_element <= index);
        let sentence = sentences.get(slot.checked_sub(1)?)?;
        (index <= sentence.last_element).then_some(*sentence)
    }
}

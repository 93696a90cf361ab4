//! Line segmentation.

use std::iter::FusedIterator;
use std::str::Split;

/// Lazy iterator over the trimmed, non-empty lines of a text.
///
/// Calling [`segment`] again on the same text starts over from the first line.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    inner: Split<'a, char>,
}

/// Split `text` on newlines, trimming each line and dropping blank ones.
pub fn segment(text: &str) -> Segments<'_> {
    Segments {
        inner: text.split('\n'),
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().map(str::trim).find(|line| !line.is_empty())
    }
}

impl FusedIterator for Segments<'_> {}

//! Half-open character ranges over a sentence.

use crate::error::CommonError;
use crate::result::CommonResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// `start..end_exclusive`, counted in chars of the owning sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringSlice {
    pub start: usize,
    pub end_exclusive: usize,
}

impl StringSlice {
    pub fn new(start: usize, end_exclusive: usize) -> Self {
        debug_assert!(start <= end_exclusive, "slice start after end");
        Self {
            start,
            end_exclusive,
        }
    }

    pub fn try_new(start: usize, end_exclusive: usize) -> CommonResult<Self> {
        if start > end_exclusive {
            return Err(CommonError::InvalidSlice {
                start,
                end_exclusive,
            });
        }
        Ok(Self {
            start,
            end_exclusive,
        })
    }

    /// Empty slice at `position`, i.e. a text cursor
    pub fn cursor(position: usize) -> Self {
        Self::new(position, position)
    }

    pub fn len(&self) -> usize {
        self.end_exclusive - self.start
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.end_exclusive
    }

    /// True if both slices share at least one position. Touching slices and
    /// zero-length slices share none.
    pub fn overlaps(&self, other: &StringSlice) -> bool {
        self.start.max(other.start) < self.end_exclusive.min(other.end_exclusive)
    }

    pub fn contains_slice(&self, other: &StringSlice) -> bool {
        self.start <= other.start && other.end_exclusive <= self.end_exclusive
    }

    /// Non-empty pieces of `self` not covered by `other`, in order
    pub fn difference(&self, other: &StringSlice) -> Vec<StringSlice> {
        if !self.overlaps(other) {
            return vec![*self];
        }

        let before = StringSlice::new(self.start, other.start.max(self.start));
        let after = StringSlice::new(other.end_exclusive.min(self.end_exclusive), self.end_exclusive);
        [before, after]
            .into_iter()
            .filter(|piece| !piece.is_zero_length())
            .collect()
    }

    /// The text this slice covers in `sentence`, clamped to its length
    pub fn content_in<'a>(&self, sentence: &'a str) -> &'a str {
        let start = char_to_byte(sentence, self.start);
        let end = char_to_byte(sentence, self.end_exclusive);
        &sentence[start..end.max(start)]
    }

    pub fn fits_in(&self, sentence: &str) -> bool {
        self.end_exclusive <= sentence.chars().count()
    }
}

impl Sub for StringSlice {
    type Output = Vec<StringSlice>;

    fn sub(self, other: StringSlice) -> Vec<StringSlice> {
        self.difference(&other)
    }
}

impl fmt::Display for StringSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end_exclusive)
    }
}

fn char_to_byte(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(start: usize, end: usize) -> StringSlice {
        StringSlice::new(start, end)
    }

    #[test]
    fn test_zero_length() {
        assert!(slice(3, 3).is_zero_length());
        assert!(!slice(3, 4).is_zero_length());
        assert_eq!(slice(3, 7).len(), 4);
    }

    #[test]
    fn test_overlap() {
        assert!(slice(0, 5).overlaps(&slice(4, 8)));
        assert!(slice(0, 10).overlaps(&slice(3, 7)));
        assert!(!slice(0, 5).overlaps(&slice(5, 8)));
        assert!(!slice(3, 3).overlaps(&slice(0, 10)));
    }

    #[test]
    fn test_difference_cuts_tail() {
        assert_eq!(slice(0, 10) - slice(5, 15), vec![slice(0, 5)]);
    }

    #[test]
    fn test_difference_cuts_head() {
        assert_eq!(slice(5, 15) - slice(0, 10), vec![slice(10, 15)]);
    }

    #[test]
    fn test_difference_splits_in_two() {
        assert_eq!(slice(0, 10) - slice(3, 7), vec![slice(0, 3), slice(7, 10)]);
    }

    #[test]
    fn test_difference_fully_covered() {
        assert!((slice(3, 7) - slice(0, 10)).is_empty());
        assert!((slice(3, 7) - slice(3, 7)).is_empty());
    }

    #[test]
    fn test_difference_disjoint_or_empty() {
        assert_eq!(slice(0, 4) - slice(6, 9), vec![slice(0, 4)]);
        assert_eq!(slice(0, 4) - slice(2, 2), vec![slice(0, 4)]);
    }

    #[test]
    fn test_try_new_rejects_reversed_bounds() {
        assert!(StringSlice::try_new(4, 2).is_err());
        assert_eq!(StringSlice::try_new(2, 4).unwrap(), slice(2, 4));
    }

    #[test]
    fn test_content_in_counts_chars() {
        let sentence = "Ünïcode words";
        assert_eq!(slice(0, 7).content_in(sentence), "Ünïcode");
        assert_eq!(slice(8, 13).content_in(sentence), "words");
        assert_eq!(slice(8, 40).content_in(sentence), "words");
        assert!(slice(8, 13).fits_in(sentence));
        assert!(!slice(8, 14).fits_in(sentence));
    }
}

//! Ordered character sets
//!
//! An alphabet maps each of its characters to a dense index in
//! `0..size()`; every other component works on those indices.

use std::collections::HashMap;
use std::fmt;

use crate::{EnigmaError, EnigmaResult};

/// The 26 upper-case Latin letters
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered set of encodable characters
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Create an alphabet from `chars`, in order
    ///
    /// Fails if `chars` is empty or repeats a character.
    pub fn new(chars: &str) -> EnigmaResult<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            return Err(EnigmaError::EmptyAlphabet);
        }

        let mut index = HashMap::with_capacity(chars.len());
        for (i, &ch) in chars.iter().enumerate() {
            if index.insert(ch, i).is_some() {
                return Err(EnigmaError::DuplicateCharacter(ch));
            }
        }

        Ok(Alphabet { chars, index })
    }

    /// Number of characters
    #[inline]
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.index.contains_key(&ch)
    }

    /// Character at `index`, if `index < size()`
    #[inline]
    pub fn to_char(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Index of `ch`; the inverse of [`Alphabet::to_char`]
    #[inline]
    pub fn to_int(&self, ch: char) -> EnigmaResult<usize> {
        self.index
            .get(&ch)
            .copied()
            .ok_or(EnigmaError::NotInAlphabet(ch))
    }

    /// Character at `index` reduced modulo the alphabet size
    #[inline]
    pub(crate) fn char_at(&self, index: usize) -> char {
        self.chars[index % self.chars.len()]
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let chars: Vec<char> = UPPER.chars().collect();
        let index = chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { chars, index }
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({})", self)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.chars {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

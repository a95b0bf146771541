//! Cycle-notation permutations over an alphabet
//!
//! A permutation is written as parenthesized cycles, e.g. `(AELTPHQXRU) (BKNW)`.
//! Each cycle maps every character to the one after it and the last
//! character back to the first. Characters that appear in no cycle map
//! to themselves.
//!
//! The cycle text is parsed once into forward and inverse lookup tables,
//! so `permute` and `invert` are plain index loads.

use std::fmt;
use std::sync::Arc;

use crate::{Alphabet, EnigmaError, EnigmaResult};

/// A permutation of the indices of an [`Alphabet`]
#[derive(Clone, PartialEq, Eq)]
pub struct Permutation {
    /// Shared with every other permutation of the same machine
    alphabet: Arc<Alphabet>,
    /// Cycles as parsed, in alphabet indices
    cycles: Vec<Vec<usize>>,
    /// forward[i] = permute(i)
    forward: Vec<usize>,
    /// inverse[i] = invert(i)
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parse `cycles` over `alphabet`
    ///
    /// Groups may be separated by whitespace. A character may occur at most
    /// once across all groups.
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> EnigmaResult<Self> {
        let cycles = parse_cycles(cycles, &alphabet)?;
        let size = alphabet.size();

        let mut forward: Vec<usize> = (0..size).collect();
        let mut inverse: Vec<usize> = (0..size).collect();
        for cycle in &cycles {
            for (k, &from) in cycle.iter().enumerate() {
                let to = cycle[(k + 1) % cycle.len()];
                forward[from] = to;
                inverse[to] = from;
            }
        }

        Ok(Permutation {
            alphabet,
            cycles,
            forward,
            inverse,
        })
    }

    /// The permutation that fixes every character
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let size = alphabet.size();
        Permutation {
            alphabet,
            cycles: Vec::new(),
            forward: (0..size).collect(),
            inverse: (0..size).collect(),
        }
    }

    /// Size of the underlying alphabet
    #[inline]
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Reduce `p` into `0..size()` (floored modulo)
    #[inline]
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.size() as isize) as usize
    }

    /// Apply the permutation to index `p` (taken modulo `size()`)
    #[inline]
    pub fn permute(&self, p: usize) -> usize {
        self.forward[p % self.size()]
    }

    /// Apply the inverse permutation to index `c` (taken modulo `size()`)
    #[inline]
    pub fn invert(&self, c: usize) -> usize {
        self.inverse[c % self.size()]
    }

    pub fn permute_char(&self, p: char) -> EnigmaResult<char> {
        let i = self.alphabet.to_int(p)?;
        Ok(self.alphabet.char_at(self.forward[i]))
    }

    pub fn invert_char(&self, c: char) -> EnigmaResult<char> {
        let i = self.alphabet.to_int(c)?;
        Ok(self.alphabet.char_at(self.inverse[i]))
    }

    /// True iff no character maps to itself
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &p)| i != p)
    }

    /// True iff every cycle has at most two members, so the permutation
    /// is its own inverse
    pub fn is_swaps(&self) -> bool {
        self.cycles.iter().all(|c| c.len() <= 2)
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Cycles in alphabet indices, as written
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    pub(crate) fn cycle_string(&self, cycle: &[usize]) -> String {
        let mut out = String::with_capacity(cycle.len() + 2);
        out.push('(');
        out.extend(cycle.iter().map(|&i| self.alphabet.char_at(i)));
        out.push(')');
        out
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, cycle) in self.cycles.iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", self.cycle_string(cycle))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permutation({})", self)
    }
}

fn parse_cycles(text: &str, alphabet: &Alphabet) -> EnigmaResult<Vec<Vec<usize>>> {
    let malformed = |reason: &str| EnigmaError::MalformedCycles(format!("{}: {:?}", reason, text));

    let mut cycles = Vec::new();
    let mut seen = vec![false; alphabet.size()];
    let mut current: Option<Vec<usize>> = None;

    for ch in text.chars() {
        match (ch, current.as_mut()) {
            ('(', None) => current = Some(Vec::new()),
            ('(', Some(_)) => return Err(malformed("nested '('")),
            (')', _) => match current.take() {
                Some(cycle) if cycle.is_empty() => return Err(malformed("empty cycle")),
                Some(cycle) => cycles.push(cycle),
                None => return Err(malformed("unbalanced ')'")),
            },
            (c, None) if c.is_whitespace() => {}
            (_, None) => return Err(malformed("text outside parentheses")),
            (c, Some(_)) if c.is_whitespace() => {
                return Err(malformed("whitespace inside cycle"))
            }
            (c, Some(cycle)) => {
                let i = alphabet
                    .to_int(c)
                    .map_err(|_| malformed(&format!("'{}' is not in the alphabet", c)))?;
                if seen[i] {
                    return Err(EnigmaError::RepeatedCycleCharacter(c));
                }
                seen[i] = true;
                cycle.push(i);
            }
        }
    }

    if current.is_some() {
        return Err(malformed("unterminated cycle"));
    }
    Ok(cycles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn perm(cycles: &str, alpha: &str) -> Permutation {
        Permutation::new(cycles, Arc::new(Alphabet::new(alpha).unwrap())).unwrap()
    }

    /// Check that `p` maps each char of `from` to the matching char of `to`
    /// and back, in both char and index form.
    fn check_perm(p: &Permutation, from: &str, to: &str) {
        let alpha = p.alphabet().clone();
        assert_eq!(p.size(), from.chars().count());
        for (c, e) in from.chars().zip(to.chars()) {
            assert_eq!(p.permute_char(c).unwrap(), e, "wrong translation of '{}'", c);
            assert_eq!(p.invert_char(e).unwrap(), c, "wrong inverse of '{}'", e);
            let ci = alpha.to_int(c).unwrap();
            let ei = alpha.to_int(e).unwrap();
            assert_eq!(p.permute(ci), ei);
            assert_eq!(p.invert(ei), ci);
        }
    }

    #[test]
    fn test_identity() {
        let alpha = Arc::new(Alphabet::default());
        let p = Permutation::identity(alpha);
        check_perm(&p, crate::UPPER, crate::UPPER);
        assert!(!p.derangement());
    }

    #[test]
    fn test_permute_char() {
        let p = perm("(HIG)(NF) (L)", "HILFNGR");
        assert_eq!(p.permute_char('H').unwrap(), 'I');
        assert_eq!(p.permute_char('I').unwrap(), 'G');
        assert_eq!(p.permute_char('G').unwrap(), 'H');
        assert_eq!(p.permute_char('N').unwrap(), 'F');
        assert_eq!(p.permute_char('F').unwrap(), 'N');
        assert_eq!(p.permute_char('L').unwrap(), 'L');
        assert_eq!(p.permute_char('R').unwrap(), 'R');
    }

    #[test]
    fn test_permute_and_invert_int() {
        let p = perm("(BACD)", "ABCD");
        assert_eq!(p.permute(0), 2);
        assert_eq!(p.invert(0), 1);
        // Last element wraps to first, first inverts to last
        assert_eq!(p.permute(3), 1);
        assert_eq!(p.invert(1), 3);
    }

    #[test]
    fn test_invert_char_wraps_cycle() {
        let p = perm("(BKNW) (DFG)", "BKNWDFG");
        assert_eq!(p.invert_char('D').unwrap(), 'G');
        assert_eq!(p.invert_char('B').unwrap(), 'W');
    }

    #[test]
    fn test_full_rotor_wiring() {
        // Rotor I of the Enigma I
        let p = perm(
            "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)",
            crate::UPPER,
        );
        check_perm(
            &p,
            crate::UPPER,
            "EKMFLGDQVZNTOWYHXUSPAIBRCJ",
        );
    }

    #[test]
    fn test_index_forms_wrap() {
        let p = perm("(ABC) (FDE)", "ABCDEFG");
        assert_eq!(p.permute(7), p.permute(0));
        assert_eq!(p.invert(9), p.invert(2));
        assert_eq!(p.wrap(-1), 6);
        assert_eq!(p.wrap(-15), 6);
        assert_eq!(p.wrap(14), 0);
    }

    #[test]
    fn test_derangement() {
        assert!(!perm("(ACBD)", "ABCDE").derangement());
        assert!(perm("(ABCDE)", "ABCDE").derangement());
        assert!(!perm("(AB) (C) (DE)", "ABCDE").derangement());
        assert!(perm("(AB) (CDE)", "ABCDE").derangement());
    }

    #[test]
    fn test_is_swaps() {
        assert!(perm("(AB) (CD)", "ABCDE").is_swaps());
        assert!(perm("", "ABCDE").is_swaps());
        assert!(!perm("(ABC)", "ABCDE").is_swaps());
    }

    #[test]
    fn test_display() {
        let p = perm("(BKNW)(DFG)  (A)", "ABDFGKNW");
        assert_eq!(p.to_string(), "(BKNW) (DFG) (A)");
    }

    #[test]
    fn test_rejects_malformed() {
        let alpha = Arc::new(Alphabet::default());
        for bad in ["(AB", "AB)", "((AB))", "()", "(A B)", "X(AB)", "(AB)c", "(a)"] {
            assert!(
                matches!(
                    Permutation::new(bad, alpha.clone()),
                    Err(EnigmaError::MalformedCycles(_))
                ),
                "accepted {:?}",
                bad
            );
        }
        assert_eq!(
            Permutation::new("(AB) (CA)", alpha.clone()),
            Err(EnigmaError::RepeatedCycleCharacter('A'))
        );
        assert_eq!(
            Permutation::new("(ABA)", alpha),
            Err(EnigmaError::RepeatedCycleCharacter('A'))
        );
    }

    #[test]
    fn test_char_outside_alphabet() {
        let p = perm("(AB)", "ABC");
        assert_eq!(p.permute_char('Z'), Err(EnigmaError::NotInAlphabet('Z')));
        assert_eq!(p.invert_char('Z'), Err(EnigmaError::NotInAlphabet('Z')));
    }

    /// Random cycle decomposition of the upper-case alphabet
    fn arb_cycles() -> impl Strategy<Value = String> {
        (Just(crate::UPPER.chars().collect::<Vec<_>>()).prop_shuffle(), 0usize..26, prop::collection::vec(1usize..6, 1..10))
            .prop_map(|(letters, skip, lens)| {
                let mut out = String::new();
                let mut rest = &letters[skip.min(letters.len())..];
                for len in lens {
                    if rest.is_empty() {
                        break;
                    }
                    let take = len.min(rest.len());
                    out.push('(');
                    out.extend(&rest[..take]);
                    out.push(')');
                    rest = &rest[take..];
                }
                out
            })
    }

    proptest! {
        #[test]
        fn invert_undoes_permute(cycles in arb_cycles()) {
            let p = perm(&cycles, crate::UPPER);
            for i in 0..p.size() {
                prop_assert_eq!(p.invert(p.permute(i)), i);
                prop_assert_eq!(p.permute(p.invert(i)), i);
            }
        }

        #[test]
        fn derangement_iff_no_fixed_point(cycles in arb_cycles()) {
            let p = perm(&cycles, crate::UPPER);
            let no_fixed = (0..p.size()).all(|i| p.permute(i) != i);
            prop_assert_eq!(p.derangement(), no_fixed);
        }

        #[test]
        fn display_reparses(cycles in arb_cycles()) {
            let p = perm(&cycles, crate::UPPER);
            let again = perm(&p.to_string(), crate::UPPER);
            prop_assert_eq!(p, again);
        }
    }
}

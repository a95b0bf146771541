//! Rotors
//!
//! All rotors share the same conversion arithmetic; they differ only in
//! what they are allowed to do:
//! - Reflector: never rotates, setting pinned at 0, wiring is a derangement
//! - Fixed: can be set by hand but never steps, no notches
//! - Moving: steps on command and carries notches that let the rotor to
//!   its left step

use std::fmt;
use std::sync::Arc;

use crate::{Alphabet, EnigmaError, EnigmaResult, Permutation};

/// Capability class of a rotor
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RotorKind {
    Reflector,
    Fixed,
    Moving {
        /// Notch positions as alphabet indices, relative to ring setting `A`
        notches: Vec<usize>,
    },
}

/// A wired rotor with its current rotational setting
#[derive(Clone)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
    /// Current position in `0..size()`
    setting: usize,
    /// Ring offset; shifts where the notches sit relative to `setting`
    ring: usize,
}

impl Rotor {
    /// Create a reflector; fails unless `permutation` is a derangement
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> EnigmaResult<Self> {
        let name = name.into();
        if !permutation.derangement() {
            return Err(EnigmaError::ReflectorNotDerangement(name));
        }
        Ok(Self::with_kind(name, permutation, RotorKind::Reflector))
    }

    /// Create a rotor that can be set but never steps
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::with_kind(name.into(), permutation, RotorKind::Fixed)
    }

    /// Create a stepping rotor with notches at the letters of `notches`
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> EnigmaResult<Self> {
        let alphabet = permutation.alphabet();
        let mut positions = Vec::new();
        for ch in notches.chars() {
            let i = alphabet.to_int(ch)?;
            if !positions.contains(&i) {
                positions.push(i);
            }
        }
        Ok(Self::with_kind(
            name.into(),
            permutation,
            RotorKind::Moving { notches: positions },
        ))
    }

    fn with_kind(name: String, permutation: Permutation, kind: RotorKind) -> Self {
        Rotor {
            name,
            permutation,
            kind,
            setting: 0,
            ring: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// True iff the rotor has a ratchet and can step
    #[inline]
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    #[inline]
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    #[inline]
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Set the position to `posn` modulo the alphabet size
    ///
    /// Reflectors stay at 0.
    pub fn set(&mut self, posn: isize) {
        if !self.reflecting() {
            self.setting = self.permutation.wrap(posn);
        }
    }

    /// Set the position to the index of `cposn`
    pub fn set_char(&mut self, cposn: char) -> EnigmaResult<()> {
        let posn = self.alphabet().to_int(cposn)?;
        self.set(posn as isize);
        Ok(())
    }

    #[inline]
    pub fn ring(&self) -> usize {
        self.ring
    }

    /// Set the ring offset used for notch detection
    ///
    /// Effective notches are always recomputed from the original notch
    /// positions, so setting the same ring twice is a no-op.
    pub fn set_ring(&mut self, ring: usize) {
        if !self.reflecting() {
            self.ring = ring % self.size();
        }
    }

    /// True iff the rotor carries at least one notch
    pub fn has_notches(&self) -> bool {
        matches!(&self.kind, RotorKind::Moving { notches } if !notches.is_empty())
    }

    /// Notch letters relative to the current ring offset
    ///
    /// These are the settings at which the rotor lets its left neighbor step.
    pub fn notches(&self) -> String {
        match &self.kind {
            RotorKind::Moving { notches } => notches
                .iter()
                .map(|&n| {
                    let posn = self.permutation.wrap(n as isize - self.ring as isize);
                    self.alphabet().char_at(posn)
                })
                .collect(),
            _ => String::new(),
        }
    }

    /// True iff the current setting sits on a notch
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => {
                let ring_posn = (self.setting + self.ring) % self.size();
                notches.contains(&ring_posn)
            }
            _ => false,
        }
    }

    /// Step one position; no-op unless the rotor rotates
    pub fn advance(&mut self) {
        if self.rotates() {
            self.setting = (self.setting + 1) % self.size();
        }
    }

    /// Pass index `p` through the wiring from the right-hand contacts
    #[inline]
    pub fn convert_forward(&self, p: usize) -> usize {
        let contact = self.permutation.permute(p + self.setting);
        self.permutation
            .wrap(contact as isize - self.setting as isize)
    }

    /// Pass index `e` back through the wiring from the left-hand contacts
    #[inline]
    pub fn convert_backward(&self, e: usize) -> usize {
        let contact = self.permutation.invert(e + self.setting);
        self.permutation
            .wrap(contact as isize - self.setting as isize)
    }

    /// Return to setting 0 with no ring offset
    pub(crate) fn reset(&mut self) {
        self.setting = 0;
        self.ring = 0;
    }
}

impl fmt::Debug for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rotor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("setting", &self.setting)
            .field("ring", &self.ring)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rotor {}", self.name)
    }
}

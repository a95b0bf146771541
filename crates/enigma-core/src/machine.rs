//! The rotor machine
//!
//! Slot 0 holds the reflector and the last slot holds the fast rotor.
//! For every character the machine first steps its rotors, then sends the
//! signal through:
//!
//! ```text
//! plugboard -> slots N-1 .. 0 (forward) -> slots 1 .. N-1 (backward) -> plugboard
//! ```
//!
//! The reflector is traversed once, on the forward pass.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::{Alphabet, EnigmaError, EnigmaResult, Permutation, Rotor};

/// A configured rotor machine
///
/// The machine owns its whole rotor catalog; slots refer to catalog
/// entries, so a rotor can sit in at most one slot of one machine.
#[derive(Clone, Debug)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    pawls: usize,
    /// All available rotors
    catalog: Vec<Rotor>,
    by_name: HashMap<String, usize>,
    /// Catalog index per slot; empty until rotors are inserted
    slots: Vec<usize>,
    /// Ring offset per slot (slot 0 is always 0)
    rings: Vec<usize>,
    plugboard: Permutation,
}

impl Machine {
    /// Create a machine with `num_rotors` slots and `pawls` pawls
    ///
    /// Requires `1 < num_rotors`, `pawls < num_rotors`, unique rotor names,
    /// and every rotor wired over `alphabet`.
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        pawls: usize,
        catalog: impl IntoIterator<Item = Rotor>,
    ) -> EnigmaResult<Self> {
        if num_rotors < 2 || pawls >= num_rotors {
            return Err(EnigmaError::InvalidGeometry {
                slots: num_rotors,
                pawls,
            });
        }

        let catalog: Vec<Rotor> = catalog.into_iter().collect();
        let mut by_name = HashMap::with_capacity(catalog.len());
        for (i, rotor) in catalog.iter().enumerate() {
            if **rotor.alphabet() != *alphabet {
                return Err(EnigmaError::AlphabetMismatch);
            }
            if by_name.insert(rotor.name().to_string(), i).is_some() {
                return Err(EnigmaError::DuplicateRotor(rotor.name().to_string()));
            }
        }

        Ok(Machine {
            plugboard: Permutation::identity(alphabet.clone()),
            alphabet,
            num_rotors,
            pawls,
            catalog,
            by_name,
            slots: Vec::new(),
            rings: vec![0; num_rotors],
        })
    }

    /// Number of rotor slots
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Rotor in slot `k`, where slot 0 is the reflector and slot
    /// `num_rotors() - 1` the fast rotor
    pub fn rotor(&self, k: usize) -> Option<&Rotor> {
        self.slots.get(k).map(|&i| &self.catalog[i])
    }

    /// All available rotors, inserted or not
    pub fn catalog(&self) -> &[Rotor] {
        &self.catalog
    }

    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Ring letters of the non-reflector slots
    pub fn rings(&self) -> String {
        self.rings[1..]
            .iter()
            .map(|&r| self.alphabet.char_at(r))
            .collect()
    }

    /// Letters visible in the rotor windows, left to right
    pub fn window(&self) -> String {
        self.slots
            .iter()
            .zip(&self.rings)
            .skip(1)
            .map(|(&i, &ring)| self.alphabet.char_at(self.catalog[i].setting() + ring))
            .collect()
    }

    /// Put the rotors named `names` into the slots, reflector first
    ///
    /// Every inserted rotor starts at setting 0 with no ring offset. On
    /// error the previous slot contents are kept.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> EnigmaResult<()> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::RotorCount {
                expected: self.num_rotors,
                actual: names.len(),
            });
        }

        let names: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
        let mut slots = Vec::with_capacity(names.len());
        for &name in &names {
            let index = *self
                .by_name
                .get(name)
                .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;
            if slots.contains(&index) {
                return Err(EnigmaError::DuplicateRotor(name.to_string()));
            }
            slots.push(index);
        }

        for (slot, &index) in slots.iter().enumerate() {
            let rotor = &self.catalog[index];
            match (slot, rotor.reflecting()) {
                (0, false) => return Err(EnigmaError::NotReflector(rotor.name().to_string())),
                (slot, true) if slot > 0 => {
                    return Err(EnigmaError::MisplacedReflector {
                        name: rotor.name().to_string(),
                        slot,
                    })
                }
                _ => {}
            }
        }

        let notched = slots
            .iter()
            .filter(|&&i| self.catalog[i].has_notches())
            .count();
        if notched > self.pawls {
            return Err(EnigmaError::TooManyNotchedRotors {
                notched,
                pawls: self.pawls,
            });
        }

        for &index in &slots {
            self.catalog[index].reset();
        }
        self.slots = slots;
        self.rings = vec![0; self.num_rotors];

        debug!(rotors = ?names, "rotors inserted");
        Ok(())
    }

    /// Set the ring offsets from one letter per non-reflector slot
    ///
    /// An empty `ring` clears all offsets. Notch positions are derived
    /// from each rotor's original notches every time, never from a
    /// previously adjusted value.
    pub fn set_rings(&mut self, ring: &str) -> EnigmaResult<()> {
        self.require_rotors()?;
        let rings = if ring.is_empty() {
            vec![0; self.num_rotors - 1]
        } else {
            self.parse_setting(ring)?
        };

        self.rings = std::iter::once(0).chain(rings).collect();
        for (&index, &offset) in self.slots.iter().zip(&self.rings) {
            self.catalog[index].set_ring(offset);
        }

        debug!(rings = %self.rings(), "rings set");
        Ok(())
    }

    /// Set the rotor positions from one letter per non-reflector slot
    ///
    /// The first letter is the leftmost rotor after the reflector. Each
    /// letter is what the window shows, so the slot's ring offset is
    /// subtracted to get the rotor setting.
    pub fn set_rotors(&mut self, setting: &str) -> EnigmaResult<()> {
        self.require_rotors()?;
        let letters = self.parse_setting(setting)?;

        for (slot, letter) in letters.into_iter().enumerate().map(|(i, l)| (i + 1, l)) {
            let posn = letter as isize - self.rings[slot] as isize;
            self.catalog[self.slots[slot]].set(posn);
        }

        debug!(window = %self.window(), "rotors set");
        Ok(())
    }

    /// Install a plugboard
    ///
    /// The plugboard must be over this machine's alphabet and may only swap
    /// pairs, so that running ciphertext through an identically set machine
    /// restores the plaintext.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> EnigmaResult<()> {
        if **plugboard.alphabet() != *self.alphabet {
            return Err(EnigmaError::AlphabetMismatch);
        }
        // Longer cycles would make the machine non-reciprocal
        if let Some(cycle) = plugboard.cycles().iter().find(|c| c.len() > 2) {
            return Err(EnigmaError::PlugboardNotSwaps(plugboard.cycle_string(cycle)));
        }

        debug!(plugboard = %plugboard, "plugboard set");
        self.plugboard = plugboard;
        Ok(())
    }

    /// Step the machine, then convert the character with index `c`
    /// (taken modulo the alphabet size)
    pub fn convert_index(&mut self, c: usize) -> EnigmaResult<usize> {
        self.require_rotors()?;
        Ok(self.convert_unchecked(c % self.alphabet.size()))
    }

    /// Step the machine, then convert `ch`
    ///
    /// A character outside the alphabet fails without moving any rotor.
    pub fn convert_char(&mut self, ch: char) -> EnigmaResult<char> {
        let c = self.alphabet.to_int(ch)?;
        let out = self.convert_index(c)?;
        Ok(self.alphabet.char_at(out))
    }

    /// Convert a whole message, dropping whitespace
    ///
    /// Whitespace is a separator and does not step the rotors. The message
    /// is checked against the alphabet before anything is converted, so a
    /// failed call leaves the rotors where they were.
    pub fn convert(&mut self, msg: &str) -> EnigmaResult<String> {
        let input = msg
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| self.alphabet.to_int(c))
            .collect::<EnigmaResult<Vec<usize>>>()?;
        self.require_rotors()?;

        Ok(input
            .into_iter()
            .map(|c| {
                let out = self.convert_unchecked(c);
                self.alphabet.char_at(out)
            })
            .collect())
    }

    fn convert_unchecked(&mut self, input: usize) -> usize {
        self.advance_rotors();

        let path = self.signal_path(input);
        let output = path[path.len() - 1];

        trace!(
            window = %self.window(),
            input = %self.alphabet.char_at(input),
            path = ?path.iter().map(|&c| self.alphabet.char_at(c)).collect::<Vec<char>>(),
            "convert"
        );
        output
    }

    /// Every signal value for `input` at the current rotor positions
    ///
    /// In order: after the plugboard, after each slot from the fast rotor
    /// down to the reflector, after each slot back out to the fast rotor,
    /// and after the plugboard again. The last entry is the output.
    fn signal_path(&self, input: usize) -> Vec<usize> {
        let mut path = Vec::with_capacity(2 * self.slots.len() + 1);
        let mut c = self.plugboard.permute(input);
        path.push(c);
        for &index in self.slots.iter().rev() {
            c = self.catalog[index].convert_forward(c);
            path.push(c);
        }
        for &index in &self.slots[1..] {
            c = self.catalog[index].convert_backward(c);
            path.push(c);
        }
        path.push(self.plugboard.permute(c));
        path
    }

    /// Step the rotors for one keypress
    ///
    /// The fast rotor always steps. Any other non-reflector rotor with
    /// notches steps when its right neighbor sits on a notch, and pushes
    /// that neighbor along with it. All notch checks see the positions
    /// from before this keypress.
    fn advance_rotors(&mut self) {
        let n = self.slots.len();
        let mut turned = vec![false; n];
        turned[n - 1] = true;

        for i in (1..n - 1).rev() {
            let left = &self.catalog[self.slots[i]];
            let right = &self.catalog[self.slots[i + 1]];
            if right.at_notch() && left.has_notches() {
                turned[i] = true;
                turned[i + 1] = true;
            }
        }

        for slot in (0..n).filter(|&i| turned[i]) {
            self.catalog[self.slots[slot]].advance();
        }
    }

    fn require_rotors(&self) -> EnigmaResult<()> {
        if self.slots.is_empty() {
            return Err(EnigmaError::RotorsNotInserted);
        }
        Ok(())
    }

    /// Parse one letter per non-reflector slot into alphabet indices
    fn parse_setting(&self, setting: &str) -> EnigmaResult<Vec<usize>> {
        let expected = self.num_rotors - 1;
        if setting.chars().count() != expected {
            return Err(EnigmaError::SettingLength {
                setting: setting.to_string(),
                expected,
            });
        }
        setting
            .chars()
            .map(|ch| {
                self.alphabet
                    .to_int(ch)
                    .map_err(|_| EnigmaError::SettingCharacter {
                        setting: setting.to_string(),
                        ch,
                    })
            })
            .collect()
    }
}

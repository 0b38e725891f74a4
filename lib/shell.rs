//! Ground-state subshell configurations via the Aufbau principle.
//!
//! Subshells are filled in order of increasing *n* + *l* ("shell group"), and
//! within a group in order of increasing *n*. Principal quantum numbers are
//! counted from 0 here, so the 1s subshell is `n = 0, l = 0` and a subshell is
//! physical when `l <= n`. [`Subshell`]'s `Display` impl prints the usual
//! spectroscopic label with the 1-based principal number.
//!
//! ```
//! use xatom::shell::{ subshells, electron_count };
//!
//! let pd = subshells(46);
//! assert_eq!(electron_count(&pd), 46);
//! // palladium keeps no 5s electrons
//! assert!(pd.iter().all(|s| !(s.n == 4 && s.l == 0)));
//! assert_eq!(pd.last().unwrap().to_string(), "4d10");
//! ```

use std::{ cmp, fmt };
use crate::error::ShellError;

pub type ShellResult<T> = Result<T, ShellError>;

/// Largest atomic number accepted by [`try_subshells`].
pub const MAX_Z: u32 = 118;

/// Shell filling never looks past this many *n* + *l* groups.
pub const SHELL_GROUPS: u32 = 10;

// s electrons donated to the d subshell
const S_DONORS: [u32; 9] = [24, 29, 41, 42, 44, 45, 47, 78, 79];
// 4f gives one electron to 5d
const F4_DONORS: [u32; 3] = [57, 58, 64];
// 5f emptied entirely into 6d
const F5_EMPTY: [u32; 2] = [89, 90];
// 5f gives one electron to 6d
const F5_DONORS: [u32; 4] = [91, 92, 93, 96];

const L_LABELS: [char; 10] = ['s', 'p', 'd', 'f', 'g', 'h', 'i', 'k', 'l', 'm'];

/// A single occupied subshell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Subshell {
    /// Principal quantum number, counted from 0.
    pub n: u32,
    /// Angular momentum quantum number.
    pub l: u32,
    /// Number of electrons.
    pub occupation: u32,
    /// Energy estimate; left at 0 until an external solver fills it in.
    pub e: f64,
}

impl Subshell {
    /// Create a new `Subshell` with zero energy.
    pub fn new(n: u32, l: u32, occupation: u32) -> Self {
        Self { n, l, occupation, e: 0.0 }
    }

    /// Maximum number of electrons the subshell can hold, 2(2*l* + 1).
    pub fn capacity(&self) -> u32 { 2 * (2 * self.l + 1) }

    /// Return `true` if the subshell holds as many electrons as it can.
    pub fn is_full(&self) -> bool { self.occupation == self.capacity() }

    /// Compare two `Subshell`s by their quantum numbers, *n* first and then
    /// *l*.
    pub fn cmp_quantum(&self, other: &Self) -> cmp::Ordering {
        (self.n, self.l).cmp(&(other.n, other.l))
    }
}

impl fmt::Display for Subshell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match L_LABELS.get(self.l as usize) {
            Some(label) => write!(f, "{}{}{}", self.n + 1, label, self.occupation),
            None => write!(f, "{}[l={}]{}", self.n + 1, self.l, self.occupation),
        }
    }
}

// number of electrons a candidate subshell takes, before the f and Lr
// exceptions are applied
fn base_occupation(z: u32, n: u32, l: u32, placed: i64) -> i64 {
    let mut occ: i64 = 2 * (2 * l as i64 + 1);
    if S_DONORS.contains(&z) && l == 0 {
        let donor = if z <= 29 { 3 } else if z <= 47 { 4 } else { 5 };
        if n == donor { occ -= 1; }
    } else if z == 46 && n == 4 && l == 0 {
        occ -= 2;
    }
    occ.min(z as i64 - placed)
}

fn adjust_occupation(z: u32, n: u32, l: u32, occ: i64) -> i64 {
    match (n, l) {
        (3, 3) if F4_DONORS.contains(&z) => occ - 1,
        (4, 3) if F5_EMPTY.contains(&z) => 0,
        (4, 3) if F5_DONORS.contains(&z) => occ - 1,
        (5, 2) if z == 103 => 0,
        _ => occ,
    }
}

/// Return the occupied subshells of a neutral atom with atomic number `z`.
///
/// Subshells are returned in filling order (increasing *n* + *l*, then
/// increasing *n*), not in order of energy. Filling stops as soon as `z`
/// electrons have been placed, or after [`SHELL_GROUPS`] groups; for `z = 0` or
/// `z` beyond what those groups hold the result is empty or incomplete. Use
/// [`try_subshells`] to have that reported as an error.
pub fn subshells(z: u32) -> Vec<Subshell> {
    let mut shells: Vec<Subshell> = Vec::new();
    let mut placed: i64 = 0;
    'groups: for group in 0..SHELL_GROUPS {
        for n in 0..=group {
            let l = group - n;
            if l > n { continue; }
            let occ = adjust_occupation(z, n, l, base_occupation(z, n, l, placed));
            if occ > 0 {
                placed += occ;
                shells.push(Subshell::new(n, l, occ as u32));
            }
            if placed == z as i64 { break 'groups; }
        }
    }
    if placed != z as i64 {
        tracing::warn!(
            z,
            placed,
            "shell filling reached the group ceiling before placing all electrons"
        );
    }
    shells
}

/// Like [`subshells`], but check that `z` lies in `1..=MAX_Z` and that every
/// electron was placed.
pub fn try_subshells(z: u32) -> ShellResult<Vec<Subshell>> {
    ShellError::check_z(z)?;
    let shells = subshells(z);
    let filled = electron_count(&shells);
    (filled == z).then_some(shells)
        .ok_or(ShellError::Incomplete { z, filled })
}

/// Total number of electrons in a configuration.
pub fn electron_count(shells: &[Subshell]) -> u32 {
    shells.iter().map(|s| s.occupation).sum()
}

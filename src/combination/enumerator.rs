//! Index ↔ subset bijection.

use std::fmt;

/// Largest policy count whose combinations fit in a `u64` index.
pub const MAX_ENCODABLE_POLICIES: usize = 63;

/// A subset of policies, identified by its integer index.
///
/// Bit `j` of the index is set exactly when policy `j` is selected, so
/// index 0 is the empty subset and `2^P - 1` selects every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combination(pub u64);

impl Combination {
    /// The integer index.
    pub fn id(self) -> u64 {
        self.0
    }

    /// Number of selected policies.
    pub fn count_selected(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether `policy` is part of this subset.
    pub fn contains(self, policy: usize) -> bool {
        policy < 64 && (self.0 >> policy) & 1 == 1
    }

    /// Indices of the selected policies, ascending.
    pub fn policies(self) -> impl Iterator<Item = usize> {
        (0..64usize).filter(move |&j| self.contains(j))
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of subsets of `policies` items, `2^policies`.
pub fn combination_count(policies: usize) -> u64 {
    debug_assert!(policies <= MAX_ENCODABLE_POLICIES);
    1u64 << policies
}

/// Decodes `index` into a length-`policies` bit vector, least significant bit first.
///
/// # Examples
///
/// ```
/// use u_policysearch::combination::decode;
///
/// assert_eq!(decode(6, 4), vec![false, true, true, false]);
/// ```
pub fn decode(index: u64, policies: usize) -> Vec<bool> {
    let mut bits = vec![false; policies];
    decode_into(index, &mut bits);
    bits
}

/// Decodes `index` into a caller-owned buffer.
///
/// `bits.len()` is the policy count. Positions past the highest set bit
/// of `index` are cleared.
pub fn decode_into(index: u64, bits: &mut [bool]) {
    debug_assert!(
        bits.len() >= 64 || index < (1u64 << bits.len()),
        "index {index} out of range for {} policies",
        bits.len()
    );
    let mut value = index;
    for bit in bits.iter_mut() {
        *bit = value & 1 == 1;
        value >>= 1;
    }
}

/// Reinterprets a bit vector as an integer, bit `j` worth `2^j`.
///
/// `bits.len()` must not exceed 64.
pub fn encode(bits: &[bool]) -> u64 {
    debug_assert!(bits.len() <= 64, "{} bits do not fit in a u64", bits.len());
    bits.iter()
        .enumerate()
        .filter(|&(_, &b)| b)
        .fold(0u64, |acc, (j, _)| acc | (1u64 << j))
}

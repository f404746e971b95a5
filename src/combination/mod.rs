//! Policy combinations as integer indices.
//!
//! A combination of P policies is a P-bit number: bit `j` set means
//! policy `j` is selected. [`decode`] and [`encode`] convert between the
//! index and its bit vector, and are inverse on `[0, 2^P)`.

mod enumerator;

pub use enumerator::{
    combination_count, decode, decode_into, encode, Combination, MAX_ENCODABLE_POLICIES,
};

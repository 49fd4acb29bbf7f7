//! Fixed-width classical bitstrings, used both to index basis states and to
//! report measurement outcomes.
//!
//! Bit `k` of a `BitString` is the `k`-th least significant bit of its value.
//! Bitstrings are printed with bit `width - 1` on the left and bit `0` on the
//! right, so that the basis state ∣q₁q₀⟩ with `q₀ = 1` and `q₁ = 0` reads as
//! `"01"`.

use std::{ fmt, str::FromStr };
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitsError {
    #[error("bitstring: width {0} exceeds the maximum of 64")]
    TooWide(usize),

    #[error("bitstring: value {0} does not fit in {1} bit(s)")]
    ValueTooLarge(u64, usize),

    #[error("bitstring: invalid character {0:?}; expected '0' or '1'")]
    InvalidChar(char),
}
pub type BitsResult<T> = Result<T, BitsError>;

/// A classical register value of fixed width.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    // field order matters for the derived `Ord`
    width: usize,
    value: u64,
}

impl BitString {
    /// Maximum number of bits a `BitString` can hold.
    pub const MAX_WIDTH: usize = 64;

    /// Create a new `BitString` from an integer value.
    ///
    /// Fails if `width` is greater than [`Self::MAX_WIDTH`] or if `value` has
    /// set bits at or above `width`.
    pub fn new(value: u64, width: usize) -> BitsResult<Self> {
        if width > Self::MAX_WIDTH { return Err(BitsError::TooWide(width)); }
        if width < Self::MAX_WIDTH && value >> width != 0 {
            return Err(BitsError::ValueTooLarge(value, width));
        }
        Ok(Self { width, value })
    }

    /// Create an all-zero `BitString`.
    pub fn zeros(width: usize) -> BitsResult<Self> { Self::new(0, width) }

    /// Return the integer value.
    pub fn value(&self) -> u64 { self.value }

    /// Return the number of bits.
    pub fn width(&self) -> usize { self.width }

    /// Return the value as a basis-state index.
    pub fn index(&self) -> usize { self.value as usize }

    /// Return the value of bit `k`, or `None` if `k` is out of range.
    pub fn bit(&self, k: usize) -> Option<bool> {
        (k < self.width).then(|| (self.value >> k) & 1 == 1)
    }

    /// Set bit `k` to `b`. Does nothing if `k` is out of range.
    pub fn set_bit(&mut self, k: usize, b: bool) {
        if k >= self.width { return; }
        if b {
            self.value |= 1 << k;
        } else {
            self.value &= !(1 << k);
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 { return Ok(()); }
        write!(f, "{:0w$b}", self.value, w = self.width)
    }
}

impl FromStr for BitString {
    type Err = BitsError;

    fn from_str(s: &str) -> BitsResult<Self> {
        let width = s.chars().count();
        if width > Self::MAX_WIDTH { return Err(BitsError::TooWide(width)); }
        let value
            = s.chars()
            .try_fold(0_u64, |acc, ch| {
                match ch {
                    '0' => Ok(acc << 1),
                    '1' => Ok((acc << 1) | 1),
                    c => Err(BitsError::InvalidChar(c)),
                }
            })?;
        Ok(Self { width, value })
    }
}

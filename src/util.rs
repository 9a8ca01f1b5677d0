//! Small numeric and formatting helpers (SPEC_FULL.md §2 "Utilities").
//!
//! Grounded on `original_source/include/utils.h`: `signextend<T, N>` (a C++
//! bitfield trick unavailable in Rust, reimplemented with arithmetic shifts),
//! `floorto`/`ceilto`/`roundto`, and `printRange`.

use std::fmt::Display;

/// Sign-extend the low 8 bits of `n` into a full `i16`.
///
/// `v if v < 0x80 else v - 0x100`, per SPEC_FULL.md §8 property 8.
#[inline]
pub fn sign_extend8(n: u8) -> i16 {
    (n as i8) as i16
}

/// Round `r` down to the nearest multiple of `n`.
#[inline]
pub fn floor_to(n: i64, r: i64) -> i64 {
    if r >= 0 {
        (r / n) * n
    } else {
        let q = r / n;
        if q * n == r {
            r
        } else {
            (q - 1) * n
        }
    }
}

/// Round `r` up to the nearest multiple of `n`.
#[inline]
pub fn ceil_to(n: i64, r: i64) -> i64 {
    let f = floor_to(n, r);
    if f == r {
        f
    } else {
        f + n
    }
}

/// Round `r` to the nearest multiple of `n`, ties away from zero.
#[inline]
pub fn round_to(n: i64, r: i64) -> i64 {
    floor_to(n, r + n / 2)
}

/// Print a range of displayable values to `out`, comma-separated.
pub fn print_range<T: Display>(items: impl IntoIterator<Item = T>, out: &mut impl std::fmt::Write) -> std::fmt::Result {
    let mut iter = items.into_iter();
    if let Some(first) = iter.next() {
        write!(out, "{}", first)?;
        for item in iter {
            write!(out, ", {}", item)?;
        }
    }
    Ok(())
}

// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Revenue Numeric Trait
//!
//! Unified numeric bounds for every component that stores or adds up
//! revenue. The engine stays generic over the integer width so callers with
//! unusually large boards can pick `i64`; for the usual board sizes `i32` is
//! more than sufficient (a few hundred stations worth at most a few hundred
//! each never come close to `i32::MAX`).
//!
//! Optimistic bounds are accumulated with the saturating helpers below so an
//! estimate can never wrap around and turn into a pessimistic one.

use num_traits::{PrimInt, Signed};

/// A trait alias for integer types that can be used as revenue values.
/// These are usually the signed integer types `i16`, `i32` and `i64`.
pub trait RevenueNumeric:
    PrimInt + Signed + std::fmt::Debug + std::fmt::Display + std::hash::Hash + Send + Sync + 'static
{
}

impl<T> RevenueNumeric for T where
    T: PrimInt
        + Signed
        + std::fmt::Debug
        + std::fmt::Display
        + std::hash::Hash
        + Send
        + Sync
        + 'static
{
}

/// Returns `value` if it is positive and zero otherwise.
#[inline(always)]
pub fn positive_part<T>(value: T) -> T
where
    T: PrimInt + Signed,
{
    if value > T::zero() { value } else { T::zero() }
}

/// Adds `rhs` to `lhs`, clamping at the numeric bounds of `T`.
#[inline(always)]
pub fn saturating_sum<T>(lhs: T, rhs: T) -> T
where
    T: PrimInt,
{
    lhs.saturating_add(rhs)
}

/// Builds the table `table[k]` = the largest sum obtainable from at most `k`
/// of the given values, for `k` in `0..=values.len()`.
///
/// Negative values never improve a sum, so the table is non-decreasing and
/// `table[k]` for `k` beyond the number of positive values equals the sum of
/// all positive values. Sums saturate instead of overflowing.
pub fn best_prefix_sums<T, I>(values: I) -> Vec<T>
where
    T: PrimInt + Signed,
    I: IntoIterator<Item = T>,
{
    let mut sorted: Vec<T> = values.into_iter().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut table = Vec::with_capacity(sorted.len() + 1);
    let mut running = T::zero();
    table.push(running);
    for value in sorted {
        running = saturating_sum(running, positive_part(value));
        table.push(running);
    }
    table
}

/// Looks up `table[count]`, clamping `count` into the table's range.
///
/// Negative counts map to `table[0]`, counts beyond the end to the last entry.
#[inline]
pub fn prefix_lookup<T>(table: &[T], count: i64) -> T
where
    T: PrimInt,
{
    match table.len() {
        0 => T::zero(),
        len => {
            let clamped = count.clamp(0, (len - 1) as i64) as usize;
            table[clamped]
        }
    }
}

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

//! Best assignment found so far.
//!
//! The incumbent starts at zero with every train in the depot, which is
//! always a legal assignment. Only strictly greater totals replace it, so the
//! first assignment found with a given total is the one kept.

use crate::result::TrainRun;
use railhead_core::num::RevenueNumeric;
use railhead_model::index::TrainIndex;

#[derive(Debug, Clone)]
pub struct RevenueIncumbent<T> {
    total: T,
    aux: T,
    runs: Vec<TrainRun<T>>,
}

impl<T> RevenueIncumbent<T>
where
    T: RevenueNumeric,
{
    /// Creates the zero incumbent for the trains `start_train..=final_train`.
    pub fn new(start_train: TrainIndex, final_train: TrainIndex) -> Self {
        Self {
            total: T::zero(),
            aux: T::zero(),
            runs: TrainIndex::range_inclusive(start_train, final_train)
                .map(TrainRun::empty)
                .collect(),
        }
    }

    #[inline]
    pub fn total(&self) -> T {
        self.total
    }

    #[inline]
    pub fn aux(&self) -> T {
        self.aux
    }

    #[inline]
    pub fn runs(&self) -> &[TrainRun<T>] {
        &self.runs
    }

    /// Returns `true` if `total` would replace the incumbent.
    #[inline]
    pub fn is_improvement(&self, total: T) -> bool {
        total > self.total
    }

    /// Installs a new best assignment. The runs are only built if `total`
    /// improves on the incumbent. Returns whether it did.
    pub fn try_install<F>(&mut self, total: T, aux: T, runs: F) -> bool
    where
        F: FnOnce() -> Vec<TrainRun<T>>,
    {
        if !self.is_improvement(total) {
            return false;
        }
        self.total = total;
        self.aux = aux;
        self.runs = runs();
        true
    }

    #[inline]
    pub fn into_parts(self) -> (T, T, Vec<TrainRun<T>>) {
        (self.total, self.aux, self.runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero_with_empty_runs() {
        let incumbent = RevenueIncumbent::<i32>::new(TrainIndex::new(1), TrainIndex::new(2));
        assert_eq!(incumbent.total(), 0);
        assert_eq!(incumbent.runs().len(), 2);
        assert!(incumbent.runs().iter().all(TrainRun::is_empty));
        assert_eq!(incumbent.runs()[0].train(), TrainIndex::new(1));
    }

    #[test]
    fn test_only_strict_improvements_are_installed() {
        let t0 = TrainIndex::new(0);
        let mut incumbent = RevenueIncumbent::<i32>::new(t0, t0);

        assert!(!incumbent.try_install(0, 0, || panic!("runs built for a non-improvement")));
        assert!(incumbent.try_install(30, 5, || vec![TrainRun::empty(t0)]));
        assert!(!incumbent.try_install(30, 0, || panic!("runs built for a tie")));
        assert_eq!(incumbent.total(), 30);
        assert_eq!(incumbent.aux(), 5);

        let (total, aux, runs) = incumbent.into_parts();
        assert_eq!((total, aux, runs.len()), (30, 5, 1));
    }
}

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

//! Revenue bonuses.
//!
//! A bonus pays its value once a single train's route has visited every one
//! of its required vertices. Bonuses with a single required vertex are
//! "simple" and are folded into the vertex values when the network is built;
//! the others are "complex" and are tracked by a completion counter during
//! search.

use crate::index::{TrainIndex, VertexIndex};
use num_traits::{PrimInt, Signed};
use smallvec::SmallVec;

/// A named value bonus tied to a set of vertices.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bonus<T> {
    name: String,
    value: T,
    vertices: SmallVec<[VertexIndex; 4]>,
    applicable_trains: Option<Vec<bool>>,
}

impl<T> Bonus<T>
where
    T: PrimInt + Signed,
{
    /// Creates a bonus that applies to every train.
    pub fn new<S, I>(name: S, value: T, vertices: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = VertexIndex>,
    {
        Self {
            name: name.into(),
            value,
            vertices: vertices.into_iter().collect(),
            applicable_trains: None,
        }
    }

    /// Restricts the bonus to the trains whose mask entry is `true`.
    ///
    /// The mask is indexed by train and must cover every configured train.
    #[inline]
    pub fn with_trains(mut self, mask: Vec<bool>) -> Self {
        self.applicable_trains = Some(mask);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns the vertices that must all be visited.
    #[inline]
    pub fn vertices(&self) -> &[VertexIndex] {
        &self.vertices
    }

    #[inline]
    pub fn train_mask(&self) -> Option<&[bool]> {
        self.applicable_trains.as_deref()
    }

    /// Returns `true` if the bonus is tied to exactly one vertex.
    #[inline]
    pub fn is_simple(&self) -> bool {
        self.vertices.len() == 1
    }

    /// Returns `true` if `train` may earn this bonus.
    ///
    /// Trains beyond the end of the mask never earn it.
    #[inline]
    pub fn applies_to(&self, train: TrainIndex) -> bool {
        match &self.applicable_trains {
            None => true,
            Some(mask) => mask.get(train.get()).copied().unwrap_or(false),
        }
    }
}

impl<T> std::fmt::Display for Bonus<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bonus({}: {} for {} vertices)",
            self.name,
            self.value,
            self.vertices.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    fn t(i: usize) -> TrainIndex {
        TrainIndex::new(i)
    }

    #[test]
    fn test_simple_and_complex() {
        let simple = Bonus::new("port", 20i32, [v(3)]);
        let complex = Bonus::new("east-west", 50i32, [v(1), v(7)]);
        assert!(simple.is_simple());
        assert!(!complex.is_simple());
        assert_eq!(complex.vertices(), &[v(1), v(7)]);
    }

    #[test]
    fn test_applies_to_all_trains_by_default() {
        let bonus = Bonus::new("mine", 10i32, [v(0)]);
        assert!(bonus.applies_to(t(0)));
        assert!(bonus.applies_to(t(5)));
        assert!(bonus.train_mask().is_none());
    }

    #[test]
    fn test_train_mask() {
        let bonus = Bonus::new("mail", 10i32, [v(0)]).with_trains(vec![false, true]);
        assert!(!bonus.applies_to(t(0)));
        assert!(bonus.applies_to(t(1)));
        assert!(!bonus.applies_to(t(2)));
    }

    #[test]
    fn test_display() {
        let bonus = Bonus::new("mail", -10i32, [v(0), v(2)]);
        assert_eq!(format!("{}", bonus), "Bonus(mail: -10 for 2 vertices)");
    }
}

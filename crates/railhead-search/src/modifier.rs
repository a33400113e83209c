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

//! Dynamic modifiers.
//!
//! Game-specific effects that cannot be expressed as vertex values or
//! bonuses (a route-length surcharge, a private company doubling one
//! station) plug in here. A modifier is consulted twice:
//!
//! - `evaluation` adds its share to every complete assignment that is
//!   compared against the best total;
//! - `prediction` adds an optimistic share to every upper bound. It must
//!   never be smaller than the `evaluation` of any completion of the
//!   partial routes it is shown, otherwise the search may prune the optimum.
//!
//! Both are pure functions of the route view.

use crate::view::RouteView;
use railhead_core::num::RevenueNumeric;

/// A route-dependent value adjustment.
pub trait DynamicModifier<T>
where
    T: RevenueNumeric,
{
    /// Returns the name of the modifier.
    fn name(&self) -> &str;
    /// Value delta for a complete assignment.
    fn evaluation(&self, route: &RouteView<'_, T>) -> T;
    /// Upper bound of the value delta for any completion of `route`.
    fn prediction(&self, route: &RouteView<'_, T>) -> T;
}

impl<T> std::fmt::Debug for dyn DynamicModifier<T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DynamicModifier({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn DynamicModifier<T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DynamicModifier({})", self.name())
    }
}

/// A `DynamicModifier` built from two closures.
///
/// # Examples
///
/// ```rust
/// # use railhead_search::modifier::FnModifier;
/// # use railhead_search::view::RouteView;
/// # use railhead_model::index::TrainIndex;
///
/// // Pays 10 per vertex beyond the fifth on the first train's route.
/// let long_run = FnModifier::new(
///     "long-run",
///     |route: &RouteView<'_, i32>| {
///         let len = route.vertices(TrainIndex::new(0)).len() as i32;
///         (len - 5).max(0) * 10
///     },
///     |route: &RouteView<'_, i32>| route.network().num_vertices() as i32 * 10,
/// );
/// # let _ = long_run;
/// ```
pub struct FnModifier<E, P> {
    name: String,
    evaluation: E,
    prediction: P,
}

impl<E, P> FnModifier<E, P> {
    #[inline]
    pub fn new<S>(name: S, evaluation: E, prediction: P) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            evaluation,
            prediction,
        }
    }
}

impl<T, E, P> DynamicModifier<T> for FnModifier<E, P>
where
    T: RevenueNumeric,
    E: Fn(&RouteView<'_, T>) -> T,
    P: Fn(&RouteView<'_, T>) -> T,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluation(&self, route: &RouteView<'_, T>) -> T {
        (self.evaluation)(route)
    }

    fn prediction(&self, route: &RouteView<'_, T>) -> T {
        (self.prediction)(route)
    }
}

impl<E, P> std::fmt::Debug for FnModifier<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FnModifier({})", self.name)
    }
}

/// Sums the `evaluation` shares of all modifiers.
#[inline]
pub(crate) fn evaluation_share<T>(modifiers: &[Box<dyn DynamicModifier<T> + '_>], route: &RouteView<'_, T>) -> T
where
    T: RevenueNumeric,
{
    modifiers
        .iter()
        .fold(T::zero(), |acc, modifier| acc + modifier.evaluation(route))
}

/// Sums the `prediction` shares of all modifiers, saturating.
#[inline]
pub(crate) fn prediction_share<T>(modifiers: &[Box<dyn DynamicModifier<T> + '_>], route: &RouteView<'_, T>) -> T
where
    T: RevenueNumeric,
{
    modifiers
        .iter()
        .fold(T::zero(), |acc, modifier| acc.saturating_add(modifier.prediction(route)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SearchState;
    use railhead_model::{
        index::TrainIndex, network::RevenueNetworkBuilder, train::TrainDescriptor, vertex::Vertex,
    };

    #[test]
    fn test_shares_are_summed() {
        let mut builder = RevenueNetworkBuilder::<i32>::new();
        builder.add_train(TrainDescriptor::standard("2", 2, 0));
        builder.add_vertex(Vertex::major(10));
        let network = builder.build().unwrap();
        let state = SearchState::new(&network);
        let t0 = TrainIndex::new(0);
        let view = RouteView::new(&network, &state, t0, t0);

        let modifiers: Vec<Box<dyn DynamicModifier<i32>>> = vec![
            Box::new(FnModifier::new("a", |_: &RouteView<'_, i32>| 5, |_: &RouteView<'_, i32>| 8)),
            Box::new(FnModifier::new("b", |_: &RouteView<'_, i32>| -2, |_: &RouteView<'_, i32>| i32::MAX)),
        ];

        assert_eq!(evaluation_share(&modifiers, &view), 3);
        assert_eq!(prediction_share(&modifiers, &view), i32::MAX);
        assert_eq!(format!("{:?}", modifiers[0]), "DynamicModifier(a)");
    }
}

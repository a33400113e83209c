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

use crate::stats::RevenueStatistics;
use railhead_core::num::RevenueNumeric;
use railhead_model::index::{EdgeIndex, TrainIndex, VertexIndex};

/// Why a revenue calculation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every route was explored or pruned; the total is optimal.
    SearchExhausted,
    /// A monitor stopped the search. The outcome holds the best total found
    /// up to that point, which need not be optimal.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::SearchExhausted => write!(f, "Search Exhausted"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The route of one train in an assignment.
///
/// `vertices` is the ordered path from one end of the route to the other and
/// `edges` the track between consecutive vertices. A train that does not
/// run has both empty and a value of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRun<T> {
    train: TrainIndex,
    vertices: Vec<VertexIndex>,
    edges: Vec<EdgeIndex>,
    value: T,
}

impl<T> TrainRun<T>
where
    T: RevenueNumeric,
{
    #[inline]
    pub fn new(train: TrainIndex, vertices: Vec<VertexIndex>, edges: Vec<EdgeIndex>, value: T) -> Self {
        Self {
            train,
            vertices,
            edges,
            value,
        }
    }

    /// The run of a train that stays in the depot.
    #[inline]
    pub fn empty(train: TrainIndex) -> Self {
        Self::new(train, Vec::new(), Vec::new(), T::zero())
    }

    #[inline]
    pub fn train(&self) -> TrainIndex {
        self.train
    }

    #[inline]
    pub fn vertices(&self) -> &[VertexIndex] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    /// The value of the route for this train, complex bonuses included.
    /// Dynamic modifier shares are not attributed to single trains.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl<T> std::fmt::Display for TrainRun<T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.train)?;
        if self.vertices.is_empty() {
            return write!(f, "no run");
        }
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", vertex.get())?;
        }
        write!(f, " (value: {})", self.value)
    }
}

/// Result of a revenue calculation.
#[derive(Debug, Clone)]
pub struct RevenueOutcome<T> {
    total: T,
    aux: T,
    runs: Vec<TrainRun<T>>,
    termination_reason: TerminationReason,
    statistics: RevenueStatistics,
}

impl<T> RevenueOutcome<T>
where
    T: RevenueNumeric,
{
    #[inline]
    pub fn new(
        total: T,
        aux: T,
        runs: Vec<TrainRun<T>>,
        termination_reason: TerminationReason,
        statistics: RevenueStatistics,
    ) -> Self {
        Self {
            total,
            aux,
            runs,
            termination_reason,
            statistics,
        }
    }

    /// The best total value found, modifier share included.
    #[inline]
    pub fn total(&self) -> T {
        self.total
    }

    /// The part of `total` contributed by dynamic modifiers.
    #[inline]
    pub fn aux(&self) -> T {
        self.aux
    }

    /// One run per train of the requested range, in train order.
    #[inline]
    pub fn runs(&self) -> &[TrainRun<T>] {
        &self.runs
    }

    /// Returns the run of `train`, if the train was part of the calculation.
    #[inline]
    pub fn run(&self, train: TrainIndex) -> Option<&TrainRun<T>> {
        self.runs.iter().find(|run| run.train() == train)
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &RevenueStatistics {
        &self.statistics
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.termination_reason == TerminationReason::SearchExhausted
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::Aborted(_))
    }

    #[inline]
    pub fn into_runs(self) -> Vec<TrainRun<T>> {
        self.runs
    }
}

impl<T> std::fmt::Display for RevenueOutcome<T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "RevenueOutcome(total: {}, aux: {}, {})",
            self.total, self.aux, self.termination_reason
        )?;
        for run in &self.runs {
            writeln!(f, "  {}", run)?;
        }
        Ok(())
    }
}

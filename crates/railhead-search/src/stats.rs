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

use std::time::Duration;

/// Counters collected during one revenue calculation, prediction runs
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevenueStatistics {
    /// Vertices entered by any train.
    pub vertices_visited: u64,
    /// Edges travelled by any train.
    pub edges_travelled: u64,
    /// Complete assignments evaluated against the best total.
    pub evaluations: u64,
    /// Upper bounds computed.
    pub predictions: u64,
    /// Branches cut because their upper bound could not beat the best total.
    pub prunings_prediction: u64,
    /// Branches cut because a train exceeded its limits.
    pub prunings_invalid: u64,
    /// Strict improvements of the best total.
    pub improvements: u64,
    /// Single-train searches run to derive the cumulative bounds.
    pub prediction_runs: u64,
    /// The deepest recursion reached.
    pub max_depth: u64,
    /// Total wall time of the calculation.
    pub time_total: Duration,
}

impl RevenueStatistics {
    #[inline]
    pub fn on_vertex_visited(&mut self) {
        self.vertices_visited = self.vertices_visited.saturating_add(1);
    }

    #[inline]
    pub fn on_edge_travelled(&mut self) {
        self.edges_travelled = self.edges_travelled.saturating_add(1);
    }

    #[inline]
    pub fn on_evaluation(&mut self) {
        self.evaluations = self.evaluations.saturating_add(1);
    }

    #[inline]
    pub fn on_prediction(&mut self) {
        self.predictions = self.predictions.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_prediction(&mut self) {
        self.prunings_prediction = self.prunings_prediction.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_invalid(&mut self) {
        self.prunings_invalid = self.prunings_invalid.saturating_add(1);
    }

    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
    }

    #[inline]
    pub fn on_prediction_run(&mut self) {
        self.prediction_runs = self.prediction_runs.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Total number of pruned branches.
    #[inline]
    pub fn prunings(&self) -> u64 {
        self.prunings_prediction.saturating_add(self.prunings_invalid)
    }
}

impl std::fmt::Display for RevenueStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Railhead Revenue Statistics:")?;
        writeln!(f, "  Vertices visited:      {}", self.vertices_visited)?;
        writeln!(f, "  Edges travelled:       {}", self.edges_travelled)?;
        writeln!(f, "  Evaluations:           {}", self.evaluations)?;
        writeln!(f, "  Predictions:           {}", self.predictions)?;
        writeln!(f, "  Prunings (prediction): {}", self.prunings_prediction)?;
        writeln!(f, "  Prunings (invalid):    {}", self.prunings_invalid)?;
        writeln!(f, "  Improvements:          {}", self.improvements)?;
        writeln!(f, "  Prediction runs:       {}", self.prediction_runs)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_depth() {
        let mut stats = RevenueStatistics::default();
        stats.on_vertex_visited();
        stats.on_vertex_visited();
        stats.on_pruning_prediction();
        stats.on_pruning_invalid();
        stats.on_depth_update(4);
        stats.on_depth_update(2);

        assert_eq!(stats.vertices_visited, 2);
        assert_eq!(stats.prunings(), 2);
        assert_eq!(stats.max_depth, 4);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = RevenueStatistics {
            evaluations: u64::MAX,
            ..Default::default()
        };
        stats.on_evaluation();
        assert_eq!(stats.evaluations, u64::MAX);
    }

    #[test]
    fn test_display_has_header() {
        let text = RevenueStatistics::default().to_string();
        assert!(text.starts_with("Railhead Revenue Statistics:"));
        assert!(text.contains("Prunings (prediction): 0"));
    }
}

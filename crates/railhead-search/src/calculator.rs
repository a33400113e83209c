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

//! Branch-and-bound revenue calculator.
//!
//! `RevenueCalculator` finds the jointly optimal routes for a range of
//! trains on a `RevenueNetwork`. Each call runs a search session that walks
//! the routes of one train after the other by depth-first recursion:
//!
//! - a train starts at every start vertex in turn and extends its route edge
//!   by edge; every station it reaches may end the route, after which the
//!   next train starts (or, for the last train, the assignment is evaluated);
//! - a route may pass through its start vertex: from a station the search
//!   returns to the start and continues with a later start edge (the bottom
//!   branch);
//! - a train may also not run at all.
//!
//! Edges are exclusive across all trains of an assignment, vertices only
//! within a route. Every mutation of the search state has an exact inverse
//! that is applied when the recursion unwinds.
//!
//! With prediction enabled, the calculator first runs one single-train
//! search per later train to obtain its standalone optimum, and then prunes
//! every partial assignment whose optimistic bound cannot beat the best
//! total found so far.
//!
//! The monitor is polled for a `SearchCommand` at the top of every
//! recursion step. A `Terminate` unwinds the search and the outcome carries
//! the best assignment found up to then.

use crate::{
    error::RevenueError,
    extraction::extract_run,
    incumbent::RevenueIncumbent,
    modifier::{DynamicModifier, evaluation_share, prediction_share},
    monitor::{
        no_op::NoOperationMonitor,
        search_monitor::{PruneReason, SearchCommand, SearchMonitor},
    },
    options::CalculatorOptions,
    prediction::PredictionTables,
    result::{RevenueOutcome, TerminationReason, TrainRun},
    state::{SearchState, Termination},
    stats::RevenueStatistics,
    view::RouteView,
};
use railhead_core::num::{RevenueNumeric, saturating_sum};
use railhead_model::{
    index::{EdgeIndex, TrainIndex, VertexIndex},
    network::{RevenueNetwork, RevenueNetworkBuilder},
};
use std::time::Instant;

/// Computes the maximum revenue of a fleet of trains on a network.
///
/// # Examples
///
/// ```rust
/// # use railhead_model::{index::{TrainIndex, VertexIndex}, network::RevenueNetworkBuilder};
/// # use railhead_model::{train::TrainDescriptor, vertex::Vertex};
/// # use railhead_search::calculator::RevenueCalculator;
///
/// let mut builder = RevenueNetworkBuilder::<i32>::new();
/// builder.add_train(TrainDescriptor::standard("2", 2, 0));
/// let a = builder.add_vertex(Vertex::major(10));
/// let b = builder.add_vertex(Vertex::major(20));
/// let c = builder.add_vertex(Vertex::major(30));
/// builder.connect(a, b);
/// builder.connect(b, c);
/// builder.add_start_vertices([a, b, c]);
///
/// let mut calculator = RevenueCalculator::from_builder(builder).unwrap();
/// let t0 = TrainIndex::new(0);
/// let outcome = calculator.calculate_revenue(t0, t0).unwrap();
/// assert_eq!(outcome.total(), 50);
/// assert_eq!(outcome.runs()[0].vertices(), &[VertexIndex::new(1), VertexIndex::new(2)]);
/// ```
pub struct RevenueCalculator<T>
where
    T: RevenueNumeric,
{
    network: RevenueNetwork<T>,
    modifiers: Vec<Box<dyn DynamicModifier<T>>>,
    options: CalculatorOptions,
    tables: PredictionTables<T>,
    optimal_runs: Vec<TrainRun<T>>,
}

impl<T> RevenueCalculator<T>
where
    T: RevenueNumeric,
{
    /// Creates a calculator with default options.
    #[inline]
    pub fn new(network: RevenueNetwork<T>) -> Self {
        Self::with_options(network, CalculatorOptions::default())
    }

    pub fn with_options(network: RevenueNetwork<T>, options: CalculatorOptions) -> Self {
        let tables = PredictionTables::new(&network);
        log::debug!("Configured revenue calculator on {} with {}", network, options);
        Self {
            network,
            modifiers: Vec::new(),
            options,
            tables,
            optimal_runs: Vec::new(),
        }
    }

    /// Validates the configuration collected in `builder` and creates a
    /// calculator for it.
    pub fn from_builder(builder: RevenueNetworkBuilder<T>) -> Result<Self, RevenueError> {
        Ok(Self::new(builder.build()?))
    }

    /// Registers a dynamic modifier. Modifiers apply to every later call.
    pub fn add_modifier<M>(&mut self, modifier: M)
    where
        M: DynamicModifier<T> + 'static,
    {
        log::debug!("Added dynamic modifier '{}'", modifier.name());
        self.modifiers.push(Box::new(modifier));
    }

    #[inline]
    pub fn network(&self) -> &RevenueNetwork<T> {
        &self.network
    }

    #[inline]
    pub fn options(&self) -> &CalculatorOptions {
        &self.options
    }

    #[inline]
    pub fn set_options(&mut self, options: CalculatorOptions) {
        self.options = options;
    }

    #[inline]
    pub fn modifiers(&self) -> &[Box<dyn DynamicModifier<T>>] {
        &self.modifiers
    }

    /// Optimistic bound of what `train` can earn on its own, before any
    /// search.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `train` is not a train of the network.
    #[inline]
    pub fn upper_bound(&self, train: TrainIndex) -> T {
        debug_assert!(
            train.get() < self.network.num_trains(),
            "called `RevenueCalculator::upper_bound` with train index out of bounds: the len is {} but the index is {}",
            self.network.num_trains(),
            train.get()
        );

        self.tables.standalone_bound(&self.network, train)
    }

    /// The runs of the most recent calculation, one per train of its range.
    /// Empty before the first calculation.
    #[inline]
    pub fn optimal_runs(&self) -> &[TrainRun<T>] {
        &self.optimal_runs
    }

    /// Computes the optimal assignment for the trains `start_train..=final_train`.
    #[inline]
    pub fn calculate_revenue(
        &mut self,
        start_train: TrainIndex,
        final_train: TrainIndex,
    ) -> Result<RevenueOutcome<T>, RevenueError> {
        self.calculate_revenue_with_monitor(start_train, final_train, &mut NoOperationMonitor::new())
    }

    /// Computes the optimal assignment for the trains `start_train..=final_train`,
    /// reporting to `monitor` and polling it for cancellation.
    pub fn calculate_revenue_with_monitor<S>(
        &mut self,
        start_train: TrainIndex,
        final_train: TrainIndex,
        monitor: &mut S,
    ) -> Result<RevenueOutcome<T>, RevenueError>
    where
        S: SearchMonitor<T> + ?Sized,
    {
        let num_trains = self.network.num_trains();
        if start_train > final_train || final_train.get() >= num_trains {
            return Err(RevenueError::InvalidTrainRange {
                start: start_train,
                final_train,
                num_trains,
            });
        }

        let start_time = Instant::now();
        let mut stats = RevenueStatistics::default();
        monitor.on_enter_search(&self.network, &stats);
        log::debug!(
            "Calculating revenue for trains {}..={} on {}",
            start_train.get(),
            final_train.get(),
            self.network
        );

        let mut max_cumulated = vec![T::zero(); num_trains + 1];
        let mut aborted = None;
        if self.options.use_prediction() {
            let standalone = vec![T::zero(); num_trains + 1];
            for train in TrainIndex::range_inclusive(start_train.next(), final_train).rev() {
                stats.on_prediction_run();
                let session = RevenueSearchSession::new(
                    &self.network,
                    &self.tables,
                    &self.modifiers[..0],
                    monitor,
                    &mut stats,
                    SessionSetup {
                        start_train: train,
                        final_train: train,
                        max_cumulated: &standalone,
                        options: self.options,
                        report: false,
                    },
                );
                let (incumbent, abort) = session.run();
                if abort.is_some() {
                    aborted = abort;
                    break;
                }
                log::debug!("Standalone optimum of train {}: {}", train.get(), incumbent.total());
                max_cumulated[train.get()] =
                    saturating_sum(incumbent.total(), max_cumulated[train.get() + 1]);
            }
        }

        let (incumbent, abort) = match aborted {
            Some(reason) => (RevenueIncumbent::new(start_train, final_train), Some(reason)),
            None => RevenueSearchSession::new(
                &self.network,
                &self.tables,
                &self.modifiers,
                monitor,
                &mut stats,
                SessionSetup {
                    start_train,
                    final_train,
                    max_cumulated: &max_cumulated,
                    options: self.options,
                    report: true,
                },
            )
            .run(),
        };

        let reason = match abort {
            Some(reason) => TerminationReason::Aborted(reason),
            None => TerminationReason::SearchExhausted,
        };
        let (total, aux, runs) = incumbent.into_parts();

        stats.set_total_time(start_time.elapsed());
        monitor.on_improved(total, aux, true, &stats);
        monitor.on_exit_search(&stats);
        log::info!(
            "Revenue {} (dynamic share {}) for trains {}..={}: {}",
            total,
            aux,
            start_train.get(),
            final_train.get(),
            reason
        );

        self.optimal_runs = runs.clone();
        Ok(RevenueOutcome::new(total, aux, runs, reason, stats))
    }
}

impl<T> std::fmt::Debug for RevenueCalculator<T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevenueCalculator")
            .field("network", &self.network)
            .field("modifiers", &self.modifiers)
            .field("options", &self.options)
            .finish()
    }
}

impl<T> std::fmt::Display for RevenueCalculator<T>
where
    T: RevenueNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RevenueCalculator({}, modifiers: {}, {})",
            self.network,
            self.modifiers.len(),
            self.options
        )
    }
}

/// Scope of one search session.
struct SessionSetup<'a, T> {
    start_train: TrainIndex,
    final_train: TrainIndex,
    max_cumulated: &'a [T],
    options: CalculatorOptions,
    report: bool,
}

/// A single search over the trains `start_train..=final_train`.
///
/// The main calculation and every standalone prediction run are sessions;
/// only the main one reports to the monitor.
struct RevenueSearchSession<'a, T, S>
where
    T: RevenueNumeric,
    S: SearchMonitor<T> + ?Sized,
{
    network: &'a RevenueNetwork<T>,
    tables: &'a PredictionTables<T>,
    modifiers: &'a [Box<dyn DynamicModifier<T>>],
    monitor: &'a mut S,
    stats: &'a mut RevenueStatistics,
    max_cumulated: &'a [T],
    state: SearchState<T>,
    incumbent: RevenueIncumbent<T>,
    start_train: TrainIndex,
    final_train: TrainIndex,
    use_prediction: bool,
    report: bool,
    poll_interval: u32,
    polls_since_check: u32,
    abort: Option<String>,
}

impl<'a, T, S> std::fmt::Debug for RevenueSearchSession<'a, T, S>
where
    T: RevenueNumeric,
    S: SearchMonitor<T> + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevenueSearchSession")
            .field("start_train", &self.start_train)
            .field("final_train", &self.final_train)
            .field("best_total", &self.incumbent.total())
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, S> RevenueSearchSession<'a, T, S>
where
    T: RevenueNumeric,
    S: SearchMonitor<T> + ?Sized,
{
    fn new(
        network: &'a RevenueNetwork<T>,
        tables: &'a PredictionTables<T>,
        modifiers: &'a [Box<dyn DynamicModifier<T>>],
        monitor: &'a mut S,
        stats: &'a mut RevenueStatistics,
        setup: SessionSetup<'a, T>,
    ) -> Self {
        debug_assert!(
            setup.max_cumulated.len() > setup.final_train.get() + 1,
            "cumulated bounds must cover the train after the final train"
        );

        Self {
            network,
            tables,
            modifiers,
            monitor,
            stats,
            max_cumulated: setup.max_cumulated,
            state: SearchState::new(network),
            incumbent: RevenueIncumbent::new(setup.start_train, setup.final_train),
            start_train: setup.start_train,
            final_train: setup.final_train,
            use_prediction: setup.options.use_prediction(),
            report: setup.report,
            poll_interval: setup.options.poll_interval(),
            polls_since_check: 0,
            abort: None,
        }
    }

    /// Runs the search and returns the best assignment together with the
    /// abort reason, if the monitor stopped the search.
    fn run(mut self) -> (RevenueIncumbent<T>, Option<String>) {
        self.run_train(self.start_train);

        debug_assert_eq!(
            self.state.depth(),
            0,
            "search state not fully unwound after the session"
        );

        (self.incumbent, self.abort)
    }

    #[inline(always)]
    fn is_aborted(&self) -> bool {
        self.abort.is_some()
    }

    /// Asks the monitor whether to go on, every `poll_interval` calls.
    /// Returns `true` once the search has been aborted.
    #[inline]
    fn poll(&mut self) -> bool {
        if self.abort.is_some() {
            return true;
        }

        self.polls_since_check += 1;
        if self.polls_since_check < self.poll_interval {
            return false;
        }
        self.polls_since_check = 0;

        let route = RouteView::new(self.network, &self.state, self.start_train, self.final_train);
        if let SearchCommand::Terminate(reason) = self.monitor.search_command(&route, self.stats) {
            log::debug!("Revenue search terminated by monitor: {}", reason);
            self.abort = Some(reason);
            return true;
        }
        false
    }

    /// Searches every route of `train`, the option of not running included.
    fn run_train(&mut self, train: TrainIndex) {
        if self.poll() {
            return;
        }

        let network = self.network;
        self.state.reset_train(network, train);

        if self.use_prediction && self.prune_by_prediction(train) {
            return;
        }

        for &start in network.start_vertices() {
            let station = self.state.arrive(network, train, start);
            self.stats.on_vertex_visited();

            if !station || self.state.termination(network, train) == Termination::Continue {
                for (slot, adjacency) in network.neighbors(start).iter().enumerate() {
                    if self.is_aborted() {
                        break;
                    }
                    if !self.state.can_travel(network, train, adjacency.edge)
                        || !self.state.is_vertex_available(train, adjacency.neighbor)
                    {
                        continue;
                    }

                    self.state.set_start_slot(train, slot);
                    self.travel(train, adjacency.edge);
                    self.next_vertex(train, adjacency.neighbor, adjacency.edge);
                    self.state.return_edge(network, train, adjacency.edge);
                }
            }

            self.state.leave(network, train, start);
            if self.is_aborted() {
                return;
            }
        }

        self.complete_train(train);
    }

    /// Enters `vertex` over `via` and searches every continuation.
    fn next_vertex(&mut self, train: TrainIndex, vertex: VertexIndex, via: EdgeIndex) {
        if self.poll() {
            return;
        }

        let network = self.network;
        let station = self.state.arrive(network, train, vertex);
        self.stats.on_vertex_visited();
        self.stats.on_depth_update(self.state.depth() as u64);

        if self.report {
            let route = RouteView::new(network, &self.state, self.start_train, self.final_train);
            self.monitor.on_vertex(&route, train, vertex, self.stats);
        }

        if station {
            if self.use_prediction && self.prune_by_prediction(train) {
                self.state.leave(network, train, vertex);
                return;
            }

            match self.state.termination(network, train) {
                Termination::StopInvalid => {
                    self.stats.on_pruning_invalid();
                    if self.report {
                        let route =
                            RouteView::new(network, &self.state, self.start_train, self.final_train);
                        self.monitor
                            .on_prune(&route, train, PruneReason::InvalidRoute, self.stats);
                    }
                    self.state.leave(network, train, vertex);
                    return;
                }
                Termination::StopValid => {
                    if self.has_valid_ends(train) {
                        self.complete_train(train);
                    }
                    self.state.leave(network, train, vertex);
                    return;
                }
                Termination::Continue => {}
            }
        }

        if !network.is_sink(vertex) {
            let via_greedy = network.edge(via).is_greedy();
            for adjacency in network.neighbors(vertex) {
                if self.is_aborted() {
                    break;
                }
                if !via_greedy && !network.edge(adjacency.edge).is_greedy() {
                    continue;
                }
                if !self.state.can_travel(network, train, adjacency.edge)
                    || !self.state.is_vertex_available(train, adjacency.neighbor)
                {
                    continue;
                }

                self.travel(train, adjacency.edge);
                self.next_vertex(train, adjacency.neighbor, adjacency.edge);
                self.state.return_edge(network, train, adjacency.edge);
            }
        }

        if station && !self.is_aborted() {
            if !self.state.is_bottom_active(train) {
                self.run_bottom(train);
            }
            if !self.is_aborted() && self.has_valid_ends(train) {
                self.complete_train(train);
            }
        }

        self.state.leave(network, train, vertex);
    }

    /// Returns to the start vertex of `train` and extends the route through
    /// it with the start edges after the one the main branch took.
    fn run_bottom(&mut self, train: TrainIndex) {
        let network = self.network;
        let Some(&start) = self.state.vertex_stack(train).first() else {
            return;
        };
        let first_slot = self.state.start_slot(train);
        let main_greedy = self
            .state
            .edge_stack(train)
            .first()
            .is_none_or(|&edge| network.edge(edge).is_greedy());

        self.state.begin_bottom(train);
        for adjacency in network.neighbors(start).iter().skip(first_slot + 1) {
            if self.is_aborted() {
                break;
            }
            if !main_greedy && !network.edge(adjacency.edge).is_greedy() {
                continue;
            }
            if !self.state.can_travel(network, train, adjacency.edge)
                || !self.state.is_vertex_available(train, adjacency.neighbor)
            {
                continue;
            }

            self.travel(train, adjacency.edge);
            self.next_vertex(train, adjacency.neighbor, adjacency.edge);
            self.state.return_edge(network, train, adjacency.edge);
        }
        self.state.end_bottom(train);
    }

    /// A route may end at the current vertex only if its other end is a
    /// station too: the start vertex, or the end of the bottom branch.
    #[inline]
    fn has_valid_ends(&self, train: TrainIndex) -> bool {
        if self.state.is_bottom_active(train) {
            return true;
        }
        self.state
            .vertex_stack(train)
            .first()
            .is_some_and(|&start| self.network.is_station_for(start, train))
    }

    #[inline(always)]
    fn travel(&mut self, train: TrainIndex, edge: EdgeIndex) {
        self.state.travel_edge(self.network, train, edge);
        self.stats.on_edge_travelled();
    }

    /// Fixes the route of `train` and moves on to the next train.
    #[inline]
    fn complete_train(&mut self, train: TrainIndex) {
        if train == self.final_train {
            self.evaluate();
        } else {
            self.run_train(train.next());
        }
    }

    /// Compares the current complete assignment against the best one.
    fn evaluate(&mut self) {
        self.stats.on_evaluation();

        let network = self.network;
        let state = &self.state;
        let (start_train, final_train) = (self.start_train, self.final_train);
        let route = RouteView::new(network, state, start_train, final_train);
        let aux = evaluation_share(self.modifiers, &route);
        let total = route.total_value() + aux;

        let installed = self.incumbent.try_install(total, aux, || {
            TrainIndex::range_inclusive(start_train, final_train)
                .map(|train| extract_run(network, state, train))
                .collect()
        });
        if installed {
            self.stats.on_improvement();
            if self.report {
                self.monitor.on_improved(total, aux, false, self.stats);
            }
        }
    }

    /// Returns `true` if no completion of the current partial assignment
    /// can beat the best total.
    fn prune_by_prediction(&mut self, train: TrainIndex) -> bool {
        self.stats.on_prediction();

        let network = self.network;
        let route = RouteView::new(network, &self.state, self.start_train, self.final_train);
        let committed = TrainIndex::range_inclusive(self.start_train, train)
            .fold(T::zero(), |acc, t| saturating_sum(acc, self.state.value(t)));

        let mut bound = saturating_sum(committed, self.tables.remainder(network, &self.state, train));
        bound = saturating_sum(bound, self.max_cumulated[train.get() + 1]);
        bound = saturating_sum(bound, prediction_share(self.modifiers, &route));

        if bound > self.incumbent.total() {
            return false;
        }

        self.stats.on_pruning_prediction();
        if self.report {
            self.monitor
                .on_prune(&route, train, PruneReason::BoundDominated, self.stats);
        }
        true
    }
}

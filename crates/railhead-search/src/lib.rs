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

//! Railhead-Search: branch-and-bound revenue calculation
//!
//! Finds the jointly optimal routes of a fleet of trains on a
//! `railhead_model::network::RevenueNetwork`: every train runs one route,
//! no two routes share track, and the sum of the route values (vertex values,
//! bonuses and dynamic modifiers) is maximal.
//!
//! Core flow
//! - Build a `RevenueNetwork` with `RevenueNetworkBuilder`.
//! - Create a `calculator::RevenueCalculator`, optionally with
//!   `options::CalculatorOptions` and `modifier::DynamicModifier`s.
//! - Call `calculate_revenue` (or `calculate_revenue_with_monitor` to observe
//!   improvements or cancel) for a range of trains.
//!
//! Design highlights
//! - Depth-first search over routes with exact undo of every state change.
//! - Optimistic bounds per train (`prediction`) prune partial assignments
//!   that cannot beat the best total. Results do not depend on them.
//! - Monitors observe and control the search without touching its logic.
//!
//! Assumptions and guarantees
//! - Dynamic modifier predictions must never be below the evaluation of any
//!   completion; pruning relies on it.
//! - Deterministic: the same network and train range always produce the same
//!   routes and the same improvement sequence.
//!
//! Module map
//! - `calculator`: the calculator and its search session.
//! - `state`: mutable search state with exact undo.
//! - `prediction`: per-train bound tables.
//! - `extraction`: turns search stacks into reported runs.
//! - `view`: read-only route view for monitors and modifiers.
//! - `modifier`: dynamic value modifiers.
//! - `monitor`: search monitors (log, composite, interrupt, time limit).
//! - `result`: outcomes, runs and termination reasons.
//! - `stats`: lightweight counters and timing.
//! - `options`: calculator options.
//! - `error`: errors raised before a search starts.

pub mod calculator;
pub mod error;
pub mod extraction;
mod incumbent;
pub mod modifier;
pub mod monitor;
pub mod options;
pub mod prediction;
pub mod result;
pub mod state;
pub mod stats;
pub mod view;

pub use error::RevenueError;

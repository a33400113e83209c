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

use railhead_model::{ConfigurationError, index::TrainIndex};
use thiserror::Error;

/// The error type of a revenue calculation.
///
/// Every variant is raised before the search starts; once the search runs it
/// always produces an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevenueError {
    /// The network configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The requested train range is empty or reaches past the fleet.
    #[error("invalid train range {start}..={final_train} for a fleet of {num_trains} trains")]
    InvalidTrainRange {
        start: TrainIndex,
        final_train: TrainIndex,
        num_trains: usize,
    },
}

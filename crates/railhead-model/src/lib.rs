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

//! # Railhead Model
//!
//! **The network, train and bonus model of the railhead revenue engine.**
//!
//! This crate describes everything a revenue calculation consumes. Graph
//! preparation (turning a tile board into vertices and edges, collapsing
//! degree-two chains, building multigraph routes) happens before this crate;
//! what arrives here is a finished graph with classified vertices, value
//! tables and edge flags.
//!
//! ## Architecture
//!
//! * **`index`**: Typed indices (`VertexIndex`, `EdgeIndex`, `TrainIndex`,
//!   `BonusIndex`, `VisitSetIndex`) so no table can be read with the wrong id.
//! * **`vertex`** / **`edge`**: The graph elements and their flags.
//! * **`train`**: `TrainDescriptor` and `VehicleKind` (standard, express,
//!   distance-limited).
//! * **`bonus`**: Simple and complex value bonuses.
//! * **`network`**: `RevenueNetworkBuilder` (mutable, permissive) and
//!   `RevenueNetwork` (validated, immutable, flattened for the search).
//! * **`error`**: `ConfigurationError`, raised by `build` and never later.

pub mod bonus;
pub mod edge;
pub mod error;
pub mod index;
pub mod network;
pub mod train;
pub mod vertex;

pub use error::ConfigurationError;

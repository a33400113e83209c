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

//! # Railhead Core
//!
//! Foundational building blocks shared by the railhead model and search
//! crates. Nothing in here knows about trains or stations; it only provides
//! the primitives that keep the engine's index-heavy inner loops both fast
//! and hard to misuse.
//!
//! ## Modules
//!
//! - `utils`: phantom-tagged indices (`TypedIndex<T>`) and the
//!   index-addressed arena (`IndexedVec<T, V>`) built on top of them.
//! - `num`: the `RevenueNumeric` trait alias collecting the integer
//!   capabilities the engine relies on, plus small saturating helpers.

pub mod num;
pub mod utils;

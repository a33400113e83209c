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

use railhead_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for vertex indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VertexIndexTag;

impl TypedIndexTag for VertexIndexTag {
    const NAME: &'static str = "VertexIndex";
}

/// A typed index for vertices of the revenue network.
pub type VertexIndex = TypedIndex<VertexIndexTag>;

/// A tag type for edge indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EdgeIndexTag;

impl TypedIndexTag for EdgeIndexTag {
    const NAME: &'static str = "EdgeIndex";
}

/// A typed index for edges of the revenue network.
pub type EdgeIndex = TypedIndex<EdgeIndexTag>;

/// A tag type for train indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TrainIndexTag;

impl TypedIndexTag for TrainIndexTag {
    const NAME: &'static str = "TrainIndex";
}

/// A typed index for the trains (vehicles) of one optimization run.
pub type TrainIndex = TypedIndex<TrainIndexTag>;

/// A tag type for bonus indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BonusIndexTag;

impl TypedIndexTag for BonusIndexTag {
    const NAME: &'static str = "BonusIndex";
}

/// A typed index for revenue bonuses.
pub type BonusIndex = TypedIndex<BonusIndexTag>;

/// A tag type for visit-set indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VisitSetIndexTag;

impl TypedIndexTag for VisitSetIndexTag {
    const NAME: &'static str = "VisitSetIndex";
}

/// A typed index for visit-sets (mutually exclusive vertex groups).
pub type VisitSetIndex = TypedIndex<VisitSetIndexTag>;

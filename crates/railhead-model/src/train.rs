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

//! Train (vehicle) descriptors.
//!
//! A descriptor fixes how far a train may run and which stops it counts. It
//! is immutable during search; the remaining budgets live in the search
//! state and are reset every time the train's search starts over.

/// How a train's run length is limited.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleKind {
    /// Counts stations: at most `majors` major stations and at most
    /// `majors + minors` stations in total ("3", "2+2", ...).
    Standard { majors: i32, minors: i32 },
    /// Counts only major stations; minor stations are ignored for both
    /// counting and valuation ("3E", ...).
    Express { majors: i32 },
    /// Limited by the summed distance of travelled edges ("6H", ...).
    Distance { budget: i32 },
}

/// A train taking part in one revenue calculation.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainDescriptor {
    name: String,
    kind: VehicleKind,
}

impl TrainDescriptor {
    #[inline]
    pub fn new<S>(name: S, kind: VehicleKind) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// A standard (or "plus") train.
    #[inline]
    pub fn standard<S>(name: S, majors: i32, minors: i32) -> Self
    where
        S: Into<String>,
    {
        Self::new(name, VehicleKind::Standard { majors, minors })
    }

    /// An express train that ignores minor stations.
    #[inline]
    pub fn express<S>(name: S, majors: i32) -> Self
    where
        S: Into<String>,
    {
        Self::new(name, VehicleKind::Express { majors })
    }

    /// A distance-limited train.
    #[inline]
    pub fn distance<S>(name: S, budget: i32) -> Self
    where
        S: Into<String>,
    {
        Self::new(name, VehicleKind::Distance { budget })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    /// The major-station budget. Distance-limited trains report zero.
    #[inline]
    pub fn max_majors(&self) -> i32 {
        match self.kind {
            VehicleKind::Standard { majors, .. } | VehicleKind::Express { majors } => majors,
            VehicleKind::Distance { .. } => 0,
        }
    }

    /// The additional (minor) station budget. Only standard trains have one.
    #[inline]
    pub fn max_minors(&self) -> i32 {
        match self.kind {
            VehicleKind::Standard { minors, .. } => minors,
            _ => 0,
        }
    }

    /// The distance budget. Only distance-limited trains have one.
    #[inline]
    pub fn distance_budget(&self) -> i32 {
        match self.kind {
            VehicleKind::Distance { budget } => budget,
            _ => 0,
        }
    }

    /// Returns `true` if minor stations neither count nor pay for this train.
    #[inline]
    pub fn ignore_minors(&self) -> bool {
        matches!(self.kind, VehicleKind::Express { .. })
    }

    #[inline]
    pub fn is_express(&self) -> bool {
        self.ignore_minors()
    }

    #[inline]
    pub fn is_distance_limited(&self) -> bool {
        matches!(self.kind, VehicleKind::Distance { .. })
    }

    /// Returns `true` if any limit of the descriptor is negative.
    #[inline]
    pub(crate) fn has_negative_limit(&self) -> bool {
        match self.kind {
            VehicleKind::Standard { majors, minors } => majors < 0 || minors < 0,
            VehicleKind::Express { majors } => majors < 0,
            VehicleKind::Distance { budget } => budget < 0,
        }
    }
}

impl std::fmt::Display for TrainDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            VehicleKind::Standard { majors, minors: 0 } => {
                write!(f, "Train({}: {} stops)", self.name, majors)
            }
            VehicleKind::Standard { majors, minors } => {
                write!(f, "Train({}: {}+{} stops)", self.name, majors, minors)
            }
            VehicleKind::Express { majors } => {
                write!(f, "Train({}: {} majors, express)", self.name, majors)
            }
            VehicleKind::Distance { budget } => {
                write!(f, "Train({}: distance {})", self.name, budget)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_limits() {
        let t = TrainDescriptor::standard("2+2", 2, 2);
        assert_eq!(t.max_majors(), 2);
        assert_eq!(t.max_minors(), 2);
        assert!(!t.ignore_minors());
        assert!(!t.is_distance_limited());
        assert_eq!(format!("{}", t), "Train(2+2: 2+2 stops)");
    }

    #[test]
    fn test_express_ignores_minors() {
        let t = TrainDescriptor::express("3E", 3);
        assert!(t.is_express());
        assert!(t.ignore_minors());
        assert_eq!(t.max_minors(), 0);
    }

    #[test]
    fn test_distance_budget() {
        let t = TrainDescriptor::distance("6H", 6);
        assert!(t.is_distance_limited());
        assert_eq!(t.distance_budget(), 6);
        assert_eq!(t.max_majors(), 0);
        assert_eq!(format!("{}", t), "Train(6H: distance 6)");
    }

    #[test]
    fn test_negative_limits_detected() {
        assert!(TrainDescriptor::standard("x", -1, 0).has_negative_limit());
        assert!(TrainDescriptor::distance("x", -3).has_negative_limit());
        assert!(!TrainDescriptor::express("x", 0).has_negative_limit());
    }
}

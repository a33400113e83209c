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

/// Tuning knobs of a `RevenueCalculator`.
///
/// # Examples
///
/// ```rust
/// # use railhead_search::options::CalculatorOptions;
///
/// let options = CalculatorOptions::default()
///     .with_prediction(false)
///     .with_poll_interval(64);
/// assert!(!options.use_prediction());
/// assert_eq!(options.poll_interval(), 64);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculatorOptions {
    use_prediction: bool,
    poll_interval: u32,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            use_prediction: true,
            poll_interval: 1,
        }
    }
}

impl CalculatorOptions {
    /// Enables or disables the revenue prediction. Results are identical
    /// either way; without it the search only takes longer.
    #[inline]
    pub fn with_prediction(mut self, use_prediction: bool) -> Self {
        self.use_prediction = use_prediction;
        self
    }

    /// Sets how many recursion steps pass between two polls of the monitor's
    /// search command. Zero is treated as one.
    #[inline]
    pub fn with_poll_interval(mut self, poll_interval: u32) -> Self {
        self.poll_interval = poll_interval.max(1);
        self
    }

    #[inline]
    pub fn use_prediction(&self) -> bool {
        self.use_prediction
    }

    #[inline]
    pub fn poll_interval(&self) -> u32 {
        self.poll_interval.max(1)
    }
}

impl std::fmt::Display for CalculatorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CalculatorOptions(use_prediction: {}, poll_interval: {})",
            self.use_prediction, self.poll_interval
        )
    }
}

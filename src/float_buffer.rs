// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

/// Comparison criterion used by rank and count queries.
///
/// LT yields `rank(min) = 0`; LE yields `rank(min) = P(X = min)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Criterion {
    /// Count items strictly less than the probe.
    #[default]
    LT,
    /// Count items less than or equal to the probe.
    LE,
    /// Count items strictly greater than the probe.
    GT,
    /// Count items greater than or equal to the probe.
    GE,
}

/// An ordered buffer of f32 values backing one compactor level.
///
/// The buffer tracks whether its contents are sorted so that repeated sort
/// calls are free and count queries can pick the binary-search path.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FloatBuffer {
    items: Vec<f32>,
    sorted: bool,
}

impl FloatBuffer {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            sorted: true,
        }
    }

    /// Wraps an already ascending vector of values.
    pub fn from_sorted(items: Vec<f32>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] <= w[1]));
        Self {
            items,
            sorted: true,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.items
    }

    pub fn append(&mut self, value: f32) {
        self.items.push(value);
        if self.items.len() > 1 {
            self.sorted = false;
        }
    }

    /// Sorts the buffer ascending. A no-op if already sorted.
    pub fn sort(&mut self) {
        if !self.sorted {
            self.items.sort_unstable_by(f32::total_cmp);
            self.sorted = true;
        }
    }

    /// Merges another sorted buffer into this one, producing a sorted union.
    pub fn merge_sort_in(&mut self, other: FloatBuffer) {
        let mut other = other;
        self.sort();
        other.sort();

        let left = std::mem::take(&mut self.items);
        let right = other.items;
        let mut merged = Vec::with_capacity(left.len() + right.len());
        let mut left_iter = left.into_iter().peekable();
        let mut right_iter = right.into_iter().peekable();

        while let (Some(l), Some(r)) = (left_iter.peek(), right_iter.peek()) {
            if l.total_cmp(r).is_lt() {
                merged.push(left_iter.next().unwrap());
            } else {
                merged.push(right_iter.next().unwrap());
            }
        }
        merged.extend(left_iter);
        merged.extend(right_iter);

        self.items = merged;
        self.sorted = true;
    }

    /// Returns the number of items comparing to `value` under `criterion`.
    ///
    /// Runs in O(log n) on a sorted buffer and falls back to a linear scan
    /// otherwise, so level zero can be queried between sorts.
    pub fn count_with_criterion(&self, value: f32, criterion: Criterion) -> usize {
        if self.sorted {
            match criterion {
                Criterion::LT => self.lower_bound(value),
                Criterion::LE => self.upper_bound(value),
                Criterion::GT => self.items.len() - self.upper_bound(value),
                Criterion::GE => self.items.len() - self.lower_bound(value),
            }
        } else {
            let test: fn(f32, f32) -> bool = match criterion {
                Criterion::LT => |item, v| item < v,
                Criterion::LE => |item, v| item <= v,
                Criterion::GT => |item, v| item > v,
                Criterion::GE => |item, v| item >= v,
            };
            self.items.iter().filter(|&&item| test(item, value)).count()
        }
    }

    /// Removes `[start, end)` and returns every other element of that range,
    /// starting at the second element when `odds` is set.
    ///
    /// The range length must be even; the result is sorted because it is a
    /// stride of a sorted range.
    pub fn extract_half(&mut self, start: usize, end: usize, odds: bool) -> FloatBuffer {
        debug_assert!(self.sorted, "buffer must be sorted before halving");
        debug_assert!(start <= end && end <= self.items.len());
        debug_assert!((end - start) % 2 == 0, "halved range length must be even");

        let offset = if odds { 1 } else { 0 };
        let promoted: Vec<f32> = self.items[start..end]
            .iter()
            .copied()
            .skip(offset)
            .step_by(2)
            .collect();
        self.items.drain(start..end);
        FloatBuffer {
            items: promoted,
            sorted: true,
        }
    }

    fn lower_bound(&self, value: f32) -> usize {
        let mut left = 0usize;
        let mut right = self.items.len();
        while left < right {
            let mid = left + (right - left) / 2;
            if self.items[mid] < value {
                left = mid + 1;
            } else {
                right = mid;
            }
        }
        left
    }

    fn upper_bound(&self, value: f32) -> usize {
        let mut left = 0usize;
        let mut right = self.items.len();
        while left < right {
            let mid = left + (right - left) / 2;
            if self.items[mid] > value {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        left
    }
}

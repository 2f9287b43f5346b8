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

use crate::compactor::ReqCompactor;
use crate::float_buffer::Criterion;

/// Sorted, weighted view across all compactor levels.
///
/// Built once per mutation epoch and cached by the sketch; quantile queries
/// binary-search the non-decreasing normalized rank column.
#[derive(Debug, Clone)]
pub(crate) struct ReqAuxiliary {
    items: Vec<f32>,
    norm_ranks: Vec<f64>,
}

impl ReqAuxiliary {
    pub fn build(compactors: &[ReqCompactor], total_n: u64) -> Self {
        let num_retained: usize = compactors.iter().map(|c| c.buffer().len()).sum();
        let mut entries: Vec<(f32, u64)> = Vec::with_capacity(num_retained);
        for compactor in compactors {
            let weight = compactor.weight();
            for &value in compactor.buffer().as_slice() {
                entries.push((value, weight));
            }
        }
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut items = Vec::with_capacity(entries.len());
        let mut norm_ranks = Vec::with_capacity(entries.len());
        let mut cum_weight = 0u64;
        for (value, weight) in entries {
            cum_weight += weight;
            items.push(value);
            norm_ranks.push(cum_weight as f64 / total_n as f64);
        }
        Self { items, norm_ranks }
    }

    /// Returns the value at the given normalized rank, or NaN when no row
    /// qualifies under the given criterion.
    pub fn quantile(&self, norm_rank: f64, criterion: Criterion) -> f32 {
        let idx = match criterion {
            Criterion::LT | Criterion::LE => self.first_rank_ge(norm_rank),
            Criterion::GT | Criterion::GE => self.first_rank_gt(norm_rank),
        };
        match idx {
            Some(idx) => self.items[idx],
            None => f32::NAN,
        }
    }

    fn first_rank_ge(&self, rank: f64) -> Option<usize> {
        let mut left = 0usize;
        let mut right = self.norm_ranks.len();
        while left < right {
            let mid = left + (right - left) / 2;
            if self.norm_ranks[mid] < rank {
                left = mid + 1;
            } else {
                right = mid;
            }
        }
        (left < self.norm_ranks.len()).then_some(left)
    }

    fn first_rank_gt(&self, rank: f64) -> Option<usize> {
        let mut left = 0usize;
        let mut right = self.norm_ranks.len();
        while left < right {
            let mid = left + (right - left) / 2;
            if self.norm_ranks[mid] > rank {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        (left < self.norm_ranks.len()).then_some(left)
    }
}

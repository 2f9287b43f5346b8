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

use std::rc::Rc;

use crate::DEFAULT_K;
use crate::debug::ReqDebug;
use crate::float_buffer::Criterion;
use crate::sketch::ReqSketch;

/// Builder for creating [`ReqSketch`] instances.
///
/// # Examples
///
/// ```
/// use reqsketch::{Criterion, ReqSketch};
///
/// let mut sketch = ReqSketch::builder()
///     .k(24)
///     .high_rank_accuracy(false)
///     .criterion(Criterion::LE)
///     .build();
/// sketch.update(1.0);
/// assert_eq!(sketch.k(), 24);
/// assert_eq!(sketch.rank(1.0), 1.0);
/// ```
#[derive(Clone)]
pub struct ReqSketchBuilder {
    k: u32,
    hra: bool,
    compatible: bool,
    criterion: Criterion,
    debug: Option<Rc<dyn ReqDebug>>,
}

impl Default for ReqSketchBuilder {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            hra: true,
            compatible: true,
            criterion: Criterion::default(),
            debug: None,
        }
    }
}

impl ReqSketchBuilder {
    /// Sets parameter k, which controls the size and error of the sketch.
    ///
    /// Must be even and at least 4; odd values are rounded down by one.
    /// The default of 12 roughly corresponds to a 1% relative error guarantee
    /// at 95% confidence.
    pub fn k(mut self, k: u32) -> Self {
        self.k = k;
        self
    }

    /// Chooses which end of the rank domain gets the better accuracy.
    ///
    /// Defaults to true: high ranks are prioritized.
    pub fn high_rank_accuracy(mut self, hra: bool) -> Self {
        self.hra = hra;
        self
    }

    /// Sets compatible mode, in which out-of-range quantile queries return
    /// the stream extremes instead of NaN. Defaults to true.
    pub fn compatible(mut self, compatible: bool) -> Self {
        self.compatible = compatible;
        self
    }

    /// Sets the initial comparison criterion. Defaults to [`Criterion::LT`].
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Installs a debug observer.
    ///
    /// An installed observer also makes compaction coin flips deterministic,
    /// so instrumented runs are reproducible.
    pub fn debug(mut self, debug: Rc<dyn ReqDebug>) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Builds the sketch.
    pub fn build(self) -> ReqSketch {
        ReqSketch::with_options(self.k, self.hra, self.compatible, self.criterion, self.debug)
    }
}

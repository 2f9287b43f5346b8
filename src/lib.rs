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

//! Relative Error Quantiles (REQ) sketch.
//!
//! REQ is a compact, one-pass streaming quantiles sketch based on the paper
//! "Relative Error Streaming Quantiles" (<https://arxiv.org/abs/2004.01668>).
//! Unlike absolute-error quantile sketches, the error in an estimated rank
//! scales with the rank itself (or with one minus the rank), so one end of
//! the rank domain gets very high accuracy at sublinear space. The sketch
//! supports rank, quantile, PMF, and CDF queries, two-way merging, and a
//! compact binary serialization format.
//!
//! The algorithm needs no upper bound on the stream length: each compactor
//! counts its own compaction operations, doubling its section count and
//! shrinking its section width by sqrt(2) as compactions accumulate, which is
//! what sustains the relative-error guarantee on an unbounded stream.
//!
//! # Usage
//!
//! ```rust
//! use reqsketch::ReqSketch;
//!
//! let mut sketch = ReqSketch::default();
//! for i in 1..=10_000 {
//!     sketch.update(i as f32);
//! }
//! let rank = sketch.rank(9_900.0);
//! assert!(rank > 0.97 && rank < 1.0);
//! let q = sketch.quantile(0.99);
//! assert!(q > 9_000.0);
//! ```

mod auxiliary;
mod builder;
mod codec;
pub mod common;
mod compactor;
mod debug;
pub mod error;
mod float_buffer;
mod iter;
mod serialization;
mod sketch;

pub use self::builder::ReqSketchBuilder;
pub use self::debug::ReqDebug;
pub use self::float_buffer::Criterion;
pub use self::iter::ReqIter;
pub use self::sketch::ReqSketch;

/// Default value of parameter k, targeting roughly 1% relative error at 95%
/// confidence.
pub const DEFAULT_K: u32 = 12;
/// Minimum value of parameter k.
pub const MIN_K: u32 = 4;
/// Number of sections a compactor starts with.
pub const INIT_NUM_SECTIONS: u32 = 3;

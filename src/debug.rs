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

/// Observer of sketch lifecycle events, for debugging and instrumentation.
///
/// Every method has a no-op default, so an implementation only overrides the
/// events it cares about. Events carry plain data and cannot mutate the
/// sketch. Installing an observer via
/// [`ReqSketchBuilder::debug`](crate::ReqSketchBuilder::debug) also makes
/// compaction deterministic.
pub trait ReqDebug {
    /// The sketch was constructed with the given parameters.
    fn start(&self, _k: u32, _hra: bool) {}

    /// A new compactor level was appended to the stack.
    fn new_compactor(&self, _lg_weight: u8) {}

    /// A compress cycle is about to walk the levels.
    fn compress_start(&self, _retained: usize, _max_nom_size: usize) {}

    /// A compress cycle finished.
    fn compress_done(&self, _retained: usize, _num_levels: usize) {}

    /// The top compactor overflowed and the stack must grow.
    fn must_add_compactor(&self) {}

    /// The sketch was serialized into the given number of bytes.
    fn serialize_done(&self, _num_bytes: usize) {}
}

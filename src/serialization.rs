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

//! Binary serialization format constants for the REQ sketch.
//!
//! The format is little-endian and byte-aligned: a fixed 28-byte sketch
//! preamble followed by each compactor image preceded by its i32 byte length.

/// Family ID for REQ sketches.
pub const REQ_FAMILY_ID: u8 = 17;

/// Number of 8-byte preamble longs in a sketch image.
pub const PREAMBLE_LONGS: u8 = 1;
/// Serialization version of a sketch image.
pub const SERIAL_VERSION: u8 = 1;

/// Flag indicating the sketch is empty.
pub const FLAG_EMPTY: u8 = 1 << 2;
/// Flag indicating high rank accuracy orientation.
pub const FLAG_HRA: u8 = 1 << 3;
/// Flag indicating compatible mode for out-of-range quantiles.
pub const FLAG_COMPATIBLE: u8 = 1 << 4;
/// Flag indicating the persisted criterion is LE rather than LT.
pub const FLAG_CRITERION_LE: u8 = 1 << 5;

/// Byte offset of the first compactor length within a sketch image.
pub const DATA_START: usize = 28;

/// Number of 8-byte preamble longs in a compactor image.
pub const COMPACTOR_PREAMBLE_LONGS: u8 = 1;
/// Serialization version of a compactor image.
pub const COMPACTOR_SERIAL_VERSION: u8 = 1;
/// Fixed size of a compactor image before its buffer payload.
pub const COMPACTOR_DATA_START: usize = 32;

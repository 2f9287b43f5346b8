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

use std::f32::consts::SQRT_2;

use crate::INIT_NUM_SECTIONS;
use crate::MIN_K;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::common::RandomSource;
use crate::common::XorShift64;
use crate::error::Error;
use crate::float_buffer::FloatBuffer;
use crate::serialization::COMPACTOR_DATA_START;
use crate::serialization::COMPACTOR_PREAMBLE_LONGS;
use crate::serialization::COMPACTOR_SERIAL_VERSION;
use crate::serialization::FLAG_EMPTY;
use crate::serialization::FLAG_HRA;

/// A sample buffer dedicated to one weight class `2^lg_weight`.
///
/// The compactor stores items, decides how much of its buffer to halve per
/// compaction event via the section state, and advances the capacity
/// schedule: every time `num_compactions` reaches `2^(num_sections - 1)` the
/// section count doubles and the section width shrinks by sqrt(2), growing
/// the nominal capacity by sqrt(2) per doubling.
#[derive(Debug, Clone)]
pub(crate) struct ReqCompactor {
    lg_weight: u8,
    hra: bool,
    section_size_flt: f32,
    section_size: u32,
    num_sections: u32,
    num_compactions: u64,
    state: u64,
    rng: XorShift64,
    buf: FloatBuffer,
}

impl ReqCompactor {
    pub fn new(lg_weight: u8, hra: bool, section_size: u32, rng: XorShift64) -> Self {
        Self {
            lg_weight,
            hra,
            section_size_flt: section_size as f32,
            section_size,
            num_sections: INIT_NUM_SECTIONS,
            num_compactions: 0,
            state: 0,
            rng,
            buf: FloatBuffer::new(),
        }
    }

    pub fn lg_weight(&self) -> u8 {
        self.lg_weight
    }

    pub fn weight(&self) -> u64 {
        1u64 << self.lg_weight
    }

    /// The threshold at which this compactor overflows.
    pub fn nom_capacity(&self) -> u32 {
        2 * self.num_sections * self.section_size
    }

    pub fn buffer(&self) -> &FloatBuffer {
        &self.buf
    }

    pub fn buffer_mut(&mut self) -> &mut FloatBuffer {
        &mut self.buf
    }

    /// Halves part of the buffer and returns the promoted half.
    ///
    /// The buffer must be sorted and at least at nominal capacity. Any
    /// overflow beyond nominal capacity is kept as residue at the
    /// accuracy-prioritized end; the compacted span covers
    /// `secs_to_compact` sections at the opposite end of the submitted
    /// region. The span is removed and every other element of it, at a
    /// random starting parity, is returned with twice the weight. The
    /// removed mass equals the promoted mass, so the weighted total is
    /// preserved.
    pub fn compact(&mut self) -> FloatBuffer {
        let nom_cap = self.nom_capacity() as usize;
        debug_assert!(self.buf.len() >= nom_cap, "compact requires an overflowing buffer");

        let secs_to_compact =
            (self.state.trailing_zeros() as u64 + 1).min(self.num_sections as u64) as usize;
        self.state += 1;

        let span = 2 * secs_to_compact * self.section_size as usize;
        let start = if self.hra {
            self.buf.len() - nom_cap
        } else {
            nom_cap - span
        };
        let promoted = self.buf.extract_half(start, start + span, self.rng.next_bool());

        self.num_compactions += 1;
        if self.num_compactions >= 1u64 << (self.num_sections - 1) {
            self.double_sections();
        }
        promoted
    }

    /// Absorbs another compactor of the same weight class.
    ///
    /// Adopts the more advanced capacity schedule of the two so that the
    /// merged compactor never compacts more coarsely than either input.
    pub fn merge(&mut self, other: &ReqCompactor) {
        debug_assert_eq!(self.lg_weight, other.lg_weight);
        self.state |= other.state;
        self.num_compactions = self.num_compactions.max(other.num_compactions);
        if other.num_sections > self.num_sections {
            self.num_sections = other.num_sections;
        }
        if other.section_size_flt < self.section_size_flt {
            self.section_size_flt = other.section_size_flt;
            self.section_size = other.section_size;
        }

        let mut other_buf = other.buf.clone();
        other_buf.sort();
        self.buf.merge_sort_in(other_buf);
    }

    pub fn serialized_size(&self) -> usize {
        COMPACTOR_DATA_START + self.buf.len() * 4
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = SketchBytes::with_capacity(self.serialized_size());
        let flags = (if self.buf.is_empty() { FLAG_EMPTY } else { 0 })
            | (if self.hra { FLAG_HRA } else { 0 });

        bytes.write_u8(COMPACTOR_PREAMBLE_LONGS);
        bytes.write_u8(COMPACTOR_SERIAL_VERSION);
        bytes.write_u8(flags);
        bytes.write_u8(self.lg_weight);
        bytes.write_f32_le(self.section_size_flt);
        bytes.write_i32_le(self.num_sections as i32);
        bytes.write_u64_le(self.num_compactions);
        bytes.write_u64_le(self.state);
        bytes.write_i32_le(self.buf.len() as i32);

        let mut payload = self.buf.clone();
        payload.sort();
        for &value in payload.as_slice() {
            bytes.write_f32_le(value);
        }
        bytes.into_bytes()
    }

    pub fn deserialize(bytes: &[u8]) -> Result<ReqCompactor, Error> {
        fn make_error(tag: &'static str) -> impl FnOnce(std::io::Error) -> Error {
            move |err| Error::insufficient_data(tag).set_source(err)
        }

        let mut cursor = SketchSlice::new(bytes);

        let preamble_longs = cursor.read_u8().map_err(make_error("preamble_longs"))?;
        let serial_version = cursor.read_u8().map_err(make_error("serial_version"))?;
        let flags = cursor.read_u8().map_err(make_error("flags"))?;
        let lg_weight = cursor.read_u8().map_err(make_error("lg_weight"))?;
        let section_size_flt = cursor.read_f32_le().map_err(make_error("section_size_flt"))?;
        let num_sections = cursor.read_i32_le().map_err(make_error("num_sections"))?;
        let num_compactions = cursor.read_u64_le().map_err(make_error("num_compactions"))?;
        let state = cursor.read_u64_le().map_err(make_error("state"))?;
        let buf_len = cursor.read_i32_le().map_err(make_error("buffer_len"))?;

        if preamble_longs != COMPACTOR_PREAMBLE_LONGS {
            return Err(Error::deserial(format!(
                "invalid compactor preamble longs: expected {COMPACTOR_PREAMBLE_LONGS}, got {preamble_longs}"
            )));
        }
        if serial_version != COMPACTOR_SERIAL_VERSION {
            return Err(Error::unsupported_serial_version(
                COMPACTOR_SERIAL_VERSION,
                serial_version,
            ));
        }
        if !(section_size_flt.is_finite() && section_size_flt > 0.0) {
            return Err(Error::deserial(format!(
                "invalid section size: {section_size_flt}"
            )));
        }
        if num_sections < INIT_NUM_SECTIONS as i32 {
            return Err(Error::deserial(format!(
                "num_sections must be at least {INIT_NUM_SECTIONS}, got {num_sections}"
            )));
        }
        if buf_len < 0 {
            return Err(Error::deserial(format!(
                "negative compactor buffer length: {buf_len}"
            )));
        }

        let is_empty = (flags & FLAG_EMPTY) != 0;
        if is_empty != (buf_len == 0) {
            return Err(Error::deserial(
                "compactor empty flag does not match buffer length",
            ));
        }

        let mut items = Vec::with_capacity(buf_len as usize);
        for _ in 0..buf_len {
            items.push(cursor.read_f32_le().map_err(make_error("buffer_item"))?);
        }
        if items.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::deserial("compactor buffer payload must be sorted"));
        }

        Ok(ReqCompactor {
            lg_weight,
            hra: (flags & FLAG_HRA) != 0,
            section_size_flt,
            section_size: nearest_section_size(section_size_flt),
            num_sections: num_sections as u32,
            num_compactions,
            state,
            rng: XorShift64::default(),
            buf: FloatBuffer::from_sorted(items),
        })
    }

    pub fn hra(&self) -> bool {
        self.hra
    }

    fn double_sections(&mut self) {
        self.num_sections *= 2;
        self.section_size_flt /= SQRT_2;
        self.section_size = nearest_section_size(self.section_size_flt);
        self.state = 0;
    }
}

fn nearest_section_size(section_size_flt: f32) -> u32 {
    (section_size_flt.round() as u32).max(MIN_K / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(compactor: &mut ReqCompactor, count: usize) {
        let base = compactor.buffer().len();
        for i in 0..count {
            compactor.buffer_mut().append((base + i) as f32);
        }
        compactor.buffer_mut().sort();
    }

    #[test]
    fn test_initial_capacity() {
        let c = ReqCompactor::new(0, true, 12, XorShift64::seeded(1));
        assert_eq!(c.nom_capacity(), 72);
        assert_eq!(c.weight(), 1);
        let c = ReqCompactor::new(3, true, 4, XorShift64::seeded(1));
        assert_eq!(c.nom_capacity(), 24);
        assert_eq!(c.weight(), 8);
    }

    #[test]
    fn test_first_compaction_halves_every_section() {
        let mut c = ReqCompactor::new(0, true, 4, XorShift64::seeded(7));
        filled(&mut c, 24);
        let promoted = c.compact();
        // state starts at zero, so the span covers all sections
        assert_eq!(promoted.len(), 12);
        assert_eq!(c.buffer().len(), 0);
        assert!(promoted.as_slice().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_second_compaction_halves_one_section() {
        let mut c = ReqCompactor::new(0, true, 4, XorShift64::seeded(7));
        filled(&mut c, 24);
        c.compact();
        filled(&mut c, 24);
        let promoted = c.compact();
        assert_eq!(promoted.len(), 4);
        assert_eq!(c.buffer().len(), 16);
        // hra halves the low end; the high end survives untouched
        assert_eq!(c.buffer().as_slice()[15], 23.0);
    }

    #[test]
    fn test_promoted_is_a_parity_stride() {
        let mut c = ReqCompactor::new(0, false, 4, XorShift64::seeded(3));
        filled(&mut c, 24);
        let promoted = c.compact();
        let evens: Vec<f32> = (0..24).step_by(2).map(|i| i as f32).collect();
        let odds: Vec<f32> = (1..24).step_by(2).map(|i| i as f32).collect();
        assert!(promoted.as_slice() == evens.as_slice() || promoted.as_slice() == odds.as_slice());
    }

    #[test]
    fn test_capacity_schedule_doubles() {
        let mut c = ReqCompactor::new(0, true, 4, XorShift64::seeded(11));
        assert_eq!(c.nom_capacity(), 24);
        // threshold is 2^(num_sections - 1) = 4 compactions
        for _ in 0..4 {
            let deficit = c.nom_capacity() as usize - c.buffer().len();
            filled(&mut c, deficit);
            c.compact();
        }
        assert_eq!(c.num_sections, 6);
        assert_eq!(c.section_size, 3);
        assert_eq!(c.state, 0);
        assert_eq!(c.nom_capacity(), 36);
    }

    #[test]
    fn test_merge_adopts_finer_schedule() {
        let mut a = ReqCompactor::new(2, true, 8, XorShift64::seeded(5));
        let mut b = ReqCompactor::new(2, true, 8, XorShift64::seeded(6));
        for _ in 0..4 {
            let deficit = b.nom_capacity() as usize - b.buffer().len();
            filled(&mut b, deficit);
            b.compact();
        }
        assert_eq!(b.num_sections, 6);

        filled(&mut a, 4);
        a.merge(&b);
        assert_eq!(a.num_sections, 6);
        assert_eq!(a.section_size, b.section_size);
        assert_eq!(a.num_compactions, 4);
        assert!(a.buffer().as_slice().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut c = ReqCompactor::new(1, true, 6, XorShift64::seeded(9));
        filled(&mut c, 36);
        c.compact();
        filled(&mut c, 10);
        let bytes = c.serialize();
        assert_eq!(bytes.len(), c.serialized_size());

        let decoded = ReqCompactor::deserialize(&bytes).unwrap();
        assert_eq!(decoded.lg_weight, c.lg_weight);
        assert_eq!(decoded.hra, c.hra);
        assert_eq!(decoded.section_size_flt, c.section_size_flt);
        assert_eq!(decoded.num_sections, c.num_sections);
        assert_eq!(decoded.num_compactions, c.num_compactions);
        assert_eq!(decoded.state, c.state);
        assert_eq!(decoded.buf.as_slice(), c.buf.as_slice());
    }
}

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

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::DEFAULT_K;
use crate::INIT_NUM_SECTIONS;
use crate::MIN_K;
use crate::auxiliary::ReqAuxiliary;
use crate::builder::ReqSketchBuilder;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::common::NumStdDev;
use crate::common::XorShift64;
use crate::compactor::ReqCompactor;
use crate::debug::ReqDebug;
use crate::error::Error;
use crate::float_buffer::Criterion;
use crate::serialization::COMPACTOR_DATA_START;
use crate::serialization::DATA_START;
use crate::serialization::FLAG_COMPATIBLE;
use crate::serialization::FLAG_CRITERION_LE;
use crate::serialization::FLAG_EMPTY;
use crate::serialization::FLAG_HRA;
use crate::serialization::PREAMBLE_LONGS;
use crate::serialization::REQ_FAMILY_ID;
use crate::serialization::SERIAL_VERSION;

const FIX_RSE_FACTOR: f64 = 0.06;

/// Relative Error Quantiles (REQ) sketch over a stream of f32 values.
///
/// The sketch is a stack of compactors, one per weight class `2^level`. New
/// items enter level zero; when the total retained count reaches the sum of
/// the nominal compactor capacities, a compress cycle walks the levels bottom
/// up, halving any over-capacity compactor and promoting the surviving half
/// one level up. Rank estimates carry a relative error guarantee: the error
/// scales with the rank itself (or with one minus the rank when
/// `high_rank_accuracy` is chosen), instead of being uniform across ranks.
///
/// See the [crate level documentation](crate) for more.
///
/// # Examples
///
/// ```
/// use reqsketch::ReqSketch;
///
/// let mut sketch = ReqSketch::default();
/// for i in 1..=1000 {
///     sketch.update(i as f32);
/// }
/// let median = sketch.quantile(0.5);
/// assert!(median > 400.0 && median < 600.0);
/// ```
#[derive(Clone)]
pub struct ReqSketch {
    k: u32,
    hra: bool,
    compatible: bool,
    criterion: Criterion,
    total_n: u64,
    min_value: Option<f32>,
    max_value: Option<f32>,
    retained: u32,
    max_nom_size: u32,
    compactors: Vec<ReqCompactor>,
    aux: RefCell<Option<ReqAuxiliary>>,
    debug: Option<Rc<dyn ReqDebug>>,
}

impl Default for ReqSketch {
    fn default() -> Self {
        Self::new(DEFAULT_K, true)
    }
}

impl ReqSketch {
    /// Creates a new sketch.
    ///
    /// `k` controls the size and error of the sketch. It must be even and at
    /// least 4; odd values are rounded down by one. The default of 12 roughly
    /// corresponds to a 1% relative error guarantee at 95% confidence. When
    /// `high_rank_accuracy` is true the high ranks are prioritized for better
    /// accuracy, otherwise the low ranks are.
    pub fn new(k: u32, high_rank_accuracy: bool) -> Self {
        Self::with_options(
            k,
            high_rank_accuracy,
            true,
            Criterion::default(),
            None,
        )
    }

    /// Returns a new [`ReqSketchBuilder`].
    pub fn builder() -> ReqSketchBuilder {
        ReqSketchBuilder::default()
    }

    pub(crate) fn with_options(
        k: u32,
        hra: bool,
        compatible: bool,
        criterion: Criterion,
        debug: Option<Rc<dyn ReqDebug>>,
    ) -> Self {
        let k = (k & !1).max(MIN_K);
        let mut sketch = Self {
            k,
            hra,
            compatible,
            criterion,
            total_n: 0,
            min_value: None,
            max_value: None,
            retained: 0,
            max_nom_size: 0,
            compactors: Vec::new(),
            aux: RefCell::new(None),
            debug,
        };
        sketch.grow();
        sketch
    }

    /// Returns parameter k used to configure this sketch.
    pub fn k(&self) -> u32 {
        self.k
    }

    /// Returns the total number of items offered to the sketch.
    pub fn n(&self) -> u64 {
        self.total_n
    }

    /// Returns true if the sketch has not seen any data.
    pub fn is_empty(&self) -> bool {
        self.total_n == 0
    }

    /// Returns the number of retained items.
    pub fn num_retained(&self) -> usize {
        self.retained as usize
    }

    /// Returns the sum of the nominal capacities of all compactors, the
    /// threshold at which the next compress cycle triggers.
    pub fn max_nominal_size(&self) -> usize {
        self.max_nom_size as usize
    }

    /// Returns the number of compactor levels.
    pub fn num_levels(&self) -> usize {
        self.compactors.len()
    }

    /// Returns true if the sketch has begun discarding items.
    pub fn is_estimation_mode(&self) -> bool {
        self.compactors.len() > 1
    }

    /// Returns the high rank accuracy orientation.
    pub fn high_rank_accuracy(&self) -> bool {
        self.hra
    }

    /// Returns true if out-of-range quantile queries return the stream
    /// extremes instead of NaN.
    pub fn is_compatible(&self) -> bool {
        self.compatible
    }

    /// Returns the comparison criterion used by rank and quantile queries.
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Returns the minimum value seen by the sketch.
    pub fn min_value(&self) -> Option<f32> {
        self.min_value
    }

    /// Returns the maximum value seen by the sketch.
    pub fn max_value(&self) -> Option<f32> {
        self.max_value
    }

    /// Sets the comparison criterion for subsequent queries.
    pub fn set_criterion(&mut self, criterion: Criterion) -> &mut Self {
        self.criterion = criterion;
        self
    }

    /// Selects LE when true, LT otherwise.
    pub fn set_less_than_or_equal(&mut self, lt_eq: bool) -> &mut Self {
        self.set_criterion(if lt_eq { Criterion::LE } else { Criterion::LT })
    }

    /// Sets compatible mode for out-of-range quantile queries.
    pub fn set_compatible(&mut self, compatible: bool) -> &mut Self {
        self.compatible = compatible;
        self
    }

    /// Updates the sketch with a new value. NaN values are ignored.
    pub fn update(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        match self.min_value {
            None => {
                self.min_value = Some(value);
                self.max_value = Some(value);
            }
            Some(min) => {
                if value < min {
                    self.min_value = Some(value);
                }
                if let Some(max) = self.max_value {
                    if value > max {
                        self.max_value = Some(value);
                    }
                }
            }
        }
        self.compactors[0].buffer_mut().append(value);
        self.retained += 1;
        self.total_n += 1;
        if self.retained >= self.max_nom_size {
            self.compactors[0].buffer_mut().sort();
            while self.retained >= self.max_nom_size {
                self.compress();
            }
        }
        self.invalidate_aux();
    }

    /// Merges another sketch into this one.
    ///
    /// The result represents the concatenation of both input streams. Merging
    /// an empty sketch is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the sketches have different high rank accuracy orientations.
    pub fn merge(&mut self, other: &ReqSketch) -> &mut Self {
        if other.is_empty() {
            return self;
        }
        assert_eq!(
            self.hra, other.hra,
            "incompatible high rank accuracy orientations"
        );

        self.total_n += other.total_n;
        match (self.min_value, other.min_value) {
            (Some(a), Some(b)) => self.min_value = Some(a.min(b)),
            (None, Some(b)) => self.min_value = Some(b),
            _ => {}
        }
        match (self.max_value, other.max_value) {
            (Some(a), Some(b)) => self.max_value = Some(a.max(b)),
            (None, Some(b)) => self.max_value = Some(b),
            _ => {}
        }

        while self.compactors.len() < other.compactors.len() {
            self.grow();
        }
        for h in 0..other.compactors.len() {
            self.compactors[h].merge(&other.compactors[h]);
        }
        self.update_max_nom_size();
        self.update_retained();
        while self.retained >= self.max_nom_size {
            self.compress();
            self.update_max_nom_size();
            self.update_retained();
        }
        debug_assert!(
            self.retained < self.max_nom_size,
            "retained items must drop below the nominal limit after merge compression"
        );
        self.invalidate_aux();
        self
    }

    /// Clears the sketch back to its freshly constructed state.
    pub fn reset(&mut self) -> &mut Self {
        self.total_n = 0;
        self.retained = 0;
        self.max_nom_size = 0;
        self.min_value = None;
        self.max_value = None;
        self.compactors.clear();
        self.invalidate_aux();
        self.grow();
        self
    }

    /// Returns the normalized rank of `value` under the active criterion.
    ///
    /// An empty sketch yields NaN.
    pub fn rank(&self, value: f32) -> f64 {
        self.count(value) as f64 / self.total_n as f64
    }

    /// Returns normalized ranks for a batch of values in one scan over the
    /// compactors.
    pub fn ranks(&self, values: &[f32]) -> Vec<f64> {
        let total = self.total_n as f64;
        self.counts(values)
            .into_iter()
            .map(|count| count as f64 / total)
            .collect()
    }

    /// Returns the quantile at the given normalized rank.
    ///
    /// When the auxiliary search runs off the table (possible with the GT and
    /// GE criteria), compatible mode substitutes the stream minimum or
    /// maximum; otherwise NaN is returned.
    ///
    /// # Panics
    ///
    /// Panics if the sketch is empty or the rank is outside [0.0, 1.0].
    pub fn quantile(&self, norm_rank: f64) -> f32 {
        assert!(
            !self.is_empty(),
            "operation is undefined for an empty sketch"
        );
        assert!(
            (0.0..=1.0).contains(&norm_rank),
            "rank must be in [0.0, 1.0]"
        );
        let quantile = self.with_aux(|aux| aux.quantile(norm_rank, self.criterion));
        if quantile.is_nan() && self.compatible {
            let substitute = match self.criterion {
                Criterion::LT | Criterion::LE => self.min_value,
                Criterion::GT | Criterion::GE => self.max_value,
            };
            return substitute.unwrap_or(f32::NAN);
        }
        quantile
    }

    /// Returns quantiles for a batch of normalized ranks, building the
    /// auxiliary view once.
    ///
    /// # Panics
    ///
    /// Panics if the sketch is empty or any rank is outside [0.0, 1.0].
    pub fn quantiles(&self, norm_ranks: &[f64]) -> Vec<f32> {
        norm_ranks.iter().map(|&rank| self.quantile(rank)).collect()
    }

    /// Returns the cumulative distribution at the given split points, plus a
    /// trailing 1.0. An empty sketch returns an empty Vec.
    ///
    /// # Panics
    ///
    /// Panics if the split points are not finite, unique, and monotonically
    /// increasing.
    pub fn cdf(&self, split_points: &[f32]) -> Vec<f64> {
        if self.is_empty() {
            return Vec::new();
        }
        let total = self.total_n as f64;
        self.pm_for_cdf(split_points)
            .into_iter()
            .map(|bucket| bucket as f64 / total)
            .collect()
    }

    /// Returns the probability mass between successive split points. An empty
    /// sketch returns an empty Vec.
    ///
    /// # Panics
    ///
    /// Panics if the split points are not finite, unique, and monotonically
    /// increasing.
    pub fn pmf(&self, split_points: &[f32]) -> Vec<f64> {
        if self.is_empty() {
            return Vec::new();
        }
        let buckets = self.pm_for_cdf(split_points);
        let total = self.total_n as f64;
        let mut out = Vec::with_capacity(buckets.len());
        out.push(buckets[0] as f64 / total);
        for j in 1..buckets.len() {
            out.push((buckets[j] as f64 - buckets[j - 1] as f64) / total);
        }
        out
    }

    /// Returns the advertised lower bound on the true rank at the given
    /// estimated rank and confidence.
    pub fn rank_lower_bound(&self, rank: f64, num_std_dev: NumStdDev) -> f64 {
        rank_lb(
            self.k,
            self.compactors.len(),
            rank,
            num_std_dev.value(),
            self.hra,
            self.total_n,
        )
    }

    /// Returns the advertised upper bound on the true rank at the given
    /// estimated rank and confidence.
    pub fn rank_upper_bound(&self, rank: f64, num_std_dev: NumStdDev) -> f64 {
        rank_ub(
            self.k,
            self.compactors.len(),
            rank,
            num_std_dev.value(),
            self.hra,
            self.total_n,
        )
    }

    /// Returns the relative standard error advertised for the given
    /// configuration, quoted at one standard deviation and conservatively
    /// assuming more than one level.
    pub fn rse(k: u32, rank: f64, hra: bool, total_n: u64) -> f64 {
        rank_ub(k, 2, rank, 1, hra, total_n)
    }

    /// Serializes the sketch to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let size = self.serialized_size();
        let mut bytes = SketchBytes::with_capacity(size);

        let flags = (if self.is_empty() { FLAG_EMPTY } else { 0 })
            | (if self.hra { FLAG_HRA } else { 0 })
            | (if self.compatible { FLAG_COMPATIBLE } else { 0 })
            | (if self.criterion == Criterion::LE {
                FLAG_CRITERION_LE
            } else {
                0
            });

        bytes.write_u8(PREAMBLE_LONGS);
        bytes.write_u8(SERIAL_VERSION);
        bytes.write_u8(REQ_FAMILY_ID);
        bytes.write_u8(flags);
        bytes.write_i32_le(self.k as i32);
        bytes.write_u64_le(self.total_n);
        bytes.write_f32_le(self.min_value.unwrap_or(f32::NAN));
        bytes.write_f32_le(self.max_value.unwrap_or(f32::NAN));
        bytes.write_i32_le(self.compactors.len() as i32);
        for compactor in &self.compactors {
            let image = compactor.serialize();
            bytes.write_i32_le(image.len() as i32);
            bytes.write(&image);
        }

        debug_assert_eq!(bytes.len(), size);
        let out = bytes.into_bytes();
        if let Some(debug) = &self.debug {
            debug.serialize_done(out.len());
        }
        out
    }

    /// Deserializes a sketch from bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<ReqSketch, Error> {
        fn make_error(tag: &'static str) -> impl FnOnce(std::io::Error) -> Error {
            move |err| Error::insufficient_data(tag).set_source(err)
        }

        let mut cursor = SketchSlice::new(bytes);

        let preamble_longs = cursor.read_u8().map_err(make_error("preamble_longs"))?;
        let serial_version = cursor.read_u8().map_err(make_error("serial_version"))?;
        let family_id = cursor.read_u8().map_err(make_error("family_id"))?;
        let flags = cursor.read_u8().map_err(make_error("flags"))?;

        if preamble_longs != PREAMBLE_LONGS {
            return Err(Error::deserial(format!(
                "invalid preamble longs: expected {PREAMBLE_LONGS}, got {preamble_longs}"
            )));
        }
        if serial_version != SERIAL_VERSION {
            return Err(Error::unsupported_serial_version(
                SERIAL_VERSION,
                serial_version,
            ));
        }
        if family_id != REQ_FAMILY_ID {
            return Err(Error::invalid_family(REQ_FAMILY_ID, family_id, "REQ"));
        }

        let k = cursor.read_i32_le().map_err(make_error("k"))?;
        if k < MIN_K as i32 || (k & 1) != 0 {
            return Err(Error::deserial(format!("k out of range: {k}")));
        }
        let total_n = cursor.read_u64_le().map_err(make_error("total_n"))?;
        let min_value = cursor.read_f32_le().map_err(make_error("min_value"))?;
        let max_value = cursor.read_f32_le().map_err(make_error("max_value"))?;
        let num_compactors = cursor.read_i32_le().map_err(make_error("num_compactors"))?;
        if num_compactors < 1 {
            return Err(Error::deserial(
                "sketch image must contain at least one compactor",
            ));
        }

        let hra = (flags & FLAG_HRA) != 0;
        let mut compactors = Vec::with_capacity(num_compactors as usize);
        for level in 0..num_compactors {
            let num_bytes = cursor.read_i32_le().map_err(make_error("compactor_len"))?;
            if num_bytes < COMPACTOR_DATA_START as i32 {
                return Err(Error::deserial(format!(
                    "compactor region too short: {num_bytes} bytes"
                )));
            }
            let mut region = vec![0u8; num_bytes as usize];
            cursor.read_exact(&mut region).map_err(make_error("compactor"))?;
            let compactor = ReqCompactor::deserialize(&region)?;
            if compactor.lg_weight() != level as u8 {
                return Err(Error::deserial(format!(
                    "compactor weight out of order: expected {level}, got {}",
                    compactor.lg_weight()
                )));
            }
            if compactor.hra() != hra {
                return Err(Error::deserial(
                    "compactor orientation does not match sketch flags",
                ));
            }
            compactors.push(compactor);
        }

        let mut sketch = ReqSketch {
            k: k as u32,
            hra,
            compatible: (flags & FLAG_COMPATIBLE) != 0,
            criterion: if (flags & FLAG_CRITERION_LE) != 0 {
                Criterion::LE
            } else {
                Criterion::LT
            },
            total_n,
            min_value: (!min_value.is_nan()).then_some(min_value),
            max_value: (!max_value.is_nan()).then_some(max_value),
            retained: 0,
            max_nom_size: 0,
            compactors,
            aux: RefCell::new(None),
            debug: None,
        };
        sketch.update_max_nom_size();
        sketch.update_retained();
        Ok(sketch)
    }

    pub(crate) fn compactors(&self) -> &[ReqCompactor] {
        &self.compactors
    }

    fn grow(&mut self) {
        let lg_weight = self.compactors.len() as u8;
        if lg_weight == 0 {
            if let Some(debug) = &self.debug {
                debug.start(self.k, self.hra);
            }
        }
        let rng = match &self.debug {
            Some(_) => XorShift64::seeded(1 + lg_weight as u64),
            None => XorShift64::default(),
        };
        self.compactors
            .push(ReqCompactor::new(lg_weight, self.hra, self.k, rng));
        self.update_max_nom_size();
        if let Some(debug) = &self.debug {
            debug.new_compactor(lg_weight);
        }
    }

    fn compress(&mut self) {
        if let Some(debug) = &self.debug {
            debug.compress_start(self.retained as usize, self.max_nom_size as usize);
        }
        let mut h = 0;
        while h < self.compactors.len() {
            if self.compactors[h].buffer().len() >= self.compactors[h].nom_capacity() as usize {
                if h + 1 == self.compactors.len() {
                    if let Some(debug) = &self.debug {
                        debug.must_add_compactor();
                    }
                    self.grow();
                }
                let promoted = self.compactors[h].compact();
                self.compactors[h + 1].buffer_mut().merge_sort_in(promoted);
                self.update_retained();
                if self.retained < self.max_nom_size {
                    break;
                }
            }
            h += 1;
        }
        self.update_max_nom_size();
        self.invalidate_aux();
        if let Some(debug) = &self.debug {
            debug.compress_done(self.retained as usize, self.compactors.len());
        }
    }

    fn count(&self, value: f32) -> u64 {
        let buffer_criterion = buffer_criterion(self.criterion);
        let mut count = 0u64;
        for compactor in &self.compactors {
            count += compactor.weight()
                * compactor.buffer().count_with_criterion(value, buffer_criterion) as u64;
        }
        if matches!(self.criterion, Criterion::GT | Criterion::GE) {
            count = self.total_n.saturating_sub(count);
        }
        count
    }

    fn counts(&self, values: &[f32]) -> Vec<u64> {
        let buffer_criterion = buffer_criterion(self.criterion);
        let mut counts = vec![0u64; values.len()];
        for compactor in &self.compactors {
            let weight = compactor.weight();
            let buffer = compactor.buffer();
            for (count, &value) in counts.iter_mut().zip(values) {
                *count += weight * buffer.count_with_criterion(value, buffer_criterion) as u64;
            }
        }
        if matches!(self.criterion, Criterion::GT | Criterion::GE) {
            for count in &mut counts {
                *count = self.total_n.saturating_sub(*count);
            }
        }
        counts
    }

    fn pm_for_cdf(&self, split_points: &[f32]) -> Vec<u64> {
        validate_split_points(split_points);
        let mut buckets = self.counts(split_points);
        buckets.push(self.total_n);
        buckets
    }

    fn with_aux<R>(&self, f: impl FnOnce(&ReqAuxiliary) -> R) -> R {
        let mut cache = self.aux.borrow_mut();
        let aux = cache.get_or_insert_with(|| ReqAuxiliary::build(&self.compactors, self.total_n));
        f(aux)
    }

    fn invalidate_aux(&self) {
        self.aux.replace(None);
    }

    fn update_max_nom_size(&mut self) {
        self.max_nom_size = self.compactors.iter().map(|c| c.nom_capacity()).sum();
    }

    fn update_retained(&mut self) {
        self.retained = self.compactors.iter().map(|c| c.buffer().len() as u32).sum();
    }

    fn serialized_size(&self) -> usize {
        DATA_START
            + self
                .compactors
                .iter()
                .map(|c| 4 + c.serialized_size())
                .sum::<usize>()
    }
}

/// The complementary lower criterion used for buffer-level counting, chosen
/// so that `rank(v, GT) + rank(v, LE) = 1` and `rank(v, GE) + rank(v, LT) = 1`.
fn buffer_criterion(criterion: Criterion) -> Criterion {
    match criterion {
        Criterion::LT => Criterion::LT,
        Criterion::LE => Criterion::LE,
        Criterion::GT => Criterion::LE,
        Criterion::GE => Criterion::LT,
    }
}

fn validate_split_points(split_points: &[f32]) {
    for (i, &value) in split_points.iter().enumerate() {
        if !value.is_finite() {
            panic!("values must be finite");
        }
        if i + 1 < split_points.len() && value >= split_points[i + 1] {
            panic!("values must be unique and monotonically increasing");
        }
    }
}

fn rel_rse_factor() -> f64 {
    (0.0512 / INIT_NUM_SECTIONS as f64).sqrt()
}

fn rank_lb(k: u32, levels: usize, rank: f64, num_std_dev: u32, hra: bool, total_n: u64) -> f64 {
    if levels <= 1 {
        return rank;
    }
    let thresh = k as f64 * INIT_NUM_SECTIONS as f64 / total_n as f64;
    if hra && rank >= 1.0 - thresh {
        return rank;
    }
    if !hra && rank <= thresh {
        return rank;
    }
    let relative = rel_rse_factor() / k as f64 * if hra { 1.0 - rank } else { rank };
    let fixed = FIX_RSE_FACTOR / k as f64;
    let num_std_dev = num_std_dev as f64;
    let lb_rel = rank - num_std_dev * relative;
    let lb_fix = rank - num_std_dev * fixed;
    lb_rel.max(lb_fix)
}

fn rank_ub(k: u32, levels: usize, rank: f64, num_std_dev: u32, hra: bool, total_n: u64) -> f64 {
    if levels <= 1 {
        return rank;
    }
    let thresh = k as f64 * INIT_NUM_SECTIONS as f64 / total_n as f64;
    if hra && rank >= 1.0 - thresh {
        return rank;
    }
    if !hra && rank <= thresh {
        return rank;
    }
    let relative = rel_rse_factor() / k as f64 * if hra { 1.0 - rank } else { rank };
    let fixed = FIX_RSE_FACTOR / k as f64;
    let num_std_dev = num_std_dev as f64;
    let ub_rel = rank + num_std_dev * relative;
    let ub_fix = rank + num_std_dev * fixed;
    ub_rel.min(ub_fix)
}

impl fmt::Debug for ReqSketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqSketch")
            .field("k", &self.k)
            .field("hra", &self.hra)
            .field("compatible", &self.compatible)
            .field("criterion", &self.criterion)
            .field("total_n", &self.total_n)
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("retained", &self.retained)
            .field("max_nom_size", &self.max_nom_size)
            .field("num_levels", &self.compactors.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ReqSketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**********Relative Error Quantiles Sketch Summary**********")?;
        writeln!(f, "  N               : {}", self.total_n)?;
        writeln!(f, "  Retained Items  : {}", self.retained)?;
        writeln!(f, "  Max Nominal Size: {}", self.max_nom_size)?;
        writeln!(f, "  Min Value       : {}", self.min_value.unwrap_or(f32::NAN))?;
        writeln!(f, "  Max Value       : {}", self.max_value.unwrap_or(f32::NAN))?;
        writeln!(f, "  Estimation Mode : {}", self.is_estimation_mode())?;
        writeln!(f, "  Criterion       : {:?}", self.criterion)?;
        writeln!(f, "  High Rank Acc   : {}", self.hra)?;
        writeln!(f, "  Levels          : {}", self.compactors.len())?;
        write!(f, "************************End Summary************************")
    }
}

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

use reqsketch::Criterion;
use reqsketch::ReqSketch;
use reqsketch::error::ErrorKind;

#[test]
fn test_empty() {
    let sketch = ReqSketch::default();
    let bytes = sketch.serialize();
    // 28-byte preamble, one length-prefixed empty compactor of 32 bytes
    assert_eq!(bytes.len(), 64);
    assert_eq!(bytes[0], 1);
    assert_eq!(bytes[1], 1);
    assert_eq!(bytes[2], 17);

    let decoded = ReqSketch::deserialize(&bytes).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(decoded.k(), sketch.k());
    assert_eq!(decoded.criterion(), Criterion::LT);
    assert!(decoded.is_compatible());
    assert!(decoded.high_rank_accuracy());
    assert!(decoded.min_value().is_none());
    assert!(decoded.max_value().is_none());
}

#[test]
fn test_single_value() {
    let mut sketch = ReqSketch::default();
    sketch.update(123.0);

    let bytes = sketch.serialize();
    assert_eq!(bytes.len(), 68);

    let decoded = ReqSketch::deserialize(&bytes).unwrap();
    assert_eq!(decoded.n(), 1);
    assert_eq!(decoded.num_retained(), 1);
    assert_eq!(decoded.min_value(), Some(123.0));
    assert_eq!(decoded.max_value(), Some(123.0));
    assert_eq!(decoded.quantile(0.5), 123.0);
    assert_eq!(decoded.rank(123.0), sketch.rank(123.0));
}

#[test]
fn test_large_sketch_round_trip() {
    let mut sketch = ReqSketch::new(4, true);
    for i in 1..=100_000 {
        sketch.update(i as f32);
    }
    assert!(sketch.num_levels() >= 2);

    let bytes = sketch.serialize();
    let decoded = ReqSketch::deserialize(&bytes).unwrap();

    assert_eq!(decoded.k(), sketch.k());
    assert_eq!(decoded.n(), sketch.n());
    assert_eq!(decoded.num_levels(), sketch.num_levels());
    assert_eq!(decoded.num_retained(), sketch.num_retained());
    assert_eq!(decoded.max_nominal_size(), sketch.max_nominal_size());
    assert_eq!(decoded.min_value(), sketch.min_value());
    assert_eq!(decoded.max_value(), sketch.max_value());

    let probes = [1.0f32, 1000.0, 50_000.0, 99_000.0, 100_000.0];
    assert_eq!(decoded.ranks(&probes), sketch.ranks(&probes));
    let ranks = [0.0, 0.01, 0.25, 0.5, 0.75, 0.99, 1.0];
    assert_eq!(decoded.quantiles(&ranks), sketch.quantiles(&ranks));
    assert_eq!(decoded.cdf(&probes), sketch.cdf(&probes));
    assert_eq!(decoded.pmf(&probes), sketch.pmf(&probes));
}

#[test]
fn test_round_trip_again_is_identical() {
    let mut sketch = ReqSketch::default();
    for i in 0..10_000 {
        sketch.update(i as f32);
    }
    let bytes = sketch.serialize();
    let decoded = ReqSketch::deserialize(&bytes).unwrap();
    assert_eq!(decoded.serialize(), bytes);
}

#[test]
fn test_flags_round_trip() {
    let mut sketch = ReqSketch::builder()
        .k(8)
        .high_rank_accuracy(false)
        .compatible(false)
        .criterion(Criterion::LE)
        .build();
    for i in 0..100 {
        sketch.update(i as f32);
    }

    let decoded = ReqSketch::deserialize(&sketch.serialize()).unwrap();
    assert!(!decoded.high_rank_accuracy());
    assert!(!decoded.is_compatible());
    assert_eq!(decoded.criterion(), Criterion::LE);
}

#[test]
fn test_runtime_only_criteria_do_not_persist() {
    let mut sketch = ReqSketch::default();
    sketch.update(1.0);
    sketch.set_criterion(Criterion::GT);

    let decoded = ReqSketch::deserialize(&sketch.serialize()).unwrap();
    assert_eq!(decoded.criterion(), Criterion::LT);
}

#[test]
fn test_merge_after_round_trip() {
    let mut a = ReqSketch::default();
    let mut b = ReqSketch::default();
    for i in 0..5000 {
        a.update(i as f32);
        b.update((10_000 - i) as f32);
    }
    let mut decoded = ReqSketch::deserialize(&a.serialize()).unwrap();
    decoded.merge(&b);
    assert_eq!(decoded.n(), 10_000);
    assert_eq!(decoded.min_value(), Some(0.0));
    assert_eq!(decoded.max_value(), Some(10_000.0));
    assert!(decoded.num_retained() < decoded.max_nominal_size());
}

#[test]
fn test_invalid_preamble() {
    let mut sketch = ReqSketch::default();
    sketch.update(1.0);
    let mut bytes = sketch.serialize();
    bytes[0] = 2;
    let err = ReqSketch::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);
}

#[test]
fn test_invalid_serial_version() {
    let mut bytes = ReqSketch::default().serialize();
    bytes[1] = 9;
    let err = ReqSketch::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);
}

#[test]
fn test_invalid_family() {
    let mut bytes = ReqSketch::default().serialize();
    bytes[2] = 99;
    let err = ReqSketch::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);
    assert!(err.to_string().contains("invalid sketch family"));
}

#[test]
fn test_truncated_image() {
    let mut sketch = ReqSketch::default();
    for i in 0..100 {
        sketch.update(i as f32);
    }
    let bytes = sketch.serialize();
    for len in [0, 3, 20, 30, bytes.len() - 1] {
        let err = ReqSketch::deserialize(&bytes[..len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData, "prefix of {len} bytes");
    }
}

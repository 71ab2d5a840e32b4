// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dump and load through the generic value tree.

use markup_refl::{
    dump, load, refl_map, Binary, EType, Member, Object, ObjectExt, PropertyFlags, Reflect,
    ReflectError, Registrar, ScalarKind, Timestamp, Value,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default, Clone, PartialEq)]
struct Sample {
    value: f64,
    quality: i64,
}

impl Reflect for Sample {
    fn describe(r: &mut Registrar<Self>) {
        r.element("value", |s| &s.value, |s| &mut s.value, 0.0)
            .element("quality", |s| &s.quality, |s| &mut s.quality, 100);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Sensor {
    name: String,
    unit: String,
    enabled: bool,
    created: Timestamp,
    payload: Binary,
    tags: Vec<String>,
    gains: HashMap<String, f64>,
    last: Sample,
    history: Vec<Sample>,
    by_channel: HashMap<String, Sample>,
    cache: i64,
    serial: String,
}

impl Reflect for Sensor {
    fn describe(r: &mut Registrar<Self>) {
        r.element("name", |s| &s.name, |s| &mut s.name, "sensor")
            .attribute("name", "unit", |s| &s.unit, |s| &mut s.unit, "C")
            .element("enabled", |s| &s.enabled, |s| &mut s.enabled, true)
            .element(
                "created",
                |s| &s.created,
                |s| &mut s.created,
                Timestamp::from_secs(1_700_000_000),
            )
            .element("payload", |s| &s.payload, |s| &mut s.payload, Binary::default())
            .element("tags", |s| &s.tags, |s| &mut s.tags, Vec::<String>::new())
            .element(
                "gains",
                |s| &s.gains,
                |s| &mut s.gains,
                refl_map! { "x" => 1.0f64 },
            )
            .object("last", |s| &s.last, |s| &mut s.last, Sample::get_default())
            .object_array("history", |s| &s.history, |s| &mut s.history, Vec::new())
            .object_map(
                "by_channel",
                |s| &s.by_channel,
                |s| &mut s.by_channel,
                HashMap::new(),
            )
            .element_with_flags(
                "cache",
                |s| &s.cache,
                |s| &mut s.cache,
                0,
                PropertyFlags::TRANSIENT,
            )
            .element_with_flags(
                "serial",
                |s| &s.serial,
                |s| &mut s.serial,
                "SN-0",
                PropertyFlags::READ_ONLY,
            );
    }
}

fn populated() -> Sensor {
    let mut sensor = Sensor::get_default();
    sensor.name = "probe".into();
    sensor.unit = "K".into();
    sensor.enabled = false;
    sensor.payload = Binary(vec![0xde, 0xad]);
    sensor.tags = vec!["a".into(), "b".into()];
    sensor.gains.insert("y".into(), 2.5);
    sensor.last = Sample {
        value: 1.25,
        quality: 90,
    };
    sensor.history = vec![
        Sample {
            value: 1.0,
            quality: 1,
        },
        Sample {
            value: 2.0,
            quality: 2,
        },
    ];
    sensor.by_channel.insert(
        "ch0".into(),
        Sample {
            value: 3.0,
            quality: 3,
        },
    );
    sensor.cache = 77;
    sensor
}

#[test]
fn test_dump_members_follow_property_order() {
    let tree = dump(&populated()).expect("dump");
    let names: Vec<&str> = tree
        .as_object()
        .expect("object")
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    // "cache" is transient
    assert_eq!(
        names,
        [
            "name",
            "enabled",
            "created",
            "payload",
            "tags",
            "gains",
            "last",
            "history",
            "by_channel",
            "serial"
        ]
    );
}

#[test]
fn test_dump_values_and_attributes() {
    let tree = dump(&populated()).expect("dump");

    let name = tree.member("name").expect("name");
    assert_eq!(name.value, Value::from("probe"));
    assert_eq!(name.attribute("unit"), Some(&Value::from("K")));

    assert_eq!(
        tree.member("tags").map(|m| &m.value),
        Some(&Value::from(vec!["a", "b"]))
    );
    let last = &tree.member("last").expect("last").value;
    assert_eq!(
        last.member("quality").map(|m| &m.value),
        Some(&Value::Integer(90))
    );
    let history = tree.member("history").expect("history");
    assert_eq!(history.value.as_array().map(<[Value]>::len), Some(2));
    let channels = tree.member("by_channel").expect("by_channel");
    assert!(channels.value.as_map().expect("map").contains_key("ch0"));
}

#[test]
fn test_roundtrip_into_default_instance() {
    let original = populated();
    let tree = dump(&original).expect("dump");

    let mut copy = Sensor::get_default();
    load(&mut copy, &tree).expect("load");

    assert_eq!(copy.name, original.name);
    assert_eq!(copy.unit, original.unit);
    assert_eq!(copy.enabled, original.enabled);
    assert_eq!(copy.payload, original.payload);
    assert_eq!(copy.tags, original.tags);
    assert_eq!(copy.gains, original.gains);
    assert_eq!(copy.last, original.last);
    assert_eq!(copy.history, original.history);
    assert_eq!(copy.by_channel, original.by_channel);
    // transient is neither dumped nor loaded
    assert_eq!(copy.cache, 0);
}

#[test]
fn test_load_skips_read_only_and_unknown() {
    let mut tree = dump(&Sensor::get_default()).expect("dump");
    if let Value::Object(members) = &mut tree {
        for member in members.iter_mut() {
            if member.name == "serial" {
                member.value = Value::from("SN-999");
            }
        }
        members.push(Member::new("unknown", Value::Integer(1)));
        members.push(Member::new("cache", Value::Integer(5)));
    }

    let mut sensor = Sensor::get_default();
    load(&mut sensor, &tree).expect("load");
    assert_eq!(sensor.serial, "SN-0");
    assert_eq!(sensor.cache, 0);
}

#[test]
fn test_load_partial_tree_keeps_other_fields() {
    let tree = Value::Object(vec![
        Member::new("enabled", Value::Boolean(true)).with_attribute("ignored", Value::Null)
    ]);
    let mut sensor = populated();
    load(&mut sensor, &tree).expect("load");
    assert!(sensor.enabled);
    assert_eq!(sensor.name, "probe");
    assert_eq!(sensor.history.len(), 2);
}

#[test]
fn test_load_rejects_mismatched_kinds() {
    let mut sensor = Sensor::get_default();

    let tree = Value::Object(vec![Member::new("enabled", Value::Integer(1))]);
    assert_eq!(
        load(&mut sensor, &tree),
        Err(ReflectError::ValueMismatch {
            expected: EType::Scalar(ScalarKind::Boolean),
            found: "integer".into(),
        })
    );

    // no widening from integer to float
    let tree = Value::Object(vec![Member::new(
        "gains",
        Value::Map(BTreeMap::from([("z".to_string(), Value::Integer(3))])),
    )]);
    assert!(load(&mut sensor, &tree).is_err());
    assert_eq!(sensor.gains.len(), 1, "failed load leaves the map alone");

    assert!(load(&mut sensor, &Value::Integer(3)).is_err());
}

#[test]
fn test_get_and_set_value() {
    let mut sensor = Sensor::get_default();
    let name = sensor.property("name").expect("name");
    assert_eq!(sensor.get_value(name), Ok(Value::from("sensor")));

    sensor
        .set_value(name, &Value::from("renamed"))
        .expect("set name");
    assert_eq!(sensor.name, "renamed");

    let unit = name.find_attribute("unit").expect("unit");
    assert_eq!(sensor.get_attribute_value(unit), Ok(Value::from("C")));
    sensor
        .set_attribute_value(unit, &Value::from("F"))
        .expect("set unit");
    assert_eq!(sensor.unit, "F");

    let history = sensor.property("history").expect("history");
    let samples = Value::Array(vec![Value::Object(vec![Member::new(
        "value",
        Value::Float(4.5),
    )])]);
    sensor.set_value(history, &samples).expect("set history");
    assert_eq!(
        sensor.history,
        [Sample {
            value: 4.5,
            quality: 100
        }]
    );
}

#[test]
fn test_dump_through_dyn_object() {
    let sensor = populated();
    let object: &dyn Object = &sensor;
    let tree = dump(object).expect("dump");
    assert_eq!(
        tree.member("created").map(|m| &m.value),
        Some(&Value::Timestamp(Timestamp::from_secs(1_700_000_000)))
    );
}

#[test]
fn test_failed_object_array_load_keeps_previous_elements() {
    let mut sensor = populated();
    let before = sensor.history.clone();
    let history = sensor.property("history").expect("history");

    // second element carries an integer where a float is declared
    let samples = Value::Array(vec![
        Value::Object(vec![Member::new("value", Value::Float(3.0))]),
        Value::Object(vec![Member::new("value", Value::Integer(1))]),
    ]);
    assert_eq!(
        sensor.set_value(history, &samples),
        Err(ReflectError::ValueMismatch {
            expected: EType::Scalar(ScalarKind::Float),
            found: "integer".into(),
        })
    );
    assert_eq!(sensor.history, before);

    let samples = Value::Array(vec![Value::Object(vec![Member::new(
        "value",
        Value::Float(3.0),
    )])]);
    sensor.set_value(history, &samples).expect("set history");
    assert_eq!(
        sensor.history,
        [Sample {
            value: 3.0,
            quality: 100
        }]
    );
}

#[test]
fn test_failed_object_map_load_keeps_previous_entries() {
    let mut sensor = populated();
    let before = sensor.by_channel.clone();

    let tree = Value::Object(vec![Member::new(
        "by_channel",
        Value::Map(BTreeMap::from([
            (
                "ch1".to_string(),
                Value::Object(vec![Member::new("quality", Value::Integer(5))]),
            ),
            (
                "ch2".to_string(),
                Value::Object(vec![Member::new("quality", Value::from("bad"))]),
            ),
        ])),
    )]);
    assert!(load(&mut sensor, &tree).is_err());
    assert_eq!(sensor.by_channel, before);
    assert!(!sensor.by_channel.contains_key("ch1"));
}

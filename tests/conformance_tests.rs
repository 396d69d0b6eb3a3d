#![cfg(test)]

use vclock::{DecodeConfig, DecodeError, NumericClock, PartialOrder, StringClock, VectorClock};

// --- Test Utilities ---

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn numeric(entries: &[(u64, u64)]) -> NumericClock {
    entries.iter().copied().collect()
}

fn s(actor: &str) -> String {
    actor.to_string()
}

// --- Merge ---

#[test]
fn merge_takes_per_actor_maximum() {
    init_tracing();
    let mut vc1 = StringClock::new();
    vc1.set(s("1"), 1);
    vc1.set(s("2"), 2);
    vc1.set(s("3"), 3);
    vc1.set(s("4"), 4);

    let mut vc2 = StringClock::new();
    vc2.set(s("2"), 4);
    vc2.set(s("3"), 6);
    vc2.set(s("5"), 10);

    vc1.merge(&vc2);

    assert_eq!(vc1.get(&s("1")), 1);
    assert_eq!(vc1.get(&s("2")), 4);
    assert_eq!(vc1.get(&s("3")), 6);
    assert_eq!(vc1.get(&s("4")), 4);
    assert_eq!(vc1.get(&s("5")), 10);
}

#[test]
fn merge_is_idempotent() {
    let mut a = numeric(&[(1, 3), (2, 1)]);
    let x = numeric(&[(2, 5), (3, 2)]);
    a.merge(&x);
    let once = a.clone();
    a.merge(&x);
    assert_eq!(a, once);
}

#[test]
fn merge_commutes() {
    let a = numeric(&[(1, 3), (2, 1)]);
    let b = numeric(&[(2, 5), (3, 2)]);
    let mut c1 = a.clone();
    c1.merge(&b);
    let mut c2 = b.clone();
    c2.merge(&a);
    assert_eq!(c1, c2);
}

#[test]
fn merge_does_not_copy_zero_counters() {
    let mut a = NumericClock::new();
    a.merge(&numeric(&[(7, 0)]));
    assert_eq!(a.len(), 0);
    assert!(a.actors().is_empty());
    assert_eq!(a, NumericClock::new());

    let mut b = numeric(&[(1, 1)]);
    b.merge(&numeric(&[(1, 0), (2, 0), (3, 2)]));
    assert_eq!(b, numeric(&[(1, 1), (3, 2)]));
}

// --- Encoding ---

#[test]
fn bytes_roundtrip_many_entries() {
    init_tracing();
    let mut vc1 = StringClock::new();
    let mut seed = 0x9E37_79B9_7F4A_7C15u64;
    for i in 1..50u64 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        vc1.set(i.to_string(), seed);
    }

    let raw = vc1.to_bytes();
    let vc2 = StringClock::from_bytes(&raw).unwrap();
    assert_eq!(vc1, vc2);
}

#[test]
fn bytes_roundtrip_empty() {
    let empty = NumericClock::new();
    let back = NumericClock::from_bytes(&empty.to_bytes()).unwrap();
    assert_eq!(back, empty);
    assert!(back.is_empty());
}

#[test]
fn bytes_roundtrip_keeps_explicit_zero_entries() {
    let clock = numeric(&[(1, 0), (2, 3)]);
    let back = NumericClock::from_bytes(&clock.to_bytes()).unwrap();
    assert_eq!(back.actors(), vec![1, 2]);
    assert_eq!(back, clock);
}

#[test]
fn from_bytes_rejects_malformed_input() {
    init_tracing();
    let mut clock = StringClock::new();
    clock.tick(s("alpha"));
    let raw = clock.to_bytes();

    assert_eq!(StringClock::from_bytes(&[]), Err(DecodeError::Empty));
    assert_eq!(StringClock::from_bytes(&raw[..raw.len() - 3]), Err(DecodeError::Truncated));

    let mut extended = raw.clone();
    extended.push(0);
    assert_eq!(StringClock::from_bytes(&extended), Err(DecodeError::TrailingBytes(1)));

    let limited = StringClock::from_bytes_with(&raw, &DecodeConfig::with_max_bytes(8));
    assert!(matches!(limited, Err(DecodeError::TooLarge { .. })));
}

#[test]
fn from_bytes_rejects_wrong_actor_type() {
    // Numeric actors decoded as strings: the first actor's 8 bytes become a
    // string length far past the end of the input.
    let raw = numeric(&[(u64::MAX, 1)]).to_bytes();
    assert!(StringClock::from_bytes(&raw).is_err());
}

// --- Comparison ---

#[test]
fn tick_then_compare() {
    let mut vc1 = StringClock::new();
    for (actor, count) in [("1", 1), ("2", 2), ("3", 3), ("4", 4), ("5", 5)] {
        vc1.set(s(actor), count);
    }

    let mut vc2 = vc1.clone();
    assert_eq!(vc1.compare(&vc2), PartialOrder::Equal);

    vc2.tick(s("3"));
    assert_eq!(vc1.compare(&vc2), PartialOrder::Before);
    assert_eq!(vc2.compare(&vc1), PartialOrder::After);

    vc2.tick(s("5"));
    assert_eq!(vc1.compare(&vc2), PartialOrder::Before);
    assert_eq!(vc2.compare(&vc1), PartialOrder::After);

    let mut vc3 = vc1.clone();
    vc3.set(s("6"), 1);
    assert_eq!(vc1.compare(&vc3), PartialOrder::Before);
    assert_eq!(vc3.compare(&vc1), PartialOrder::After);

    assert_eq!(vc3.compare(&vc2), PartialOrder::Concurrent);
    assert_eq!(vc2.compare(&vc3), PartialOrder::Concurrent);

    vc1.tick(s("1"));
    assert_eq!(vc1.compare(&vc2), PartialOrder::Concurrent);
    assert_eq!(vc2.compare(&vc1), PartialOrder::Concurrent);
    assert_eq!(vc1.compare(&vc3), PartialOrder::Concurrent);
    assert_eq!(vc3.compare(&vc1), PartialOrder::Concurrent);
}

#[test]
fn disjoint_actors_are_concurrent() {
    let vc1 = numeric(&[(1, 1), (2, 2), (3, 3)]);
    let vc2 = numeric(&[(2, 2), (3, 3), (4, 1)]);
    assert_eq!(vc1.compare(&vc2), PartialOrder::Concurrent);
    assert_eq!(vc2.compare(&vc1), PartialOrder::Concurrent);
    assert!(vc1.is_concurrent(&vc2));
}

#[test]
fn clone_is_independent() {
    let original = numeric(&[(1, 1)]);
    let mut copy = original.clone();
    copy.tick(1);
    copy.set(2, 9);
    assert_eq!(original, numeric(&[(1, 1)]));
    assert!(original.happened_before(&copy));
    assert!(copy.happened_after(&original));
}

// --- Passive increment ---

#[test]
fn passive_increment_credits_silent_actors() {
    init_tracing();
    let mut pvc = StringClock::new();
    let mut before = StringClock::new();
    let mut now = StringClock::new();

    for actor in ["1", "2", "3", "4"] {
        now.tick(s(actor));
    }

    let mut expect = now.clone();
    pvc.passive_increment(&before, &now);
    assert_eq!(pvc, expect);

    before.merge(&now);
    now.tick(s("1"));
    now.tick(s("2"));
    expect.tick(s("3"));
    expect.tick(s("4"));

    pvc.passive_increment(&before, &now);
    assert_eq!(pvc, expect);
    assert_eq!(pvc.get(&s("1")), 1);
    assert_eq!(pvc.get(&s("3")), 2);

    // Nobody advances: every actor is credited again.
    before.merge(&now);
    pvc.passive_increment(&before, &now);
    assert_eq!(pvc.get(&s("1")), 2);
    assert_eq!(pvc.get(&s("2")), 2);
    assert_eq!(pvc.get(&s("3")), 3);
    assert_eq!(pvc.get(&s("4")), 3);
}

// --- Inspection ---

#[test]
fn threshold_queries_are_sorted() {
    let mut vc = StringClock::new();
    for i in 0..31 {
        vc.tick(s("1"));
        if i % 2 == 0 {
            vc.tick(s("2"));
        }
        if i % 3 == 0 {
            vc.tick(s("3"));
        }
    }
    assert_eq!(vc.get(&s("1")), 31);
    assert_eq!(vc.get(&s("2")), 16);
    assert_eq!(vc.get(&s("3")), 11);

    assert!(vc.above(40).is_empty());
    assert_eq!(vc.above(30), vec![s("1")]);
    assert_eq!(vc.above(15), vec![s("1"), s("2")]);
    assert_eq!(vc.above(10), vec![s("1"), s("2"), s("3")]);

    assert_eq!(vc.below(12), vec![s("3")]);
    assert_eq!(vc.below(17), vec![s("2"), s("3")]);
    assert!(vc.below(11).is_empty());
}

#[test]
fn string_actors_sort_lexicographically() {
    let mut vc = StringClock::new();
    for actor in ["2", "10", "1"] {
        vc.tick(s(actor));
    }
    assert_eq!(vc.actors(), vec![s("1"), s("10"), s("2")]);
    assert_eq!(vc.below(2), vec![s("1"), s("10"), s("2")]);
}

#[test]
fn numeric_actors_sort_numerically() {
    let vc: VectorClock<u32> = [(10, 1), (2, 1), (1, 1)].into_iter().collect();
    assert_eq!(vc.actors(), vec![1, 2, 10]);
}

#[test]
fn display_renders_json_mapping() {
    let mut vc = StringClock::new();
    vc.set(s("b"), 2);
    vc.set(s("a"), 1);
    assert_eq!(format!("{vc}"), r#"{"a":1,"b":2}"#);
}

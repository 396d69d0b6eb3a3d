#![no_main]

// Drive a pair of clocks through random operations and check the relation
// invariants after every step.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vclock::{NumericClock, PartialOrder};

#[derive(Arbitrary, Debug, Clone)]
enum Op {
    Tick { left: bool, actor: u8 },
    Set { left: bool, actor: u8, value: u64 },
    Merge { into_left: bool },
    Passive,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut a = NumericClock::new();
    let mut b = NumericClock::new();

    for op in ops {
        match op {
            Op::Tick { left, actor } => {
                let target = if left { &mut a } else { &mut b };
                target.tick(u64::from(actor));
            }
            Op::Set { left, actor, value } => {
                let target = if left { &mut a } else { &mut b };
                target.set(u64::from(actor), value);
            }
            Op::Merge { into_left } => {
                let (dst, src) = if into_left { (&mut a, &b) } else { (&mut b, &a) };
                dst.merge(src);
                assert!(matches!(src.compare(dst), PartialOrder::Before | PartialOrder::Equal));
            }
            Op::Passive => {
                let before = a.clone();
                let mut passive = NumericClock::new();
                passive.passive_increment(&before, &b);
                assert_eq!(passive.len(), b.len());
            }
        }

        assert_eq!(b.compare(&a), a.compare(&b).reverse());
        assert_eq!(a.compare(&a.clone()), PartialOrder::Equal);
        assert_eq!(NumericClock::from_bytes(&a.to_bytes()).as_ref(), Ok(&a));
    }
});

//! Structural equality, hashing and sharing across threads

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use ferrum_model::{values, Node, Primitive, Visitor};
use rust_decimal::Decimal;
use quickcheck::{QuickCheck, TestResult};

mod test_support;

use test_support::{allergy_for, reaction};

fn allergy(patient: &str, manifestations: &[String]) -> Node {
    manifestations
        .iter()
        .fold(allergy_for(patient), |b, m| b.add("reaction", reaction(m)))
        .build()
        .unwrap()
}

#[test]
fn independently_built_trees_are_equal() {
    let a = allergy("Patient/1", &["Hives".to_string()]);
    let b = allergy("Patient/1", &["Hives".to_string()]);

    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);
    assert_eq!(a.structural_hash(), b.structural_hash());

    let c = allergy("Patient/2", &["Hives".to_string()]);
    assert_ne!(a, c);
}

#[test]
fn to_builder_round_trip_is_equal() {
    let original = allergy("Patient/1", &["Hives".to_string(), "Nausea".to_string()]);
    let rebuilt = original.to_builder().build().unwrap();

    assert!(!original.ptr_eq(&rebuilt));
    assert_eq!(original, rebuilt);
    assert_eq!(original.structural_hash(), rebuilt.structural_hash());
}

#[derive(Default)]
struct Leaves(Vec<String>);

impl Visitor for Leaves {
    fn visit_primitive(&mut self, name: &str, _index: Option<usize>, value: &Primitive) {
        self.0.push(format!("{name}={value}"));
    }
}

fn leaves(node: &Node) -> Vec<String> {
    let mut leaves = Leaves::default();
    node.accept(&mut leaves);
    leaves.0
}

#[test]
fn equality_follows_the_exact_lexical_value() {
    let pairs = [
        (
            values::date_time("2020-01-01T10:00:00Z").unwrap(),
            values::date_time("2020-01-01T11:00:00+01:00").unwrap(),
        ),
        (
            values::date_time("2020-01-01T10:00:00Z").unwrap(),
            values::date_time("2020-01-01T10:00:00+00:00").unwrap(),
        ),
        (
            values::decimal(Decimal::new(10, 1)).unwrap(),
            values::decimal(Decimal::new(100, 2)).unwrap(),
        ),
    ];

    for (a, b) in &pairs {
        assert_ne!(a, b);
        assert_ne!(leaves(a), leaves(b));
    }

    let a = values::date_time("2020-01-01T10:00:00.1Z").unwrap();
    let b = values::date_time("2020-01-01T10:00:00.1Z").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.structural_hash(), b.structural_hash());
    assert_eq!(leaves(&a), ["value=2020-01-01T10:00:00.1Z"]);
    assert_eq!(leaves(&a), leaves(&b));
}

#[test]
fn equal_nodes_produce_identical_leaves() {
    // same digits at two scales: 1.5 vs 1.50 vs 1.500
    fn property(mantissa: i32, scale: u8, extra_zeros: u8) -> TestResult {
        let scale = u32::from(scale % 10);
        let extra = u32::from(extra_zeros % 3);
        let a = values::decimal(Decimal::new(i64::from(mantissa), scale)).unwrap();
        let b = values::decimal(Decimal::new(
            i64::from(mantissa) * 10_i64.pow(extra),
            scale + extra,
        ))
        .unwrap();
        TestResult::from_bool((a == b) == (leaves(&a) == leaves(&b)) && (a == b) == (extra == 0))
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(property as fn(i32, u8, u8) -> TestResult);
}

#[test]
fn clones_share_storage() {
    let a = allergy("Patient/1", &[]);
    let b = a.clone();
    assert!(a.ptr_eq(&b));
    assert_eq!(a, b);
}

#[test]
fn nodes_work_as_set_members() {
    let mut set = HashSet::new();
    set.insert(values::code("food").unwrap());
    set.insert(values::code("food").unwrap());
    set.insert(values::code("medication").unwrap());
    assert_eq!(set.len(), 2);

    // same value, different type
    set.insert(values::string("food").unwrap());
    assert_eq!(set.len(), 3);
}

#[test]
fn equal_trees_hash_equally() {
    fn property(manifestations: Vec<String>) -> TestResult {
        let usable: Vec<String> = manifestations
            .into_iter()
            .filter(|m| m.chars().any(|c| c.is_ascii_alphanumeric()))
            .map(|m| m.chars().filter(|c| c.is_ascii_alphanumeric()).collect())
            .take(5)
            .collect();

        let a = allergy("Patient/1", &usable);
        let b = allergy("Patient/1", &usable);
        TestResult::from_bool(a == b && a.structural_hash() == b.structural_hash())
    }

    QuickCheck::new()
        .tests(50)
        .quickcheck(property as fn(Vec<String>) -> TestResult);
}

#[test]
fn concurrent_readers_agree() {
    let shared = Arc::new(allergy(
        "Patient/1",
        &["Hives".to_string(), "Nausea".to_string()],
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let node = Arc::clone(&shared);
            thread::spawn(move || (node.structural_hash(), node.get_all("reaction").len()))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let expected = shared.structural_hash();
    assert!(results.iter().all(|(hash, reactions)| *hash == expected && *reactions == 2));
}

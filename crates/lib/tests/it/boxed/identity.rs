use std::{
    collections::{HashSet, hash_map::DefaultHasher},
    hash::{Hash, Hasher},
};

use propbox::{Property, PropertyBox, PropertySet};

use crate::helpers::Sample;

fn hash_of(record: &PropertyBox) -> u64 {
    let mut hasher = DefaultHasher::new();
    record.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_equal_identifiers_make_equal_boxes() {
    let sample = Sample::new();
    let a = sample.record(1, "first", 10);
    let b = sample.record(1, "second", 20);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_changing_identifier_breaks_equality() {
    let sample = Sample::new();
    let a = sample.record(1, "first", 10);
    let mut b = sample.record(1, "first", 10);
    b.set_value(&sample.id, 2).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_boxes_deduplicate_by_identifier() {
    let sample = Sample::new();
    let records = [
        sample.record(1, "a", 1),
        sample.record(2, "b", 2),
        sample.record(1, "c", 3),
    ];
    let unique: HashSet<&PropertyBox> = records.iter().collect();
    assert_eq!(unique.len(), 2);
}

#[test]
fn test_without_identifiers_boxes_are_only_equal_to_themselves() {
    let code = Property::<String>::builder("code").build();
    let set = PropertySet::of([code.erased()]);
    let a = PropertyBox::builder(set.clone())
        .set(&code, "x".to_string())
        .build()
        .unwrap();
    let b = PropertyBox::builder(set)
        .set(&code, "x".to_string())
        .build()
        .unwrap();
    let same = &a;
    assert_eq!(&a, same);
    assert_ne!(a, b);
    assert_ne!(a, a.duplicate());
}

#[test]
fn test_custom_handlers_replace_identifier_equality() {
    let sample = Sample::new();
    let name = sample.name.clone();
    let by_name = |id: i64, value: &str| {
        let name = name.clone();
        let hash_name = name.clone();
        PropertyBox::builder(sample.set())
            .set(&sample.id, id)
            .set(&sample.name, value.to_string())
            .equals_handler(move |a, b| {
                a.get_value(&name).ok().flatten() == b.get_value(&name).ok().flatten()
            })
            .hash_handler(move |pbox, mut state| {
                pbox.get_value(&hash_name).ok().flatten().hash(&mut state)
            })
            .build()
            .unwrap()
    };

    let a = by_name(1, "same");
    let b = by_name(2, "same");
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, by_name(1, "other"));
}

#[test]
fn test_box_equals_itself_when_identifier_read_fails() {
    let stranger = Property::<i64>::builder("stranger").build();
    let key = Property::<i64>::virtual_builder()
        .name("key")
        .provider(move |pbox| pbox.get_value(&stranger))
        .build();
    let set = PropertySet::builder()
        .add(&key)
        .identifier(&key)
        .unwrap()
        .build();
    let a = PropertyBox::create(set.clone());
    let b = PropertyBox::create(set);

    let same = &a;
    assert_eq!(&a, same);
    assert_ne!(a, b);
}

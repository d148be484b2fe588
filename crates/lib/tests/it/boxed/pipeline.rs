use propbox::{
    Property, PropertyBox, PropertySet,
    convert::NumericBooleanConverter,
    property::PropertyError,
    validation::ValidationError,
    value::erase,
};

use crate::helpers::Sample;

#[test]
fn test_rejected_write_keeps_previous_value() {
    let sample = Sample::new();
    let mut record = sample.record(1, "test", 1);
    assert_eq!(record.get_value(&sample.name).unwrap(), Some("test".to_string()));

    let err = record.set_value(&sample.seq, -1).unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(
        err.validation_error().and_then(ValidationError::message_code),
        Some("validation.not_negative")
    );
    assert_eq!(record.get_value(&sample.seq).unwrap(), Some(1));
}

#[test]
fn test_written_values_read_back() {
    let sample = Sample::new();
    let mut record = PropertyBox::create(sample.set());
    record.set_value(&sample.id, 7).unwrap();
    record.set_value(&sample.name, "seven".to_string()).unwrap();
    assert_eq!(record.get_value(&sample.id).unwrap(), Some(7));
    assert_eq!(record.get_value(&sample.name).unwrap(), Some("seven".to_string()));
    assert_eq!(record.get_value(&sample.seq).unwrap(), None);
    assert_eq!(record.len(), 3);
}

#[test]
fn test_read_only_property_rejects_plain_writes() {
    let created = Property::<i64>::builder("created").read_only(true).build();
    let mut record = PropertyBox::create(PropertySet::of([created.erased()]));

    let err = record.set_value(&created, 1).unwrap_err();
    assert!(err.is_read_only());

    record.set_value_ignore_read_only(&created, 1).unwrap();
    assert_eq!(record.get_value(&created).unwrap(), Some(1));
}

#[test]
fn test_wrong_runtime_type_is_rejected() {
    let sample = Sample::new();
    let mut record = PropertyBox::create(sample.set());
    let err = record
        .set_value_dyn(&sample.seq, Some(erase("one".to_string())), false)
        .unwrap_err();
    match err {
        propbox::Error::Property(PropertyError::TypeMismatch { property, .. }) => {
            assert_eq!(property, "seq")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!record.contains_value(&sample.seq));
}

#[test]
fn test_validate_reports_every_invalid_property() {
    let sample = Sample::new();
    let mut record = PropertyBox::builder(sample.set())
        .invalid_allowed(true)
        .set(&sample.seq, -3)
        .build()
        .unwrap();
    assert!(record.is_invalid_allowed());

    // name is blank (absent) and seq is negative
    let err = record.validate().unwrap_err();
    let failures = err.validation_error().unwrap().failures();
    assert_eq!(failures.len(), 2);

    record.set_value(&sample.name, "fixed".to_string()).unwrap();
    record.set_value(&sample.seq, 0).unwrap();
    assert!(record.is_valid());
}

#[test]
fn test_property_values_follow_set_order() {
    let sample = Sample::new();
    let record = sample.record(3, "abc", 9);
    let names: Vec<String> = record
        .property_values()
        .map(|(p, _)| p.relative_name())
        .collect();
    assert_eq!(names, ["id", "name", "seq"]);
}

#[test]
fn test_duplicate_into_smaller_set() {
    let sample = Sample::new();
    let record = sample.record(3, "abc", 9);
    let narrow = PropertySet::of([sample.id.erased(), sample.seq.erased()]);

    let copy = record.duplicate_into(narrow).unwrap();
    assert_eq!(copy.get_value(&sample.seq).unwrap(), Some(9));
    assert!(copy.get_value(&sample.name).unwrap_err().is_not_found());
}

#[test]
fn test_absent_model_value_clears_without_conversion() {
    let active = Property::<bool>::builder("active")
        .converter(NumericBooleanConverter::<i64>::new())
        .build();
    let mut record = PropertyBox::create(PropertySet::of([active.erased()]));

    record.set_model_value(&active, 1i64).unwrap();
    assert_eq!(record.get_value(&active).unwrap(), Some(true));

    record.set_model_value::<i64>(&active, None).unwrap();
    assert!(!record.contains_value(&active));
    assert_eq!(record.get_value(&active).unwrap(), None);

    record.set_value(&active, false).unwrap();
    record.clear_value(&active).unwrap();
    assert!(!record.contains_value(&active));
}

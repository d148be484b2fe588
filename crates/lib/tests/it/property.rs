//! Property builder, identity and duplication tests

use std::{collections::HashSet, hash::Hash};

use propbox::{
    Path, Property, PropertyBox, PropertyRef, PropertySet,
    config::{ConfigParam, TEMPORAL_TYPE, TemporalType},
    convert::{LocalDateTimeConverter, NumericBooleanConverter},
    property::{PropertyBuilder, PropertyError, PropertyIdentity, VirtualPropertyBuilder},
    validation::{max_length, not_blank, not_null},
};

const LABEL_WIDTH: ConfigParam<u32> = ConfigParam::new("test.label-width");

#[test]
fn test_declared_type_and_read_only() {
    let name = Property::<String>::builder("name").build();
    let code = Property::<String>::builder("code").read_only(true).build();
    assert!(name.value_type().is::<String>());
    assert!(!name.is_read_only());
    assert!(code.is_read_only());
    assert!(name.converter().is_none());
}

#[test]
fn test_parent_chain_names() {
    let street = Property::<String>::builder("street")
        .parent(Path::parse("customer.address").unwrap())
        .unwrap()
        .build();
    assert_eq!(street.relative_name(), "customer.address.street");
    assert_eq!(street.parent().map(Path::name), Some("address"));
    assert_eq!(street.to_string(), "customer.address.street");
}

#[test]
fn test_final_path_cannot_get_parent() {
    let err = Property::<i64>::builder("id")
        .final_path()
        .unwrap()
        .parent(Path::new("record"))
        .err()
        .expect("parent on final path must fail");
    assert!(matches!(err, PropertyError::InvalidParent { .. }));
    assert_eq!(err.property(), "id");
}

#[test]
fn test_validation_aggregates_multiple_failures() {
    let title = Property::<String>::builder("title")
        .validator(not_blank())
        .validator(max_length::<String>(3))
        .build();

    let single = title.validate(Some(&"abcd".to_string())).unwrap_err();
    assert!(!single.is_aggregate());
    assert_eq!(single.message_code(), Some("validation.max_length"));

    let both = title.validate(Some(&"     ".to_string())).unwrap_err();
    assert!(both.is_aggregate());
    assert_eq!(both.failures().len(), 2);
}

#[test]
fn test_validation_of_absent_value_reports_single_failure() {
    let code = Property::<String>::builder("code")
        .validator(not_null())
        .validator(max_length::<String>(3))
        .build();

    let err = code.validate(None).unwrap_err();
    assert!(!err.is_aggregate());
    assert_eq!(err.message_code(), Some("validation.not_null"));

    let err = code.validate(Some(&"abcd".to_string())).unwrap_err();
    assert!(!err.is_aggregate());
    assert_eq!(err.message_code(), Some("validation.max_length"));
    assert!(code.validate(Some(&"abc".to_string())).is_ok());
}

#[test]
fn test_validation_uses_model_value_for_model_validators() {
    let enabled = Property::<bool>::builder("enabled")
        .converter(NumericBooleanConverter::<i32>::new())
        .model_validator::<i32, _>(|v: Option<&i32>| match v {
            Some(1) => Ok(()),
            _ => Err(propbox::validation::ValidationError::new("must be enabled")),
        })
        .build();
    assert!(enabled.validate(Some(&true)).is_ok());
    assert!(enabled.validate(Some(&false)).is_err());
}

#[test]
fn test_duplicate_copies_attributes_without_sharing() {
    let name = Property::<String>::builder("name")
        .parent(Path::new("person"))
        .unwrap()
        .validator(not_null())
        .message("Name")
        .message_code("person.name")
        .configuration(&LABEL_WIDTH, 20)
        .build();

    let copy = name
        .duplicate_with(|b: PropertyBuilder<String>| Ok(b.validator(not_blank())))
        .unwrap();

    assert_ne!(copy, name);
    assert_eq!(copy.relative_name(), "person.name");
    assert_eq!(copy.message().message_code(), Some("person.name"));
    assert_eq!(copy.configuration().parameter(&LABEL_WIDTH).unwrap(), Some(20));
    assert_eq!(copy.validator_count(), 2);
    assert_eq!(name.validator_count(), 1);

    let plain = name.duplicate();
    assert_eq!(plain.validator_count(), 1);
    assert_ne!(plain.id(), name.id());
}

#[test]
fn test_duplicate_virtual_keeps_provider() {
    let answer = Property::<i64>::virtual_builder()
        .name("answer")
        .provider(|_| Ok(Some(42)))
        .build();
    let copy = answer
        .duplicate_with(|b: VirtualPropertyBuilder<i64>| Ok(b.message("The answer")))
        .unwrap();
    assert_eq!(copy.name(), "answer");

    let pbox = PropertyBox::create(PropertySet::of([copy.erased()]));
    assert_eq!(pbox.get_value(&copy).unwrap(), Some(42));
}

#[test]
fn test_by_name_identity_in_hash_set() {
    let make = || {
        Property::<String>::builder("code")
            .identity(PropertyIdentity::by_name())
            .build()
            .into_erased()
    };
    let mut seen: HashSet<PropertyRef> = HashSet::new();
    assert!(seen.insert(make()));
    assert!(!seen.insert(make()));

    // Reference identity: equal names are still distinct properties.
    let mut distinct: HashSet<PropertyRef> = HashSet::new();
    let a = Property::<String>::builder("code").build().into_erased();
    let b = Property::<String>::builder("code").build().into_erased();
    assert!(distinct.insert(a.clone()));
    assert!(distinct.insert(b));
    assert!(!distinct.insert(a));
}

#[test]
fn test_identity_strategy_needs_both_sides() {
    let code = Property::<String>::builder("code").build();
    let alias = Property::<String>::builder("code")
        .identity(PropertyIdentity::by_name())
        .build();
    assert_ne!(code.erased(), alias.erased());
    assert_ne!(alias.erased(), code.erased());

    // Writes through the alias must not land beside the real member.
    let mut record = PropertyBox::create(PropertySet::of([code.erased()]));
    assert!(record.set_value(&alias, "x".to_string()).unwrap_err().is_not_found());
    record.set_value(&code, "y".to_string()).unwrap();
    assert_eq!(record.get_value(&code).unwrap(), Some("y".to_string()));
    assert_eq!(record.property_values().count(), 1);
}

#[test]
fn test_separately_built_strategies_do_not_mix() {
    let by_code = PropertyIdentity::new(
        |a: &PropertyRef, b: &PropertyRef| a.name() == b.name(),
        |p: &PropertyRef, mut state| p.name().hash(&mut state),
    );
    let a = Property::<String>::builder("code").identity(by_code.clone()).build();
    let b = Property::<String>::builder("code").identity(by_code).build();
    let c = Property::<String>::builder("code")
        .identity(PropertyIdentity::by_name())
        .build();
    assert_eq!(a.erased(), b.erased());
    assert_ne!(a.erased(), c.erased());
}

#[test]
fn test_temporal_converter_records_temporal_type() {
    let at = Property::<chrono::NaiveDateTime>::builder("at")
        .converter(LocalDateTimeConverter)
        .build();
    assert_eq!(
        at.configuration().parameter(&TEMPORAL_TYPE).unwrap(),
        Some(TemporalType::DateTime)
    );
}

//! Typed configuration parameter tests

use propbox::{
    Property, PropertySet,
    config::{ConfigParam, Configuration, TEMPORAL_TYPE, TemporalType},
};

const RETRIES: ConfigParam<u32> = ConfigParam::new("test.retries");
const RETRIES_AS_TEXT: ConfigParam<String> = ConfigParam::new("test.retries");
const LABEL: ConfigParam<String> = ConfigParam::new("test.label");

#[test]
fn test_parameters_are_typed() {
    let config = Configuration::builder().with(&RETRIES, 3).build();
    assert_eq!(config.parameter(&RETRIES).unwrap(), Some(3));
    assert!(config.has_parameter("test.retries"));
    assert!(config.has_parameter_value(&RETRIES, &3));

    let err = config.parameter(&RETRIES_AS_TEXT).unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(err.key(), "test.retries");
}

#[test]
fn test_absent_parameter_falls_back() {
    let config = Configuration::new();
    assert_eq!(config.parameter(&LABEL).unwrap(), None);
    assert_eq!(
        config.parameter_or(&LABEL, "default".to_string()).unwrap(),
        "default"
    );
}

#[test]
fn test_property_and_set_configuration() {
    let at = Property::<String>::builder("at")
        .configuration(&TEMPORAL_TYPE, TemporalType::Time)
        .configuration(&LABEL, "When".to_string())
        .build();
    assert_eq!(
        at.configuration().parameter(&TEMPORAL_TYPE).unwrap(),
        Some(TemporalType::Time)
    );

    let set = PropertySet::builder()
        .add(&at)
        .configuration(&RETRIES, 5)
        .build();
    let merged = set.join(
        &PropertySet::builder()
            .configuration(&RETRIES, 9)
            .configuration(&LABEL, "Other".to_string())
            .build(),
    );
    assert_eq!(merged.configuration().parameter(&RETRIES).unwrap(), Some(9));
    assert_eq!(set.configuration().parameter(&RETRIES).unwrap(), Some(5));
    assert_eq!(merged.configuration().len(), 2);
}

//! Converter tests, exercised through property boxes

use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Timelike};
use propbox::{
    Property, PropertyBox, PropertySet,
    convert::{
        CallbackConverter, CollectionConverter, ConversionError, EnumByName, EnumByOrdinal,
        JsonConverter, LocalDateConverter, LocalTimeConverter, NumericBooleanConverter,
        PropertyValueConverter,
    },
    value::erase,
};
use serde::{Deserialize, Serialize};

use crate::helpers::Status;

fn single(property: &propbox::PropertyRef) -> PropertyBox {
    PropertyBox::create(PropertySet::of([property]))
}

#[test]
fn test_enum_by_name_through_box() {
    let status = Property::<Status>::builder("status")
        .converter(EnumByName::new())
        .build();
    let mut record = single(&status);

    record
        .set_model_value(&status, "SUSPENDED".to_string())
        .unwrap();
    assert_eq!(record.get_value(&status).unwrap(), Some(Status::Suspended));
    assert_eq!(
        record.get_model_value::<String>(&status).unwrap(),
        Some("SUSPENDED".to_string())
    );

    let err = record
        .set_model_value(&status, "DELETED".to_string())
        .unwrap_err();
    match err {
        propbox::Error::Conversion(ConversionError::UnknownEnumName { value, .. }) => {
            assert_eq!(value, "DELETED")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(record.get_value(&status).unwrap(), Some(Status::Suspended));
}

#[test]
fn test_enum_by_ordinal_range() {
    let converter = EnumByOrdinal::<Status>::new();
    assert_eq!(converter.from_model(Some(&2)).unwrap(), Some(Status::Closed));
    assert_eq!(converter.to_model(Some(&Status::Active)).unwrap(), Some(0));
    assert!(converter.from_model(Some(&3)).unwrap_err().is_enum_error());
    assert!(converter.from_model(Some(&-1)).unwrap_err().is_enum_error());
}

#[test]
fn test_numeric_boolean_rules() {
    let converter = NumericBooleanConverter::<i64>::new();
    assert_eq!(converter.from_model(None).unwrap(), Some(false));
    assert_eq!(converter.from_model(Some(&0)).unwrap(), Some(false));
    assert_eq!(converter.from_model(Some(&-7)).unwrap(), Some(true));
    assert_eq!(converter.to_model(Some(&true)).unwrap(), Some(1));
    assert_eq!(converter.to_model(Some(&false)).unwrap(), Some(0));
}

#[test]
fn test_model_typed_write_is_converted() {
    let active = Property::<bool>::builder("active")
        .converter(NumericBooleanConverter::<u8>::new())
        .build();
    let mut record = single(&active);

    record.set_value_dyn(&active, Some(erase(0u8)), false).unwrap();
    assert_eq!(record.get_value(&active).unwrap(), Some(false));

    record.set_value(&active, true).unwrap();
    assert_eq!(record.get_model_value::<u8>(&active).unwrap(), Some(1));
}

#[test]
fn test_local_date_round_trip_through_box() {
    let day = Property::<NaiveDate>::builder("day")
        .converter(LocalDateConverter)
        .build();
    let mut record = single(&day);
    let date = NaiveDate::from_ymd_opt(2022, 2, 28).unwrap();

    record.set_value(&day, date).unwrap();
    let model = record
        .get_model_value::<DateTime<Local>>(&day)
        .unwrap()
        .unwrap();
    assert_eq!(model.date_naive(), date);

    record.set_model_value(&day, model).unwrap();
    assert_eq!(record.get_value(&day).unwrap(), Some(date));
}

#[test]
fn test_local_time_round_trip_through_box() {
    let opens = Property::<NaiveTime>::builder("opens")
        .converter(LocalTimeConverter)
        .build();
    assert_eq!(
        opens.configuration().parameter(&propbox::config::TEMPORAL_TYPE).unwrap(),
        Some(propbox::config::TemporalType::Time)
    );
    let mut record = single(&opens);
    let time = NaiveTime::from_hms_opt(9, 15, 30).unwrap();

    record.set_value(&opens, time).unwrap();
    let model = record
        .get_model_value::<DateTime<Local>>(&opens)
        .unwrap()
        .unwrap();
    assert_eq!(model.date_naive(), NaiveDate::default());
    assert_eq!((model.hour(), model.minute(), model.second()), (9, 15, 30));

    record.set_value(&opens, None).unwrap();
    record.set_model_value(&opens, model).unwrap();
    assert_eq!(record.get_value(&opens).unwrap(), Some(time));
}

#[test]
fn test_collection_converter_targets_set() {
    let converter: CollectionConverter<BTreeSet<Status>, Vec<String>, _, _, _> =
        CollectionConverter::new(EnumByName::<Status>::new(), BTreeSet::new, Vec::new);
    let statuses = converter
        .from_model(Some(&vec!["ACTIVE".to_string(), "ACTIVE".to_string(), "CLOSED".to_string()]))
        .unwrap()
        .unwrap();
    assert_eq!(statuses.len(), 2);
    let names = converter.to_model(Some(&statuses)).unwrap().unwrap();
    assert_eq!(names, ["ACTIVE", "CLOSED"]);
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
struct Dimensions {
    width: u32,
    height: u32,
}

#[test]
fn test_json_converter_through_box() {
    let size = Property::<Dimensions>::builder("size")
        .converter(JsonConverter::new())
        .build();
    let mut record = single(&size);
    record
        .set_model_value(&size, r#"{"width":3,"height":4}"#.to_string())
        .unwrap();
    assert_eq!(
        record.get_value(&size).unwrap(),
        Some(Dimensions { width: 3, height: 4 })
    );
    assert!(
        record
            .set_model_value(&size, "not json".to_string())
            .unwrap_err()
            .is_conversion_error()
    );
}

#[test]
fn test_callback_converter_through_box() {
    let cents = Property::<i64>::builder("cents")
        .converter(CallbackConverter::new(
            |m: &String| {
                m.parse::<i64>()
                    .map_err(|e| ConversionError::failed(e.to_string()))
            },
            |v: &i64| Ok(v.to_string()),
        ))
        .build();
    let mut record = single(&cents);
    record.set_value_dyn(&cents, Some(erase("250".to_string())), false).unwrap();
    assert_eq!(record.get_value(&cents).unwrap(), Some(250));
}

//! Built-in validator tests

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use propbox::validation::{
    Validator, all_of, email, future, is_in, max, min, min_length, not_empty, not_in, not_null,
    past, pattern, positive, predicate,
};
use regex::Regex;

#[test]
fn test_absence_checks() {
    assert!(not_null::<String>().validate(None).is_err());
    assert!(not_null::<String>().validate(Some(&String::new())).is_ok());
    assert!(not_empty::<Vec<i32>>().validate(Some(&Vec::new())).is_err());
    assert!(not_empty::<Vec<i32>>().validate(Some(&vec![1])).is_ok());
}

#[test]
fn test_range_validators_accept_absence() {
    assert!(min(5i64).validate(None).is_ok());
    assert!(min(5i64).validate(Some(&4)).is_err());
    assert!(max(5i64).validate(Some(&5)).is_ok());
    assert!(positive::<i32>().validate(Some(&0)).is_err());

    let err = min(5i64).validate(Some(&1)).unwrap_err();
    assert_eq!(err.message_code(), Some("validation.min"));
    assert_eq!(err.arguments(), ["5".to_string()]);
}

#[test]
fn test_text_validators() {
    let code = pattern(Regex::new(r"^[A-Z]{3}$").unwrap());
    assert!(code.validate(Some(&"ABC".to_string())).is_ok());
    assert!(code.validate(Some(&"abc".to_string())).is_err());
    assert!(email().validate(Some(&"someone@example.org".to_string())).is_ok());
    assert!(email().validate(Some(&"someone@".to_string())).is_err());
    assert!(min_length::<String>(2).validate(Some(&"a".to_string())).is_err());
}

#[test]
fn test_membership_validators() {
    assert!(is_in(vec![1, 2, 3]).validate(Some(&2)).is_ok());
    assert!(is_in(vec![1, 2, 3]).validate(Some(&4)).is_err());
    assert!(not_in(vec!["root"]).validate(Some(&"root")).is_err());
}

#[test]
fn test_temporal_validators() {
    let yesterday = Local::now().naive_local() - Duration::days(1);
    let tomorrow = Local::now().naive_local() + Duration::days(1);
    assert!(past::<NaiveDateTime>().validate(Some(&yesterday)).is_ok());
    assert!(past::<NaiveDateTime>().validate(Some(&tomorrow)).is_err());
    assert!(future::<NaiveDateTime>().validate(Some(&tomorrow)).is_ok());
    assert!(past::<NaiveDate>().validate(Some(&NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())).is_ok());
}

#[test]
fn test_all_of_reports_every_failure() {
    let rule = all_of::<i64>(vec![
        Box::new(positive::<i64>()),
        Box::new(predicate(|v: &i64| v % 2 == 0, "must be even").with_code("even")),
    ]);
    let err = rule.validate(Some(&-3)).unwrap_err();
    assert!(err.is_aggregate());
    let codes: Vec<_> = err.failures().iter().filter_map(|f| f.message_code()).collect();
    assert_eq!(codes, ["validation.positive", "even"]);
}

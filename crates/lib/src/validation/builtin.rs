//! Built-in validators.
//!
//! Every validator reports a default English message together with a stable
//! `validation.*` message code and its arguments, so presentation layers can
//! localize failures.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    fmt::Display,
    sync::LazyLock,
};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

use super::{Validator, ValidationError, predicate};

/// Values with a measurable length.
pub trait HasLength {
    /// Length in elements (characters for strings).
    fn length(&self) -> usize;
}

impl HasLength for String {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl HasLength for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl<T> HasLength for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, S> HasLength for HashSet<T, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLength for BTreeSet<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> HasLength for HashMap<K, V, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> HasLength for BTreeMap<K, V> {
    fn length(&self) -> usize {
        self.len()
    }
}

/// Temporal values that can be compared with the current instant.
pub trait Temporal {
    /// `true` if the value lies strictly before now.
    fn is_past(&self) -> bool;
    /// `true` if the value lies strictly after now.
    fn is_future(&self) -> bool;
}

impl Temporal for NaiveDate {
    fn is_past(&self) -> bool {
        *self < Local::now().date_naive()
    }

    fn is_future(&self) -> bool {
        *self > Local::now().date_naive()
    }
}

impl Temporal for NaiveDateTime {
    fn is_past(&self) -> bool {
        *self < Local::now().naive_local()
    }

    fn is_future(&self) -> bool {
        *self > Local::now().naive_local()
    }
}

impl<Tz: TimeZone> Temporal for DateTime<Tz> {
    fn is_past(&self) -> bool {
        self.with_timezone(&Utc) < Utc::now()
    }

    fn is_future(&self) -> bool {
        self.with_timezone(&Utc) > Utc::now()
    }
}

/// Rejects absent values.
pub fn not_null<T: ?Sized>() -> impl Validator<T> {
    |value: Option<&T>| match value {
        Some(_) => Ok(()),
        None => Err(ValidationError::localized(
            "Value is required",
            "validation.not_null",
            Vec::new(),
        )),
    }
}

/// Rejects absent and zero-length values.
pub fn not_empty<T: HasLength + ?Sized>() -> impl Validator<T> {
    |value: Option<&T>| match value {
        Some(v) if v.length() > 0 => Ok(()),
        _ => Err(ValidationError::localized(
            "Value must not be empty",
            "validation.not_empty",
            Vec::new(),
        )),
    }
}

/// Rejects absent strings and strings made only of whitespace.
pub fn not_blank() -> impl Validator<String> {
    |value: Option<&String>| match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::localized(
            "Value must not be blank",
            "validation.not_blank",
            Vec::new(),
        )),
    }
}

/// Rejects values below zero, where zero is `T::default()`.
pub fn not_negative<T>() -> impl Validator<T>
where
    T: PartialOrd + Default + Send + Sync,
{
    predicate(|v: &T| *v >= T::default(), "Value must not be negative")
        .with_code("validation.not_negative")
}

/// Rejects values less than or equal to zero, where zero is `T::default()`.
pub fn positive<T>() -> impl Validator<T>
where
    T: PartialOrd + Default + Send + Sync,
{
    predicate(|v: &T| *v > T::default(), "Value must be positive").with_code("validation.positive")
}

/// Rejects values below `minimum`.
pub fn min<T>(minimum: T) -> impl Validator<T>
where
    T: PartialOrd + Display + Send + Sync,
{
    let arguments = vec![minimum.to_string()];
    predicate(
        move |v: &T| *v >= minimum,
        format!("Value must be at least {}", arguments[0]),
    )
    .with_code("validation.min")
    .with_arguments(arguments)
}

/// Rejects values above `maximum`.
pub fn max<T>(maximum: T) -> impl Validator<T>
where
    T: PartialOrd + Display + Send + Sync,
{
    let arguments = vec![maximum.to_string()];
    predicate(
        move |v: &T| *v <= maximum,
        format!("Value must be at most {}", arguments[0]),
    )
    .with_code("validation.max")
    .with_arguments(arguments)
}

/// Rejects values shorter than `minimum`.
pub fn min_length<T: HasLength + ?Sized>(minimum: usize) -> impl Validator<T> {
    predicate(
        move |v: &T| v.length() >= minimum,
        format!("Length must be at least {minimum}"),
    )
    .with_code("validation.min_length")
    .with_arguments(vec![minimum.to_string()])
}

/// Rejects values longer than `maximum`.
pub fn max_length<T: HasLength + ?Sized>(maximum: usize) -> impl Validator<T> {
    predicate(
        move |v: &T| v.length() <= maximum,
        format!("Length must be at most {maximum}"),
    )
    .with_code("validation.max_length")
    .with_arguments(vec![maximum.to_string()])
}

/// Rejects strings that do not match `regex`.
pub fn pattern(regex: Regex) -> impl Validator<String> {
    let source = regex.as_str().to_string();
    predicate(
        move |v: &String| regex.is_match(v),
        format!("Value must match {source}"),
    )
    .with_code("validation.pattern")
    .with_arguments(vec![source])
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// Rejects strings that are not e-mail addresses.
pub fn email() -> impl Validator<String> {
    predicate(
        |v: &String| EMAIL.is_match(v),
        "Value must be a valid e-mail address",
    )
    .with_code("validation.email")
}

/// Rejects values not contained in `allowed`.
pub fn is_in<T>(allowed: Vec<T>) -> impl Validator<T>
where
    T: PartialEq + std::fmt::Debug + Send + Sync,
{
    let arguments = vec![format!("{allowed:?}")];
    predicate(
        move |v: &T| allowed.contains(v),
        format!("Value must be one of {}", arguments[0]),
    )
    .with_code("validation.in")
    .with_arguments(arguments)
}

/// Rejects values contained in `forbidden`.
pub fn not_in<T>(forbidden: Vec<T>) -> impl Validator<T>
where
    T: PartialEq + std::fmt::Debug + Send + Sync,
{
    let arguments = vec![format!("{forbidden:?}")];
    predicate(
        move |v: &T| !forbidden.contains(v),
        format!("Value must not be one of {}", arguments[0]),
    )
    .with_code("validation.not_in")
    .with_arguments(arguments)
}

/// Rejects temporal values that are not in the past.
pub fn past<T: Temporal + Send + Sync>() -> impl Validator<T> {
    predicate(|v: &T| v.is_past(), "Value must be in the past").with_code("validation.past")
}

/// Rejects temporal values that are not in the future.
pub fn future<T: Temporal + Send + Sync>() -> impl Validator<T> {
    predicate(|v: &T| v.is_future(), "Value must be in the future").with_code("validation.future")
}

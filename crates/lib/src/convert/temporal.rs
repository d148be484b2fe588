//! Date and time converters.
//!
//! Model values are `DateTime<Local>` timestamps; property values are the naive
//! calendar types. The mapping goes field by field through the local calendar,
//! so no timezone other than the platform's local one is involved.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use super::{ConversionError, PropertyValueConverter};
use crate::config::TemporalType;

fn local_timestamp(naive: &NaiveDateTime) -> Result<DateTime<Local>, ConversionError> {
    match Local.from_local_datetime(naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(ConversionError::Temporal {
            reason: format!("{naive} does not exist in the local timezone"),
        }),
    }
}

/// `NaiveDate` property values stored as local midnight timestamps.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalDateConverter;

impl PropertyValueConverter<NaiveDate, DateTime<Local>> for LocalDateConverter {
    fn from_model(&self, value: Option<&DateTime<Local>>) -> Result<Option<NaiveDate>, ConversionError> {
        Ok(value.map(|dt| dt.date_naive()))
    }

    fn to_model(&self, value: Option<&NaiveDate>) -> Result<Option<DateTime<Local>>, ConversionError> {
        value
            .map(|date| local_timestamp(&date.and_time(NaiveTime::MIN)))
            .transpose()
    }

    fn temporal_type(&self) -> Option<TemporalType> {
        Some(TemporalType::Date)
    }
}

/// `NaiveDateTime` property values stored as local timestamps.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalDateTimeConverter;

impl PropertyValueConverter<NaiveDateTime, DateTime<Local>> for LocalDateTimeConverter {
    fn from_model(
        &self,
        value: Option<&DateTime<Local>>,
    ) -> Result<Option<NaiveDateTime>, ConversionError> {
        Ok(value.map(DateTime::naive_local))
    }

    fn to_model(
        &self,
        value: Option<&NaiveDateTime>,
    ) -> Result<Option<DateTime<Local>>, ConversionError> {
        value.map(local_timestamp).transpose()
    }

    fn temporal_type(&self) -> Option<TemporalType> {
        Some(TemporalType::DateTime)
    }
}

/// `NaiveTime` property values stored as local timestamps on 1970-01-01.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTimeConverter;

impl PropertyValueConverter<NaiveTime, DateTime<Local>> for LocalTimeConverter {
    fn from_model(&self, value: Option<&DateTime<Local>>) -> Result<Option<NaiveTime>, ConversionError> {
        Ok(value.map(DateTime::time))
    }

    fn to_model(&self, value: Option<&NaiveTime>) -> Result<Option<DateTime<Local>>, ConversionError> {
        value
            .map(|time| local_timestamp(&NaiveDate::default().and_time(*time)))
            .transpose()
    }

    fn temporal_type(&self) -> Option<TemporalType> {
        Some(TemporalType::Time)
    }
}

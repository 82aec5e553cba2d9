use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use super::{
    Temperature,
    hourly::{FieldAliases, HourRecord},
    parse_date,
    raw::{RawHourlyBlock, value_at},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("hourly block has {entries} time entries but no `{series}` series")]
    MissingSeries {
        series: &'static str,
        entries: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnparseableDate,
}

/// What happened to each hourly entry during grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Accepted(NaiveDate),
    Skipped {
        index: usize,
        time: String,
        reason: SkipReason,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub hours: Vec<HourRecord>,
}

impl DayBucket {
    /// Highest and lowest hourly temperature of the day. Hours without a
    /// temperature are ignored; `None` when no hour has one.
    #[must_use]
    pub fn temperature_range(&self) -> Option<(Temperature, Temperature)> {
        let mut temps = self.hours.iter().filter_map(|hour| hour.temperature_c);
        let first = temps.next()?;
        let (high, low) = temps.fold((first, first), |(high, low), temp| {
            (high.max(temp), low.min(temp))
        });
        Some((Temperature::from_celsius(high), Temperature::from_celsius(low)))
    }
}

/// Day buckets in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBuckets {
    days: Vec<DayBucket>,
    index: HashMap<NaiveDate, usize>,
}

impl DayBuckets {
    fn push(&mut self, date: NaiveDate, record: HourRecord) {
        let slot = *self.index.entry(date).or_insert_with(|| {
            self.days.push(DayBucket {
                date,
                hours: Vec::new(),
            });
            self.days.len() - 1
        });
        self.days[slot].hours.push(record);
    }

    #[must_use]
    pub fn bucket(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.index.get(&date).map(|&slot| &self.days[slot])
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&[HourRecord]> {
        self.bucket(date).map(|day| day.hours.as_slice())
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().map(|day| day.date)
    }

    #[must_use]
    pub fn first(&self) -> Option<&DayBucket> {
        self.days.first()
    }

    #[must_use]
    pub fn nth(&self, idx: usize) -> Option<&DayBucket> {
        self.days.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayBucket> {
        self.days.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.days.iter().map(|day| day.hours.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping {
    pub buckets: DayBuckets,
    pub outcomes: Vec<RecordOutcome>,
}

impl Grouping {
    pub fn skipped(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RecordOutcome::Skipped { .. }))
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }
}

/// Date portion of an ISO timestamp, if the first ten characters form one.
#[must_use]
pub fn date_key(time: &str) -> Option<NaiveDate> {
    parse_date(time.get(..10)?)
}

/// Partitions hourly entries into calendar-day buckets.
///
/// Entries whose timestamp does not start with a valid `YYYY-MM-DD` are left
/// out of every bucket and reported as [`RecordOutcome::Skipped`]. The
/// `weather_code` column is required whenever there is anything to group.
pub fn group_by_day(block: Option<&RawHourlyBlock>) -> Result<Grouping, GroupError> {
    let Some(block) = block else {
        return Ok(Grouping::default());
    };
    let Some(times) = block.time.as_deref().filter(|times| !times.is_empty()) else {
        return Ok(Grouping::default());
    };
    if block.weather_code.is_none() {
        return Err(GroupError::MissingSeries {
            series: "weather_code",
            entries: times.len(),
        });
    }

    let temperature = FieldAliases::temperature(block);
    let mut grouping = Grouping {
        buckets: DayBuckets::default(),
        outcomes: Vec::with_capacity(times.len()),
    };

    for (idx, time) in times.iter().enumerate() {
        let Some(date) = date_key(time) else {
            tracing::warn!(
                index = idx,
                time = %time,
                "skipping hourly entry with unparseable date"
            );
            grouping.outcomes.push(RecordOutcome::Skipped {
                index: idx,
                time: time.clone(),
                reason: SkipReason::UnparseableDate,
            });
            continue;
        };

        grouping.buckets.push(
            date,
            HourRecord {
                time: time.clone(),
                temperature_c: temperature.value_at(idx),
                weather_code: value_at(&block.weather_code, idx),
            },
        );
        grouping.outcomes.push(RecordOutcome::Accepted(date));
    }

    Ok(grouping)
}

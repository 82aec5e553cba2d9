use chrono::NaiveDate;

use crate::{
    app::state::{ErrorContext, RequestId},
    domain::weather::{DisplayUnits, ForecastBundle},
};

#[derive(Debug)]
pub enum AppEvent {
    FetchSucceeded {
        request: RequestId,
        bundle: Box<ForecastBundle>,
    },
    FetchFailed {
        request: RequestId,
        message: String,
        context: ErrorContext,
    },
    UnitsChanged(DisplayUnits),
    DaySelected(DaySelector),
}

/// How the user picked a day: by calendar date or by position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySelector {
    Date(NaiveDate),
    Offset(usize),
}

impl std::str::FromStr for DaySelector {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Ok(offset) = value.parse::<usize>() {
            return Ok(Self::Offset(offset));
        }
        crate::domain::weather::parse_date(value)
            .map(Self::Date)
            .ok_or_else(|| {
                anyhow::anyhow!("`{value}` is neither a YYYY-MM-DD date nor a day offset")
            })
    }
}

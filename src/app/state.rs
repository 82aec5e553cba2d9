use std::time::Duration;

use chrono::NaiveDate;

use crate::{
    app::{
        events::{AppEvent, DaySelector},
        settings::{RuntimeSettings, fallback_location},
    },
    domain::weather::{DisplayUnits, ForecastBundle, HourRecord, Location},
    resilience::backoff::Backoff,
};

/// Monotonic id handed out per fetch. Only the newest id may update state.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
}

/// What a failed request was trying to load, so a retry can repeat it.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorContext {
    Place(String),
    Coords(Location),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchTarget {
    Place(String),
    Coords(Location),
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub units: DisplayUnits,
    pub weather: Option<ForecastBundle>,
    pub current_location: Option<Location>,
    pub selected_day: Option<NaiveDate>,
    pub last_error: Option<String>,
    pub error_context: Option<ErrorContext>,
    pub backoff: Backoff,
    default_place: String,
    latest_request: RequestId,
}

impl AppState {
    pub fn new(settings: &RuntimeSettings) -> Self {
        Self {
            mode: AppMode::Loading,
            units: settings.units,
            weather: None,
            current_location: None,
            selected_day: None,
            last_error: None,
            error_context: None,
            backoff: Backoff::new(Duration::from_millis(500), Duration::from_secs(4)),
            default_place: settings.default_place.clone(),
            latest_request: 0,
        }
    }

    pub fn begin_request(&mut self) -> RequestId {
        self.latest_request += 1;
        self.mode = AppMode::Loading;
        self.latest_request
    }

    #[must_use]
    pub fn is_current(&self, request: RequestId) -> bool {
        request == self.latest_request
    }

    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::FetchSucceeded { request, bundle } => self.apply_forecast(request, *bundle),
            AppEvent::FetchFailed {
                request,
                message,
                context,
            } => self.record_failure(request, message, context),
            AppEvent::UnitsChanged(units) => {
                self.units = units;
                true
            }
            AppEvent::DaySelected(selector) => self.select_day(selector),
        }
    }

    /// Installs a forecast unless a newer request has been issued since.
    pub fn apply_forecast(&mut self, request: RequestId, bundle: ForecastBundle) -> bool {
        if !self.is_current(request) {
            tracing::debug!(
                request,
                latest = self.latest_request,
                "dropping stale forecast"
            );
            return false;
        }
        self.selected_day = bundle.days.first().map(|day| day.date);
        self.current_location = Some(bundle.location.clone());
        self.weather = Some(bundle);
        self.last_error = None;
        self.error_context = None;
        self.backoff.reset();
        self.mode = AppMode::Ready;
        true
    }

    pub fn record_failure(
        &mut self,
        request: RequestId,
        message: String,
        context: ErrorContext,
    ) -> bool {
        if !self.is_current(request) {
            tracing::debug!(request, "dropping stale failure");
            return false;
        }
        tracing::warn!(%message, "fetch failed");
        self.last_error = Some(message);
        self.error_context = Some(context);
        self.mode = AppMode::Error;
        true
    }

    pub fn select_day(&mut self, selector: DaySelector) -> bool {
        let Some(weather) = self.weather.as_ref() else {
            return false;
        };
        let date = match selector {
            DaySelector::Date(date) => weather.days.get(date).map(|_| date),
            DaySelector::Offset(idx) => weather.days.nth(idx).map(|day| day.date),
        };
        match date {
            Some(date) => {
                self.selected_day = Some(date);
                true
            }
            None => false,
        }
    }

    /// Hourly records for the selected day. Without day buckets, the whole
    /// normalized hourly series stands in.
    #[must_use]
    pub fn selected_hours(&self) -> &[HourRecord] {
        let Some(weather) = self.weather.as_ref() else {
            return &[];
        };
        self.selected_day
            .and_then(|date| weather.days.get(date))
            .unwrap_or(weather.hourly.as_slice())
    }

    /// Targets to try, in order, when retrying after an error: whatever
    /// failed, then the location on screen, then the configured default
    /// place, then the fixed fallback coordinates.
    #[must_use]
    pub fn retry_chain(&self) -> Vec<FetchTarget> {
        let mut chain = Vec::with_capacity(4);
        let mut push = |target: FetchTarget| {
            if !chain.contains(&target) {
                chain.push(target);
            }
        };

        match &self.error_context {
            Some(ErrorContext::Place(place)) => push(FetchTarget::Place(place.clone())),
            Some(ErrorContext::Coords(location)) => push(FetchTarget::Coords(location.clone())),
            None => {}
        }
        if let Some(location) = &self.current_location {
            push(FetchTarget::Coords(location.clone()));
        }
        let repeats_default = matches!(
            &self.error_context,
            Some(ErrorContext::Place(place)) if place.eq_ignore_ascii_case(&self.default_place)
        );
        if !repeats_default {
            push(FetchTarget::Place(self.default_place.clone()));
        }
        push(FetchTarget::Coords(fallback_location()));
        chain
    }
}

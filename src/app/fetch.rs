use anyhow::{Result, anyhow};

use crate::{
    app::{
        events::AppEvent,
        settings::RuntimeSettings,
        state::{AppState, ErrorContext, FetchTarget},
    },
    cli::Cli,
    data::{
        forecast::{FORECAST_URL, ForecastClient},
        geocode::{GEOCODE_URL, GeocodeClient},
        reverse::{REVERSE_URL, ReverseGeocoder},
    },
    domain::weather::ForecastBundle,
};

/// The three network collaborators, built once per run.
#[derive(Debug, Clone)]
pub struct Services {
    pub geocoder: GeocodeClient,
    pub forecast: ForecastClient,
    pub reverse: ReverseGeocoder,
}

impl Services {
    pub fn from_cli(cli: &Cli, default_country: &str) -> Result<Self> {
        let forecast_url = cli.forecast_url.as_deref().unwrap_or(FORECAST_URL);
        Ok(Self {
            geocoder: GeocodeClient::with_base_url(
                cli.geocode_url.as_deref().unwrap_or(GEOCODE_URL),
            )?,
            forecast: ForecastClient::with_base_url(forecast_url)?,
            reverse: ReverseGeocoder::new(
                cli.reverse_url.as_deref().unwrap_or(REVERSE_URL),
                forecast_url,
                default_country,
            ),
        })
    }
}

#[derive(Debug)]
enum AttemptError {
    NotFound(String),
    Failed {
        error: anyhow::Error,
        context: ErrorContext,
    },
}

async fn attempt(
    services: &Services,
    target: &FetchTarget,
) -> Result<ForecastBundle, AttemptError> {
    let location = match target {
        FetchTarget::Coords(location) => location.clone(),
        FetchTarget::Place(place) => match services.geocoder.search(place).await {
            Ok(Some(location)) => location,
            Ok(None) => return Err(AttemptError::NotFound(place.clone())),
            Err(error) => {
                return Err(AttemptError::Failed {
                    error,
                    context: ErrorContext::Place(place.clone()),
                });
            }
        },
    };

    services
        .forecast
        .fetch(location.clone())
        .await
        .map_err(|error| AttemptError::Failed {
            error,
            context: ErrorContext::Coords(location),
        })
}

/// First thing to load: explicit coordinates (named via reverse geocoding)
/// win over a place argument, which wins over the configured default.
pub async fn initial_target(
    services: &Services,
    cli: &Cli,
    settings: &RuntimeSettings,
) -> FetchTarget {
    match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => FetchTarget::Coords(services.reverse.resolve(lat, lon).await),
        _ => FetchTarget::Place(
            cli.place
                .as_deref()
                .map(str::trim)
                .filter(|place| !place.is_empty())
                .map_or_else(|| settings.default_place.clone(), str::to_string),
        ),
    }
}

/// Loads `target` into `app`, retrying failed attempts up to `attempts`
/// times in total. Retries walk [`AppState::retry_chain`]; an unknown place
/// name is final and is not retried.
pub async fn load(
    app: &mut AppState,
    services: &Services,
    target: FetchTarget,
    attempts: u32,
) -> Result<()> {
    let mut chain = vec![target];
    for attempt_no in 1..=attempts.max(1) {
        if attempt_no > 1 {
            let delay = app.backoff.next_delay();
            tracing::info!(attempt = attempt_no, ?delay, "retrying forecast");
            tokio::time::sleep(delay).await;
            chain = app.retry_chain();
        }

        for target in &chain {
            let request = app.begin_request();
            match attempt(services, target).await {
                Ok(bundle) => {
                    if !matches!(chain.first(), Some(first) if first == target) {
                        tracing::warn!(
                            location = %bundle.location.display_name(),
                            "showing fallback location"
                        );
                    }
                    app.handle_event(AppEvent::FetchSucceeded {
                        request,
                        bundle: Box::new(bundle),
                    });
                    return Ok(());
                }
                Err(AttemptError::NotFound(place)) => {
                    let message = format!("Location not found: {place}");
                    app.handle_event(AppEvent::FetchFailed {
                        request,
                        message: message.clone(),
                        context: ErrorContext::Place(place),
                    });
                    return Err(anyhow!(message));
                }
                Err(AttemptError::Failed { error, context }) => {
                    app.handle_event(AppEvent::FetchFailed {
                        request,
                        message: format!("{error:#}"),
                        context,
                    });
                }
            }
        }
    }

    Err(anyhow!(
        "unable to load weather data: {}",
        app.last_error.as_deref().unwrap_or("unknown error")
    ))
}

/// Display name of a target, for logging.
#[must_use]
pub fn describe(target: &FetchTarget) -> String {
    match target {
        FetchTarget::Place(place) => place.clone(),
        FetchTarget::Coords(location) => location.display_name(),
    }
}

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod resilience;

#[cfg(test)]
mod test_support;

use anyhow::{Result, bail};
use app::{
    events::{AppEvent, DaySelector},
    fetch::{Services, describe, initial_target, load},
    report::{ReportOptions, render},
    settings::load_runtime_settings,
    state::AppState,
};
use cli::Cli;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let settings = load_runtime_settings(&cli);
    let services = Services::from_cli(&cli, &settings.default_country)?;
    let mut app = AppState::new(&settings);

    let target = initial_target(&services, &cli, &settings).await;
    tracing::info!(target = %describe(&target), "loading forecast");
    load(&mut app, &services, target, settings.retries).await?;

    if let Some(day) = cli.day.as_deref() {
        let selector: DaySelector = day.parse()?;
        if !app.handle_event(AppEvent::DaySelected(selector)) {
            bail!("no hourly forecast for day '{day}'");
        }
    }

    let options = ReportOptions {
        icon_mode: settings.icon_mode,
        hours: settings.hours,
        now: chrono::Local::now().naive_local(),
    };
    print!("{}", render(&app, &options)?);
    Ok(())
}

//! Print the time windows the monitor would show right now.
//!
//! Usage: `window_preview [preset] [count]`. Without arguments every preset
//! is printed with the bucket count from the user settings.

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use ruuvi_monitor::settings::UserSettings;
use ruuvi_monitor::{Clock, Preset, SystemClock};

fn format_ts(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn print_preset(preset: Preset, count: u32, settings: &UserSettings) -> Result<()> {
    let mut window = preset
        .window_with(count, Local, SystemClock, settings.language.locale())
        .with_context(|| format!("Failed to build {} window", preset))?;

    println!("{} ({} x {}h)", preset, count, preset.step_hours());
    println!(
        "  [{} .. {})  end date {}",
        format_ts(window.start()),
        format_ts(window.end()),
        window.end_date()?
    );
    println!(
        "  {} samples, can forward: {}",
        window.sample_count(),
        window.can_forward()
    );
    println!("  labels: {}", window.labels()?.join(" "));

    window.rewind();
    println!(
        "  previous: [{} .. {})",
        format_ts(window.start()),
        format_ts(window.end())
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let settings = UserSettings::load();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let presets = match args.first() {
        Some(name) => match Preset::from_str(name) {
            Ok(preset) => vec![preset],
            Err(_) => bail!("Unknown preset '{}', expected one of hours24, days3, week, week2, month", name),
        },
        None => Preset::all(),
    };
    let count = match args.get(1) {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("Invalid bucket count '{}'", raw))?,
        None => settings.bucket_count,
    };

    println!("now: {}", format_ts(SystemClock.now().timestamp()));
    for preset in presets {
        print_preset(preset, count, &settings)?;
    }
    Ok(())
}

//! Interactive terminal front end for the WeatherPro dashboard
//!
//! A thin text view over the library's state container. Stdin lines are
//! bridged onto the async loop through a channel; `compare` inputs go
//! through the debouncer so rapid re-entry coalesces into one fetch, the
//! same way the search box behaves in a browser UI.

use std::io::BufRead;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use weatherpro::config::WeatherProConfig;
use weatherpro::dashboard::Dashboard;
use weatherpro::debounce::Debouncer;
use weatherpro::hourly::HourSlot;
use weatherpro::recommend;
use weatherpro::state::DashboardState;
use weatherpro::units::PreferenceStore;
use weatherpro::WeatherApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeatherProConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    if !config.has_api_key() {
        eprintln!(
            "No API key configured. Set WEATHERPRO_WEATHER__API_KEY or add it to {}",
            WeatherProConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "config.toml".to_string())
        );
    }

    let client = WeatherApiClient::new(&config)?;
    let mut dashboard = Dashboard::new(client, PreferenceStore::new());
    let mut debouncer = Debouncer::new(Duration::from_millis(config.ui.debounce_ms));

    // Stdin is blocking; read it on its own thread and feed the async loop
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    // Debounced compare inputs land here once their delay elapses
    let (compare_tx, mut compare_rx) = mpsc::unbounded_channel::<String>();

    println!("WeatherPro - enter a city name to get detailed weather information.");
    print_help();

    loop {
        tokio::select! {
            line = line_rx.recv() => {
                let Some(line) = line else { break };
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let (command, rest) = match line.split_once(' ') {
                    Some((c, r)) => (c, r.trim()),
                    None => (line.as_str(), ""),
                };

                match command {
                    "search" => {
                        dashboard.search(rest).await;
                        print_dashboard(dashboard.state());
                    }
                    "compare" => {
                        debug!("Debouncing compare input '{}'", rest);
                        let tx = compare_tx.clone();
                        let city = rest.to_string();
                        debouncer.schedule("compare", async move {
                            let _ = tx.send(city);
                        });
                    }
                    "remove" => {
                        match rest.parse::<u64>() {
                            Ok(id) => {
                                dashboard.remove_city(id);
                                print_compare(dashboard.state());
                            }
                            Err(_) => println!("Usage: remove <id>"),
                        }
                    }
                    "select" => {
                        match rest.parse::<usize>() {
                            Ok(hour) if hour < 24 => {
                                dashboard.select_hour(hour);
                                print_planner(dashboard.state());
                            }
                            _ => println!("Usage: select <hour 0-23>"),
                        }
                    }
                    "unit" => {
                        let unit = dashboard.toggle_unit();
                        println!("Temperatures now shown in {}", unit.temp_symbol());
                    }
                    "show" => print_dashboard(dashboard.state()),
                    "dismiss" => dashboard.dismiss_error(),
                    "help" => print_help(),
                    "quit" | "exit" => break,
                    _ => {
                        // Bare city names are treated as a search
                        dashboard.search(&line).await;
                        print_dashboard(dashboard.state());
                    }
                }
            }
            city = compare_rx.recv() => {
                let Some(city) = city else { break };
                dashboard.compare(&city).await;
                if let Some(error) = &dashboard.state().error {
                    println!("\n! {error}");
                }
                print_compare(dashboard.state());
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  search <city>   fetch weather, forecast and air quality");
    println!("  select <hour>   pick an hour (0-23) for the trip planner");
    println!("  compare <city>  add a city to the comparison view");
    println!("  remove <id>     remove a comparison city");
    println!("  unit            toggle between °C and °F");
    println!("  show            redraw the dashboard");
    println!("  dismiss         dismiss the error banner");
    println!("  quit            exit");
}

fn print_dashboard(state: &DashboardState) {
    if let Some(error) = &state.error {
        println!("\n! {error}");
    }

    let Some(current) = &state.current else {
        return;
    };
    let unit = state.unit;

    println!(
        "\n{}{} - {}",
        current.city,
        current
            .country
            .as_deref()
            .map(|c| format!(", {c}"))
            .unwrap_or_default(),
        current.description
    );
    println!(
        "  {}{} (feels like {}{})  humidity {}%  wind {}  pressure {:.0} hPa",
        unit.convert_temp(current.temperature),
        unit.temp_symbol(),
        unit.convert_temp(current.feels_like),
        unit.temp_symbol(),
        current.humidity,
        unit.format_wind(current.wind_speed),
        current.pressure,
    );

    if let Some(aqi) = &state.aqi {
        println!("  Air Quality Index: {} ({})", aqi.index, aqi.description());
    }

    if !state.daily.is_empty() {
        println!("\n5-day forecast:");
        for day in &state.daily {
            println!(
                "  {}  {:>4}{}  {}",
                day.label,
                unit.convert_temp(day.entry.temperature),
                unit.temp_symbol(),
                day.entry.description
            );
        }
    }

    if !state.slots.is_empty() {
        println!("\nToday by hour (select <hour> for trip planning):");
        for slot in &state.slots {
            println!("  [{:2}] {}", slot.hour, format_slot(slot, state));
        }
    }

    print_compare(state);
}

fn format_slot(slot: &HourSlot, state: &DashboardState) -> String {
    let marker = if state.selected_slot == Some(slot.hour as usize) {
        "*"
    } else {
        " "
    };
    match slot.temperature() {
        Some(temp) => format!(
            "{marker} {:>5}  {:>4}{}  {}",
            slot.label,
            state.unit.convert_temp(temp),
            state.unit.temp_symbol(),
            slot.description()
        ),
        None => format!("{marker} {:>5}    --  {}", slot.label, slot.description()),
    }
}

fn print_planner(state: &DashboardState) {
    let Some(slot) = state.selected() else {
        println!("No hourly data available. Please enter a city to see hourly weather.");
        return;
    };
    let temp = slot.temperature();
    let description = slot.description();

    println!("\nWeather at {}", slot.label);
    println!("  {}", recommend::overall_note(temp, description));

    println!("\nActivity recommendations:");
    for activity in recommend::activities(temp, description) {
        println!("  [{}] {} - {}", activity.rating.as_str(), activity.name, activity.note);
    }

    println!("\nClothing:");
    for item in recommend::clothing(temp, description) {
        println!("  {} {}", item.icon, item.name);
    }

    println!("\nEssential gear:");
    for item in recommend::gear_checklist(temp, description) {
        println!("  {} {}", item.icon, item.name);
    }
}

fn print_compare(state: &DashboardState) {
    if state.compare_cities.is_empty() {
        return;
    }
    println!("\nComparison:");
    for city in &state.compare_cities {
        println!(
            "  [{}] {}{}  {}{}  {}  humidity {}%  wind {}",
            city.id,
            city.name,
            city.country
                .as_deref()
                .map(|c| format!(", {c}"))
                .unwrap_or_default(),
            state.unit.convert_temp(city.temperature),
            state.unit.temp_symbol(),
            city.description,
            city.humidity,
            state.unit.format_wind(city.wind_speed),
        );
    }
}

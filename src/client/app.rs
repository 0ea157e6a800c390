//! Interactive terminal application.
//!
//! A numbered menu over the weather tools. Every failure is printed and the
//! loop keeps going; only the quit choice or end of input stops it.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::driver::McpClient;
use super::errors::ClientError;
use super::retry::{Sleeper, TokioSleeper};
use crate::mcp::models::{GET_WEATHER_TOOL, LIST_CITIES_TOOL};
use crate::weather::WeatherRecord;

const RULE_WIDTH: usize = 50;
const CITY_COLUMN_WIDTH: usize = 15;
const CITY_COLUMNS: usize = 3;

pub struct WeatherApp<S: Sleeper = TokioSleeper> {
    client: McpClient<S>,
    cities: Vec<String>,
}

impl<S: Sleeper> WeatherApp<S> {
    pub fn new(client: McpClient<S>) -> Self {
        Self {
            client,
            cities: Vec::new(),
        }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Connects and caches the city list.
    pub async fn initialize(&mut self) -> Result<(), ClientError> {
        self.client.initialize().await?;
        let data = self.client.execute_tool(LIST_CITIES_TOOL, None).await?;
        self.cities = data
            .get("cities")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|c| c.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        Ok(())
    }

    /// Fetches the weather for `city` and renders it for display.
    pub async fn weather_report(&mut self, city: &str) -> String {
        match self
            .client
            .execute_tool(GET_WEATHER_TOOL, Some(json!({ "city": city })))
            .await
        {
            Ok(data) => format_weather(&data),
            Err(e) => format!("Error: {e}\n"),
        }
    }

    /// Runs the menu loop until the user quits or `input` ends.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        writeln!(out, "Connecting to the weather server...")?;
        if let Err(e) = self.initialize().await {
            writeln!(out, "Initialization error: {e}")?;
            writeln!(out, "Unable to start. Check the connection to the server.")?;
            return Ok(());
        }
        if self.cities.is_empty() {
            writeln!(out, "Warning: no cities were retrieved.")?;
        }

        loop {
            writeln!(out, "\n=== MOROCCO WEATHER ===")?;
            writeln!(out, "1. Show the weather for a city")?;
            writeln!(out, "2. Show the available cities")?;
            writeln!(out, "3. Quit")?;
            write!(out, "\nYour choice (1-3): ")?;
            out.flush()?;

            let Some(choice) = lines.next_line().await? else {
                break;
            };

            match choice.trim() {
                "1" => {
                    write!(out, "City name: ")?;
                    out.flush()?;
                    let Some(city) = lines.next_line().await? else {
                        break;
                    };
                    let report = self.weather_report(city.trim()).await;
                    write!(out, "{report}")?;
                    if pause(&mut lines, out).await?.is_none() {
                        break;
                    }
                }
                "2" => {
                    write!(out, "{}", format_cities(&self.cities))?;
                    if pause(&mut lines, out).await?.is_none() {
                        break;
                    }
                }
                "3" => {
                    writeln!(out, "Goodbye!")?;
                    break;
                }
                _ => writeln!(out, "Invalid choice. Please try again.")?,
            }
        }

        Ok(())
    }
}

async fn pause<R, W>(lines: &mut tokio::io::Lines<R>, out: &mut W) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "Press Enter to continue...")?;
    out.flush()?;
    lines.next_line().await
}

/// Renders a `get_weather` result, or its domain error.
pub fn format_weather(data: &Value) -> String {
    if let Some(error) = data.get("error") {
        let message = error.as_str().map_or_else(|| error.to_string(), str::to_string);
        return format!("Error: {message}\n");
    }

    let record: WeatherRecord = match serde_json::from_value(data.clone()) {
        Ok(record) => record,
        Err(e) => return format!("Error: unexpected weather data: {e}\n"),
    };

    let rule = "=".repeat(RULE_WIDTH);
    let updated = DateTime::from_timestamp(record.timestamp, 0)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| record.timestamp.to_string());

    format!(
        "\n{rule}\n  WEATHER FOR {city}, {country}\n{rule}\n\
         Condition:     {condition} ({description})\n\
         Temperature:   {temperature}°C (feels like {feels_like}°C)\n\
         Humidity:      {humidity}%\n\
         Pressure:      {pressure} hPa\n\
         Wind:          {wind} m/s\n\
         Clouds:        {clouds}%\n\
         Updated:       {updated}\n{rule}\n",
        city = record.city.to_uppercase(),
        country = record.country,
        condition = record.weather_condition,
        description = record.description,
        temperature = record.temperature,
        feels_like = record.feels_like,
        humidity = record.humidity,
        pressure = record.pressure,
        wind = record.wind_speed,
        clouds = record.clouds,
    )
}

/// Renders the city list in fixed-width columns.
pub fn format_cities(cities: &[String]) -> String {
    if cities.is_empty() {
        return "No cities available.\n".to_string();
    }

    let rule = "=".repeat(RULE_WIDTH);
    let rows: String = cities
        .chunks(CITY_COLUMNS)
        .map(|row| {
            let mut line: String = row
                .iter()
                .map(|city| format!("{:<width$}", city, width = CITY_COLUMN_WIDTH))
                .collect();
            line.push('\n');
            line
        })
        .collect();
    format!("\nAvailable Moroccan cities:\n{rule}\n{rows}{rule}\n")
}

//! Typed form of a Dark Sky forecast response.
//!
//! Every field maps to the JSON key of the same name. Keys the model does not know are ignored,
//! and keys missing from the response, or set to `null`, leave the field at its zero value (`0`,
//! `0.0`, `""`, or an empty list), so a reading of exactly zero cannot be told apart from a
//! missing one.

use crate::error::{Error, Result};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

/// API responses consist of a UTF-8-encoded, JSON-formatted object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    /// The requested latitude.
    #[serde(deserialize_with = "null_default")]
    pub latitude: f64,
    /// The requested longitude.
    #[serde(deserialize_with = "null_default")]
    pub longitude: f64,
    /// The IANA timezone name for the requested location, e.g. `America/Los_Angeles`. Stored
    /// verbatim; it is only resolved by [`Forecast::tz`] and the local-time accessors.
    #[serde(deserialize_with = "null_default")]
    pub timezone: String,
    /// Deprecated by the API. The current timezone offset in hours.
    #[serde(deserialize_with = "null_default")]
    pub offset: f64,
    /// Conditions at the requested location at the time of the request.
    #[serde(deserialize_with = "null_default")]
    pub currently: Currently,
    /// Minute-by-minute precipitation for the next hour.
    #[serde(deserialize_with = "null_default")]
    pub minutely: Block<MinutelyPoint>,
    /// Hour-by-hour conditions for the next two days.
    #[serde(deserialize_with = "null_default")]
    pub hourly: Block<HourlyPoint>,
    /// Day-by-day conditions for the next week.
    #[serde(deserialize_with = "null_default")]
    pub daily: Block<DailyPoint>,
    /// Severe weather alerts pertinent to the requested location.
    #[serde(deserialize_with = "null_default")]
    pub alerts: Vec<Alert>,
    /// Miscellaneous metadata about the request.
    #[serde(deserialize_with = "null_default")]
    pub flags: Flags,
}

impl Forecast {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Forecast> {
        Ok(serde_json::from_slice(body)?)
    }

    /// The current temperature in degrees Fahrenheit, exactly as reported.
    pub fn current_temperature(&self) -> f64 {
        self.currently.temperature
    }

    /// Resolve [`Forecast::timezone`] against the bundled IANA database.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|source| Error::TimezoneUnavailable {
                timezone: self.timezone.clone(),
                source,
            })
    }

    /// The instant of [`Currently::time`] shown as wall-clock time in the forecast's timezone.
    pub fn local_time(&self) -> Result<DateTime<Tz>> {
        self.localize(self.currently.time)
    }

    /// Any UNIX timestamp from this forecast shown as wall-clock time in the forecast's
    /// timezone. The instant is unchanged; only the zone it is displayed in differs.
    pub fn localize(&self, timestamp: i64) -> Result<DateTime<Tz>> {
        let tz = self.tz()?;
        let utc = unix_to_utc(timestamp).ok_or(Error::InvalidTimestamp(timestamp))?;
        Ok(utc.with_timezone(&tz))
    }
}

/// A data block describes the weather over a period of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "P: Deserialize<'de>"))]
pub struct Block<P> {
    /// A human-readable summary of this data block.
    #[serde(deserialize_with = "null_default")]
    pub summary: String,
    /// A machine-readable summary of this data block, taking the same values as a data point's
    /// `icon`.
    #[serde(deserialize_with = "null_default")]
    pub icon: String,
    /// Data points ordered by time.
    #[serde(deserialize_with = "null_default")]
    pub data: Vec<P>,
}

impl<P> Default for Block<P> {
    fn default() -> Self {
        Block {
            summary: String::new(),
            icon: String::new(),
            data: Vec::new(),
        }
    }
}

/// Conditions at a single instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currently {
    /// UNIX time of the observation, in seconds.
    #[serde(deserialize_with = "null_default")]
    pub time: i64,
    /// Human-readable text summary. Not suitable for automated use; use `icon` instead.
    #[serde(deserialize_with = "null_default")]
    pub summary: String,
    /// Machine-readable summary suitable for selecting an icon: `clear-day`, `clear-night`,
    /// `rain`, `snow`, `sleet`, `wind`, `fog`, `cloudy`, `partly-cloudy-day` or
    /// `partly-cloudy-night`. Further values may appear in the future.
    #[serde(deserialize_with = "null_default")]
    pub icon: String,
    /// Approximate distance to the nearest storm in miles.
    #[serde(rename = "nearestStormDistance", deserialize_with = "null_default")]
    pub nearest_storm_distance: f64,
    /// Approximate direction of the nearest storm in degrees, true north at 0.
    #[serde(rename = "nearestStormBearing", deserialize_with = "null_default")]
    pub nearest_storm_bearing: i64,
    /// Inches of liquid water per hour, assuming any precipitation occurs.
    #[serde(rename = "precipIntensity", deserialize_with = "null_default")]
    pub precip_intensity: f64,
    /// Standard deviation of `precip_intensity`.
    #[serde(rename = "precipIntensityError", deserialize_with = "null_default")]
    pub precip_intensity_error: f64,
    /// Probability of precipitation, between 0 and 1.
    #[serde(rename = "precipProbability", deserialize_with = "null_default")]
    pub precip_probability: f64,
    /// `rain`, `snow` or `sleet`.
    #[serde(rename = "precipType", deserialize_with = "null_default")]
    pub precip_type: String,
    /// Air temperature in degrees Fahrenheit.
    #[serde(deserialize_with = "null_default")]
    pub temperature: f64,
    /// "Feels like" temperature in degrees Fahrenheit.
    #[serde(rename = "apparentTemperature", deserialize_with = "null_default")]
    pub apparent_temperature: f64,
    /// Dew point in degrees Fahrenheit.
    #[serde(rename = "dewPoint", deserialize_with = "null_default")]
    pub dew_point: f64,
    /// Relative humidity, between 0 and 1.
    #[serde(deserialize_with = "null_default")]
    pub humidity: f64,
    /// Sea-level air pressure in millibars.
    #[serde(deserialize_with = "null_default")]
    pub pressure: f64,
    /// Wind speed in miles per hour.
    #[serde(rename = "windSpeed", deserialize_with = "null_default")]
    pub wind_speed: f64,
    /// Wind gust speed in miles per hour.
    #[serde(rename = "windGust", deserialize_with = "null_default")]
    pub wind_gust: f64,
    /// Direction the wind is coming from in degrees, true north at 0.
    #[serde(rename = "windBearing", deserialize_with = "null_default")]
    pub wind_bearing: i64,
    /// Fraction of sky occluded by clouds, between 0 and 1.
    #[serde(rename = "cloudCover", deserialize_with = "null_default")]
    pub cloud_cover: f64,
    #[serde(rename = "uvIndex", deserialize_with = "null_default")]
    pub uv_index: i64,
    /// Average visibility in miles, capped at 10.
    #[serde(deserialize_with = "null_default")]
    pub visibility: f64,
    /// Columnar density of atmospheric ozone in Dobson units.
    #[serde(deserialize_with = "null_default")]
    pub ozone: f64,
}

impl Currently {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinutelyPoint {
    #[serde(deserialize_with = "null_default")]
    pub time: i64,
    #[serde(rename = "precipIntensity", deserialize_with = "null_default")]
    pub precip_intensity: f64,
    #[serde(rename = "precipIntensityError", deserialize_with = "null_default")]
    pub precip_intensity_error: f64,
    #[serde(rename = "precipProbability", deserialize_with = "null_default")]
    pub precip_probability: f64,
    #[serde(rename = "precipType", deserialize_with = "null_default")]
    pub precip_type: String,
}

impl MinutelyPoint {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.time)
    }
}

/// Conditions over one hour, aligned to the top of the hour in local time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyPoint {
    #[serde(deserialize_with = "null_default")]
    pub time: i64,
    #[serde(deserialize_with = "null_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_default")]
    pub icon: String,
    #[serde(rename = "precipIntensity", deserialize_with = "null_default")]
    pub precip_intensity: f64,
    #[serde(rename = "precipProbability", deserialize_with = "null_default")]
    pub precip_probability: f64,
    #[serde(rename = "precipType", deserialize_with = "null_default")]
    pub precip_type: String,
    #[serde(deserialize_with = "null_default")]
    pub temperature: f64,
    #[serde(rename = "apparentTemperature", deserialize_with = "null_default")]
    pub apparent_temperature: f64,
    #[serde(rename = "dewPoint", deserialize_with = "null_default")]
    pub dew_point: f64,
    #[serde(deserialize_with = "null_default")]
    pub humidity: f64,
    #[serde(deserialize_with = "null_default")]
    pub pressure: f64,
    #[serde(rename = "windSpeed", deserialize_with = "null_default")]
    pub wind_speed: f64,
    #[serde(rename = "windGust", deserialize_with = "null_default")]
    pub wind_gust: f64,
    #[serde(rename = "windBearing", deserialize_with = "null_default")]
    pub wind_bearing: i64,
    #[serde(rename = "cloudCover", deserialize_with = "null_default")]
    pub cloud_cover: f64,
    #[serde(rename = "uvIndex", deserialize_with = "null_default")]
    pub uv_index: i64,
    #[serde(deserialize_with = "null_default")]
    pub visibility: f64,
    #[serde(deserialize_with = "null_default")]
    pub ozone: f64,
}

impl HourlyPoint {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.time)
    }
}

/// Conditions over one day, aligned to local midnight. The `*_time` fields are UNIX times at
/// which the corresponding extreme occurs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyPoint {
    #[serde(deserialize_with = "null_default")]
    pub time: i64,
    #[serde(deserialize_with = "null_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_default")]
    pub icon: String,
    #[serde(rename = "sunriseTime", deserialize_with = "null_default")]
    pub sunrise_time: i64,
    #[serde(rename = "sunsetTime", deserialize_with = "null_default")]
    pub sunset_time: i64,
    /// Fractional lunation: 0 is a new moon, 0.25 first quarter, 0.5 full, 0.75 last quarter.
    #[serde(rename = "moonPhase", deserialize_with = "null_default")]
    pub moon_phase: f64,
    #[serde(rename = "precipIntensity", deserialize_with = "null_default")]
    pub precip_intensity: f64,
    #[serde(rename = "precipIntensityMax", deserialize_with = "null_default")]
    pub precip_intensity_max: f64,
    #[serde(rename = "precipIntensityMaxTime", deserialize_with = "null_default")]
    pub precip_intensity_max_time: i64,
    #[serde(rename = "precipProbability", deserialize_with = "null_default")]
    pub precip_probability: f64,
    #[serde(rename = "precipType", deserialize_with = "null_default")]
    pub precip_type: String,
    /// Daytime high temperature.
    #[serde(rename = "temperatureHigh", deserialize_with = "null_default")]
    pub temperature_high: f64,
    #[serde(rename = "temperatureHighTime", deserialize_with = "null_default")]
    pub temperature_high_time: i64,
    /// Overnight low temperature.
    #[serde(rename = "temperatureLow", deserialize_with = "null_default")]
    pub temperature_low: f64,
    #[serde(rename = "temperatureLowTime", deserialize_with = "null_default")]
    pub temperature_low_time: i64,
    #[serde(rename = "apparentTemperatureHigh", deserialize_with = "null_default")]
    pub apparent_temperature_high: f64,
    #[serde(rename = "apparentTemperatureHighTime", deserialize_with = "null_default")]
    pub apparent_temperature_high_time: i64,
    #[serde(rename = "apparentTemperatureLow", deserialize_with = "null_default")]
    pub apparent_temperature_low: f64,
    #[serde(rename = "apparentTemperatureLowTime", deserialize_with = "null_default")]
    pub apparent_temperature_low_time: i64,
    #[serde(rename = "dewPoint", deserialize_with = "null_default")]
    pub dew_point: f64,
    #[serde(deserialize_with = "null_default")]
    pub humidity: f64,
    #[serde(deserialize_with = "null_default")]
    pub pressure: f64,
    #[serde(rename = "windSpeed", deserialize_with = "null_default")]
    pub wind_speed: f64,
    #[serde(rename = "windGust", deserialize_with = "null_default")]
    pub wind_gust: f64,
    #[serde(rename = "windGustTime", deserialize_with = "null_default")]
    pub wind_gust_time: i64,
    #[serde(rename = "windBearing", deserialize_with = "null_default")]
    pub wind_bearing: i64,
    #[serde(rename = "cloudCover", deserialize_with = "null_default")]
    pub cloud_cover: f64,
    #[serde(rename = "uvIndex", deserialize_with = "null_default")]
    pub uv_index: i64,
    #[serde(rename = "uvIndexTime", deserialize_with = "null_default")]
    pub uv_index_time: i64,
    #[serde(deserialize_with = "null_default")]
    pub visibility: f64,
    #[serde(deserialize_with = "null_default")]
    pub ozone: f64,
    /// Minimum temperature over the calendar day.
    #[serde(rename = "temperatureMin", deserialize_with = "null_default")]
    pub temperature_min: f64,
    #[serde(rename = "temperatureMinTime", deserialize_with = "null_default")]
    pub temperature_min_time: i64,
    /// Maximum temperature over the calendar day.
    #[serde(rename = "temperatureMax", deserialize_with = "null_default")]
    pub temperature_max: f64,
    #[serde(rename = "temperatureMaxTime", deserialize_with = "null_default")]
    pub temperature_max_time: i64,
    #[serde(rename = "apparentTemperatureMin", deserialize_with = "null_default")]
    pub apparent_temperature_min: f64,
    #[serde(rename = "apparentTemperatureMinTime", deserialize_with = "null_default")]
    pub apparent_temperature_min_time: i64,
    #[serde(rename = "apparentTemperatureMax", deserialize_with = "null_default")]
    pub apparent_temperature_max: f64,
    #[serde(rename = "apparentTemperatureMaxTime", deserialize_with = "null_default")]
    pub apparent_temperature_max_time: i64,
}

impl DailyPoint {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.time)
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sunrise_time)
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sunset_time)
    }
}

/// A severe weather warning issued by a governmental authority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    /// Names of the regions covered by this alert.
    #[serde(deserialize_with = "null_default")]
    pub regions: Vec<String>,
    /// `advisory`, `watch` or `warning`.
    #[serde(deserialize_with = "null_default")]
    pub severity: String,
    /// UNIX time at which the alert was issued.
    #[serde(deserialize_with = "null_default")]
    pub time: i64,
    /// UNIX time at which the alert will expire.
    #[serde(deserialize_with = "null_default")]
    pub expires: i64,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    /// Link to detailed information about the alert.
    #[serde(deserialize_with = "null_default")]
    pub uri: String,
}

impl Alert {
    pub fn issued(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.time)
    }

    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.expires)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    /// Data sources used to build this forecast.
    #[serde(deserialize_with = "null_default")]
    pub sources: Vec<String>,
    /// Distance to the nearest weather station that contributed data, in miles.
    #[serde(rename = "nearest-station", deserialize_with = "null_default")]
    pub nearest_station: f64,
    /// Units of the response: `us`, `si`, `ca` or `uk2`.
    #[serde(deserialize_with = "null_default")]
    pub units: String,
}

/// `null` decodes like a missing key.
fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

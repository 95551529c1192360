//! Weather parameter model shared by the engine, agent and web crates.
//!
//! Eight named scalar readings in a fixed order. Every value that enters a
//! [`WeatherParameterSet`] is sanitized: non-numeric input becomes `0.0` and
//! everything is clamped to the field's declared range.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Validation bounds for one parameter. `step` is the UI input granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterRange {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The eight weather parameters, in scorer input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterField {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    WindDirection,
    Precipitation,
    Visibility,
    CloudCover,
}

impl ParameterField {
    pub const ALL: [ParameterField; 8] = [
        ParameterField::Temperature,
        ParameterField::Humidity,
        ParameterField::Pressure,
        ParameterField::WindSpeed,
        ParameterField::WindDirection,
        ParameterField::Precipitation,
        ParameterField::Visibility,
        ParameterField::CloudCover,
    ];

    /// Wire name, as used in form fields and JSON.
    pub fn key(self) -> &'static str {
        match self {
            ParameterField::Temperature   => "temperature",
            ParameterField::Humidity      => "humidity",
            ParameterField::Pressure      => "pressure",
            ParameterField::WindSpeed     => "windSpeed",
            ParameterField::WindDirection => "windDirection",
            ParameterField::Precipitation => "precipitation",
            ParameterField::Visibility    => "visibility",
            ParameterField::CloudCover    => "cloudCover",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            ParameterField::Temperature   => "Temperature",
            ParameterField::Humidity      => "Humidity",
            ParameterField::Pressure      => "Pressure",
            ParameterField::WindSpeed     => "Wind Speed",
            ParameterField::WindDirection => "Wind Direction",
            ParameterField::Precipitation => "Precipitation",
            ParameterField::Visibility    => "Visibility",
            ParameterField::CloudCover    => "Cloud Cover",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ParameterField::Temperature   => "°C",
            ParameterField::Humidity      => "%",
            ParameterField::Pressure      => "hPa",
            ParameterField::WindSpeed     => "km/h",
            ParameterField::WindDirection => "°",
            ParameterField::Precipitation => "mm",
            ParameterField::Visibility    => "km",
            ParameterField::CloudCover    => "%",
        }
    }

    pub fn range(self) -> ParameterRange {
        match self {
            ParameterField::Temperature   => ParameterRange::new(-50.0, 60.0, 0.1),
            ParameterField::Humidity      => ParameterRange::new(0.0, 100.0, 0.1),
            ParameterField::Pressure      => ParameterRange::new(950.0, 1050.0, 0.1),
            ParameterField::WindSpeed     => ParameterRange::new(0.0, 200.0, 0.1),
            ParameterField::WindDirection => ParameterRange::new(0.0, 360.0, 1.0),
            ParameterField::Precipitation => ParameterRange::new(0.0, 500.0, 0.1),
            ParameterField::Visibility    => ParameterRange::new(0.0, 50.0, 0.1),
            ParameterField::CloudCover    => ParameterRange::new(0.0, 100.0, 1.0),
        }
    }

    /// Non-finite → 0.0, then clamp into range.
    pub fn sanitize(self, raw: f64) -> f64 {
        let value = if raw.is_finite() { raw } else { 0.0 };
        let range = self.range();
        value.clamp(range.min, range.max)
    }

    /// Coerce raw form input. Unparseable text is treated as `0.0`.
    pub fn coerce(self, raw: &str) -> f64 {
        self.sanitize(raw.trim().parse::<f64>().unwrap_or(0.0))
    }

    /// Uniform draw in `[min, max)` rounded to one decimal place.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        let range = self.range();
        let raw = rng.gen::<f64>() * (range.max - range.min) + range.min;
        round_one_decimal(raw).clamp(range.min, range.max)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A complete, validated set of weather readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherParameterSet {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub precipitation: f64,
    pub visibility: f64,
    pub cloud_cover: f64,
}

impl Default for WeatherParameterSet {
    /// Demo page starting values.
    fn default() -> Self {
        Self {
            temperature:    25.0,
            humidity:       60.0,
            pressure:       1013.0,
            wind_speed:     10.0,
            wind_direction: 180.0,
            precipitation:  0.0,
            visibility:     10.0,
            cloud_cover:    30.0,
        }
    }
}

impl WeatherParameterSet {
    /// Build a set from raw values, sanitizing each one.
    pub fn from_raw(values: [f64; 8]) -> Self {
        let mut set = Self::default();
        for (field, value) in ParameterField::ALL.into_iter().zip(values) {
            *set.slot_mut(field) = field.sanitize(value);
        }
        set
    }

    /// Draw every field from its declared range.
    pub fn randomize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut values = [0.0; 8];
        for (slot, field) in values.iter_mut().zip(ParameterField::ALL) {
            *slot = field.sample(rng);
        }
        Self::from_raw(values)
    }

    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::Temperature   => self.temperature,
            ParameterField::Humidity      => self.humidity,
            ParameterField::Pressure      => self.pressure,
            ParameterField::WindSpeed     => self.wind_speed,
            ParameterField::WindDirection => self.wind_direction,
            ParameterField::Precipitation => self.precipitation,
            ParameterField::Visibility    => self.visibility,
            ParameterField::CloudCover    => self.cloud_cover,
        }
    }

    fn slot_mut(&mut self, field: ParameterField) -> &mut f64 {
        match field {
            ParameterField::Temperature   => &mut self.temperature,
            ParameterField::Humidity      => &mut self.humidity,
            ParameterField::Pressure      => &mut self.pressure,
            ParameterField::WindSpeed     => &mut self.wind_speed,
            ParameterField::WindDirection => &mut self.wind_direction,
            ParameterField::Precipitation => &mut self.precipitation,
            ParameterField::Visibility    => &mut self.visibility,
            ParameterField::CloudCover    => &mut self.cloud_cover,
        }
    }

    /// Copy of this set with one field replaced (sanitized).
    pub fn with_field(&self, field: ParameterField, value: f64) -> Self {
        let mut next = *self;
        *next.slot_mut(field) = field.sanitize(value);
        next
    }

    /// Flattened scorer input, in field order.
    pub fn as_vector(&self) -> [f64; 8] {
        [
            self.temperature,
            self.humidity,
            self.pressure,
            self.wind_speed,
            self.wind_direction,
            self.precipitation,
            self.visibility,
            self.cloud_cover,
        ]
    }

    pub fn is_valid(&self) -> bool {
        ParameterField::ALL
            .into_iter()
            .all(|f| self.get(f).is_finite() && f.range().contains(self.get(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_default_set_is_valid() {
        assert!(WeatherParameterSet::default().is_valid());
    }

    #[test]
    fn test_vector_follows_field_order() {
        let set = WeatherParameterSet::default();
        assert_eq!(set.as_vector(), [25.0, 60.0, 1013.0, 10.0, 180.0, 0.0, 10.0, 30.0]);
        for (i, field) in ParameterField::ALL.into_iter().enumerate() {
            assert_eq!(set.get(field), set.as_vector()[i]);
        }
    }

    #[test]
    fn test_non_numeric_input_becomes_zero() {
        assert_eq!(ParameterField::Humidity.coerce("abc"), 0.0);
        assert_eq!(ParameterField::Humidity.coerce(""), 0.0);
        assert_eq!(ParameterField::Humidity.coerce(" 42.5 "), 42.5);
        assert_eq!(ParameterField::WindSpeed.sanitize(f64::NAN), 0.0);
    }

    #[test]
    fn test_zero_is_clamped_when_outside_range() {
        // Pressure has no zero in its range; coerced zero lands on the floor.
        assert_eq!(ParameterField::Pressure.coerce("n/a"), 950.0);
        assert_eq!(ParameterField::Pressure.sanitize(f64::INFINITY), 950.0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(ParameterField::Temperature.sanitize(-80.0), -50.0);
        assert_eq!(ParameterField::Temperature.sanitize(99.0), 60.0);
        assert_eq!(ParameterField::WindDirection.sanitize(720.0), 360.0);
    }

    #[test]
    fn test_with_field_replaces_only_one_value() {
        let base = WeatherParameterSet::default();
        let next = base.with_field(ParameterField::Precipitation, 1_000.0);
        assert_eq!(next.precipitation, 500.0);
        assert_eq!(next.temperature, base.temperature);
        assert_eq!(next.cloud_cover, base.cloud_cover);
    }

    #[test]
    fn test_randomize_within_range_and_one_decimal() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let set = WeatherParameterSet::randomize(&mut rng);
            assert!(set.is_valid());
            for field in ParameterField::ALL {
                let v = set.get(field);
                assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-6, "{} = {}", field.key(), v);
            }
        }
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in ParameterField::ALL {
            assert_eq!(ParameterField::from_key(field.key()), Some(field));
        }
        assert_eq!(ParameterField::from_key("dewPoint"), None);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(WeatherParameterSet::default()).unwrap();
        assert_eq!(json["windSpeed"], 10.0);
        assert_eq!(json["cloudCover"], 30.0);
    }
}

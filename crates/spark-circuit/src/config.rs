//! Circuit configuration (parsed from TOML) and validation

use spark_core::{PathGeometry, Result, SparkError, Vec2};
use std::path::Path;

/// Fixed parameters of one simulation instance.
///
/// Defaults reproduce the classroom circuit: a 400×200 loop on a 600×400
/// canvas with the bulb in the middle of the bottom wire.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitConfig {
    /// Wire loop waypoints; particles spawn at the first one
    pub path: Vec<Vec2>,
    pub bulb_position: Vec2,
    /// Drawn radius of the bulb glass
    pub bulb_radius: f64,
    /// Extra distance beyond the radius at which a particle still lights the bulb
    pub hit_margin: f64,
    /// Distance a particle travels per tick
    pub step_size: f64,
    /// Minimum time between two spawns
    pub spawn_interval_ms: f64,
    /// Tick rate hosts should drive the simulation at
    pub frame_rate: f64,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            path: vec![
                Vec2::new(100.0, 100.0),
                Vec2::new(500.0, 100.0),
                Vec2::new(500.0, 300.0),
                Vec2::new(100.0, 300.0),
            ],
            bulb_position: Vec2::new(300.0, 300.0),
            bulb_radius: 25.0,
            hit_margin: 10.0,
            step_size: 4.0,
            spawn_interval_ms: 300.0,
            frame_rate: 60.0,
        }
    }
}

impl CircuitConfig {
    /// Parse a CircuitConfig from a TOML table. Missing keys keep their
    /// defaults; present keys must have the right shape.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("path") {
            let arr = v.as_array().ok_or_else(|| expected("path", "array of [x, y]"))?;
            config.path = arr
                .iter()
                .map(|p| toml_vec2(p).ok_or_else(|| expected("path", "array of [x, y]")))
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(v) = table.get("bulb_position") {
            config.bulb_position = toml_vec2(v).ok_or_else(|| expected("bulb_position", "[x, y]"))?;
        }
        if let Some(v) = table.get("bulb_radius") {
            config.bulb_radius = toml_f64(v).ok_or_else(|| expected("bulb_radius", "number"))?;
        }
        if let Some(v) = table.get("hit_margin") {
            config.hit_margin = toml_f64(v).ok_or_else(|| expected("hit_margin", "number"))?;
        }
        if let Some(v) = table.get("step_size") {
            config.step_size = toml_f64(v).ok_or_else(|| expected("step_size", "number"))?;
        }
        if let Some(v) = table.get("spawn_interval_ms") {
            config.spawn_interval_ms =
                toml_f64(v).ok_or_else(|| expected("spawn_interval_ms", "number"))?;
        }
        if let Some(v) = table.get("frame_rate") {
            config.frame_rate = toml_f64(v).ok_or_else(|| expected("frame_rate", "number"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(content)?;
        Self::from_toml(&table)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize into a TOML table that `from_toml` reads back
    pub fn to_toml(&self) -> toml::value::Table {
        let mut table = toml::value::Table::new();
        table.insert(
            "path".into(),
            toml::Value::Array(self.path.iter().map(|p| vec2_value(*p)).collect()),
        );
        table.insert("bulb_position".into(), vec2_value(self.bulb_position));
        table.insert("bulb_radius".into(), toml::Value::Float(self.bulb_radius));
        table.insert("hit_margin".into(), toml::Value::Float(self.hit_margin));
        table.insert("step_size".into(), toml::Value::Float(self.step_size));
        table.insert(
            "spawn_interval_ms".into(),
            toml::Value::Float(self.spawn_interval_ms),
        );
        table.insert("frame_rate".into(), toml::Value::Float(self.frame_rate));
        table
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.to_toml())?)
    }

    /// Check every parameter. A config that passes can build a motion engine
    /// whose ticks never produce non-finite positions.
    pub fn validate(&self) -> Result<()> {
        PathGeometry::new(self.path.clone())?;
        if !self.bulb_position.is_finite() {
            return Err(SparkError::ConfigError(
                "bulb_position has a non-finite coordinate".into(),
            ));
        }
        non_negative("bulb_radius", self.bulb_radius)?;
        non_negative("hit_margin", self.hit_margin)?;
        non_negative("step_size", self.step_size)?;
        non_negative("spawn_interval_ms", self.spawn_interval_ms)?;
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(SparkError::ValueOutOfRange {
                field: "frame_rate".into(),
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
                value: self.frame_rate,
            });
        }
        Ok(())
    }

    /// Validated path geometry for this config
    pub fn path_geometry(&self) -> Result<PathGeometry> {
        PathGeometry::new(self.path.clone())
    }

    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate
    }
}

fn expected(field: &str, what: &str) -> SparkError {
    SparkError::InvalidFieldType {
        field: field.into(),
        expected: what.into(),
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SparkError::ValueOutOfRange {
            field: field.into(),
            min: 0.0,
            max: f64::MAX,
            value,
        })
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f64(v: &toml::Value) -> Option<f64> {
    v.as_float().or_else(|| v.as_integer().map(|i| i as f64))
}

fn toml_vec2(v: &toml::Value) -> Option<Vec2> {
    let arr = v.as_array()?;
    if arr.len() != 2 {
        return None;
    }
    Some(Vec2::new(toml_f64(&arr[0])?, toml_f64(&arr[1])?))
}

fn vec2_value(v: Vec2) -> toml::Value {
    toml::Value::Array(vec![toml::Value::Float(v.x), toml::Value::Float(v.y)])
}

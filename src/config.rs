//! Simulation tunables
//!
//! Every constant the physics and turn machine read lives in [`SimConfig`].
//! Defaults mirror [`crate::consts`]; a JSON file can override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult, check_range};
use crate::ticks_for_millis;

/// Rectangular playfield in table-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for TableBounds {
    fn default() -> Self {
        Self {
            x: TABLE_X,
            y: TABLE_Y,
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
        }
    }
}

impl TableBounds {
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Physics and pacing tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Physics ===
    pub friction: f64,
    pub wall_restitution: f64,
    pub body_restitution: f64,
    pub stop_epsilon: f64,

    // === Shot ===
    pub max_power: f64,
    pub charge_rate: f64,
    pub shot_speed_scale: f64,
    /// Speed scale for computer shots (softer than a human's)
    pub ai_shot_speed_scale: f64,

    // === Table ===
    pub table: TableBounds,
    pub ball_radius: f64,
    pub corner_pocket_radius: f64,
    pub side_pocket_radius: f64,

    // === Pacing (ticks) ===
    /// Delay before a fouled cue ball comes back
    pub respawn_delay_ticks: u64,
    /// Lifetime of a pot notice
    pub notice_ticks: u64,
    /// AI "thinking" delay before it shoots
    pub ai_think_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            wall_restitution: WALL_RESTITUTION,
            body_restitution: BODY_RESTITUTION,
            stop_epsilon: STOP_EPSILON,

            max_power: MAX_POWER,
            charge_rate: CHARGE_RATE,
            shot_speed_scale: SHOT_SPEED_SCALE,
            ai_shot_speed_scale: AI_SHOT_SPEED_SCALE,

            table: TableBounds::default(),
            ball_radius: BALL_RADIUS,
            corner_pocket_radius: CORNER_POCKET_RADIUS,
            side_pocket_radius: SIDE_POCKET_RADIUS,

            respawn_delay_ticks: ticks_for_millis(RESPAWN_DELAY_MS),
            notice_ticks: ticks_for_millis(NOTICE_MS),
            ai_think_ticks: ticks_for_millis(AI_THINK_MS),
        }
    }
}

impl SimConfig {
    /// Parse from JSON, filling missing keys with defaults, then validate
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!("Loaded simulation config");
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with finite floats always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Rack spacing for the configured ball size (never lets racked balls touch)
    pub fn rack_spacing(&self) -> f64 {
        RACK_SPACING.max(2.0 * self.ball_radius + 1.0)
    }

    /// Reject tunables the simulation cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        // Friction must strictly decay or balls never stop
        if !(self.friction.is_finite() && self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "friction",
                value: self.friction,
                range: "(0, 1)",
            });
        }
        check_range("wall_restitution", self.wall_restitution, 0.0, 1.0, "(0, 1]")?;
        check_range("body_restitution", self.body_restitution, 0.0, 1.0, "(0, 1]")?;
        check_range("stop_epsilon", self.stop_epsilon, 0.0, 10.0, "(0, 10]")?;
        check_range("max_power", self.max_power, 0.0, 1000.0, "(0, 1000]")?;
        check_range("charge_rate", self.charge_rate, 0.0, self.max_power, "(0, max_power]")?;
        check_range("shot_speed_scale", self.shot_speed_scale, 0.0, 10.0, "(0, 10]")?;
        check_range("ai_shot_speed_scale", self.ai_shot_speed_scale, 0.0, 10.0, "(0, 10]")?;
        check_range("ball_radius", self.ball_radius, 0.0, 100.0, "(0, 100]")?;
        check_range("corner_pocket_radius", self.corner_pocket_radius, 0.0, 200.0, "(0, 200]")?;
        check_range("side_pocket_radius", self.side_pocket_radius, 0.0, 200.0, "(0, 200]")?;
        self.validate_table()
    }

    /// The table must hold every rack layout without balls starting in a cushion
    fn validate_table(&self) -> ConfigResult<()> {
        let t = &self.table;
        let r = self.ball_radius;
        let spacing = self.rack_spacing();
        // Triangle rack: apex at 70% of the width, four rows behind it
        let min_width = (4.0 * spacing + 2.0 * r) / 0.3;
        // Triangle half-height vs. colour column pitch (12% of the height)
        let min_height = (2.0 * (2.0 * spacing + r)).max(2.0 * r / 0.12);

        let finite = t.x.is_finite() && t.y.is_finite() && t.width.is_finite() && t.height.is_finite();
        if !finite || t.width < min_width || t.height < min_height {
            return Err(ConfigError::DegenerateTable {
                width: t.width,
                height: t.height,
                min_width,
                min_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.respawn_delay_ticks, 120);
        assert_eq!(config.notice_ticks, 90);
        assert_eq!(config.ai_think_ticks, 60);
        assert_eq!(config.rack_spacing(), 25.0);
        assert_eq!(config.ai_shot_speed_scale, 0.1);
    }

    #[test]
    fn test_partial_json_override() {
        let config = SimConfig::from_json(r#"{ "friction": 0.95, "max_power": 80 }"#).unwrap();
        assert_eq!(config.friction, 0.95);
        assert_eq!(config.max_power, 80.0);
        // Untouched keys keep defaults
        assert_eq!(config.wall_restitution, WALL_RESTITUTION);
        assert_eq!(config.table, TableBounds::default());
    }

    #[test]
    fn test_rejects_non_decaying_friction() {
        let config = SimConfig {
            friction: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { name: "friction", .. })
        ));
    }

    #[test]
    fn test_rejects_degenerate_table() {
        let config = SimConfig {
            table: TableBounds {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 400.0,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DegenerateTable { .. })
        ));

        let config = SimConfig {
            table: TableBounds {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: f64::NAN,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SimConfig::from_json("{ friction: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let config = SimConfig {
            charge_rate: 3.5,
            ..Default::default()
        };
        let parsed = SimConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(parsed.charge_rate, 3.5);
    }
}

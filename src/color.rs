use crate::config::{ConfigError, validate_cycle_rate};
use bevy::prelude::*;

/// Hue counters restart from zero once they reach this many degrees.
pub const HUE_WRAP: f32 = 359.0;

/// Rainbow cycling for one color channel, stepped once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCycle {
    pub enabled: bool,
    rate: f32,
    hue: f32,
    saturation: f32,
    lightness: f32,
}

impl ColorCycle {
    /// `saturation` and `lightness` are percentages.
    pub fn new(rate: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            enabled: false,
            rate,
            hue: 0.0,
            saturation,
            lightness,
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f32) -> Result<(), ConfigError> {
        validate_cycle_rate(rate)?;
        self.rate = rate;
        debug!("Color cycle rate set to {}", rate);
        Ok(())
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn set_hue(&mut self, hue: f32) {
        self.hue = hue;
    }

    /// Steps the hue by the rate and returns the resulting color.
    pub fn advance(&mut self) -> Color {
        self.hue += self.rate;
        if self.hue >= HUE_WRAP {
            self.hue = 0.0;
        }
        self.color()
    }

    pub fn color(&self) -> Color {
        Color::hsl(
            self.hue.floor(),
            self.saturation / 100.0,
            self.lightness / 100.0,
        )
    }
}

use bevy::prelude::*;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;

/// Upper bound on `max_electrons`; the phase seed table is sized from it.
pub const MAX_ELECTRON_CAPACITY: usize = 64;
/// Upper bound on spheres per electron tail.
pub const MAX_TAIL_SPHERES: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("nucleus radius must be a positive number, got {0}")]
    NucleusRadius(f32),
    #[error("electron count must be between 1 and {max}, got {count}")]
    ElectronCount { count: usize, max: usize },
    #[error("maximum electron count must be between 1 and {max}, got {value}")]
    Capacity { value: usize, max: usize },
    #[error("tail sphere count must be between 1 and {max}, got {value}")]
    TailSpheres { value: usize, max: usize },
    #[error("rotation speed must be finite, got {0}")]
    Speed(f32),
    #[error("color cycle rate must be a finite, non-negative number of degrees, got {0}")]
    CycleRate(f32),
    #[error("{name} must be a percentage between 0 and 100, got {value}")]
    Percentage { name: &'static str, value: f32 },
    #[error("spin increment must be finite, got {0}")]
    SpinIncrement(f32),
    #[error("orbit thickness must be a positive number, got {0}")]
    OrbitThickness(f32),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Optional facilities the model honours. Each edition of the sketch added one.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Features {
    pub antialiasing: bool,
    pub nucleus_noise: bool,
    pub color_cycling: bool,
}

impl Default for Features {
    fn default() -> Self {
        Edition::Full.features()
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edition {
    /// Nucleus, electrons, orbits, vibration and spin.
    Basic,
    /// Adds nucleus noise and the smoothing switch.
    Noise,
    /// Adds color cycling.
    #[default]
    Full,
}

impl Edition {
    pub fn features(self) -> Features {
        match self {
            Edition::Basic => Features {
                antialiasing: false,
                nucleus_noise: false,
                color_cycling: false,
            },
            Edition::Noise => Features {
                antialiasing: true,
                nucleus_noise: true,
                color_cycling: false,
            },
            Edition::Full => Features {
                antialiasing: true,
                nucleus_noise: true,
                color_cycling: true,
            },
        }
    }

    /// Spin counter step per tick. The basic edition spins a third as fast.
    pub fn spin_increment(self) -> f32 {
        match self {
            Edition::Basic => 0.1,
            Edition::Noise | Edition::Full => 0.3,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AtomConfig {
    pub position: [f32; 2],
    pub nucleus_radius: f32,
    pub rotations_per_sec: f32,
    pub electron_count: usize,
    pub tail_spheres: usize,
    pub antialiasing: bool,
    pub max_electrons: usize,
    pub spin_increment: f32,
    pub orbit_thickness: f32,
    pub nucleus_color: [u8; 3],
    pub electron_color: [u8; 3],
    pub nucleus_cycle_rate: f32,
    pub electron_cycle_rate: f32,
    pub nucleus_saturation: f32,
    pub nucleus_lightness: f32,
    pub electron_saturation: f32,
    pub electron_lightness: f32,
    pub features: Features,
}

impl Default for AtomConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            nucleus_radius: 15.0,
            rotations_per_sec: 1.0,
            electron_count: 3,
            tail_spheres: 15,
            antialiasing: false,
            max_electrons: 10,
            spin_increment: 0.3,
            orbit_thickness: 0.75,
            nucleus_color: [3, 28, 193],
            electron_color: [193, 3, 3],
            nucleus_cycle_rate: 10.0,
            electron_cycle_rate: 10.0,
            nucleus_saturation: 100.0,
            nucleus_lightness: 50.0,
            electron_saturation: 100.0,
            electron_lightness: 50.0,
            features: Features::default(),
        }
    }
}

impl AtomConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AtomConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading atom config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks every field the model relies on. Called by the model constructor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_radius(self.nucleus_radius)?;
        if !(1..=MAX_ELECTRON_CAPACITY).contains(&self.max_electrons) {
            return Err(ConfigError::Capacity {
                value: self.max_electrons,
                max: MAX_ELECTRON_CAPACITY,
            });
        }
        validate_electron_count(self.electron_count, self.max_electrons)?;
        if !(1..=MAX_TAIL_SPHERES).contains(&self.tail_spheres) {
            return Err(ConfigError::TailSpheres {
                value: self.tail_spheres,
                max: MAX_TAIL_SPHERES,
            });
        }
        validate_speed(self.rotations_per_sec)?;
        if !self.spin_increment.is_finite() {
            return Err(ConfigError::SpinIncrement(self.spin_increment));
        }
        if !(self.orbit_thickness.is_finite() && self.orbit_thickness > 0.0) {
            return Err(ConfigError::OrbitThickness(self.orbit_thickness));
        }
        validate_cycle_rate(self.nucleus_cycle_rate)?;
        validate_cycle_rate(self.electron_cycle_rate)?;
        validate_percentage("nucleus saturation", self.nucleus_saturation)?;
        validate_percentage("nucleus lightness", self.nucleus_lightness)?;
        validate_percentage("electron saturation", self.electron_saturation)?;
        validate_percentage("electron lightness", self.electron_lightness)?;
        Ok(())
    }
}

pub fn validate_radius(radius: f32) -> Result<(), ConfigError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NucleusRadius(radius))
    }
}

pub fn validate_electron_count(count: usize, max: usize) -> Result<(), ConfigError> {
    if (1..=max).contains(&count) {
        Ok(())
    } else {
        Err(ConfigError::ElectronCount { count, max })
    }
}

pub fn validate_speed(speed: f32) -> Result<(), ConfigError> {
    if speed.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Speed(speed))
    }
}

pub fn validate_cycle_rate(rate: f32) -> Result<(), ConfigError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::CycleRate(rate))
    }
}

pub fn validate_percentage(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Percentage { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AtomConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.nucleus_radius, 15.0);
        assert_eq!(config.electron_count, 3);
        assert_eq!(config.tail_spheres, 15);
        assert_eq!(config.features, Edition::Full.features());
    }

    #[test]
    fn rejects_non_positive_radius() {
        for radius in [0.0, -3.0, f32::NAN] {
            let config = AtomConfig {
                nucleus_radius: radius,
                ..default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NucleusRadius(_))
            ));
        }
    }

    #[test]
    fn rejects_electron_count_outside_capacity() {
        let config = AtomConfig {
            electron_count: 0,
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ElectronCount { count: 0, max: 10 })
        ));

        let config = AtomConfig {
            electron_count: 11,
            ..default()
        };
        assert!(config.validate().is_err());

        let config = AtomConfig {
            electron_count: 11,
            max_electrons: 20,
            ..default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_missing_tail_and_bad_speed() {
        let config = AtomConfig {
            tail_spheres: 0,
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TailSpheres { value: 0, .. })
        ));

        let config = AtomConfig {
            rotations_per_sec: f32::INFINITY,
            ..default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Speed(_))));

        let config = AtomConfig {
            rotations_per_sec: -2.5,
            ..default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn capacity_and_tail_length_are_bounded() {
        for max_electrons in [0, MAX_ELECTRON_CAPACITY + 1, usize::MAX] {
            let config = AtomConfig {
                max_electrons,
                ..default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::Capacity { .. })
            ));
        }

        let config = AtomConfig {
            max_electrons: MAX_ELECTRON_CAPACITY,
            electron_count: MAX_ELECTRON_CAPACITY,
            tail_spheres: MAX_TAIL_SPHERES,
            ..default()
        };
        assert!(config.validate().is_ok());

        let config = AtomConfig {
            tail_spheres: MAX_TAIL_SPHERES + 1,
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TailSpheres { value: 101, max: 100 })
        ));
    }

    #[test]
    fn huge_capacity_in_json_is_rejected() {
        let err = AtomConfig::from_json_str(r#"{ "max_electrons": 18446744073709551615 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Capacity { .. }));
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config = AtomConfig::from_json_str(
            r#"{ "nucleus_radius": 20.0, "rotations_per_sec": 0.75, "features": { "color_cycling": false } }"#,
        )
        .unwrap();

        assert_eq!(config.nucleus_radius, 20.0);
        assert_eq!(config.rotations_per_sec, 0.75);
        assert_eq!(config.electron_count, 3);
        assert!(config.features.nucleus_noise);
        assert!(!config.features.color_cycling);
    }

    #[test]
    fn invalid_json_values_are_reported() {
        let err = AtomConfig::from_json_str(r#"{ "electron_count": 42 }"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "electron count must be between 1 and 10, got 42"
        );

        assert!(matches!(
            AtomConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn editions_add_features_in_order() {
        assert_eq!(
            Edition::Basic.features(),
            Features {
                antialiasing: false,
                nucleus_noise: false,
                color_cycling: false
            }
        );
        assert!(Edition::Noise.features().nucleus_noise);
        assert!(!Edition::Noise.features().color_cycling);
        assert!(Edition::Full.features().color_cycling);
    }
}

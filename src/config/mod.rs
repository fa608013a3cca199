//! Configuration with sensible defaults and optional RON persistence.
//!
//! The defaults describe the reference solar system, so running without a config file shows
//! the full scene.

use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::body::rgb_from_hex;
use crate::model::{BeltSpec, BodyInfo, BodySpec, OrbitParams};

mod cli;

pub use cli::CliArgs;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub labels: LabelConfig,
    pub run: RunConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frames per second cap handed to the window. `None` means uncapped.
    pub framerate_limit: Option<u64>,
    /// Hex color behind the starfield.
    pub background: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Starting eye position. The camera always looks at the origin.
    pub eye: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for initial orbital phases, asteroid placement, and the starfield. Leave unset for
    /// a different layout every run.
    pub seed: Option<u64>,
    pub sun: SunConfig,
    pub belt: BeltConfig,
    pub planets: Vec<BodyConfig>,
    pub show_orbits: bool,
    pub starfield: StarfieldConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunConfig {
    pub size: f32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BeltConfig {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub count: usize,
    pub asteroid_size: f32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub size: f32,
    pub distance: f64,
    pub color: String,
    /// Radians per frame.
    pub speed: f64,
    #[serde(default)]
    pub tilt: f64,
    #[serde(default)]
    pub moons: Vec<BodyConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Radius of the sphere the stars sit on. Keep it inside the camera's far plane.
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelConfig {
    pub enabled: bool,
    /// Font file to load for labels. The built-in font is used when unset.
    pub font_path: Option<PathBuf>,
    /// Text size in pixels.
    pub scale: f32,
    /// How far above the orbit each label floats.
    pub height_offset: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Stop after this many frames. Runs until the window closes when unset.
    pub steps: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Default tracing filter, overridden by `RUST_LOG`.
    pub log_level: String,
    pub show_fps: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("Solar System"),
            width: 1280,
            height: 800,
            framerate_limit: Some(60),
            background: String::from("000000"),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 45.0,
            znear: 1.0,
            zfar: 5000.0,
            eye: [0.0, 400.0, 800.0],
            min_distance: 60.0,
            max_distance: 3000.0,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sun: SunConfig::default(),
            belt: BeltConfig::default(),
            planets: reference_planets(),
            show_orbits: true,
            starfield: StarfieldConfig::default(),
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            size: 40.0,
            color: String::from("ffff00"),
        }
    }
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            inner_radius: 190.0,
            outer_radius: 215.0,
            count: 300,
            asteroid_size: 0.5,
            color: String::from("888888"),
        }
    }
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 1500,
            radius: 4000.0,
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            font_path: None,
            scale: 40.0,
            height_offset: 10.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
            show_fps: true,
        }
    }
}

impl BodyConfig {
    fn new(name: &str, size: f32, distance: f64, color: &str, speed: f64) -> Self {
        BodyConfig {
            name: name.to_owned(),
            size,
            distance,
            color: color.to_owned(),
            speed,
            tilt: 0.0,
            moons: vec![],
        }
    }

    fn with_moons(self, moons: Vec<BodyConfig>) -> Self {
        BodyConfig { moons, ..self }
    }

    pub fn to_spec(&self) -> Result<BodySpec, ConfigError> {
        Ok(BodySpec {
            info: BodyInfo {
                name: self.name.clone(),
                size: self.size,
                color: parse_color(&self.color)?,
            },
            orbit: OrbitParams::new(self.distance, self.speed).with_tilt(self.tilt),
            moons: self
                .moons
                .iter()
                .map(BodyConfig::to_spec)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// The nine planets, with the four Galilean moons around Jupiter.
fn reference_planets() -> Vec<BodyConfig> {
    vec![
        BodyConfig::new("Mercury", 4.0, 60.0, "888888", 0.004),
        BodyConfig::new("Venus", 7.0, 90.0, "d4af37", 0.002),
        BodyConfig::new("Earth", 8.0, 130.0, "3399ff", 0.001),
        BodyConfig::new("Mars", 6.0, 170.0, "ff3300", 0.0008),
        BodyConfig::new("Jupiter", 15.0, 220.0, "ffa500", 0.0005).with_moons(vec![
            BodyConfig::new("Io", 2.0, 20.0, "ddaa66", 0.01),
            BodyConfig::new("Europa", 1.8, 28.0, "cccccc", 0.008),
            BodyConfig::new("Ganymede", 2.2, 36.0, "bbbbbb", 0.006),
            BodyConfig::new("Callisto", 2.1, 45.0, "aaaaaa", 0.004),
        ]),
        BodyConfig::new("Saturn", 13.0, 270.0, "ffff99", 0.0003),
        BodyConfig::new("Uranus", 11.0, 320.0, "99ccff", 0.0002),
        BodyConfig::new("Neptune", 11.0, 370.0, "3366ff", 0.0001),
        BodyConfig::new("Pluto", 3.0, 410.0, "bbbbbb", 0.00005),
    ]
}

impl SceneConfig {
    pub fn planet_specs(&self) -> Result<Vec<BodySpec>, ConfigError> {
        self.planets.iter().map(BodyConfig::to_spec).collect()
    }

    /// The belt to scatter, or `None` if it has no asteroids.
    pub fn belt_spec(&self) -> Option<BeltSpec> {
        if self.belt.count == 0 {
            return None;
        }
        Some(BeltSpec {
            inner_radius: self.belt.inner_radius,
            outer_radius: self.belt.outer_radius,
            count: self.belt.count,
        })
    }
}

impl Config {
    /// Loads a config from a RON file. Missing fields fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_ron(&contents)
    }

    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(ConfigError::Parse)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(ConfigError::Serialize)
    }

    /// Loads the file named on the command line (or the defaults), then applies the CLI
    /// overrides on top.
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli_overrides(args);
        Ok(config)
    }
}

/// Parses a six-digit hex color like `"3399ff"`, with an optional `#` in front.
pub fn parse_color(s: &str) -> Result<Point3<f32>, ConfigError> {
    let invalid = || ConfigError::InvalidColor {
        value: s.to_owned(),
    };

    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let hex = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;

    Ok(rgb_from_hex(hex))
}

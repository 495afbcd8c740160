use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input file read when no `-i` is given.
pub const DEFAULT_INPUT: &str = "datafile4.csv";
/// Output file written when no `-o` is given.
pub const DEFAULT_OUTPUT: &str = "myhabcat.csv";

/// Right ascension in sexagesimal time units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RightAscension {
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl RightAscension {
    pub fn new(hours: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }
}

/// Declination in sexagesimal arc units. The sign lives in `degrees`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Declination {
    pub degrees: f64,
    pub arcminutes: f64,
    pub arcseconds: f64,
}

impl Declination {
    pub fn new(degrees: f64, arcminutes: f64, arcseconds: f64) -> Self {
        Self {
            degrees,
            arcminutes,
            arcseconds,
        }
    }
}

/// One data line of the input catalog, in column order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    pub hip: u32,
    pub ra: RightAscension,
    pub dec: Declination,
    pub vmag: f64,
    pub parallax_mas: f64,
    pub parallax_err_mas: f64,
    pub b_v: f64,
    pub b_v_err: f64,
    pub double_star: String,
    pub secondary_id: u32,
    pub third_catalog: String,
}

/// Distance derived from parallax.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Distance {
    LightYears(f64),
    /// Parallax was zero, negative or not finite.
    Undefined,
}

impl Distance {
    pub fn light_years(&self) -> Option<f64> {
        match *self {
            Distance::LightYears(ly) => Some(ly),
            Distance::Undefined => None,
        }
    }
}

/// Values written to the reduced catalog for one star.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DerivedPosition {
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub distance: Distance,
}

/// Input and output locations of one conversion run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Counters reported after a successful run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub records_written: usize,
    pub undefined_distances: usize,
}

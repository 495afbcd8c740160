//! Astrometric conversions: sexagesimal coordinates to decimal degrees and
//! parallax to distance.
//!
//! Unit conventions:
//! - Right ascension is given in hours, minutes and seconds of time
//! - Declination is given in degrees, arcminutes and arcseconds; the sign of the
//!   whole angle is carried by the degrees field
//! - Parallax is given in milliarcseconds (mas)
//! - Distances are returned in light-years
//!
//! The right-ascension conversion is mirrored: `ra_deg = 180 - 15 * hours`, so
//! RA 0h maps to +180° and RA 12h maps to 0°.
//!
//! # Examples
//! ```rust
//! use habcat::astrometry::{dec_degrees, distance_from_parallax, ra_degrees};
//! use habcat::models::{Declination, Distance, RightAscension};
//!
//! assert_eq!(ra_degrees(&RightAscension::new(0.0, 0.0, 0.0)), 180.0);
//! assert_eq!(dec_degrees(&Declination::new(-1.0, 30.0, 0.0)), -1.5);
//! assert!(matches!(distance_from_parallax(1000.0), Distance::LightYears(_)));
//! ```

use crate::models::{Declination, DerivedPosition, Distance, RightAscension, StarRecord};

/// Light-years per parsec, as used by the catalog tooling.
pub const LY_PER_PARSEC: f64 = 3.261_563_777;
/// Milliarcseconds per arcsecond.
pub const MAS_PER_ARCSEC: f64 = 1000.0;
/// Degrees of arc per hour of right ascension.
pub const DEG_PER_HOUR: f64 = 15.0;
/// RA origin of the mirrored output frame, in degrees.
pub const RA_ORIGIN_DEG: f64 = 180.0;

/// Right ascension in decimal degrees: `180 - (h*15 + m/2 + s/240)`.
pub fn ra_degrees(ra: &RightAscension) -> f64 {
    // one minute of time is 15 arcminutes (1/4 deg), one second is 1/240 deg
    RA_ORIGIN_DEG - (ra.hours * DEG_PER_HOUR + ra.minutes / 2.0 + ra.seconds / 240.0)
}

/// Declination in decimal degrees.
///
/// A negative degrees field makes the whole angle negative. The sign bit is
/// tested rather than `degrees < 0`, so `-0` (e.g. `-00 30 00`) yields -0.5°
/// where a plain comparison would give +0.5°.
pub fn dec_degrees(dec: &Declination) -> f64 {
    let magnitude = dec.degrees.abs() + dec.arcminutes / 60.0 + dec.arcseconds / 3600.0;
    if dec.degrees.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Distance in light-years from a parallax in milliarcseconds.
///
/// Zero, negative and non-finite parallaxes have no physical distance and map
/// to [`Distance::Undefined`].
pub fn distance_from_parallax(parallax_mas: f64) -> Distance {
    if !parallax_mas.is_finite() || parallax_mas <= 0.0 {
        return Distance::Undefined;
    }
    Distance::LightYears(LY_PER_PARSEC / (parallax_mas / MAS_PER_ARCSEC))
}

/// Computes every derived value of a record at once.
pub fn derive_position(star: &StarRecord) -> DerivedPosition {
    DerivedPosition {
        ra_deg: ra_degrees(&star.ra),
        dec_deg: dec_degrees(&star.dec),
        distance: distance_from_parallax(star.parallax_mas),
    }
}

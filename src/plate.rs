//! Aircraft input records and the bootstrap data-plate builder.
//!
//! An [`Aircraft`] bundles the airframe constants, up to two flight-test
//! observations, optional coefficient overrides, and reporting options.
//! [`Aircraft::data_plate`] runs the appendix F fits and produces the
//! immutable nine-coefficient [`DataPlate`] that every downstream query
//! references.

use std::collections::HashMap;
use std::f64::consts::PI;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::atmosphere;
use crate::error::BootstrapError;
use crate::units::{
    lower, AngularVelocity, Area, CalibrationCurve, Force, Length, Power, Temperature, Time,
    Torque, Velocity, VelocityUnit,
};

/// Default engine altitude dropoff parameter C.
pub const DEFAULT_DROPOFF: f64 = 0.12;

/// Constants describing the airframe and powerplant.
///
/// Exactly one of `wing_span` and `aspect_ratio` is required (the aspect
/// ratio wins when both are present), and likewise one of `rated_torque`
/// and the (`rated_power`, `rated_prop_speed`) pair. For geared engines
/// the rated speed is the *propeller shaft* speed and the rated torque the
/// propeller-shaft torque, i.e. engine torque times the gear ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Airframe {
    /// Wing reference area S.
    pub wing_area: Area,
    /// Wing span B.
    #[serde(default)]
    pub wing_span: Option<Length>,
    /// Wing aspect ratio A = B²/S, if known directly.
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    /// Propeller diameter d.
    pub prop_diameter: Length,
    /// MSL rated propeller-shaft torque M0.
    #[serde(default)]
    pub rated_torque: Option<Torque>,
    /// Rated power P0.
    #[serde(default)]
    pub rated_power: Option<Power>,
    /// Rated propeller-shaft angular speed n0.
    #[serde(default)]
    pub rated_prop_speed: Option<AngularVelocity>,
    /// Altitude dropoff parameter C, defaulting to 0.12.
    #[serde(default)]
    pub dropoff: Option<f64>,
}

/// A steady best-glide observation, power off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragTest {
    /// Test weight W.
    pub weight: Force,
    /// Pressure altitude of the glide.
    pub pressure_altitude: Length,
    /// Outside air temperature, if recorded.
    #[serde(default)]
    pub oat: Option<Temperature>,
    /// Indicated altitude loss over the timed segment.
    pub altitude_loss: Length,
    /// Elapsed time of the segment.
    pub elapsed: Time,
    /// Calibrated best-glide airspeed held through the segment.
    pub cas_best_glide: Velocity,
}

/// A steady full-throttle climb observation at best angle, paired with the
/// maximum level speed at the same altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrustTest {
    /// Test weight W.
    pub weight: Force,
    /// Pressure altitude of the climb.
    pub pressure_altitude: Length,
    /// Outside air temperature, if recorded.
    #[serde(default)]
    pub oat: Option<Temperature>,
    /// Calibrated best-angle-of-climb airspeed.
    pub cas_best_angle: Velocity,
    /// Calibrated maximum level airspeed at the test altitude.
    pub cas_max_level: Velocity,
}

/// Direct values for the fitted coefficients. An override always wins over
/// a test-derived value; when a drag test is present its fit feeds the
/// thrust fit, and the override replaces the coefficient afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlateOverrides {
    /// Zero-lift drag coefficient.
    #[serde(default)]
    pub cd0: Option<f64>,
    /// Oswald span efficiency factor.
    #[serde(default)]
    pub oswald_e: Option<f64>,
    /// Propeller drag coefficient b.
    #[serde(default)]
    pub prop_b: Option<f64>,
    /// Propeller thrust coefficient m.
    #[serde(default)]
    pub prop_m: Option<f64>,
}

/// Reporting options carried on the aircraft record. The engine itself
/// works in calibrated knots; these are applied or passed through at the
/// boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AircraftOptions {
    /// Unit in which derived speeds are expressed for reports.
    #[serde(default)]
    pub velocity_unit: VelocityUnit,
    /// Upper altitude bound for consumers sweeping altitudes.
    #[serde(default)]
    pub ceiling: Option<Length>,
    /// Stall speed, clean configuration, passed through for consumers.
    #[serde(default)]
    pub vs0: Option<Velocity>,
    /// Never-exceed speed, passed through for consumers.
    #[serde(default)]
    pub vne: Option<Velocity>,
    /// Optional CAS to IAS calibration applied when reporting.
    #[serde(default)]
    pub cas_to_ias: Option<CalibrationCurve>,
}

/// The full per-aircraft input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    /// Airframe and powerplant constants.
    pub airframe: Airframe,
    /// Steady glide observation, when flown.
    #[serde(default)]
    pub drag_test: Option<DragTest>,
    /// Steady climb observation, when flown.
    #[serde(default)]
    pub thrust_test: Option<ThrustTest>,
    /// Direct coefficient overrides.
    #[serde(default)]
    pub overrides: PlateOverrides,
    /// Reporting options.
    #[serde(default)]
    pub options: AircraftOptions,
}

/// The bootstrap data plate: everything the performance model needs to
/// know about one aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPlate {
    /// Wing reference area S.
    pub wing_area: Area,
    /// Wing aspect ratio A.
    pub aspect_ratio: f64,
    /// MSL rated propeller-shaft torque M0.
    pub rated_torque: Torque,
    /// Altitude dropoff parameter C.
    pub dropoff: f64,
    /// Propeller diameter d.
    pub prop_diameter: Length,
    /// Zero-lift drag coefficient C_D0.
    pub cd0: f64,
    /// Oswald span efficiency factor e.
    pub oswald_e: f64,
    /// Propeller drag coefficient b. Negative for conventional propellers.
    pub prop_b: f64,
    /// Propeller thrust coefficient m.
    pub prop_m: f64,
}

impl DataPlate {
    /// The plate in implicit British engineering units, keyed by the
    /// conventional symbol.
    pub fn summary(&self) -> HashMap<&'static str, f64> {
        let mut map = HashMap::new();
        map.insert("S_ft2", lower::square_feet(self.wing_area));
        map.insert("A", self.aspect_ratio);
        map.insert("M0_ftlbf", lower::foot_pounds(self.rated_torque));
        map.insert("C", self.dropoff);
        map.insert("d_ft", lower::feet(self.prop_diameter));
        map.insert("C_D0", self.cd0);
        map.insert("e", self.oswald_e);
        map.insert("b", self.prop_b);
        map.insert("m", self.prop_m);
        map
    }
}

impl Aircraft {
    /// Derive the bootstrap data plate from the airframe constants, the
    /// flight-test observations, and any overrides.
    pub fn data_plate(&self) -> Result<DataPlate, BootstrapError> {
        let s = lower::square_feet(self.airframe.wing_area);
        if !(s > 0.0) {
            return Err(BootstrapError::Domain(format!(
                "wing area must be positive, got {s} ft²"
            )));
        }
        let d = lower::feet(self.airframe.prop_diameter);
        if !(d > 0.0) {
            return Err(BootstrapError::Domain(format!(
                "propeller diameter must be positive, got {d} ft"
            )));
        }

        let aspect_ratio = self.derive_aspect_ratio(s)?;
        let rated_torque = self.derive_rated_torque()?;
        let dropoff = self.airframe.dropoff.unwrap_or(DEFAULT_DROPOFF);
        if !(dropoff > 0.0 && dropoff < 1.0) {
            return Err(BootstrapError::Domain(format!(
                "dropoff parameter must lie in (0, 1), got {dropoff}"
            )));
        }

        let drag_polar = match &self.drag_test {
            Some(test) => Some(drag_fit(test, s, aspect_ratio)?),
            None => None,
        };

        let prop_coefficients = match &self.thrust_test {
            Some(test) => {
                // The climb fit consumes the drag polar; a freshly fitted
                // one when available, otherwise the override values.
                let (cd0, oswald_e) = match drag_polar {
                    Some(fit) => fit,
                    None => (
                        self.overrides.cd0.ok_or(BootstrapError::MissingInput(
                            "C_D0 for the climb fit (drag test or override)",
                        ))?,
                        self.overrides.oswald_e.ok_or(BootstrapError::MissingInput(
                            "e for the climb fit (drag test or override)",
                        ))?,
                    ),
                };
                Some(thrust_fit(
                    test,
                    s,
                    d,
                    aspect_ratio,
                    lower::foot_pounds(rated_torque),
                    dropoff,
                    cd0,
                    oswald_e,
                )?)
            }
            None => None,
        };

        // Overrides win over anything derived.
        let cd0 = self
            .overrides
            .cd0
            .or(drag_polar.map(|(cd0, _)| cd0))
            .ok_or(BootstrapError::MissingInput("C_D0 (drag test or override)"))?;
        let oswald_e = self
            .overrides
            .oswald_e
            .or(drag_polar.map(|(_, e)| e))
            .ok_or(BootstrapError::MissingInput("e (drag test or override)"))?;
        let prop_b = self
            .overrides
            .prop_b
            .or(prop_coefficients.map(|(b, _)| b))
            .ok_or(BootstrapError::MissingInput("b (thrust test or override)"))?;
        let prop_m = self
            .overrides
            .prop_m
            .or(prop_coefficients.map(|(_, m)| m))
            .ok_or(BootstrapError::MissingInput("m (thrust test or override)"))?;

        if !(cd0 > 0.0 && cd0 < 0.1) {
            warn!("fitted C_D0 = {cd0:.5} is outside the plausible range (0, 0.1)");
        }
        if !(oswald_e > 0.0 && oswald_e <= 1.0) {
            warn!("fitted e = {oswald_e:.4} is outside the plausible range (0, 1]");
        }
        if prop_b >= 0.0 {
            warn!("fitted b = {prop_b:.5} is non-negative; conventional propellers fit b < 0");
        }
        if prop_m <= 0.0 {
            warn!("fitted m = {prop_m:.4} is non-positive");
        }

        Ok(DataPlate {
            wing_area: self.airframe.wing_area,
            aspect_ratio,
            rated_torque,
            dropoff,
            prop_diameter: self.airframe.prop_diameter,
            cd0,
            oswald_e,
            prop_b,
            prop_m,
        })
    }

    /// A = B²/S unless supplied directly.
    fn derive_aspect_ratio(&self, s: f64) -> Result<f64, BootstrapError> {
        let a = match (self.airframe.aspect_ratio, self.airframe.wing_span) {
            (Some(a), _) => a,
            (None, Some(b)) => {
                let b_ft = lower::feet(b);
                b_ft * b_ft / s
            }
            (None, None) => {
                return Err(BootstrapError::MissingInput("wing span or aspect ratio"))
            }
        };
        if !(a > 0.0) {
            return Err(BootstrapError::Domain(format!(
                "aspect ratio must be positive, got {a}"
            )));
        }
        Ok(a)
    }

    /// M0 = P0/(2π·n0) unless supplied directly.
    fn derive_rated_torque(&self) -> Result<Torque, BootstrapError> {
        let m0 = match (
            self.airframe.rated_torque,
            self.airframe.rated_power,
            self.airframe.rated_prop_speed,
        ) {
            (Some(m0), _, _) => m0,
            (None, Some(p0), Some(n0)) => {
                let n0_rps = lower::rps(n0);
                if !(n0_rps > 0.0) {
                    return Err(BootstrapError::Domain(format!(
                        "rated propeller speed must be positive, got {n0_rps} rev/s"
                    )));
                }
                crate::units::lift::foot_pounds(
                    lower::horsepower(p0) * 550.0 / (2.0 * PI * n0_rps),
                )
            }
            _ => {
                return Err(BootstrapError::MissingInput(
                    "rated torque, or rated power with propeller speed",
                ))
            }
        };
        if !(lower::foot_pounds(m0) > 0.0) {
            return Err(BootstrapError::Domain(
                "rated torque must be positive".into(),
            ));
        }
        Ok(m0)
    }
}

/// Fit the drag polar (C_D0, e) from a steady glide, eqs 9.41 and 9.43.
///
/// Eq 9.41 as printed carries −W, which flips the sign of C_D0; the 1995
/// paper and the appendix F numbers confirm +W.
fn drag_fit(test: &DragTest, s: f64, aspect_ratio: f64) -> Result<(f64, f64), BootstrapError> {
    let w = lower::pounds_force(test.weight);
    if !(w > 0.0) {
        return Err(BootstrapError::Domain(format!(
            "glide test weight must be positive, got {w} lbf"
        )));
    }
    let dt = lower::seconds(test.elapsed);
    if !(dt > 0.0) {
        return Err(BootstrapError::Domain(format!(
            "glide segment time must be positive, got {dt} s"
        )));
    }
    let sigma = atmosphere::relative_density(test.pressure_altitude, test.oat);
    if !(sigma > 0.0) {
        return Err(BootstrapError::Domain(format!(
            "non-positive relative density {sigma} at the glide altitude"
        )));
    }
    let rho = atmosphere::RHO0_SLUG_FT3 * sigma;

    let dh = lower::feet(atmosphere::tapeline(
        test.altitude_loss,
        test.pressure_altitude,
        test.oat,
    ));
    let v_bg = lower::feet_per_second(atmosphere::tas(
        test.cas_best_glide,
        test.pressure_altitude,
        test.oat,
    ));
    if !(v_bg > 0.0) {
        return Err(BootstrapError::Domain(format!(
            "glide airspeed must be positive, got {v_bg} ft/s"
        )));
    }

    let sin_gamma = dh / (v_bg * dt);
    if sin_gamma >= 1.0 {
        return Err(BootstrapError::Numerical(format!(
            "glide geometry is degenerate: dh/(V·dt) = {sin_gamma:.4} leaves the arcsin domain"
        )));
    }
    if sin_gamma <= 0.0 {
        return Err(BootstrapError::Domain(format!(
            "glide angle must lie in (0, π/2), got sin γ = {sin_gamma:.4}"
        )));
    }
    let gamma = sin_gamma.asin();

    let cd0 = w * sin_gamma / (rho * s * v_bg * v_bg);
    let oswald_e = 4.0 * cd0 / (PI * aspect_ratio * gamma.tan().powi(2));
    debug!("drag fit: γ = {:.3}°, C_D0 = {cd0:.5}, e = {oswald_e:.4}", gamma.to_degrees());
    Ok((cd0, oswald_e))
}

/// Fit the propeller coefficients (b, m) from the climb observation,
/// eqs 8 and 9 of the 1995 paper with πM0 substituted for P0/2n0.
#[allow(clippy::too_many_arguments)]
fn thrust_fit(
    test: &ThrustTest,
    s: f64,
    d: f64,
    aspect_ratio: f64,
    m0: f64,
    dropoff: f64,
    cd0: f64,
    oswald_e: f64,
) -> Result<(f64, f64), BootstrapError> {
    let w = lower::pounds_force(test.weight);
    if !(w > 0.0) {
        return Err(BootstrapError::Domain(format!(
            "climb test weight must be positive, got {w} lbf"
        )));
    }
    let sigma = atmosphere::relative_density(test.pressure_altitude, test.oat);
    if !(sigma > 0.0) {
        return Err(BootstrapError::Domain(format!(
            "non-positive relative density {sigma} at the climb altitude"
        )));
    }
    let rho = atmosphere::RHO0_SLUG_FT3 * sigma;
    let phi = (sigma - dropoff) / (1.0 - dropoff);
    if !(phi > 0.0) {
        return Err(BootstrapError::Domain(format!(
            "dropoff factor {phi:.4} is non-positive at the climb altitude"
        )));
    }

    let vx = lower::feet_per_second(atmosphere::tas(
        test.cas_best_angle,
        test.pressure_altitude,
        test.oat,
    ));
    let vm = lower::feet_per_second(atmosphere::tas(
        test.cas_max_level,
        test.pressure_altitude,
        test.oat,
    ));
    if !(vx > 0.0 && vm > 0.0) {
        return Err(BootstrapError::Domain(
            "climb test airspeeds must be positive".into(),
        ));
    }

    let vx4 = vx.powi(4);
    let prop_b = s * cd0 / (2.0 * d * d)
        - 2.0 * w * w / (rho * rho * d * d * s * PI * oswald_e * aspect_ratio * vx4);
    let prop_m = (d * w * w / (PI * m0 * phi * rho * s * PI * oswald_e * aspect_ratio))
        * (1.0 / (vm * vm) + vm * vm / vx4);
    debug!("thrust fit: b = {prop_b:.5}, m = {prop_m:.4}");
    Ok((prop_b, prop_m))
}

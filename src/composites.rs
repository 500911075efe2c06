//! The eight bootstrap composites at an operating point.
//!
//! The composites collapse the data plate and the ambient state into the
//! coefficients of the thrust and drag polynomials in V². The base values
//! are recomputed on every query rather than cached against a reference
//! weight; H, R, and U carry the W² dependence, so this keeps weight
//! variation trivially correct and costs a handful of multiplies.

use std::f64::consts::PI;

use crate::atmosphere;
use crate::plate::DataPlate;
use crate::units::{lower, Force, Length, Temperature};

/// One (weight, altitude, temperature) query point. Altitude is pressure
/// altitude; with no temperature the standard atmosphere supplies it and
/// the altitude is also the density altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Aircraft weight W.
    pub weight: Force,
    /// Pressure altitude h.
    pub pressure_altitude: Length,
    /// Outside air temperature, if known.
    pub oat: Option<Temperature>,
}

impl OperatingPoint {
    /// A standard-day operating point.
    pub fn standard(weight: Force, pressure_altitude: Length) -> Self {
        Self {
            weight,
            pressure_altitude,
            oat: None,
        }
    }
}

/// Altitude-independent base composites, in British engineering units.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BaseComposites {
    /// E0 (lbf).
    pub e0: f64,
    /// F0 (slug/ft).
    pub f0: f64,
    /// G0 (slug/ft).
    pub g0: f64,
    /// H0 (lbf·ft²/s²).
    pub h0: f64,
    /// K0 = F0 − G0 (slug/ft).
    pub k0: f64,
    /// Q0 = E0/K0 (ft²/s²).
    pub q0: f64,
    /// R0 = H0/K0 (ft⁴/s⁴).
    pub r0: f64,
    /// U0 = H0/G0 (ft⁴/s⁴).
    pub u0: f64,
}

impl BaseComposites {
    /// Base composites for a plate at a given weight (lbf).
    pub(crate) fn of(plate: &DataPlate, weight_lbf: f64) -> Self {
        let s = lower::square_feet(plate.wing_area);
        let d = lower::feet(plate.prop_diameter);
        let m0 = lower::foot_pounds(plate.rated_torque);
        let rho0 = atmosphere::RHO0_SLUG_FT3;

        let e0 = plate.prop_m * m0 * 2.0 * PI / d;
        let f0 = rho0 * d * d * plate.prop_b;
        let g0 = rho0 * s * plate.cd0 / 2.0;
        let h0 = 2.0 * weight_lbf * weight_lbf
            / (rho0 * s * PI * plate.oswald_e * plate.aspect_ratio);
        let k0 = f0 - g0;
        Self {
            e0,
            f0,
            g0,
            h0,
            k0,
            q0: e0 / k0,
            r0: h0 / k0,
            u0: h0 / g0,
        }
    }
}

/// The composites at an operating point, in British engineering units.
///
/// σ and φ ride along so downstream consumers can convert speeds and
/// reason about the power model without recomputing the atmosphere.
#[derive(Debug, Clone, Copy)]
pub struct Composites {
    /// Relative density σ at the point.
    pub sigma: f64,
    /// Power dropoff factor φ at the point.
    pub phi: f64,
    /// E = φ·E0: full-throttle thrust offset (lbf).
    pub e: f64,
    /// F = σ·F0: thrust slope against V² (slug/ft).
    pub f: f64,
    /// G = σ·G0: parasite drag slope against V² (slug/ft).
    pub g: f64,
    /// H = H0/σ: induced drag numerator (lbf·ft²/s²).
    pub h: f64,
    /// K = σ·K0 = F − G (slug/ft).
    pub k: f64,
    /// Q = (φ/σ)·Q0 (ft²/s²).
    pub q: f64,
    /// R = R0/σ² (ft⁴/s⁴).
    pub r: f64,
    /// U = U0/σ² (ft⁴/s⁴).
    pub u: f64,
}

impl Composites {
    /// Evaluate the composites for a plate at an operating point.
    pub fn at(plate: &DataPlate, point: &OperatingPoint) -> Self {
        let sigma = atmosphere::relative_density(point.pressure_altitude, point.oat);
        let phi = (sigma - plate.dropoff) / (1.0 - plate.dropoff);
        let base = BaseComposites::of(plate, lower::pounds_force(point.weight));

        Self {
            sigma,
            phi,
            e: phi * base.e0,
            f: sigma * base.f0,
            g: sigma * base.g0,
            h: base.h0 / sigma,
            k: sigma * base.k0,
            q: phi / sigma * base.q0,
            r: base.r0 / (sigma * sigma),
            u: base.u0 / (sigma * sigma),
        }
    }
}

//! Closed-form V-speeds from the bootstrap composites.
//!
//! The steady-climb polynomial in V² has closed-form critical points, so
//! each characteristic speed is a square root or two away from the
//! composites. Eqs 7.19 through 7.51. Every speed is reported as
//! calibrated airspeed.
//!
//! Level flight requires Q²/4 + R ≥ 0. When that discriminant goes
//! negative the operating point is at or above the absolute ceiling: the
//! powered speeds are reported absent, while the glide speeds Vbg and Vmd
//! (functions of U alone) remain defined.

use std::collections::HashMap;

use crate::atmosphere;
use crate::composites::{BaseComposites, Composites, OperatingPoint};
use crate::plate::DataPlate;
use crate::units::{
    lift, lower, Angle, CalibrationCurve, Force, Length, Velocity, VelocityUnit,
};

/// The characteristic calibrated airspeeds and companion figures at one
/// operating point. Powered entries are absent at or above the absolute
/// ceiling.
#[derive(Debug, Clone, Copy)]
pub struct VSpeeds {
    /// Best angle of climb Vx.
    pub vx: Option<Velocity>,
    /// Best rate of climb Vy.
    pub vy: Option<Velocity>,
    /// Maximum level-flight speed VM.
    pub vm: Option<Velocity>,
    /// Minimum level-flight speed Vm, the slow root of the same quadratic.
    pub vm_min: Option<Velocity>,
    /// Best glide Vbg.
    pub vbg: Option<Velocity>,
    /// Minimum sink Vmd.
    pub vmd: Option<Velocity>,
    /// Maximum rate of climb, at Vy.
    pub roc_y: Option<Velocity>,
    /// Best climb angle, at Vx.
    pub gamma_x: Option<Angle>,
    /// Minimum sink rate, at Vmd. Negative.
    pub roc_md: Option<Velocity>,
    /// Best glide angle, at Vbg. Negative.
    pub gamma_bg: Option<Angle>,
}

impl VSpeeds {
    /// Solve the V-speeds for a plate at an operating point.
    pub fn at(plate: &DataPlate, point: &OperatingPoint) -> Self {
        Self::from_composites(&Composites::at(plate, point), point.weight)
    }

    /// Solve from precomputed composites. The weight must be the one the
    /// composites were evaluated at; H, R, and U carry its square.
    pub fn from_composites(c: &Composites, weight: Force) -> Self {
        let w = lower::pounds_force(weight);

        // Above the ceiling the level-flight quadratic loses its real
        // roots and the powered speeds with them.
        let level_disc = c.q * c.q / 4.0 + c.r;
        let below_ceiling = level_disc >= 0.0;

        let vx2 = below_ceiling.then(|| (-c.r).sqrt()).filter(|v| v.is_finite());
        let vy2 = below_ceiling
            .then(|| -c.q / 6.0 + (c.q * c.q / 36.0 - c.r / 3.0).sqrt())
            .filter(|v| v.is_finite());
        let vm2 = below_ceiling.then(|| -c.q / 2.0 + level_disc.sqrt());
        let vm_min2 = below_ceiling.then(|| -c.q / 2.0 - level_disc.sqrt());

        let vx = vx2.and_then(|v2| cas_of(v2, c.sigma));
        let vy = vy2.and_then(|v2| cas_of(v2, c.sigma));
        let vm = vm2.and_then(|v2| cas_of(v2, c.sigma));
        let vm_min = vm_min2.and_then(|v2| cas_of(v2, c.sigma));

        let vbg2 = c.u.sqrt();
        let vmd2 = (c.u / 3.0).sqrt();
        let vbg = cas_of(vbg2, c.sigma);
        let vmd = cas_of(vmd2, c.sigma);

        // Rates and angles at the critical speeds, eqs 7.39, 7.44, 7.46,
        // and 7.51. True airspeed goes into the rate expressions.
        let roc_y = vy2.and_then(|v2| {
            let v = v2.sqrt();
            (v > 0.0).then(|| lift::feet_per_second((c.e * v + c.k * v2 * v - c.h / v) / w))
        });
        let gamma_x = vx.and(asin_angle((c.e - 2.0 * (-c.k * c.h).sqrt()) / w));
        let roc_md = (vmd2 > 0.0).then(|| {
            let v = vmd2.sqrt();
            lift::feet_per_second((-c.g * vmd2 * v - c.h / v) / w)
        });
        let gamma_bg = asin_angle(2.0 * (c.g * c.h).sqrt() / w).map(|a| -a);

        Self {
            vx,
            vy,
            vm,
            vm_min,
            vbg,
            vmd,
            roc_y,
            gamma_x,
            roc_md,
            gamma_bg,
        }
    }

    /// The defined speeds as magnitudes in a consumer's velocity unit,
    /// keyed by the conventional name. Absent speeds are left out.
    pub fn report(&self, unit: VelocityUnit) -> HashMap<&'static str, f64> {
        let mut map = HashMap::new();
        let mut put = |key, v: Option<Velocity>| {
            if let Some(v) = v {
                map.insert(key, unit.express(v));
            }
        };
        put("Vx", self.vx);
        put("Vy", self.vy);
        put("VM", self.vm);
        put("Vm", self.vm_min);
        put("Vbg", self.vbg);
        put("Vmd", self.vmd);
        map
    }

    /// Report the airspeeds through a CAS to IAS calibration, leaving the
    /// rates and angles untouched.
    pub fn indicated(&self, calibration: &CalibrationCurve) -> Self {
        let map = |v: Option<Velocity>| v.map(|v| calibration.apply(v));
        Self {
            vx: map(self.vx),
            vy: map(self.vy),
            vm: map(self.vm),
            vm_min: map(self.vm_min),
            vbg: map(self.vbg),
            vmd: map(self.vmd),
            ..*self
        }
    }
}

/// The absolute ceiling for a plate at a weight: the pressure altitude
/// (standard day) where the level-flight discriminant vanishes and
/// Vx = Vy = VM. Closed form through φ = 2√(−R0)/|Q0|. `None` only for a
/// degenerate plate.
pub fn absolute_ceiling(plate: &DataPlate, weight: Force) -> Option<Length> {
    let base = BaseComposites::of(plate, lower::pounds_force(weight));
    if base.k0 >= 0.0 || base.r0 >= 0.0 {
        return None;
    }
    let phi = 2.0 * (-base.r0).sqrt() / base.q0.abs();
    let sigma = plate.dropoff + (1.0 - plate.dropoff) * phi;
    if !(sigma > 0.0) {
        return None;
    }
    Some(atmosphere::pressure_altitude_for_sigma(sigma))
}

/// CAS from a squared true airspeed, when it is a real positive speed.
fn cas_of(v_squared: f64, sigma: f64) -> Option<Velocity> {
    (v_squared.is_finite() && v_squared > 0.0)
        .then(|| lift::feet_per_second(v_squared.sqrt() * sigma.sqrt()))
}

/// Arcsine as an angle, when the argument is in domain.
fn asin_angle(ratio: f64) -> Option<Angle> {
    (ratio.is_finite() && ratio.abs() <= 1.0).then(|| lift::radians(ratio.asin()))
}

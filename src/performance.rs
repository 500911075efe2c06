//! Full-throttle performance at one (V, W, h, T) point.
//!
//! Thrust is E + F·V², drag splits into G·V² parasite and H/V² induced,
//! and everything else is products and differences of those, eqs 7.9
//! through 7.41. The evaluator does not clamp the airspeed against stall
//! or the never-exceed placard; those are pass-through options for the
//! caller to honor.

use crate::composites::{Composites, OperatingPoint};
use crate::error::BootstrapError;
use crate::plate::DataPlate;
use crate::units::{lift, lower, Angle, Force, Power, Velocity};

/// An airspeed input, calibrated or true. Calibrated speeds convert to
/// true internally through √σ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Airspeed {
    /// Calibrated airspeed.
    Cas(Velocity),
    /// True airspeed.
    Tas(Velocity),
}

impl Airspeed {
    /// True airspeed in ft/s under a relative density.
    fn tas_fps(self, sigma: f64) -> f64 {
        match self {
            Airspeed::Cas(v) => lower::feet_per_second(v) / sigma.sqrt(),
            Airspeed::Tas(v) => lower::feet_per_second(v),
        }
    }
}

/// The performance figures at one operating point and airspeed.
#[derive(Debug, Clone, Copy)]
pub struct Performance {
    /// Available thrust T.
    pub thrust: Force,
    /// Available power P_av = T·V.
    pub power_available: Power,
    /// Parasite drag Dp.
    pub parasite_drag: Force,
    /// Induced drag Di.
    pub induced_drag: Force,
    /// Total drag D.
    pub total_drag: Force,
    /// Required power P_re = D·V.
    pub power_required: Power,
    /// Excess power P_xs.
    pub power_excess: Power,
    /// Excess thrust T_xs.
    pub thrust_excess: Force,
    /// Rate of climb, P_xs/W. Negative above the speed envelope or the
    /// ceiling, and reported as such.
    pub rate_of_climb: Velocity,
    /// Flight-path angle γ = arcsin(T_xs/W).
    pub flight_path_angle: Angle,
}

impl Performance {
    /// Evaluate the performance of a plate at an operating point and
    /// airspeed.
    pub fn at(
        plate: &DataPlate,
        point: &OperatingPoint,
        airspeed: Airspeed,
    ) -> Result<Self, BootstrapError> {
        Self::from_composites(&Composites::at(plate, point), point.weight, airspeed)
    }

    /// Evaluate a whole sweep of airspeeds at one operating point, keeping
    /// the points that evaluate cleanly.
    pub fn sweep(
        plate: &DataPlate,
        point: &OperatingPoint,
        airspeeds: &[Airspeed],
    ) -> Vec<Self> {
        let composites = Composites::at(plate, point);
        airspeeds
            .iter()
            .filter_map(|v| Self::from_composites(&composites, point.weight, *v).ok())
            .collect()
    }

    /// Evaluate from precomputed composites. The weight must match the one
    /// the composites were evaluated at.
    pub fn from_composites(
        c: &Composites,
        weight: Force,
        airspeed: Airspeed,
    ) -> Result<Self, BootstrapError> {
        let w = lower::pounds_force(weight);
        if !(w > 0.0) {
            return Err(BootstrapError::Domain(format!(
                "weight must be positive, got {w} lbf"
            )));
        }
        let v = airspeed.tas_fps(c.sigma);
        if !(v > 0.0) {
            return Err(BootstrapError::Domain(format!(
                "airspeed must be positive, got {v} ft/s true"
            )));
        }
        let v2 = v * v;

        let thrust = c.e + c.f * v2;
        let parasite = c.g * v2;
        let induced = c.h / v2;
        let drag = parasite + induced;
        let power_available = thrust * v;
        let power_required = drag * v;
        let power_excess = power_available - power_required;
        let thrust_excess = thrust - drag;

        let sin_gamma = thrust_excess / w;
        if sin_gamma.abs() > 1.0 {
            return Err(BootstrapError::Numerical(format!(
                "excess thrust {thrust_excess:.1} lbf exceeds the weight; \
                 the model has left its validity range"
            )));
        }

        Ok(Self {
            thrust: lift::pounds_force(thrust),
            power_available: lift::horsepower(power_available / 550.0),
            parasite_drag: lift::pounds_force(parasite),
            induced_drag: lift::pounds_force(induced),
            total_drag: lift::pounds_force(drag),
            power_required: lift::horsepower(power_required / 550.0),
            power_excess: lift::horsepower(power_excess / 550.0),
            thrust_excess: lift::pounds_force(thrust_excess),
            rate_of_climb: lift::feet_per_second(power_excess / w),
            flight_path_angle: lift::radians(sin_gamma.asin()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// The book's table 7.1 plate for the C172.
    fn table_7_1_plate() -> DataPlate {
        DataPlate {
            wing_area: lift::square_feet(174.0),
            aspect_ratio: 7.38,
            rated_torque: lift::foot_pounds(311.2),
            dropoff: 0.12,
            prop_diameter: lift::feet(6.25),
            cd0: 0.037,
            oswald_e: 0.72,
            prop_b: -0.0564,
            prop_m: 1.70,
        }
    }

    #[test]
    fn test_performance_sea_level() {
        // Table 7.5: 75 knots calibrated, gross weight, standard sea level.
        let plate = table_7_1_plate();
        let point = OperatingPoint::standard(lift::pounds_force(2400.0), lift::feet(0.0));
        let p = Performance::at(&plate, &point, Airspeed::Cas(lift::knots(75.0))).unwrap();

        assert_relative_eq!(lower::pounds_force(p.thrust), 448.18, max_relative = 1e-3);
        assert_relative_eq!(lower::horsepower(p.power_available), 103.15, max_relative = 1e-3);
        assert_relative_eq!(lower::pounds_force(p.parasite_drag), 122.25, max_relative = 1e-3);
        assert_relative_eq!(lower::pounds_force(p.induced_drag), 104.44, max_relative = 1e-3);
        assert_relative_eq!(lower::pounds_force(p.total_drag), 226.68, max_relative = 1e-3);
        assert_relative_eq!(lower::horsepower(p.power_required), 52.17, max_relative = 1e-3);
        assert_relative_eq!(lower::horsepower(p.power_excess), 50.98, max_relative = 1e-3);
        assert_relative_eq!(
            lower::feet_per_minute(p.rate_of_climb),
            701.0,
            max_relative = 1e-3
        );
        assert_relative_eq!(lower::pounds_force(p.thrust_excess), 221.50, max_relative = 1e-3);
        assert_relative_eq!(lower::degrees(p.flight_path_angle), 5.295, max_relative = 1e-3);
    }

    #[test]
    fn test_performance_at_altitude() {
        // The same 75 knots calibrated, lighter and higher.
        let plate = table_7_1_plate();
        let point = OperatingPoint::standard(lift::pounds_force(1800.0), lift::feet(8000.0));
        let p = Performance::at(&plate, &point, Airspeed::Cas(lift::knots(75.0))).unwrap();

        assert_relative_eq!(lower::pounds_force(p.thrust), 318.9, max_relative = 1e-2);
        assert_relative_eq!(lower::horsepower(p.power_available), 82.8, max_relative = 1e-2);
        // Parasite drag against CAS² is altitude independent.
        assert_relative_eq!(lower::pounds_force(p.parasite_drag), 122.25, max_relative = 1e-3);
        assert_relative_eq!(lower::pounds_force(p.induced_drag), 58.7, max_relative = 1e-2);
        assert_relative_eq!(
            lower::feet_per_minute(p.rate_of_climb),
            656.0,
            max_relative = 1e-2
        );
        assert_relative_eq!(lower::degrees(p.flight_path_angle), 4.39, max_relative = 1e-2);
    }

    #[test]
    fn test_cas_and_tas_inputs_agree() {
        let plate = table_7_1_plate();
        let point = OperatingPoint::standard(lift::pounds_force(1800.0), lift::feet(8000.0));
        let sigma = Composites::at(&plate, &point).sigma;

        let from_cas =
            Performance::at(&plate, &point, Airspeed::Cas(lift::knots(75.0))).unwrap();
        let from_tas = Performance::at(
            &plate,
            &point,
            Airspeed::Tas(lift::knots(75.0 / sigma.sqrt())),
        )
        .unwrap();
        assert_relative_eq!(
            lower::pounds_force(from_cas.thrust),
            lower::pounds_force(from_tas.thrust),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            lower::feet_per_minute(from_cas.rate_of_climb),
            lower::feet_per_minute(from_tas.rate_of_climb),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_negative_climb_past_vmax() {
        // 130 knots calibrated is beyond VM at gross weight; the model
        // reports the descent honestly.
        let plate = table_7_1_plate();
        let point = OperatingPoint::standard(lift::pounds_force(2400.0), lift::feet(0.0));
        let p = Performance::at(&plate, &point, Airspeed::Cas(lift::knots(130.0))).unwrap();
        assert!(lower::feet_per_minute(p.rate_of_climb) < 0.0);
        assert!(lower::degrees(p.flight_path_angle) < 0.0);
        assert!(lower::pounds_force(p.thrust_excess) < 0.0);
    }

    #[test]
    fn test_invalid_airspeed_and_weight() {
        let plate = table_7_1_plate();
        let point = OperatingPoint::standard(lift::pounds_force(2400.0), lift::feet(0.0));
        assert!(matches!(
            Performance::at(&plate, &point, Airspeed::Cas(lift::knots(0.0))),
            Err(BootstrapError::Domain(_))
        ));
        let weightless = OperatingPoint::standard(lift::pounds_force(0.0), lift::feet(0.0));
        assert!(matches!(
            Performance::at(&plate, &weightless, Airspeed::Cas(lift::knots(75.0))),
            Err(BootstrapError::Domain(_))
        ));
    }

    #[test]
    fn test_sweep_skips_bad_points() {
        let plate = table_7_1_plate();
        let point = OperatingPoint::standard(lift::pounds_force(2400.0), lift::feet(0.0));
        let speeds: Vec<Airspeed> = [0.0, 45.0, 55.0, 75.0, 115.0]
            .iter()
            .map(|&kt| Airspeed::Cas(lift::knots(kt)))
            .collect();
        let rows = Performance::sweep(&plate, &point, &speeds);
        // The zero-speed point drops out; the rest evaluate.
        assert_eq!(rows.len(), 4);
        // Power required bottoms out near Vmd, just under 55 knots here.
        assert!(
            lower::horsepower(rows[0].power_required)
                > lower::horsepower(rows[1].power_required)
        );
        assert!(
            lower::horsepower(rows[2].power_required)
                > lower::horsepower(rows[1].power_required)
        );
        assert!(
            lower::horsepower(rows[3].power_required)
                > lower::horsepower(rows[2].power_required)
        );
    }
}

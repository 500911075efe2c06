//! Dimensional-quantity boundary of the engine.
//!
//! Every externally visible magnitude is a `uom` quantity, so attaching the
//! wrong dimension to an input is a compile error rather than a runtime
//! one. Internally the formulas work in British engineering units (foot,
//! pound-force, slug, second, degree Rankine); the `lift` and `lower`
//! helpers move magnitudes across that boundary in one direction each.

use serde::{Deserialize, Serialize};

use crate::error::BootstrapError;

pub use uom::si::f64::{
    Angle, AngularVelocity, Area, Force, Length, MassDensity, Power, Pressure,
    ThermodynamicTemperature as Temperature, Time, Torque, Velocity,
};

/// Attach British engineering units to raw magnitudes.
///
/// This is the entry path for callers holding plain numbers in the
/// conventional units of the method; callers holding dimensional values
/// pass them straight through.
pub mod lift {
    use super::*;
    use uom::si::angle::{degree, radian};
    use uom::si::angular_velocity::{revolution_per_minute, revolution_per_second};
    use uom::si::area::square_foot;
    use uom::si::force::pound_force;
    use uom::si::length::foot;
    use uom::si::mass_density::slug_per_cubic_foot;
    use uom::si::pressure::inch_of_mercury;
    use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin};
    use uom::si::time::second;
    use uom::si::torque::pound_force_foot;
    use uom::si::velocity::{foot_per_minute, foot_per_second, knot, mile_per_hour};

    /// Feet.
    pub fn feet(x: f64) -> Length {
        Length::new::<foot>(x)
    }

    /// Square feet.
    pub fn square_feet(x: f64) -> Area {
        Area::new::<square_foot>(x)
    }

    /// Knots.
    pub fn knots(x: f64) -> Velocity {
        Velocity::new::<knot>(x)
    }

    /// Feet per second.
    pub fn feet_per_second(x: f64) -> Velocity {
        Velocity::new::<foot_per_second>(x)
    }

    /// Feet per minute.
    pub fn feet_per_minute(x: f64) -> Velocity {
        Velocity::new::<foot_per_minute>(x)
    }

    /// Statute miles per hour.
    pub fn miles_per_hour(x: f64) -> Velocity {
        Velocity::new::<mile_per_hour>(x)
    }

    /// Pounds-force.
    pub fn pounds_force(x: f64) -> Force {
        Force::new::<pound_force>(x)
    }

    /// Seconds.
    pub fn seconds(x: f64) -> Time {
        Time::new::<second>(x)
    }

    /// Degrees Fahrenheit.
    pub fn fahrenheit(x: f64) -> Temperature {
        Temperature::new::<degree_fahrenheit>(x)
    }

    /// Degrees Celsius.
    pub fn celsius(x: f64) -> Temperature {
        Temperature::new::<degree_celsius>(x)
    }

    /// Kelvin.
    pub fn kelvins(x: f64) -> Temperature {
        Temperature::new::<kelvin>(x)
    }

    /// Mechanical horsepower (550 ft·lbf/s).
    pub fn horsepower(x: f64) -> Power {
        Power::new::<uom::si::power::horsepower>(x)
    }

    /// Foot pounds-force of torque.
    pub fn foot_pounds(x: f64) -> Torque {
        Torque::new::<pound_force_foot>(x)
    }

    /// Revolutions per minute.
    pub fn rpm(x: f64) -> AngularVelocity {
        AngularVelocity::new::<revolution_per_minute>(x)
    }

    /// Revolutions per second.
    pub fn rps(x: f64) -> AngularVelocity {
        AngularVelocity::new::<revolution_per_second>(x)
    }

    /// Slugs per cubic foot.
    pub fn slugs_per_cubic_foot(x: f64) -> MassDensity {
        MassDensity::new::<slug_per_cubic_foot>(x)
    }

    /// Inches of mercury.
    pub fn inches_of_mercury(x: f64) -> Pressure {
        Pressure::new::<inch_of_mercury>(x)
    }

    /// Radians.
    pub fn radians(x: f64) -> Angle {
        Angle::new::<radian>(x)
    }

    /// Degrees of arc.
    pub fn degrees(x: f64) -> Angle {
        Angle::new::<degree>(x)
    }
}

/// Strip a quantity to its magnitude in a named British engineering unit.
pub mod lower {
    use super::*;
    use uom::si::angle::{degree, radian};
    use uom::si::angular_velocity::revolution_per_second;
    use uom::si::area::square_foot;
    use uom::si::force::pound_force;
    use uom::si::length::foot;
    use uom::si::mass_density::slug_per_cubic_foot;
    use uom::si::pressure::inch_of_mercury;
    use uom::si::thermodynamic_temperature::{degree_fahrenheit, degree_rankine, kelvin};
    use uom::si::time::second;
    use uom::si::torque::pound_force_foot;
    use uom::si::velocity::{foot_per_minute, foot_per_second, knot, mile_per_hour};

    /// Magnitude in feet.
    pub fn feet(x: Length) -> f64 {
        x.get::<foot>()
    }

    /// Magnitude in square feet.
    pub fn square_feet(x: Area) -> f64 {
        x.get::<square_foot>()
    }

    /// Magnitude in knots.
    pub fn knots(x: Velocity) -> f64 {
        x.get::<knot>()
    }

    /// Magnitude in feet per second.
    pub fn feet_per_second(x: Velocity) -> f64 {
        x.get::<foot_per_second>()
    }

    /// Magnitude in feet per minute.
    pub fn feet_per_minute(x: Velocity) -> f64 {
        x.get::<foot_per_minute>()
    }

    /// Magnitude in statute miles per hour.
    pub fn miles_per_hour(x: Velocity) -> f64 {
        x.get::<mile_per_hour>()
    }

    /// Magnitude in pounds-force.
    pub fn pounds_force(x: Force) -> f64 {
        x.get::<pound_force>()
    }

    /// Magnitude in seconds.
    pub fn seconds(x: Time) -> f64 {
        x.get::<second>()
    }

    /// Magnitude on the Rankine scale.
    pub fn rankine(x: Temperature) -> f64 {
        x.get::<degree_rankine>()
    }

    /// Magnitude in degrees Fahrenheit.
    pub fn fahrenheit(x: Temperature) -> f64 {
        x.get::<degree_fahrenheit>()
    }

    /// Magnitude in kelvin.
    pub fn kelvins(x: Temperature) -> f64 {
        x.get::<kelvin>()
    }

    /// Magnitude in mechanical horsepower.
    pub fn horsepower(x: Power) -> f64 {
        x.get::<uom::si::power::horsepower>()
    }

    /// Magnitude in foot pounds-force.
    pub fn foot_pounds(x: Torque) -> f64 {
        x.get::<pound_force_foot>()
    }

    /// Magnitude in revolutions per second.
    pub fn rps(x: AngularVelocity) -> f64 {
        x.get::<revolution_per_second>()
    }

    /// Magnitude in slugs per cubic foot.
    pub fn slugs_per_cubic_foot(x: MassDensity) -> f64 {
        x.get::<slug_per_cubic_foot>()
    }

    /// Magnitude in inches of mercury.
    pub fn inches_of_mercury(x: Pressure) -> f64 {
        x.get::<inch_of_mercury>()
    }

    /// Magnitude in radians.
    pub fn radians(x: Angle) -> f64 {
        x.get::<radian>()
    }

    /// Magnitude in degrees of arc.
    pub fn degrees(x: Angle) -> f64 {
        x.get::<degree>()
    }
}

/// The unit a consumer wants derived airspeeds expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityUnit {
    /// Knots (the default for the method's tables).
    #[default]
    Knot,
    /// Statute miles per hour.
    MilePerHour,
    /// Feet per second.
    FootPerSecond,
}

impl VelocityUnit {
    /// Magnitude of `v` in this unit.
    pub fn express(self, v: Velocity) -> f64 {
        match self {
            VelocityUnit::Knot => lower::knots(v),
            VelocityUnit::MilePerHour => lower::miles_per_hour(v),
            VelocityUnit::FootPerSecond => lower::feet_per_second(v),
        }
    }

    /// Short label for report headers.
    pub fn label(self) -> &'static str {
        match self {
            VelocityUnit::Knot => "kt",
            VelocityUnit::MilePerHour => "mph",
            VelocityUnit::FootPerSecond => "ft/s",
        }
    }
}

/// Monotone piecewise-linear CAS to IAS calibration, applied only at the
/// reporting boundary. Breakpoints are (CAS, IAS) pairs in knots; speeds
/// beyond the table ends extrapolate along the end segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCurve {
    points: Vec<(f64, f64)>,
}

impl CalibrationCurve {
    /// Build a curve from at least two breakpoints, strictly increasing in
    /// both coordinates.
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self, BootstrapError> {
        if points.len() < 2 {
            return Err(BootstrapError::Domain(
                "calibration curve needs at least two breakpoints".into(),
            ));
        }
        for pair in points.windows(2) {
            if pair[1].0 <= pair[0].0 || pair[1].1 <= pair[0].1 {
                return Err(BootstrapError::Domain(format!(
                    "calibration breakpoints must increase monotonically, got {:?} then {:?}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self { points })
    }

    /// Map a calibrated airspeed to indicated.
    pub fn apply(&self, cas: Velocity) -> Velocity {
        let x = lower::knots(cas);
        let seg = self
            .points
            .windows(2)
            .find(|pair| x <= pair[1].0)
            .unwrap_or_else(|| &self.points[self.points.len() - 2..]);
        let (x0, y0) = seg[0];
        let (x1, y1) = seg[1];
        let t = (x - x0) / (x1 - x0);
        lift::knots(y0 + t * (y1 - y0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lift_lower_round_trip() {
        assert_relative_eq!(lower::feet(lift::feet(5750.0)), 5750.0, epsilon = 1e-9);
        assert_relative_eq!(
            lower::square_feet(lift::square_feet(174.0)),
            174.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(lower::knots(lift::knots(70.5)), 70.5, epsilon = 1e-9);
        assert_relative_eq!(
            lower::pounds_force(lift::pounds_force(2400.0)),
            2400.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            lower::foot_pounds(lift::foot_pounds(311.2)),
            311.2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_temperature_scales() {
        // 45 °F on the absolute scale.
        assert_relative_eq!(
            lower::rankine(lift::fahrenheit(45.0)),
            504.67,
            epsilon = 1e-6
        );
        assert_relative_eq!(lower::kelvins(lift::celsius(15.0)), 288.15, epsilon = 1e-9);
    }

    #[test]
    fn test_power_and_speed_conversions() {
        // 1 hp = 550 ft·lbf/s; a knot is 1.68781 ft/s.
        assert_relative_eq!(
            lower::feet_per_second(lift::knots(1.0)),
            1.68781,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            lower::feet_per_minute(lift::feet_per_second(1.0)),
            60.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(lower::rps(lift::rpm(2700.0)), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_velocity_unit_express() {
        let v = lift::knots(100.0);
        assert_relative_eq!(VelocityUnit::Knot.express(v), 100.0, epsilon = 1e-9);
        assert_relative_eq!(
            VelocityUnit::MilePerHour.express(v),
            115.078,
            max_relative = 1e-4
        );
        assert_relative_eq!(
            VelocityUnit::FootPerSecond.express(v),
            168.781,
            max_relative = 1e-4
        );
        assert_eq!(VelocityUnit::Knot.label(), "kt");
    }

    #[test]
    fn test_calibration_curve_interpolates() {
        let cal = CalibrationCurve::new(vec![(40.0, 38.0), (90.0, 89.0), (140.0, 140.0)])
            .unwrap();
        assert_relative_eq!(
            lower::knots(cal.apply(lift::knots(40.0))),
            38.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            lower::knots(cal.apply(lift::knots(65.0))),
            63.5,
            epsilon = 1e-9
        );
        // Linear extrapolation past the ends.
        assert_relative_eq!(
            lower::knots(cal.apply(lift::knots(30.0))),
            27.8,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            lower::knots(cal.apply(lift::knots(150.0))),
            150.2,
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_calibration_curve_rejects_non_monotone() {
        assert!(CalibrationCurve::new(vec![(40.0, 38.0)]).is_err());
        assert!(CalibrationCurve::new(vec![(40.0, 38.0), (40.0, 39.0)]).is_err());
        assert!(CalibrationCurve::new(vec![(40.0, 38.0), (50.0, 37.0)]).is_err());
    }
}

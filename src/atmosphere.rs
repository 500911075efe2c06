//! 1962 US Standard Atmosphere, as used by the Bootstrap method.
//!
//! References: Lowry, *The Bootstrap Approach to Predicting Airplane Flight
//! Performance* (1995), and *Performance of Light Aircraft* (AIAA, 1999),
//! chapter 1 and appendix F.
//!
//! Everything here is a pure total function of its arguments. Queries carry
//! an optional outside air temperature; when it is absent the standard
//! atmosphere supplies the temperature and pressure altitude doubles as
//! density altitude.

use crate::units::{lift, lower, Angle, Length, MassDensity, Pressure, Temperature, Time, Velocity};

/// Sea-level standard temperature (K).
pub const T0_KELVIN: f64 = 288.15;

/// Sea-level standard temperature on the Rankine scale, the working
/// constant of the appendix F density fit.
pub const T0_RANKINE: f64 = 518.7;

/// Sea-level standard pressure (inHg).
pub const P0_IN_HG: f64 = 29.921;

/// Sea-level standard density (slug/ft³). The book works with the rounded
/// 0.00237 rather than 0.002377, and so do all the fitted coefficients.
pub const RHO0_SLUG_FT3: f64 = 0.00237;

/// Temperature lapse rate (K/ft).
pub const LAPSE_RATE_K_PER_FT: f64 = 0.001981;

/// Specific gas constant for dry air (ft/°R).
const GAS_CONSTANT_FT_PER_RANKINE: f64 = 53.355;

/// Altitude scale (ft) of the pressure-altitude density model.
const SIGMA_ALTITUDE_SCALE_FT: f64 = 145_457.0;

/// Exponent of the pressure-altitude density model.
const SIGMA_EXPONENT: f64 = 4.25635;

/// Altitude coefficient (1/ft) of the temperature-branch density fit,
/// eq F.2.
const SIGMA_TEMP_ALTITUDE_COEFF: f64 = 6.8752e-6;

/// Sea-level standard density as a dimensional quantity.
pub fn sea_level_density() -> MassDensity {
    lift::slugs_per_cubic_foot(RHO0_SLUG_FT3)
}

/// Standard temperature at a pressure altitude.
pub fn standard_temperature(pressure_altitude: Length) -> Temperature {
    lift::kelvins(T0_KELVIN - LAPSE_RATE_K_PER_FT * lower::feet(pressure_altitude))
}

/// Standard pressure at a pressure altitude.
pub fn standard_pressure(pressure_altitude: Length) -> Pressure {
    let lapse_r_per_ft = LAPSE_RATE_K_PER_FT * 1.8;
    let exponent = 1.0 / (lapse_r_per_ft * GAS_CONSTANT_FT_PER_RANKINE);
    let ratio = 1.0 - lapse_r_per_ft * lower::feet(pressure_altitude) / T0_RANKINE;
    lift::inches_of_mercury(P0_IN_HG * ratio.powf(exponent))
}

/// Relative density σ = ρ/ρ0.
///
/// With a temperature this is the appendix F fit over (pressure altitude,
/// OAT); without one it is the pure pressure-altitude model, which makes
/// σ(0, None) exactly 1.
pub fn relative_density(pressure_altitude: Length, oat: Option<Temperature>) -> f64 {
    let h = lower::feet(pressure_altitude);
    match oat {
        Some(t) => (T0_RANKINE / lower::rankine(t)) * (1.0 - SIGMA_TEMP_ALTITUDE_COEFF * h),
        None => (1.0 - h / SIGMA_ALTITUDE_SCALE_FT).powf(SIGMA_EXPONENT),
    }
}

/// Ambient density ρ = ρ0·σ.
pub fn density(pressure_altitude: Length, oat: Option<Temperature>) -> MassDensity {
    lift::slugs_per_cubic_foot(RHO0_SLUG_FT3 * relative_density(pressure_altitude, oat))
}

/// The standard-atmosphere altitude whose density ratio is σ.
pub fn pressure_altitude_for_sigma(sigma: f64) -> Length {
    lift::feet(SIGMA_ALTITUDE_SCALE_FT * (1.0 - sigma.powf(1.0 / SIGMA_EXPONENT)))
}

/// Density altitude: the standard-atmosphere altitude at which ambient
/// density equals the density observed at (pressure altitude, OAT).
pub fn density_altitude(pressure_altitude: Length, oat: Option<Temperature>) -> Length {
    pressure_altitude_for_sigma(relative_density(pressure_altitude, oat))
}

/// Engine-power altitude dropoff factor φ = (σ − C)/(1 − C).
pub fn dropoff_factor(pressure_altitude: Length, oat: Option<Temperature>, dropoff: f64) -> f64 {
    (relative_density(pressure_altitude, oat) - dropoff) / (1.0 - dropoff)
}

/// True airspeed from calibrated, V = V_C/√σ.
pub fn tas(calibrated: Velocity, pressure_altitude: Length, oat: Option<Temperature>) -> Velocity {
    calibrated / relative_density(pressure_altitude, oat).sqrt()
}

/// Calibrated airspeed from true, V_C = V·√σ.
pub fn cas(true_speed: Velocity, pressure_altitude: Length, oat: Option<Temperature>) -> Velocity {
    true_speed * relative_density(pressure_altitude, oat).sqrt()
}

/// Tapeline (geometric) altitude change from an indicated change, corrected
/// for non-standard temperature on the absolute scale. Identity when no
/// temperature is supplied. Eq F.4.
pub fn tapeline(
    indicated_change: Length,
    pressure_altitude: Length,
    oat: Option<Temperature>,
) -> Length {
    match oat {
        Some(t) => {
            indicated_change * lower::rankine(t)
                / lower::rankine(standard_temperature(pressure_altitude))
        }
        None => indicated_change,
    }
}

/// Flight-path angle from true airspeed, tapeline altitude change, and
/// elapsed time: γ = arcsin(dh/(V·dt)).
pub fn flight_angle(true_speed: Velocity, tapeline_change: Length, elapsed: Time) -> Angle {
    let ratio = lower::feet(tapeline_change)
        / (lower::feet_per_second(true_speed) * lower::seconds(elapsed));
    lift::radians(ratio.asin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_standard_temperature() {
        let t0 = standard_temperature(lift::feet(0.0));
        assert_relative_eq!(lower::kelvins(t0), 288.15, epsilon = 1e-9);
        // Top of the troposphere.
        let t = standard_temperature(lift::feet(36_090.0));
        assert_abs_diff_eq!(lower::kelvins(t) - 273.15, -56.5, epsilon = 0.1);
    }

    #[test]
    fn test_standard_pressure() {
        assert_relative_eq!(
            lower::inches_of_mercury(standard_pressure(lift::feet(0.0))),
            P0_IN_HG,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            lower::inches_of_mercury(standard_pressure(lift::feet(5000.0))),
            24.90,
            epsilon = 0.05
        );
    }

    #[test]
    fn test_relative_density_standard() {
        assert_eq!(relative_density(lift::feet(0.0), None), 1.0);
        assert_relative_eq!(
            relative_density(lift::feet(5000.0), None),
            0.86167,
            max_relative = 1e-4
        );
        assert_relative_eq!(
            relative_density(lift::feet(8000.0), None),
            0.78602,
            max_relative = 1e-4
        );
    }

    #[test]
    fn test_relative_density_with_oat() {
        assert_relative_eq!(
            relative_density(lift::feet(5750.0), Some(lift::fahrenheit(45.0))),
            0.9871,
            max_relative = 1e-4
        );
        // 59 °F at sea level is the standard day.
        assert_relative_eq!(
            relative_density(lift::feet(0.0), Some(lift::fahrenheit(59.0))),
            1.0,
            max_relative = 1e-4
        );
    }

    #[test]
    fn test_relative_density_monotone() {
        let mut prev = relative_density(lift::feet(0.0), None);
        for step in 1..=40 {
            let sigma = relative_density(lift::feet(step as f64 * 1000.0), None);
            assert!(sigma < prev, "sigma must decrease with altitude");
            prev = sigma;
        }
    }

    #[test]
    fn test_density() {
        let rho = density(lift::feet(5750.0), Some(lift::fahrenheit(45.0)));
        assert_relative_eq!(
            lower::slugs_per_cubic_foot(rho),
            0.002339,
            max_relative = 1e-3
        );
        assert_relative_eq!(
            lower::slugs_per_cubic_foot(sea_level_density()),
            RHO0_SLUG_FT3,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_density_altitude() {
        // Round trip on a standard day.
        let h = lift::feet(7250.0);
        assert_relative_eq!(
            lower::feet(density_altitude(h, None)),
            7250.0,
            max_relative = 1e-9
        );
        // A warmer day sits higher in density terms than a cooler one.
        let warm = density_altitude(lift::feet(5000.0), Some(lift::fahrenheit(85.0)));
        let cool = density_altitude(lift::feet(5000.0), Some(lift::fahrenheit(45.0)));
        assert!(lower::feet(warm) > lower::feet(cool));
        // The defining property: the standard atmosphere at the density
        // altitude has the observed density ratio.
        let oat = Some(lift::fahrenheit(45.0));
        let da = density_altitude(lift::feet(5750.0), oat);
        assert_relative_eq!(
            relative_density(da, None),
            relative_density(lift::feet(5750.0), oat),
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_dropoff_factor() {
        assert_relative_eq!(dropoff_factor(lift::feet(0.0), None, 0.12), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            dropoff_factor(lift::feet(8000.0), None, 0.12),
            0.7568,
            max_relative = 1e-3
        );
    }

    #[test]
    fn test_tas_cas() {
        let h = lift::feet(5750.0);
        let oat = Some(lift::fahrenheit(45.0));
        let v_true = tas(lift::knots(70.5), h, oat);
        assert_abs_diff_eq!(lower::feet_per_second(v_true), 119.8, epsilon = 0.1);
        let back = cas(v_true, h, oat);
        assert_relative_eq!(lower::knots(back), 70.5, max_relative = 1e-12);
        // And the other direction.
        let v_cal = cas(lift::feet_per_second(119.8), h, oat);
        assert_relative_eq!(
            lower::feet_per_second(tas(v_cal, h, oat)),
            119.8,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_tapeline_and_flight_angle() {
        let h = lift::feet(5750.0);
        let oat = Some(lift::fahrenheit(45.0));
        let dh = tapeline(lift::feet(500.0), h, oat);
        assert_abs_diff_eq!(lower::feet(dh), 506.5, epsilon = 0.1);
        // Without a temperature the indicated change stands.
        assert_relative_eq!(
            lower::feet(tapeline(lift::feet(500.0), h, None)),
            500.0,
            epsilon = 1e-12
        );

        let v = tas(lift::knots(70.5), h, oat);
        let gamma = flight_angle(v, dh, lift::seconds(39.10));
        assert_abs_diff_eq!(lower::degrees(gamma), 6.21, epsilon = 0.01);
    }
}

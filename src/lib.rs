//! Light-aircraft performance engine implementing John T. Lowry's
//! Bootstrap Approach.
//!
//! From a handful of airframe constants and two simple flight-test
//! observations (a steady glide and a steady best-angle climb at full
//! throttle), the engine derives a nine-coefficient "data plate" and from
//! it the whole performance envelope at any weight, altitude, and
//! airspeed: thrust, drag, power available and required, rate of climb,
//! flight-path angle, and the characteristic V-speeds.
//!
//! References: Lowry, *The Bootstrap Approach to Predicting Airplane
//! Flight Performance*, JAAER 6(1), 1995; Lowry, *Performance of Light
//! Aircraft*, AIAA, 1999.
//!
//! # Layout
//!
//! - [`units`]: the dimensional boundary; every magnitude crossing the API
//!   carries its physical dimension
//! - [`atmosphere`]: the 1962 US Standard Atmosphere model
//! - [`plate`]: input records and the data-plate builder
//! - [`composites`]: the per-operating-point composite coefficients
//! - [`vspeeds`]: closed-form characteristic airspeeds and the ceiling
//! - [`performance`]: per-airspeed performance figures
//!
//! The library is pure: no I/O, no global state, no initialization step.
//! Every query is an independent function of immutable inputs and may run
//! concurrently with any other.
//!
//! # Example
//!
//! ```
//! use bootstrap_calc::units::lift;
//! use bootstrap_calc::{
//!     Aircraft, Airframe, DragTest, OperatingPoint, ThrustTest, VSpeeds,
//! };
//!
//! let aircraft = Aircraft {
//!     airframe: Airframe {
//!         wing_area: lift::square_feet(174.0),
//!         wing_span: Some(lift::feet(35.83)),
//!         aspect_ratio: None,
//!         prop_diameter: lift::feet(6.25),
//!         rated_torque: None,
//!         rated_power: Some(lift::horsepower(160.0)),
//!         rated_prop_speed: Some(lift::rpm(2700.0)),
//!         dropoff: None,
//!     },
//!     drag_test: Some(DragTest {
//!         weight: lift::pounds_force(2200.0),
//!         pressure_altitude: lift::feet(5000.0),
//!         oat: Some(lift::fahrenheit(41.0)),
//!         altitude_loss: lift::feet(200.0),
//!         elapsed: lift::seconds(17.0),
//!         cas_best_glide: lift::knots(70.0),
//!     }),
//!     thrust_test: Some(ThrustTest {
//!         weight: lift::pounds_force(2200.0),
//!         pressure_altitude: lift::feet(5000.0),
//!         oat: Some(lift::fahrenheit(41.0)),
//!         cas_best_angle: lift::knots(60.5),
//!         cas_max_level: lift::knots(105.0),
//!     }),
//!     overrides: Default::default(),
//!     options: Default::default(),
//! };
//!
//! let plate = aircraft.data_plate()?;
//! let point = OperatingPoint::standard(lift::pounds_force(2300.0), lift::feet(4000.0));
//! let speeds = VSpeeds::at(&plate, &point);
//! assert!(speeds.vy.is_some());
//! # Ok::<(), bootstrap_calc::BootstrapError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::doc_markdown)]
#![allow(clippy::inconsistent_struct_constructor)]

pub mod atmosphere;
pub mod composites;
pub mod error;
pub mod performance;
pub mod plate;
pub mod units;
pub mod vspeeds;

pub use composites::{Composites, OperatingPoint};
pub use error::BootstrapError;
pub use performance::{Airspeed, Performance};
pub use plate::{
    Aircraft, AircraftOptions, Airframe, DataPlate, DragTest, PlateOverrides, ThrustTest,
};
pub use units::{CalibrationCurve, VelocityUnit};
pub use vspeeds::{absolute_ceiling, VSpeeds};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod util;
mod types;
mod terms;
mod dynamics;

pub use dynamics::{step_flight, step_flight_dbg, update_flight_stat};
pub use types::{FlightInputs, FlightOutputs, FlightState, FlightStepDebug, PoseReset};

pub mod config;
pub mod logging;

pub mod clock;
pub mod eta;
pub mod progress;

pub use clock::{Clock, ManualClock, SystemClock};
pub use eta::{EstimatedTimer, EstimatedTimerOptions, EtaError, OutOfBoundsFormat};
pub use progress::Progress;

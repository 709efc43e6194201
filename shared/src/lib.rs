pub mod api;
pub mod coordinator;
pub mod error;
pub mod hazard;
pub mod normalize;
pub mod projection;
pub mod status;
pub mod validate;

pub use coordinator::{
    MarkerSurface, RequestCoordinator, RequestPhase, RequestToken, Resolution, Settled, settle,
};
pub use error::PredictionError;
pub use hazard::*;
pub use projection::{BarColor, DashboardTint, DashboardView, VisualBarState};
pub use status::{ServerStatus, StatusMonitor};

use crate::HealthRes;

/// Simple health service for the REST API
///
/// This service provides a standardised way to check the health status of the intake system.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Intake is alive".into(),
        }
    }
}

use crate::dto::HealthRes;

/// Simple health service for the DiaLens API.
///
/// Provides a standardised way to check that the service is up. Model loading happens
/// before the server binds, so a responding server always has both models available.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "DiaLens is alive".into(),
        }
    }
}

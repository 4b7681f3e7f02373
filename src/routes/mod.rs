/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules.
/// This structure ensures that access control is applied explicitly at the module
/// level (via Axum layers), preventing accidental exposure of protected endpoints.

/// Routes accessible to all users (anonymous, read-only) plus the health probe.
pub mod public;

/// Mutating routes protected by the `AuthUser` extractor middleware.
/// Requires a validated user session.
pub mod authenticated;

/// Database access layer
///
/// Thin repositories over sqlx; one module per table. Country and owner
/// scoping arrives here as optional filters already derived from the
/// principal, so queries stay ignorant of roles.
pub mod orders;
pub mod payments;
pub mod restaurants;
pub mod users;

/// Route handlers for the notes service
///
/// - `health`: liveness endpoint
/// - `notes`: CRUD over the caller's own notes
pub mod health;
pub mod notes;

/// Database models for Notevault
///
/// # Models
///
/// - `user`: accounts held by the auth service; the persistence collaborator
///   behind credential lookup at login
/// - `note`: notes held by the notes service, owned by a username
///
/// The credential core never touches these directly; handlers look up a
/// credential or a note and then call into `auth` with plain values.
pub mod note;
pub mod user;

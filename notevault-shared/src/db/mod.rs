/// Database access for Notevault
///
/// - `pool`: PostgreSQL connection pool construction and health checks
pub mod pool;

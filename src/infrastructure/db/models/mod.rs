pub mod attendance;
pub mod auth;
pub mod leave;
pub mod notifications;
pub mod organization;
pub mod users;

/// Parse a TEXT enum column into its domain type
pub(crate) fn parse_column<T>(column: &str, value: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e: String| anyhow::anyhow!("Invalid value in column {}: {}", column, e))
}

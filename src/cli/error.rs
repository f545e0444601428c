//! User-facing error reporting

/// Render a failure as `error: <message>: <cause>...`
pub fn format_error(error: &anyhow::Error) -> String {
    format!("error: {:#}", error)
}

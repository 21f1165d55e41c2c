use crate::error::IngestError;

pub fn get_exit_code(error: &IngestError) -> i32 {
    match error {
        IngestError::InvalidConfig(_)
        | IngestError::ConfigError(_)
        | IngestError::Config(_)
        | IngestError::InvalidCatalog { .. } => 2,

        IngestError::FeedUnavailable { .. } => 20,

        IngestError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => 13,

        _ => 1,
    }
}

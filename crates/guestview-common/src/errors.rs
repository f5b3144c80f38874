use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GuestViewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("channels.ipc_message is empty".into());
        assert_eq!(
            err.to_string(),
            "config validation error: channels.ipc_message is empty"
        );
    }

    #[test]
    fn guestview_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: GuestViewError = config_err.into();
        assert!(matches!(err, GuestViewError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn guestview_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: GuestViewError = io_err.into();
        assert!(matches!(err, GuestViewError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn guestview_error_other_variants() {
        let err = GuestViewError::Scenario("unknown guest 'tab-9'".into());
        assert_eq!(err.to_string(), "scenario error: unknown guest 'tab-9'");

        let err = GuestViewError::Other("something else".into());
        assert_eq!(err.to_string(), "something else");
    }
}

//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::AlreadyExists(_) => crate::exitcode::CANTCREAT,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_) | ApplicationError::Input(_) => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } if app.is_not_found() => {
                        crate::exitcode::NOINPUT
                    }
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::InputError;
    use crate::domain::DomainError;

    #[test]
    fn given_bad_input_when_mapping_then_data_error() {
        let err = CliError::from(ApplicationError::Input(InputError::Empty));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);

        let err = CliError::from(ApplicationError::Domain(DomainError::UnreachableValue {
            position: 3,
            value: 9,
        }));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_missing_file_when_mapping_then_no_input() {
        let err = CliError::from(ApplicationError::OperationFailed {
            context: "read input: nope".to_string(),
            source: Box::new(std::io::Error::from(std::io::ErrorKind::NotFound)),
        });
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);

        let err = CliError::from(ApplicationError::OperationFailed {
            context: "read stdin".to_string(),
            source: Box::new(std::io::Error::from(std::io::ErrorKind::InvalidData)),
        });
        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
    }

    #[test]
    fn given_config_error_when_mapping_then_config_code() {
        let err = CliError::from(ApplicationError::Config {
            message: "bad".to_string(),
        });
        assert_eq!(err.exit_code(), crate::exitcode::CONFIG);
    }

    #[test]
    fn given_existing_config_when_mapping_then_cannot_create() {
        let err = CliError::Infra(InfraError::AlreadyExists("bstsum.toml".into()));
        assert_eq!(err.exit_code(), crate::exitcode::CANTCREAT);
    }

    #[test]
    fn given_deep_tree_render_when_mapping_then_data_error() {
        let err = CliError::from(ApplicationError::Domain(DomainError::TooDeepToRender {
            depth: 2_000,
            limit: 1_000,
        }));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }
}

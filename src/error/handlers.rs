//! Error handlers
//!
//! Maps errors to shell response codes and logs them.

use crate::error::types::{FsError, RegistryError, ShellError};
use crate::protocol::responses;
use log::{error, warn};

/// Log a shell error at a level matching its severity
pub fn handle_error(err: &ShellError) {
    match err {
        ShellError::Fs(FsError::Internal(_)) | ShellError::Io(_) | ShellError::Config(_) => {
            error!("Shell error: {}", err)
        }
        _ => warn!("Shell error: {}", err),
    }
}

/// Convert a tree engine error to a response code
pub fn fs_error_code(err: &FsError) -> u16 {
    match err {
        FsError::PathNotFound(_) => responses::PATH_NOT_FOUND,
        FsError::PathAlreadyExists(_) => responses::PATH_EXISTS,
        FsError::PermissionDenied(_) => responses::PERMISSION_DENIED,
        FsError::InvalidOperation(_) => responses::INVALID_OPERATION,
        FsError::UnknownUser(_) => responses::REGISTRY_ERROR,
        FsError::Internal(_) => responses::INTERNAL_ERROR,
    }
}

/// Convert a registry error to a response code
pub fn registry_error_code(err: &RegistryError) -> u16 {
    match err {
        RegistryError::HomeCreation(e) => fs_error_code(e),
        _ => responses::REGISTRY_ERROR,
    }
}

/// Convert any shell error to a response code
pub fn error_code(err: &ShellError) -> u16 {
    match err {
        ShellError::Fs(e) => fs_error_code(e),
        ShellError::Registry(e) => registry_error_code(e),
        ShellError::Load(_) | ShellError::Config(_) | ShellError::Io(_) => {
            responses::INTERNAL_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_error_codes() {
        assert_eq!(fs_error_code(&FsError::PathNotFound("/a".into())), 550);
        assert_eq!(fs_error_code(&FsError::PathAlreadyExists("/a".into())), 450);
        assert_eq!(fs_error_code(&FsError::PermissionDenied("/a".into())), 530);
        assert_eq!(fs_error_code(&FsError::InvalidOperation("/a".into())), 553);
        assert_eq!(fs_error_code(&FsError::Internal("x".into())), 451);
    }

    #[test]
    fn test_registry_error_codes() {
        assert_eq!(
            registry_error_code(&RegistryError::ProtectedUser("root".into())),
            551
        );
        assert_eq!(
            registry_error_code(&RegistryError::HomeCreation(FsError::InvalidOperation(
                "/f".into()
            ))),
            553
        );
    }
}

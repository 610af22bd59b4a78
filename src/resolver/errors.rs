//! Resolution error types and diagnostics.
//!
//! Only shim and placeholder writes can fail resolution. Missing and
//! ambiguous targets are not errors; they become diagnostic shims and
//! report entries.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal error while materializing shims.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to create shim directory: {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write shim: {}", path.display())]
    WriteShim {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write placeholder icon: {}", path.display())]
    WriteIcon {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    /// The path the failed operation targeted.
    pub fn path(&self) -> &PathBuf {
        match self {
            ResolveError::CreateDir { path, .. }
            | ResolveError::WriteShim { path, .. }
            | ResolveError::WriteIcon { path, .. } => path,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, source) = match self {
            ResolveError::CreateDir { source, .. } => ("could not create shim directory", source),
            ResolveError::WriteShim { source, .. } => ("could not write shim", source),
            ResolveError::WriteIcon { source, .. } => ("could not write placeholder icon", source),
        };

        Diagnostic::error(message)
            .with_location(self.path().clone())
            .with_context(source.to_string())
            .with_suggestion(suggestions::WRITABLE)
            .with_suggestion(suggestions::NO_SHIMS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_diagnostic() {
        let err = ResolveError::WriteShim {
            path: PathBuf::from("Scripts/IfeelLikeSnow/DF95/x.lua"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(err.to_string().contains("Scripts/IfeelLikeSnow/DF95/x.lua"));

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error: could not write shim"));
        assert!(output.contains("--> Scripts/IfeelLikeSnow/DF95/x.lua"));
        assert!(output.contains("denied"));
        assert!(output.contains("--no-shims"));
    }
}

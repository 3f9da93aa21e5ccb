use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("workspace has no local path")]
    NoLocalPath,
    #[error("workspace is not open")]
    NotOpen,
    #[error("no such reference `{refname}`")]
    NoSuchReference {
        refname: String,
    },
    #[error("Libgit2Error: {0}")]
    Libgit2Error(#[from] git2::Error),
    #[error("StdIoError: {0}")]
    StdIoError(#[from] std::io::Error),
}

impl WorkspaceError {
    /// Render the text of a warning event, with `context` describing
    /// the operation that failed.
    pub fn warning(&self, context: &str) -> String {
        match self {
            Self::Libgit2Error(e) => format!(
                "{context} Error {}: {}.",
                e.raw_class(),
                format_message(e.message()),
            ),
            e => format!("{context} {}.", format_message(&e.to_string())),
        }
    }
}

/// Lower case the leading character (unless it starts an acronym) and
/// drop trailing periods so the message can be embedded in a sentence.
pub(crate) fn format_message(message: &str) -> String {
    let message = message.trim().trim_end_matches('.');
    let mut chars = message.chars();
    match (chars.next(), chars.next()) {
        (Some(_), Some(second)) if second.is_uppercase() => message.to_string(),
        (Some(first), _) => first.to_lowercase()
            .chain(message.chars().skip(1))
            .collect(),
        (None, _) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("Failed to resolve path."), "failed to resolve path");
        assert_eq!(format_message("SSL error"), "SSL error");
        assert_eq!(format_message("a"), "a");
        assert_eq!(format_message(""), "");
    }

    #[test]
    fn test_warning_libgit2() {
        let e = WorkspaceError::from(git2::Error::new(
            git2::ErrorCode::NotFound,
            git2::ErrorClass::Reference,
            "Reference 'refs/heads/master' not found.",
        ));
        assert_eq!(
            e.warning("An error occurred while trying to push the workspace."),
            "An error occurred while trying to push the workspace. \
             Error 4: reference 'refs/heads/master' not found.",
        );
    }

    #[test]
    fn test_warning_other() {
        assert_eq!(
            WorkspaceError::NoSuchReference {
                refname: "refs/remotes/origin/master".to_string(),
            }.warning("Could not get status."),
            "Could not get status. no such reference `refs/remotes/origin/master`.",
        );
    }
}

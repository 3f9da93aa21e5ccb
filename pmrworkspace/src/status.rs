use git2::Status;
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

/// Relationship between the local branch and its remote-tracking
/// counterpart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum RemoteStatus {
    #[default]
    Unknown,
    Current,
    Ahead,
    Behind,
    /// Uncommitted changes in the working tree or index; not yet
    /// produced by the resolver.
    Commit,
}

/// The index and working tree codes of a single path, in the style of
/// `git status --short`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileStatus {
    pub index: char,
    pub worktree: char,
}

impl RemoteStatus {
    /// Being behind takes precedence over being ahead, as a diverged
    /// branch needs to be brought up to date before it can be pushed.
    pub fn from_ahead_behind(ahead: usize, behind: usize) -> Self {
        if behind > 0 {
            Self::Behind
        } else if ahead > 0 {
            Self::Ahead
        } else {
            Self::Current
        }
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Current => "current",
            Self::Ahead => "ahead",
            Self::Behind => "behind",
            Self::Commit => "commit",
        })
    }
}

impl FileStatus {
    pub const UNMODIFIED: char = ' ';
    pub const ADDED: char = 'A';
    pub const MODIFIED: char = 'M';
    pub const DELETED: char = 'D';
    pub const RENAMED: char = 'R';
    pub const TYPE_CHANGED: char = 'T';
    pub const UNTRACKED: char = '?';
    pub const IGNORED: char = '!';

    pub fn new(index: char, worktree: char) -> Self {
        Self { index, worktree }
    }

    pub fn is_unmodified(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for FileStatus {
    fn default() -> Self {
        Self::new(Self::UNMODIFIED, Self::UNMODIFIED)
    }
}

// Within each side the checks run in a fixed order and the last match
// wins; untracked and ignored then override.
impl From<Status> for FileStatus {
    fn from(flags: Status) -> Self {
        let mut index = Self::UNMODIFIED;
        let mut worktree = Self::UNMODIFIED;

        for (flag, code) in [
            (Status::INDEX_NEW, Self::ADDED),
            (Status::INDEX_MODIFIED, Self::MODIFIED),
            (Status::INDEX_DELETED, Self::DELETED),
            (Status::INDEX_RENAMED, Self::RENAMED),
            (Status::INDEX_TYPECHANGE, Self::TYPE_CHANGED),
        ] {
            if flags.contains(flag) {
                index = code;
            }
        }
        if flags.contains(Status::WT_NEW) {
            if index == Self::UNMODIFIED {
                index = Self::UNTRACKED;
            }
            worktree = Self::UNTRACKED;
        }
        for (flag, code) in [
            (Status::WT_MODIFIED, Self::MODIFIED),
            (Status::WT_DELETED, Self::DELETED),
            (Status::WT_RENAMED, Self::RENAMED),
            (Status::WT_TYPECHANGE, Self::TYPE_CHANGED),
        ] {
            if flags.contains(flag) {
                worktree = code;
            }
        }
        if flags.contains(Status::IGNORED) {
            index = Self::IGNORED;
            worktree = Self::IGNORED;
        }

        Self { index, worktree }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.index, self.worktree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_status_from_ahead_behind() {
        assert_eq!(RemoteStatus::from_ahead_behind(0, 0), RemoteStatus::Current);
        assert_eq!(RemoteStatus::from_ahead_behind(0, 3), RemoteStatus::Behind);
        assert_eq!(RemoteStatus::from_ahead_behind(4, 0), RemoteStatus::Ahead);
        // diverged
        assert_eq!(RemoteStatus::from_ahead_behind(2, 1), RemoteStatus::Behind);
    }

    #[test]
    fn test_file_status_single_flags() {
        assert_eq!(FileStatus::from(Status::CURRENT), FileStatus::new(' ', ' '));
        assert_eq!(FileStatus::from(Status::INDEX_NEW), FileStatus::new('A', ' '));
        assert_eq!(FileStatus::from(Status::INDEX_DELETED), FileStatus::new('D', ' '));
        assert_eq!(FileStatus::from(Status::INDEX_RENAMED), FileStatus::new('R', ' '));
        assert_eq!(FileStatus::from(Status::INDEX_TYPECHANGE), FileStatus::new('T', ' '));
        assert_eq!(FileStatus::from(Status::WT_NEW), FileStatus::new('?', '?'));
        assert_eq!(FileStatus::from(Status::WT_MODIFIED), FileStatus::new(' ', 'M'));
        assert_eq!(FileStatus::from(Status::WT_DELETED), FileStatus::new(' ', 'D'));
        assert_eq!(FileStatus::from(Status::WT_RENAMED), FileStatus::new(' ', 'R'));
        assert_eq!(FileStatus::from(Status::WT_TYPECHANGE), FileStatus::new(' ', 'T'));
        assert_eq!(FileStatus::from(Status::IGNORED), FileStatus::new('!', '!'));
    }

    #[test]
    fn test_file_status_combined_flags() {
        assert_eq!(
            FileStatus::from(Status::INDEX_MODIFIED | Status::WT_MODIFIED),
            FileStatus::new('M', 'M'),
        );
        // an added file that was subsequently deleted from the work tree
        assert_eq!(
            FileStatus::from(Status::INDEX_NEW | Status::WT_DELETED),
            FileStatus::new('A', 'D'),
        );
        // an index entry keeps its code when the work tree has a new file
        assert_eq!(
            FileStatus::from(Status::INDEX_DELETED | Status::WT_NEW),
            FileStatus::new('D', '?'),
        );
        // ignored overrides everything
        assert_eq!(
            FileStatus::from(Status::INDEX_NEW | Status::WT_MODIFIED | Status::IGNORED),
            FileStatus::new('!', '!'),
        );
    }

    #[test]
    fn test_file_status_check_order_precedence() {
        // last match in the fixed check order wins on each side
        assert_eq!(
            FileStatus::from(Status::INDEX_NEW | Status::INDEX_MODIFIED),
            FileStatus::new('M', ' '),
        );
        assert_eq!(
            FileStatus::from(Status::INDEX_MODIFIED | Status::INDEX_RENAMED),
            FileStatus::new('R', ' '),
        );
        assert_eq!(
            FileStatus::from(Status::WT_NEW | Status::WT_MODIFIED),
            FileStatus::new('?', 'M'),
        );
        assert_eq!(
            FileStatus::from(Status::WT_MODIFIED | Status::WT_TYPECHANGE),
            FileStatus::new(' ', 'T'),
        );
    }

    #[test]
    fn test_file_status_display() {
        assert_eq!(FileStatus::default().to_string(), "  ");
        assert_eq!(FileStatus::new('A', 'M').to_string(), "AM");
        assert!(FileStatus::default().is_unmodified());
        assert!(!FileStatus::new('?', '?').is_unmodified());
    }
}

use std::cmp::Ordering;

use crate::tracked_folder::TrackedFolder;

/// Sort criteria for the tracked folder listing. Whatever the criterion,
/// git repositories always come before plain folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Name,
    ModifiedDate,
    Changes,
}

impl SortOrder {
    pub(crate) fn compare(self, left: &TrackedFolder, right: &TrackedFolder) -> Ordering {
        if let Some(precedence) = git_precedence(left, right) {
            return precedence;
        }

        match self {
            SortOrder::Name => left.name().cmp(right.name()),
            // Most recently modified first; unknown dates last.
            SortOrder::ModifiedDate => right.modified_date().cmp(&left.modified_date()),
            SortOrder::Changes => right.changes().cmp(&left.changes()),
        }
    }
}

fn git_precedence(left: &TrackedFolder, right: &TrackedFolder) -> Option<Ordering> {
    match (left.is_git(), right.is_git()) {
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
        _ => None,
    }
}

// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delete confirmation capability.

use readlist_core::EntryId;

/// Asks the user whether an entry may be deleted.
///
/// Implemented for `bool` (a decision already made) and for closures, so an
/// interactive prompt and a `--yes` flag plug in the same way.
pub trait Confirm {
    fn confirm(&self, id: EntryId) -> bool;
}

impl Confirm for bool {
    fn confirm(&self, _id: EntryId) -> bool {
        *self
    }
}

impl<F> Confirm for F
where
    F: Fn(EntryId) -> bool,
{
    fn confirm(&self, id: EntryId) -> bool {
        self(id)
    }
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Confirmation was declined; no request was sent.
    Declined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_confirms_itself() {
        assert!(true.confirm(EntryId(1)));
        assert!(!false.confirm(EntryId(1)));
    }

    #[test]
    fn closure_sees_the_entry_id() {
        let only_three = |id: EntryId| id == EntryId(3);
        assert!(only_three.confirm(EntryId(3)));
        assert!(!only_three.confirm(EntryId(4)));
    }
}

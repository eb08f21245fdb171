use crate::model::types::Error;

/// Where the owner lands after deleting a poll.
pub const POLL_LIST_PATH: &str = "/polls";

/// Open/pending state of a confirmation dialog guarding a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteDialog {
    open: bool,
    pending: bool,
}

impl DeleteDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// A running delete cannot be aborted, so closing is ignored while pending.
    pub fn close(&mut self) {
        if !self.pending {
            self.open = false;
        }
    }

    /// Returns true when the confirmation should start the delete.
    pub fn confirm(&mut self) -> bool {
        if !self.open || self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Closes on success; stays open on failure so the user can try again.
    pub fn finish(&mut self, result: &Result<(), Error>) {
        self.pending = false;
        if result.is_ok() {
            self.open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_only_when_open() {
        let mut dialog = DeleteDialog::default();
        assert!(!dialog.confirm());
        dialog.open();
        assert!(dialog.confirm());
        assert!(dialog.is_pending());
        assert!(!dialog.confirm());
    }

    #[test]
    fn success_closes_dialog() {
        let mut dialog = DeleteDialog::default();
        dialog.open();
        dialog.confirm();
        dialog.close();
        assert!(dialog.is_open());
        dialog.finish(&Ok(()));
        assert!(!dialog.is_open());
        assert!(!dialog.is_pending());
    }

    #[test]
    fn failure_keeps_dialog_open() {
        let mut dialog = DeleteDialog::default();
        dialog.open();
        dialog.confirm();
        dialog.finish(&Err(Error::Database("locked".into())));
        assert!(dialog.is_open());
        assert!(!dialog.is_pending());
        assert!(dialog.confirm());
    }

    #[test]
    fn cancel_closes_when_idle() {
        let mut dialog = DeleteDialog::default();
        dialog.open();
        dialog.close();
        assert!(!dialog.is_open());
    }
}

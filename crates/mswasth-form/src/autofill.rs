//! Single-flight guard for document extraction
//!
//! At most one extraction may be outstanding per form. Each request gets a
//! ticket; only the most recently issued ticket may apply its result, so a
//! slow response can never overwrite the result of a newer request.

/// Handle for one extraction request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutofillTicket(u64);

impl AutofillTicket {
    /// Sequence number of the request
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What happened to an extraction result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutofillOutcome {
    /// Merged into the form
    Applied,
    /// Discarded; a newer request superseded it
    Stale,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AutofillGuard {
    issued: u64,
    outstanding: Option<u64>,
}

impl AutofillGuard {
    pub(crate) fn begin(&mut self) -> Option<AutofillTicket> {
        if self.outstanding.is_some() {
            return None;
        }
        self.issued += 1;
        self.outstanding = Some(self.issued);
        Some(AutofillTicket(self.issued))
    }

    /// Close the request; true when the ticket was the outstanding one
    pub(crate) fn settle(&mut self, ticket: AutofillTicket) -> bool {
        if self.outstanding == Some(ticket.0) {
            self.outstanding = None;
            true
        } else {
            false
        }
    }

    /// Forget the outstanding request; its result will arrive as stale
    pub(crate) fn cancel(&mut self) {
        self.outstanding = None;
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.outstanding.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_refused_while_busy() {
        let mut guard = AutofillGuard::default();
        let first = guard.begin().unwrap();
        assert!(guard.begin().is_none());
        assert!(guard.settle(first));
        assert!(guard.begin().is_some());
    }

    #[test]
    fn settled_ticket_cannot_settle_again() {
        let mut guard = AutofillGuard::default();
        let first = guard.begin().unwrap();
        assert!(guard.settle(first));
        let second = guard.begin().unwrap();
        assert!(!guard.settle(first));
        assert!(guard.settle(second));
        assert!(second.sequence() > first.sequence());
    }

    #[test]
    fn cancelled_request_settles_as_stale() {
        let mut guard = AutofillGuard::default();
        let first = guard.begin().unwrap();
        guard.cancel();
        let second = guard.begin().unwrap();
        assert!(!guard.settle(first));
        assert!(guard.is_busy());
        assert!(guard.settle(second));
    }
}

//! Request sequencing for last-issued-wins response handling.

/// Identifies one issued request for a single target.
///
/// Tickets are only comparable with tickets from the same [`Sequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic request counter for one target (a slot, or a result list).
///
/// Every new request takes a fresh ticket; a response may only be applied
/// while its ticket is still the latest one issued.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    latest: u64,
}

impl Sequencer {
    /// Issue a new ticket, superseding every earlier one.
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// Whether `ticket` is still the most recently issued one.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// In-flight tracking for image fetches.
///
/// Latest wins: starting a fetch supersedes whatever was outstanding, and a
/// completion whose ticket is no longer current must not touch the UI.

/// Identifies one fetch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct InFlight {
    issued: u64,
    outstanding: Option<u64>,
}

impl InFlight {
    /// Issue a ticket for a new fetch, superseding any outstanding one.
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        self.outstanding = Some(self.issued);
        FetchTicket(self.issued)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.outstanding == Some(ticket.0)
    }

    /// Retire `ticket`. Returns `false` if it had been superseded.
    pub fn finish(&mut self, ticket: FetchTicket) -> bool {
        if self.is_current(ticket) {
            self.outstanding = None;
            true
        } else {
            false
        }
    }
}

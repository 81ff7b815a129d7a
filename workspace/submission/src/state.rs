use std::cell::Cell;

/// Where the controller is in the submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

/// Tracks requests in flight.
///
/// Submissions are not queued or blocked; each one takes a ticket and the
/// controller reads `Submitting` until every ticket has been dropped.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    in_flight: Cell<usize>,
    issued: Cell<u64>,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Submitting` for one request.
    pub fn begin(&self) -> SubmissionTicket<'_> {
        let id = self.issued.get() + 1;
        self.issued.set(id);
        self.in_flight.set(self.in_flight.get() + 1);
        SubmissionTicket { tracker: self, id }
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.get() == 0 {
            Phase::Idle
        } else {
            Phase::Submitting
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// Number of submissions started so far.
    pub fn issued(&self) -> u64 {
        self.issued.get()
    }
}

/// One in-flight submission. Settles on drop, whatever the outcome.
#[derive(Debug)]
pub struct SubmissionTicket<'a> {
    tracker: &'a SubmissionTracker,
    id: u64,
}

impl SubmissionTicket<'_> {
    /// Sequence number, starting at 1.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for SubmissionTicket<'_> {
    fn drop(&mut self) {
        let in_flight = self.tracker.in_flight.get();
        self.tracker.in_flight.set(in_flight.saturating_sub(1));
    }
}

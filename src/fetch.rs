use std::fmt::Display;

/// Identifies one request issued by a screen. Only the most recently issued
/// ticket may settle the screen's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Applied,
    Stale,
}

/// Per-screen fetch lifecycle: `Loading` until the awaited request settles,
/// then `Loaded` or `Failed` until the next `begin`.
#[derive(Debug)]
pub struct FetchSlot<T> {
    state: FetchState<T>,
    generation: u64,
    awaiting: Option<Ticket>,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Loading,
            generation: 0,
            awaiting: None,
        }
    }
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn awaiting(&self) -> Option<Ticket> {
        self.awaiting
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match &self.state {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.awaiting = Some(ticket);
        self.state = FetchState::Loading;
        ticket
    }

    /// Applies `result` if `ticket` is the request this slot is waiting for.
    /// Failures are replaced by `failure_message`; the error itself is never
    /// stored.
    pub fn settle<E: Display>(
        &mut self,
        ticket: Ticket,
        result: Result<T, E>,
        failure_message: &str,
    ) -> Settled {
        if self.awaiting != Some(ticket) {
            return Settled::Stale;
        }
        self.awaiting = None;
        self.state = match result {
            Ok(data) => FetchState::Loaded(data),
            Err(_) => FetchState::Failed(failure_message.to_string()),
        };
        Settled::Applied
    }

    pub fn reject(&mut self, message: &str) {
        self.generation += 1;
        self.awaiting = None;
        self.state = FetchState::Failed(message.to_string());
    }

    /// Stops accepting responses and forgets any data, as on unmount.
    pub fn close(&mut self) {
        self.awaiting = None;
        self.state = FetchState::Loading;
    }
}

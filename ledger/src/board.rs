//! Administrator board: requests split into "actionable" and "processed".

use crate::models::VacationRequest;
use crate::types::VacationRequestId;

/// Where a request landed after [`RequestBoard::apply_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Actionable,
    Processed,
    /// Cancelled, expired or otherwise not shown on the board.
    Hidden,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBoard {
    actionable: Vec<VacationRequest>,
    processed: Vec<VacationRequest>,
}

impl RequestBoard {
    pub fn from_requests(requests: impl IntoIterator<Item = VacationRequest>) -> Self {
        let mut board = Self::default();
        board.replace_all(requests);
        board
    }

    /// Authoritative resync with a freshly fetched list.
    pub fn replace_all(&mut self, requests: impl IntoIterator<Item = VacationRequest>) {
        self.actionable.clear();
        self.processed.clear();
        for request in requests {
            match placement_of(&request) {
                Placement::Actionable => self.actionable.push(request),
                Placement::Processed => self.processed.push(request),
                Placement::Hidden => {}
            }
        }
    }

    pub fn actionable(&self) -> &[VacationRequest] {
        &self.actionable
    }

    pub fn processed(&self) -> &[VacationRequest] {
        &self.processed
    }

    pub fn is_empty(&self) -> bool {
        self.actionable.is_empty() && self.processed.is_empty()
    }

    pub fn find(&self, id: VacationRequestId) -> Option<&VacationRequest> {
        self.actionable
            .iter()
            .chain(self.processed.iter())
            .find(|request| request.id == id)
    }

    /// Moves an updated request into the partition its status belongs to.
    ///
    /// Applying the same update twice leaves the board unchanged.
    pub fn apply_update(&mut self, updated: VacationRequest) -> Placement {
        let id = updated.id;
        self.actionable.retain(|request| request.id != id);
        let placement = placement_of(&updated);
        match placement {
            Placement::Processed => {
                if let Some(existing) = self.processed.iter_mut().find(|r| r.id == id) {
                    *existing = updated;
                } else {
                    self.processed.insert(0, updated);
                }
            }
            Placement::Actionable => {
                self.processed.retain(|request| request.id != id);
                self.actionable.push(updated);
            }
            Placement::Hidden => {
                self.processed.retain(|request| request.id != id);
            }
        }
        placement
    }
}

fn placement_of(request: &VacationRequest) -> Placement {
    if request.status.is_awaiting_decision() {
        Placement::Actionable
    } else if request.status.is_processed() {
        Placement::Processed
    } else {
        Placement::Hidden
    }
}

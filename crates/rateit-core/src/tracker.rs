use rateit_catalog::CancelToken;

#[derive(Debug)]
struct ActiveRequest {
    generation: u64,
    token: CancelToken,
}

/// Generation counter plus the cancel token of the one live request of a stream.
///
/// Starting a request cancels the previous one. A completion is only accepted
/// if it carries the live generation.
#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
    active: Option<ActiveRequest>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede any live request and hand out the next generation.
    pub fn begin(&mut self) -> (u64, CancelToken) {
        self.cancel();
        self.generation += 1;
        let token = CancelToken::new();
        self.active = Some(ActiveRequest {
            generation: self.generation,
            token: token.clone(),
        });
        (self.generation, token)
    }

    /// Cancel the live request, returning its generation.
    pub fn cancel(&mut self) -> Option<u64> {
        self.active.take().map(|active| {
            active.token.cancel();
            active.generation
        })
    }

    pub fn is_active(&self, generation: u64) -> bool {
        self.active.as_ref().map(|a| a.generation) == Some(generation)
    }

    /// Retire `generation` if it is the live one. `false` means the completion is stale.
    pub fn complete(&mut self, generation: u64) -> bool {
        if !self.is_active(generation) {
            return false;
        }
        self.active = None;
        true
    }

    pub fn in_flight(&self) -> bool {
        self.active.is_some()
    }

}

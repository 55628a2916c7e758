//! Workflow stages, used for logging and error context

/// Position of the orchestrator in its linear state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Authenticating,
    Listing,
    Fetching,
    Detecting,
    Composing,
    Inserting,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Authenticating => "authenticating",
            Stage::Listing => "listing",
            Stage::Fetching => "fetching",
            Stage::Detecting => "detecting",
            Stage::Composing => "composing",
            Stage::Inserting => "inserting",
            Stage::Done => "done",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

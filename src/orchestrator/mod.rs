pub mod machine;
pub mod state;

pub use machine::{Action, Orchestrator, Trigger};
pub use state::{
    can_detect, can_translate, pair_availability, phase, FailureKind, Notice, PairVerdict, Phase,
    SelectionError, SessionState, Support,
};

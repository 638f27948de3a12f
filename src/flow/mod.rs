// Selection Flow
// Explicit state machine that owns and mutates the slot selection

pub mod machine;

pub use machine::{
    guided_order, FlowError, FlowOutcome, FlowResult, FlowState, SelectionFlow, GUIDED_STEPS,
};

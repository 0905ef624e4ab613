/// Refinement driver and its state machine
pub mod executor;
/// Max-error priority queue over live leaves
pub mod queue;

pub mod chain;
pub mod context;

pub use chain::{
    dispatch, execute, reconcile, run, run_with_env, RunReport, Silent, Step, StepObserver,
    ToolOutcome,
};

//! Application services for tag reconciliation and task lifecycle
//! orchestration.

mod lifecycle;
mod reconciler;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
pub use reconciler::{ReconcileError, ReconcileResult, TagReconciler, TaggingOutcome};

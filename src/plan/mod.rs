//! Plan module: the training-plan model, ordering and derived metrics.

pub mod confirm;
pub mod drag;
pub mod graph;
pub mod item;
pub mod library;
pub mod ordering;
pub mod phase;
pub mod selection;
pub mod snapshot;
pub mod store;
pub mod summary;
pub mod types;

pub use confirm::{AlwaysConfirm, ConfirmRequest, Confirmer, FixedName, Namer, NeverConfirm, SuggestedName};
pub use drag::DropAction;
pub use graph::{graph_bars, GraphBar, SeriesSlot};
pub use item::{Collection, ExpandedPhase, Group, Part, PlanItem, Series};
pub use phase::{Phase, PhaseAmount, PhaseInput};
pub use selection::{Clipboard, Selection};
pub use snapshot::{parse_snapshot, ExampleSet, ExampleTraining, ImportPayload, Snapshot};
pub use store::{PartUpdate, PlanStore, SeriesUpdate};
pub use summary::{compute_summary, PlanSummary};
pub use types::{DesignMode, EntityKind, PhaseKind, PlanError, PlanResult, SnapshotError, ValidationError};

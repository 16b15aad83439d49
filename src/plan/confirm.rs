//! Injected confirmation and naming callbacks.
//!
//! The plan store never prompts on its own. Destructive operations ask a
//! [`Confirmer`]; group creation from a selection asks a [`Namer`].

/// What the store is about to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRequest {
    DeletePart { name: String },
    DeleteGroup { name: String },
    DeleteSelected { count: usize },
    /// Loading replaces a non-empty plan
    ReplacePlan,
}

impl std::fmt::Display for ConfirmRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmRequest::DeletePart { name } => write!(f, "Delete \"{}\"?", name),
            ConfirmRequest::DeleteGroup { name } => {
                write!(f, "Delete group \"{}\"? Its parts stay in the plan.", name)
            }
            ConfirmRequest::DeleteSelected { count } => write!(f, "Delete {} selected items?", count),
            ConfirmRequest::ReplacePlan => write!(f, "Replace the current plan?"),
        }
    }
}

/// Synchronous yes/no decision.
pub trait Confirmer {
    fn confirm(&mut self, request: &ConfirmRequest) -> bool;
}

/// Supplies a group name, or `None` to cancel.
pub trait Namer {
    fn name_group(&mut self, suggested: &str) -> Option<String>;
}

/// Accepts every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&mut self, _request: &ConfirmRequest) -> bool {
        true
    }
}

/// Declines every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirmer for NeverConfirm {
    fn confirm(&mut self, _request: &ConfirmRequest) -> bool {
        false
    }
}

/// Always answers with the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedName(pub String);

impl Namer for FixedName {
    fn name_group(&mut self, _suggested: &str) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Accepts the suggested name unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestedName;

impl Namer for SuggestedName {
    fn name_group(&mut self, suggested: &str) -> Option<String> {
        Some(suggested.to_string())
    }
}

impl<F> Confirmer for F
where
    F: FnMut(&ConfirmRequest) -> bool,
{
    fn confirm(&mut self, request: &ConfirmRequest) -> bool {
        self(request)
    }
}

impl<F> Namer for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn name_group(&mut self, suggested: &str) -> Option<String> {
        self(suggested)
    }
}

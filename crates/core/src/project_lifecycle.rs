//! Project status transitions.
//!
//! ```text
//! available --request--> requested --approve--> construction
//!     ^                      |
//!     +-------reject---------+
//! ```
//!
//! Nothing ever leaves `construction`.

use crate::error::CoreError;
use crate::status::ProjectStatus;

/// Display name given to the chat created when construction starts and no
/// specialist has been assigned yet.
pub const DEFAULT_SPECIALIST_NAME: &str = "Your specialist";

/// Client asks to build the project.
///
/// Repeating the request while it is pending is allowed and changes nothing.
pub fn request(current: ProjectStatus) -> Result<ProjectStatus, CoreError> {
    match current {
        ProjectStatus::Available | ProjectStatus::Requested => Ok(ProjectStatus::Requested),
        ProjectStatus::Construction => Err(CoreError::transition(
            "Construction has already started for this project",
        )),
    }
}

/// Admin accepts a pending construction request.
pub fn approve(current: ProjectStatus) -> Result<ProjectStatus, CoreError> {
    match current {
        ProjectStatus::Requested => Ok(ProjectStatus::Construction),
        _ => Err(not_requested()),
    }
}

/// Admin declines a pending construction request; the project is offered again.
pub fn reject(current: ProjectStatus) -> Result<ProjectStatus, CoreError> {
    match current {
        ProjectStatus::Requested => Ok(ProjectStatus::Available),
        _ => Err(not_requested()),
    }
}

/// Validate an explicit status change (admin edit form).
///
/// Same edges as the named operations; setting the current status again is a
/// no-op.
pub fn check_transition(from: ProjectStatus, to: ProjectStatus) -> Result<(), CoreError> {
    if from == to {
        return Ok(());
    }
    match (from, to) {
        (ProjectStatus::Available, ProjectStatus::Requested)
        | (ProjectStatus::Requested, ProjectStatus::Construction)
        | (ProjectStatus::Requested, ProjectStatus::Available) => Ok(()),
        (ProjectStatus::Construction, _) => Err(CoreError::transition(
            "Cannot move a project back from construction",
        )),
        _ => Err(CoreError::transition(format!(
            "Cannot move a project from {from} to {to}"
        ))),
    }
}

/// Whether moving `from` -> `to` starts construction, i.e. needs a site and a
/// specialist chat.
pub fn starts_construction(from: ProjectStatus, to: ProjectStatus) -> bool {
    from != ProjectStatus::Construction && to == ProjectStatus::Construction
}

fn not_requested() -> CoreError {
    CoreError::transition("Project is not in requested status")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    use ProjectStatus::*;

    #[test]
    fn request_moves_available_to_requested() {
        assert_eq!(request(Available).unwrap(), Requested);
    }

    #[test]
    fn request_is_repeatable_while_pending() {
        assert_eq!(request(Requested).unwrap(), Requested);
    }

    #[test]
    fn request_fails_during_construction() {
        assert_matches!(request(Construction), Err(CoreError::InvalidTransition(_)));
    }

    #[test]
    fn approve_only_from_requested() {
        assert_eq!(approve(Requested).unwrap(), Construction);
        assert_matches!(approve(Available), Err(CoreError::InvalidTransition(_)));
        assert_matches!(approve(Construction), Err(CoreError::InvalidTransition(_)));
    }

    #[test]
    fn second_approve_is_refused() {
        let next = approve(Requested).unwrap();
        assert!(approve(next).is_err());
    }

    #[test]
    fn reject_returns_to_available() {
        assert_eq!(reject(Requested).unwrap(), Available);
        assert!(reject(Available).is_err());
        assert!(reject(Construction).is_err());
    }

    #[test]
    fn explicit_transitions_follow_the_same_edges() {
        assert!(check_transition(Available, Requested).is_ok());
        assert!(check_transition(Requested, Construction).is_ok());
        assert!(check_transition(Requested, Available).is_ok());
        assert!(check_transition(Construction, Construction).is_ok());
        assert!(check_transition(Available, Construction).is_err());
    }

    #[test]
    fn nothing_leaves_construction() {
        for to in [Available, Requested] {
            let err = check_transition(Construction, to).unwrap_err();
            assert_matches!(err, CoreError::InvalidTransition(msg) if msg.contains("back from construction"));
        }
    }

    #[test]
    fn starts_construction_only_on_entry() {
        assert!(starts_construction(Requested, Construction));
        assert!(!starts_construction(Construction, Construction));
        assert!(!starts_construction(Available, Requested));
    }
}

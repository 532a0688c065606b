//! Role-based authorization gate.
//!
//! One declarative table maps (resource, action) to the roles allowed to
//! perform it; a single predicate consumes it. Handlers opt in through the
//! `Require<P>` extractor, which runs before the body is read so a forbidden
//! caller gets 403 regardless of payload validity.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Projects,
    Tasks,
    Team,
    Documents,
    Clients,
    Inventory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

const ADMINS: &[Role] = &[Role::SuperAdmin, Role::CompanyAdmin];
const ADMINS_AND_SUPERVISORS: &[Role] = &[Role::SuperAdmin, Role::CompanyAdmin, Role::Supervisor];

/// `None` means any authenticated identity may perform the action.
///
/// Task mutations carry no role restriction, unlike projects and team
/// members. That asymmetry is inherited behavior, kept on purpose; see
/// DESIGN.md before "fixing" it.
pub fn allowed_roles(resource: Resource, action: Action) -> Option<&'static [Role]> {
    match (resource, action) {
        (Resource::Projects, Action::Update) => Some(ADMINS_AND_SUPERVISORS),
        (Resource::Projects, _) => Some(ADMINS),

        (Resource::Tasks, _) => None,

        (Resource::Team, Action::Update) => None,
        (Resource::Team, _) => Some(ADMINS),

        (
            Resource::Documents | Resource::Clients | Resource::Inventory,
            Action::Update,
        ) => None,
        (Resource::Documents | Resource::Clients | Resource::Inventory, _) => Some(ADMINS),
    }
}

/// The gate itself: pure predicate over the caller's role.
pub fn authorize(role: Role, resource: Resource, action: Action) -> Result<(), ApiError> {
    match allowed_roles(resource, action) {
        Some(roles) if !roles.contains(&role) => Err(ApiError::forbidden(
            "You do not have permission to perform this action",
        )),
        _ => Ok(()),
    }
}

/// A statically declared permission, implemented by marker types below.
pub trait Permission: Send + Sync + 'static {
    const RESOURCE: Resource;
    const ACTION: Action;
}

/// Extractor form of the gate. Place it before the body extractor in a
/// handler signature so the role check precedes payload parsing.
pub struct Require<P: Permission>(PhantomData<P>);

#[async_trait]
impl<P, S> FromRequestParts<S> for Require<P>
where
    P: Permission,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthUser>()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        authorize(user.role, P::RESOURCE, P::ACTION)?;
        Ok(Require(PhantomData))
    }
}

macro_rules! permission {
    ($name:ident, $resource:expr, $action:expr) => {
        pub struct $name;
        impl Permission for $name {
            const RESOURCE: Resource = $resource;
            const ACTION: Action = $action;
        }
    };
}

permission!(ProjectCreate, Resource::Projects, Action::Create);
permission!(ProjectUpdate, Resource::Projects, Action::Update);
permission!(ProjectDelete, Resource::Projects, Action::Delete);
permission!(TeamCreate, Resource::Team, Action::Create);
permission!(TeamDelete, Resource::Team, Action::Delete);
permission!(DocumentCreate, Resource::Documents, Action::Create);
permission!(DocumentDelete, Resource::Documents, Action::Delete);
permission!(ClientCreate, Resource::Clients, Action::Create);
permission!(ClientDelete, Resource::Clients, Action::Delete);
permission!(InventoryCreate, Resource::Inventory, Action::Create);
permission!(InventoryDelete, Resource::Inventory, Action::Delete);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operatives_cannot_mutate_projects_or_team() {
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert!(authorize(Role::Operative, Resource::Projects, action).is_err());
        }
        assert!(authorize(Role::Operative, Resource::Team, Action::Create).is_err());
        assert!(authorize(Role::Operative, Resource::Team, Action::Delete).is_err());
    }

    #[test]
    fn admins_can_mutate_everything() {
        for resource in [
            Resource::Projects,
            Resource::Tasks,
            Resource::Team,
            Resource::Documents,
            Resource::Clients,
            Resource::Inventory,
        ] {
            for action in [Action::Create, Action::Update, Action::Delete] {
                assert!(authorize(Role::CompanyAdmin, resource, action).is_ok());
                assert!(authorize(Role::SuperAdmin, resource, action).is_ok());
            }
        }
    }

    #[test]
    fn supervisors_update_projects_but_cannot_create_or_delete_them() {
        assert!(authorize(Role::Supervisor, Resource::Projects, Action::Update).is_ok());
        assert!(authorize(Role::Supervisor, Resource::Projects, Action::Create).is_err());
        assert!(authorize(Role::Supervisor, Resource::Projects, Action::Delete).is_err());
    }

    #[test]
    fn task_mutations_require_no_role() {
        for role in [
            Role::SuperAdmin,
            Role::CompanyAdmin,
            Role::Supervisor,
            Role::Operative,
        ] {
            for action in [Action::Create, Action::Update, Action::Delete] {
                assert!(authorize(role, Resource::Tasks, action).is_ok());
            }
        }
    }

    #[test]
    fn team_updates_are_open_to_any_identity() {
        assert!(authorize(Role::Operative, Resource::Team, Action::Update).is_ok());
    }
}

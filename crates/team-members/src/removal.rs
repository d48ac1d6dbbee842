//! Member removal orchestration
//!
//! A removal is authorized against the caller's own membership, then carried
//! out as a sequence of independent effects: role revocation through the
//! gateway, deletion of the membership row, and release of the owner's seat.
//! The sequence is not atomic. Each effect runs only if the previous one
//! succeeded, and the seat step never fails the removal.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use team_org::ids::parse_optional_uid;
use team_org::{can_manage, JoinStatus, MembershipRow, SeatKey};
use team_rbac::{RoleMutation, RoleMutationGateway};
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::config::{RemovalConfig, DEFAULT_REMOVAL_TIMEOUT_SECS, MAX_REMOVAL_TIMEOUT_SECS};
use crate::error::{RemovalError, RemovalResult};
use crate::seats::{release_seat, SeatAdjustment, SeatStore};
use crate::store::MembershipStore;

/// Command to remove one user from a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveMember {
    /// Regional user UUID of the caller
    pub actor: Uuid,
    /// Workspace UUID
    pub workspace_uid: Uuid,
    /// Regional user UUID of the user to remove
    pub target: Uuid,
}

impl RemoveMember {
    /// Creates a removal command.
    pub fn new(actor: Uuid, workspace_uid: Uuid, target: Uuid) -> Self {
        Self {
            actor,
            workspace_uid,
            target,
        }
    }

    /// Build a command from raw request identifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use team_members::{RemovalError, RemoveMember};
    /// use uuid::Uuid;
    ///
    /// let actor = Uuid::new_v4();
    /// let result = RemoveMember::parse(actor, Some("not-a-uuid"), None);
    /// assert!(matches!(result, Err(RemovalError::InvalidInput { field: "ns_uid" })));
    /// ```
    pub fn parse(actor: Uuid, ns_uid: Option<&str>, target_user_cr_uid: Option<&str>) -> RemovalResult<Self> {
        let workspace_uid =
            parse_optional_uid(ns_uid).ok_or(RemovalError::InvalidInput { field: "ns_uid" })?;
        let target = parse_optional_uid(target_user_cr_uid).ok_or(RemovalError::InvalidInput {
            field: "targetUserCrUid",
        })?;

        Ok(Self::new(actor, workspace_uid, target))
    }

    /// Whether the caller is removing themself.
    pub fn is_self_removal(&self) -> bool {
        self.actor == self.target
    }
}

/// Result of a completed removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalOutcome {
    /// Workspace UUID
    pub workspace_uid: Uuid,

    /// Regional user UUID of the removed user
    pub target: Uuid,

    /// Status the membership had before removal
    pub previous_status: JoinStatus,

    /// What happened to the owner's seat count
    pub seat: SeatAdjustment,
}

/// Removes members from workspaces.
///
/// Holds the region it serves and its collaborators; cheap to clone.
#[derive(Clone)]
pub struct MemberRemover {
    members: Arc<dyn MembershipStore>,
    seats: Arc<dyn SeatStore>,
    roles: Arc<dyn RoleMutationGateway>,
    region_uid: Uuid,
    timeout: Duration,
}

impl std::fmt::Debug for MemberRemover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberRemover")
            .field("region_uid", &self.region_uid)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl MemberRemover {
    /// Creates a remover for the given region.
    pub fn new(
        members: Arc<dyn MembershipStore>,
        seats: Arc<dyn SeatStore>,
        roles: Arc<dyn RoleMutationGateway>,
        region_uid: Uuid,
    ) -> Self {
        Self {
            members,
            seats,
            roles,
            region_uid,
            timeout: Duration::from_secs(DEFAULT_REMOVAL_TIMEOUT_SECS),
        }
    }

    /// Creates a remover from configuration.
    pub fn from_config(
        config: &RemovalConfig,
        members: Arc<dyn MembershipStore>,
        seats: Arc<dyn SeatStore>,
        roles: Arc<dyn RoleMutationGateway>,
    ) -> Self {
        Self::new(members, seats, roles, config.region_uid).with_timeout(config.timeout())
    }

    /// Set the end-to-end removal timeout.
    ///
    /// Timeouts above [`MAX_REMOVAL_TIMEOUT_SECS`] are clamped.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.min(Duration::from_secs(MAX_REMOVAL_TIMEOUT_SECS));
        self
    }

    /// Region this remover accounts seats in.
    pub fn region_uid(&self) -> Uuid {
        self.region_uid
    }

    /// End-to-end removal timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Remove a member, bounded by the configured timeout.
    pub async fn remove_member(&self, cmd: RemoveMember) -> RemovalResult<RemovalOutcome> {
        let deadline = Instant::now()
            .checked_add(self.timeout)
            .ok_or(RemovalError::DeadlineExceeded)?;
        self.remove_member_until(cmd, deadline).await
    }

    /// Remove a member, bounded by a caller deadline.
    ///
    /// Effects already applied when the deadline passes are kept.
    pub async fn remove_member_until(&self, cmd: RemoveMember, deadline: Instant) -> RemovalResult<RemovalOutcome> {
        match tokio::time::timeout_at(deadline, self.run(cmd)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    workspace_uid = %cmd.workspace_uid,
                    target = %cmd.target,
                    "Removal deadline exceeded"
                );
                Err(RemovalError::DeadlineExceeded)
            }
        }
    }

    #[instrument(
        skip(self, cmd),
        fields(workspace_uid = %cmd.workspace_uid, actor = %cmd.actor, target = %cmd.target)
    )]
    async fn run(&self, cmd: RemoveMember) -> RemovalResult<RemovalOutcome> {
        let mut user_cr_uids = vec![cmd.actor];
        if !cmd.is_self_removal() {
            user_cr_uids.push(cmd.target);
        }

        let rows = self
            .members
            .find_members(cmd.workspace_uid, &user_cr_uids, true)
            .await
            .map_err(RemovalError::MembershipLoadFailed)?;

        let actor = find_row(&rows, cmd.actor)
            .filter(|row| row.status.is_active())
            .ok_or(RemovalError::ActorNotMember)?;

        if cmd.is_self_removal() && actor.is_owner() {
            return Err(RemovalError::CannotRemoveSelfAsOwner);
        }

        let target = find_row(&rows, cmd.target).ok_or(RemovalError::TargetNotMember)?;

        if !can_manage(actor.role, target.role, cmd.is_self_removal()) {
            debug!(actor_role = %actor.role, target_role = %target.role, "Actor cannot manage target");
            return Err(RemovalError::InsufficientPrivilege);
        }

        let seat = match target.status {
            JoinStatus::Invited => {
                self.delete_membership(&cmd).await?;
                SeatAdjustment::NotApplicable
            }
            JoinStatus::InWorkspace => self.remove_active(&cmd, target, &rows).await?,
            JoinStatus::NotInWorkspace => return Err(RemovalError::TargetNotMember),
        };

        info!(
            previous_status = target.status.as_str(),
            role = %target.role,
            seat = ?seat,
            "Member removed"
        );

        Ok(RemovalOutcome {
            workspace_uid: cmd.workspace_uid,
            target: cmd.target,
            previous_status: target.status,
            seat,
        })
    }

    async fn remove_active(
        &self,
        cmd: &RemoveMember,
        target: &MembershipRow,
        rows: &[MembershipRow],
    ) -> RemovalResult<SeatAdjustment> {
        let owner = rows.iter().find(|row| row.is_owner()).ok_or_else(|| {
            error!(workspace_uid = %cmd.workspace_uid, "No owner found in workspace");
            RemovalError::NoOwnerFound
        })?;

        let mutation = RoleMutation::revoke_membership(target);
        self.roles
            .mutate_role(&mutation)
            .await
            .map_err(RemovalError::RoleMutationFailed)?;
        debug!(principal = %mutation.principal, "Role binding revoked");

        self.delete_membership(cmd).await.map_err(|e| {
            error!(
                error = %e,
                principal = %mutation.principal,
                "Membership row kept after its role binding was revoked"
            );
            e
        })?;

        let key = SeatKey::new(self.region_uid, owner.user.user_uid, cmd.workspace_uid);
        let seat = match release_seat(&*self.seats, key).await {
            Ok(adjustment) => adjustment,
            Err(e) => {
                error!(error = %e, seat_key = %key, "Seat release failed; membership already removed");
                SeatAdjustment::Failed { reason: e.to_string() }
            }
        };

        Ok(seat)
    }

    async fn delete_membership(&self, cmd: &RemoveMember) -> RemovalResult<()> {
        self.members
            .delete_member(cmd.workspace_uid, cmd.target)
            .await
            .map_err(RemovalError::MembershipDeleteFailed)
    }
}

fn find_row(rows: &[MembershipRow], user_cr_uid: Uuid) -> Option<&MembershipRow> {
    rows.iter().find(|row| row.user_cr_uid() == user_cr_uid)
}

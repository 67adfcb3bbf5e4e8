use std::fmt::Display;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Identity,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessReason {
    Ok,
    Forbidden,
    Unauthorized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessDecision {
    pub allow: bool,
    pub reason: AccessReason,
}

impl AccessDecision {
    fn allowed() -> Self {
        Self {
            allow: true,
            reason: AccessReason::Ok,
        }
    }

    fn denied(reason: AccessReason) -> Self {
        Self { allow: false, reason }
    }

    /// Turns a denial into the error the caller reports, using
    /// `forbidden_message` for ownership/admin failures.
    pub fn require(self, forbidden_message: &str) -> AppResult<()> {
        match self.reason {
            AccessReason::Ok => Ok(()),
            AccessReason::Forbidden => Err(AppError::Forbidden(forbidden_message.to_string())),
            AccessReason::Unauthorized => Err(AppError::Unauthorized("Unauthorized".to_string())),
        }
    }
}

pub fn is_admin(identity: &Identity) -> bool {
    identity.admin
}

/// Compares two ids as integers. Either side failing to parse is an
/// `InvalidId`, which callers surface as "does not exist".
pub fn is_same_user(caller_id: impl Display, target_id: impl Display) -> AppResult<bool> {
    Ok(parse_id(caller_id)? == parse_id(target_id)?)
}

/// The one access rule shared by users, questions and scores: admins may do
/// anything, everyone else only what they own, unless the operation is
/// admin-only.
pub fn authorize(caller: &Identity, owner_id: impl Display, admin_only: bool) -> AppResult<AccessDecision> {
    if !caller.active {
        return Ok(AccessDecision::denied(AccessReason::Unauthorized));
    }
    if is_admin(caller) {
        return Ok(AccessDecision::allowed());
    }
    if admin_only {
        return Ok(AccessDecision::denied(AccessReason::Forbidden));
    }
    if is_same_user(caller.id, owner_id)? {
        Ok(AccessDecision::allowed())
    } else {
        Ok(AccessDecision::denied(AccessReason::Forbidden))
    }
}

pub fn require_admin(caller: &Identity, message: &str) -> AppResult<()> {
    authorize(caller, caller.id, true)?.require(message)
}

pub fn require_owner_or_admin(caller: &Identity, owner_id: i64, message: &str) -> AppResult<()> {
    authorize(caller, owner_id, false)?.require(message)
}

fn parse_id(raw: impl Display) -> AppResult<i64> {
    let raw = raw.to_string();
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidId(format!("'{}' is not a valid id", raw)))
}

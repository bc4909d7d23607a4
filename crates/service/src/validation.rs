//! Candidate checks shared by insert and update.
//!
//! A candidate is rejected when one of its fields is falsy (empty string,
//! `null`, `0`, NaN) or when its `code` already belongs to a stored product.
//! Updates check only the fields the patch carries.

use models::{NewProduct, Product, ProductPatch};

use crate::errors::ServiceError;

/// Knobs for the two inherited edge cases of candidate validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Treat `0` price/stock as missing.
    pub reject_zero_numbers: bool,
    /// Let an update keep the record's own `code` without tripping the duplicate check.
    pub exclude_self_on_update: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self { reject_zero_numbers: true, exclude_self_on_update: false }
    }
}

pub fn check_new(
    candidate: &NewProduct,
    existing: &[Product],
    policy: &ValidationPolicy,
) -> Result<(), ServiceError> {
    if let Some(field) = candidate.first_falsy(policy.reject_zero_numbers) {
        return Err(ServiceError::MissingField(field));
    }
    match candidate.code.as_deref() {
        Some(code) => ensure_unique_code(code, existing, None),
        None => Ok(()),
    }
}

/// Validates the patch as supplied, not the merged record: a patch without
/// `code` skips the duplicate scan entirely.
pub fn check_patch(
    patch: &ProductPatch,
    target_id: u64,
    existing: &[Product],
    policy: &ValidationPolicy,
) -> Result<(), ServiceError> {
    if let Some(field) = patch.first_falsy(policy.reject_zero_numbers) {
        return Err(ServiceError::MissingField(field));
    }
    match patch.code() {
        Some(code) => {
            let skip = policy.exclude_self_on_update.then_some(target_id);
            ensure_unique_code(code, existing, skip)
        }
        None => Ok(()),
    }
}

fn ensure_unique_code(code: &str, existing: &[Product], skip: Option<u64>) -> Result<(), ServiceError> {
    let taken = existing.iter().any(|p| p.code == code && Some(p.id) != skip);
    if taken {
        return Err(ServiceError::DuplicateCode(code.to_string()));
    }
    Ok(())
}

/// `last.id + 1`, or `1` for an empty collection. A last id of `u64::MAX`
/// leaves nothing to hand out.
pub fn next_id(existing: &[Product]) -> Result<u64, ServiceError> {
    match existing.last() {
        None => Ok(1),
        Some(last) => last.id.checked_add(1).ok_or(ServiceError::IdExhausted(last.id)),
    }
}

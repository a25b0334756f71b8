use chrono::{DateTime, Utc};
use uuid::Uuid;

use contracts::domain::{Cart, OrderDraft, OrderWindow, PeriodCode};

use crate::api::ApiClient;
use crate::error::ClientError;

/// Period a new order belongs to: the active window's code when one exists,
/// otherwise the computed week-of-month fallback.
pub fn resolve_period(active: Option<&OrderWindow>, now: DateTime<Utc>) -> PeriodCode {
    active
        .and_then(|w| w.period_code())
        .unwrap_or_else(|| PeriodCode::compute_current(now))
}

/// Assemble a draft from the form state, rejecting incomplete input before
/// anything goes over the wire.
pub fn build_draft(
    member_id: Option<Uuid>,
    cart: &Cart,
    period_code: PeriodCode,
) -> Result<OrderDraft, ClientError> {
    if cart.is_empty() {
        return Err(ClientError::Validation("Please add items to order".into()));
    }
    let member_id =
        member_id.ok_or_else(|| ClientError::Validation("Please select a member".into()))?;
    Ok(OrderDraft {
        member_id,
        period_code,
        cart: cart.clone(),
    })
}

/// Validate and submit. On success the caller clears its cart; on failure
/// local state is untouched and the user can retry.
pub async fn submit(api: &ApiClient, draft: &OrderDraft) -> Result<(), ClientError> {
    draft.validate().map_err(ClientError::Validation)?;
    api.submit_order(&draft.to_payload()).await?;
    tracing::info!(
        "order submitted for member {} ({} items, period {})",
        draft.member_id,
        draft.cart.total_qty(),
        draft.period_code.label()
    );
    Ok(())
}

use cosmwasm_schema::cw_serde;

/// Lifecycle of a randomness request.
///
/// `Expired` is never stored: it is reported for a `Pending` request whose
/// deadline plus the expiry window has passed.
#[cw_serde]
pub enum RequestState {
    None,
    Pending,
    Fulfilled,
    Failed,
    Cancelled,
    Expired,
}

impl RequestState {
    /// Fulfilled, Failed and Cancelled admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Fulfilled | RequestState::Failed | RequestState::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::None => "none",
            RequestState::Pending => "pending",
            RequestState::Fulfilled => "fulfilled",
            RequestState::Failed => "failed",
            RequestState::Cancelled => "cancelled",
            RequestState::Expired => "expired",
        }
    }
}

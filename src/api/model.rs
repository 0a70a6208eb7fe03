use serde::Deserialize;
use serde::Serialize;

/// A subscription record as returned by the server.
///
/// `user_id`, `is_active` and `created_at` are server bookkeeping that the
/// list endpoint includes in every record; the client carries them through
/// without interpreting them.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Subscription {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub name: String,
    pub amount: f64,
    /// Billing recurrence code, "monthly" or "yearly" on a well-behaved
    /// server. Unknown codes are kept verbatim.
    pub interval: String,
    /// ISO `YYYY-MM-DD`, or null.
    #[serde(default)]
    pub next_billing_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Write payload for create and update requests.
///
/// A non-finite `amount` serializes as JSON null, which the server rejects
/// with a field-level validation message.
#[derive(Clone, Debug, Serialize)]
pub struct SubscriptionDraft {
    pub name: String,
    pub amount: f64,
    pub interval: String,
    pub next_billing_date: String,
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub subscriptions: Vec<Subscription>,
}

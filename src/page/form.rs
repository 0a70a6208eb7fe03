use crate::api::model::Subscription;
use crate::api::model::SubscriptionDraft;

/// Raw form field values, kept as entered.
///
/// `id` mirrors the hidden id input: empty string means the submission
/// creates a new record, anything else updates that record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub interval: String,
    pub next_billing_date: String,
}

impl FormFields {
    /// Blank form for the create path.
    pub fn blank() -> Self {
        Self {
            interval: "monthly".to_string(),
            ..Default::default()
        }
    }

    /// Form pre-populated from a fetched record, for the edit path.
    pub fn from_subscription(sub: &Subscription) -> Self {
        Self {
            id: sub.id.to_string(),
            name: sub.name.clone(),
            amount: sub.amount.to_string(),
            interval: sub.interval.clone(),
            next_billing_date: sub.next_billing_date.clone().unwrap_or_default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        !self.id.is_empty()
    }

    /// Builds the request payload: trimmed name, amount parsed as a float.
    /// An unparseable amount becomes NaN, which serializes as null and is
    /// rejected by the server's own validation.
    pub fn to_draft(&self) -> SubscriptionDraft {
        SubscriptionDraft {
            name: self.name.trim().to_string(),
            amount: self.amount.trim().parse::<f64>().unwrap_or(f64::NAN),
            interval: self.interval.clone(),
            next_billing_date: self.next_billing_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_form_is_create_path() {
        let form = FormFields::blank();
        assert!(!form.is_edit());
        assert_eq!(form.interval, "monthly");
    }

    #[test]
    fn test_from_subscription_sets_id() {
        let sub = Subscription {
            id: 42,
            name: "Кинопоиск".to_string(),
            amount: 269.0,
            interval: "monthly".to_string(),
            next_billing_date: Some("2026-09-15".to_string()),
            ..Default::default()
        };

        let form = FormFields::from_subscription(&sub);
        assert!(form.is_edit());
        assert_eq!(form.id, "42");
        assert_eq!(form.amount, "269");
        assert_eq!(form.next_billing_date, "2026-09-15");
    }

    #[test]
    fn test_to_draft_trims_name_and_parses_amount() {
        let form = FormFields {
            name: "  Netflix  ".to_string(),
            amount: " 9.99 ".to_string(),
            interval: "monthly".to_string(),
            ..Default::default()
        };

        let draft = form.to_draft();
        assert_eq!(draft.name, "Netflix");
        assert_eq!(draft.amount, 9.99);
    }

    #[test]
    fn test_to_draft_unparseable_amount_becomes_nan() {
        let form = FormFields {
            amount: "девять".to_string(),
            ..Default::default()
        };

        assert!(form.to_draft().amount.is_nan());
    }
}

use rand::Rng;
use serde::Serialize;

use crate::domain::owner::model::Owner;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub sent: bool,
    pub message: String,
}

/// Decides the reminder outcome for `owner` given whether they can be reached.
pub fn reminder_decision(owner: &Owner, available: bool) -> Reminder {
    if available {
        Reminder {
            sent: true,
            message: format!("Sending reminder to: {} {}", owner.first_name, owner.last_name),
        }
    } else {
        Reminder {
            sent: false,
            message: "Owner not available for reminder.".to_string(),
        }
    }
}

/// Availability is a fair coin drawn from the caller's generator.
pub fn send_owner_reminder<R: Rng>(owner: &Owner, rng: &mut R) -> Reminder {
    let reminder = reminder_decision(owner, rng.random_bool(0.5));
    tracing::info!(sent = reminder.sent, "{}", reminder.message);
    reminder
}

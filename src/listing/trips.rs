//! Trip display helpers
//!
//! The trip tables show the operator's display name from the expanded
//! `username` relation instead of the bare record id.

use crate::remote::records::TripRecord;

/// Shown when a trip's operator relation was not expanded or is empty
pub const UNKNOWN_OPERATOR: &str = "Unknown User";

/// Operator display name: name, falling back to email, then a placeholder
pub fn operator_name(trip: &TripRecord) -> String {
    let operator = trip
        .expand
        .as_ref()
        .and_then(|expand| expand.username.as_ref());
    match operator {
        Some(user) if !user.name.is_empty() => user.name.clone(),
        Some(user) if !user.email.is_empty() => user.email.clone(),
        _ => UNKNOWN_OPERATOR.to_string(),
    }
}

//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between a date picker in the browser
//! and the calendar channel of a property.

use crate::web::dto::{DisabledDatesResponse, SelectedRangeDto};
use chrono::NaiveDate;
use rental_core::selection::{SelectionEvent, SelectionOutcome};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A tentative check-in/check-out selection. Either end may still be missing.
    SelectRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },

    /// Drops the current selection.
    ClearSelection,

    /// Asks the server to reload the property's bookings and re-check the selection.
    Refresh,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The days the picker must disable. Sent on connect and after every refresh.
    DisabledDates { index: DisabledDatesResponse },

    /// The selection was stored as sent.
    SelectionAccepted { range: SelectedRangeDto },

    /// The selection touched a disabled day and has been reset to empty.
    SelectionRejected {
        attempted: SelectedRangeDto,
        notice: String,
    },

    /// Reports a failure; the client should show the message.
    Error { message: String },
}

impl From<SelectionOutcome> for ServerMessage {
    fn from(outcome: SelectionOutcome) -> Self {
        match outcome {
            SelectionOutcome::Accepted(range) => ServerMessage::SelectionAccepted {
                range: range.into(),
            },
            SelectionOutcome::Rejected { attempted } => ServerMessage::SelectionRejected {
                attempted: attempted.into(),
                notice: outcome.notice().unwrap_or_default().to_string(),
            },
        }
    }
}

impl From<&SelectionEvent> for ServerMessage {
    fn from(event: &SelectionEvent) -> Self {
        event.outcome.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_core::{availability::SelectedRange, selection::UNAVAILABLE_NOTICE};
    use serde_json::json;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, m, d).unwrap()
    }

    #[test]
    fn parses_client_messages() {
        let msg: ClientMessage = serde_json::from_value(json!({
            "type": "select_range",
            "from": "2030-05-10",
            "to": null
        }))
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::SelectRange {
                from: Some(day(5, 10)),
                to: None
            }
        );

        let msg: ClientMessage = serde_json::from_value(json!({ "type": "refresh" })).unwrap();
        assert_eq!(msg, ClientMessage::Refresh);
    }

    #[test]
    fn rejected_outcome_carries_notice() {
        let attempted = SelectedRange::new(day(5, 12), day(5, 14));
        let msg = ServerMessage::from(SelectionOutcome::Rejected { attempted });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "selection_rejected");
        assert_eq!(value["notice"], UNAVAILABLE_NOTICE);
        assert_eq!(value["attempted"]["from"], "2030-05-12");
    }
}

//! services/api/src/web/calendar_ws.rs
//!
//! The live calendar of a property. Each connection owns one `SelectionWatcher`
//! and pushes its changes back to the date picker.

use crate::web::{
    availability::load_disabled_dates,
    protocol::{ClientMessage, ServerMessage},
    state::AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{stream::StreamExt, SinkExt};
use rental_core::{availability::SelectedRange, selection::SelectionWatcher};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Upgrades to the calendar channel of a property.
pub async fn calendar_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state, property_id))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>, property_id: Uuid) {
    info!("Calendar connection opened for property {}", property_id);

    let (mut ws_sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    // Single writer; everything else goes through `tx`.
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize calendar message: {}", e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                debug!("Calendar client went away while sending.");
                break;
            }
        }
    });

    // --- 1. Initial calendar ---
    let index = match load_disabled_dates(&app_state, property_id).await {
        Ok(index) => index,
        Err(e) => {
            error!("Failed to load calendar for property {}: {:?}", property_id, e);
            let _ = tx.send(ServerMessage::Error {
                message: "Failed to load property calendar.".to_string(),
            });
            drop(tx);
            let _ = writer.await;
            return;
        }
    };
    push(&tx, ServerMessage::DisabledDates { index: (&index).into() });

    let mut watcher = SelectionWatcher::new(index);
    {
        let tx = tx.clone();
        watcher.subscribe(move |event| push(&tx, event.into()));
    }

    // --- 2. Main Message Loop ---
    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                handle_text_message(&text, &app_state, property_id, &mut watcher, &tx).await;
            }
            Ok(Message::Close(_)) => {
                info!("Calendar client sent close message.");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Calendar socket error: {}", e);
                break;
            }
        }
    }

    // --- 3. Cleanup ---
    drop(watcher);
    drop(tx);
    if let Err(e) = writer.await {
        error!("Calendar writer task failed: {:?}", e);
    }
    info!("Calendar connection closed for property {}", property_id);
}

async fn handle_text_message(
    text: &str,
    app_state: &AppState,
    property_id: Uuid,
    watcher: &mut SelectionWatcher,
    tx: &UnboundedSender<ServerMessage>,
) {
    let client_msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Failed to deserialize calendar message: {}", e);
            push(
                tx,
                ServerMessage::Error {
                    message: "Unrecognized message.".to_string(),
                },
            );
            return;
        }
    };

    match client_msg {
        ClientMessage::SelectRange { from, to } => {
            let range = SelectedRange { from, to };
            apply_selection(watcher, range, tx);
        }
        ClientMessage::ClearSelection => {
            apply_selection(watcher, SelectedRange::default(), tx);
        }
        ClientMessage::Refresh => match load_disabled_dates(app_state, property_id).await {
            Ok(index) => {
                push(tx, ServerMessage::DisabledDates { index: (&index).into() });
                let outcome = watcher.refresh(index);
                if !outcome.is_valid() {
                    info!(
                        "Selection on property {} invalidated by new bookings",
                        property_id
                    );
                }
            }
            Err(e) => {
                error!("Failed to refresh calendar for property {}: {:?}", property_id, e);
                push(
                    tx,
                    ServerMessage::Error {
                        message: "Failed to refresh property calendar.".to_string(),
                    },
                );
            }
        },
    }
}

/// Feeds a selection through the watcher. Unchanged valid selections do not
/// reach the listeners, so they are acknowledged here.
fn apply_selection(watcher: &mut SelectionWatcher, range: SelectedRange, tx: &UnboundedSender<ServerMessage>) {
    let unchanged = watcher.current() == range;
    let outcome = watcher.select(range);
    if unchanged && outcome.is_valid() {
        push(tx, outcome.into());
    }
}

fn push(tx: &UnboundedSender<ServerMessage>, msg: ServerMessage) {
    if tx.send(msg).is_err() {
        debug!("Calendar writer already stopped; dropping message.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rental_core::availability::{compute_blocked_periods, expand_to_disabled_date_index};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, d).unwrap()
    }

    fn watcher_with_channel() -> (SelectionWatcher, UnboundedSender<ServerMessage>, mpsc::UnboundedReceiver<ServerMessage>) {
        let index = expand_to_disabled_date_index(&compute_blocked_periods(&[], day(1)));
        let mut watcher = SelectionWatcher::new(index);
        let (tx, rx) = mpsc::unbounded_channel();
        let listener_tx = tx.clone();
        watcher.subscribe(move |event| push(&listener_tx, event.into()));
        (watcher, tx, rx)
    }

    #[test]
    fn every_selection_gets_exactly_one_reply() {
        let (mut watcher, tx, mut rx) = watcher_with_channel();
        let range = SelectedRange::new(day(10), day(12));

        apply_selection(&mut watcher, range, &tx);
        apply_selection(&mut watcher, range, &tx);

        for _ in 0..2 {
            assert_eq!(
                rx.try_recv().unwrap(),
                ServerMessage::SelectionAccepted { range: range.into() }
            );
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn past_selection_is_rejected_and_cleared() {
        let (mut watcher, tx, mut rx) = watcher_with_channel();
        let range = SelectedRange::new(NaiveDate::from_ymd_opt(2030, 4, 28).unwrap(), day(2));

        apply_selection(&mut watcher, range, &tx);

        assert!(matches!(
            rx.try_recv().unwrap(),
            ServerMessage::SelectionRejected { attempted, .. } if attempted == range.into()
        ));
        assert!(watcher.current().is_empty());
    }
}

//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::state::{AppState, WorldEvent};
use super::responses::{
    ChatRequest, ChatResponse, DisplayResponse, HealthResponse, JoinRequest, PlayerResponse,
    StatusResponse,
};

/// Handle POST /chat - Run a chat line through the command dispatcher
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    let mut session = state.session().map_err(|e| {
        error!("Failed to handle chat from {}: {}", request.player, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let replies = session.on_chat(&request.player, request.op, &request.message);
    if replies.is_some() {
        debug!("Chat from {} handled as command", request.player);
    }
    Ok(Json(ChatResponse::new(replies)))
}

/// Handle POST /players - Mark a player online
pub async fn join_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JoinRequest>,
) -> Result<Json<PlayerResponse>, StatusCode> {
    let mut session = state.session().map_err(|e| {
        error!("Failed to register {}: {}", request.name, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let player = session.world_mut().join(&request.name, request.op).clone();
    info!("Player {} joined (op={})", player.name, player.op);
    Ok(Json(PlayerResponse::new(player)))
}

/// Handle DELETE /players/:name - Mark a player offline
pub async fn leave_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<PlayerResponse>, StatusCode> {
    let mut session = state.session().map_err(|e| {
        error!("Failed to unregister {}: {}", name, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match session.world_mut().leave(&name) {
        Some(player) => {
            info!("Player {} left", name);
            Ok(Json(PlayerResponse::new(player)))
        }
        None => {
            warn!("Leave for unknown player {}", name);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Handle GET /players/:name/display - Current countdown label for a player
pub async fn display_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<DisplayResponse>, StatusCode> {
    let session = state.session().map_err(|e| {
        error!("Failed to read display for {}: {}", name, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match session.world().player(&name) {
        Some(player) => Ok(Json(DisplayResponse {
            player: name.clone(),
            text: player.action_bar.clone(),
        })),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let (timer, online_players) = match state.session() {
        Ok(session) => (
            session.timer().status().clone(),
            session.world().online_players().map(|p| p.name.clone()).collect::<Vec<_>>(),
        ),
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(StatusResponse {
        next_rule_state: timer.next_rule_state(),
        timer,
        online_players,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    }))
}

/// Handle GET /events - Stream world events to the host
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events_tx.subscribe();
    let current = state
        .get_timer_state()
        .map(|timer| WorldEvent::apply_rule(timer.rule_state));
    info!("Host subscribed to world events");

    // A new host first learns the rule value it should be running with
    let initial = match current {
        Ok(event) => encode_event(&event),
        Err(e) => {
            error!("Failed to read rule state for new subscriber: {}", e);
            None
        }
    };

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(encoded) = encode_event(&event) {
                        return Some((Ok(encoded), rx));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Host stream lagged, skipped {} world event(s)", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let initial = stream::iter(initial.map(Ok));
    Sse::new(initial.chain(events)).keep_alive(KeepAlive::default())
}

fn encode_event(event: &WorldEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(data) => Some(Event::default().data(data)),
        Err(e) => {
            error!("Failed to encode world event: {}", e);
            None
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

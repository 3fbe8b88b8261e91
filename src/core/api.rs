//! HTTP + WebSocket API for Handlock
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get session status
//! - DELETE /session/{id} - Tear session down
//! - POST /session/{id}/frame - Push one classifier frame (one engine tick)
//! - POST /session/{id}/round - Open or close the round
//! - POST /session/{id}/reset - Fresh match, same session
//! - WS /ws/{id} - Live tick updates
//! - GET /health - Health check

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::core::{ActionDispatcher, ConfirmEngine, GameTable};
use crate::types::{FrameResult, GestureMap, Landmark, TickEvent};
use crate::HOLD_TICK_MS;

/// Session state
pub struct Session {
    pub id: String,
    pub engine: ConfirmEngine,
    pub dispatcher: ActionDispatcher,
    pub game: GameTable,
    pub update_tx: broadcast::Sender<SessionUpdate>,
}

/// Live update message
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdate {
    pub hand_present: bool,
    pub gesture_label: Option<String>,
    pub confidence: f64,
    pub counting: Option<String>,
    pub ticks_remaining: Option<u8>,
    pub round_active: bool,
    pub player_health: u8,
    pub computer_health: u8,
    pub game_over: bool,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    /// Override for the special-A label (recognizer-specific)
    pub special_a_label: Option<String>,
    /// Override for the special-B label
    pub special_b_label: Option<String>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub round_active: bool,
    pub counting: Option<String>,
    pub countdowns: Vec<CountdownStatus>,
    pub player_health: u8,
    pub computer_health: u8,
    pub items: Vec<String>,
    pub game_over: bool,
    pub winner: Option<String>,
    pub tick_count: u64,
}

/// Per-kind countdown status
#[derive(Debug, Serialize)]
pub struct CountdownStatus {
    pub kind: String,
    pub phase: String,
    pub ticks_remaining: u8,
    pub cooldown_remaining_ms: u64,
}

/// Push frame request (one tick)
#[derive(Debug, Deserialize)]
pub struct PushFrameRequest {
    pub hand_present: bool,
    #[serde(default)]
    pub gesture_label: Option<String>,
    #[serde(default)]
    pub confidence: f64,
    /// Wall-clock time since the previous frame; defaults to one hold tick
    #[serde(default)]
    pub delta_ms: Option<u64>,
    /// Landmark sets, passed through for debug rendering
    #[serde(default)]
    pub landmarks: Option<Vec<Vec<Landmark>>>,
}

/// Push frame response
#[derive(Debug, Serialize)]
pub struct PushFrameResponse {
    pub events: Vec<TickEvent>,
    pub counting: Option<String>,
    pub round_active: bool,
    pub player_health: u8,
    pub computer_health: u8,
    pub last_round: Option<crate::core::game::RoundRecord>,
    pub game_over: bool,
}

/// Round control request
#[derive(Debug, Deserialize)]
pub struct RoundRequest {
    pub active: bool,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState { sessions: RwLock::new(HashMap::new()) });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(delete_session))
        .route("/session/:id/frame", post(push_frame))
        .route("/session/:id/round", post(set_round))
        .route("/session/:id/reset", post(reset_session))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let session_id = generate_session_id();
    let (tx, _) = broadcast::channel(100);

    let mut map = GestureMap::new();
    if let Some(label) = req.special_a_label {
        map.special_a_label = label;
    }
    if let Some(label) = req.special_b_label {
        map.special_b_label = label;
    }

    let session = Session {
        id: session_id.clone(),
        engine: ConfirmEngine::with_map(map.clone()),
        dispatcher: ActionDispatcher::with_map(map),
        game: GameTable::new(),
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(status_of(session)))
}

/// Tear down and remove a session. Any countdown in flight is dropped.
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let mut session = sessions.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    session.engine.shutdown();
    Ok(StatusCode::NO_CONTENT)
}

/// Push one classifier frame and advance the engine one tick
async fn push_frame(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<PushFrameRequest>,
) -> Result<Json<PushFrameResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let frame = FrameResult {
        hand_present: req.hand_present,
        gesture_label: req.gesture_label,
        confidence: req.confidence.clamp(0.0, 100.0),
        landmarks: None,
    };
    let frame = match req.landmarks {
        Some(landmarks) => frame.with_landmarks(landmarks),
        None => frame,
    };
    let delta_ms = req.delta_ms.unwrap_or(HOLD_TICK_MS);

    let round_active = session.game.round_active();
    let output = session.engine.tick(&frame, round_active, delta_ms);
    session.dispatcher.dispatch(&output, &mut session.game);

    // Broadcast live update
    let counting = output.counting_kind();
    let update = SessionUpdate {
        hand_present: output.hand_present,
        gesture_label: output.gesture_label.clone(),
        confidence: output.confidence,
        counting: counting.map(|k| k.to_string()),
        ticks_remaining: counting.map(|k| output.countdown(k).ticks_remaining),
        round_active: session.game.round_active(),
        player_health: session.game.player_health(),
        computer_health: session.game.computer_health(),
        game_over: session.game.game_over(),
    };
    let _ = session.update_tx.send(update);

    Ok(Json(PushFrameResponse {
        events: output.events,
        counting: counting.map(|k| k.to_string()),
        round_active: session.game.round_active(),
        player_health: session.game.player_health(),
        computer_health: session.game.computer_health(),
        last_round: session.game.last_round().copied(),
        game_over: session.game.game_over(),
    }))
}

/// Open or close the round
async fn set_round(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<RoundRequest>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    if req.active {
        session.game.start_round();
    } else {
        session.game.end_round();
    }

    Ok(Json(status_of(session)))
}

/// Fresh match in the same session
async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    session.engine.reset();
    session.game.reset();

    Ok(Json(status_of(session)))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Handle WebSocket connection
async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<SessionUpdate>) {
    while let Ok(update) = rx.recv().await {
        let json = serde_json::to_string(&update).unwrap_or_default();
        if socket.send(Message::Text(json)).await.is_err() {
            break;
        }
    }
}

/// Build a status response from a session
fn status_of(session: &Session) -> SessionStatusResponse {
    SessionStatusResponse {
        session_id: session.id.clone(),
        round_active: session.game.round_active(),
        counting: session.engine.counting_kind().map(|k| k.to_string()),
        countdowns: session
            .engine
            .snapshot()
            .iter()
            .map(|s| CountdownStatus {
                kind: s.kind.to_string(),
                phase: s.phase.to_string(),
                ticks_remaining: s.ticks_remaining,
                cooldown_remaining_ms: s.cooldown_remaining_ms,
            })
            .collect(),
        player_health: session.game.player_health(),
        computer_health: session.game.computer_health(),
        items: session.game.items().iter().map(|i| format!("{:?}", i)).collect(),
        game_over: session.game.game_over(),
        winner: session.game.winner().map(|w| format!("{:?}", w)),
        tick_count: session.engine.tick_count(),
    }
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("session_{:x}", nanos as u64)
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Handlock API running on {}", addr);
    println!("  POST   /session/new       - Create session");
    println!("  GET    /session/:id       - Get status");
    println!("  DELETE /session/:id       - Tear down");
    println!("  POST   /session/:id/frame - Push frame (one tick)");
    println!("  POST   /session/:id/round - Open/close round");
    println!("  POST   /session/:id/reset - Fresh match");
    println!("  WS     /ws/:id            - Live updates");
    println!("  GET    /health            - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}

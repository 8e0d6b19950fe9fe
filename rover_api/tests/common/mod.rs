//! In-process stand-in for the RoVer registry, served with axum on an
//! ephemeral port.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use rover_api::{ClientConfig, RoverClient};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const API_KEY: &str = "test-key";

pub const GUILD: u64 = 100;
/// Guild whose bot lost access on the Discord side.
pub const DISCORD_BROKEN_GUILD: u64 = 200;
/// Guild without RoVer Plus.
pub const FREE_GUILD: u64 = 300;
/// Guild whose requests are always throttled.
pub const THROTTLED_GUILD: u64 = 429;
/// Guild whose requests hang long enough to time out.
pub const SLOW_GUILD: u64 = 408;
/// Guild whose requests hit a backend failure.
pub const BROKEN_GUILD: u64 = 500;

pub const RETRY_AFTER_SECS: u64 = 30;
/// Reset window advertised on successful reverse lookups.
pub const RESET_AFTER_SECS: u64 = 60;

#[derive(Clone, Default)]
pub struct MockState {
    pub revoked: Arc<AtomicBool>,
    pub requests: Arc<AtomicUsize>,
}

pub struct MockRover {
    pub base_url: String,
    pub state: MockState,
}

impl MockRover {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .route(
                "/api/guilds/{guild_id}/discord-to-roblox/{user_id}",
                get(discord_to_roblox),
            )
            .route(
                "/api/guilds/{guild_id}/roblox-to-discord/{roblox_id}",
                get(roblox_to_discord),
            )
            .route("/api/guilds/{guild_id}/update/{user_id}", post(update))
            .route("/api/api-key", delete(delete_key))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(API_KEY).with_base_url(&self.base_url)
    }

    pub fn client(&self) -> RoverClient {
        RoverClient::open(self.config()).unwrap()
    }

    pub fn requests(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }
}

fn error(status: StatusCode, message: &str, code: &str) -> Response {
    (status, Json(json!({ "message": message, "errorCode": code }))).into_response()
}

/// Shared preamble: count the request, check the key, apply guild-wide failures.
async fn precheck(state: &MockState, headers: &HeaderMap, guild_id: u64) -> Option<Response> {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let expected = format!("Bearer {API_KEY}");
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());
    if !authorized || state.revoked.load(Ordering::SeqCst) {
        return Some(error(StatusCode::UNAUTHORIZED, "Invalid API key", "invalid_api_key"));
    }

    match guild_id {
        DISCORD_BROKEN_GUILD => Some(error(
            StatusCode::BAD_REQUEST,
            "Missing Access",
            "discord_error",
        )),
        THROTTLED_GUILD => Some(
            (
                StatusCode::TOO_MANY_REQUESTS,
                [
                    ("Retry-After", RETRY_AFTER_SECS.to_string()),
                    ("X-RateLimit-Bucket", "discord_to_roblox".to_string()),
                    ("X-RateLimit-Remaining", "0".to_string()),
                    ("X-RateLimit-Reset-After", "29.5".to_string()),
                ],
                Json(json!({ "message": "You are being rate limited" })),
            )
                .into_response(),
        ),
        BROKEN_GUILD => Some((StatusCode::SERVICE_UNAVAILABLE, "upstream down").into_response()),
        SLOW_GUILD => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            None
        }
        _ => None,
    }
}

fn member(id: &str, nick: Option<&str>, roles: &[&str]) -> Value {
    json!({
        "avatar": null,
        "communication_disabled_until": null,
        "flags": 0,
        "joined_at": "2022-01-01T00:00:00.000000+00:00",
        "nick": nick,
        "pending": false,
        "premium_since": null,
        "roles": roles,
        "user": {
            "id": id,
            "username": format!("user{id}"),
            "avatar": null,
            "discriminator": "0",
            "public_flags": 0,
            "flags": 0,
            "global_name": null
        },
        "mute": false,
        "deaf": false
    })
}

async fn discord_to_roblox(
    State(state): State<MockState>,
    Path((guild_id, user_id)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(resp) = precheck(&state, &headers, guild_id).await {
        return resp;
    }

    let guild = guild_id.to_string();
    match user_id {
        1 => Json(json!({
            "robloxId": 1000,
            "cachedUsername": "Builderman",
            "discordId": "1",
            "guildId": guild,
        }))
        .into_response(),
        // Linked, but RoVer has no cached username.
        2 => Json(json!({ "robloxId": 2000, "discordId": "2" })).into_response(),
        // Success status with a body missing the Roblox id.
        3 => Json(json!({ "cachedUsername": "ghost" })).into_response(),
        _ => error(
            StatusCode::NOT_FOUND,
            "User not found",
            "user_not_found",
        ),
    }
}

async fn roblox_to_discord(
    State(state): State<MockState>,
    Path((guild_id, roblox_id)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(resp) = precheck(&state, &headers, guild_id).await {
        return resp;
    }

    let users = match roblox_id {
        1000 => vec![member("1", Some("Builderman"), &["10", "11"])],
        3000 => vec![
            member("4", None, &[]),
            member("5", Some("alt"), &["10"]),
            member("6", None, &["11"]),
        ],
        _ => vec![],
    };

    (
        [
            ("X-RateLimit-Bucket", "roblox_to_discord".to_string()),
            ("X-RateLimit-Remaining", "0".to_string()),
            ("X-RateLimit-Reset-After", RESET_AFTER_SECS.to_string()),
        ],
        Json(json!({
            "discordUsers": users,
            "robloxId": roblox_id,
            "guildId": guild_id.to_string(),
        })),
    )
        .into_response()
}

async fn update(
    State(state): State<MockState>,
    Path((guild_id, user_id)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(resp) = precheck(&state, &headers, guild_id).await {
        return resp;
    }

    if guild_id == FREE_GUILD {
        return error(
            StatusCode::FORBIDDEN,
            "This feature requires RoVer Plus",
            "premium_required",
        );
    }

    if user_id != 1 {
        return error(StatusCode::NOT_FOUND, "User not found", "user_not_found");
    }

    Json(json!({
        "actions": { "canManageRoles": true, "canManageNicknames": false },
        "roles": ["10", "12"],
        "unmanageableBoundRoles": ["99"],
        "addedRoles": ["12"],
        "removedRoles": ["11"],
        "failedRoles": []
    }))
    .into_response()
}

async fn delete_key(State(state): State<MockState>, headers: HeaderMap) -> Response {
    if let Some(resp) = precheck(&state, &headers, 0).await {
        return resp;
    }
    state.revoked.store(true, Ordering::SeqCst);
    StatusCode::NO_CONTENT.into_response()
}

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    Reply { status, location, body }
}

async fn app() -> Router {
    battleship_api::app(common::pool().await)
}

async fn create_game(app: &Router) -> String {
    let reply = send(app, "POST", "/battleship/api/games/", Some(json!({"x_size": 10, "y_size": 10, "turn_length": 30}))).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.location.unwrap()
}

async fn join(app: &Router, game: &str, nickname: &str) -> i64 {
    let reply = send(app, "POST", &format!("{game}players/"), Some(json!({"nickname": nickname}))).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.body["id"].as_i64().unwrap()
}

async fn place(app: &Router, game: &str, player: i64, stern: (i64, i64), bow: (i64, i64)) -> StatusCode {
    let ship = json!({
        "player_id": player,
        "stern_x": stern.0, "stern_y": stern.1,
        "bow_x": bow.0, "bow_y": bow.1,
        "ship_type": "submarine",
    });
    send(app, "POST", &format!("{game}ships/"), Some(ship)).await.status
}

async fn fire(app: &Router, game: &str, player: i64, x: i64, y: i64) -> Reply {
    let shot = json!({"player_id": player, "x": x, "y": y, "shot_type": "single"});
    send(app, "POST", &format!("{game}shots/"), Some(shot)).await
}

#[tokio::test]
async fn players_fire_in_rounds() {
    let app = app().await;
    let game = create_game(&app).await;
    assert_eq!(game, "/battleship/api/games/1/");
    let a = join(&app, &game, "Haddock").await;
    let b = join(&app, &game, "Tintin").await;

    let reply = fire(&app, &game, a, 1, 1).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["turn_number"], 0);
    assert_eq!(reply.body["game"]["status"], "active");
    assert_eq!(reply.body["game"]["round"]["state"], "open");
    assert_eq!(reply.body["game"]["round"]["waiting"], json!([b]));

    let reply = fire(&app, &game, a, 2, 2).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["error"], "Not this player's turn");

    assert_eq!(fire(&app, &game, b, 3, 3).await.body["turn_number"], 0);
    assert_eq!(fire(&app, &game, a, 4, 4).await.body["turn_number"], 1);

    let ledger = send(&app, "GET", &format!("{game}shots/"), None).await;
    assert_eq!(ledger.status, StatusCode::OK);
    assert_eq!(ledger.body["items"].as_array().unwrap().len(), 3);

    let turn0 = send(&app, "GET", &format!("{game}shots/?turn=0"), None).await;
    let shooters: Vec<i64> = turn0.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|shot| shot["player"].as_i64().unwrap())
        .collect();
    assert_eq!(shooters, vec![a, b]);

    let status = send(&app, "GET", &format!("{game}status/"), None).await;
    assert_eq!(status.body["status"], "active");
    assert_eq!(status.body["round"]["turn"], 1);
}

#[tokio::test]
async fn last_fleet_afloat_wins() {
    let app = app().await;
    let game = create_game(&app).await;
    let a = join(&app, &game, "a").await;
    let b = join(&app, &game, "b").await;
    assert_eq!(place(&app, &game, a, (5, 5), (5, 5)).await, StatusCode::CREATED);
    assert_eq!(place(&app, &game, b, (0, 0), (0, 1)).await, StatusCode::CREATED);

    fire(&app, &game, a, 0, 0).await;
    let reply = fire(&app, &game, b, 5, 5).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["game"], json!({"status": "ended", "winner": b}));

    let status = send(&app, "GET", &format!("{game}status/"), None).await;
    assert_eq!(status.body, json!({"status": "ended", "winner": b}));

    assert_eq!(fire(&app, &game, a, 0, 1).await.status, StatusCode::CONFLICT);
    assert_eq!(send(&app, "PATCH", &game, None).await.status, StatusCode::CONFLICT);

    let history = send(&app, "GET", "/battleship/api/history/", None).await;
    assert_eq!(history.body["items"].as_array().unwrap().len(), 1);
    let running = send(&app, "GET", "/battleship/api/games/", None).await;
    assert!(running.body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn ending_by_hand_closes_the_game() {
    let app = app().await;
    let game = create_game(&app).await;
    let a = join(&app, &game, "a").await;

    assert_eq!(send(&app, "PATCH", &game, None).await.status, StatusCode::NO_CONTENT);
    let reply = send(&app, "GET", &game, None).await;
    assert!(!reply.body["end_time"].is_null());

    let status = send(&app, "GET", &format!("{game}status/"), None).await;
    assert_eq!(status.body, json!({"status": "ended", "winner": null}));

    let join = send(&app, "POST", &format!("{game}players/"), Some(json!({"nickname": "late"}))).await;
    assert_eq!(join.status, StatusCode::CONFLICT);
    assert_eq!(place(&app, &game, a, (1, 1), (1, 2)).await, StatusCode::CONFLICT);
}

#[tokio::test]
async fn ship_placement_is_checked() {
    let app = app().await;
    let game = create_game(&app).await;
    let a = join(&app, &game, "a").await;
    let b = join(&app, &game, "b").await;

    assert_eq!(place(&app, &game, a, (1, 1), (3, 3)).await, StatusCode::BAD_REQUEST);
    assert_eq!(place(&app, &game, a, (8, 0), (10, 0)).await, StatusCode::BAD_REQUEST);
    assert_eq!(place(&app, &game, a, (2, 2), (2, 5)).await, StatusCode::CREATED);
    assert_eq!(place(&app, &game, a, (0, 4), (3, 4)).await, StatusCode::BAD_REQUEST);
    // fleets of different players may share cells
    assert_eq!(place(&app, &game, b, (0, 4), (3, 4)).await, StatusCode::CREATED);
    assert_eq!(place(&app, &game, 999, (9, 9), (9, 9)).await, StatusCode::NOT_FOUND);

    let all = send(&app, "GET", &format!("{game}ships/"), None).await;
    assert_eq!(all.body["items"].as_array().unwrap().len(), 2);
    let mine = send(&app, "GET", &format!("{game}ships/?player={a}"), None).await;
    assert_eq!(mine.body["items"][0]["stern_y"], 2);
    assert_eq!(mine.body["items"][0]["bow_y"], 5);
}

#[tokio::test]
async fn a_sunk_fleet_cannot_be_reinforced() {
    let app = app().await;
    let game = create_game(&app).await;
    let a = join(&app, &game, "a").await;
    let b = join(&app, &game, "b").await;
    assert_eq!(place(&app, &game, a, (5, 5), (5, 5)).await, StatusCode::CREATED);
    assert_eq!(place(&app, &game, b, (0, 0), (0, 1)).await, StatusCode::CREATED);

    // b sinks a, a still owes a shot this round
    let reply = fire(&app, &game, b, 5, 5).await;
    assert_eq!(reply.body["game"]["status"], "active");

    let ship = json!({
        "player_id": a,
        "stern_x": 7, "stern_y": 7,
        "bow_x": 7, "bow_y": 8,
        "ship_type": "submarine",
    });
    let refused = send(&app, "POST", &format!("{game}ships/"), Some(ship)).await;
    assert_eq!(refused.status, StatusCode::CONFLICT);
    assert_eq!(refused.body["error"], "Player's fleet has already been sunk");
    let mine = send(&app, "GET", &format!("{game}ships/?player={a}"), None).await;
    assert_eq!(mine.body["items"].as_array().unwrap().len(), 1);

    // a fleet still afloat can grow
    assert_eq!(place(&app, &game, b, (9, 0), (9, 1)).await, StatusCode::CREATED);

    let reply = fire(&app, &game, a, 3, 3).await;
    assert_eq!(reply.body["game"], json!({"status": "ended", "winner": b}));
}

#[tokio::test]
async fn leaving_can_decide_the_game() {
    let app = app().await;
    let game = create_game(&app).await;
    let a = join(&app, &game, "a").await;
    let b = join(&app, &game, "b").await;

    assert_eq!(place(&app, &game, a, (5, 5), (5, 5)).await, StatusCode::CREATED);
    assert_eq!(place(&app, &game, b, (0, 0), (0, 0)).await, StatusCode::CREATED);
    fire(&app, &game, a, 0, 0).await;

    assert_eq!(send(&app, "DELETE", &format!("{game}players/{b}/"), None).await.status, StatusCode::NO_CONTENT);
    let status = send(&app, "GET", &format!("{game}status/"), None).await;
    assert_eq!(status.body, json!({"status": "ended", "winner": a}));
    assert_eq!(fire(&app, &game, a, 1, 1).await.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn the_first_shot_needs_an_opponent() {
    let app = app().await;
    let game = create_game(&app).await;
    let a = join(&app, &game, "a").await;

    let reply = fire(&app, &game, a, 1, 1).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["error"], "Game needs at least two players to start");

    join(&app, &game, "b").await;
    assert_eq!(fire(&app, &game, a, 1, 1).await.status, StatusCode::CREATED);
}

#[tokio::test]
async fn players_join_and_leave() {
    let app = app().await;
    let game = create_game(&app).await;

    let reply = send(&app, "POST", &format!("{game}players/"), Some(json!({"nickname": ""}))).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["nickname"], "Anonymous landlubber");
    let player = reply.location.unwrap();
    assert_eq!(player, format!("{game}players/1/"));

    let listed = send(&app, "GET", &format!("{game}players/"), None).await;
    assert_eq!(listed.body["items"].as_array().unwrap().len(), 1);

    assert_eq!(send(&app, "GET", &player, None).await.status, StatusCode::OK);
    assert_eq!(send(&app, "DELETE", &player, None).await.status, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, "GET", &player, None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "DELETE", &player, None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_requests_are_refused() {
    let app = app().await;

    let small = send(&app, "POST", "/battleship/api/games/", Some(json!({"x_size": 1, "y_size": 10, "turn_length": 30}))).await;
    assert_eq!(small.status, StatusCode::BAD_REQUEST);
    let timeless = send(&app, "POST", "/battleship/api/games/", Some(json!({"x_size": 10, "y_size": 10, "turn_length": 0}))).await;
    assert_eq!(timeless.status, StatusCode::BAD_REQUEST);

    let no_json = Request::builder()
        .method("POST")
        .uri("/battleship/api/games/")
        .body(Body::from("x_size=10"))
        .unwrap();
    let reply = app.clone().oneshot(no_json).await.unwrap();
    assert_eq!(reply.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    assert_eq!(send(&app, "GET", "/battleship/api/games/7/", None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "GET", "/battleship/api/games/seven/", None).await.status, StatusCode::BAD_REQUEST);
    assert_eq!(send(&app, "GET", "/battleship/api/games/7/status/", None).await.status, StatusCode::NOT_FOUND);

    let game = create_game(&app).await;
    let a = join(&app, &game, "a").await;
    assert_eq!(fire(&app, &game, a, 10, 10).await.status, StatusCode::BAD_REQUEST);
    assert_eq!(fire(&app, &game, a + 1, 1, 1).await.status, StatusCode::NOT_FOUND);
    assert_eq!(fire(&app, "/battleship/api/games/7/", a, 1, 1).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_game_removes_it() {
    let app = app().await;
    let game = create_game(&app).await;
    join(&app, &game, "a").await;

    assert_eq!(send(&app, "DELETE", &game, None).await.status, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, "GET", &game, None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "GET", &format!("{game}players/"), None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "DELETE", &game, None).await.status, StatusCode::NOT_FOUND);
}

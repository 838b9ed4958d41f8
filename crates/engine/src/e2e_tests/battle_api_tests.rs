//! Battle route over a real store.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::{TestApp, API};

#[tokio::test]
async fn level_one_loser_faints_and_is_removed() {
    let app = TestApp::new(0.5).await;
    let pikachu = app.seed("Pikachu", "Ash", 99).await;
    let bulbasaur = app.seed("Bulbasaur", "Misty", 1).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("{API}/battle/{pikachu}/{bulbasaur}"),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "vencedor": { "id": 1, "nivel": 100, "tipo": "Pikachu", "treinador": "Ash" },
            "perdedor": { "id": 2, "nivel": 0, "tipo": "Bulbasaur", "treinador": "Misty" },
        })
    );
    assert_eq!(app.stored_level(pikachu).await, Some(100));
    assert_eq!(app.stored_level(bulbasaur).await, None);

    let (status, _) = app
        .send(Method::GET, &format!("{API}/pokemons/{bulbasaur}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn underdog_in_first_slot_loses_a_level() {
    let app = TestApp::new(0.5).await;
    let pikachu = app.seed("Pikachu", "Ash", 99).await;
    app.seed("Onix", "Brock", 20).await;
    let charmander = app.seed("Charmander", "Ash", 10).await;

    // p(first) = 10/109, so a 0.5 draw goes to the second slot
    let (status, body) = app
        .send(
            Method::POST,
            &format!("{API}/battle/{charmander}/{pikachu}"),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vencedor"]["id"], 1);
    assert_eq!(body["vencedor"]["nivel"], 100);
    assert_eq!(body["perdedor"]["id"], 3);
    assert_eq!(body["perdedor"]["nivel"], 9);
    assert_eq!(app.stored_level(charmander).await, Some(9));
    assert_eq!(app.stored_level(pikachu).await, Some(100));
}

#[tokio::test]
async fn low_draw_favours_first_slot() {
    let app = TestApp::new(0.0).await;
    let weak = app.seed("Magikarp", "Misty", 2).await;
    let strong = app.seed("Gyarados", "Lance", 50).await;

    let (status, body) = app
        .send(Method::POST, &format!("{API}/battle/{weak}/{strong}"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vencedor"]["tipo"], "Magikarp");
    assert_eq!(app.stored_level(weak).await, Some(3));
    assert_eq!(app.stored_level(strong).await, Some(49));
}

#[tokio::test]
async fn missing_opponent_is_not_found_and_changes_nothing() {
    let app = TestApp::new(0.5).await;
    let pikachu = app.seed("Pikachu", "Ash", 99).await;

    let (status, body) = app
        .send(Method::POST, &format!("{API}/battle/{pikachu}/999"), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("999"));
    assert_eq!(app.stored_level(pikachu).await, Some(99));
}

#[tokio::test]
async fn first_missing_id_is_the_one_reported() {
    let app = TestApp::new(0.5).await;

    let (status, body) = app
        .send(Method::POST, &format!("{API}/battle/500/600"), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Pokémon 500 não encontrado" }));
}

#[tokio::test]
async fn non_numeric_id_never_matches() {
    let app = TestApp::new(0.5).await;
    let pikachu = app.seed("Pikachu", "Ash", 99).await;

    let (status, body) = app
        .send(Method::POST, &format!("{API}/battle/abc/{pikachu}"), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Pokémon NaN não encontrado" }));
    assert_eq!(app.stored_level(pikachu).await, Some(99));
}

#[tokio::test]
async fn two_text_ids_report_nan() {
    let app = TestApp::new(0.5).await;

    let (status, body) = app
        .send(Method::POST, &format!("{API}/battle/abc/def"), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Pokémon NaN não encontrado");
}

//! HTTP REST API routes

mod character_routes;
mod class_routes;
mod equipment_routes;
mod error;
mod inventory_routes;
mod item_routes;
mod race_routes;
mod spell_routes;
mod spellbook_routes;
mod weapon_routes;

pub use error::expose_error_detail;

use std::sync::Arc;

use axum::http::{StatusCode, Uri};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::json;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Race routes
        .route("/api/v1/races", get(race_routes::list_races))
        .route("/api/v1/races", post(race_routes::create_race))
        .route("/api/v1/races/{id}", get(race_routes::get_race))
        .route("/api/v1/races/{id}", put(race_routes::update_race))
        .route("/api/v1/races/{id}", delete(race_routes::delete_race))
        // Class routes
        .route("/api/v1/classes", get(class_routes::list_classes))
        .route("/api/v1/classes", post(class_routes::create_class))
        .route("/api/v1/classes/{id}", get(class_routes::get_class))
        .route("/api/v1/classes/{id}", put(class_routes::update_class))
        .route("/api/v1/classes/{id}", delete(class_routes::delete_class))
        .route(
            "/api/v1/classes/{id}/subclasses",
            get(class_routes::list_subclasses),
        )
        .route(
            "/api/v1/classes/{id}/subclasses",
            post(class_routes::create_subclass),
        )
        .route(
            "/api/v1/classes/{id}/subclasses/{subclass_id}",
            delete(class_routes::delete_subclass),
        )
        // Spell routes
        .route("/api/v1/spells", get(spell_routes::list_spells))
        .route("/api/v1/spells", post(spell_routes::create_spell))
        .route("/api/v1/spells/{id}", get(spell_routes::get_spell))
        .route("/api/v1/spells/{id}", put(spell_routes::update_spell))
        .route("/api/v1/spells/{id}", delete(spell_routes::delete_spell))
        // Weapon routes
        .route("/api/v1/weapons", get(weapon_routes::list_weapons))
        .route("/api/v1/weapons", post(weapon_routes::create_weapon))
        .route("/api/v1/weapons/{id}", get(weapon_routes::get_weapon))
        .route("/api/v1/weapons/{id}", put(weapon_routes::update_weapon))
        .route("/api/v1/weapons/{id}", delete(weapon_routes::delete_weapon))
        // Item routes
        .route("/api/v1/items", get(item_routes::list_items))
        .route("/api/v1/items", post(item_routes::create_item))
        .route("/api/v1/items/{id}", get(item_routes::get_item))
        .route("/api/v1/items/{id}", put(item_routes::update_item))
        .route("/api/v1/items/{id}", delete(item_routes::delete_item))
        // Character routes
        .route("/api/v1/characters", get(character_routes::list_characters))
        .route(
            "/api/v1/characters",
            post(character_routes::create_character),
        )
        .route(
            "/api/v1/characters/{id}",
            get(character_routes::get_character),
        )
        .route(
            "/api/v1/characters/{id}",
            put(character_routes::update_character),
        )
        .route(
            "/api/v1/characters/{id}",
            delete(character_routes::delete_character),
        )
        // Nested inventory routes
        .route(
            "/api/v1/characters/{id}/inventory",
            get(inventory_routes::get_inventory),
        )
        .route(
            "/api/v1/characters/{id}/inventory",
            put(inventory_routes::update_inventory),
        )
        .route(
            "/api/v1/characters/{id}/inventory/items",
            post(inventory_routes::add_item),
        )
        .route(
            "/api/v1/characters/{id}/inventory/items/{item_id}",
            delete(inventory_routes::remove_item),
        )
        // Nested equipment routes
        .route(
            "/api/v1/characters/{id}/equipment",
            get(equipment_routes::get_equipment),
        )
        .route(
            "/api/v1/characters/{id}/equipment",
            put(equipment_routes::update_equipment),
        )
        // Learned spell routes
        .route(
            "/api/v1/learnedspells/character/{character_id}",
            get(spellbook_routes::list_learned_spells),
        )
        .route(
            "/api/v1/learnedspells/learn",
            post(spellbook_routes::learn_spell),
        )
        .route(
            "/api/v1/learnedspells/{character_id}/{spell_id}",
            delete(spellbook_routes::forget_spell),
        )
        // Service routes
        .route("/health", get(health))
        .fallback(not_found)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK" }))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("Route {} not found", uri.path()) })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::infrastructure::config::{AppConfig, AppEnv};

    async fn test_app() -> Router {
        // named shared in-memory database so every pooled connection sees
        // the same data
        let config = AppConfig {
            database_url: format!(
                "sqlite:file:{}?mode=memory&cache=shared",
                uuid::Uuid::new_v4()
            ),
            server_port: 0,
            env: AppEnv::Development,
        };
        let state = AppState::new(config).await.unwrap();
        create_routes().with_state(Arc::new(state))
    }

    async fn send(
        app: &Router,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_race(app: &Router, name: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/races",
            Some(json!({ "name": name, "desc": "A race", "size": "MEDIUM" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn create_class(app: &Router, name: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/classes",
            Some(json!({
                "name": name,
                "desc": "A class",
                "hitDie": 8,
                "primaryAbility": "DEXTERITY",
                "savingThrows": ["DEXTERITY", "INTELLIGENCE"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn create_character(app: &Router, name: &str) -> String {
        let race_id = create_race(app, &format!("{name} race")).await;
        let class_id = create_class(app, &format!("{name} class")).await;
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/characters",
            Some(json!({ "name": name, "raceId": race_id, "classId": class_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn create_spell(app: &Router, name: &str, level: i64) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/spells",
            Some(json!({
                "name": name,
                "desc": "A spell",
                "level": level,
                "school": "EVOCATION",
                "castingTime": "1 action",
                "range": "60 feet",
                "components": ["V", "S"],
                "duration": "Instantaneous"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_endpoint_responds_ok() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
    }

    #[tokio::test]
    async fn unknown_route_returns_404_naming_the_path() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/v1/nonsense", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route /api/v1/nonsense not found");
    }

    #[tokio::test]
    async fn race_round_trip_and_delete() {
        let app = test_app().await;
        let id = create_race(&app, "Elf").await;

        let (status, body) = send(&app, Method::GET, &format!("/api/v1/races/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Elf");
        assert_eq!(body["speed"], 30);
        assert_eq!(body["playable"], true);
        assert_eq!(body["size"], "MEDIUM");
        assert_eq!(body["characters"], json!([]));

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/races/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, &format!("/api/v1/races/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Race not found");

        // deleting again stays a 404
        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/races/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_race_name_conflicts() {
        let app = test_app().await;
        create_race(&app, "Dwarf").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/races",
            Some(json!({ "name": "Dwarf", "desc": "Again" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Race with this name already exists");
    }

    #[tokio::test]
    async fn race_create_requires_name_and_desc() {
        let app = test_app().await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/races",
            Some(json!({ "desc": "No name" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn race_list_paginates_and_filters() {
        let app = test_app().await;
        for name in ["Elf", "Dwarf", "Halfling"] {
            create_race(&app, name).await;
        }
        send(
            &app,
            Method::POST,
            "/api/v1/races",
            Some(json!({ "name": "Dragon", "desc": "Not playable", "playable": false })),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/v1/races?limit=2&page=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["meta"]["total"], 4);
        assert_eq!(body["meta"]["page"], 2);
        assert_eq!(body["meta"]["limit"], 2);
        assert_eq!(body["meta"]["totalPages"], 2);

        let (status, body) = send(&app, Method::GET, "/api/v1/races?playable=false", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["name"], "Dragon");

        // case-insensitive substring match on text fields
        let (status, body) = send(&app, Method::GET, "/api/v1/races?name=dwar", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["name"], "Dwarf");

        let (status, body) = send(&app, Method::GET, "/api/v1/races?hitpoints=3", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Cannot filter by 'hitpoints'");
    }

    #[tokio::test]
    async fn race_list_sorts_by_requested_field() {
        let app = test_app().await;
        for (name, speed) in [("Elf", 30), ("Dwarf", 25), ("Tabaxi", 35)] {
            send(
                &app,
                Method::POST,
                "/api/v1/races",
                Some(json!({ "name": name, "desc": "A race", "speed": speed })),
            )
            .await;
        }
        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/races?sortBy=speed&sortOrder=desc",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], "Tabaxi");
        assert_eq!(body["data"][2]["name"], "Dwarf");
    }

    #[tokio::test]
    async fn race_rejects_invalid_size_and_speed() {
        let app = test_app().await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/races",
            Some(json!({ "name": "Giant", "desc": "Big", "size": "COLOSSAL" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/races",
            Some(json!({ "name": "Zephyr", "desc": "Fast", "speed": 500 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn class_requires_all_fields_and_valid_hit_die() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/classes",
            Some(json!({ "name": "Rogue" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/classes",
            Some(json!({
                "name": "Rogue",
                "desc": "Sneaky",
                "hitDie": 7,
                "primaryAbility": "DEXTERITY",
                "savingThrows": ["DEXTERITY"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid hit die value");
    }

    #[tokio::test]
    async fn class_delete_blocked_while_characters_use_it() {
        let app = test_app().await;
        let race_id = create_race(&app, "Human").await;
        let class_id = create_class(&app, "Fighter").await;
        send(
            &app,
            Method::POST,
            "/api/v1/characters",
            Some(json!({ "name": "Bruenor", "raceId": race_id, "classId": class_id })),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/classes/{class_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Cannot delete class while characters are using it"
        );
        assert_eq!(body["charactersCount"], 1);
    }

    #[tokio::test]
    async fn race_delete_blocked_while_characters_use_it() {
        let app = test_app().await;
        let race_id = create_race(&app, "Tiefling").await;
        let class_id = create_class(&app, "Warlock").await;
        send(
            &app,
            Method::POST,
            "/api/v1/characters",
            Some(json!({ "name": "Farideh", "raceId": race_id, "classId": class_id })),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/races/{race_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Race is referenced by existing characters");
    }

    #[tokio::test]
    async fn character_create_rejects_unresolvable_references() {
        let app = test_app().await;
        let race_id = create_race(&app, "Gnome").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/characters",
            Some(json!({
                "name": "Boddynock",
                "raceId": race_id,
                "classId": uuid::Uuid::new_v4().to_string()
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid reference ID provided");
    }

    #[tokio::test]
    async fn item_create_rejects_unresolvable_inventory() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/items",
            Some(json!({
                "name": "Lantern",
                "inventoryId": uuid::Uuid::new_v4().to_string()
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid reference ID provided");
    }

    #[tokio::test]
    async fn subclasses_nest_under_their_class() {
        let app = test_app().await;
        let class_id = create_class(&app, "Cleric").await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/classes/{class_id}/subclasses"),
            Some(json!({ "name": "Life Domain", "desc": "Healing" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let subclass_id = body["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/classes/{class_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subclasses"][0]["name"], "Life Domain");

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/classes/{class_id}/subclasses/{subclass_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/classes/{class_id}/subclasses"),
            None,
        )
        .await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn spell_level_must_stay_in_range() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/spells",
            Some(json!({
                "name": "Wish",
                "desc": "Anything",
                "level": 10,
                "school": "CONJURATION",
                "castingTime": "1 action",
                "components": ["V"],
                "duration": "Instantaneous"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Spell level must be between 0 and 9");
    }

    #[tokio::test]
    async fn weapon_damage_must_be_dice_notation() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/weapons",
            Some(json!({
                "name": "Mace",
                "desc": "A heavy club",
                "type": "MACE",
                "damage": "lots",
                "architype": "SIMPLE"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Invalid damage format. Use format like \"1d6\" or \"2d8\""
        );
    }

    #[tokio::test]
    async fn ranged_weapon_requires_a_range() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/weapons",
            Some(json!({
                "name": "Shortbow",
                "desc": "A bow",
                "type": "SHORTBOW",
                "damage": "1d6",
                "architype": "SIMPLE"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Ranged weapons must have a range value");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/weapons",
            Some(json!({
                "name": "Shortbow",
                "desc": "A bow",
                "type": "SHORTBOW",
                "damage": "1d6",
                "range": 80,
                "architype": "SIMPLE"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["range"], 80);
    }

    #[tokio::test]
    async fn weapon_update_cannot_clear_range_on_ranged_type() {
        let app = test_app().await;
        let (_, body) = send(
            &app,
            Method::POST,
            "/api/v1/weapons",
            Some(json!({
                "name": "Longbow",
                "desc": "A bow",
                "type": "LONGBOW",
                "damage": "1d8",
                "range": 150,
                "architype": "MARTIAL"
            })),
        )
        .await;
        let id = body["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/weapons/{id}"),
            Some(json!({ "range": null })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ability_scores_validated_by_field() {
        let app = test_app().await;
        let race_id = create_race(&app, "Gnome").await;
        let class_id = create_class(&app, "Wizard").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/characters",
            Some(json!({
                "name": "Fizban",
                "raceId": race_id,
                "classId": class_id,
                "strength": 0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "strength must be between 1 and 20");
    }

    #[tokio::test]
    async fn character_create_brings_inventory_and_equipment() {
        let app = test_app().await;
        let id = create_character(&app, "Shadowheart").await;

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/characters/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], 1);
        assert_eq!(body["experience"], 0);
        assert_eq!(body["strength"], 10);
        assert_eq!(body["inventory"]["gold"], 0);
        assert_eq!(body["inventory"]["capacity"], 20);
        assert_eq!(body["inventory"]["items"], json!([]));
        assert_eq!(body["equipment"]["slots"], json!([]));
        assert!(body["race"].is_object());
        assert!(body["class"].is_object());
        assert!(body["subclass"].is_null());
    }

    #[tokio::test]
    async fn character_delete_cascades_to_owned_records() {
        let app = test_app().await;
        let id = create_character(&app, "Gale").await;
        let spell_id = create_spell(&app, "Fireball", 3).await;
        send(
            &app,
            Method::POST,
            "/api/v1/learnedspells/learn",
            Some(json!({ "characterId": id, "spellId": spell_id })),
        )
        .await;

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/characters/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/v1/characters/{id}/inventory"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // the spell itself survives, only the link goes
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/spells/{spell_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["characterSpells"], json!([]));
    }

    #[tokio::test]
    async fn character_patch_distinguishes_absent_from_null() {
        let app = test_app().await;
        let race_id = create_race(&app, "Half-Elf").await;
        let class_id = create_class(&app, "Warlock").await;
        let (_, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/classes/{class_id}/subclasses"),
            Some(json!({ "name": "The Fiend", "desc": "Pacts" })),
        )
        .await;
        let subclass_id = body["id"].as_str().unwrap().to_string();

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/v1/characters",
            Some(json!({
                "name": "Wyll",
                "raceId": race_id,
                "classId": class_id,
                "subclassId": subclass_id
            })),
        )
        .await;
        let id = body["id"].as_str().unwrap().to_string();
        assert_eq!(body["subclass"]["name"], "The Fiend");

        // a patch that never mentions the subclass leaves it alone
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/characters/{id}"),
            Some(json!({ "level": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], 3);
        assert_eq!(body["subclass"]["name"], "The Fiend");

        // an explicit null clears it
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/characters/{id}"),
            Some(json!({ "subclassId": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["subclass"].is_null());
    }

    #[tokio::test]
    async fn duplicate_character_name_conflicts() {
        let app = test_app().await;
        let race_id = create_race(&app, "Tiefling").await;
        let class_id = create_class(&app, "Barbarian").await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/characters",
            Some(json!({ "name": "Karlach", "raceId": race_id, "classId": class_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/characters",
            Some(json!({ "name": "Karlach", "raceId": race_id, "classId": class_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn item_quantity_must_be_positive() {
        let app = test_app().await;
        let character_id = create_character(&app, "Astarion").await;
        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/characters/{character_id}/inventory"),
            None,
        )
        .await;
        let inventory_id = body["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/items",
            Some(json!({
                "name": "Dagger",
                "desc": "Pointy",
                "quantity": 0,
                "inventoryId": inventory_id
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Quantity must be at least 1");
    }

    #[tokio::test]
    async fn inventory_add_and_remove_items() {
        let app = test_app().await;
        let character_id = create_character(&app, "Lae'zel").await;
        let donor_id = create_character(&app, "Donor").await;
        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/characters/{donor_id}/inventory"),
            None,
        )
        .await;
        let donor_inventory = body["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/items",
            Some(json!({
                "name": "Rope",
                "desc": "50 feet",
                "quantity": 1,
                "inventoryId": donor_inventory
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let item_id = body["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/v1/characters/{character_id}/inventory/items"),
            Some(json!({ "itemId": item_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/characters/{character_id}/inventory"),
            None,
        )
        .await;
        assert_eq!(body["items"][0]["name"], "Rope");

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/characters/{character_id}/inventory/items/{item_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/characters/{character_id}/inventory"),
            None,
        )
        .await;
        assert_eq!(body["items"], json!([]));
    }

    #[tokio::test]
    async fn inventory_update_changes_gold() {
        let app = test_app().await;
        let character_id = create_character(&app, "Jaheira").await;
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/characters/{character_id}/inventory"),
            Some(json!({ "gold": 150 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["gold"], 150);

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/characters/{character_id}/inventory"),
            Some(json!({ "gold": -5 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn equipment_slots_replace_as_a_set() {
        let app = test_app().await;
        let character_id = create_character(&app, "Minsc").await;
        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/characters/{character_id}/inventory"),
            None,
        )
        .await;
        let inventory_id = body["id"].as_str().unwrap().to_string();
        let (_, body) = send(
            &app,
            Method::POST,
            "/api/v1/items",
            Some(json!({
                "name": "Helmet",
                "desc": "Sturdy",
                "quantity": 1,
                "inventoryId": inventory_id
            })),
        )
        .await;
        let item_id = body["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/characters/{character_id}/equipment"),
            Some(json!({ "slots": [{ "slot": "HEAD", "itemId": item_id }] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slots"][0]["slot"], "HEAD");
        assert_eq!(body["slots"][0]["item"]["name"], "Helmet");

        // duplicate slots in one request are rejected
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/characters/{character_id}/equipment"),
            Some(json!({ "slots": [
                { "slot": "HEAD", "itemId": item_id },
                { "slot": "HEAD", "itemId": item_id }
            ] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // an empty set unequips everything
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/characters/{character_id}/equipment"),
            Some(json!({ "slots": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slots"], json!([]));
    }

    #[tokio::test]
    async fn learn_spell_reports_distinct_missing_records() {
        let app = test_app().await;
        let character_id = create_character(&app, "Gale of Waterdeep").await;
        let spell_id = create_spell(&app, "Magic Missile", 1).await;

        let missing = uuid::Uuid::new_v4().to_string();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/learnedspells/learn",
            Some(json!({ "characterId": missing, "spellId": spell_id })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Character not found");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/learnedspells/learn",
            Some(json!({ "characterId": character_id, "spellId": missing })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Spell not found");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/learnedspells/learn",
            Some(json!({ "characterId": character_id, "spellId": spell_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["spell"]["name"], "Magic Missile");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/learnedspells/learn",
            Some(json!({ "characterId": character_id, "spellId": spell_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Character already knows this spell");

        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/learnedspells/character/{character_id}"),
            None,
        )
        .await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/learnedspells/{character_id}/{spell_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/learnedspells/character/{character_id}"),
            None,
        )
        .await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn malformed_ids_are_rejected_up_front() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/v1/races/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid race ID");
    }
}

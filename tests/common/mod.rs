//! Shared fixtures for the integration tests: JSON bodies shaped like the
//! catalog API's responses and a mock server preloaded with a few records.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn character_json(id: u32, name: &str, status: &str, episodes: &[u32]) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": status,
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": { "name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1" },
        "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
        "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        "episode": episodes
            .iter()
            .map(|ep| format!("https://rickandmortyapi.com/api/episode/{ep}"))
            .collect::<Vec<_>>(),
        "url": format!("https://rickandmortyapi.com/api/character/{id}"),
        "created": "2017-11-04T18:48:46.250Z"
    })
}

pub fn episode_json(id: u32, name: &str, cast: &[u32]) -> Value {
    json!({
        "id": id,
        "name": name,
        "air_date": "December 2, 2013",
        "episode": format!("S01E{id:02}"),
        "characters": cast
            .iter()
            .map(|c| format!("https://rickandmortyapi.com/api/character/{c}"))
            .collect::<Vec<_>>(),
        "url": format!("https://rickandmortyapi.com/api/episode/{id}"),
        "created": "2017-11-10T12:56:33.798Z"
    })
}

pub fn page_json(count: u64, pages: u32, results: Vec<Value>) -> Value {
    json!({
        "info": { "count": count, "pages": pages, "next": null, "prev": null },
        "results": results
    })
}

/// Body the API sends when nothing matches a filter
pub fn no_match_json() -> Value {
    json!({ "error": "There is nothing here" })
}

/// Start a server answering the unfiltered first page with `results`
pub async fn server_with_first_page(results: Vec<Value>) -> MockServer {
    let server = MockServer::start().await;
    let count = results.len() as u64;
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("name", ""))
        .and(query_param("status", ""))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(count, 1, results)))
        .mount(&server)
        .await;
    server
}

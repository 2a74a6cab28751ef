//! End-to-end browsing against a mock catalog server: the controller runs
//! the real search pipeline, list view model and detail aggregator over
//! HTTP, with scripted input instead of a terminal.

mod common;

use catalog_browser::config::AppConfig;
use catalog_browser::{
    AppController, InputEvent, LoadState, QueryClient, ScriptedEventSource, StatusFilter,
    TerminalRenderer,
};
use common::{character_json, episode_json, no_match_json, page_json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

type Controller = AppController<ScriptedEventSource, Vec<u8>>;

fn controller(server: &MockServer) -> Controller {
    let config = AppConfig {
        base_url: server.uri(),
        debounce: Duration::from_millis(20),
        ..AppConfig::default()
    };
    AppController::with_api(
        Arc::new(QueryClient::new(server.uri())),
        &config,
        ScriptedEventSource::default(),
        TerminalRenderer::plain(Vec::new()),
    )
}

fn output(controller: &Controller) -> String {
    String::from_utf8_lossy(controller.renderer().writer()).into_owned()
}

async fn pump_until(controller: &mut Controller, done: impl Fn(&Controller) -> bool) {
    for _ in 0..20 {
        if done(controller) {
            return;
        }
        tokio::time::timeout(Duration::from_secs(5), controller.process_background())
            .await
            .expect("no background progress")
            .unwrap();
    }
    panic!("condition never reached");
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("status", "dead"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            1,
            1,
            vec![character_json(3, "Summer Smith", "Dead", &[6, 7])],
        )))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/character/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(character_json(3, "Summer Smith", "Dead", &[6, 7])),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/episode/6,7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            episode_json(6, "Rick Potion #9", &[1, 2, 3]),
            episode_json(7, "Raising Gazorpazorp", &[1, 2]),
        ]))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/character/1,2,3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            character_json(1, "Rick Sanchez", "Alive", &[6, 7]),
            character_json(2, "Morty Smith", "Alive", &[6, 7]),
            character_json(3, "Summer Smith", "Dead", &[6, 7]),
        ]))
        .mount(server)
        .await;
}

#[tokio::test]
async fn filter_detail_and_cast_should_chain_over_http() {
    let server = common::server_with_first_page(vec![
        character_json(1, "Rick Sanchez", "Alive", &[1, 2]),
        character_json(2, "Morty Smith", "Alive", &[1]),
        character_json(3, "Summer Smith", "Dead", &[6, 7]),
    ])
    .await;
    mount_catalog(&server).await;
    let mut controller = controller(&server);

    pump_until(&mut controller, |c| c.list().records().len() == 3).await;
    assert!(output(&controller).contains("Page 1/1 | 3 results"));

    controller
        .handle_input(InputEvent::StatusSelected(StatusFilter::Dead))
        .unwrap();
    pump_until(&mut controller, |c| c.list().records().len() == 1).await;
    assert_eq!(controller.list().records()[0].name, "Summer Smith");

    controller
        .handle_input(InputEvent::RecordSelected(0))
        .unwrap();
    pump_until(&mut controller, |c| c.detail().detail().ready().is_some()).await;
    let detail = controller.detail().detail().ready().unwrap();
    assert_eq!(detail.record.id, 3);
    assert_eq!(detail.episodes.len(), 2);
    assert!(output(&controller).contains("S01E06 Rick Potion #9"));

    controller
        .handle_input(InputEvent::CastRequested(0))
        .unwrap();
    pump_until(&mut controller, |c| {
        matches!(c.detail().cast_state(), LoadState::Ready(_)) && output(c).contains("Cast (3):")
    })
    .await;
    assert_eq!(
        controller.detail().cast_member_name(2).as_deref(),
        Some("Summer Smith")
    );
}

#[tokio::test]
async fn search_without_matches_should_show_no_results() {
    let server = common::server_with_first_page(vec![character_json(
        1,
        "Rick Sanchez",
        "Alive",
        &[1],
    )])
    .await;
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("name", "zzz"))
        .respond_with(ResponseTemplate::new(404).set_body_json(no_match_json()))
        .mount(&server)
        .await;
    let mut controller = controller(&server);
    pump_until(&mut controller, |c| !c.list().records().is_empty()).await;

    controller
        .handle_input(InputEvent::SearchTyped("zzz".to_string()))
        .unwrap();
    pump_until(&mut controller, |c| c.list().results_empty()).await;

    assert!(output(&controller).contains("No results for \"zzz\""));
    // The last good page stays in place under the empty flag
    assert_eq!(controller.list().records()[0].name, "Rick Sanchez");
}

#[tokio::test]
async fn failed_page_request_should_be_reported() {
    let server = common::server_with_first_page(vec![character_json(
        1,
        "Rick Sanchez",
        "Alive",
        &[1],
    )])
    .await;
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("status", "unknown"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    let mut controller = controller(&server);
    pump_until(&mut controller, |c| !c.list().records().is_empty()).await;

    controller
        .handle_input(InputEvent::StatusSelected(StatusFilter::Unknown))
        .unwrap();
    pump_until(&mut controller, |c| output(c).contains("Error:")).await;

    assert!(output(&controller).contains("Catalog API error (503): maintenance"));
    assert_eq!(controller.list().records().len(), 1);
}

//! Lookup properties of the events route table.

use axum::{body::Body, http::Request, http::StatusCode, response::IntoResponse, response::Response};
use event_router::events::{event_routes, EVENT_DETAIL, EVENT_LIST_CREATE, EVENT_PK};
use event_router::routing::{Params, ReverseError, Router};
use uuid::Uuid;

async fn ok(_request: Request<Body>, _params: Params) -> Response {
    StatusCode::OK.into_response()
}

fn table() -> Router {
    event_routes(ok, ok).unwrap()
}

#[test]
fn test_example_paths() {
    let router = table();

    let m = router
        .match_path("event_detail/123e4567-e89b-12d3-a456-426614174000/")
        .unwrap();
    assert_eq!(m.name(), EVENT_DETAIL);
    assert_eq!(
        m.params().uuid(EVENT_PK).unwrap().to_string(),
        "123e4567-e89b-12d3-a456-426614174000"
    );

    assert!(router.match_path("event_detail/not-a-uuid/").is_err());
}

#[test]
fn test_every_valid_uuid_resolves() {
    let router = table();

    for _ in 0..200 {
        let id = Uuid::new_v4();
        for text in [
            id.hyphenated().to_string(),
            id.hyphenated().to_string().to_uppercase(),
        ] {
            let path = format!("event_detail/{}/", text);
            let m = router.match_path(&path).unwrap();
            assert_eq!(m.name(), EVENT_DETAIL);
            assert_eq!(m.params().uuid(EVENT_PK), Some(id));
        }
    }

    for id in [Uuid::nil(), Uuid::max()] {
        let path = format!("event_detail/{}/", id.hyphenated());
        assert_eq!(router.match_path(&path).unwrap().params().uuid(EVENT_PK), Some(id));
    }
}

#[test]
fn test_non_uuid_segments_are_not_found() {
    let router = table();
    let id = Uuid::new_v4();

    let bad = [
        "not-a-uuid".to_string(),
        String::new(),
        id.simple().to_string(),
        id.braced().to_string(),
        id.urn().to_string(),
        format!("{}0", id.hyphenated()),
        id.hyphenated().to_string()[1..].to_string(),
        "123e4567-e89b-12d3-a456-42661417400g".to_string(),
        "123e4567_e89b_12d3_a456_426614174000".to_string(),
        format!("{}/extra", id.hyphenated()),
    ];

    for segment in bad {
        let path = format!("event_detail/{}/", segment);
        let err = router.match_path(&path).unwrap_err();
        assert_eq!(err.path, path);
    }
}

#[test]
fn test_list_create_is_literal() {
    let router = table();

    let m = router.match_path(EVENT_LIST_CREATE).unwrap();
    assert_eq!(m.name(), EVENT_LIST_CREATE);
    assert!(m.params().is_empty());

    for path in [
        "event_list_create/",
        "/event_list_create",
        "Event_List_Create",
        "event_list_create?x=1",
        "event_list",
        "",
    ] {
        assert!(router.match_path(path).is_err(), "{path:?} should not match");
    }
}

#[test]
fn test_lookups_are_idempotent() {
    let router = table();
    let path = "event_detail/123e4567-e89b-12d3-a456-426614174000/";

    let first = router.match_path(path).map(|m| (m.name(), m.into_params()));
    for _ in 0..10 {
        let again = router.match_path(path).map(|m| (m.name(), m.into_params()));
        assert_eq!(again, first);
    }
    assert_eq!(
        router.match_path("nope").unwrap_err(),
        router.match_path("nope").unwrap_err()
    );
}

#[test]
fn test_route_names_are_unique() {
    let router = table();
    let mut names: Vec<&str> = router.routes().iter().map(|r| r.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), router.len());
}

#[test]
fn test_reverse_then_resolve() {
    let router = table();
    let id = Uuid::new_v4();

    let pk = id.to_string();
    let path = router.reverse(EVENT_DETAIL, &[(EVENT_PK, pk.as_str())]).unwrap();
    assert_eq!(path, format!("event_detail/{}/", id));

    let m = router.match_path(&path).unwrap();
    assert_eq!(m.name(), EVENT_DETAIL);
    assert_eq!(m.params().uuid(EVENT_PK), Some(id));

    assert_eq!(router.reverse(EVENT_LIST_CREATE, &[]).unwrap(), "event_list_create");
}

#[test]
fn test_reverse_rejects_bad_arguments() {
    let router = table();

    assert!(matches!(
        router.reverse(EVENT_DETAIL, &[(EVENT_PK, "not-a-uuid")]),
        Err(ReverseError::InvalidArgument { .. })
    ));
    assert!(matches!(
        router.reverse(EVENT_DETAIL, &[]),
        Err(ReverseError::MissingArgument { .. })
    ));
    assert!(matches!(
        router.reverse(EVENT_LIST_CREATE, &[(EVENT_PK, "x")]),
        Err(ReverseError::UnexpectedArgument { .. })
    ));
    assert!(matches!(
        router.reverse("events", &[]),
        Err(ReverseError::UnknownRoute(_))
    ));
}

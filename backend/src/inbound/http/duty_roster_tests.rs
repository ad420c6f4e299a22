//! Tests for duty roster HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::test_fixtures::{at, roster_entry};
use crate::domain::{ErrorCode, Shift, week_bounds};
use crate::inbound::http::test_utils::{MockPorts, signed_in_cookie, test_app};

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(list_duty_roster)
            .service(duty_roster_week)
            .service(create_duty_roster)
            .service(get_duty_roster)
            .service(update_duty_roster)
            .service(delete_duty_roster),
    );
}

#[rstest]
fn create_request_accepts_plain_date_and_drops_empty_notes() {
    let draft = DutyRosterDraft::try_from(CreateDutyRosterRequest {
        date: Some("2024-03-04".to_owned()),
        operator_name: Some("Ola Nordmann".to_owned()),
        shift: Some("DAY".to_owned()),
        notes: Some(String::new()),
    })
    .expect("valid draft");

    assert_eq!(draft.date, at(2024, 3, 4, 0));
    assert_eq!(draft.shift, Shift::Day);
    assert_eq!(draft.notes, None);
}

#[rstest]
fn create_request_rejects_unknown_shift() {
    let err = DutyRosterDraft::try_from(CreateDutyRosterRequest {
        date: Some("2024-03-04".to_owned()),
        operator_name: Some("Ola Nordmann".to_owned()),
        shift: Some("NOON".to_owned()),
        notes: None,
    })
    .expect_err("invalid shift");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details");
    assert_eq!(details["errors"][0]["field"], "shift");
    assert_eq!(details["errors"][0]["code"], "invalid_choice");
}

#[rstest]
fn update_request_clears_notes_on_null() {
    let body: UpdateDutyRosterRequest =
        serde_json::from_value(json!({ "notes": null })).expect("valid body");
    let patch = DutyRosterPatch::try_from(body).expect("valid patch");
    assert_eq!(patch.notes, Some(None));
    assert_eq!(patch.shift, None);
}

#[rstest]
#[case::date(json!({ "date": null }), "date")]
#[case::operator(json!({ "operatorName": null }), "operatorName")]
#[case::shift(json!({ "shift": null }), "shift")]
fn update_request_rejects_null_outside_notes(#[case] body: Value, #[case] field: &str) {
    let request: UpdateDutyRosterRequest = serde_json::from_value(body).expect("valid body");
    let err = DutyRosterPatch::try_from(request).expect_err("null rejected");

    let details = err.details().expect("details");
    assert_eq!(details["errors"][0]["field"], field);
    assert_eq!(details["errors"][0]["code"], "null_not_allowed");
}

#[rstest]
#[case::date(Some("2024-03-06"), Some(at(2024, 3, 6, 0)))]
#[case::timestamp(Some("2024-03-06T12:00:00Z"), Some(at(2024, 3, 6, 12)))]
#[case::absent(None, None)]
fn week_query_reference(
    #[case] raw: Option<&str>,
    #[case] expected: Option<chrono::DateTime<chrono::Utc>>,
) {
    let query = RosterWeekQuery {
        week_start: raw.map(str::to_owned),
    };
    assert_eq!(query.reference().expect("valid weekStart"), expected);
}

#[actix_web::test]
async fn list_requires_session() {
    let app = actix_test::init_service(
        test_app(MockPorts::default().into_state()).configure(routes),
    )
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/duty-roster").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn list_scopes_to_requested_week() {
    let mut ports = MockPorts::default();
    ports
        .duty_roster_query
        .expect_list()
        .withf(|week_of| *week_of == Some(at(2024, 3, 6, 0)))
        .times(1)
        .return_once(|_| Ok(vec![roster_entry()]));
    let app = actix_test::init_service(test_app(ports.into_state()).configure(routes)).await;
    let cookie = signed_in_cookie(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/duty-roster?weekStart=2024-03-06")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["operatorName"], "Ola Nordmann");
    assert_eq!(body[0]["shift"], "DAY");
}

#[actix_web::test]
async fn list_rejects_unparsable_week_start() {
    let app = actix_test::init_service(
        test_app(MockPorts::default().into_state()).configure(routes),
    )
    .await;
    let cookie = signed_in_cookie(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/duty-roster?weekStart=next-week")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["errors"][0]["field"], "weekStart");
}

#[actix_web::test]
async fn week_route_is_not_taken_for_an_id() {
    let mut ports = MockPorts::default();
    ports
        .duty_roster_query
        .expect_week()
        .withf(Option::is_none)
        .times(1)
        .return_once(|_| {
            Ok(RosterWeek::build(
                week_bounds(at(2024, 3, 6, 0)),
                &[roster_entry()],
            ))
        });
    let app = actix_test::init_service(test_app(ports.into_state()).configure(routes)).await;
    let cookie = signed_in_cookie(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/duty-roster/week")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["days"].as_array().map(Vec::len), Some(7));
    assert_eq!(body["days"][0]["date"], "2024-03-04");
    assert_eq!(body["days"][0]["shifts"][0]["shift"], "DAY");
    assert_eq!(
        body["days"][0]["shifts"][0]["entry"]["operatorName"],
        "Ola Nordmann"
    );
    assert_eq!(body["days"][0]["shifts"][1]["entry"], Value::Null);
}

#[actix_web::test]
async fn create_returns_created_entry() {
    let mut ports = MockPorts::default();
    ports
        .duty_roster
        .expect_create()
        .withf(|_, draft| {
            draft.operator_name.as_str() == "Ola Nordmann" && draft.shift == Shift::Day
        })
        .times(1)
        .return_once(|_, _| Ok(roster_entry()));
    let app = actix_test::init_service(test_app(ports.into_state()).configure(routes)).await;
    let cookie = signed_in_cookie(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/duty-roster")
            .cookie(cookie)
            .set_json(json!({
                "date": "2024-03-04",
                "operatorName": "Ola Nordmann",
                "shift": "DAY"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["createdBy"]["name"], "Kari Nordmann");
}

#[actix_web::test]
async fn update_of_missing_entry_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .duty_roster
        .expect_update()
        .times(1)
        .return_once(|_, id, _| Err(Error::not_found(format!("duty roster entry {id} not found"))));
    let app = actix_test::init_service(test_app(ports.into_state()).configure(routes)).await;
    let cookie = signed_in_cookie(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/duty-roster/00000000-0000-0000-0000-0000000000ff")
            .cookie(cookie)
            .set_json(json!({ "shift": "NIGHT" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_acknowledges_success() {
    let id = roster_entry().id;
    let mut ports = MockPorts::default();
    ports
        .duty_roster
        .expect_delete()
        .withf(move |_, target| *target == id)
        .times(1)
        .return_once(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(ports.into_state()).configure(routes)).await;
    let cookie = signed_in_cookie(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/duty-roster/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({ "success": true }));
}

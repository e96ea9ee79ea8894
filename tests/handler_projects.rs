mod common;

use axum::http::StatusCode;
use common::{TestApp, bearer, test_app};
use dissconnect::application::services::SponsorshipStrategy;
use dissconnect::domain::entities::{Profile, Project, ProjectStatus, Role};
use serde_json::{Value, json};

const STRATEGIES: [SponsorshipStrategy; 2] =
    [SponsorshipStrategy::Batched, SponsorshipStrategy::PerProject];

struct Campus {
    student: Profile,
    professor: Profile,
    river: Project,
    clinic: Project,
}

/// Three open projects: one backed by an MIT professor, one by a Harvard
/// professor, one by nobody. Projects are created oldest first.
fn seed_campus(app: &TestApp) -> Campus {
    let store = &app.store;
    let charity = store.add_profile(Role::Charity, Some("Red Cross"));
    let student = store.add_profile(Role::Student, Some("MIT"));
    let professor = store.add_profile(Role::Professor, Some("MIT"));
    let outsider = store.add_profile(Role::Professor, Some("Harvard"));

    let river = store.add_project(&charity, "River survey", "Biology");
    let clinic = store.add_project(&charity, "Clinic logistics", "Operations research");
    store.add_project(&charity, "Archive digitisation", "History");

    store.add_interest(&river, &professor);
    store.add_interest(&clinic, &outsider);

    Campus {
        student,
        professor,
        river,
        clinic,
    }
}

async fn list(app: &TestApp, token: &str, query: &str) -> Value {
    let response = app
        .server
        .get(&format!("/api/projects{query}"))
        .add_header("Authorization", bearer(token))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

fn titles(body: &Value) -> Vec<String> {
    body["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_projects_requires_bearer() {
    let app = test_app(SponsorshipStrategy::Batched);

    let response = app.server.get("/api/projects").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_list_projects_rejects_unknown_token() {
    let app = test_app(SponsorshipStrategy::Batched);

    let response = app
        .server
        .get("/api/projects")
        .add_header("Authorization", bearer("not-a-real-token"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_all_open_projects_newest_first() {
    let app = test_app(SponsorshipStrategy::Batched);
    let campus = seed_campus(&app);
    let token = app.token_for(&campus.student).await;

    let body = list(&app, &token, "").await;

    assert_eq!(body["count"], 3);
    assert_eq!(body["sponsored_applied"], false);
    assert_eq!(
        titles(&body),
        vec!["Archive digitisation", "Clinic logistics", "River survey"]
    );
    assert_eq!(body["notices"], json!([]));
}

#[tokio::test]
async fn test_closed_projects_are_not_listed() {
    let app = test_app(SponsorshipStrategy::Batched);
    let charity = app.store.add_profile(Role::Charity, Some("Oxfam"));
    let student = app.store.add_profile(Role::Student, None);
    app.store.add_project(&charity, "Open one", "Physics");
    app.store
        .add_project_with_status(&charity, "Closed one", "Physics", ProjectStatus::Closed);
    let token = app.token_for(&student).await;

    let body = list(&app, &token, "").await;

    assert_eq!(titles(&body), vec!["Open one"]);
}

#[tokio::test]
async fn test_subject_filter_is_case_insensitive_substring() {
    let app = test_app(SponsorshipStrategy::Batched);
    let charity = app.store.add_profile(Role::Charity, Some("Oxfam"));
    let student = app.store.add_profile(Role::Student, Some("MIT"));
    app.store.add_project(&charity, "Water testing", "Chemistry");
    app.store.add_project(&charity, "Soil samples", "Biochemistry");
    app.store.add_project(&charity, "Wind tunnel", "Physics");
    let token = app.token_for(&student).await;

    let body = list(&app, &token, "?subject=chem").await;

    assert_eq!(titles(&body), vec!["Soil samples", "Water testing"]);
}

#[tokio::test]
async fn test_empty_subject_means_no_filter() {
    let app = test_app(SponsorshipStrategy::Batched);
    let campus = seed_campus(&app);
    let token = app.token_for(&campus.student).await;

    let body = list(&app, &token, "?subject=").await;

    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_sponsored_filter_for_student() {
    for strategy in STRATEGIES {
        let app = test_app(strategy);
        let campus = seed_campus(&app);
        let token = app.token_for(&campus.student).await;

        let body = list(&app, &token, "?sponsored=true").await;

        assert_eq!(body["sponsored_applied"], true, "{strategy}");
        assert_eq!(titles(&body), vec!["River survey"], "{strategy}");
        assert_eq!(
            body["projects"][0]["id"],
            campus.river.id.to_string(),
            "{strategy}"
        );
    }
}

#[tokio::test]
async fn test_sponsored_filter_combines_with_subject() {
    for strategy in STRATEGIES {
        let app = test_app(strategy);
        let campus = seed_campus(&app);
        let token = app.token_for(&campus.student).await;

        let body = list(&app, &token, "?subject=history&sponsored=true").await;

        assert_eq!(body["count"], 0, "{strategy}");
        assert_eq!(body["sponsored_applied"], true, "{strategy}");
    }
}

#[tokio::test]
async fn test_sponsored_flag_ignored_for_professor() {
    let app = test_app(SponsorshipStrategy::Batched);
    let campus = seed_campus(&app);
    let token = app.token_for(&campus.professor).await;

    let body = list(&app, &token, "?sponsored=true").await;

    assert_eq!(body["count"], 3);
    assert_eq!(body["sponsored_applied"], false);
}

#[tokio::test]
async fn test_sponsored_false_values_do_not_filter() {
    let app = test_app(SponsorshipStrategy::Batched);
    let campus = seed_campus(&app);
    let token = app.token_for(&campus.student).await;

    for flag in ["false", "0", "off", ""] {
        let body = list(&app, &token, &format!("?sponsored={flag}")).await;
        assert_eq!(body["count"], 3, "sponsored={flag}");
    }
}

#[tokio::test]
async fn test_organization_match_is_case_sensitive() {
    for strategy in STRATEGIES {
        let app = test_app(strategy);
        let charity = app.store.add_profile(Role::Charity, Some("Oxfam"));
        let student = app.store.add_profile(Role::Student, Some("mit"));
        let professor = app.store.add_profile(Role::Professor, Some("MIT"));
        let project = app.store.add_project(&charity, "Solar kits", "Engineering");
        app.store.add_interest(&project, &professor);
        let token = app.token_for(&student).await;

        let body = list(&app, &token, "?sponsored=true").await;

        assert_eq!(body["count"], 0, "{strategy}");
    }
}

#[tokio::test]
async fn test_student_interest_does_not_sponsor() {
    for strategy in STRATEGIES {
        let app = test_app(strategy);
        let charity = app.store.add_profile(Role::Charity, Some("Oxfam"));
        let student = app.store.add_profile(Role::Student, Some("MIT"));
        let classmate = app.store.add_profile(Role::Student, Some("MIT"));
        let project = app.store.add_project(&charity, "Solar kits", "Engineering");
        app.store.add_interest(&project, &classmate);
        let token = app.token_for(&student).await;

        let body = list(&app, &token, "?sponsored=true").await;

        assert_eq!(body["count"], 0, "{strategy}");
    }
}

#[tokio::test]
async fn test_unaffiliated_student_sees_no_sponsored_projects() {
    for strategy in STRATEGIES {
        let app = test_app(strategy);
        seed_campus(&app);
        let loner = app.store.add_profile(Role::Student, None);
        let token = app.token_for(&loner).await;

        let body = list(&app, &token, "?sponsored=true").await;

        assert_eq!(body["count"], 0, "{strategy}");
        assert_eq!(body["sponsored_applied"], true, "{strategy}");
        assert_eq!(body["notices"], json!([]), "{strategy}");
    }
}

#[tokio::test]
async fn test_lister_failure_yields_empty_listing_with_notice() {
    let app = test_app(SponsorshipStrategy::Batched);
    let campus = seed_campus(&app);
    let token = app.token_for(&campus.student).await;
    app.store.fail("list_open");

    let body = list(&app, &token, "?sponsored=true").await;

    assert_eq!(body["count"], 0);
    assert_eq!(body["notices"][0]["level"], "error");
    assert!(
        body["notices"][0]["message"]
            .as_str()
            .unwrap()
            .starts_with("Error fetching projects:")
    );
}

#[tokio::test]
async fn test_affiliation_failure_shows_unfiltered_listing() {
    let app = test_app(SponsorshipStrategy::Batched);
    let campus = seed_campus(&app);
    let token = app.token_for(&campus.student).await;
    app.store.fail("find_profile");

    let body = list(&app, &token, "?sponsored=true").await;

    assert_eq!(body["count"], 3);
    assert_eq!(body["sponsored_applied"], false);
    assert_eq!(body["notices"][0]["level"], "warning");
    assert_eq!(
        body["notices"][0]["message"],
        "Could not check your university right now, showing all open projects."
    );
}

#[tokio::test]
async fn test_batched_query_failure_shows_unfiltered_listing() {
    let app = test_app(SponsorshipStrategy::Batched);
    let campus = seed_campus(&app);
    let token = app.token_for(&campus.student).await;
    app.store.fail("sponsored_project_ids");

    let body = list(&app, &token, "?sponsored=true").await;

    assert_eq!(body["count"], 3);
    assert_eq!(
        body["notices"][0]["message"],
        "Could not check sponsorships right now, showing all open projects."
    );
}

#[tokio::test]
async fn test_per_project_failure_excludes_only_that_project() {
    let app = test_app(SponsorshipStrategy::PerProject);
    let campus = seed_campus(&app);
    let token = app.token_for(&campus.student).await;
    app.store.fail_lookup_for(campus.clinic.id);

    let body = list(&app, &token, "?sponsored=true").await;

    assert_eq!(titles(&body), vec!["River survey"]);
    assert_eq!(body["sponsored_applied"], true);
    assert_eq!(
        body["notices"][0]["message"],
        "1 project(s) could not be checked for sponsorship and are not shown."
    );
}

#[tokio::test]
async fn test_failed_lookup_of_sponsored_project_hides_it() {
    let app = test_app(SponsorshipStrategy::PerProject);
    let campus = seed_campus(&app);
    let token = app.token_for(&campus.student).await;
    app.store.fail_lookup_for(campus.river.id);

    let body = list(&app, &token, "?sponsored=true").await;

    assert_eq!(body["count"], 0);
    assert_eq!(body["notices"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_project_as_charity() {
    let app = test_app(SponsorshipStrategy::Batched);
    let charity = app.store.add_profile(Role::Charity, Some("Red Cross"));
    let token = app.token_for(&charity).await;

    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", bearer(&token))
        .json(&json!({
            "title": "Shelter map",
            "subject": "Geography",
            "requirements": "GIS basics"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["title"], "Shelter map");
    assert_eq!(body["status"], "open");
    assert_eq!(body["charity_id"], charity.id.to_string());
    assert_eq!(body["charity_organization"], "Red Cross");
    assert_eq!(app.store.projects().len(), 1);
}

#[tokio::test]
async fn test_create_project_forbidden_for_student() {
    let app = test_app(SponsorshipStrategy::Batched);
    let campus = seed_campus(&app);
    let token = app.token_for(&campus.student).await;

    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "title": "Sneaky", "subject": "Law" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["error"]["code"], "forbidden");
    assert_eq!(app.store.projects().len(), 3);
}

#[tokio::test]
async fn test_create_project_rejects_blank_title() {
    let app = test_app(SponsorshipStrategy::Batched);
    let charity = app.store.add_profile(Role::Charity, Some("Red Cross"));
    let token = app.token_for(&charity).await;

    for title in ["", "   "] {
        let response = app
            .server
            .post("/api/projects")
            .add_header("Authorization", bearer(&token))
            .json(&json!({ "title": title, "subject": "Geography" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
    assert!(app.store.projects().is_empty());
}

#[tokio::test]
async fn test_repeated_sponsored_listing_is_stable() {
    for strategy in STRATEGIES {
        let app = test_app(strategy);
        let campus = seed_campus(&app);
        let token = app.token_for(&campus.student).await;

        let first = list(&app, &token, "?sponsored=true").await;
        let second = list(&app, &token, "?sponsored=true").await;

        assert_eq!(first["projects"], second["projects"], "{strategy}");
    }
}

//! HTTP tests for /companies, /jobs and the health checks

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::TestApp;

fn handles(body: &Value) -> Vec<String> {
    body["companies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["handle"].as_str().unwrap().to_string())
        .collect()
}

fn titles(body: &Value) -> Vec<String> {
    body["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_checks() {
    let app = TestApp::seeded().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"].as_array().unwrap().len(), 2);
    assert_eq!(body["checks"][1]["store"], "companies");
    assert_eq!(body["checks"][1]["status"], "healthy");

    let (status, _) = app.get("/live").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = TestApp::seeded().await;

    let (status, body) = app.get("/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["status"], 404);
}

#[tokio::test]
async fn list_companies_unfiltered() {
    let app = TestApp::seeded().await;

    let (status, body) = app.get("/companies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(handles(&body), vec!["c1", "c2", "c3"]);
    assert_eq!(
        body["companies"][0],
        json!({
            "handle": "c1",
            "name": "C1",
            "num_employees": 1,
            "description": "Desc1",
            "logo_url": "http://c1.img",
        })
    );
}

#[tokio::test]
async fn list_companies_filters() {
    let app = TestApp::seeded().await;

    let (_, body) = app.get("/companies?name=c2").await;
    assert_eq!(handles(&body), vec!["c2"]);

    let (_, body) = app.get("/companies?min_employees=2").await;
    assert_eq!(handles(&body), vec!["c2", "c3"]);

    let (_, body) = app.get("/companies?max_employees=2").await;
    assert_eq!(handles(&body), vec!["c1", "c2"]);

    let (_, body) = app.get("/companies?min_employees=2&max_employees=2").await;
    assert_eq!(handles(&body), vec!["c2"]);

    let (_, body) = app.get("/companies?name=zzz").await;
    assert!(handles(&body).is_empty());

    let (_, body) = app.get("/companies?name=").await;
    assert_eq!(handles(&body).len(), 3);
}

#[tokio::test]
async fn list_companies_bad_queries() {
    let app = TestApp::seeded().await;

    for uri in [
        "/companies?min_employees=3&max_employees=1",
        "/companies?min_employees=lots",
        "/companies?colour=red",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["type"], "bad_request");
    }
}

#[tokio::test]
async fn get_company_includes_jobs() {
    let app = TestApp::seeded().await;

    let (status, body) = app.get("/companies/c1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company"]["handle"], "c1");
    assert_eq!(body["company"]["name"], "C1");
    assert_eq!(titles(&body["company"]), vec!["J1", "J2", "J3"]);

    let (_, body) = app.get("/companies/c2").await;
    assert_eq!(body["company"]["jobs"], json!([]));

    let (status, _) = app.get("/companies/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_company_requires_admin() {
    let app = TestApp::seeded().await;
    let company = json!({
        "handle": "new",
        "name": "New",
        "description": "DescNew",
        "num_employees": 10,
        "logo_url": "http://new.img",
    });

    let (status, _) = app
        .request(Method::POST, "/companies", None, Some(company.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(
            Method::POST,
            "/companies",
            Some(&app.u1_token),
            Some(company.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request(
            Method::POST,
            "/companies",
            Some(&app.admin_token),
            Some(company.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["company"], company);

    let (status, _) = app.get("/companies/new").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_company_conflicts_and_bad_data() {
    let app = TestApp::seeded().await;

    let (status, _) = app
        .request(
            Method::POST,
            "/companies",
            Some(&app.admin_token),
            Some(json!({"handle": "c1", "name": "Other", "description": "d"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .request(
            Method::POST,
            "/companies",
            Some(&app.admin_token),
            Some(json!({"handle": "other", "name": "C1", "description": "d"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    for body in [
        json!({"handle": "x", "name": "X"}),
        json!({"handle": "x", "name": "X", "description": "d", "num_employees": -1}),
        json!({"handle": "x", "name": "X", "description": "d", "logo_url": "not a url"}),
        json!({"handle": "x", "name": "X", "description": "d", "extra": true}),
    ] {
        let (status, _) = app
            .request(Method::POST, "/companies", Some(&app.admin_token), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn update_company() {
    let app = TestApp::seeded().await;

    let (status, _) = app
        .request(
            Method::PATCH,
            "/companies/c1",
            Some(&app.u1_token),
            Some(json!({"name": "C1-new"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request(
            Method::PATCH,
            "/companies/c1",
            Some(&app.admin_token),
            Some(json!({"name": "C1-new", "logo_url": null})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company"]["name"], "C1-new");
    assert_eq!(body["company"]["num_employees"], 1);
    assert_eq!(body["company"]["logo_url"], json!(null));

    let (status, _) = app
        .request(
            Method::PATCH,
            "/companies/c1",
            Some(&app.admin_token),
            Some(json!({"handle": "c1-new"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            Method::PATCH,
            "/companies/nope",
            Some(&app.admin_token),
            Some(json!({"name": "Nope"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_company_cascades_to_jobs() {
    let app = TestApp::seeded().await;

    let (status, _) = app
        .request(Method::DELETE, "/companies/c1", Some(&app.u1_token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request(Method::DELETE, "/companies/c1", Some(&app.admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Company deleted"}));

    let (status, _) = app.get("/companies/c1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/jobs").await;
    assert!(titles(&body).is_empty());

    let (status, _) = app
        .request(Method::DELETE, "/companies/c1", Some(&app.admin_token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_jobs_and_filters() {
    let app = TestApp::seeded().await;

    let (status, body) = app.get("/jobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["J1", "J2", "J3"]);

    let (_, body) = app.get("/jobs?has_equity=true").await;
    assert_eq!(titles(&body), vec!["J1", "J2"]);

    let (_, body) = app.get("/jobs?has_equity=false").await;
    assert_eq!(titles(&body).len(), 3);

    let (_, body) = app.get("/jobs?min_salary=2").await;
    assert_eq!(titles(&body), vec!["J2", "J3"]);

    let (_, body) = app.get("/jobs?title=j1").await;
    assert_eq!(titles(&body), vec!["J1"]);

    let (_, body) = app.get("/jobs?min_salary=2&has_equity=true").await;
    assert_eq!(titles(&body), vec!["J2"]);

    let (status, _) = app.get("/jobs?min_salary=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_job() {
    let app = TestApp::seeded().await;
    let id = app.job_ids[0];

    let (status, body) = app.get(&format!("/jobs/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["job"],
        json!({
            "id": id,
            "title": "J1",
            "salary": 1,
            "equity": 0.1,
            "company_handle": "c1",
        })
    );

    let (status, _) = app.get("/jobs/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/jobs/not-a-number").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_job() {
    let app = TestApp::seeded().await;
    let job = json!({"title": "J-new", "salary": 10, "equity": 0.2, "company_handle": "c2"});

    let (status, _) = app
        .request(Method::POST, "/jobs", Some(&app.u1_token), Some(job.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request(Method::POST, "/jobs", Some(&app.admin_token), Some(job))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["job"]["title"], "J-new");
    assert_eq!(body["job"]["company_handle"], "c2");
    assert!(body["job"]["id"].is_number());

    let (_, body) = app.get("/companies/c2").await;
    assert_eq!(titles(&body["company"]), vec!["J-new"]);
}

#[tokio::test]
async fn create_job_bad_data() {
    let app = TestApp::seeded().await;

    for body in [
        json!({"title": "J", "company_handle": "nope"}),
        json!({"title": "J", "equity": 1.5, "company_handle": "c1"}),
        json!({"title": "J", "salary": -5, "company_handle": "c1"}),
        json!({"salary": 5, "company_handle": "c1"}),
        json!({"title": "J", "company_handle": "c1", "id": 99}),
    ] {
        let (status, _) = app
            .request(Method::POST, "/jobs", Some(&app.admin_token), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, body) = app.get("/jobs").await;
    assert_eq!(titles(&body).len(), 3);
}

#[tokio::test]
async fn update_job() {
    let app = TestApp::seeded().await;
    let uri = format!("/jobs/{}", app.job_ids[0]);

    let (status, body) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&app.admin_token),
            Some(json!({"title": "J1-new"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job"]["title"], "J1-new");
    assert_eq!(body["job"]["salary"], 1);

    let (status, body) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&app.admin_token),
            Some(json!({"equity": null})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job"]["equity"], json!(null));
    assert_eq!(body["job"]["salary"], 1);

    let (status, _) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&app.admin_token),
            Some(json!({"equity": 1.5})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&app.admin_token),
            Some(json!({"company_handle": "c2"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&app.u2_token),
            Some(json!({"title": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(
            Method::PATCH,
            "/jobs/0",
            Some(&app.admin_token),
            Some(json!({"title": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_job() {
    let app = TestApp::seeded().await;
    let uri = format!("/jobs/{}", app.job_ids[2]);

    let (status, _) = app.request(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request(Method::DELETE, &uri, Some(&app.admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Job deleted"}));

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(Method::DELETE, &uri, Some(&app.admin_token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

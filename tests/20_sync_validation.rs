// Payload validation runs before any store access, so these assertions hold
// with or without a database behind the server.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn designation_sync_rejects_incomplete_payload() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/designations/add/designation", server.base_url))
        .json(&json!({ "id": 1, "department": "Tech" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Invalid HR designation payload");
    Ok(())
}

#[tokio::test]
async fn employee_sync_rejects_missing_required_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/employees/add/employees", server.base_url))
        .json(&json!({ "employeeId": "E1", "name": "A" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(
        body["message"],
        "employeeId, name, email, department, designation, joiningDate are required"
    );
    Ok(())
}

#[tokio::test]
async fn employee_sync_rejects_bad_joining_date() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/employees/add/employees", server.base_url))
        .json(&json!({
            "employeeId": "E1",
            "name": "A",
            "email": "a@x.com",
            "department": "Tech",
            "designation": "Engineer",
            "joiningDate": "01/01/2024",
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn status_sync_rejects_missing_fields_and_bad_status() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/employees/update/status", server.base_url))
        .json(&json!({ "employeeId": "E1" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "employeeId and status are required");

    let res = client
        .post(format!("{}/employees/update/status", server.base_url))
        .json(&json!({ "employeeId": "E1", "status": "Suspended" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Invalid status value");
    Ok(())
}

// End-to-end sync flows against a real database. Each test skips unless
// DATABASE_URL points at a migrated Postgres instance.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn designation_sync_upserts_by_external_id() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let id = (common::unique_suffix() % i64::MAX as u128) as i64;

    let res = client
        .post(format!("{}/designations/add/designation", server.base_url))
        .json(&json!({ "id": id, "name": "Engineer", "department": "Tech" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["designation"]["DesignationId"], id);
    assert_eq!(body["designation"]["name"], "Engineer");

    // Same external id again: overwrite, not duplicate
    let res = client
        .post(format!("{}/designations/add/designation", server.base_url))
        .json(&json!({ "id": id, "name": "Sr Engineer", "department": "Tech" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["designation"]["name"], "Sr Engineer");

    let res = client.get(format!("{}/designations", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let matching: Vec<_> = body["designations"]
        .as_array()
        .expect("designations array")
        .iter()
        .filter(|d| d["DesignationId"] == id)
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0]["name"], "Sr Engineer");
    Ok(())
}

#[tokio::test]
async fn employee_sync_is_idempotent_and_normalizes_email() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let suffix = common::unique_suffix();
    let employee_id = format!("E2E-{}", suffix);

    let payload = json!({
        "employeeId": employee_id,
        "name": "A",
        "email": format!("A{}@X.com", suffix),
        "department": "Tech",
        "designation": "Engineer",
        "joiningDate": "2024-01-01",
    });

    let res = client
        .post(format!("{}/employees/add/employees", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["employeeId"], employee_id.as_str());

    // Re-sync with the same external id succeeds and keeps one record
    let res = client
        .post(format!("{}/employees/add/employees", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn employee_sync_rejects_duplicate_email() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let suffix = common::unique_suffix();
    let email = format!("dup{}@x.com", suffix);

    let res = client
        .post(format!("{}/employees/add/employees", server.base_url))
        .json(&json!({
            "employeeId": format!("DUP-A-{}", suffix),
            "name": "A",
            "email": email,
            "department": "Tech",
            "designation": "Engineer",
            "joiningDate": "2024-01-01",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/employees/add/employees", server.base_url))
        .json(&json!({
            "employeeId": format!("DUP-B-{}", suffix),
            "name": "B",
            "email": email,
            "department": "Tech",
            "designation": "Engineer",
            "joiningDate": "2024-01-01",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Email already exists for another employee");
    Ok(())
}

#[tokio::test]
async fn status_sync_updates_existing_and_404s_unknown() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let suffix = common::unique_suffix();
    let employee_id = format!("ST-{}", suffix);

    let res = client
        .post(format!("{}/employees/add/employees", server.base_url))
        .json(&json!({
            "employeeId": employee_id,
            "name": "A",
            "email": format!("st{}@x.com", suffix),
            "department": "Tech",
            "designation": "Engineer",
            "joiningDate": "2024-01-01",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/employees/update/status", server.base_url))
        .json(&json!({ "employeeId": employee_id, "status": "Inactive" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "Inactive");

    // Update-only: an unknown id must not be created
    let res = client
        .post(format!("{}/employees/update/status", server.base_url))
        .json(&json!({ "employeeId": format!("GHOST-{}", suffix), "status": "Inactive" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

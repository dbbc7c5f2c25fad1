// Admin update/delete flows against a real database; skipped without
// DATABASE_URL.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

async fn sync_employee(base_url: &str, employee_id: &str, email: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/employees/add/employees", base_url))
        .json(&json!({
            "employeeId": employee_id,
            "name": "A",
            "email": email,
            "department": "Tech",
            "designation": "Engineer",
            "joiningDate": "2024-01-01",
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "sync failed: {}", res.status());
    Ok(())
}

#[tokio::test]
async fn update_uppercases_pan_and_rejects_duplicates() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let suffix = common::unique_suffix();
    let first = format!("PAN-A-{}", suffix);
    let second = format!("PAN-B-{}", suffix);

    sync_employee(&server.base_url, &first, &format!("pa{}@x.com", suffix)).await?;
    sync_employee(&server.base_url, &second, &format!("pb{}@x.com", suffix)).await?;

    // PAN letters land uppercased
    let res = client
        .put(format!("{}/employees/{}", server.base_url, first))
        .json(&json!({ "panNumber": "abcde1234f" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["employee"]["panNumber"], "ABCDE1234F");

    // The same PAN on another employee is a conflict
    let res = client
        .put(format!("{}/employees/{}", server.base_url, second))
        .json(&json!({ "panNumber": "ABCDE1234F" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "PAN number already exists for another employee");
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_employee() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let suffix = common::unique_suffix();
    let employee_id = format!("DEL-{}", suffix);

    sync_employee(&server.base_url, &employee_id, &format!("del{}@x.com", suffix)).await?;

    let res = client
        .delete(format!("{}/employees/{}", server.base_url, employee_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // A second delete finds nothing
    let res = client
        .delete(format!("{}/employees/{}", server.base_url, employee_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

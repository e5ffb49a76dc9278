mod common;
use common::{petcheck_cmd, validate_pure_json_response, write_suite};
use serde_json::{json, Value};
use wiremock::matchers::{body_string, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn get_pet_case(name: &str, id: i64, expected_status: u16) -> Value {
    json!({
        "name": name,
        "method": "GET",
        "path": "/pet/{petId}",
        "params": {"petId": id},
        "expected_status": expected_status,
        "assertions": [{"type": "body_has_property", "key": "id", "value": id}]
    })
}

async fn pet_server() -> MockServer {
    let mock_server = MockServer::start().await;
    for id in [5, 7] {
        Mock::given(method("GET"))
            .and(path(format!("/pet/{id}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": id, "name": "doggie", "status": "available"})),
            )
            .mount(&mock_server)
            .await;
    }
    mock_server
}

#[tokio::test]
async fn test_run_all_passing_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let mock_server = pet_server().await;
    let suite = write_suite(
        "all_passing",
        &json!({
            "base_url": mock_server.uri(),
            "cases": [get_pet_case("pets/get_5", 5, 200), get_pet_case("pets/get_7", 7, 200)]
        }),
    );

    let output = petcheck_cmd().arg("-s").arg(&suite).output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("[PASS] pets/get_5 GET"), "{stdout}");
    assert!(stdout.contains("[PASS] pets/get_7 GET"), "{stdout}");
    assert!(
        stdout.contains("summary: total=2 passed=2 failed=0 errored=0"),
        "{stdout}"
    );
    Ok(())
}

#[tokio::test]
async fn test_run_failed_assertion_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let mock_server = pet_server().await;
    let mut wrong = get_pet_case("pets/wrong_id", 7, 200);
    wrong["assertions"] = json!([
        {"type": "body_property_equals", "key": "id", "value": 8},
        {"type": "body_has_property", "key": "name"}
    ]);
    let suite = write_suite(
        "failed_assertion",
        &json!({"base_url": mock_server.uri(), "cases": [wrong]}),
    );

    let output = petcheck_cmd().arg("run").arg("-s").arg(&suite).output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1), "{stdout}");
    assert!(stdout.contains("[FAIL] pets/wrong_id"), "{stdout}");
    // The second assertion is still evaluated after the first one failed.
    assert!(stdout.contains("FAIL body property 'id' equals 8"), "{stdout}");
    assert!(stdout.contains("ok   body has property 'name'"), "{stdout}");
    assert!(
        stdout.contains("summary: total=1 passed=0 failed=1 errored=0"),
        "{stdout}"
    );
    Ok(())
}

#[test]
fn test_run_connection_refused_reports_every_case() -> Result<(), Box<dyn std::error::Error>> {
    let suite = write_suite(
        "refused",
        &json!({"cases": [get_pet_case("pets/a", 5, 200), get_pet_case("pets/b", 7, 200)]}),
    );

    let output = petcheck_cmd()
        .args(["run", "-o", "json", "--base-url", "http://127.0.0.1:1", "-s"])
        .arg(&suite)
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    let report = validate_pure_json_response(
        &stdout,
        &json!({
            "base_url": "http://127.0.0.1:1",
            "summary": {"total": 2, "passed": 0, "failed": 0, "errored": 2},
            "results": [
                {"case_name": "pets/a", "state": "transport_failed", "status": null,
                 "error": "{{regex:^connection error}}"},
                {"case_name": "pets/b", "state": "transport_failed", "status": null,
                 "error": "{{regex:^connection error}}"}
            ]
        }),
    )?;
    assert!(report["run_id"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_run_base_url_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let mock_server = pet_server().await;
    let suite = write_suite(
        "env_base_url",
        &json!({"base_url": "http://127.0.0.1:1", "cases": [get_pet_case("pets/get_5", 5, 200)]}),
    );

    let output = petcheck_cmd()
        .env("PETCHECK_BASE_URL", mock_server.uri())
        .arg("-s")
        .arg(&suite)
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0), "{stdout}");
    assert!(stdout.contains(&format!("{}/pet/5", mock_server.uri())), "{stdout}");
    Ok(())
}

#[tokio::test]
async fn test_run_name_filter_sends_only_selected() -> Result<(), Box<dyn std::error::Error>> {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pet/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let suite = write_suite(
        "name_filter",
        &json!({
            "base_url": mock_server.uri(),
            "cases": [get_pet_case("pets/get_5", 5, 200), get_pet_case("pets/get_7", 7, 200)]
        }),
    );

    let output = petcheck_cmd()
        .args(["-n", "get_5", "-s"])
        .arg(&suite)
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0), "{stdout}");
    assert!(stdout.contains("summary: total=1 passed=1"), "{stdout}");
    mock_server.verify().await;
    Ok(())
}

#[test]
fn test_run_filter_without_match_exits_five() -> Result<(), Box<dyn std::error::Error>> {
    let output = petcheck_cmd().args(["run", "-n", "no_such_case"]).output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(5));
    assert!(
        stderr.contains("No test case matches filter: no_such_case"),
        "{stderr}"
    );
    Ok(())
}

#[test]
fn test_run_oversized_timeout_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let output = petcheck_cmd()
        .args(["run", "--base-url", "http://127.0.0.1:1", "--timeout", "1e30"])
        .output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2), "{stderr}");
    assert!(stderr.contains("Timeout value '1e30' is too large"), "{stderr}");
    Ok(())
}

#[test]
fn test_run_suite_base_url_with_unsupported_scheme_exits_three(
) -> Result<(), Box<dyn std::error::Error>> {
    let suite = write_suite(
        "ftp_base_url",
        &json!({"base_url": "ftp://petstore.example", "cases": [get_pet_case("pets/get_5", 5, 200)]}),
    );

    let output = petcheck_cmd().arg("-s").arg(&suite).output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(3), "{stderr}");
    assert!(stderr.contains("unsupported scheme 'ftp'"), "{stderr}");
    Ok(())
}

#[test]
fn test_run_invalid_parallelism_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let output = petcheck_cmd().args(["run", "--parallel", "0"]).output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Parallelism must be at least 1"), "{stderr}");
    Ok(())
}

async fn mount_json(server: &MockServer, verb: &str, at: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Stands in for the public pet-store, answering the way the built-in suite
/// expects it to.
async fn petstore_stub() -> MockServer {
    let server = MockServer::start().await;
    let not_found = |message: &str| json!({"code": 1, "type": "error", "message": message});

    mount_json(&server, "GET", "/pet/5", 200, json!({"id": 5, "name": "doggie"})).await;
    mount_json(&server, "GET", "/pet/-1", 404, not_found("Pet not found")).await;
    mount_json(&server, "GET", "/pet/999999999999999", 404, not_found("Pet not found")).await;
    mount_json(&server, "GET", "/store/order/3", 200, json!({"id": 3, "status": "placed"})).await;
    mount_json(&server, "GET", "/store/order/-1", 404, not_found("Order not found")).await;
    mount_json(
        &server,
        "GET",
        "/store/order/9843754322325",
        404,
        not_found("Order not found"),
    )
    .await;
    mount_json(&server, "PUT", "/pet", 200, json!({"id": 23, "name": "Justin"})).await;
    mount_json(&server, "DELETE", "/pet/23", 200, json!({"code": 200})).await;
    mount_json(&server, "DELETE", "/pet/-1", 404, json!({})).await;
    mount_json(&server, "DELETE", "/pet/4837327532", 404, json!({})).await;

    Mock::given(method("POST"))
        .and(path("/pet"))
        .and(body_string_contains("34162"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 34162, "name": "Archi"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pet"))
        .and(body_string(r#"{"id":123, "name": "Fluffy","#))
        .respond_with(ResponseTemplate::new(415))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pet"))
        .and(body_string_contains("5.555555555543563e+26"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": 500, "type": "unknown", "message": "something bad happened"
        })))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn test_builtin_suite_against_stub() -> Result<(), Box<dyn std::error::Error>> {
    let server = petstore_stub().await;

    let output = petcheck_cmd()
        .args(["run", "--parallel", "4", "-o", "json", "--base-url"])
        .arg(server.uri())
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}\nstderr: {stderr}");
    let report = validate_pure_json_response(
        &stdout,
        &json!({"summary": {"total": 13, "passed": 13, "failed": 0, "errored": 0}}),
    )?;
    let names: Vec<&str> = report["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["case_name"].as_str().unwrap())
        .collect();
    assert_eq!(names.first(), Some(&"functional/get_pet_by_id"));
    assert_eq!(names.last(), Some(&"edge/get_order_long_id"));
    Ok(())
}

#[test]
fn test_help_lists_subcommands() -> Result<(), Box<dyn std::error::Error>> {
    let output = petcheck_cmd().arg("--help").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--base-url"), "{stdout}");

    let output = petcheck_cmd().args(["help"]).output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("run"), "{stdout}");
    assert!(stdout.contains("list"), "{stdout}");

    let output = petcheck_cmd().args(["run", "--help"]).output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PETCHECK_BASE_URL"), "{stdout}");
    Ok(())
}

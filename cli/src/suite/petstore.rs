//! The pet-store suite run when no suite file is given.
//!
//! Some expectations (500 for an oversized id, error statuses on DELETE, 415
//! for malformed JSON) describe how the public demo service has been seen to
//! behave, not a documented contract.

use super::assertion::Assertion;
use super::http_method::HttpMethod;
use super::test_case::TestCase;
use serde_json::{json, Value};

pub const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";

fn pet(id: u64, category: &str, name: &str) -> Value {
    json!({
        "id": id,
        "category": {"id": 0, "name": category},
        "name": name,
        "photoUrls": ["string"],
        "tags": [{"id": 0, "name": "string"}],
        "status": "available"
    })
}

fn has(key: &str, value: Value) -> Assertion {
    Assertion::BodyHasProperty {
        key: key.to_string(),
        value: Some(value),
    }
}

fn equals(key: &str, value: Value) -> Assertion {
    Assertion::BodyPropertyEquals {
        key: key.to_string(),
        value,
    }
}

pub fn cases() -> Vec<TestCase> {
    let mut cases = functional();
    cases.extend(negative());
    cases.extend(edge());
    cases
}

fn functional() -> Vec<TestCase> {
    vec![
        TestCase::new("functional/get_pet_by_id", HttpMethod::GET, "/pet/{petId}", 200)
            .param("petId", 5)
            .assert(has("id", json!(5))),
        TestCase::new("functional/add_pet", HttpMethod::POST, "/pet", 200)
            .json_body(pet(34162, "Dogs", "Archi"))
            .assert(has("id", json!(34162)))
            .assert(has("name", json!("Archi"))),
        TestCase::new("functional/update_pet", HttpMethod::PUT, "/pet", 200)
            .json_body(pet(23, "Cats", "Justin"))
            .assert(has("id", json!(23)))
            .assert(has("name", json!("Justin"))),
        TestCase::new("functional/delete_pet", HttpMethod::DELETE, "/pet/{petId}", 200)
            .param("petId", 23)
            .assert(Assertion::StatusEquals { status: 200 }),
        TestCase::new(
            "functional/get_order_by_id",
            HttpMethod::GET,
            "/store/order/{orderId}",
            200,
        )
        .param("orderId", 3)
        .assert(has("status", json!("placed"))),
    ]
}

fn negative() -> Vec<TestCase> {
    vec![
        TestCase::new("negative/get_pet_invalid_id", HttpMethod::GET, "/pet/{petId}", 404)
            .param("petId", -1)
            .assert(has("message", json!("Pet not found"))),
        TestCase::new(
            "negative/delete_pet_invalid_id",
            HttpMethod::DELETE,
            "/pet/{petId}",
            404,
        )
        .param("petId", -1)
        .assert(Assertion::StatusIsError),
        TestCase::new(
            "negative/get_order_invalid_id",
            HttpMethod::GET,
            "/store/order/{orderId}",
            404,
        )
        .param("orderId", -1)
        .assert(has("message", json!("Order not found"))),
    ]
}

fn edge() -> Vec<TestCase> {
    vec![
        TestCase::new("edge/get_pet_large_id", HttpMethod::GET, "/pet/{petId}", 404)
            .param("petId", 999_999_999_999_999_u64)
            .assert(equals("message", json!("Pet not found"))),
        TestCase::new("edge/add_pet_malformed_json", HttpMethod::POST, "/pet", 415)
            .raw_body(r#"{"id":123, "name": "Fluffy","#)
            .assert(Assertion::StatusEquals { status: 415 })
            .assert(Assertion::StatusIsError),
        // An id of 555555555554356334543543545 overflows every integer type and
        // goes over the wire in its float form, kept as raw text so the exponent
        // is written exactly as a JavaScript client would write it.
        TestCase::new("edge/add_pet_oversized_id", HttpMethod::POST, "/pet", 500)
            .raw_body(r#"{"id":5.555555555543563e+26,"name":"Archi","status":"available"}"#)
            .assert(Assertion::StatusIsError),
        TestCase::new("edge/delete_pet_long_id", HttpMethod::DELETE, "/pet/{petId}", 404)
            .param("petId", 4_837_327_532_u64)
            .assert(Assertion::StatusIsError),
        TestCase::new(
            "edge/get_order_long_id",
            HttpMethod::GET,
            "/store/order/{orderId}",
            404,
        )
        .param("orderId", 9_843_754_322_325_u64)
        .assert(has("type", json!("error")))
        .assert(has("message", json!("Order not found"))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::test_case::RequestBody;

    #[test]
    fn test_names_are_grouped() {
        for case in cases() {
            let group = case.group.as_deref().unwrap();
            assert!(
                ["functional", "negative", "edge"].contains(&group),
                "{}",
                case.name
            );
        }
    }

    #[test]
    fn test_paths_resolve() {
        let paths: Vec<String> = cases()
            .iter()
            .map(|case| case.resolved_path().unwrap())
            .collect();
        assert!(paths.contains(&"/pet/5".to_string()));
        assert!(paths.contains(&"/pet/-1".to_string()));
        assert!(paths.contains(&"/pet/999999999999999".to_string()));
        assert!(paths.contains(&"/store/order/9843754322325".to_string()));
    }

    #[test]
    fn test_oversized_id_is_sent_as_float() {
        let case = cases()
            .into_iter()
            .find(|case| case.name == "edge/add_pet_oversized_id")
            .unwrap();
        let Some(RequestBody::Raw(text)) = &case.body else {
            panic!("expected a raw body");
        };
        assert!(text.contains(r#""id":5.555555555543563e+26"#), "{text}");
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["id"].as_f64(), Some(5.555555555543563e26));
    }

    #[test]
    fn test_malformed_body_is_not_json() {
        let case = cases()
            .into_iter()
            .find(|case| case.name == "edge/add_pet_malformed_json")
            .unwrap();
        let Some(RequestBody::Raw(text)) = &case.body else {
            panic!("expected a raw body");
        };
        assert!(serde_json::from_str::<Value>(text).is_err());
    }
}

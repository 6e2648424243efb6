use serde_json::Value;

use crate::error::ShapeError;

/// Key under which the status API lists tracked homeworks.
pub const ITEMS_KEY: &str = "homeworks";

/// Check the decoded body against `{"homeworks": [...]}` and hand back the items.
///
/// A missing key or a non-list value is an error, never an empty result.
pub fn validate(raw: &Value) -> Result<&[Value], ShapeError> {
    let obj = raw.as_object().ok_or(ShapeError::NotAMapping)?;
    let items = obj.get(ITEMS_KEY).ok_or(ShapeError::MissingKey)?;
    items.as_array().map(Vec::as_slice).ok_or(ShapeError::NotASequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_objects_are_rejected() {
        for raw in [json!(null), json!([]), json!("homeworks"), json!(42), json!(true)] {
            assert_eq!(validate(&raw), Err(ShapeError::NotAMapping), "payload {raw}");
        }
    }

    #[test]
    fn missing_key_is_not_an_empty_list() {
        let raw = json!({"current_date": 1700000000});
        assert_eq!(validate(&raw), Err(ShapeError::MissingKey));
    }

    #[test]
    fn items_must_be_a_list() {
        for items in [json!({}), json!("x"), json!(null), json!(3)] {
            let raw = json!({ "homeworks": items });
            assert_eq!(validate(&raw), Err(ShapeError::NotASequence));
        }
    }

    #[test]
    fn extracts_items_in_order() {
        let raw = json!({
            "homeworks": [
                {"homework_name": "HW2", "status": "reviewing"},
                {"homework_name": "HW1", "status": "approved"}
            ],
            "current_date": 1700000000
        });
        let items = validate(&raw).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["homework_name"], "HW2");
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(validate(&json!({"homeworks": []})).unwrap().is_empty());
    }
}

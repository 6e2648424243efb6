use serde_json::Value;

use crate::error::FieldError;

use super::types::HomeworkStatus;

/// Wire key for the homework name; `name` is accepted as a fallback.
const NAME_KEYS: [&str; 2] = ["homework_name", "name"];
const STATUS_KEY: &str = "status";

/// Build the chat message for one tracked homework.
pub fn interpret(item: &Value) -> Result<String, FieldError> {
    let name = NAME_KEYS
        .iter()
        .find_map(|k| item.get(k).and_then(Value::as_str))
        .ok_or(FieldError::MissingName)?;
    let raw_status = item
        .get(STATUS_KEY)
        .and_then(Value::as_str)
        .ok_or(FieldError::MissingStatus)?;
    let status: HomeworkStatus = raw_status.parse()?;
    Ok(format!("Изменился статус проверки работы \"{}\". {}", name, status.verdict()))
}

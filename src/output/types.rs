//! JSON envelope printed on stdout by `--json` commands.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "hwbot.v1";

#[derive(Debug, Clone, Serialize, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub time: DateTime<Utc>,
    pub request_id: Uuid,
    pub op: &'static str,
    pub apply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Envelope {
    fn stamped(op: &'static str, apply: bool, body: Value, meta: Option<Meta>) -> Self {
        let (plan, result) = if apply { (None, Some(body)) } else { (Some(body), None) };
        Envelope { schema_version: SCHEMA_VERSION, time: Utc::now(), request_id: Uuid::new_v4(), op, apply, plan, result, meta }
    }

    pub fn plan<T: Serialize>(op: &'static str, plan: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        Ok(Self::stamped(op, false, serde_json::to_value(plan)?, meta))
    }

    pub fn result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        Ok(Self::stamped(op, true, serde_json::to_value(result)?, meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_envelope_has_no_result() {
        let env = Envelope::plan("poll", &json!({"message": "hi"}), None).expect("to serialize plan");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["schema_version"], "hwbot.v1");
        assert_eq!(v["op"], "poll");
        assert_eq!(v["apply"], false);
        assert_eq!(v["plan"]["message"], "hi");
        assert!(v.get("result").is_none());
        assert!(v.get("meta").is_none());
    }

    #[test]
    fn result_envelope_carries_meta() {
        let meta = Meta { duration_ms: Some(12), from_date: None };
        let env = Envelope::result("poll", &json!({"delivery": "delivered"}), Some(meta)).expect("to serialize result");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["apply"], true);
        assert_eq!(v["result"]["delivery"], "delivered");
        assert_eq!(v["meta"]["duration_ms"], 12);
        assert!(v["meta"].get("from_date").is_none());
    }
}

//! `AttributeValue` <-> JSON conversion.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Number, Value};

use crate::domain::store::StoreItem;

pub(super) fn item_from_dynamo(item: &HashMap<String, AttributeValue>) -> StoreItem {
    item.iter()
        .filter_map(|(name, attr)| to_json(attr).map(|value| (name.clone(), value)))
        .collect()
}

pub(super) fn item_to_dynamo(item: &StoreItem) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), from_json(value)))
        .collect()
}

/// Binary attributes have no JSON form and yield `None`.
pub(super) fn to_json(attr: &AttributeValue) -> Option<Value> {
    match attr {
        AttributeValue::S(s) => Some(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(n).map(Value::Number),
        AttributeValue::Bool(b) => Some(Value::Bool(*b)),
        AttributeValue::Null(_) => Some(Value::Null),
        AttributeValue::L(list) => Some(Value::Array(list.iter().filter_map(to_json).collect())),
        AttributeValue::M(map) => Some(Value::Object(item_from_dynamo(map))),
        AttributeValue::Ss(set) => Some(Value::Array(
            set.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(set) => Some(Value::Array(
            set.iter()
                .filter_map(|n| parse_number(n))
                .map(Value::Number)
                .collect(),
        )),
        _ => None,
    }
}

pub(super) fn from_json(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(from_json).collect()),
        Value::Object(map) => AttributeValue::M(item_to_dynamo(map)),
    }
}

fn parse_number(n: &str) -> Option<Number> {
    if let Ok(i) = n.parse::<i64>() {
        return Some(i.into());
    }
    n.parse::<f64>().ok().and_then(Number::from_f64)
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct PutRequest<'a> {
    pub items: &'a [Value],
}

#[derive(Debug, Default, Deserialize)]
pub struct PutResponse {
    #[serde(default)]
    pub processed: ItemList,
    #[serde(default)]
    pub failed: ItemList,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemList {
    #[serde(default)]
    pub items: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    #[serde(skip_serializing_if = "is_empty_query")]
    pub query: &'a [Map<String, Value>],
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<&'a str>,
}

fn is_empty_query(query: &&[Map<String, Value>]) -> bool {
    query.is_empty()
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub paging: Paging,
    #[serde(default)]
    pub items: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub size: usize,
    pub last: Option<String>,
}

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct MissingPositivePayload {
  pub values: Vec<i64>
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct MissingPositiveReply {
  pub result: usize
}

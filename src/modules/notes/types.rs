use std::collections::{BTreeMap, HashMap};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{internal_error, json_response, RESPONSE_HEADERS};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Note {
  pub id: i32,
  pub user: String,
  pub text: String,
  pub create_date: DateTime<Utc>
}

/// Proxy-style invocation event; only the header mapping is read.
#[derive(Debug, Default, Deserialize)]
pub struct InvokeEvent {
  #[serde(default)]
  pub headers: Option<HashMap<String, String>>
}

/// Outcome of one notes lookup: a status and, on success only, the notes.
#[derive(Clone, Debug, PartialEq)]
pub struct NotesResponse {
  pub status: StatusCode,
  pub body: Option<Vec<Note>>
}

/// Wire form of a [`NotesResponse`] with the status code and body as strings.
#[derive(Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
  pub status_code: String,
  pub headers: BTreeMap<String, String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub body: Option<String>
}

impl NotesResponse {
  pub fn ok(notes: Vec<Note>) -> Self {
    Self { status: StatusCode::OK, body: Some(notes) }
  }

  pub fn failure(status: StatusCode) -> Self {
    Self { status, body: None }
  }

  fn serialized_body(&self) -> Result<Option<String>, serde_json::Error> {
    self.body.as_ref().map(serde_json::to_string).transpose()
  }

  pub fn into_envelope(self) -> Result<ResponseEnvelope, serde_json::Error> {
    let body = self.serialized_body()?;
    let headers = RESPONSE_HEADERS
      .iter()
      .map(|(name, value)| (name.to_string(), value.to_string()))
      .collect();

    Ok(ResponseEnvelope {
      status_code: self.status.as_u16().to_string(),
      headers,
      body
    })
  }
}

impl IntoResponse for NotesResponse {
  fn into_response(self) -> Response {
    match self.serialized_body() {
      Ok(body) => json_response(self.status, body),
      Err(err) => internal_error(err).into_response()
    }
  }
}

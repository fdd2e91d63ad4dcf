use serde_json::Value;

/// Raw outcome of one API query: the HTTP status plus the decoded JSON body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

use serde::Serialize;

/// Body returned by every endpoint that persists one record.
#[derive(Debug, Serialize)]
pub struct Created {
    pub ok: bool,
    pub id: String,
}

impl Created {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            ok: true,
            id: id.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

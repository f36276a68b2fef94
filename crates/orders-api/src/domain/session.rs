use serde::{Deserialize, Serialize};

/// Identity of the logged-in customer as carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub contact: Option<String>,
}

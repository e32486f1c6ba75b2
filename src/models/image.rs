use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVersions {
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
    pub micro: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub link: Option<String>,
    pub versions: Option<ImageVersions>,
}

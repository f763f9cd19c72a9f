use serde::Serialize;

/// One search candidate returned by the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub uri: String,
}

/// What the create-playlist call needs to know besides the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistDetails {
    pub name: String,
    pub description: Option<String>,
    pub public: bool,
}

/// A playlist that exists on the remote account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistHandle {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
}

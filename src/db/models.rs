use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub partner: Option<String>,
    /// Public path of the uploaded photo, e.g. `/uploads/1718000000000.jpg`.
    pub photo: Option<String>,
    pub votes: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewCandidate {
    pub name: String,
    pub partner: Option<String>,
    pub photo: Option<String>,
}

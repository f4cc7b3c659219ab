use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct User {
    #[sqlx(rename = "idUser")]
    pub id: i32,
    #[sqlx(rename = "mail")]
    pub email: String,
    #[sqlx(rename = "firstname")]
    pub first_name: String,
    #[sqlx(rename = "lastname")]
    pub last_name: String,
    /// Argon2 PHC string, never the plaintext.
    #[serde(skip_serializing)]
    pub password: String,
    #[sqlx(rename = "isAdmin")]
    pub is_admin: i32,
    #[sqlx(rename = "numProjects")]
    pub num_projects: i32,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.is_admin != 0
    }
}

/// Sign-up payload as received from a caller.
///
/// `is_admin` and `num_projects` are accepted so request bodies deserialize,
/// but `insert_user` ignores them: new accounts are never admins and start
/// with zero projects.
#[derive(Deserialize, Debug, Clone)]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: i32,
    #[serde(default)]
    pub num_projects: i32,
}

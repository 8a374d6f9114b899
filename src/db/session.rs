use color_eyre::{eyre::eyre, Result};
use ulid::Ulid;

use super::models::AuthUser;
use super::Db;

impl Db {
    pub async fn create_user_session(&self, user_id: i32) -> Result<String> {
        let session = Ulid::new().to_string();
        let mut tables = self.write()?;

        if !tables.users.iter().any(|row| row.user.id == user_id) {
            return Err(eyre!("cannot open a session for unknown user {user_id}"));
        }
        tables.sessions.insert(session.clone(), user_id);

        tracing::info!("new user session created for user_id={user_id}");
        Ok(session)
    }

    pub async fn get_user_by_session(&self, session_id: &str) -> Result<Option<AuthUser>> {
        let tables = self.read()?;
        let Some(user_id) = tables.sessions.get(session_id) else {
            return Ok(None);
        };

        Ok(tables
            .users
            .iter()
            .find(|row| row.user.id == *user_id)
            .map(|row| row.user.clone()))
    }

    pub async fn delete_user_session(&self, session_id: &str) -> Result<()> {
        let mut tables = self.write()?;
        if tables.sessions.remove(session_id).is_some() {
            tracing::info!("user session closed");
        }
        Ok(())
    }
}

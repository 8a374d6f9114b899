use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use color_eyre::{eyre::eyre, Result};

use super::models::{AuthUser, Role};
use super::{Db, UserRow};

impl Db {
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: Role,
    ) -> Result<i32> {
        let password_hash = hash_password(password)?;
        let mut tables = self.write()?;

        if tables.users.iter().any(|row| row.user.email == email) {
            return Err(eyre!("email {email} is already registered"));
        }

        let user_id = tables.allocate_id();
        tables.users.push(UserRow {
            user: AuthUser {
                id: user_id,
                email: email.to_string(),
                display_name: display_name.to_string(),
                role,
                class_id: None,
            },
            password_hash,
        });

        tracing::info!("new user created: id={user_id}, email={email}, role={role}");
        Ok(user_id)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>> {
        let tables = self.read()?;
        Ok(tables
            .users
            .iter()
            .find(|row| row.user.email == email)
            .map(|row| row.user.clone()))
    }

    pub async fn find_user(&self, user_id: i32) -> Result<Option<AuthUser>> {
        let tables = self.read()?;
        Ok(tables
            .users
            .iter()
            .find(|row| row.user.id == user_id)
            .map(|row| row.user.clone()))
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        let stored_hash = {
            let tables = self.read()?;
            match tables.users.iter().find(|row| row.user.email == email) {
                Some(row) => row.password_hash.clone(),
                None => return Ok(false),
            }
        };

        Ok(verify_password(password, &stored_hash))
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let tables = self.read()?;
        Ok(tables.users.iter().any(|row| row.user.email == email))
    }

    /// Returns `false` when the current password does not match.
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<bool> {
        let stored_hash = {
            let tables = self.read()?;
            tables
                .users
                .iter()
                .find(|row| row.user.id == user_id)
                .map(|row| row.password_hash.clone())
                .ok_or_else(|| eyre!("user {user_id} not found"))?
        };

        if !verify_password(current_password, &stored_hash) {
            return Ok(false);
        }

        let new_hash = hash_password(new_password)?;
        let mut tables = self.write()?;
        let row = tables
            .users
            .iter_mut()
            .find(|row| row.user.id == user_id)
            .ok_or_else(|| eyre!("user {user_id} not found"))?;
        row.password_hash = new_hash;

        tracing::info!("password changed for user_id={user_id}");
        Ok(true)
    }

    pub async fn rename_user(&self, user_id: i32, display_name: &str) -> Result<()> {
        let mut tables = self.write()?;
        let row = tables
            .users
            .iter_mut()
            .find(|row| row.user.id == user_id)
            .ok_or_else(|| eyre!("user {user_id} not found"))?;
        row.user.display_name = display_name.to_string();

        tracing::info!("display name changed for user_id={user_id}");
        Ok(())
    }

    pub async fn students(&self) -> Result<Vec<AuthUser>> {
        let tables = self.read()?;
        Ok(tables
            .users
            .iter()
            .filter(|row| row.user.role == Role::Aluno)
            .map(|row| row.user.clone())
            .collect())
    }
}

pub(super) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!("stored password hash is malformed: {e}");
            false
        }
    }
}

use color_eyre::Result;

use crate::db::models::{AuthUser, Role};
use crate::db::Db;

// ---------------------------------------------------------------------------
// AuthRepository trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait AuthRepository: Send + Sync {
    fn email_exists(&self, email: &str) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: Role,
    ) -> impl std::future::Future<Output = Result<i32>> + Send;

    fn create_user_session(
        &self,
        user_id: i32,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    fn verify_user_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<AuthUser>>> + Send;

    fn delete_user_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn rename_user(
        &self,
        user_id: i32,
        display_name: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl AuthRepository for Db {
    async fn email_exists(&self, email: &str) -> Result<bool> {
        Db::email_exists(self, email).await
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: Role,
    ) -> Result<i32> {
        Db::create_user(self, email, password, display_name, role).await
    }

    async fn create_user_session(&self, user_id: i32) -> Result<String> {
        Db::create_user_session(self, user_id).await
    }

    async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        Db::verify_user_password(self, email, password).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>> {
        Db::find_user_by_email(self, email).await
    }

    async fn delete_user_session(&self, session_id: &str) -> Result<()> {
        Db::delete_user_session(self, session_id).await
    }

    async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<bool> {
        Db::change_password(self, user_id, current_password, new_password).await
    }

    async fn rename_user(&self, user_id: i32, display_name: &str) -> Result<()> {
        Db::rename_user(self, user_id, display_name).await
    }
}

// ---------------------------------------------------------------------------
// Outcome enums
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum RegisterOutcome {
    /// User created and session started.
    LoggedIn { token: String, role: Role },
    /// Required fields were empty.
    EmptyFields,
    /// Email already in use.
    EmailTaken,
    /// Password does not meet minimum requirements.
    WeakPassword,
}

#[derive(Debug)]
pub enum LoginOutcome {
    /// Login succeeded. Contains the session token and where the user belongs.
    Success { token: String, role: Role },
    /// Password was incorrect (or email not found).
    InvalidCredentials,
    EmptyFields,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ChangePasswordOutcome {
    Success,
    EmptyFields,
    Mismatch,
    WeakPassword,
    IncorrectPassword,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    Success,
    EmptyName,
}

pub const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AuthService<R: AuthRepository = Db> {
    repo: R,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Ok(LoginOutcome::EmptyFields);
        }

        let verified = self.repo.verify_user_password(email, password).await?;
        if !verified {
            return Ok(LoginOutcome::InvalidCredentials);
        }

        let user =
            self.repo.find_user_by_email(email).await?.ok_or_else(|| {
                color_eyre::eyre::eyre!("user not found after password verification")
            })?;

        let token = self.repo.create_user_session(user.id).await?;
        tracing::info!("user logged in: id={}, role={}", user.id, user.role);

        Ok(LoginOutcome::Success {
            token,
            role: user.role,
        })
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: Role,
    ) -> Result<RegisterOutcome> {
        let email = email.trim();
        let display_name = display_name.trim();
        if email.is_empty() || password.is_empty() || display_name.is_empty() {
            return Ok(RegisterOutcome::EmptyFields);
        }

        if password.len() < MIN_PASSWORD_LENGTH {
            return Ok(RegisterOutcome::WeakPassword);
        }

        let exists = self.repo.email_exists(email).await?;
        if exists {
            return Ok(RegisterOutcome::EmailTaken);
        }

        let user_id = self
            .repo
            .create_user(email, password, display_name, role)
            .await?;
        let token = self.repo.create_user_session(user_id).await?;
        Ok(RegisterOutcome::LoggedIn { token, role })
    }

    pub async fn logout(&self, session_id: &str) -> Result<()> {
        self.repo.delete_user_session(session_id).await
    }

    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<ChangePasswordOutcome> {
        if current_password.is_empty() || new_password.is_empty() {
            return Ok(ChangePasswordOutcome::EmptyFields);
        }

        if new_password != confirm_password {
            return Ok(ChangePasswordOutcome::Mismatch);
        }

        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Ok(ChangePasswordOutcome::WeakPassword);
        }

        let changed = self
            .repo
            .change_password(user_id, current_password, new_password)
            .await?;

        if changed {
            Ok(ChangePasswordOutcome::Success)
        } else {
            Ok(ChangePasswordOutcome::IncorrectPassword)
        }
    }

    /// Renames the user. Every live session sees the new name on its next
    /// request since sessions only hold the user id.
    pub async fn update_display_name(
        &self,
        user_id: i32,
        display_name: &str,
    ) -> Result<RenameOutcome> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Ok(RenameOutcome::EmptyName);
        }

        self.repo.rename_user(user_id, display_name).await?;
        Ok(RenameOutcome::Success)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service(mock_repo: MockAuthRepository) -> AuthService<MockAuthRepository> {
        AuthService::new(mock_repo)
    }

    fn teacher() -> AuthUser {
        AuthUser {
            id: 1,
            email: "test@example.com".to_string(),
            display_name: "Test".to_string(),
            role: Role::Professor,
            class_id: None,
        }
    }

    // ----- login tests -----

    #[tokio::test]
    async fn login_success_returns_session_token_and_role() {
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .returning(|_, _| Box::pin(async { Ok(true) }));
        mock.expect_find_user_by_email()
            .returning(|_| Box::pin(async { Ok(Some(teacher())) }));
        mock.expect_create_user_session()
            .withf(|id| *id == 1)
            .returning(|_| Box::pin(async { Ok("session-token-123".to_string()) }));

        let svc = service(mock);
        let outcome = svc.login("test@example.com", "password").await.unwrap();

        assert!(matches!(
            outcome,
            LoginOutcome::Success { ref token, role: Role::Professor } if token == "session-token-123"
        ));
    }

    #[tokio::test]
    async fn login_wrong_password_returns_invalid_credentials() {
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        mock.expect_create_user_session().never();

        let svc = service(mock);
        let outcome = svc.login("test@example.com", "wrong").await.unwrap();

        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_blank_email_skips_repository() {
        let mock = MockAuthRepository::new();
        let svc = service(mock);

        let outcome = svc.login("   ", "password").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::EmptyFields));
    }

    // ----- register tests -----

    #[tokio::test]
    async fn register_empty_fields_returns_empty_fields() {
        let svc = service(MockAuthRepository::new());
        let outcome = svc.register("", "pass", "name", Role::Aluno).await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmptyFields));

        let svc = service(MockAuthRepository::new());
        let outcome = svc
            .register("a@b.com", "", "name", Role::Aluno)
            .await
            .unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmptyFields));

        let svc = service(MockAuthRepository::new());
        let outcome = svc
            .register("a@b.com", "pass", " ", Role::Aluno)
            .await
            .unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmptyFields));
    }

    #[tokio::test]
    async fn register_short_password_returns_weak_password() {
        let svc = service(MockAuthRepository::new());
        let outcome = svc
            .register("a@b.com", "short", "Name", Role::Aluno)
            .await
            .unwrap();
        assert!(matches!(outcome, RegisterOutcome::WeakPassword));
    }

    #[tokio::test]
    async fn register_email_taken_returns_email_taken() {
        let mut mock = MockAuthRepository::new();
        mock.expect_email_exists()
            .returning(|_| Box::pin(async { Ok(true) }));
        mock.expect_create_user().never();

        let svc = service(mock);
        let outcome = svc
            .register("taken@example.com", "password123", "name", Role::Aluno)
            .await
            .unwrap();

        assert!(matches!(outcome, RegisterOutcome::EmailTaken));
    }

    #[tokio::test]
    async fn register_creates_user_with_requested_role() {
        let mut mock = MockAuthRepository::new();
        mock.expect_email_exists()
            .returning(|_| Box::pin(async { Ok(false) }));
        mock.expect_create_user()
            .withf(|_, _, name, role| name == "Name" && *role == Role::Professor)
            .returning(|_, _, _, _| Box::pin(async { Ok(7) }));
        mock.expect_create_user_session()
            .withf(|id| *id == 7)
            .returning(|_| Box::pin(async { Ok("session-abc".to_string()) }));

        let svc = service(mock);
        let outcome = svc
            .register("new@example.com", "password123", " Name ", Role::Professor)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            RegisterOutcome::LoggedIn { ref token, role: Role::Professor } if token == "session-abc"
        ));
    }

    // ----- logout tests -----

    #[tokio::test]
    async fn logout_deletes_session() {
        let mut mock = MockAuthRepository::new();
        mock.expect_delete_user_session()
            .withf(|id| id == "session-123")
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let svc = service(mock);
        svc.logout("session-123").await.unwrap();
    }

    // ----- change_password tests -----

    #[tokio::test]
    async fn change_password_empty_fields_returns_empty_fields() {
        let svc = service(MockAuthRepository::new());
        let outcome = svc.change_password(1, "", "new", "new").await.unwrap();
        assert_eq!(outcome, ChangePasswordOutcome::EmptyFields);

        let svc = service(MockAuthRepository::new());
        let outcome = svc.change_password(1, "old", "", "").await.unwrap();
        assert_eq!(outcome, ChangePasswordOutcome::EmptyFields);
    }

    #[tokio::test]
    async fn change_password_confirmation_must_match() {
        let svc = service(MockAuthRepository::new());
        let outcome = svc
            .change_password(1, "oldpassword", "newpassword", "newpassw0rd")
            .await
            .unwrap();
        assert_eq!(outcome, ChangePasswordOutcome::Mismatch);
    }

    #[tokio::test]
    async fn change_password_too_short_returns_weak_password() {
        let svc = service(MockAuthRepository::new());
        let outcome = svc
            .change_password(1, "oldpassword", "short", "short")
            .await
            .unwrap();
        assert_eq!(outcome, ChangePasswordOutcome::WeakPassword);
    }

    #[tokio::test]
    async fn change_password_success() {
        let mut mock = MockAuthRepository::new();
        mock.expect_change_password()
            .returning(|_, _, _| Box::pin(async { Ok(true) }));

        let svc = service(mock);
        let outcome = svc
            .change_password(1, "oldpassword", "newpassword", "newpassword")
            .await
            .unwrap();
        assert_eq!(outcome, ChangePasswordOutcome::Success);
    }

    #[tokio::test]
    async fn change_password_incorrect_returns_incorrect() {
        let mut mock = MockAuthRepository::new();
        mock.expect_change_password()
            .returning(|_, _, _| Box::pin(async { Ok(false) }));

        let svc = service(mock);
        let outcome = svc
            .change_password(1, "wrongpassword", "newpassword", "newpassword")
            .await
            .unwrap();
        assert_eq!(outcome, ChangePasswordOutcome::IncorrectPassword);
    }

    // ----- update_display_name tests -----

    #[tokio::test]
    async fn blank_display_name_is_rejected() {
        let mut mock = MockAuthRepository::new();
        mock.expect_rename_user().never();

        let svc = service(mock);
        let outcome = svc.update_display_name(1, "  ").await.unwrap();
        assert_eq!(outcome, RenameOutcome::EmptyName);
    }

    #[tokio::test]
    async fn display_name_is_trimmed_before_saving() {
        let mut mock = MockAuthRepository::new();
        mock.expect_rename_user()
            .withf(|id, name| *id == 1 && name == "Maria")
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let svc = service(mock);
        let outcome = svc.update_display_name(1, " Maria ").await.unwrap();
        assert_eq!(outcome, RenameOutcome::Success);
    }
}

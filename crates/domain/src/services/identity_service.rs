use crate::bridges::{send_detached, Email, Mailer};
use crate::entities::{Address, Book, User};
use crate::errors::StoreError;
use crate::repositories::{BookRepository, UserRepository};
use crate::templates;
use crate::tokens::TokenSigner;
use bcrypt::DEFAULT_COST;
use chrono::{Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

const RESET_TOKEN_TTL_MINUTES: i64 = 10;

/// Profile payload returned by the auth endpoints, with a bearer token
/// attached on the flows that issue one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthenticatedUser {
    fn from_user(user: &User, token: Option<String>) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            address: user.address.clone(),
            token,
        }
    }
}

/// Partial profile edit. Empty strings keep the current value, the way
/// the storefront form submits untouched fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub address: Option<AddressUpdate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressUpdate {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// Accounts, sessions, wishlists, and password reset.
pub struct IdentityService {
    user_repository: Arc<dyn UserRepository>,
    book_repository: Arc<dyn BookRepository>,
    mailer: Arc<dyn Mailer>,
    signer: TokenSigner,
}

impl IdentityService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        book_repository: Arc<dyn BookRepository>,
        mailer: Arc<dyn Mailer>,
        signer: TokenSigner,
    ) -> Self {
        Self {
            user_repository,
            book_repository,
            mailer,
            signer,
        }
    }

    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<AuthenticatedUser, StoreError> {
        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(StoreError::ValidationError(
                "User already exists".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(StoreError::ValidationError(
                "Invalid user data".to_string(),
            ));
        }

        let password_hash = hash_password(&password)?;
        let user = User::new(name, email, password_hash);
        user.validate()?;

        let saved = self.user_repository.save(&user).await?;
        let token = self.signer.issue(saved.id, saved.is_admin)?;
        Ok(AuthenticatedUser::from_user(&saved, Some(token)))
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, StoreError> {
        match self.user_repository.find_by_email(email).await? {
            Some(user) if verify_password(password, &user.password_hash) => {
                let token = self.signer.issue(user.id, user.is_admin)?;
                Ok(AuthenticatedUser::from_user(&user, Some(token)))
            }
            _ => Err(StoreError::Unauthorized(
                "Invalid email or password".to_string(),
            )),
        }
    }

    /// Resolves a bearer token to the account it belongs to.
    pub async fn authorize(&self, token: &str) -> Result<User, StoreError> {
        let claims = self.signer.verify(token)?;
        match self.user_repository.find_by_id(claims.sub).await? {
            Some(user) => Ok(user),
            None => Err(StoreError::Unauthorized(
                "Not authorized, token failed".to_string(),
            )),
        }
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<AuthenticatedUser, StoreError> {
        let user = self.get_user(user_id).await?;
        Ok(AuthenticatedUser::from_user(&user, None))
    }

    /// Applies a partial profile edit and returns the profile with a
    /// fresh token, so the client can swap its stored session in place.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        changes: ProfileUpdate,
    ) -> Result<AuthenticatedUser, StoreError> {
        let mut user = self.get_user(user_id).await?;

        merge_field(&mut user.name, changes.name);
        merge_field(&mut user.email, changes.email);
        if let Some(password) = changes.password {
            if !password.is_empty() {
                user.password_hash = hash_password(&password)?;
            }
        }
        if let Some(address) = changes.address {
            let mut merged = user.address.take().unwrap_or_default();
            merge_field(&mut merged.street, address.street);
            merge_field(&mut merged.city, address.city);
            merge_field(&mut merged.state, address.state);
            merge_field(&mut merged.zip, address.zip);
            merge_field(&mut merged.country, address.country);
            user.address = Some(merged);
        }
        user.updated_at = Utc::now();
        user.validate()?;

        let updated = self.user_repository.update(&user).await?;
        let token = self.signer.issue(updated.id, updated.is_admin)?;
        Ok(AuthenticatedUser::from_user(&updated, Some(token)))
    }

    /// Resolves the wishlist to full book records, skipping entries whose
    /// book has since been deleted.
    pub async fn wishlist(&self, user_id: Uuid) -> Result<Vec<Book>, StoreError> {
        let user = self.get_user(user_id).await?;
        let mut books = Vec::with_capacity(user.wishlist.len());
        for book_id in &user.wishlist {
            if let Some(book) = self.book_repository.find_by_id(*book_id).await? {
                books.push(book);
            }
        }
        Ok(books)
    }

    pub async fn add_to_wishlist(&self, user_id: Uuid, book_id: Uuid) -> Result<(), StoreError> {
        let mut user = self.get_user(user_id).await?;
        if user.wishlist.contains(&book_id) {
            return Err(StoreError::ValidationError(
                "Book already in wishlist".to_string(),
            ));
        }
        user.wishlist.push(book_id);
        user.updated_at = Utc::now();
        self.user_repository.update(&user).await?;
        Ok(())
    }

    pub async fn remove_from_wishlist(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut user = self.get_user(user_id).await?;
        user.wishlist.retain(|id| *id != book_id);
        user.updated_at = Utc::now();
        self.user_repository.update(&user).await?;
        Ok(())
    }

    /// Starts a password reset. The reply is identical whether or not the
    /// address has an account, so the endpoint cannot probe for users.
    pub async fn forgot_password(&self, email: &str) -> Result<(), StoreError> {
        let mut user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => return Ok(()),
        };

        let token_bytes: [u8; 20] = rand::thread_rng().gen();
        let raw_token = hex::encode(token_bytes);
        user.reset_token_hash = Some(hash_reset_token(&raw_token));
        user.reset_token_expires =
            Some(Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES));
        user.updated_at = Utc::now();
        self.user_repository.update(&user).await?;

        send_detached(
            self.mailer.clone(),
            Email {
                to: user.email,
                subject: "Password Reset Request - BookHaven".to_string(),
                html: templates::reset_html(&raw_token),
            },
        );
        Ok(())
    }

    /// Consumes a reset token: one use, within its expiry window.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<AuthenticatedUser, StoreError> {
        let hashed = hash_reset_token(token);
        let mut user = match self.user_repository.find_by_reset_token(&hashed).await? {
            Some(user) => user,
            None => return Err(invalid_token()),
        };

        let expired = user
            .reset_token_expires
            .map_or(true, |expires| expires < Utc::now());
        if expired {
            return Err(invalid_token());
        }
        if new_password.is_empty() {
            return Err(StoreError::ValidationError(
                "Password cannot be empty".to_string(),
            ));
        }

        user.password_hash = hash_password(new_password)?;
        user.clear_reset_token();
        let updated = self.user_repository.update(&user).await?;
        let token = self.signer.issue(updated.id, updated.is_admin)?;
        Ok(AuthenticatedUser::from_user(&updated, Some(token)))
    }

    pub async fn get_users(&self) -> Result<Vec<User>, StoreError> {
        self.user_repository.find_all().await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, StoreError> {
        match self.user_repository.find_by_id(id).await? {
            Some(user) => Ok(user),
            None => Err(StoreError::UserNotFound),
        }
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        changes: AdminUserUpdate,
    ) -> Result<User, StoreError> {
        let mut user = self.get_user(id).await?;
        merge_field(&mut user.name, changes.name);
        merge_field(&mut user.email, changes.email);
        if let Some(is_admin) = changes.is_admin {
            user.is_admin = is_admin;
        }
        user.updated_at = Utc::now();
        user.validate()?;
        self.user_repository.update(&user).await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        self.get_user(id).await?;
        self.user_repository.delete(id).await
    }
}

fn merge_field(current: &mut String, incoming: Option<String>) {
    if let Some(value) = incoming {
        if !value.is_empty() {
            *current = value;
        }
    }
}

fn hash_password(password: &str) -> Result<String, StoreError> {
    bcrypt::hash(password, DEFAULT_COST).map_err(|e| StoreError::Internal(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

fn hash_reset_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

fn invalid_token() -> StoreError {
    StoreError::ValidationError("Invalid Token".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{InMemoryBooks, InMemoryUsers, RecordingMailer};
    use tokio::time::{sleep, Duration as TokioDuration};

    fn service() -> (IdentityService, Arc<InMemoryUsers>, Arc<RecordingMailer>) {
        let users = Arc::new(InMemoryUsers::default());
        let books = Arc::new(InMemoryBooks::default());
        let mailer = Arc::new(RecordingMailer::default());
        let signer = TokenSigner::new("identity-test-secret", 30);
        (
            IdentityService::new(users.clone(), books, mailer.clone(), signer),
            users,
            mailer,
        )
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let (service, _, _) = service();

        let registered = service
            .register(
                "Jane Reader".to_string(),
                "jane@example.com".to_string(),
                "123456".to_string(),
            )
            .await
            .unwrap();
        assert!(registered.token.is_some());
        assert!(!registered.is_admin);

        let session = service.login("jane@example.com", "123456").await.unwrap();
        assert_eq!(session.id, registered.id);

        let user = service
            .authorize(session.token.as_deref().unwrap())
            .await
            .unwrap();
        assert_eq!(user.email, "jane@example.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (service, _, _) = service();
        service
            .register("A".to_string(), "a@example.com".to_string(), "pw".to_string())
            .await
            .unwrap();

        let err = service
            .register("B".to_string(), "a@example.com".to_string(), "pw".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already exists");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let (service, _, _) = service();
        service
            .register("A".to_string(), "a@example.com".to_string(), "right".to_string())
            .await
            .unwrap();

        let err = service.login("a@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");

        let err = service.login("nobody@example.com", "right").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn wishlist_rejects_duplicates_and_removes() {
        let (service, _, _) = service();
        let account = service
            .register("A".to_string(), "a@example.com".to_string(), "pw".to_string())
            .await
            .unwrap();
        let book_id = Uuid::new_v4();

        service.add_to_wishlist(account.id, book_id).await.unwrap();
        let err = service
            .add_to_wishlist(account.id, book_id)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Book already in wishlist");

        service
            .remove_from_wishlist(account.id, book_id)
            .await
            .unwrap();
        service.add_to_wishlist(account.id, book_id).await.unwrap();
    }

    #[tokio::test]
    async fn password_reset_consumes_the_emailed_token() {
        let (service, _, mailer) = service();
        service
            .register("A".to_string(), "a@example.com".to_string(), "oldpass".to_string())
            .await
            .unwrap();

        service.forgot_password("a@example.com").await.unwrap();
        sleep(TokioDuration::from_millis(50)).await;

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Password Reset Request - BookHaven");
        let raw_token = extract_code(&sent[0].html);

        let session = service
            .reset_password(&raw_token, "newpass")
            .await
            .unwrap();
        assert!(session.token.is_some());

        service.login("a@example.com", "newpass").await.unwrap();
        assert!(service.login("a@example.com", "oldpass").await.is_err());

        // One use only.
        let err = service
            .reset_password(&raw_token, "again")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Token");
    }

    #[tokio::test]
    async fn expired_reset_token_is_rejected() {
        let (service, users, _) = service();
        let account = service
            .register("A".to_string(), "a@example.com".to_string(), "pw".to_string())
            .await
            .unwrap();

        let raw_token = "deadbeef";
        let mut user = users.get(account.id).await.unwrap();
        user.reset_token_hash = Some(hash_reset_token(raw_token));
        user.reset_token_expires = Some(Utc::now() - Duration::minutes(1));
        users.put(user).await;

        let err = service.reset_password(raw_token, "np").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid Token");
    }

    #[tokio::test]
    async fn unknown_email_still_replies_ok() {
        let (service, _, mailer) = service();
        service.forgot_password("ghost@example.com").await.unwrap();
        sleep(TokioDuration::from_millis(20)).await;
        assert!(mailer.sent().await.is_empty());
    }

    fn extract_code(html: &str) -> String {
        let start = html.find("<code").and_then(|at| {
            html[at..].find('>').map(|close| at + close + 1)
        });
        let start = start.expect("reset mail carries a code block");
        let end = html[start..].find("</code>").expect("code block closes") + start;
        html[start..end].trim().to_string()
    }
}

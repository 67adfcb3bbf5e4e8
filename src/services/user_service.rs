use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            user::{NewUser, UserChanges},
            Identity, User,
        },
        dto::request::{CreateUserRequest, LoginRequest, UpdateUserRequest},
    },
    pagination::{Page, PageRequest},
    repositories::UserRepository,
    services::password::{hash_password, verify_password},
};

const USER_NOT_FOUND: &str = "User does not exist";
const BAD_CREDENTIALS: &str = "Username or password incorrect";

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            repository,
            bcrypt_cost,
        }
    }

    /// Self-service sign-up. Rejects a username or email already in use.
    pub async fn register(&self, request: CreateUserRequest) -> AppResult<User> {
        request.validate()?;

        if self
            .repository
            .find_by_username_or_email(&request.username, &request.email)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists("User already exists".to_string()));
        }

        self.insert(request).await
    }

    /// Account creation by an administrator.
    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<User> {
        request.validate()?;

        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already exists".to_string()));
        }

        self.insert(request).await
    }

    async fn insert(&self, request: CreateUserRequest) -> AppResult<User> {
        let password_hash = hash_password(request.password, self.bcrypt_cost).await?;
        let user = self
            .repository
            .create(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
                active: true,
                admin: false,
            })
            .await?;

        log::info!("created user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Checks an email/password pair. Unknown emails, wrong passwords and
    /// deactivated accounts are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> AppResult<User> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound(BAD_CREDENTIALS.to_string()))?;

        let verified = verify_password(request.password, user.password.clone()).await?;
        if !verified || !user.active {
            log::debug!("login rejected for user {}", user.id);
            return Err(AppError::NotFound(BAD_CREDENTIALS.to_string()));
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    /// Identity lookup used by the auth gate. A missing user is `Ok(None)`.
    pub async fn find_identity(&self, id: i64) -> AppResult<Option<Identity>> {
        let user = self.repository.find_by_id(id).await?;
        Ok(user.as_ref().map(Identity::from))
    }

    pub async fn list_users(&self, page: PageRequest) -> AppResult<Page<User>> {
        self.repository.list(page).await
    }

    pub async fn update_user(&self, id: i64, request: UpdateUserRequest) -> AppResult<User> {
        request.validate()?;

        let password_hash = match request.password {
            Some(password) => Some(hash_password(password, self.bcrypt_cost).await?),
            None => None,
        };
        let changes = UserChanges {
            username: request.username,
            email: request.email,
            password_hash,
            active: request.active,
            admin: request.admin,
        };

        self.repository
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }
        log::info!("deleted user {}", id);
        Ok(())
    }
}

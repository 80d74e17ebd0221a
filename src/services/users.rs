//! Users service

use crate::{error::AppResult, models::user::User, repository::Repository};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all users ordered by name
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list_all().await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }
}

//! User accounts and the partner application workflow.
//!
//! Users live in a [`JsonFileStore`]; pending applications and approved
//! partners are two flat id lists. A user applies once, an admin approves the
//! application, and the id moves from the applications list to the partners
//! list.

use crate::core::error::{EntityError, PartnershipError, Result};
use crate::core::service::DataService;
use crate::core::Entity;
use crate::entities::User;
use crate::storage::{IdListFile, JsonFileStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    users: Arc<JsonFileStore<User>>,
    applications: Arc<IdListFile>,
    partners: Arc<IdListFile>,
}

impl UserService {
    pub fn new(
        users: Arc<JsonFileStore<User>>,
        applications: Arc<IdListFile>,
        partners: Arc<IdListFile>,
    ) -> Self {
        Self {
            users,
            applications,
            partners,
        }
    }

    pub async fn all_users(&self) -> Vec<User> {
        self.users.list().await
    }

    /// Look up a user, with `is_partner` filled in from the partners list
    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        let Some(mut user) = self.users.get(id).await else {
            return Ok(None);
        };
        user.is_partner = self.partners.contains(id).await?;
        Ok(Some(user))
    }

    pub async fn find_users(&self, name: Option<&str>) -> Vec<User> {
        self.users.find(name).await
    }

    /// Register a user; a name already taken is a conflict
    pub async fn create_user(&self, user: User) -> Result<User> {
        let name = user.name.clone();
        let Some(created) = self.users.create_named(user).await? else {
            return Err(EntityError::AlreadyExists {
                entity_type: User::entity_type(),
                name,
            }
            .into());
        };
        tracing::info!(user_id = created.id, name = %created.name, "user registered");
        Ok(created)
    }

    pub async fn update_user(&self, user: User) -> Result<Option<User>> {
        Ok(self.users.update(user).await?)
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        Ok(self.users.delete(id).await?)
    }

    /// Id of the user whose name equals `name` ignoring case, or `-1`
    pub async fn user_id_by_name(&self, name: &str) -> i32 {
        let wanted = name.to_lowercase();
        self.users
            .list()
            .await
            .into_iter()
            .find(|user| user.name.to_lowercase() == wanted)
            .map_or(-1, |user| user.id)
    }

    /// Queue `user_id` for partnership approval.
    ///
    /// The user id is not checked against the user store.
    pub async fn apply_for_partnership(&self, user_id: i32) -> Result<()> {
        if self.applications.contains(user_id).await? {
            return Err(PartnershipError::AlreadyApplied { user_id }.into());
        }
        self.applications.append(user_id).await?;
        tracing::info!(user_id, "partnership application received");
        Ok(())
    }

    /// Approve `user_id` as a partner and drop its pending application.
    ///
    /// The id is appended even when it is already listed.
    pub async fn make_partner(&self, user_id: i32) -> Result<()> {
        self.partners.append(user_id).await?;

        if !self.remove_application(user_id).await? {
            tracing::warn!(user_id, "partner approved without a pending application");
        }
        tracing::info!(user_id, "user is now a partner");
        Ok(())
    }

    pub async fn applications(&self) -> Result<Vec<i32>> {
        Ok(self.applications.ids().await?)
    }

    pub async fn partners(&self) -> Result<Vec<i32>> {
        Ok(self.partners.ids().await?)
    }

    /// Reject a pending application; `false` if there was none
    pub async fn remove_application(&self, user_id: i32) -> Result<bool> {
        let removed = self.applications.remove_first(user_id).await?;
        if removed {
            tracing::info!(user_id, "partnership application removed");
        }
        Ok(removed)
    }
}

use crate::{
    api::users,
    client::ApiClient,
    dashboard::{ActionOutcome, ListMutation, PAGE_SIZE, filters::UserFilter, refresh},
    error::ApiResult,
    feedback::{Confirm, Notification, Prompt, Tone},
    models::{Role, User, UserStatus},
    view::CollectionView,
};

/// UsersPage
///
/// Admin user management: filter, block/unblock, promote and delete.
pub struct UsersPage {
    client: ApiClient,
    view: CollectionView<User, UserFilter>,
}

impl UsersPage {
    pub async fn load(client: ApiClient) -> ApiResult<Self> {
        let items = users::get_all_users(&client).await?;
        tracing::debug!(count = items.len(), "users loaded");
        Ok(Self::with_users(client, items))
    }

    pub fn with_users(client: ApiClient, items: Vec<User>) -> Self {
        Self {
            client,
            view: CollectionView::new(UserFilter::default(), PAGE_SIZE).with_items(items),
        }
    }

    pub fn view(&self) -> &CollectionView<User, UserFilter> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CollectionView<User, UserFilter> {
        &mut self.view
    }

    pub async fn reload(&mut self) -> bool {
        refresh(&mut self.view, users::get_all_users(&self.client)).await
    }

    fn find(&self, email: &str) -> Option<&User> {
        self.view.items().iter().find(|user| user.email == email)
    }

    /// change_status
    ///
    /// Picking the status a user already has is a no-op: no prompt, no request.
    pub async fn change_status(
        &mut self,
        confirm: &dyn Confirm,
        email: &str,
        status: UserStatus,
    ) -> ActionOutcome {
        let Some(user) = self.find(email) else {
            return ActionOutcome::NotOffered(format!("no user with email {email}"));
        };
        if user.effective_status() == status {
            return ActionOutcome::NotOffered(format!("{email} is already {status}"));
        }

        let verb = match status {
            UserStatus::Blocked => "block",
            UserStatus::Active => "unblock",
        };
        let mutation = ListMutation {
            confirm,
            prompt: Prompt::new(
                Tone::Warning,
                "Are you sure?",
                format!("Do you want to {verb} {}?", user.display_name()),
                format!("Yes, {verb}"),
            ),
            success: Notification::success("Updated!", format!("User is now {status}.")),
            failure_title: "Failed to update status",
        };
        mutation
            .run(
                &mut self.view,
                users::update_user_status(&self.client, email, status),
                users::get_all_users(&self.client),
            )
            .await
    }

    /// change_role
    ///
    /// Only offered when the selected role differs from the current one.
    pub async fn change_role(&mut self, confirm: &dyn Confirm, email: &str, role: Role) -> ActionOutcome {
        let Some(user) = self.find(email) else {
            return ActionOutcome::NotOffered(format!("no user with email {email}"));
        };
        if user.role == role {
            return ActionOutcome::NotOffered(format!("{email} is already {role}"));
        }

        let mutation = ListMutation {
            confirm,
            prompt: Prompt::new(
                Tone::Question,
                "Change role?",
                format!("Make {} a {role}?", user.display_name()),
                "Yes, change it",
            ),
            success: Notification::success("Role updated!", format!("User is now {role}.")),
            failure_title: "Failed to update role",
        };
        mutation
            .run(
                &mut self.view,
                users::update_user_role(&self.client, email, role),
                users::get_all_users(&self.client),
            )
            .await
    }

    pub async fn delete(&mut self, confirm: &dyn Confirm, email: &str) -> ActionOutcome {
        let Some(user) = self.find(email) else {
            return ActionOutcome::NotOffered(format!("no user with email {email}"));
        };

        let mutation = ListMutation {
            confirm,
            prompt: Prompt::new(
                Tone::Warning,
                "Delete user?",
                format!("{} will be removed permanently.", user.display_name()),
                "Yes, delete",
            ),
            success: Notification::success("Deleted!", "User has been deleted."),
            failure_title: "Failed to delete user",
        };
        mutation
            .run(
                &mut self.view,
                users::delete_user(&self.client, email),
                users::get_all_users(&self.client),
            )
            .await
    }
}

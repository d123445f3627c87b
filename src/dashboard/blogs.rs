use serde::Serialize;

use crate::{
    api::{blogs, users},
    client::ApiClient,
    dashboard::{ActionOutcome, ListMutation, PAGE_SIZE, filters::BlogFilter, refresh},
    error::ApiResult,
    feedback::{Confirm, Notification, Prompt, Tone},
    models::{Blog, BlogStatus},
    view::CollectionView,
};

/// BlogStats
///
/// The counter cards above the content table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlogStats {
    pub my_blogs: usize,
    pub total_blogs: usize,
    pub total_users: usize,
}

/// BlogsPage
///
/// Content management: publish/unpublish and delete.
pub struct BlogsPage {
    client: ApiClient,
    view: CollectionView<Blog, BlogFilter>,
}

impl BlogsPage {
    pub async fn load(client: ApiClient) -> ApiResult<Self> {
        let items = blogs::get_all_blogs(&client).await?;
        tracing::debug!(count = items.len(), "blogs loaded");
        Ok(Self::with_blogs(client, items))
    }

    pub fn with_blogs(client: ApiClient, items: Vec<Blog>) -> Self {
        Self {
            client,
            view: CollectionView::new(BlogFilter::default(), PAGE_SIZE).with_items(items),
        }
    }

    pub fn view(&self) -> &CollectionView<Blog, BlogFilter> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CollectionView<Blog, BlogFilter> {
        &mut self.view
    }

    pub async fn reload(&mut self) -> bool {
        refresh(&mut self.view, blogs::get_all_blogs(&self.client)).await
    }

    /// Counts over the whole collection, not the filtered page.
    pub async fn stats(&self, my_email: &str) -> ApiResult<BlogStats> {
        let total_users = users::get_all_users(&self.client).await?.len();
        let items = self.view.items();
        Ok(BlogStats {
            my_blogs: items.iter().filter(|blog| blog.author_email == my_email).count(),
            total_blogs: items.len(),
            total_users,
        })
    }

    fn find(&self, blog_id: &str) -> Option<&Blog> {
        self.view
            .items()
            .iter()
            .find(|blog| blog.id.as_deref() == Some(blog_id))
    }

    /// Flips draft ↔ published.
    pub async fn toggle_publish(&mut self, confirm: &dyn Confirm, blog_id: &str) -> ActionOutcome {
        let Some(blog) = self.find(blog_id) else {
            return ActionOutcome::NotOffered(format!("no blog {blog_id}"));
        };
        let next = blog.status.toggled();
        let (verb, done) = match next {
            BlogStatus::Published => ("publish", "Published!"),
            BlogStatus::Draft => ("unpublish", "Unpublished!"),
        };

        let mutation = ListMutation {
            confirm,
            prompt: Prompt::new(
                Tone::Question,
                "Are you sure?",
                format!("Do you want to {verb} \"{}\"?", blog.title),
                format!("Yes, {verb}"),
            ),
            success: Notification::success(done, format!("Blog is now {next}.")),
            failure_title: "Failed to update blog",
        };
        mutation
            .run(
                &mut self.view,
                blogs::publish_blog(&self.client, blog_id, next),
                blogs::get_all_blogs(&self.client),
            )
            .await
    }

    pub async fn delete(&mut self, confirm: &dyn Confirm, blog_id: &str) -> ActionOutcome {
        let Some(blog) = self.find(blog_id) else {
            return ActionOutcome::NotOffered(format!("no blog {blog_id}"));
        };

        let mutation = ListMutation {
            confirm,
            prompt: Prompt::new(
                Tone::Warning,
                "Delete blog?",
                format!("\"{}\" will be removed permanently.", blog.title),
                "Yes, delete",
            ),
            success: Notification::success("Deleted!", "Blog has been deleted."),
            failure_title: "Failed to delete blog",
        };
        mutation
            .run(
                &mut self.view,
                blogs::delete_blog(&self.client, blog_id),
                blogs::get_all_blogs(&self.client),
            )
            .await
    }
}

use std::future::Future;

use crate::{
    error::ApiResult,
    feedback::{Confirm, Notification, Prompt},
    models::MutationAck,
    view::{CollectionView, Filter},
};

/// Per-page filter state.
pub mod filters;

/// Manage users (admin).
pub mod users;

/// Donation request boards: admin, requester and public.
pub mod requests;

/// Content management.
pub mod blogs;

/// Contact inbox.
pub mod contacts;

/// Server-paginated funding table.
pub mod funding;

/// Dashboard landing page.
pub mod home;

/// Rows per page on every client-paginated list.
pub const PAGE_SIZE: usize = 8;

/// Rows per page of the funding table.
pub const FUNDING_PAGE_SIZE: usize = 7;

/// ActionOutcome
///
/// How a row-level action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Rejected locally before any prompt or request (no-op or disallowed transition).
    NotOffered(String),
    /// The user dismissed the confirmation prompt.
    Cancelled,
    /// The server accepted the change; the list was refetched if `refreshed`.
    Succeeded {
        notification: Notification,
        refreshed: bool,
    },
    /// The server call failed; the rendered list is unchanged.
    Failed(Notification),
}

impl ActionOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            ActionOutcome::Succeeded { notification, .. } | ActionOutcome::Failed(notification) => {
                Some(notification)
            }
            _ => None,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, ActionOutcome::Succeeded { .. })
    }
}

/// ListMutation
///
/// One confirmed write against a list page: prompt, exactly one request, then a
/// refetch of the list. Nothing is applied to the view before the server confirms.
pub(crate) struct ListMutation<'a> {
    pub confirm: &'a dyn Confirm,
    pub prompt: Prompt,
    pub success: Notification,
    pub failure_title: &'a str,
}

impl ListMutation<'_> {
    pub(crate) async fn run<T, F, M, R>(
        self,
        view: &mut CollectionView<T, F>,
        mutation: M,
        refetch: R,
    ) -> ActionOutcome
    where
        F: Filter<T> + PartialEq,
        M: Future<Output = ApiResult<MutationAck>>,
        R: Future<Output = ApiResult<Vec<T>>>,
    {
        if !self.confirm.confirm(&self.prompt).await {
            tracing::debug!(prompt = %self.prompt.title, "action cancelled");
            return ActionOutcome::Cancelled;
        }

        if let Err(err) = mutation.await {
            tracing::warn!("{}: {}", self.failure_title, err);
            return ActionOutcome::Failed(Notification::from_error(self.failure_title, &err));
        }

        let refreshed = refresh(view, refetch).await;
        ActionOutcome::Succeeded {
            notification: self.success,
            refreshed,
        }
    }
}

/// Replaces the view's items with a fresh fetch. On failure the previous items stay.
pub(crate) async fn refresh<T, F, R>(view: &mut CollectionView<T, F>, refetch: R) -> bool
where
    F: Filter<T> + PartialEq,
    R: Future<Output = ApiResult<Vec<T>>>,
{
    match refetch.await {
        Ok(items) => {
            view.replace_items(items);
            true
        }
        Err(err) => {
            tracing::warn!("refetch failed, keeping previous list: {}", err);
            false
        }
    }
}

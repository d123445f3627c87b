use crate::{
    api::public,
    client::ApiClient,
    dashboard::{PAGE_SIZE, filters::ContactFilter, refresh},
    error::ApiResult,
    models::Contact,
    view::CollectionView,
};

/// ContactsPage
///
/// Read-only inbox of contact-form messages.
pub struct ContactsPage {
    client: ApiClient,
    view: CollectionView<Contact, ContactFilter>,
}

impl ContactsPage {
    pub async fn load(client: ApiClient) -> ApiResult<Self> {
        let items = public::get_all_contacts(&client).await?;
        tracing::debug!(count = items.len(), "contacts loaded");
        Ok(Self {
            client,
            view: CollectionView::new(ContactFilter::default(), PAGE_SIZE).with_items(items),
        })
    }

    pub fn view(&self) -> &CollectionView<Contact, ContactFilter> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CollectionView<Contact, ContactFilter> {
        &mut self.view
    }

    pub async fn reload(&mut self) -> bool {
        refresh(&mut self.view, public::get_all_contacts(&self.client)).await
    }
}

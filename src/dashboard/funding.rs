use crate::{
    api::funding,
    client::ApiClient,
    dashboard::FUNDING_PAGE_SIZE,
    error::ApiResult,
    models::{FundingPage, FundingRecord},
    view::{PageMarker, page_window},
};

/// FundingBoard
///
/// The funding table. Unlike the other lists it is paginated by the server, so
/// every page change is a fetch. A failed fetch keeps the page that was showing.
pub struct FundingBoard {
    client: ApiClient,
    page: usize,
    current: FundingPage,
}

impl FundingBoard {
    pub async fn load(client: ApiClient) -> ApiResult<Self> {
        let current = funding::get_all_fundings(&client, 1, FUNDING_PAGE_SIZE).await?;
        Ok(Self {
            client,
            page: 1,
            current,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows(&self) -> &[FundingRecord] {
        &self.current.fundings
    }

    pub fn total_items(&self) -> u64 {
        self.current.total
    }

    pub fn total_pages(&self) -> usize {
        (self.current.total as usize).div_ceil(FUNDING_PAGE_SIZE)
    }

    pub fn page_window(&self) -> Vec<PageMarker> {
        page_window(self.page, self.total_pages())
    }

    /// go_to
    ///
    /// Fetches `page`, clamped to the known page range. When the last known page is
    /// full, one page past it may be requested, since the total can have grown since
    /// the previous fetch. The page moves only if the server confirms it exists.
    pub async fn go_to(&mut self, page: usize) -> ApiResult<()> {
        let mut last = self.total_pages().max(1);
        if self.page == last && self.current.fundings.len() >= FUNDING_PAGE_SIZE {
            last += 1;
        }
        let page = page.clamp(1, last);
        let fetched = funding::get_all_fundings(&self.client, page, FUNDING_PAGE_SIZE).await?;
        let fetched_pages = (fetched.total as usize).div_ceil(FUNDING_PAGE_SIZE).max(1);
        if page > fetched_pages {
            tracing::debug!(page, total = fetched.total, "requested funding page no longer exists");
            self.current.total = fetched.total;
            return Ok(());
        }
        tracing::debug!(page, rows = fetched.fundings.len(), "funding page loaded");
        self.page = page;
        self.current = fetched;
        Ok(())
    }

    pub async fn next_page(&mut self) -> ApiResult<()> {
        self.go_to(self.page + 1).await
    }

    pub async fn previous_page(&mut self) -> ApiResult<()> {
        self.go_to(self.page.saturating_sub(1)).await
    }
}

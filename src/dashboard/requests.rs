use crate::{
    api::donations,
    client::ApiClient,
    dashboard::{
        ActionOutcome, ListMutation, PAGE_SIZE,
        filters::{AdminRequestFilter, MyRequestFilter},
        refresh,
    },
    error::ApiResult,
    feedback::{Confirm, Notification, Prompt, Tone},
    models::{
        DonationRequest, DonationRequestForm, DonationRequestUpdate, DonationStatus, MutationAck,
        NewDonationRequest,
    },
    role::{CreateRequestGate, RoleGate},
    session::Session,
    view::{CollectionView, Filter, NoFilter},
};

/// Where a request board gets its rows from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    /// Every request (admin and volunteer boards).
    All,
    /// Requests created by this requester.
    Mine(String),
    /// Pending requests open to any donor.
    PublicPending,
}

impl RequestSource {
    async fn fetch(&self, client: &ApiClient) -> ApiResult<Vec<DonationRequest>> {
        match self {
            RequestSource::All => donations::get_all_donation_requests_admin(client).await,
            RequestSource::Mine(email) => donations::get_my_donation_requests(client, email, None).await,
            RequestSource::PublicPending => donations::get_pending_public_requests(client).await,
        }
    }

    // Requesters change their own request through the partial update; staff boards
    // use the status endpoint.
    async fn set_status(
        &self,
        client: &ApiClient,
        request_id: &str,
        next: DonationStatus,
    ) -> ApiResult<MutationAck> {
        match self {
            RequestSource::Mine(_) => {
                donations::update_donation_request(client, request_id, &DonationRequestUpdate::status(next))
                    .await
            }
            RequestSource::All | RequestSource::PublicPending => {
                donations::update_donation_status(client, request_id, next).await
            }
        }
    }
}

/// RequestBoard
///
/// A filtered, paginated list of donation requests with the row actions the
/// dashboards offer.
pub struct RequestBoard<F> {
    client: ApiClient,
    source: RequestSource,
    view: CollectionView<DonationRequest, F>,
}

pub type AdminRequestsPage = RequestBoard<AdminRequestFilter>;
pub type MyRequestsPage = RequestBoard<MyRequestFilter>;
pub type PublicRequestsPage = RequestBoard<NoFilter>;

impl<F> RequestBoard<F>
where
    F: Filter<DonationRequest> + PartialEq + Default,
{
    pub async fn load(client: ApiClient, source: RequestSource) -> ApiResult<Self> {
        let items = source.fetch(&client).await?;
        tracing::debug!(count = items.len(), source = ?source, "donation requests loaded");
        Ok(Self::with_requests(client, source, items))
    }

    pub fn with_requests(client: ApiClient, source: RequestSource, items: Vec<DonationRequest>) -> Self {
        Self {
            client,
            source,
            view: CollectionView::new(F::default(), PAGE_SIZE).with_items(items),
        }
    }

    pub fn source(&self) -> &RequestSource {
        &self.source
    }

    pub fn view(&self) -> &CollectionView<DonationRequest, F> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CollectionView<DonationRequest, F> {
        &mut self.view
    }

    pub async fn reload(&mut self) -> bool {
        refresh(&mut self.view, self.source.fetch(&self.client)).await
    }

    fn find(&self, request_id: &str) -> Option<&DonationRequest> {
        self.view
            .items()
            .iter()
            .find(|request| request.id.as_deref() == Some(request_id))
    }

    /// change_status
    ///
    /// Only `pending → inprogress` and `inprogress → {done, canceled}` are sent.
    /// Anything else is rejected here without a request.
    pub async fn change_status(
        &mut self,
        confirm: &dyn Confirm,
        request_id: &str,
        next: DonationStatus,
    ) -> ActionOutcome {
        let Some(request) = self.find(request_id) else {
            return ActionOutcome::NotOffered(format!("no donation request {request_id}"));
        };
        let current = request.donation_status;
        if !current.can_transition_to(next) {
            tracing::warn!(%current, %next, request_id, "rejected status transition");
            return ActionOutcome::NotOffered(format!("cannot move a {current} request to {next}"));
        }

        let mutation = ListMutation {
            confirm,
            prompt: Prompt::new(
                Tone::Question,
                "Update status?",
                format!("Mark the request for {} as {next}?", request.recipient_name),
                "Yes, update",
            ),
            success: Notification::success("Updated!", format!("Request marked as {next}.")),
            failure_title: "Failed to update status",
        };
        mutation
            .run(
                &mut self.view,
                self.source.set_status(&self.client, request_id, next),
                self.source.fetch(&self.client),
            )
            .await
    }

    pub async fn delete(&mut self, confirm: &dyn Confirm, request_id: &str) -> ActionOutcome {
        let Some(request) = self.find(request_id) else {
            return ActionOutcome::NotOffered(format!("no donation request {request_id}"));
        };

        let mutation = ListMutation {
            confirm,
            prompt: Prompt::new(
                Tone::Warning,
                "Delete request?",
                format!("The request for {} will be removed.", request.recipient_name),
                "Yes, delete",
            ),
            success: Notification::success("Deleted!", "Donation request has been deleted."),
            failure_title: "Failed to delete request",
        };
        mutation
            .run(
                &mut self.view,
                donations::delete_donation_request(&self.client, request_id),
                self.source.fetch(&self.client),
            )
            .await
    }

    /// respond
    ///
    /// A donor volunteers for a pending request. The server records the donor from
    /// the bearer token and moves the request to `inprogress`.
    pub async fn respond(&mut self, confirm: &dyn Confirm, request_id: &str) -> ActionOutcome {
        let Some(request) = self.find(request_id) else {
            return ActionOutcome::NotOffered(format!("no donation request {request_id}"));
        };
        if request.donation_status != DonationStatus::Pending {
            return ActionOutcome::NotOffered(format!(
                "request is already {}",
                request.donation_status
            ));
        }

        let mutation = ListMutation {
            confirm,
            prompt: Prompt::new(
                Tone::Question,
                "Donate blood?",
                format!(
                    "Confirm you can donate {} at {}.",
                    request.blood_group, request.hospital_name
                ),
                "Yes, I'll donate",
            ),
            success: Notification::success("Thank you!", "You have responded to this request."),
            failure_title: "Failed to respond",
        };
        mutation
            .run(
                &mut self.view,
                donations::respond_to_donation_request(&self.client, request_id),
                self.source.fetch(&self.client),
            )
            .await
    }
}

/// CreateRequestOutcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRequestOutcome {
    /// No request was sent. Show the prompt, then navigate to `redirect_to`.
    Blocked { prompt: Prompt, redirect_to: &'static str },
    Created(Notification),
    Failed(Notification),
}

impl CreateRequestOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            CreateRequestOutcome::Created(notification) | CreateRequestOutcome::Failed(notification) => {
                Some(notification)
            }
            CreateRequestOutcome::Blocked { .. } => None,
        }
    }
}

/// create_request
///
/// Submits a new donation request for the signed-in requester. The status gate is
/// checked again at submit time; blocked users never reach the POST.
pub async fn create_request(
    client: &ApiClient,
    gate: &RoleGate,
    session: &Session,
    form: DonationRequestForm,
) -> CreateRequestOutcome {
    match gate.create_request_gate().await {
        Ok(CreateRequestGate::Allowed) => {}
        Ok(CreateRequestGate::Blocked { prompt, redirect_to }) => {
            return CreateRequestOutcome::Blocked { prompt, redirect_to };
        }
        Err(err) => {
            tracing::warn!("status check before create failed: {}", err);
            return CreateRequestOutcome::Failed(Notification::from_error("Error!", &err));
        }
    }

    let request = NewDonationRequest::new(session.author_name(), session.email(), form);
    match donations::create_donation_request(client, &request).await {
        Ok(ack) => {
            tracing::info!(id = ?ack.inserted_id, hospital = %request.form.hospital_name, "donation request created");
            CreateRequestOutcome::Created(Notification::success(
                "Success!",
                "Donation request created successfully.",
            ))
        }
        Err(err) => {
            tracing::warn!("failed to create donation request: {}", err);
            CreateRequestOutcome::Failed(Notification::from_error("Error!", &err))
        }
    }
}

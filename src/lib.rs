// --- Module Structure ---

// Transport: configuration, error taxonomy and the HTTP client factory.
pub mod client;
pub mod config;
pub mod error;

// Domain data and the REST call surface.
pub mod api;
pub mod blood;
pub mod models;

// Who is signed in, and what they may see.
pub mod role;
pub mod session;

// Presentation-facing state: prompts, list views and the dashboard pages.
pub mod dashboard;
pub mod feedback;
pub mod view;

// External collaborators and the flows built on them.
pub mod payment;
pub mod ticker;
pub mod upload;

// --- Public Re-exports ---

// The types an embedding application needs to get from configuration to a signed-in client.
pub use blood::BloodGroup;
pub use client::ApiClient;
pub use config::{ClientConfig, Env};
pub use error::{ApiError, ApiResult, ConfigError, Envelope};
pub use feedback::{Confirm, Notification, Prompt};
pub use role::{Navigation, RoleGate};
pub use session::{Identity, IdentityProvider, Session, SessionStore};
pub use view::{CollectionView, Filter, ResetPolicy};

/// Domain API Module Index
///
/// One module per backend resource. Every function issues exactly one REST call
/// through the client it is given and returns `Ok(data)` or the `ApiError` the
/// client produced. Functions documented as secure expect a client built with
/// `ApiClient::secure`; passing a public client simply earns a 401 from the server.

/// Accounts, roles and profile management.
pub mod users;

/// Blood donation requests and donor responses.
pub mod donations;

/// Blog authoring and moderation.
pub mod blogs;

/// Monetary donations and payment intents.
pub mod funding;

/// Donor search, contact form and public statistics.
pub mod public;

mod common;

use bloodaid_client::{
    BloodGroup,
    api::{blogs, donations, funding, public, users},
    models::{
        BlogStatus, DonationRequestForm, DonationStatus, NewDonationRequest, Role,
        UserProfileUpdate,
    },
};
use chrono::NaiveDate;
use common::{ack_modified, spawn_backend};
use serde_json::json;

#[tokio::test]
async fn test_search_donors_sends_wire_code() {
    let backend = spawn_backend().await;
    backend.on(
        "GET",
        "/search-donors",
        200,
        json!([{ "email": "d@x.com", "name": "Donor", "bloodGroup": "AB+", "status": "active" }]),
    );

    let donors = public::search_donors(&backend.public_client(), BloodGroup::AbPositive, "Dhaka", "Savar")
        .await
        .expect("donors");

    assert_eq!(donors.len(), 1);
    assert_eq!(donors[0].blood_group, "AB+");
    let hit = &backend.hits("GET", "/search-donors")[0];
    assert_eq!(
        hit.query.as_deref(),
        Some("bloodGroup=ABp&district=Dhaka&upazila=Savar")
    );
}

#[tokio::test]
async fn test_create_donation_request_starts_pending() {
    let backend = spawn_backend().await;
    backend.on("POST", "/donation-request", 200, json!({ "acknowledged": true, "insertedId": "r1" }));

    let form = DonationRequestForm {
        recipient_name: "Ayesha".to_string(),
        recipient_district: "Khulna".to_string(),
        recipient_upazila: "Sonadanga".to_string(),
        hospital_name: "Khulna Medical".to_string(),
        address_line: "Road 4".to_string(),
        blood_group: BloodGroup::ONegative,
        donation_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        donation_time: "09:30".to_string(),
        request_message: "Urgent".to_string(),
    };
    let request = NewDonationRequest::new("Rahim", "rahim@example.com", form);

    let ack = donations::create_donation_request(&backend.secure_client("t"), &request)
        .await
        .expect("created");
    assert!(ack.changed_anything());
    assert_eq!(ack.inserted_id.as_deref(), Some("r1"));

    let body = &backend.hits("POST", "/donation-request")[0].body;
    assert_eq!(body["donationStatus"], "pending");
    assert_eq!(body["bloodGroup"], "O-");
    assert_eq!(body["donationDate"], "2026-10-20");
    assert_eq!(body["requesterEmail"], "rahim@example.com");
    assert_eq!(body["recipientDistrict"], "Khulna");
}

#[tokio::test]
async fn test_my_requests_query_includes_limit() {
    let backend = spawn_backend().await;
    backend.on("GET", "/my-donation-requests", 200, json!([]));
    let client = backend.secure_client("t");

    donations::get_my_donation_requests(&client, "me@x.com", Some(3))
        .await
        .unwrap();
    donations::get_my_donation_requests(&client, "me@x.com", None)
        .await
        .unwrap();

    let hits = backend.hits("GET", "/my-donation-requests");
    assert_eq!(hits[0].query.as_deref(), Some("email=me%40x.com&limit=3"));
    assert_eq!(hits[1].query.as_deref(), Some("email=me%40x.com"));
}

#[tokio::test]
async fn test_public_and_pending_request_listings() {
    let backend = spawn_backend().await;
    backend.on("GET", "/public-donation-requests", 200, json!([]));
    backend.on(
        "GET",
        "/donation-request/public",
        200,
        json!([{ "_id": "r9", "recipientName": "Nila", "donationStatus": "pending" }]),
    );
    let client = backend.public_client();

    donations::get_all_donation_requests(&client, Some("me@x.com")).await.unwrap();
    let pending = donations::get_pending_public_requests(&client).await.unwrap();

    assert_eq!(pending[0].id.as_deref(), Some("r9"));
    assert_eq!(pending[0].donation_status, DonationStatus::Pending);
    assert_eq!(
        backend.hits("GET", "/public-donation-requests")[0].query.as_deref(),
        Some("email=me%40x.com")
    );
    assert_eq!(
        backend.hits("GET", "/donation-request/public")[0].query.as_deref(),
        Some("status=pending")
    );
}

#[tokio::test]
async fn test_request_status_and_respond_calls() {
    let backend = spawn_backend().await;
    backend.on("PATCH", "/donation-request-status/r1", 200, ack_modified());
    backend.on("PATCH", "/donation-request/r2/respond", 200, ack_modified());
    backend.on("DELETE", "/donation-request/r3", 200, json!({ "deletedCount": 1 }));
    let client = backend.secure_client("t");

    donations::update_donation_status(&client, "r1", DonationStatus::InProgress)
        .await
        .unwrap();
    donations::respond_to_donation_request(&client, "r2").await.unwrap();
    let deleted = donations::delete_donation_request(&client, "r3").await.unwrap();

    assert_eq!(
        backend.hits("PATCH", "/donation-request-status/r1")[0].body,
        json!({ "status": "inprogress" })
    );
    assert_eq!(
        backend.hits("PATCH", "/donation-request/r2/respond")[0].body,
        serde_json::Value::Null
    );
    assert_eq!(deleted.deleted_count, 1);
}

#[tokio::test]
async fn test_user_admin_calls() {
    let backend = spawn_backend().await;
    backend.on("PATCH", "/update-role", 200, ack_modified());
    backend.on("PATCH", "/update-status", 200, ack_modified());
    backend.on("DELETE", "/user/gone@x.com", 200, json!({ "deletedCount": 1 }));
    backend.on("PATCH", "/update-user", 200, ack_modified());
    let client = backend.secure_client("t");

    users::update_user_role(&client, "v@x.com", Role::Volunteer).await.unwrap();
    users::update_user_status(&client, "v@x.com", bloodaid_client::models::UserStatus::Blocked)
        .await
        .unwrap();
    users::delete_user(&client, "gone@x.com").await.unwrap();
    users::update_user_profile(
        &client,
        &UserProfileUpdate {
            name: Some("New Name".to_string()),
            blood_group: Some(BloodGroup::BPositive),
            ..UserProfileUpdate::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(
        backend.hits("PATCH", "/update-role")[0].body,
        json!({ "email": "v@x.com", "role": "volunteer" })
    );
    assert_eq!(
        backend.hits("PATCH", "/update-status")[0].body,
        json!({ "email": "v@x.com", "status": "blocked" })
    );
    assert_eq!(
        backend.hits("PATCH", "/update-user")[0].body,
        json!({ "name": "New Name", "bloodGroup": "B+" })
    );
}

#[tokio::test]
async fn test_get_user_role_tolerates_missing_status() {
    let backend = spawn_backend().await;
    backend.on("GET", "/get-user-role", 200, json!({ "role": "volunteer" }));

    let info = users::get_user_role(&backend.secure_client("t")).await.unwrap();
    assert_eq!(info.role, Role::Volunteer);
    assert!(info.status.is_none());
    assert_eq!(
        info.effective_status(),
        bloodaid_client::models::UserStatus::Active
    );
}

#[tokio::test]
async fn test_blog_endpoints() {
    let backend = spawn_backend().await;
    backend.on("GET", "/blogs", 200, json!([{ "_id": "b1", "title": "Why donate", "status": "published" }]));
    backend.on("PATCH", "/blogs/b1/publish", 200, ack_modified());
    let client = backend.secure_client("t");

    let published = blogs::get_published_blogs(&client).await.unwrap();
    blogs::publish_blog(&client, "b1", BlogStatus::Draft).await.unwrap();

    assert_eq!(published[0].status, BlogStatus::Published);
    assert_eq!(backend.hits("GET", "/blogs")[0].query.as_deref(), Some("status=published"));
    assert_eq!(
        backend.hits("PATCH", "/blogs/b1/publish")[0].body,
        json!({ "status": "draft" })
    );
}

#[tokio::test]
async fn test_funding_endpoints() {
    let backend = spawn_backend().await;
    backend.on(
        "GET",
        "/fundings",
        200,
        json!({
            "fundings": [{ "userName": "A", "userEmail": "a@x.com", "amount": 25.0,
                           "fundingDate": "2026-10-01T10:00:00Z", "paymentId": "pi_1", "status": "succeeded" }],
            "total": 15
        }),
    );
    backend.on("GET", "/fundings/total", 200, json!({ "totalAmount": 1234.5 }));
    backend.on("POST", "/create-payment-intent", 200, json!({ "clientSecret": "pi_1_secret" }));
    let client = backend.secure_client("t");

    let page = funding::get_all_fundings(&client, 2, 7).await.unwrap();
    let total = funding::get_total_funding(&client).await.unwrap();
    let intent = funding::create_payment_intent(&client, 50.0).await.unwrap();

    assert_eq!(page.total, 15);
    assert_eq!(page.fundings[0].amount, 25.0);
    assert_eq!(backend.hits("GET", "/fundings")[0].query.as_deref(), Some("page=2&limit=7"));
    assert_eq!(total.total, 1234.5);
    assert_eq!(intent.client_secret, "pi_1_secret");
    assert_eq!(
        backend.hits("POST", "/create-payment-intent")[0].body,
        json!({ "amount": 50.0 })
    );
}

#[tokio::test]
async fn test_public_stats_and_hospitals() {
    let backend = spawn_backend().await;
    backend.on(
        "GET",
        "/admin-dashboard-stats",
        200,
        json!({ "totalUsers": 40, "totalRequest": 12, "totalFunding": 3, "totalFundingAmount": 90.5 }),
    );
    backend.on(
        "GET",
        "/hospitals",
        200,
        json!([{ "_id": "h1", "name": "Dhaka Medical", "district": "Dhaka", "verified": true }]),
    );
    let client = backend.public_client();

    let stats = public::get_dashboard_stats(&client).await.unwrap();
    let hospitals = public::get_verified_hospitals(&client).await.unwrap();

    assert_eq!(stats.total_users, 40);
    assert_eq!(stats.total_request, 12);
    assert!(hospitals[0].verified);
    assert_eq!(backend.hits("GET", "/hospitals")[0].query.as_deref(), Some("verified=true"));
}

#[tokio::test]
async fn test_contact_form_and_request_edit() {
    let backend = spawn_backend().await;
    backend.on("POST", "/contacts", 200, json!({ "acknowledged": true, "insertedId": "c1" }));
    backend.on("PATCH", "/donation-request/r1", 200, ack_modified());
    backend.on(
        "GET",
        "/donation-request/r1",
        200,
        json!({ "_id": "r1", "recipientName": "Ayesha", "hospitalName": "New Hospital" }),
    );

    public::submit_contact_form(
        &backend.public_client(),
        &bloodaid_client::models::NewContact {
            name: "Mitu".to_string(),
            email: "mitu@x.com".to_string(),
            subject: "Hello".to_string(),
            message: "Thanks".to_string(),
            created_at: chrono::Utc::now(),
        },
    )
    .await
    .unwrap();

    let client = backend.secure_client("t");
    let update = bloodaid_client::models::DonationRequestUpdate {
        hospital_name: Some("New Hospital".to_string()),
        ..Default::default()
    };
    donations::update_donation_request(&client, "r1", &update).await.unwrap();
    let fetched = donations::get_donation_request(&client, "r1").await.unwrap();

    let contact = &backend.hits("POST", "/contacts")[0].body;
    assert_eq!(contact["subject"], "Hello");
    assert!(contact["createdAt"].is_string());
    assert_eq!(
        backend.hits("PATCH", "/donation-request/r1")[0].body,
        json!({ "hospitalName": "New Hospital" })
    );
    assert_eq!(fetched.hospital_name, "New Hospital");
    assert_eq!(fetched.donation_status, DonationStatus::Pending);
}

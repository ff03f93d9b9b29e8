//! End-to-end tests for team membership workflows.
//!
//! These drive the service through raw JSON invitation bodies and the
//! in-memory store, covering:
//! 1. The admin/user removal scenario
//! 2. Concurrent invitations for the same email
//! 3. Validation failures that never reach the store

use serde_json::json;
use std::sync::Arc;
use team_org::Role;
use team_service::{InviteMemberRequest, TeamError, TeamService};
use team_store::{MemoryTeamStore, TeamStore};
use uuid::Uuid;

/// Test fixture with one organization and its owner.
struct TestFixture {
    service: TeamService<MemoryTeamStore>,
    org_id: Uuid,
}

impl TestFixture {
    async fn new() -> Self {
        let service = TeamService::new(Arc::new(MemoryTeamStore::new()));
        let created = service
            .create_organization("Acme", "owner@acme.test", "owner-password")
            .await
            .unwrap();

        Self {
            service,
            org_id: created.organization.id,
        }
    }

    fn request(body: serde_json::Value) -> InviteMemberRequest {
        serde_json::from_value(body).unwrap()
    }

    fn invite_body(email: &str, role: &str) -> serde_json::Value {
        json!({
            "email": email,
            "role": role,
            "password": "password1",
            "passwordConfirm": "password1",
            "integrations": ["page-1", "page-2"],
        })
    }

    async fn invite(&self, email: &str, role: &str) -> Result<(), TeamError> {
        self.service
            .invite_team_member(self.org_id, Self::request(Self::invite_body(email, role)))
            .await
            .map(|_| ())
    }

    async fn user_id(&self, email: &str) -> Uuid {
        self.service
            .store()
            .get_user_by_email(email)
            .await
            .unwrap()
            .unwrap()
            .id
    }
}

#[tokio::test]
async fn test_admin_and_user_removal_scenario() {
    let fixture = TestFixture::new().await;
    fixture.invite("u1@acme.test", "ADMIN").await.unwrap();
    fixture.invite("u2@acme.test", "USER").await.unwrap();
    let u1 = fixture.user_id("u1@acme.test").await;
    let u2 = fixture.user_id("u2@acme.test").await;

    // U2 (USER) cannot remove U1 (ADMIN)
    let denied = fixture
        .service
        .delete_team_member_as(u2, fixture.org_id, u1)
        .await;
    assert!(matches!(denied, Err(TeamError::InsufficientPermission)));
    assert_eq!(fixture.service.get_team(fixture.org_id).await.unwrap().len(), 3);

    // U1 (ADMIN) removes U2 (USER)
    let roster = fixture
        .service
        .delete_team_member_as(u1, fixture.org_id, u2)
        .await
        .unwrap();
    let members: Vec<(Uuid, Role)> = roster.iter().map(|m| (m.user_id, m.role)).collect();
    assert!(members.contains(&(u1, Role::Admin)));
    assert!(!members.iter().any(|(id, _)| *id == u2));

    let listed = fixture
        .service
        .store()
        .list_memberships_for_org(fixture.org_id)
        .await
        .unwrap();
    assert_eq!(listed, roster);
}

#[tokio::test]
async fn test_removed_user_cannot_act() {
    let fixture = TestFixture::new().await;
    fixture.invite("admin@acme.test", "ADMIN").await.unwrap();
    fixture.invite("u@acme.test", "USER").await.unwrap();
    let admin = fixture.user_id("admin@acme.test").await;
    let user = fixture.user_id("u@acme.test").await;

    fixture
        .service
        .delete_team_member(Role::SuperAdmin, fixture.org_id, admin)
        .await
        .unwrap();

    let result = fixture
        .service
        .delete_team_member_as(admin, fixture.org_id, user)
        .await;
    assert!(matches!(result, Err(TeamError::InsufficientPermission)));
    assert!(fixture
        .service
        .membership(fixture.org_id, user)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_roster_wire_shape() {
    let fixture = TestFixture::new().await;
    fixture.invite("jane.doe@acme.test", "USER").await.unwrap();

    let roster = fixture.service.get_team(fixture.org_id).await.unwrap();
    let json = serde_json::to_value(&roster).unwrap();

    assert_eq!(json[0]["role"], "SUPERADMIN");
    assert!(json[0].get("allowedIntegrations").is_none());
    assert_eq!(json[1]["email"], "jane.doe@acme.test");
    assert_eq!(json[1]["allowedIntegrations"], json!(["page-1", "page-2"]));
    assert_eq!(roster[1].short_name(), "Jane");
    assert!(roster[1].removable_by(Role::Admin));
    assert!(!roster[0].removable_by(Role::SuperAdmin));
}

#[tokio::test]
async fn test_same_email_invited_twice() {
    let fixture = TestFixture::new().await;

    fixture.invite("jane@acme.test", "USER").await.unwrap();
    let second = fixture.invite("JANE@acme.test", "ADMIN").await;

    assert!(matches!(second, Err(TeamError::EmailTaken)));
    assert_eq!(fixture.service.get_team(fixture.org_id).await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_invites_for_same_email() {
    let fixture = TestFixture::new().await;
    let mut handles = Vec::new();

    for _ in 0..8 {
        let service = fixture.service.clone();
        let org_id = fixture.org_id;
        handles.push(tokio::spawn(async move {
            let request = TestFixture::request(TestFixture::invite_body("race@acme.test", "USER"));
            service.invite_team_member(org_id, request).await
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(TeamError::EmailTaken) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(succeeded, 1);
    let roster = fixture.service.get_team(fixture.org_id).await.unwrap();
    assert_eq!(
        roster.iter().filter(|m| m.email == "race@acme.test").count(),
        1
    );
}

#[tokio::test]
async fn test_super_admin_invite_fails_validation() {
    let fixture = TestFixture::new().await;

    let result = fixture.invite("boss@acme.test", "SUPERADMIN").await;

    match result {
        Err(TeamError::Validation(errors)) => {
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["role"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(fixture
        .service
        .store()
        .get_user_by_email("boss@acme.test")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_empty_integrations_fail_validation() {
    let fixture = TestFixture::new().await;
    let mut body = TestFixture::invite_body("jane@acme.test", "USER");
    body["integrations"] = json!([]);

    let result = fixture
        .service
        .invite_team_member(fixture.org_id, TestFixture::request(body))
        .await;

    match result {
        Err(TeamError::Validation(errors)) => {
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["integrations"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_seven_character_passwords_fail_validation() {
    let fixture = TestFixture::new().await;
    let mut body = TestFixture::invite_body("jane@acme.test", "USER");
    body["password"] = json!("abc1234");
    body["passwordConfirm"] = json!("abc1234");

    let result = fixture
        .service
        .invite_team_member(fixture.org_id, TestFixture::request(body))
        .await;

    match result {
        Err(TeamError::Validation(errors)) => {
            assert_eq!(errors.codes("password"), ["min_length".to_string()]);
            assert_eq!(errors.codes("passwordConfirm"), ["min_length".to_string()]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_mismatched_passwords_rejected_by_service() {
    let fixture = TestFixture::new().await;
    let mut body = TestFixture::invite_body("jane@acme.test", "USER");
    body["passwordConfirm"] = json!("password2");

    let result = fixture
        .service
        .invite_team_member(fixture.org_id, TestFixture::request(body))
        .await;

    assert!(matches!(result, Err(TeamError::PasswordMismatch)));
}

#[tokio::test]
async fn test_invite_into_unknown_organization() {
    let fixture = TestFixture::new().await;
    let request = TestFixture::request(TestFixture::invite_body("jane@acme.test", "USER"));

    let result = fixture
        .service
        .invite_team_member(Uuid::now_v7(), request)
        .await;

    assert!(matches!(result, Err(TeamError::OrganizationNotFound)));
    assert!(fixture
        .service
        .store()
        .get_user_by_email("jane@acme.test")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_customer_and_api_key_lookups() {
    let fixture = TestFixture::new().await;

    fixture
        .service
        .set_payment_customer(fixture.org_id, "cus_42")
        .await
        .unwrap();
    let by_customer = fixture
        .service
        .organization_by_customer_id("cus_42")
        .await
        .unwrap();
    assert_eq!(by_customer.map(|o| o.id), Some(fixture.org_id));

    let key = fixture.service.rotate_api_key(fixture.org_id).await.unwrap();
    let by_key = fixture.service.organization_by_api_key(&key).await.unwrap();
    assert_eq!(by_key.map(|o| o.id), Some(fixture.org_id));
    assert!(fixture
        .service
        .organization_by_api_key("not-a-key")
        .await
        .unwrap()
        .is_none());
}

//! End-to-end tests for the removal request service.
//!
//! Requests carry real signed access tokens and role revocations go to a
//! wiremock role-binding service through the HTTP gateway client.

use std::sync::Arc;
use team_auth::{JwtService, RequestCredentials};
use team_members::{
    MemoryMembershipStore, MemorySeatStore, RemovalConfig, RemoveMemberRequest, RemoveMemberService,
};
use team_org::{JoinStatus, MembershipRow, SeatKey, SeatUsage, TeamRole, UserCr, Workspace};
use team_rbac::GatewayEndpoint;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "e2e-test-secret-key-long-enough-for-hs256";
const API_KEY: &str = "test-rbac-key";

/// Test fixture: a workspace with an Owner, a Manager and a Member, served by
/// a removal service wired to a mock role-binding service.
struct TestFixture {
    server: MockServer,
    service: RemoveMemberService,
    tokens: JwtService,
    members: MemoryMembershipStore,
    seats: MemorySeatStore,
    region: Uuid,
    workspace: Workspace,
    owner: MembershipRow,
    manager: MembershipRow,
    member: MembershipRow,
}

impl TestFixture {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let region = Uuid::new_v4();

        let config = RemovalConfig {
            gateway: GatewayEndpoint::new(server.uri()).with_api_key(API_KEY),
            jwt_secret: Some(SECRET.to_string()),
            ..RemovalConfig::for_region(region)
        };

        let members = MemoryMembershipStore::new();
        let seats = MemorySeatStore::new();
        let workspace = Workspace::new("ns-acme", "Acme");
        let owner = MembershipRow::active(workspace.clone(), UserCr::new("owner"), TeamRole::Owner);
        let manager = MembershipRow::active(workspace.clone(), UserCr::new("carol"), TeamRole::Manager);
        let member = MembershipRow::active(workspace.clone(), UserCr::new("bob"), TeamRole::Member);
        for row in [&owner, &manager, &member] {
            members.insert(row.clone()).await;
        }
        seats
            .insert(SeatUsage::new(
                SeatKey::new(region, owner.user.user_uid, workspace.uid),
                3,
            ))
            .await;

        let service =
            RemoveMemberService::from_config(&config, Arc::new(members.clone()), Arc::new(seats.clone())).unwrap();

        Self {
            server,
            service,
            tokens: JwtService::with_secret(SECRET).unwrap(),
            members,
            seats,
            region,
            workspace,
            owner,
            manager,
            member,
        }
    }

    /// Credentials of the given member.
    fn credentials(&self, row: &MembershipRow) -> RequestCredentials {
        let token = self
            .tokens
            .generate_access_token(row.user.user_uid, row.user_cr_uid(), row.user.cr_name.clone(), self.region)
            .unwrap();
        RequestCredentials::bearer(token)
    }

    fn request(&self, target: &MembershipRow) -> RemoveMemberRequest {
        RemoveMemberRequest::new(self.workspace.uid.to_string(), target.user_cr_uid().to_string())
    }

    async fn seats(&self) -> u32 {
        let key = SeatKey::new(self.region, self.owner.user.user_uid, self.workspace.uid);
        self.seats.get(&key).await.map(|usage| usage.seat).unwrap_or_default()
    }

    async fn is_member(&self, row: &MembershipRow) -> bool {
        self.members.get(self.workspace.uid, row.user_cr_uid()).await.is_some()
    }
}

#[tokio::test]
async fn test_owner_removes_member_end_to_end() {
    let fixture = TestFixture::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workspace/role"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(body_json(serde_json::json!({
            "k8sUsername": "bob",
            "role": "MEMBER",
            "action": "Deprive",
            "workspaceId": "ns-acme",
            "preRole": "MEMBER"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let response = fixture
        .service
        .handle(&fixture.credentials(&fixture.owner), fixture.request(&fixture.member))
        .await;

    assert_eq!(response.code, 200);
    assert_eq!(response.message, "Successfully");
    assert!(response.warning.is_none());
    assert!(!fixture.is_member(&fixture.member).await);
    assert_eq!(fixture.seats().await, 2);
}

#[tokio::test]
async fn test_json_body_is_accepted() {
    let fixture = TestFixture::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workspace/role"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let body = serde_json::json!({
        "ns_uid": fixture.workspace.uid.to_string(),
        "targetUserCrUid": fixture.manager.user_cr_uid().to_string(),
    });
    let response = fixture
        .service
        .handle_json(&fixture.credentials(&fixture.owner), body.to_string().as_bytes())
        .await;

    assert!(response.is_success());
    assert!(!fixture.is_member(&fixture.manager).await);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .service
        .handle_json(&fixture.credentials(&fixture.owner), b"{not json")
        .await;

    assert_eq!(response.code, 400);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .service
        .handle(&RequestCredentials::default(), fixture.request(&fixture.member))
        .await;

    assert_eq!(response.code, 401);
    assert_eq!(response.message, "token verify error");
    assert!(fixture.is_member(&fixture.member).await);
}

#[tokio::test]
async fn test_foreign_token_is_unauthorized() {
    let fixture = TestFixture::new().await;
    let foreign = JwtService::with_secret("another-secret-key-long-enough-for-hs256").unwrap();
    let token = foreign
        .generate_access_token(Uuid::new_v4(), fixture.owner.user_cr_uid(), "owner", fixture.region)
        .unwrap();

    let response = fixture
        .service
        .handle(&RequestCredentials::bearer(token), fixture.request(&fixture.member))
        .await;

    assert_eq!(response.code, 401);
}

#[tokio::test]
async fn test_invalid_identifiers() {
    let fixture = TestFixture::new().await;
    let credentials = fixture.credentials(&fixture.owner);

    let response = fixture
        .service
        .handle(
            &credentials,
            RemoveMemberRequest {
                ns_uid: Some("ns-acme".to_string()),
                target_user_cr_uid: Some(fixture.member.user_cr_uid().to_string()),
            },
        )
        .await;
    assert_eq!(response.code, 400);
    assert_eq!(response.message, "ns_id is invalid");

    let response = fixture
        .service
        .handle(
            &credentials,
            RemoveMemberRequest {
                ns_uid: Some(fixture.workspace.uid.to_string()),
                target_user_cr_uid: None,
            },
        )
        .await;
    assert_eq!(response.code, 400);
    assert_eq!(response.message, "tUserId is invalid");
}

#[tokio::test]
async fn test_policy_rejections_map_to_console_messages() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .service
        .handle(&fixture.credentials(&fixture.member), fixture.request(&fixture.manager))
        .await;
    assert_eq!(response.code, 403);
    assert_eq!(response.message, "you are not manager");

    let response = fixture
        .service
        .handle(&fixture.credentials(&fixture.owner), fixture.request(&fixture.owner))
        .await;
    assert_eq!(response.code, 403);
    assert_eq!(response.message, "target user must be others");

    let stranger = MembershipRow::active(fixture.workspace.clone(), UserCr::new("mallory"), TeamRole::Member);
    let response = fixture
        .service
        .handle(&fixture.credentials(&stranger), fixture.request(&fixture.member))
        .await;
    assert_eq!(response.code, 403);
    assert_eq!(response.message, "you are not in the namespace");

    let response = fixture
        .service
        .handle(&fixture.credentials(&fixture.owner), fixture.request(&stranger))
        .await;
    assert_eq!(response.code, 404);
    assert_eq!(response.message, "target user is not in namespace");
}

#[tokio::test]
async fn test_gateway_error_is_server_error() {
    let fixture = TestFixture::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workspace/role"))
        .respond_with(ResponseTemplate::new(500).set_body_string("binding update failed"))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let response = fixture
        .service
        .handle(&fixture.credentials(&fixture.owner), fixture.request(&fixture.member))
        .await;

    assert_eq!(response.code, 500);
    assert_eq!(response.message, "fail to remove team member");
    assert!(fixture.is_member(&fixture.member).await);
    assert_eq!(fixture.seats().await, 3);
}

#[tokio::test]
async fn test_invited_member_removal_skips_gateway() {
    let fixture = TestFixture::new().await;
    let invitee = MembershipRow::invited(fixture.workspace.clone(), UserCr::new("erin"), TeamRole::Member);
    fixture.members.insert(invitee.clone()).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&fixture.server)
        .await;

    let response = fixture
        .service
        .handle(&fixture.credentials(&fixture.manager), fixture.request(&invitee))
        .await;

    assert!(response.is_success());
    assert!(!fixture.is_member(&invitee).await);
    assert_eq!(fixture.seats().await, 3);
    assert_eq!(
        fixture.members.get(fixture.workspace.uid, fixture.owner.user_cr_uid()).await.map(|r| r.status),
        Some(JoinStatus::InWorkspace)
    );
}

//! Test harness over the in-memory kernel.
//!
//! Each test gets fresh mocks, so tests never share state.

use axum::{body::Body, http::Request, Router};
use ed25519_dalek::{Signer, SigningKey};
use quest_core::common::{SubmissionId, UserId};
use quest_core::domains::quests::{self, SubmissionRequest};
use quest_core::domains::review::PendingSubmission;
use quest_core::kernel::test_dependencies::{TestDependencies, TEST_LEDGER_SHEET};
use quest_core::kernel::ServerDeps;
use quest_core::server::build_app;
use quest_core::server::middleware::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use serde_json::Value;
use test_context::AsyncTestContext;

use super::default_dependencies;

/// Test harness that wires mocks into ServerDeps and the HTTP app.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let request = ctx.submit(ALICE, "BeginnerQuests", "No_3", "Alice").await;
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Mocks, for arranging and inspecting
    pub mocks: TestDependencies,
    /// Dependencies shared with every action under test
    pub deps: ServerDeps,
    /// Signs interaction payloads for the HTTP app
    pub signing_key: SigningKey,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::with_dependencies(default_dependencies())
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub fn with_dependencies(mocks: TestDependencies) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let deps = mocks.server_deps();
        Self {
            mocks,
            deps,
            signing_key: SigningKey::from_bytes(&[42u8; 32]),
        }
    }

    pub fn app(&self) -> Router {
        build_app(self.deps.clone(), self.signing_key.verifying_key())
    }

    /// POST /interactions with a valid signature.
    pub fn signed_request(&self, payload: &Value) -> Request<Body> {
        let body = serde_json::to_vec(payload).unwrap();
        let timestamp = "1700000000";

        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(&body);
        let signature = self.signing_key.sign(&message);

        Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("content-type", "application/json")
            .header(SIGNATURE_HEADER, hex::encode(signature.to_bytes()))
            .header(TIMESTAMP_HEADER, timestamp)
            .body(Body::from(body))
            .unwrap()
    }

    /// Create a submission that is expected to succeed.
    pub async fn submit(
        &self,
        submitter: u64,
        category: &str,
        quest_title: &str,
        player_name: &str,
    ) -> SubmissionRequest {
        quests::create_submission(
            UserId::new(submitter),
            category,
            quest_title,
            player_name,
            &self.deps,
        )
        .await
        .expect("submission should be accepted")
    }

    pub fn claim(&self, id: SubmissionId) -> PendingSubmission {
        self.deps
            .pending
            .claim(&id)
            .expect("submission should be pending")
    }

    /// Ledger rows below the header.
    pub fn ledger_rows(&self) -> Vec<Vec<String>> {
        self.mocks
            .sheets
            .rows_of(TEST_LEDGER_SHEET)
            .into_iter()
            .skip(1)
            .collect()
    }
}

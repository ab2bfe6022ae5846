use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use tokio::time::sleep;
use wicket::{Error, Notifier, SqliteRepositoryProvider, Verification, Wicket};

#[derive(Debug, Clone, PartialEq)]
enum Delivery {
    Code { to: String, code: String },
    VerifiedNotice { to: String },
}

struct RecordingNotifier {
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_code(
        &self,
        to: &str,
        code: &str,
        _ttl_minutes: i64,
        _name: Option<&str>,
    ) -> Result<(), Error> {
        self.deliveries.lock().unwrap().push(Delivery::Code {
            to: to.to_string(),
            code: code.to_string(),
        });
        Ok(())
    }

    async fn send_verified_notice(&self, to: &str, _name: Option<&str>) -> Result<(), Error> {
        self.deliveries
            .lock()
            .unwrap()
            .push(Delivery::VerifiedNotice { to: to.to_string() });
        Ok(())
    }
}

async fn setup() -> (Wicket<SqliteRepositoryProvider>, Arc<Mutex<Vec<Delivery>>>) {
    let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
    let repositories = Arc::new(SqliteRepositoryProvider::new(pool));

    let deliveries = Arc::new(Mutex::new(Vec::new()));
    let notifier = Arc::new(RecordingNotifier {
        deliveries: deliveries.clone(),
    });

    let wicket = Wicket::new(repositories).with_notifier(notifier);
    wicket.migrate().await.unwrap();
    (wicket, deliveries)
}

/// Dispatch is fire-and-forget, so give the spawned task a moment to land.
async fn drain(deliveries: &Arc<Mutex<Vec<Delivery>>>) -> Vec<Delivery> {
    for _ in 0..50 {
        sleep(StdDuration::from_millis(10)).await;
        let current = deliveries.lock().unwrap().clone();
        if !current.is_empty() {
            return current;
        }
    }
    deliveries.lock().unwrap().clone()
}

#[tokio::test]
async fn test_request_code_for_unknown_email_is_silent() {
    let (wicket, deliveries) = setup().await;

    let result = wicket.request_code("nobody@example.com").await.unwrap();
    assert!(result.is_none());

    sleep(StdDuration::from_millis(50)).await;
    assert!(deliveries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_code_delivers_via_notifier() {
    let (wicket, deliveries) = setup().await;

    let account = wicket
        .create_account("user@example.com", Some("Jane".to_string()))
        .await
        .unwrap();

    let requested = wicket.request_code("user@example.com").await.unwrap();
    assert_eq!(requested.unwrap().id, account.id);

    let delivered = drain(&deliveries).await;
    assert_eq!(delivered.len(), 1);
    let Delivery::Code { to, code } = &delivered[0] else {
        panic!("expected a code delivery");
    };
    assert_eq!(to, "user@example.com");

    // The delivered code is the live one
    let outcome = wicket.verify_code(&account.id, code).await.unwrap();
    assert_eq!(outcome, Verification::Verified);
}

#[tokio::test]
async fn test_confirm_account_marks_verified_and_consumes() {
    let (wicket, deliveries) = setup().await;

    let account = wicket.create_account("user@example.com", None).await.unwrap();
    assert!(!account.is_verified());

    let issued = wicket.issue_code(&account.id).await.unwrap();

    let outcome = wicket
        .confirm_account(&account.id, &issued.code)
        .await
        .unwrap();
    assert_eq!(outcome, Verification::Verified);

    let reloaded = wicket.account(&account.id).await.unwrap().unwrap();
    assert!(reloaded.is_verified());

    // The challenge is consumed as part of confirmation
    let result = wicket.verify_code(&account.id, &issued.code).await;
    assert!(result.is_err());

    let delivered = drain(&deliveries).await;
    assert!(delivered.contains(&Delivery::VerifiedNotice {
        to: "user@example.com".to_string()
    }));
}

#[tokio::test]
async fn test_confirm_account_with_wrong_code_leaves_account_unverified() {
    let (wicket, _deliveries) = setup().await;

    let account = wicket.create_account("user@example.com", None).await.unwrap();
    let issued = wicket.issue_code(&account.id).await.unwrap();

    let wrong = if issued.code == "100000" {
        "100001"
    } else {
        "100000"
    };
    let outcome = wicket.confirm_account(&account.id, wrong).await.unwrap();
    assert!(matches!(outcome, Verification::Mismatch { .. }));

    let reloaded = wicket.account(&account.id).await.unwrap().unwrap();
    assert!(!reloaded.is_verified());

    // The challenge survives a failed confirmation
    let outcome = wicket
        .verify_code(&account.id, &issued.code)
        .await
        .unwrap();
    assert_eq!(outcome, Verification::Verified);
}

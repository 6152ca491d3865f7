// --- File: crates/clinicbook_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers and the booking driver talk to these traits, never to a concrete
//! client, so tests can swap in in-memory implementations.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::ContactRecord;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Somewhere a submitted contact ends up.
///
/// One call appends one record. Implementations must not retry; a failure is
/// reported once to the caller.
pub trait ContactSink: Send + Sync {
    /// Error type returned by the sink.
    type Error: StdError + Send + Sync + 'static;

    /// Append a single contact.
    fn append_contact(&self, record: ContactRecord) -> BoxFuture<'_, (), Self::Error>;
}

impl<S> ContactSink for Arc<S>
where
    S: ContactSink + ?Sized,
{
    type Error = S::Error;

    fn append_contact(&self, record: ContactRecord) -> BoxFuture<'_, (), Self::Error> {
        (**self).append_contact(record)
    }
}

/// Type-erased sink as stored in handler state.
pub type DynContactSink = Arc<dyn ContactSink<Error = BoxedError>>;

/// Adapter erasing a sink's concrete error type.
pub struct BoxedSink<S>(pub S);

impl<S> ContactSink for BoxedSink<S>
where
    S: ContactSink,
{
    type Error = BoxedError;

    fn append_contact(&self, record: ContactRecord) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            self.0
                .append_contact(record)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Wraps any sink into the shared, type-erased form.
pub fn boxed_sink<S>(sink: S) -> DynContactSink
where
    S: ContactSink + 'static,
{
    Arc::new(BoxedSink(sink))
}

/// Access point for the services a binary has configured.
pub trait ServiceFactory: Send + Sync {
    /// The contact sink, if one is enabled.
    fn contact_sink(&self) -> Option<DynContactSink>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, thiserror::Error)]
    #[error("mock sink failure: {0}")]
    pub struct MockSinkError(pub String);

    /// In-memory sink recording every appended contact.
    #[derive(Default)]
    pub struct RecordingSink {
        pub records: Mutex<Vec<ContactRecord>>,
        pub fail_with: Option<String>,
    }

    impl ContactSink for RecordingSink {
        type Error = MockSinkError;

        fn append_contact(&self, record: ContactRecord) -> BoxFuture<'_, (), Self::Error> {
            Box::pin(async move {
                if let Some(reason) = &self.fail_with {
                    return Err(MockSinkError(reason.clone()));
                }
                self.records
                    .lock()
                    .map_err(|e| MockSinkError(e.to_string()))?
                    .push(record);
                Ok(())
            })
        }
    }

    #[tokio::test]
    async fn test_boxed_sink_forwards_records() {
        let sink = Arc::new(RecordingSink::default());
        let boxed = BoxedSink(sink.clone());
        let record = ContactRecord::new("A", "1").expect("record");

        boxed.append_contact(record.clone()).await.expect("append");
        assert_eq!(*sink.records.lock().expect("lock"), vec![record]);
    }

    #[tokio::test]
    async fn test_boxed_sink_erases_error() {
        let sink = boxed_sink(RecordingSink {
            fail_with: Some("quota".to_string()),
            ..Default::default()
        });
        let err = sink
            .append_contact(ContactRecord::new("A", "1").expect("record"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "mock sink failure: quota");
    }
}

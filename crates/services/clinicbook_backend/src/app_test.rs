#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use clinicbook_common::services::BoxFuture;
    use clinicbook_common::{boxed_sink, ContactRecord, ContactSink};
    use clinicbook_config::AppConfig;
    use tower::ServiceExt;

    use crate::app::{build_router, WELCOME_MESSAGE};
    use crate::service_factory::ClinicbookServiceFactory;

    #[derive(Debug, thiserror::Error)]
    #[error("unreachable")]
    struct Never;

    #[derive(Default)]
    struct MemorySink(Mutex<Vec<ContactRecord>>);

    impl ContactSink for MemorySink {
        type Error = Never;

        fn append_contact(&self, record: ContactRecord) -> BoxFuture<'_, (), Self::Error> {
            Box::pin(async move {
                if let Ok(mut rows) = self.0.lock() {
                    rows.push(record);
                }
                Ok(())
            })
        }
    }

    fn app(sink: Arc<MemorySink>) -> Router {
        let services = ClinicbookServiceFactory::with_contact_sink(Some(boxed_sink(sink)));
        build_router(Arc::new(AppConfig::default()), &services)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_welcome_route() {
        let response = app(Arc::default())
            .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, WELCOME_MESSAGE);
    }

    #[cfg(feature = "sheets")]
    #[tokio::test]
    async fn test_add_contact_is_mounted_under_api() {
        use axum::http::header;

        let sink = Arc::new(MemorySink::default());
        let request = Request::builder()
            .method("POST")
            .uri("/api/add-contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"A","phone":"1"}"#))
            .unwrap();
        let response = app(sink.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"success":true}"#);
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }

    #[cfg(feature = "booking")]
    #[tokio::test]
    async fn test_booking_routes_are_mounted_under_api() {
        let response = app(Arc::default())
            .oneshot(
                Request::builder()
                    .uri("/api/booking/slots?user_type=returning")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(r#""duration_minutes":40"#));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app(Arc::default())
            .oneshot(Request::builder().uri("/add-contact").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

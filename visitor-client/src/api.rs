//! Typed API surface of the visitor-tracking backend

use async_trait::async_trait;
use base64::Engine;
use shared::models::{
    BackfillResult, Customer, CustomerInput, CustomerQuery, HealthStatus, ReportQuery, Site, Staff,
    StaffFaceResult, StaffFaceUpload, StaffInput, VisitList, VisitQuery, VisitorReportBucket,
    WorkerStatus,
};

use crate::http::{HttpClient, NetworkHttpClient};
use crate::{ClientConfig, ClientResult};

/// Operations the admin pages need from the backend.
///
/// Object safe so pages can hold an `Arc<dyn VisitorApi>` and tests can swap
/// in an in-memory implementation.
#[async_trait]
pub trait VisitorApi: Send + Sync {
    // ========== Customers ==========
    async fn get_customers(&self, query: &CustomerQuery) -> ClientResult<Vec<Customer>>;
    async fn get_customer(&self, id: i64) -> ClientResult<Customer>;
    async fn create_customer(&self, input: &CustomerInput) -> ClientResult<Customer>;
    async fn update_customer(&self, id: i64, input: &CustomerInput) -> ClientResult<Customer>;
    async fn delete_customer(&self, id: i64) -> ClientResult<()>;
    async fn backfill_customer_face_images(&self, id: i64) -> ClientResult<BackfillResult>;

    // ========== Staff ==========
    async fn get_staff(&self) -> ClientResult<Vec<Staff>>;
    async fn create_staff(&self, input: &StaffInput) -> ClientResult<Staff>;
    async fn update_staff(&self, id: i64, input: &StaffInput) -> ClientResult<Staff>;
    async fn delete_staff(&self, id: i64) -> ClientResult<()>;
    async fn upload_staff_face(&self, id: i64, image: &[u8]) -> ClientResult<StaffFaceResult>;

    // ========== Lookups & reports ==========
    async fn get_sites(&self) -> ClientResult<Vec<Site>>;
    async fn get_visits(&self, query: &VisitQuery) -> ClientResult<VisitList>;
    async fn get_visitor_report(&self, query: &ReportQuery)
    -> ClientResult<Vec<VisitorReportBucket>>;

    // ========== System ==========
    async fn get_health(&self) -> ClientResult<HealthStatus>;
    async fn get_workers(&self) -> ClientResult<WorkerStatus>;
}

/// Network implementation of [`VisitorApi`]
#[derive(Debug, Clone)]
pub struct ApiClient<H = NetworkHttpClient> {
    http: H,
}

impl ApiClient<NetworkHttpClient> {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: NetworkHttpClient::new(config)?,
        })
    }
}

impl<H: HttpClient> ApiClient<H> {
    /// Wrap an existing transport
    pub fn with_http(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }
}

#[async_trait]
impl<H: HttpClient> VisitorApi for ApiClient<H> {
    async fn get_customers(&self, query: &CustomerQuery) -> ClientResult<Vec<Customer>> {
        self.http.get_query("customers", query).await
    }

    async fn get_customer(&self, id: i64) -> ClientResult<Customer> {
        self.http.get(&format!("customers/{id}")).await
    }

    async fn create_customer(&self, input: &CustomerInput) -> ClientResult<Customer> {
        self.http.post("customers", input).await
    }

    async fn update_customer(&self, id: i64, input: &CustomerInput) -> ClientResult<Customer> {
        self.http.put(&format!("customers/{id}"), input).await
    }

    async fn delete_customer(&self, id: i64) -> ClientResult<()> {
        let _: serde_json::Value = self.http.delete(&format!("customers/{id}")).await?;
        Ok(())
    }

    async fn backfill_customer_face_images(&self, id: i64) -> ClientResult<BackfillResult> {
        self.http
            .post_empty(&format!("customers/{id}/backfill-face-images"))
            .await
    }

    async fn get_staff(&self) -> ClientResult<Vec<Staff>> {
        self.http.get("staff").await
    }

    async fn create_staff(&self, input: &StaffInput) -> ClientResult<Staff> {
        self.http.post("staff", input).await
    }

    async fn update_staff(&self, id: i64, input: &StaffInput) -> ClientResult<Staff> {
        self.http.put(&format!("staff/{id}"), input).await
    }

    async fn delete_staff(&self, id: i64) -> ClientResult<()> {
        let _: serde_json::Value = self.http.delete(&format!("staff/{id}")).await?;
        Ok(())
    }

    async fn upload_staff_face(&self, id: i64, image: &[u8]) -> ClientResult<StaffFaceResult> {
        let body = StaffFaceUpload {
            image_b64: base64::engine::general_purpose::STANDARD.encode(image),
        };
        self.http.post(&format!("staff/{id}/faces"), &body).await
    }

    async fn get_sites(&self) -> ClientResult<Vec<Site>> {
        self.http.get("sites").await
    }

    async fn get_visits(&self, query: &VisitQuery) -> ClientResult<VisitList> {
        self.http.get_query("visits", query).await
    }

    async fn get_visitor_report(
        &self,
        query: &ReportQuery,
    ) -> ClientResult<Vec<VisitorReportBucket>> {
        self.http.get_query("reports/visitors", query).await
    }

    async fn get_health(&self) -> ClientResult<HealthStatus> {
        self.http.get("health").await
    }

    async fn get_workers(&self) -> ClientResult<WorkerStatus> {
        self.http.get("workers/status").await
    }
}

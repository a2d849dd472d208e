//! Customers page
//!
//! Customer table with create/edit/delete, a detail modal showing recent
//! visits, and the per-row face image backfill action.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{BackfillResult, Customer, CustomerInput, CustomerQuery, Visit, VisitQuery};
use std::sync::Arc;
use visitor_client::{ClientResult, VisitorApi};

use crate::controller::{Entity, ListController, ResourceApi};
use crate::error::describe_error;
use crate::table::{Column, Table, TableModel};

/// Visits shown in the customer detail modal
pub const DETAIL_VISIT_LIMIT: u32 = 20;

impl Entity for Customer {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Customer operations of the [`VisitorApi`]
pub struct CustomerResource {
    api: Arc<dyn VisitorApi>,
    query: CustomerQuery,
}

impl CustomerResource {
    pub fn new(api: Arc<dyn VisitorApi>) -> Self {
        Self {
            api,
            query: CustomerQuery::default(),
        }
    }

    pub fn query(&self) -> &CustomerQuery {
        &self.query
    }
}

#[async_trait]
impl ResourceApi for CustomerResource {
    type Entity = Customer;
    type Input = CustomerInput;
    type Lookup = ();

    const SINGULAR: &'static str = "customer";
    const PLURAL: &'static str = "customers";

    async fn list(&self) -> ClientResult<Vec<Customer>> {
        self.api.get_customers(&self.query).await
    }

    async fn create(&self, input: &CustomerInput) -> ClientResult<Customer> {
        self.api.create_customer(input).await
    }

    async fn update(&self, id: i64, input: &CustomerInput) -> ClientResult<Customer> {
        self.api.update_customer(id, input).await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete_customer(id).await
    }
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn format_time(t: Option<DateTime<Utc>>) -> String {
    match t {
        Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn columns() -> Vec<Column<Customer>> {
    vec![
        Column::new("ID", |c: &Customer, _: &()| c.id.to_string()),
        Column::new("Name", |c: &Customer, _: &()| c.display_name()),
        Column::new("Gender", |c: &Customer, _: &()| or_dash(&c.gender)),
        Column::new("Phone", |c: &Customer, _: &()| or_dash(&c.phone)),
        Column::new("Email", |c: &Customer, _: &()| or_dash(&c.email)),
        Column::new("Visits", |c: &Customer, _: &()| c.visit_count.to_string()),
        Column::new("First seen", |c: &Customer, _: &()| {
            format_time(Some(c.first_seen))
        }),
        Column::new("Last seen", |c: &Customer, _: &()| format_time(c.last_seen)),
        Column::new("Avatar", |c: &Customer, _: &()| {
            let has_avatar = c.avatar_url.is_some();
            (if has_avatar { "yes" } else { "no" }).to_string()
        }),
    ]
}

/// Data behind the customer detail modal, fetched when it opens
#[derive(Debug, Clone)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub visits: Vec<Visit>,
}

impl CustomerDetail {
    /// Fetch the customer and their recent visits concurrently
    pub async fn fetch(api: &dyn VisitorApi, id: i64) -> ClientResult<Self> {
        let query = VisitQuery::for_customer(id, DETAIL_VISIT_LIMIT);
        let (customer, visits) = tokio::try_join!(api.get_customer(id), api.get_visits(&query))?;
        Ok(Self {
            customer,
            visits: visits.visits,
        })
    }
}

pub struct CustomersPage {
    api: Arc<dyn VisitorApi>,
    list: ListController<CustomerResource>,
    table: Table<Customer>,
}

impl CustomersPage {
    pub fn new(api: Arc<dyn VisitorApi>) -> Self {
        Self {
            list: ListController::new(CustomerResource::new(Arc::clone(&api))),
            api,
            table: Table::new("customers", columns()),
        }
    }

    /// Restrict the list to customers matching `search`; takes effect on the
    /// next load
    pub fn with_search(mut self, search: Option<String>) -> Self {
        let api = Arc::clone(&self.api);
        self.list = ListController::new(CustomerResource {
            api,
            query: CustomerQuery {
                search,
                ..Default::default()
            },
        });
        self
    }

    pub fn list(&self) -> &ListController<CustomerResource> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<CustomerResource> {
        &mut self.list
    }

    pub async fn load(&mut self) {
        self.list.load().await;
    }

    pub async fn submit(&mut self, input: CustomerInput) -> bool {
        self.list.submit(input).await
    }

    pub async fn remove(&mut self, id: i64) -> bool {
        match self.list.find(id).cloned() {
            Some(customer) => self.list.remove(&customer).await,
            None => false,
        }
    }

    /// Derive the customer's avatar from recorded visit imagery
    pub async fn backfill(&mut self, id: i64) -> bool {
        match self.backfill_call(id).await {
            Some(result) => self.apply_backfill(id, result).await,
            None => false,
        }
    }

    /// Network half of [`backfill`](Self::backfill). Takes `&self`, so
    /// several rows can backfill at once; `None` when the row is busy.
    pub async fn backfill_call(&self, id: i64) -> Option<ClientResult<BackfillResult>> {
        let api = Arc::clone(&self.api);
        self.list
            .row_call(id, async move { api.backfill_customer_face_images(id).await })
            .await
    }

    /// Report a finished backfill and reload on success
    pub async fn apply_backfill(&mut self, id: i64, result: ClientResult<BackfillResult>) -> bool {
        let Some(result) = self
            .list
            .finish_row(id, "Failed to backfill face images", result)
        else {
            return false;
        };
        tracing::info!(
            customer_id = id,
            processed = result.visits_processed,
            "Backfill complete"
        );
        self.list.set_notice(format!(
            "Processed {} visits for customer #{id}",
            result.visits_processed
        ));
        self.list.load().await;
        true
    }

    /// Fetch the detail modal's data for the open customer
    pub async fn load_details(&mut self) -> Option<CustomerDetail> {
        let id = self.list.details()?;
        match CustomerDetail::fetch(self.api.as_ref(), id).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                self.list
                    .report_error(describe_error(&e, "Failed to load customer details"));
                None
            }
        }
    }

    pub fn table(&self, page: usize, page_size: usize) -> TableModel {
        self.table
            .build(self.list.items(), &(), page, page_size, self.list.in_flight())
    }
}

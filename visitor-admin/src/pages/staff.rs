//! Staff page
//!
//! Staff table with the site lookup list, create/edit/delete, and face
//! enrolment uploads per row.

use async_trait::async_trait;
use shared::models::{Site, Staff, StaffFaceResult, StaffInput};
use std::sync::Arc;
use visitor_client::{ClientResult, VisitorApi};

use crate::controller::{Entity, ListController, ResourceApi};
use crate::table::{Column, Table, TableModel};

impl Entity for Staff {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Staff operations of the [`VisitorApi`], with sites as the lookup list
pub struct StaffResource {
    api: Arc<dyn VisitorApi>,
}

impl StaffResource {
    pub fn new(api: Arc<dyn VisitorApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResourceApi for StaffResource {
    type Entity = Staff;
    type Input = StaffInput;
    type Lookup = Vec<Site>;

    const SINGULAR: &'static str = "staff member";
    const PLURAL: &'static str = "staff";

    async fn list(&self) -> ClientResult<Vec<Staff>> {
        self.api.get_staff().await
    }

    async fn lookup(&self) -> ClientResult<Vec<Site>> {
        self.api.get_sites().await
    }

    async fn create(&self, input: &StaffInput) -> ClientResult<Staff> {
        self.api.create_staff(input).await
    }

    async fn update(&self, id: i64, input: &StaffInput) -> ClientResult<Staff> {
        self.api.update_staff(id, input).await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete_staff(id).await
    }
}

/// Site name for a staff row
pub fn site_name(sites: &[Site], site_id: Option<i64>) -> String {
    match site_id {
        None => "Unassigned".to_string(),
        Some(id) => sites
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("Site #{id}")),
    }
}

fn columns() -> Vec<Column<Staff, Vec<Site>>> {
    vec![
        Column::new("ID", |s: &Staff, _: &Vec<Site>| s.id.to_string()),
        Column::new("Name", |s: &Staff, _: &Vec<Site>| s.name.clone()),
        Column::new("Site", |s: &Staff, sites: &Vec<Site>| {
            site_name(sites, s.site_id)
        }),
        Column::new("Status", |s: &Staff, _: &Vec<Site>| {
            let label = if s.is_active { "Active" } else { "Inactive" };
            label.to_string()
        }),
        Column::new("Created", |s: &Staff, _: &Vec<Site>| {
            s.created_at.format("%Y-%m-%d").to_string()
        }),
    ]
}

pub struct StaffPage {
    api: Arc<dyn VisitorApi>,
    list: ListController<StaffResource>,
    table: Table<Staff, Vec<Site>>,
}

impl StaffPage {
    pub fn new(api: Arc<dyn VisitorApi>) -> Self {
        Self {
            list: ListController::new(StaffResource::new(Arc::clone(&api))),
            api,
            table: Table::new("staff", columns()),
        }
    }

    pub fn list(&self) -> &ListController<StaffResource> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<StaffResource> {
        &mut self.list
    }

    pub fn sites(&self) -> &[Site] {
        self.list.lookup()
    }

    pub async fn load(&mut self) {
        self.list.load().await;
    }

    pub async fn submit(&mut self, input: StaffInput) -> bool {
        self.list.submit(input).await
    }

    pub async fn remove(&mut self, id: i64) -> bool {
        match self.list.find(id).cloned() {
            Some(member) => self.list.remove(&member).await,
            None => false,
        }
    }

    /// Upload a face enrolment image for one staff member
    pub async fn upload_face(&mut self, id: i64, image: Vec<u8>) -> bool {
        if image.is_empty() {
            self.list.report_error("Image is empty".to_string());
            return false;
        }
        match self.upload_call(id, image).await {
            Some(result) => self.apply_upload(id, result).await,
            None => false,
        }
    }

    /// Network half of [`upload_face`](Self::upload_face); `None` when the
    /// row is busy
    pub async fn upload_call(
        &self,
        id: i64,
        image: Vec<u8>,
    ) -> Option<ClientResult<StaffFaceResult>> {
        let api = Arc::clone(&self.api);
        self.list
            .row_call(id, async move { api.upload_staff_face(id, &image).await })
            .await
    }

    /// Report a finished upload and reload on success
    pub async fn apply_upload(&mut self, id: i64, result: ClientResult<StaffFaceResult>) -> bool {
        let Some(result) = self
            .list
            .finish_row(id, "Failed to upload face image", result)
        else {
            return false;
        };
        tracing::info!(staff_id = id, faces = result.faces_enrolled, "Face uploaded");
        self.list.set_notice(format!(
            "Face image uploaded ({} enrolled)",
            result.faces_enrolled
        ));
        self.list.load().await;
        true
    }

    pub fn table(&self, page: usize, page_size: usize) -> TableModel {
        self.table.build(
            self.list.items(),
            self.list.lookup(),
            page,
            page_size,
            self.list.in_flight(),
        )
    }
}

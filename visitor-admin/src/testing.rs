//! In-memory [`VisitorApi`] for page tests

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use shared::models::{
    BackfillResult, Customer, CustomerInput, CustomerQuery, HealthStatus, ReportQuery, Site, Staff,
    StaffFaceResult, StaffInput, Visit, VisitList, VisitQuery, VisitorReportBucket, WorkerStatus,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;
use visitor_client::{ClientError, ClientResult, VisitorApi};

#[derive(Default)]
struct Store {
    customers: Vec<Customer>,
    staff: Vec<Staff>,
    sites: Vec<Site>,
    visits: Vec<Visit>,
    report: Vec<VisitorReportBucket>,
    next_id: i64,
    /// op name -> detail returned by a failing call
    failures: HashMap<&'static str, Option<String>>,
    calls: HashMap<&'static str, usize>,
    gates: HashMap<&'static str, VecDeque<oneshot::Receiver<()>>>,
    uploads: Vec<(i64, Vec<u8>)>,
}

#[derive(Default)]
pub struct FakeApi {
    store: Mutex<Store>,
}

pub fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
}

pub fn customer(id: i64, name: &str) -> Customer {
    Customer {
        id,
        name: Some(name.to_string()),
        gender: None,
        phone: None,
        email: None,
        visit_count: 1,
        first_seen: ts(1, 9),
        last_seen: Some(ts(2, 9)),
        avatar_url: None,
    }
}

pub fn staff(id: i64, name: &str, site_id: Option<i64>) -> Staff {
    Staff {
        id,
        name: name.to_string(),
        site_id,
        is_active: true,
        created_at: ts(1, 8),
    }
}

pub fn site(id: i64, name: &str) -> Site {
    Site {
        id,
        name: name.to_string(),
        location: None,
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(self, customers: Vec<Customer>) -> Self {
        self.edit(|s| s.customers = customers);
        self
    }

    pub fn with_staff(self, staff: Vec<Staff>) -> Self {
        self.edit(|s| s.staff = staff);
        self
    }

    pub fn with_sites(self, sites: Vec<Site>) -> Self {
        self.edit(|s| s.sites = sites);
        self
    }

    pub fn with_visits(self, visits: Vec<Visit>) -> Self {
        self.edit(|s| s.visits = visits);
        self
    }

    pub fn with_report(self, report: Vec<VisitorReportBucket>) -> Self {
        self.edit(|s| s.report = report);
        self
    }

    fn edit(&self, f: impl FnOnce(&mut Store)) {
        f(&mut self.store.lock().unwrap());
    }

    /// Make every call to `op` fail until [`FakeApi::recover`]
    pub fn fail(&self, op: &'static str, detail: Option<&str>) {
        self.edit(|s| {
            s.failures.insert(op, detail.map(str::to_string));
        });
    }

    pub fn recover(&self, op: &'static str) {
        self.edit(|s| {
            s.failures.remove(op);
        });
    }

    /// Hold the next ungated call to `op` until the returned sender fires
    /// or drops. Gates queue up: each call to `op` takes the oldest one.
    pub fn gate(&self, op: &'static str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.edit(|s| s.gates.entry(op).or_default().push_back(rx));
        tx
    }

    pub fn calls(&self, op: &str) -> usize {
        self.store.lock().unwrap().calls.get(op).copied().unwrap_or(0)
    }

    pub fn uploads(&self) -> Vec<(i64, Vec<u8>)> {
        self.store.lock().unwrap().uploads.clone()
    }

    /// Count the call, then honour any gate and injected failure
    async fn enter(&self, op: &'static str) -> ClientResult<()> {
        let gate = {
            let mut s = self.store.lock().unwrap();
            *s.calls.entry(op).or_default() += 1;
            s.gates.get_mut(op).and_then(VecDeque::pop_front)
        };
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        match self.store.lock().unwrap().failures.get(op) {
            Some(detail) => Err(ClientError::Api {
                status: 500,
                detail: detail.clone(),
            }),
            None => Ok(()),
        }
    }

    fn next_id(s: &mut Store) -> i64 {
        s.next_id += 1;
        1000 + s.next_id
    }
}

fn not_found(what: &str) -> ClientError {
    ClientError::Api {
        status: 404,
        detail: Some(format!("{what} not found")),
    }
}

#[async_trait]
impl VisitorApi for FakeApi {
    async fn get_customers(&self, query: &CustomerQuery) -> ClientResult<Vec<Customer>> {
        self.enter("get_customers").await?;
        let s = self.store.lock().unwrap();
        let needle = query.search.as_deref().map(str::to_lowercase);
        Ok(s.customers
            .iter()
            .filter(|c| match &needle {
                Some(n) => c.display_name().to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn get_customer(&self, id: i64) -> ClientResult<Customer> {
        self.enter("get_customer").await?;
        let s = self.store.lock().unwrap();
        s.customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("Customer"))
    }

    async fn create_customer(&self, input: &CustomerInput) -> ClientResult<Customer> {
        self.enter("create_customer").await?;
        let mut s = self.store.lock().unwrap();
        let id = Self::next_id(&mut s);
        let mut created = customer(id, "");
        created.name = input.name.clone();
        created.email = input.email.clone();
        created.phone = input.phone.clone();
        created.gender = input.gender.clone();
        s.customers.push(created.clone());
        Ok(created)
    }

    async fn update_customer(&self, id: i64, input: &CustomerInput) -> ClientResult<Customer> {
        self.enter("update_customer").await?;
        let mut s = self.store.lock().unwrap();
        let c = s
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Customer"))?;
        c.name = input.name.clone();
        c.email = input.email.clone();
        c.phone = input.phone.clone();
        c.gender = input.gender.clone();
        Ok(c.clone())
    }

    async fn delete_customer(&self, id: i64) -> ClientResult<()> {
        self.enter("delete_customer").await?;
        self.store.lock().unwrap().customers.retain(|c| c.id != id);
        Ok(())
    }

    async fn backfill_customer_face_images(&self, id: i64) -> ClientResult<BackfillResult> {
        self.enter("backfill").await?;
        let mut s = self.store.lock().unwrap();
        let processed = s
            .visits
            .iter()
            .filter(|v| v.person_id == id)
            .count() as i64;
        let c = s
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Customer"))?;
        c.avatar_url = Some(format!("/faces/{id}.jpg"));
        Ok(BackfillResult {
            visits_processed: processed,
            face_image_url: c.avatar_url.clone(),
        })
    }

    async fn get_staff(&self) -> ClientResult<Vec<Staff>> {
        self.enter("get_staff").await?;
        Ok(self.store.lock().unwrap().staff.clone())
    }

    async fn create_staff(&self, input: &StaffInput) -> ClientResult<Staff> {
        self.enter("create_staff").await?;
        let mut s = self.store.lock().unwrap();
        let id = Self::next_id(&mut s);
        let mut created = staff(id, &input.name, input.site_id);
        created.is_active = input.is_active;
        s.staff.push(created.clone());
        Ok(created)
    }

    async fn update_staff(&self, id: i64, input: &StaffInput) -> ClientResult<Staff> {
        self.enter("update_staff").await?;
        let mut s = self.store.lock().unwrap();
        let m = s
            .staff
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("Staff"))?;
        m.name = input.name.clone();
        m.site_id = input.site_id;
        m.is_active = input.is_active;
        Ok(m.clone())
    }

    async fn delete_staff(&self, id: i64) -> ClientResult<()> {
        self.enter("delete_staff").await?;
        self.store.lock().unwrap().staff.retain(|m| m.id != id);
        Ok(())
    }

    async fn upload_staff_face(&self, id: i64, image: &[u8]) -> ClientResult<StaffFaceResult> {
        self.enter("upload_staff_face").await?;
        let mut s = self.store.lock().unwrap();
        s.uploads.push((id, image.to_vec()));
        let faces_enrolled = s.uploads.iter().filter(|(sid, _)| *sid == id).count() as i64;
        Ok(StaffFaceResult {
            staff_id: id,
            faces_enrolled,
        })
    }

    async fn get_sites(&self) -> ClientResult<Vec<Site>> {
        self.enter("get_sites").await?;
        Ok(self.store.lock().unwrap().sites.clone())
    }

    async fn get_visits(&self, query: &VisitQuery) -> ClientResult<VisitList> {
        self.enter("get_visits").await?;
        let s = self.store.lock().unwrap();
        let mut visits: Vec<Visit> = s
            .visits
            .iter()
            .filter(|v| query.person_id.is_none_or(|id| v.person_id == id))
            .filter(|v| query.person_type.is_none_or(|t| v.person_type == t))
            .cloned()
            .collect();
        if let Some(limit) = query.limit {
            visits.truncate(limit as usize);
        }
        Ok(VisitList { visits })
    }

    async fn get_visitor_report(
        &self,
        _query: &ReportQuery,
    ) -> ClientResult<Vec<VisitorReportBucket>> {
        self.enter("get_visitor_report").await?;
        Ok(self.store.lock().unwrap().report.clone())
    }

    async fn get_health(&self) -> ClientResult<HealthStatus> {
        self.enter("get_health").await?;
        Ok(HealthStatus {
            status: "ok".to_string(),
        })
    }

    async fn get_workers(&self) -> ClientResult<WorkerStatus> {
        self.enter("get_workers").await?;
        Ok(WorkerStatus {
            online_count: 2,
            total_count: 3,
        })
    }
}

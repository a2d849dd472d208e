use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use shared::models::{CustomerInput, StaffInput};
use visitor_admin::controller::{ListController, ResourceApi};
use visitor_admin::pages::DashboardView;
use visitor_admin::{AdminConfig, CustomersPage, DashboardPage, StaffPage, logger, render};
use visitor_client::VisitorApi;

#[derive(Parser)]
#[command(name = "visitor-admin")]
#[command(about = "Admin console for the visitor-tracking API", long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "VISITOR_API_URL")]
    api_url: Option<String>,
    /// Log level for the admin crates
    #[arg(long, global = true, env = "LOG_LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage customers
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Manage staff
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
    /// Summary cards and the visit trend
    Dashboard {
        /// Print the dashboard data as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, env = "PAGE_SIZE")]
        page_size: Option<usize>,
    },
    /// Customer details and recent visits
    Show { id: i64 },
    Create {
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Update a customer; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: CustomerFields,
    },
    Delete { id: i64 },
    /// Derive the customer's face image from recorded visits
    Backfill { id: i64 },
}

#[derive(clap::Args)]
struct CustomerFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

impl CustomerFields {
    fn apply(self, input: &mut CustomerInput) {
        if self.name.is_some() {
            input.name = self.name;
        }
        if self.gender.is_some() {
            input.gender = self.gender;
        }
        if self.phone.is_some() {
            input.phone = self.phone;
        }
        if self.email.is_some() {
            input.email = self.email;
        }
    }
}

#[derive(Subcommand)]
enum StaffAction {
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, env = "PAGE_SIZE")]
        page_size: Option<usize>,
    },
    Create {
        #[command(flatten)]
        fields: StaffFields,
    },
    /// Update a staff member; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: StaffFields,
    },
    Delete { id: i64 },
    /// Enrol a face image for a staff member
    UploadFace {
        id: i64,
        #[arg(long)]
        image: PathBuf,
    },
}

#[derive(clap::Args)]
struct StaffFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    site_id: Option<i64>,
    #[arg(long)]
    active: Option<bool>,
}

impl StaffFields {
    fn apply(self, input: &mut StaffInput) {
        if let Some(name) = self.name {
            input.name = name;
        }
        if self.site_id.is_some() {
            input.site_id = self.site_id;
        }
        if let Some(active) = self.active {
            input.is_active = active;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = AdminConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(level) = cli.log_level {
        config = config.with_log_level(level);
    }
    logger::init_logger(&config.log_level);
    tracing::debug!(api_url = %config.api_url, "Starting visitor-admin");

    let client = config
        .build_client()
        .with_context(|| format!("invalid API URL {}", config.api_url))?;
    let api: Arc<dyn VisitorApi> = Arc::new(client);

    match cli.command {
        Commands::Customers { action } => customers(api, &config, action).await,
        Commands::Staff { action } => staff(api, &config, action).await,
        Commands::Dashboard { json } => dashboard(api, &config, json).await,
    }
}

async fn customers(
    api: Arc<dyn VisitorApi>,
    config: &AdminConfig,
    action: CustomerAction,
) -> anyhow::Result<()> {
    let search = match &action {
        CustomerAction::List { search, .. } => search.clone(),
        _ => None,
    };
    let mut page = CustomersPage::new(api).with_search(search);
    page.load().await;
    ensure_loaded(page.list())?;

    match action {
        CustomerAction::List {
            page: number,
            page_size,
            ..
        } => {
            let size = page_size.unwrap_or(config.page_size);
            print!("{}", render::render_table(&page.table(number, size)));
        }
        CustomerAction::Show { id } => {
            let customer = page
                .list()
                .find(id)
                .cloned()
                .with_context(|| format!("Customer #{id} not found"))?;
            page.list_mut().view_details(&customer);
            let detail = page.load_details().await;
            match detail {
                Some(detail) => print!("{}", render::render_customer_detail(&detail)),
                None => outcome(page.list(), false)?,
            }
        }
        CustomerAction::Create { fields } => {
            let list = page.list_mut();
            list.open_create();
            fields.apply(list.modal_mut().fields_mut());
            let ok = list.submit_modal().await;
            outcome(page.list(), ok)?;
            println!("{}", "Customer created".green());
        }
        CustomerAction::Update { id, fields } => {
            let customer = page
                .list()
                .find(id)
                .cloned()
                .with_context(|| format!("Customer #{id} not found"))?;
            let list = page.list_mut();
            list.open_edit(customer);
            fields.apply(list.modal_mut().fields_mut());
            let ok = list.submit_modal().await;
            outcome(page.list(), ok)?;
            println!("{}", format!("Customer #{id} updated").green());
        }
        CustomerAction::Delete { id } => {
            if page.list().find(id).is_none() {
                bail!("Customer #{id} not found");
            }
            let ok = page.remove(id).await;
            outcome(page.list(), ok)?;
            println!("{}", format!("Customer #{id} deleted").green());
        }
        CustomerAction::Backfill { id } => {
            let ok = page.backfill(id).await;
            outcome(page.list(), ok)?;
        }
    }
    Ok(())
}

async fn staff(
    api: Arc<dyn VisitorApi>,
    config: &AdminConfig,
    action: StaffAction,
) -> anyhow::Result<()> {
    let mut page = StaffPage::new(api);
    page.load().await;
    ensure_loaded(page.list())?;

    match action {
        StaffAction::List {
            page: number,
            page_size,
        } => {
            let size = page_size.unwrap_or(config.page_size);
            print!("{}", render::render_table(&page.table(number, size)));
        }
        StaffAction::Create { fields } => {
            let list = page.list_mut();
            list.open_create();
            fields.apply(list.modal_mut().fields_mut());
            let ok = list.submit_modal().await;
            outcome(page.list(), ok)?;
            println!("{}", "Staff member created".green());
        }
        StaffAction::Update { id, fields } => {
            let member = page
                .list()
                .find(id)
                .cloned()
                .with_context(|| format!("Staff member #{id} not found"))?;
            let list = page.list_mut();
            list.open_edit(member);
            fields.apply(list.modal_mut().fields_mut());
            let ok = list.submit_modal().await;
            outcome(page.list(), ok)?;
            println!("{}", format!("Staff member #{id} updated").green());
        }
        StaffAction::Delete { id } => {
            if page.list().find(id).is_none() {
                bail!("Staff member #{id} not found");
            }
            let ok = page.remove(id).await;
            outcome(page.list(), ok)?;
            println!("{}", format!("Staff member #{id} deleted").green());
        }
        StaffAction::UploadFace { id, image } => {
            let bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("failed to read {}", image.display()))?;
            let ok = page.upload_face(id, bytes).await;
            outcome(page.list(), ok)?;
        }
    }
    Ok(())
}

async fn dashboard(
    api: Arc<dyn VisitorApi>,
    config: &AdminConfig,
    json: bool,
) -> anyhow::Result<()> {
    let mut page = DashboardPage::new(api).with_customer_share(config.customer_share);
    page.load().await;

    match page.view() {
        DashboardView::Ready { data, banner } => {
            if let Some(banner) = banner {
                eprintln!("{}", banner.red());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(data)?);
            } else {
                print!("{}", render::render_dashboard(data));
            }
            Ok(())
        }
        DashboardView::FullPageError { message } => bail!("{message}"),
        DashboardView::Loading => bail!("Dashboard did not load"),
    }
}

/// A fresh load that failed leaves its message on the banner
fn ensure_loaded<R: ResourceApi>(list: &ListController<R>) -> anyhow::Result<()> {
    match list.error() {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}

/// Turn an action's banner into the command result
fn outcome<R: ResourceApi>(list: &ListController<R>, ok: bool) -> anyhow::Result<()> {
    if !ok {
        bail!("{}", list.error().unwrap_or("Request failed"));
    }
    if let Some(notice) = list.notice() {
        println!("{}", notice.green());
    }
    Ok(())
}

//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use pasok_core::domain::{Role, TransactionStatus};
use pasok_core::validation::{GoodsInput, KitchenInput, PeriodInput, SupplierInput, UserInput};
use pasok_export::ReportFormat;
use pasok_shared::types::{
    GoodsId, KitchenId, PageRequest, PeriodId, SupplierId, TransactionId, UserId,
};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "pasok", about = "Pasok supply back-office", version)]
pub struct Cli {
    /// Print results as pretty JSON.
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and store the session.
    Login(LoginArgs),
    /// Log out and remove the stored session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Manage users.
    #[command(subcommand)]
    Users(UserCommand),
    /// Manage suppliers (UD).
    #[command(subcommand)]
    Suppliers(SupplierCommand),
    /// Manage kitchens (Dapur).
    #[command(subcommand)]
    Kitchens(KitchenCommand),
    /// Manage goods (Barang).
    #[command(subcommand)]
    Goods(GoodsCommand),
    /// Manage periods.
    #[command(subcommand)]
    Periods(PeriodCommand),
    /// Manage transactions.
    #[command(subcommand)]
    Transactions(TransactionCommand),
    /// Export the delivery report for a kitchen and period.
    Report(ReportArgs),
    /// Print per-supplier receipts for a transaction.
    Receipt(ReceiptArgs),
    /// Browse the audit log.
    Activity(ActivityArgs),
    /// Read or change application settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Kitchen kiosk access.
    #[command(subcommand)]
    Kiosk(KioskCommand),
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: String,
    /// Password; read from PASOK_PASSWORD when omitted.
    #[arg(long, env = "PASOK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
    /// Free-text search.
    #[arg(long)]
    pub search: Option<String>,
    /// Walk every page instead of printing one.
    #[arg(long, action = ArgAction::SetTrue)]
    pub all: bool,
}

impl ListArgs {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page.max(1), self.limit.clamp(1, 100))
    }
}

#[derive(Subcommand)]
pub enum UserCommand {
    List(ListArgs),
    Show { id: UserId },
    Create(UserArgs),
    Update {
        id: UserId,
        #[command(flatten)]
        args: UserArgs,
    },
    Delete { id: UserId },
}

#[derive(Args)]
pub struct UserArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: Option<String>,
    /// Required when creating; omit on update to keep the current one.
    #[arg(long, env = "PASOK_USER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long, default_value = "operator")]
    pub role: Role,
    #[arg(long, action = ArgAction::SetTrue)]
    pub inactive: bool,
}

impl From<UserArgs> for UserInput {
    fn from(args: UserArgs) -> Self {
        Self {
            username: args.username,
            name: args.name,
            email: args.email,
            password: args.password,
            role: args.role,
            is_active: !args.inactive,
        }
    }
}

#[derive(Subcommand)]
pub enum SupplierCommand {
    List(ListArgs),
    Show { id: SupplierId },
    Create(SupplierArgs),
    Update {
        id: SupplierId,
        #[command(flatten)]
        args: SupplierArgs,
    },
    Delete { id: SupplierId },
}

#[derive(Args)]
pub struct SupplierArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub inactive: bool,
}

impl From<SupplierArgs> for SupplierInput {
    fn from(args: SupplierArgs) -> Self {
        Self {
            code: args.code,
            name: args.name,
            owner: args.owner,
            address: args.address,
            phone: args.phone,
            is_active: !args.inactive,
        }
    }
}

#[derive(Subcommand)]
pub enum KitchenCommand {
    List(ListArgs),
    Show { id: KitchenId },
    Create(KitchenArgs),
    Update {
        id: KitchenId,
        #[command(flatten)]
        args: KitchenArgs,
    },
    Delete { id: KitchenId },
}

#[derive(Args)]
pub struct KitchenArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// Person in charge.
    #[arg(long)]
    pub pic: Option<String>,
    /// Kiosk access code.
    #[arg(long)]
    pub access_code: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub inactive: bool,
}

impl From<KitchenArgs> for KitchenInput {
    fn from(args: KitchenArgs) -> Self {
        Self {
            code: args.code,
            name: args.name,
            address: args.address,
            pic: args.pic,
            access_code: args.access_code,
            is_active: !args.inactive,
        }
    }
}

#[derive(Subcommand)]
pub enum GoodsCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        supplier: Option<SupplierId>,
    },
    Show { id: GoodsId },
    Create(GoodsArgs),
    Update {
        id: GoodsId,
        #[command(flatten)]
        args: GoodsArgs,
    },
    Delete { id: GoodsId },
    /// Create goods from a CSV file, one row at a time.
    Import {
        /// CSV with a header row: name,unit,sale_price,cost_price[,code,supplier_id,is_active]
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct GoodsArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub unit: String,
    #[arg(long)]
    pub sale_price: Decimal,
    #[arg(long)]
    pub cost_price: Decimal,
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub supplier: Option<SupplierId>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub inactive: bool,
}

impl From<GoodsArgs> for GoodsInput {
    fn from(args: GoodsArgs) -> Self {
        Self {
            code: args.code,
            name: args.name,
            unit: args.unit,
            sale_price: args.sale_price,
            cost_price: args.cost_price,
            supplier_id: args.supplier,
            is_active: !args.inactive,
        }
    }
}

#[derive(Subcommand)]
pub enum PeriodCommand {
    List(ListArgs),
    Show { id: PeriodId },
    /// Show the active period.
    Active,
    Create(PeriodArgs),
    Update {
        id: PeriodId,
        #[command(flatten)]
        args: PeriodArgs,
    },
    Delete { id: PeriodId },
    /// Permanently close a period.
    Close { id: PeriodId },
}

#[derive(Args)]
pub struct PeriodArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub start: NaiveDate,
    #[arg(long)]
    pub end: NaiveDate,
    #[arg(long, action = ArgAction::SetTrue)]
    pub active: bool,
}

impl From<PeriodArgs> for PeriodInput {
    fn from(args: PeriodArgs) -> Self {
        Self {
            name: args.name,
            start_date: args.start,
            end_date: args.end,
            is_active: args.active,
        }
    }
}

#[derive(Subcommand)]
pub enum TransactionCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        kitchen: Option<KitchenId>,
        #[arg(long)]
        period: Option<PeriodId>,
        #[arg(long)]
        status: Option<TransactionStatus>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Show { id: TransactionId },
    /// Create a draft from a JSON file holding the transaction and its items.
    Create { file: PathBuf },
    /// Replace a draft from a JSON file.
    Update { id: TransactionId, file: PathBuf },
    Delete { id: TransactionId },
    /// Mark a draft as completed.
    Complete { id: TransactionId },
    /// Cancel a draft.
    Cancel {
        id: TransactionId,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Excel,
    Pdf,
    Both,
}

impl FormatArg {
    pub fn formats(self) -> &'static [ReportFormat] {
        match self {
            Self::Excel => &[ReportFormat::Excel],
            Self::Pdf => &[ReportFormat::Pdf],
            Self::Both => &[ReportFormat::Excel, ReportFormat::Pdf],
        }
    }
}

#[derive(Args)]
pub struct ReportArgs {
    #[arg(long)]
    pub kitchen: KitchenId,
    #[arg(long)]
    pub period: PeriodId,
    /// Restrict to one day inside the period.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = FormatArg::Excel)]
    pub format: FormatArg,
    /// Output directory; defaults to report.output_dir.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ReceiptArgs {
    pub id: TransactionId,
    /// Output directory; defaults to report.output_dir.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ActivityArgs {
    #[arg(long)]
    pub module: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
    #[arg(long)]
    pub user: Option<UserId>,
    #[arg(long)]
    pub from: Option<NaiveDate>,
    #[arg(long)]
    pub to: Option<NaiveDate>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 50)]
    pub limit: u32,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    Show,
    /// Set one or more `key=value` pairs; values are parsed as JSON when possible.
    Set {
        #[arg(required = true)]
        pairs: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum KioskCommand {
    /// Verify a kitchen access code.
    Open { code: String },
    /// List goods for the verified kitchen.
    Goods {
        #[arg(long)]
        search: Option<String>,
    },
    /// Forget the access code.
    Close,
}

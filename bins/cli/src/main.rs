//! Pasok command-line front-end.
//!
//! Talks to the back-office API, exports delivery reports and prints
//! per-supplier receipts.

mod cli;
mod exports;
mod import;
mod render;

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use clap::Parser;
use pasok_client::api::settings::Settings;
use pasok_client::api::transactions::TransactionQuery;
use pasok_client::bulk::upload_goods;
use pasok_client::{ApiClient, ClientError, ListQuery, Resource};
use pasok_core::domain::{ActivityFilter, Goods, Kitchen, Period, Supplier, Transaction, User};
use pasok_core::validation::{LoginInput, TransactionInput};
use pasok_shared::AppConfig;
use pasok_shared::types::PageRequest;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{
    Cli, Command, GoodsCommand, KioskCommand, KitchenCommand, ListArgs, PeriodCommand,
    SettingsCommand, SupplierCommand, TransactionCommand, UserCommand,
};
use crate::render::{Row, print_json};

/// Shared state for one invocation.
pub struct App {
    config: AppConfig,
    client: ApiClient,
    json: bool,
}

impl App {
    fn output<T: Serialize + Row>(&self, value: &T) -> Result<()> {
        if self.json {
            print_json(value)
        } else {
            println!("{}", value.line());
            Ok(())
        }
    }

    async fn list<R>(&self, args: &ListArgs, query: ListQuery) -> Result<()>
    where
        R: Resource + Serialize + Row,
    {
        let query = match &args.search {
            Some(search) => query.search(search.clone()),
            None => query,
        };
        if args.all {
            let items = self.client.list_all::<R>(&query).await?;
            if self.json {
                return print_json(&items);
            }
            render::rows(&items);
            return Ok(());
        }

        let page = self.client.list::<R>(&query.page(args.page_request())).await?;
        if self.json {
            return print_json(&page);
        }
        render::rows(&page.data);
        render::page_footer(&page.meta);
        Ok(())
    }

    async fn show<R>(&self, id: R::Id) -> Result<()>
    where
        R: Resource + Serialize + Row,
    {
        let item = self.client.fetch::<R>(id).await?;
        self.output(&item)
    }

    async fn create<R>(&self, input: R::Input) -> Result<()>
    where
        R: Resource + Serialize + Row,
    {
        let item = self.client.create::<R>(&input).await?;
        self.output(&item)
    }

    async fn update<R>(&self, id: R::Id, input: R::Input) -> Result<()>
    where
        R: Resource + Serialize + Row,
    {
        let item = self.client.update::<R>(id, &input).await?;
        self.output(&item)
    }

    async fn delete<R: Resource>(&self, id: R::Id) -> Result<()> {
        self.client.remove::<R>(id).await?;
        if !self.json {
            println!("Deleted {} #{id}", R::PATH);
        }
        Ok(())
    }
}

fn read_transaction(path: &std::path::Path) -> Result<TransactionInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not a transaction", path.display()))
}

/// `key=value` pairs; values that parse as JSON keep their type.
fn parse_settings(pairs: &[String]) -> Result<Settings> {
    let mut settings = BTreeMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("expected key=value, got `{pair}`");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("setting key must not be blank in `{pair}`");
        }
        let value = serde_json::from_str(value.trim())
            .unwrap_or_else(|_| Value::String(value.trim().to_string()));
        settings.insert(key.to_string(), value);
    }
    Ok(settings)
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Login(args) => {
            let session = app
                .client
                .login(&LoginInput {
                    username: args.username,
                    password: args.password,
                })
                .await?;
            if app.json {
                print_json(&session.user)?;
            } else {
                println!(
                    "Logged in as {} ({})",
                    session.user.display_name(),
                    session.user.role
                );
            }
        }
        Command::Logout => {
            app.client.logout().await?;
            if !app.json {
                println!("Logged out");
            }
        }
        Command::Whoami => {
            let user = app.client.me().await?;
            app.output(&user)?;
        }
        Command::Users(command) => match command {
            UserCommand::List(args) => app.list::<User>(&args, ListQuery::default()).await?,
            UserCommand::Show { id } => app.show::<User>(id).await?,
            UserCommand::Create(args) => {
                if args.password.is_none() {
                    bail!("--password is required for a new user");
                }
                app.create::<User>(args.into()).await?;
            }
            UserCommand::Update { id, args } => app.update::<User>(id, args.into()).await?,
            UserCommand::Delete { id } => app.delete::<User>(id).await?,
        },
        Command::Suppliers(command) => match command {
            SupplierCommand::List(args) => {
                app.list::<Supplier>(&args, ListQuery::default()).await?;
            }
            SupplierCommand::Show { id } => app.show::<Supplier>(id).await?,
            SupplierCommand::Create(args) => app.create::<Supplier>(args.into()).await?,
            SupplierCommand::Update { id, args } => app.update::<Supplier>(id, args.into()).await?,
            SupplierCommand::Delete { id } => app.delete::<Supplier>(id).await?,
        },
        Command::Kitchens(command) => match command {
            KitchenCommand::List(args) => app.list::<Kitchen>(&args, ListQuery::default()).await?,
            KitchenCommand::Show { id } => app.show::<Kitchen>(id).await?,
            KitchenCommand::Create(args) => app.create::<Kitchen>(args.into()).await?,
            KitchenCommand::Update { id, args } => app.update::<Kitchen>(id, args.into()).await?,
            KitchenCommand::Delete { id } => app.delete::<Kitchen>(id).await?,
        },
        Command::Goods(command) => match command {
            GoodsCommand::List { list, supplier } => {
                let mut query = ListQuery::default();
                if let Some(supplier) = supplier {
                    query = query.filter("supplier_id", supplier);
                }
                app.list::<Goods>(&list, query).await?;
            }
            GoodsCommand::Show { id } => app.show::<Goods>(id).await?,
            GoodsCommand::Create(args) => app.create::<Goods>(args.into()).await?,
            GoodsCommand::Update { id, args } => app.update::<Goods>(id, args.into()).await?,
            GoodsCommand::Delete { id } => app.delete::<Goods>(id).await?,
            GoodsCommand::Import { file } => {
                let rows = import::read_goods_csv(&file)?;
                let summary = upload_goods(&app.client, &rows).await?;
                if app.json {
                    print_json(&summary)?;
                } else {
                    render::bulk_summary(&summary);
                }
            }
        },
        Command::Periods(command) => match command {
            PeriodCommand::List(args) => app.list::<Period>(&args, ListQuery::default()).await?,
            PeriodCommand::Show { id } => app.show::<Period>(id).await?,
            PeriodCommand::Active => {
                let period = app.client.active_period().await?;
                app.output(&period)?;
            }
            PeriodCommand::Create(args) => app.create::<Period>(args.into()).await?,
            PeriodCommand::Update { id, args } => app.update::<Period>(id, args.into()).await?,
            PeriodCommand::Delete { id } => app.delete::<Period>(id).await?,
            PeriodCommand::Close { id } => {
                let period = app.client.fetch::<Period>(id).await?;
                let closed = app.client.close_period(&period).await?;
                app.output(&closed)?;
            }
        },
        Command::Transactions(command) => transactions(app, command).await?,
        Command::Report(args) => exports::report(app, args).await?,
        Command::Receipt(args) => exports::receipt(app, args).await?,
        Command::Activity(args) => {
            let filter = ActivityFilter {
                module: args.module,
                action: args.action,
                user_id: args.user,
                from: args.from,
                to: args.to,
            };
            let page = app
                .client
                .activity_logs(&filter, &PageRequest::new(args.page.max(1), args.limit.clamp(1, 100)))
                .await?;
            if app.json {
                print_json(&page)?;
            } else {
                render::rows(&page.data);
                render::page_footer(&page.meta);
            }
        }
        Command::Settings(command) => {
            let settings = match command {
                SettingsCommand::Show => app.client.settings().await?,
                SettingsCommand::Set { pairs } => {
                    app.client.update_settings(&parse_settings(&pairs)?).await?
                }
            };
            if app.json {
                print_json(&settings)?;
            } else {
                for (key, value) in &settings {
                    println!("{key} = {value}");
                }
            }
        }
        Command::Kiosk(command) => match command {
            KioskCommand::Open { code } => {
                let session = app.client.open_kiosk(&code).await?;
                if app.json {
                    print_json(&session.kitchen)?;
                } else {
                    println!("Kiosk opened for {}", session.kitchen.name);
                }
            }
            KioskCommand::Goods { search } => {
                let goods = app.client.kiosk_goods(search.as_deref()).await?;
                if app.json {
                    print_json(&goods)?;
                } else {
                    render::rows(&goods);
                }
            }
            KioskCommand::Close => {
                app.client.close_kiosk()?;
                if !app.json {
                    println!("Kiosk closed");
                }
            }
        },
    }
    Ok(())
}

async fn transactions(app: &App, command: TransactionCommand) -> Result<()> {
    match command {
        TransactionCommand::List {
            list,
            kitchen,
            period,
            status,
            date,
        } => {
            let query = TransactionQuery {
                kitchen_id: kitchen,
                period_id: period,
                status,
                date,
                search: None,
                page: list.page_request(),
            };
            app.list::<Transaction>(&list, query.to_list_query()).await?;
        }
        TransactionCommand::Show { id } => {
            let transaction = app.client.fetch::<Transaction>(id).await?;
            if app.json {
                print_json(&transaction)?;
            } else {
                render::transaction_detail(&transaction);
            }
        }
        TransactionCommand::Create { file } => {
            app.create::<Transaction>(read_transaction(&file)?).await?;
        }
        TransactionCommand::Update { id, file } => {
            let current = app.client.fetch::<Transaction>(id).await?;
            if !current.is_editable() {
                bail!("transaction {} is {} and can no longer be edited", current.code, current.status);
            }
            app.update::<Transaction>(id, read_transaction(&file)?).await?;
        }
        TransactionCommand::Delete { id } => app.delete::<Transaction>(id).await?,
        TransactionCommand::Complete { id } => {
            let transaction = app.client.fetch::<Transaction>(id).await?;
            let done = app.client.complete_transaction(&transaction).await?;
            app.output(&done)?;
        }
        TransactionCommand::Cancel { id, reason } => {
            let transaction = app.client.fetch::<Transaction>(id).await?;
            let cancelled = app
                .client
                .cancel_transaction(&transaction, reason.as_deref())
                .await?;
            app.output(&cancelled)?;
        }
    }
    Ok(())
}

/// One line for the terminal, with a login hint when the session is gone.
fn toast(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Unauthorized(message)) => {
            format!("{message}. Run `pasok login` to sign in again.")
        }
        Some(client) => client.to_string(),
        None => format!("{err:#}"),
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pasok=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = async {
        let config = AppConfig::load().context("failed to load configuration")?;
        let client = ApiClient::new(&config)?;
        let app = App {
            config,
            client,
            json: cli.json,
        };
        run(&app, cli.command).await
    }
    .await;

    if let Err(err) = result {
        eprintln!("error: {}", toast(&err));
        std::process::exit(1);
    }
}

//! `report` and `receipt` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use pasok_client::{ListQuery, TransactionFetcher};
use pasok_core::domain::{Goods, Supplier, Transaction};
use pasok_core::receipt::{ReceiptBuilder, TemplateSelector};
use pasok_core::reports::{ReferenceIndex, ReportFilter, ReportService};
use pasok_export::{
    ReportFormat, receipt_filename, render_receipts, render_report_pdf, render_workbook,
    report_filename, write_export,
};
use pasok_shared::types::format_rupiah;
use serde_json::json;
use tracing::info;

use crate::App;
use crate::cli::{ReceiptArgs, ReportArgs};
use crate::render::print_json;

pub async fn report(app: &App, args: ReportArgs) -> Result<()> {
    let tz = ReportService::parse_timezone(&app.config.report.timezone)?;
    let filter = ReportFilter {
        kitchen_id: args.kitchen,
        period_id: args.period,
        date: args.date,
    };

    let input = TransactionFetcher::new(&app.client, tz).fetch(&filter).await?;
    let index = ReferenceIndex::new(&input.goods, &input.suppliers);
    let report = ReportService::aggregate(&input.transactions, &index, tz);
    ReportService::ensure_not_empty(&report)?;

    let now = Utc::now().with_timezone(&tz).naive_local();
    let header = ReportService::header(
        &app.config.report.business_name,
        &input.kitchen,
        &input.period,
        filter.date,
        now,
    );
    let dir = args.out.unwrap_or_else(|| app.config.report.output_dir.clone());

    let mut saved: Vec<PathBuf> = Vec::new();
    for format in args.format.formats() {
        let bytes = match format {
            ReportFormat::Excel => render_workbook(&header, &report)?,
            ReportFormat::Pdf => render_report_pdf(&header, &report)?,
        };
        let name = report_filename(&input.kitchen.name, &input.period.name, filter.date, now, *format);
        saved.push(write_export(&dir, &name, &bytes)?);
    }
    info!(
        transactions = input.transactions.len(),
        days = report.days.len(),
        "report exported"
    );

    if app.json {
        print_json(&json!({ "files": saved, "totals": report.totals }))?;
    } else {
        println!(
            "{} • {} • {} transaksi • jual {} • laba {}",
            input.kitchen.name,
            header.period_label,
            input.transactions.len(),
            format_rupiah(report.totals.sale),
            format_rupiah(report.totals.profit)
        );
        for path in saved {
            println!("Saved {}", path.display());
        }
    }
    Ok(())
}

pub async fn receipt(app: &App, args: ReceiptArgs) -> Result<()> {
    let tz = ReportService::parse_timezone(&app.config.report.timezone)?;
    let selector = TemplateSelector::from_config(&app.config.receipt.templates)
        .context("receipt.templates is invalid")?;

    let all = ListQuery::default();
    let (transaction, goods, suppliers) = tokio::try_join!(
        app.client.fetch::<Transaction>(args.id),
        app.client.list_all::<Goods>(&all),
        app.client.list_all::<Supplier>(&all),
    )?;
    let index = ReferenceIndex::new(&goods, &suppliers);
    let receipts = ReceiptBuilder::new(selector, tz).build(&transaction, &index, None)?;

    let now = Utc::now().with_timezone(&tz).naive_local();
    let bytes = render_receipts(&app.config.report.business_name, &receipts)?;
    let dir = args.out.unwrap_or_else(|| app.config.report.output_dir.clone());
    let path = write_export(&dir, &receipt_filename(&transaction.code, now), &bytes)?;

    if app.json {
        print_json(&json!({ "file": path, "receipts": receipts }))?;
    } else {
        for receipt in &receipts {
            println!(
                "- {} ({}) • {} baris • {}",
                receipt.supplier_name,
                receipt.template,
                receipt.lines.len(),
                format_rupiah(receipt.total)
            );
        }
        println!("Saved {}", path.display());
    }
    Ok(())
}

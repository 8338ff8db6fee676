use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, info, info_span, warn};

use carton_ingest::{CachedLoader, IngestError, ShipmentTable, SourceLoader};
use carton_model::ScanReport;
use carton_pallet::{ScanSession, SessionOptions};

use crate::cli::{OutputFormatArg, PalletsArgs, ScanArgs};
use crate::render::{
    concepts_table, invoice_table, pallet_json, pallet_table, scan_json, scan_results_table,
    session_view,
};
use crate::settings::{ResolvedSource, Settings};

pub fn run_concepts(settings: &Settings) -> Result<()> {
    if settings.concepts.is_empty() {
        println!(
            "No concepts configured. Add a [concepts.<name>] section to {}",
            Settings::config_path().display()
        );
        return Ok(());
    }
    println!("{}", concepts_table(settings));
    Ok(())
}

pub fn run_invoices(settings: &Settings, resolved: &ResolvedSource) -> Result<()> {
    let table = load_table(settings, resolved)?;
    let invoices = table.invoices();
    println!("Concept: {} ({})", resolved.concept, resolved.source);
    println!("{}", invoice_table(&invoices));
    Ok(())
}

pub fn run_pallets(
    settings: &Settings,
    resolved: &ResolvedSource,
    args: &PalletsArgs,
) -> Result<()> {
    let table = load_table(settings, resolved)?;
    let session = ScanSession::for_invoice(&table, &args.invoice, settings.scan)
        .with_context(|| format!("open invoice {}", args.invoice.trim()))?;
    let allocations = session.plan().allocations();
    match args.format {
        OutputFormatArg::Table => {
            println!(
                "Invoice: {} | Total Cartons: {} | Groups: {}",
                session.invoice_no(),
                session.total_cartons(),
                session.plan().group_count()
            );
            println!("{}", pallet_table(allocations));
        }
        OutputFormatArg::Json => {
            println!("{}", pallet_json(allocations).context("serialize pallet plan")?);
        }
    }
    Ok(())
}

/// Verify codes for an invoice. Returns whether every listed code matched.
///
/// Without codes, runs the interactive loop on stdin and returns true.
pub fn run_scan(settings: &Settings, resolved: &ResolvedSource, args: &ScanArgs) -> Result<bool> {
    if args.codes.is_empty() {
        let loader = cached_loader(settings, resolved)?;
        let mut scan_loop = ScanLoop::open(loader, &args.invoice, settings.scan)?;
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        scan_loop.run(stdin.lock(), stdout.lock())?;
        return Ok(true);
    }

    let table = load_table(settings, resolved)?;
    let mut session = ScanSession::for_invoice(&table, &args.invoice, settings.scan)
        .with_context(|| format!("open invoice {}", args.invoice.trim()))?;
    let results = scan_codes(&mut session, &args.codes);
    let matched = results
        .iter()
        .filter(|(_, report)| report.outcome.is_match())
        .count();
    match args.format {
        OutputFormatArg::Table => {
            println!("Invoice: {}", session.invoice_no());
            println!("{}", scan_results_table(&results));
            println!("Matched {matched}/{}", results.len());
        }
        OutputFormatArg::Json => {
            println!("{}", scan_json(&results).context("serialize scan results")?);
        }
    }
    Ok(matched == results.len())
}

/// Scan each code in order against one session.
pub fn scan_codes(session: &mut ScanSession, codes: &[String]) -> Vec<(String, ScanReport)> {
    codes
        .iter()
        .map(|code| (code.clone(), session.scan(code, Local::now())))
        .collect()
}

fn load_table(settings: &Settings, resolved: &ResolvedSource) -> Result<Arc<ShipmentTable>> {
    cached_loader(settings, resolved)?
        .table(false)
        .map_err(load_error)
}

fn cached_loader(settings: &Settings, resolved: &ResolvedSource) -> Result<CachedLoader> {
    let loader =
        SourceLoader::with_timeout(settings.http.timeout()).context("create HTTP client")?;
    Ok(CachedLoader::new(loader, resolved.source.clone()).with_ttl(settings.http.cache_ttl()))
}

/// Keep the operator-facing text on top of the technical cause.
fn load_error(error: IngestError) -> anyhow::Error {
    let message = error.user_message().to_string();
    anyhow::Error::new(error).context(message)
}

/// What the loop should do after a line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "Commands: :inv <C-INV> switch invoice, :invoices list invoices, \
:pallets show the pallet plan, :reset clear history, :reload refetch the packing list, :q quit";

/// Interactive scanning over a cached packing list.
pub struct ScanLoop {
    loader: CachedLoader,
    options: SessionOptions,
    session: ScanSession,
}

impl ScanLoop {
    /// Load the packing list and open a session on `invoice_no`.
    pub fn open(
        mut loader: CachedLoader,
        invoice_no: &str,
        options: SessionOptions,
    ) -> Result<Self> {
        let table = loader.table(false).map_err(load_error)?;
        let session = ScanSession::for_invoice(&table, invoice_no, options)
            .with_context(|| format!("open invoice {}", invoice_no.trim()))?;
        Ok(Self {
            loader,
            options,
            session,
        })
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// Read lines until `:q` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        let span = info_span!("scan_loop", source = %self.loader.source());
        let _guard = span.enter();
        writeln!(output, "{}", session_view(&self.session))?;
        writeln!(output, "{HELP}")?;
        for line in input.lines() {
            let line = line.context("read scan input")?;
            if self.handle(&line, &mut output)? == Flow::Quit {
                break;
            }
        }
        info!(
            invoice = %self.session.invoice_no(),
            scans = self.session.scan_count(),
            "scan loop finished"
        );
        Ok(())
    }

    fn handle<W: Write>(&mut self, line: &str, output: &mut W) -> Result<Flow> {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            self.session.scan(line, Local::now());
            writeln!(output, "{}", session_view(&self.session))?;
            return Ok(Flow::Continue);
        };
        let (name, argument) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, rest)| (name, rest.trim()));
        debug!(command = name, "interactive command");
        match name {
            "q" | "quit" => return Ok(Flow::Quit),
            "inv" if argument.is_empty() => writeln!(output, "usage: :inv <C-INV>")?,
            "inv" => self.reload(argument, false, output)?,
            "invoices" => match self.loader.table(false) {
                Ok(table) => writeln!(output, "{}", invoice_table(&table.invoices()))?,
                Err(error) => writeln!(output, "error: {}", error.user_message())?,
            },
            "pallets" => writeln!(output, "{}", pallet_table(self.session.plan().allocations()))?,
            "reset" => {
                self.session.reset();
                writeln!(output, "{}", session_view(&self.session))?;
            }
            "reload" => {
                let invoice_no = self.session.invoice_no().to_string();
                self.reload(&invoice_no, true, output)?;
            }
            _ => writeln!(output, "{HELP}")?,
        }
        Ok(Flow::Continue)
    }

    /// Open a fresh session; on failure keep the current one and report.
    fn reload<W: Write>(
        &mut self,
        invoice_no: &str,
        force_refresh: bool,
        output: &mut W,
    ) -> Result<()> {
        let table = match self.loader.table(force_refresh) {
            Ok(table) => table,
            Err(error) => {
                warn!(
                    error = %error,
                    retryable = error.is_retryable(),
                    "packing list reload failed"
                );
                writeln!(output, "error: {}", error.user_message())?;
                return Ok(());
            }
        };
        match ScanSession::for_invoice(&table, invoice_no, self.options) {
            Ok(session) => {
                self.session = session;
                writeln!(output, "{}", session_view(&self.session))?;
            }
            Err(error) => writeln!(output, "error: {error}")?,
        }
        Ok(())
    }
}

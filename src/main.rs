//! # signlabel CLI
//!
//! Command-line interface for sign label generation.
//!
//! ## Usage
//!
//! ```bash
//! # Sign labels (70x30mm) from a spreadsheet without a header row
//! signlabel labels products.xlsx --out labels/
//!
//! # Square labels, header row assumed
//! signlabel square products.xlsx --out labels/
//!
//! # Proof a single label
//! signlabel render --code V000123 --id 9000555 \
//!     --description "PROMO2024 Red widget" --out proof.png
//!
//! # Watch a Maildir for purchase orders (settings usually come from SIGNLABEL_* env vars)
//! signlabel watch --maildir ~/Mail/orders --sender orders@supplier.example \
//!     --recipient shop@example.com --smtp-host smtp.example.com ...
//!
//! # Print the built-in layouts as JSON
//! signlabel profiles
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

use signlabel::{
    LabelError, LabelRenderer, LabelRequest, LayoutSpec, batch,
    distribute::{DistributionConfig, DistributionJob, SmtpSettings},
    label::encode_png,
    source::spreadsheet,
};

/// signlabel - QR sign label generator
#[derive(Parser, Debug)]
#[command(name = "signlabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the layout's font files
    #[arg(long, global = true, env = "SIGNLABEL_FONT_DIR", default_value = "fonts")]
    font_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one label per spreadsheet row
    Labels {
        /// Spreadsheet (.xlsx, .xls, .xlsb, .ods)
        sheet: PathBuf,

        /// Output directory (must exist)
        #[arg(long, value_name = "DIR")]
        out: PathBuf,

        /// Skip the first row
        #[arg(long)]
        header: bool,

        /// Built-in layout name or a layout JSON file
        #[arg(long, default_value = "sign")]
        layout: String,
    },

    /// Render square labels (barcode and code only); header row assumed
    Square {
        sheet: PathBuf,

        #[arg(long, value_name = "DIR")]
        out: PathBuf,

        /// The first row is data, not a header
        #[arg(long)]
        no_header: bool,
    },

    /// Render a single label to a PNG file
    Render {
        #[arg(long)]
        code: String,

        #[arg(long)]
        id: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        #[arg(long, default_value = "sign")]
        layout: String,
    },

    /// Poll a Maildir for purchase orders and mail back their labels
    Watch(WatchArgs),

    /// Print the built-in layouts as JSON
    Profiles,
}

#[derive(clap::Args, Debug)]
struct WatchArgs {
    /// Maildir kept in sync with the order inbox
    #[arg(long, env = "SIGNLABEL_MAILDIR")]
    maildir: PathBuf,

    /// Only orders from this address are processed
    #[arg(long, env = "SIGNLABEL_SENDER")]
    sender: String,

    /// Recipient of the label archives (repeatable)
    #[arg(long = "recipient", env = "SIGNLABEL_RECIPIENTS", value_delimiter = ',', required = true)]
    recipients: Vec<String>,

    #[arg(long, env = "SIGNLABEL_SMTP_HOST")]
    smtp_host: String,

    #[arg(long, env = "SIGNLABEL_SMTP_PORT")]
    smtp_port: Option<u16>,

    /// Use STARTTLS instead of implicit TLS
    #[arg(long, env = "SIGNLABEL_SMTP_STARTTLS")]
    smtp_starttls: bool,

    #[arg(long, env = "SIGNLABEL_SMTP_USER")]
    smtp_user: String,

    #[arg(long, env = "SIGNLABEL_SMTP_PASSWORD", hide_env_values = true)]
    smtp_password: String,

    /// From address of outgoing mail
    #[arg(long, env = "SIGNLABEL_FROM")]
    from: String,

    /// JSON file of processed order ids
    #[arg(long, env = "SIGNLABEL_LEDGER", default_value = "processed_orders.json")]
    ledger: PathBuf,

    /// Where rendered labels and archives are kept
    #[arg(long, env = "SIGNLABEL_WORK_DIR", default_value = "orders")]
    work_dir: PathBuf,

    /// Seconds between mailbox polls
    #[arg(long, env = "SIGNLABEL_INTERVAL_SECS", default_value = "3600")]
    interval_secs: u64,

    #[arg(long, default_value = "sign")]
    layout: String,
}

impl WatchArgs {
    fn into_config(self) -> DistributionConfig {
        DistributionConfig {
            maildir: self.maildir,
            sender: self.sender,
            recipients: self.recipients,
            smtp: SmtpSettings {
                host: self.smtp_host,
                port: self.smtp_port,
                starttls: self.smtp_starttls,
                username: self.smtp_user,
                password: self.smtp_password,
                from: self.from,
            },
            ledger: self.ledger,
            work_dir: self.work_dir,
            poll_interval: Duration::from_secs(self.interval_secs),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LabelError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Labels {
            sheet,
            out,
            header,
            layout,
        } => {
            let renderer = renderer(&layout, &cli.font_dir)?;
            render_sheet(&sheet, header, &renderer, &out)
        }
        Commands::Square {
            sheet,
            out,
            no_header,
        } => {
            let renderer = LabelRenderer::with_font_dir(LayoutSpec::square(), &cli.font_dir)?;
            render_sheet(&sheet, !no_header, &renderer, &out)
        }
        Commands::Render {
            code,
            id,
            description,
            out,
            layout,
        } => {
            let renderer = renderer(&layout, &cli.font_dir)?;
            let image = renderer.render(&LabelRequest::new(code, id, description))?;
            std::fs::write(&out, encode_png(&image)?)?;
            println!("Saved to {}", out.display());
            Ok(())
        }
        Commands::Watch(args) => {
            let renderer = renderer(&args.layout, &cli.font_dir)?;
            let config = args.into_config();
            log::debug!("Distribution settings: {:?}", config);
            std::fs::create_dir_all(&config.work_dir)?;
            DistributionJob::from_config(&config, renderer)?.run()
        }
        Commands::Profiles => {
            let json = serde_json::to_string_pretty(&LayoutSpec::built_in())
                .map_err(|e| LabelError::Layout(format!("Failed to serialize layouts: {}", e)))?;
            println!("{}", json);
            Ok(())
        }
    }
}

fn renderer(layout: &str, font_dir: &Path) -> Result<LabelRenderer, LabelError> {
    LabelRenderer::with_font_dir(LayoutSpec::load(layout)?, font_dir)
}

fn render_sheet(
    sheet: &Path,
    has_header: bool,
    renderer: &LabelRenderer,
    out: &Path,
) -> Result<(), LabelError> {
    let rows = spreadsheet::read_rows(sheet, has_header)?;
    let written = batch::run(&rows, renderer, out)?;
    println!("Wrote {} labels to {}", written.len(), out.display());
    Ok(())
}

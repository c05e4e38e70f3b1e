use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "enhancer",
    version,
    about = "Command-line client for the PDF Enhancer report service",
    long_about = "Log in, list and upload reports, generate summaries and fetch report PDFs.\n\
                  Settings are read from ENHANCER_* variables and a .env file in the working directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the report service
    #[arg(long, env = "ENHANCER_API_BASE_URL", global = true)]
    pub api_url: Option<String>,

    /// Directory holding local session storage
    #[arg(long, env = "ENHANCER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login(LoginArgs),
    /// Create a new account (does not log in)
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List reports
    Reports,
    /// Show one report
    Report(ReportIdArgs),
    /// Generate a summary for a report
    Summary(ReportIdArgs),
    /// Print the URL of a report's PDF
    PdfUrl(ReportIdArgs),
    /// Download a report's PDF
    Download(DownloadArgs),
    /// Upload a document as a new report
    Upload(UploadArgs),
    /// Resolve an in-app path through the login guard
    Open(OpenArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "ENHANCER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, env = "ENHANCER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args)]
pub struct ReportIdArgs {
    pub id: String,
}

#[derive(Args)]
pub struct DownloadArgs {
    pub id: String,

    /// Target directory (defaults to ENHANCER_DOWNLOAD_DIR or the system downloads folder)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct UploadArgs {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct OpenArgs {
    /// Path such as /reports or /report/42
    pub path: String,
}

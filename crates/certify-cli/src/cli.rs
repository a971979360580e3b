use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "certify",
    about = "Certify — certificate anchoring and verification",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the Certify HTTP server
    Serve(ServeArgs),
    /// Compute the content fingerprint for certificate fields
    Hash(HashArgs),
    /// Run an in-process issue-and-verify roundtrip against the stub ledger
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: String,
}

#[derive(Args)]
pub struct HashArgs {
    #[arg(long)]
    pub recipient: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub issuer: String,
    /// RFC 3339 issue date; defaults to now
    #[arg(long)]
    pub issue_date: Option<String>,
    /// RFC 3339 expiry date; omit for no expiry
    #[arg(long)]
    pub expiry_date: Option<String>,
}

#[derive(Args)]
pub struct DemoArgs {
    #[arg(long, default_value = "Ada Lovelace")]
    pub recipient: String,
    #[arg(long, default_value = "ada@example.org")]
    pub email: String,
    #[arg(long, default_value = "Certificate of Completion")]
    pub title: String,
    #[arg(long, default_value = "Completed the demonstration course")]
    pub description: String,
    #[arg(long, default_value = "Certify Demo Issuer")]
    pub issuer: String,
}

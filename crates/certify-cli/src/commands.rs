use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use colored::Colorize;

use certify_crypto::CanonicalContent;
use certify_engine::{AnchorService, LookupCriteria, VerdictStatus, VerificationResolver};
use certify_ledger::{client_from_config, LedgerConfig, StubLedger};
use certify_server::{AppState, CertifyServer, IssuerIdentity, ServerConfig, StaticTokenAuth};
use certify_store::InMemoryRecordStore;
use certify_types::{AccountAddress, CertificateDraft};

use crate::cli::{Cli, Command, DemoArgs, HashArgs, ServeArgs};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Hash(args) => cmd_hash(args),
        Command::Demo(args) => cmd_demo(args).await,
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let ledger_config = LedgerConfig::from_env().context("resolving ledger configuration")?;
    let ledger = client_from_config(&ledger_config).context("composing ledger client")?;
    let store = Arc::new(InMemoryRecordStore::new());

    let issuer_address = ledger_config
        .signing_key
        .as_ref()
        .map(|key| key.account_address())
        .unwrap_or_else(|| AccountAddress::from_raw([0; 20]));
    let issuer_name =
        std::env::var("CERTIFY_ISSUER_NAME").unwrap_or_else(|_| "Certify Dev Issuer".into());
    let token = std::env::var("CERTIFY_ISSUER_TOKEN").unwrap_or_else(|_| "dev-token".into());
    let auth = StaticTokenAuth::new()
        .with_token(token, IssuerIdentity::new(issuer_name, issuer_address));

    let state = AppState::compose(ledger, store, Arc::new(auth));
    let config = ServerConfig {
        bind_addr: args.bind.parse().context("parsing bind address")?,
    };

    println!(
        "{} Certify server on {} ({:?} mode)",
        "✓".green().bold(),
        args.bind.bold(),
        ledger_config.mode
    );
    CertifyServer::new(config, state).serve().await?;
    Ok(())
}

fn cmd_hash(args: HashArgs) -> anyhow::Result<()> {
    let issue_date = match &args.issue_date {
        Some(raw) => parse_date(raw).context("parsing --issue-date")?,
        None => Utc::now(),
    };
    let expiry_date = args
        .expiry_date
        .as_deref()
        .map(parse_date)
        .transpose()
        .context("parsing --expiry-date")?;

    let content = CanonicalContent::new(
        args.recipient,
        args.title,
        args.description,
        args.issuer,
        &issue_date,
        expiry_date.as_ref(),
    );
    let fingerprint = content.fingerprint()?;
    println!("{}", fingerprint.to_hex().cyan());
    Ok(())
}

async fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let issuer_address = AccountAddress::from_raw([0xde; 20]);
    let ledger = Arc::new(StubLedger::new(issuer_address));
    let store = Arc::new(InMemoryRecordStore::new());
    let anchor = AnchorService::new(ledger.clone(), store.clone());
    let resolver = VerificationResolver::new(ledger, store);

    let draft = CertificateDraft {
        recipient_name: args.recipient,
        recipient_email: args.email,
        title: args.title,
        description: args.description,
        issuer_name: args.issuer,
        issue_date: None,
        expiry_date: None,
    };

    let record = anchor.issue(draft, issuer_address).await?;
    println!("{} Certificate issued", "✓".green().bold());
    println!("  Record:      {}", record.id.to_string().yellow());
    println!("  Fingerprint: {}", record.fingerprint.to_hex().cyan());
    println!("  Transaction: {}", record.transaction_id.to_hex().cyan());
    println!("  Block:       {}", record.block_ref.to_string().bold());
    println!("  Backend:     {}", record.anchor.to_string().magenta());

    let verdict = resolver
        .resolve(&LookupCriteria::Fingerprint(record.fingerprint))
        .await?;
    match verdict.status {
        VerdictStatus::Verified(status) => {
            println!(
                "{} Ledger reconciliation passed — status {}",
                "✓".green().bold(),
                status.to_string().green()
            );
        }
        other => {
            println!("{} Unexpected verdict: {:?}", "✗".red().bold(), other);
        }
    }
    Ok(())
}

fn parse_date(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("not an RFC 3339 timestamp: {raw:?}"))?;
    Ok(parsed.with_timezone(&Utc))
}

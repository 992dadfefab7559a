#[tokio::main]
async fn main() {
  // Minimal CLI: support --version/-V and --help/-h
  let mut args = std::env::args().skip(1);
  if let Some(arg) = args.next() {
    if arg == "--version" || arg == "-V" {
      println!("prune-mail {}", env!("CARGO_PKG_VERSION"));
      return;
    }
    if arg == "--help" || arg == "-h" {
      eprintln!("Usage: prune-mail [--version]");
      eprintln!();
      eprintln!("Configuration is read from the environment (and .env):");
      eprintln!("  PRUNE_DATABASE, PRUNE_ADDR, PRUNE_MAIL_FROM, PRUNE_CORS_ORIGIN,");
      eprintln!("  PRUNE_SEND_FAILURE_STATUS, PRUNE_SEED_DEMO,");
      eprintln!("  PRUNE_SMTP_HOST, PRUNE_SMTP_PORT, PRUNE_SMTP_USER, PRUNE_SMTP_PASS,");
      eprintln!("  PRUNE_SMTP_TLS, PRUNE_SMTP_TIMEOUT_SECS");
      return;
    }
  }

  if let Err(e) = prune_mail::app::run().await {
    eprintln!("error: {e}");
    std::process::exit(1);
  }
}

use anyhow::Result;
use hafalan::config::AppConfig;
use hafalan::repository::{database, DocumentStore, HafalanRepository};
use hafalan::services::HafalanService;
use hafalan::ui::{Alert, AppControl, HafalanApp, Notifier};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;

/// Alerts on stdout, confirmations read from stdin.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, alert: &Alert) {
        println!("{}", alert);
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        print!("[{}] {} (y/N) ", title, message);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        let read = tokio::task::block_in_place(|| io::stdin().lock().read_line(&mut answer));
        matches!(read, Ok(n) if n > 0) && matches!(answer.trim(), "y" | "Y" | "ya")
    }
}

fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't interleave with the screen
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = AppConfig::load()?;
    config.validate()?;

    let pool = database::init_database(&config.database_path).await?;
    let store: Arc<dyn DocumentStore> = Arc::new(HafalanRepository::new(pool));
    let service = HafalanService::new(store, config.collection.clone());

    let mut app = HafalanApp::new(service, &config, Arc::new(TerminalNotifier));
    info!(database = %config.database_path, "Hafalan started");

    print!("{}", app.render());
    while let Some(line) = tokio::task::spawn_blocking(read_line).await?? {
        if app.handle_command(&line).await? == AppControl::Quit {
            break;
        }
        print!("{}", app.render());
    }

    app.shutdown();
    Ok(())
}

use std::io::{stderr, stdout};
use std::process::exit;

use anyhow::{anyhow, Result};
use finance_sync::config::Config;
use finance_sync::validation::{capitalize_first, filter_amount_input};
use finance_sync::{HttpTransactionService, LoadOutcome, SyncController, TransactionDraft, TransactionId, UserId};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

const USAGE: &str = "Usage: finance-sync [user_id] [command]
Commands:
  list                                         print transactions as CSV
  summary                                      print balance, income and expense as CSV
  create [title] [amount] [category] [type]    type is 'expense' or 'income'
  delete [transaction_id]
Categories: Food & Drinks, Shopping, Transportation, Entertainment, Bills, Income, Other
Environment: FINANCE_SYNC_API_URL, FINANCE_SYNC_LOG, FINANCE_SYNC_LOAD_POLICY, FINANCE_SYNC_MUTATIONS, FINANCE_SYNC_TIMEOUT_MS";

enum Command {
    List,
    Summary,
    Create(TransactionDraft),
    Delete(TransactionId)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (Some(user_id), Some(command)) = (args.first().and_then(|arg| UserId::parse(arg)), parse_command(&args)) else {
        eprintln!("{USAGE}");
        exit(1);
    };

    let config = Config::from_env()?;
    setup_logging(config.log_level);

    let service = HttpTransactionService::new(&config.api_url, config.request_timeout)?;
    let controller = SyncController::new(service, Some(user_id))
        .with_load_policy(config.load_policy)
        .with_mutation_mode(config.mutation_mode);

    match command {
        Command::List => {
            load(&controller).await?;
            write_transactions(&controller)?;
        }
        Command::Summary => {
            load(&controller).await?;
            write_summary(&controller)?;
        }
        Command::Create(draft) => {
            let created = controller.submit(&draft).await?;
            match created {
                Some(transaction) => println!("{}", transaction.id),
                None => println!("created")
            }
            info!("Transaction created");
        }
        Command::Delete(id) => {
            controller.delete_transaction(&id).await?;
            println!("deleted");
            info!("Transaction [{id}] deleted");
        }
    }

    Ok(())
}

fn parse_command(args: &[String]) -> Option<Command> {
    let name = args.get(1)?;
    let rest = &args[2..];

    match (name.as_str(), rest) {
        ("list", []) => Some(Command::List),
        ("summary", []) => Some(Command::Summary),
        ("create", [title, amount, category, kind]) => {
            // Same treatment the create form gives each keystroke.
            let mut draft = TransactionDraft::expense(&capitalize_first(title), &filter_amount_input(amount), category);
            draft.is_expense = match kind.as_str() {
                "expense" => true,
                "income" => false,
                _ => return None
            };
            Some(Command::Create(draft))
        }
        ("delete", [id]) if !id.trim().is_empty() => Some(Command::Delete(TransactionId::new(id.trim()))),
        _ => None
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries command output, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn load(controller: &SyncController<HttpTransactionService>) -> Result<()> {
    match controller.load_all().await {
        LoadOutcome::Loaded => Ok(()),
        LoadOutcome::Skipped => Err(anyhow!("No user to load transactions for")),
        LoadOutcome::Failed(error) => Err(error.into())
    }
}

fn write_transactions(controller: &SyncController<HttpTransactionService>) -> Result<()> {
    let mut output = csv::Writer::from_writer(stdout().lock());

    output.write_record(["id", "title", "amount", "category", "tag", "created_at"])?;

    for transaction in controller.store().snapshot().transactions {
        output.write_record([
            transaction.id.to_string(),
            transaction.title,
            transaction.amount.to_string(),
            transaction.category.to_string(),
            transaction.category.tag().to_string(),
            transaction.created_at.to_rfc3339()
        ])?;
    }

    output.flush()?;

    Ok(())
}

fn write_summary(controller: &SyncController<HttpTransactionService>) -> Result<()> {
    let mut output = csv::Writer::from_writer(stdout().lock());
    let summary = controller.store().snapshot().summary;

    output.write_record(["balance", "income", "expense"])?;
    output.write_record([summary.balance.to_string(), summary.income.to_string(), summary.expense.to_string()])?;
    output.flush()?;

    Ok(())
}

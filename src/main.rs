//! splitledger CLI
//!
//! Run balance calculation and debt settlement from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show net balances for an expense file
//! splitledger balances --input expenses.json
//!
//! # Propose the minimal payment plan
//! splitledger settle --input expenses.json --format json
//!
//! # Generate a random expense log for testing
//! splitledger generate --participants 10 --expenses 30
//! ```

use rust_decimal::Decimal;
use splitledger::core::expense::{Expense, ExpenseSet};
use splitledger::core::ids::unique_id;
use splitledger::core::ledger::Ledger;
use splitledger::core::money::format_currency;
use splitledger::core::participant::Participant;
use splitledger::optimization::settlement::DebtOptimizer;
use splitledger::simulation::stress_test::{generate_random_log, LogConfig};
use std::collections::HashMap;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"splitledger — shared-expense ledger and debt settlement

USAGE:
    splitledger <COMMAND> [OPTIONS]

COMMANDS:
    balances    Show each participant's net balance
    settle      Propose the minimal payment plan
    generate    Generate a random expense log (for testing)
    help        Show this message

OPTIONS (balances, settle):
    --input <FILE>      Path to JSON expense file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --participants <N>  Number of participants (default: 10)
    --expenses <N>      Number of expenses (default: 30)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    splitledger balances --input expenses.json
    splitledger settle --input expenses.json --format json
    splitledger generate --participants 5 --expenses 20 --output trip.json"#
    );
}

/// JSON schema for input expense files.
#[derive(serde::Deserialize)]
struct ParticipantInput {
    id: String,
    name: String,
}

#[derive(serde::Deserialize)]
struct ExpenseInput {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    description: String,
    amount: String,
    payer: String,
    participants: Vec<String>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(serde::Deserialize)]
struct ExpenseFile {
    #[serde(default)]
    participants: Vec<ParticipantInput>,
    expenses: Vec<ExpenseInput>,
}

/// JSON output schema for balances.
#[derive(serde::Serialize)]
struct BalanceOutput {
    participant_id: String,
    participant_name: String,
    balance: String,
    status: String,
}

/// JSON output schema for settlement plans.
#[derive(serde::Serialize)]
struct PlanOutput {
    transaction_count: usize,
    total_settled: String,
    settlements: Vec<SettlementOutput>,
}

#[derive(serde::Serialize)]
struct SettlementOutput {
    from: String,
    to: String,
    amount: String,
}

fn load_expenses(path: &str) -> ExpenseSet {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: ExpenseFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "participants": [ {{ "id": "p-1", "name": "Alice" }} ],
  "expenses": [
    {{ "description": "Dinner", "amount": "30", "payer": "p-1", "participants": ["p-1", "p-2"] }}
  ]
}}"#
        );
        process::exit(1);
    });

    let roster: HashMap<String, Participant> = file
        .participants
        .into_iter()
        .map(|p| (p.id.clone(), Participant::new(p.id, p.name)))
        .collect();

    // Ids without a roster entry are admitted with the id as display name,
    // matching the engine's tolerance for unknown participants.
    let resolve = |id: &str| {
        roster
            .get(id)
            .cloned()
            .unwrap_or_else(|| Participant::new(id, id))
    };

    let mut set = ExpenseSet::new();
    for input in file.expenses {
        let amount: Decimal = input.amount.parse().unwrap_or_else(|e| {
            eprintln!("Invalid amount '{}': {}", input.amount, e);
            process::exit(1);
        });
        if amount <= Decimal::ZERO {
            eprintln!("Invalid amount '{}': must be positive", input.amount);
            process::exit(1);
        }

        let mut expense = Expense::new(
            input.id.unwrap_or_else(unique_id),
            input.description,
            amount,
            resolve(&input.payer),
            input.participants.iter().map(|id| resolve(id)).collect(),
        );
        if let Some(date) = input.date {
            let parsed = date.parse().unwrap_or_else(|e| {
                eprintln!("Invalid date '{}': {}", date, e);
                process::exit(1);
            });
            expense = expense.with_date(parsed);
        }
        set.add(expense);
    }
    set
}

fn parse_io_options(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, format)
}

fn cmd_balances(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let set = load_expenses(&path);

    let ledger = Ledger::from_expenses(set.expenses()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let balances = ledger.balances();

    if format == "json" {
        let output: Vec<BalanceOutput> = balances
            .iter()
            .map(|b| BalanceOutput {
                participant_id: b.participant_id.to_string(),
                participant_name: b.participant_name.clone(),
                balance: b.balance.to_string(),
                status: if b.is_settled() {
                    "SETTLED".to_string()
                } else if b.balance > Decimal::ZERO {
                    "CREDITOR".to_string()
                } else {
                    "DEBTOR".to_string()
                },
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("Expenses:     {}", set.len());
        println!("Total spent:  {}", format_currency(set.total_spent()));
        println!();
        for b in &balances {
            let status = if b.is_settled() {
                "SETTLED"
            } else if b.balance > Decimal::ZERO {
                "CREDITOR"
            } else {
                "DEBTOR"
            };
            println!(
                "  {:<20} {:>12}  [{}]",
                b.participant_name,
                format_currency(b.balance),
                status
            );
        }
    }
}

fn cmd_settle(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let set = load_expenses(&path);

    let plan = DebtOptimizer::settle_expenses(&set).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if format == "json" {
        let output = PlanOutput {
            transaction_count: plan.transaction_count(),
            total_settled: plan.total_settled().to_string(),
            settlements: plan
                .settlements()
                .iter()
                .map(|s| SettlementOutput {
                    from: s.from.clone(),
                    to: s.to.clone(),
                    amount: s.amount.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else if plan.is_empty() {
        println!("All settled — no payments needed.");
    } else {
        println!("{}", plan);
    }
}

fn cmd_generate(args: &[String]) {
    let mut participants = 10usize;
    let mut expenses = 30usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                participants = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--participants requires a number");
                    process::exit(1);
                });
            }
            "--expenses" => {
                i += 1;
                expenses = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--expenses requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = LogConfig {
        participant_count: participants,
        expense_count: expenses,
        ..Default::default()
    };

    let set = generate_random_log(&config);

    #[derive(serde::Serialize)]
    struct OutputParticipant {
        id: String,
        name: String,
    }

    #[derive(serde::Serialize)]
    struct OutputExpense {
        id: String,
        description: String,
        amount: String,
        payer: String,
        participants: Vec<String>,
        date: String,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        participants: Vec<OutputParticipant>,
        expenses: Vec<OutputExpense>,
    }

    let output = OutputFile {
        participants: set
            .participants()
            .iter()
            .map(|p| OutputParticipant {
                id: p.id().to_string(),
                name: p.name().to_string(),
            })
            .collect(),
        expenses: set
            .expenses()
            .iter()
            .map(|e| OutputExpense {
                id: e.id().to_string(),
                description: e.description().to_string(),
                amount: e.amount().to_string(),
                payer: e.payer().id().to_string(),
                participants: e.split_group().iter().map(|p| p.id().to_string()).collect(),
                date: e.date().to_rfc3339(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} expenses across {} participants → {}",
            set.len(),
            participants,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "balances" => cmd_balances(rest),
        "settle" => cmd_settle(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}

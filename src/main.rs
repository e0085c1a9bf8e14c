use std::io::Write;

use autoflip::application::advice::{AdviceOutcome, APOLOGY};
use autoflip::application::runtime::{run_session, SessionCommand};
use autoflip::application::session::SessionChannels;
use autoflip::cli::commands::{Cli, Commands};
use autoflip::cli::render;
use autoflip::cli::repl::{parse_line, ReplCommand};
use autoflip::domain::entities::opportunity::{ExpiredDomain, Opportunity, Product};
use autoflip::domain::values::tool::Tool;
use autoflip::infrastructure::config::AppConfig;
use autoflip::infrastructure::logging::init_tracing;
use autoflip::AutoFlip;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if cli.offline {
        config.offline = true;
    }
    init_tracing(config.log_format);

    let app = AutoFlip::new(config);
    let result = run_command(app, cli.command.unwrap_or(Commands::Session)).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(app: AutoFlip, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Session => run_repl(app).await?,
        Commands::Products => {
            let items = app.opportunities(Tool::Products).await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Commands::Domains => {
            let items = app.opportunities(Tool::Domains).await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Commands::Plan { json } => {
            let product: Product = serde_json::from_str(&json)?;
            let plan = app.plan(&Opportunity::Product(product)).await?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Commands::Pitch { json } => {
            let domain: ExpiredDomain = serde_json::from_str(&json)?;
            let plan = app.plan(&Opportunity::Domain(domain)).await?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Commands::Ask { message } => {
            let mut guide = app.expert_guide();
            let outcome = guide
                .ask(&message, ctrl_c(), |chunk| {
                    print!("{chunk}");
                    let _ = std::io::stdout().flush();
                })
                .await?;
            println!();
            if let AdviceOutcome::Cancelled(_) = outcome {
                eprintln!("(cancelled)");
            }
        }
    }
    Ok(())
}

async fn ctrl_c() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn run_repl(app: AutoFlip) -> Result<(), Box<dyn std::error::Error>> {
    let (controller, channels) = app.session();
    let SessionChannels {
        updates,
        mut events,
    } = channels;
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

    let session = tokio::spawn(run_session(controller, cmd_rx, updates));
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if let Some(text) = render::render_event(&event) {
                println!("{text}");
            }
        }
    });

    println!("{}", render::WELCOME);
    let mut guide = app.expert_guide();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(ReplCommand::Empty) => {}
            Ok(ReplCommand::Help) => println!("{}", render::HELP),
            Ok(ReplCommand::Quit) => break,
            Ok(ReplCommand::Ask(question)) => {
                let outcome = guide
                    .ask(&question, ctrl_c(), |chunk| {
                        print!("{chunk}");
                        let _ = std::io::stdout().flush();
                    })
                    .await;
                println!();
                match outcome {
                    Ok(AdviceOutcome::Completed(_)) => {}
                    Ok(AdviceOutcome::Cancelled(_)) => println!("[info] answer cancelled"),
                    Err(e) if e.is_validation() => println!("[error] {e}"),
                    Err(_) => println!("[error] {APOLOGY}"),
                }
            }
            Ok(ReplCommand::Session(cmd)) => {
                if cmd_tx.send(cmd).is_err() {
                    break;
                }
            }
            Err(msg) => println!("[error] {msg}"),
        }
    }

    let _ = cmd_tx.send(SessionCommand::Quit);
    session.await?;
    printer.await?;
    Ok(())
}

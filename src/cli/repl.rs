//! Line parser for the interactive session.

use crate::application::runtime::SessionCommand;
use crate::domain::values::amount::Amount;
use crate::domain::values::tool::Tool;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Session(SessionCommand),
    Ask(String),
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Empty);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let cmd = match word.to_lowercase().as_str() {
        "help" | "?" => return Ok(ReplCommand::Help),
        "quit" | "exit" => return Ok(ReplCommand::Quit),
        "ask" => {
            if rest.is_empty() {
                return Err("usage: ask <question>".into());
            }
            return Ok(ReplCommand::Ask(rest.to_string()));
        }
        "subscribe" => SessionCommand::Subscribe,
        "tool" => SessionCommand::SelectTool(rest.parse()?),
        "products" => SessionCommand::SelectTool(Tool::Products),
        "domains" => SessionCommand::SelectTool(Tool::Domains),
        "refresh" | "retry" => SessionCommand::Refresh,
        "buy" => {
            let n: usize = rest
                .parse()
                .map_err(|_| format!("usage: buy <number> (got '{rest}')"))?;
            if n == 0 {
                return Err("listing positions start at 1".into());
            }
            SessionCommand::Buy(n - 1)
        }
        "confirm" | "yes" => SessionCommand::Confirm,
        "cancel" | "no" => SessionCommand::Cancel,
        "launch" | "sell" => {
            if rest.is_empty() {
                SessionCommand::Launch(None)
            } else {
                SessionCommand::Launch(Some(amount(rest)?))
            }
        }
        "back" => SessionCommand::Back,
        "deposit" => SessionCommand::Deposit(amount(rest)?),
        "withdraw" => SessionCommand::Withdraw(amount(rest)?),
        "revenue-withdraw" => SessionCommand::WithdrawRevenue(amount(rest)?),
        "show" | "wallet" | "ls" => SessionCommand::Show,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(ReplCommand::Session(cmd))
}

fn amount(raw: &str) -> Result<Amount, String> {
    raw.parse::<Amount>().map_err(|e| e.to_string())
}

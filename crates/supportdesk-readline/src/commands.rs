//! REPL input parsing.

/// One line of REPL input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Blank line.
    Empty,
    Quit,
    Help,
    Clear,
    History,
    Examples,
    /// `/example N`; `None` when N is missing or not a number.
    Example(Option<usize>),
    Classify(Option<String>),
    Extract(Option<String>),
    Email(Option<String>),
    Summarize(Option<String>),
    Unknown(String),
    /// Anything that is not a command goes to the support session.
    Message(String),
}

/// Slash commands offered for completion, in display order.
pub const SLASH_COMMANDS: &[&str] = &[
    "/help",
    "/clear",
    "/history",
    "/examples",
    "/example",
    "/classify",
    "/extract",
    "/email",
    "/summarize",
];

pub fn parse(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }
    if trimmed == "quit" || trimmed == "exit" {
        return ReplCommand::Quit;
    }
    if !trimmed.starts_with('/') {
        return ReplCommand::Message(trimmed.to_string());
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    match name {
        "/help" => ReplCommand::Help,
        "/quit" | "/exit" => ReplCommand::Quit,
        "/clear" => ReplCommand::Clear,
        "/history" => ReplCommand::History,
        "/examples" => ReplCommand::Examples,
        "/example" => ReplCommand::Example(rest.parse().ok()),
        "/classify" => ReplCommand::Classify(argument),
        "/extract" => ReplCommand::Extract(argument),
        "/email" => ReplCommand::Email(argument),
        "/summarize" => ReplCommand::Summarize(argument),
        _ => ReplCommand::Unknown(name.to_string()),
    }
}

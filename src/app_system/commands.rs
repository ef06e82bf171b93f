/// One line of user input at the catalog prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// "All Products" chip.
    All,
    Category(String),
    Search(String),
    Reload,
    Url,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  all                 show all products
  category <slug>     filter by category (c <slug>)
  search <term>       search products (s <term>, /<term>)
  reload              fetch the current selection again
  url                 print the URL query for the current view
  help                show this help
  quit                exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if let Some(term) = line.strip_prefix('/') {
            return Ok(Command::Search(term.trim().to_string()));
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word.to_lowercase().as_str() {
            "all" => Ok(Command::All),
            "category" | "c" => Ok(Command::Category(rest.to_string())),
            "search" | "s" => Ok(Command::Search(rest.to_string())),
            "reload" | "r" => Ok(Command::Reload),
            "url" => Ok(Command::Url),
            "help" | "?" | "" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {} (try 'help')", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("all"), Ok(Command::All));
        assert_eq!(Command::parse("  category   smartphones "), Ok(Command::Category("smartphones".into())));
        assert_eq!(Command::parse("c"), Ok(Command::Category(String::new())));
        assert_eq!(Command::parse("search red lipstick"), Ok(Command::Search("red lipstick".into())));
        assert_eq!(Command::parse("/phone"), Ok(Command::Search("phone".into())));
        assert_eq!(Command::parse("QUIT"), Ok(Command::Quit));
        assert_eq!(Command::parse(""), Ok(Command::Help));
        assert!(Command::parse("checkout").is_err());
    }
}

use crate::core::Column;
use crate::utils::error::{DashError, Result};

pub const HELP: &str = "\
Commands:
  login <user> <password>   open the dashboard (demo/demo)
  logout                    close the dashboard
  search [term]             filter by domain name (empty clears)
  sort <column>             click a column header (again to reverse)
  scroll <px>               jump to a scroll offset
  down | up                 move one viewport
  show                      print the visible rows
  help                      this text
  quit                      exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Search(String),
    Sort(Column),
    Scroll(f64),
    Page(f64),
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "login" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(username), Some(password), None) => Ok(Command::Login {
                        username: username.to_string(),
                        password: password.to_string(),
                    }),
                    _ => Err(invalid("login", rest, "usage: login <user> <password>")),
                }
            }
            "logout" => Ok(Command::Logout),
            "search" => Ok(Command::Search(rest.to_string())),
            "sort" => rest
                .parse::<Column>()
                .map(Command::Sort)
                .map_err(|e| invalid("sort", rest, &e.to_string())),
            "scroll" => rest
                .parse::<f64>()
                .ok()
                .filter(|px| px.is_finite())
                .map(Command::Scroll)
                .ok_or_else(|| invalid("scroll", rest, "expected a number of pixels")),
            "down" | "pgdn" => Ok(Command::Page(1.0)),
            "up" | "pgup" => Ok(Command::Page(-1.0)),
            "show" | "" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(invalid("command", other, "unknown command, try 'help'")),
        }
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> DashError {
    DashError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("login demo demo").unwrap(),
            Command::Login {
                username: "demo".to_string(),
                password: "demo".to_string()
            }
        );
        assert_eq!(Command::parse("  LOGOUT ").unwrap(), Command::Logout);
        assert_eq!(
            Command::parse("search Shop Online").unwrap(),
            Command::Search("Shop Online".to_string())
        );
        assert_eq!(Command::parse("search").unwrap(), Command::Search(String::new()));
        assert_eq!(
            Command::parse("sort spam score").unwrap(),
            Command::Sort(Column::SpamScore)
        );
        assert_eq!(Command::parse("scroll 350").unwrap(), Command::Scroll(350.0));
        assert_eq!(Command::parse("down").unwrap(), Command::Page(1.0));
        assert_eq!(Command::parse("").unwrap(), Command::Show);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("login demo").is_err());
        assert!(Command::parse("sort Rank").is_err());
        assert!(Command::parse("scroll far").is_err());
        assert!(Command::parse("dance").is_err());
    }
}

use thiserror::Error;

use crate::view_model::UserEvent;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: invalid page '{value}'")]
    InvalidPage { line: usize, value: String },
    #[error("line {line}: '{command}' needs an argument")]
    MissingArgument { line: usize, command: String },
}

/// Parses one command: `fetch <page>`, `delete <login>[,<login>...]` or
/// `search <query>`. Blank lines and `#` comments yield `None`.
pub fn parse_command(line_no: usize, line: &str) -> Result<Option<UserEvent>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let missing = || ScriptError::MissingArgument {
        line: line_no,
        command: command.to_string(),
    };

    let event = match command {
        "fetch" => {
            let page = rest.parse().map_err(|_| ScriptError::InvalidPage {
                line: line_no,
                value: rest.to_string(),
            })?;
            UserEvent::GetPaginatedUsers(page)
        }
        "delete" => {
            let logins: Vec<String> = rest
                .split(',')
                .map(str::trim)
                .filter(|login| !login.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            if logins.is_empty() {
                return Err(missing());
            }
            UserEvent::DeleteUsers(logins)
        }
        "search" => {
            if rest.is_empty() {
                return Err(missing());
            }
            UserEvent::SearchUsers(rest.to_string())
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line: line_no,
                command: other.to_string(),
            })
        }
    };
    Ok(Some(event))
}

pub fn parse_script<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<UserEvent>, ScriptError> {
    let mut events = Vec::new();
    for (index, line) in lines.into_iter().enumerate() {
        if let Some(event) = parse_command(index + 1, line)? {
            events.push(event);
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_commands() {
        let events = parse_script([
            "fetch 0",
            "# comment",
            "",
            "delete alice, bob",
            "search  grace hopper ",
        ])
        .unwrap();
        assert_eq!(
            events,
            vec![
                UserEvent::GetPaginatedUsers(0),
                UserEvent::DeleteUsers(vec!["alice".to_string(), "bob".to_string()]),
                UserEvent::SearchUsers("grace hopper".to_string()),
            ]
        );
    }

    #[test]
    fn reports_line_numbers() {
        assert_eq!(
            parse_script(["fetch 1", "fetch x"]),
            Err(ScriptError::InvalidPage {
                line: 2,
                value: "x".to_string()
            })
        );
        assert_eq!(
            parse_command(4, "delete ,"),
            Err(ScriptError::MissingArgument {
                line: 4,
                command: "delete".to_string()
            })
        );
        assert!(matches!(
            parse_command(1, "explode"),
            Err(ScriptError::UnknownCommand { .. })
        ));
    }
}

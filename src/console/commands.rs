//! Line-oriented command parsing for the console surface.

use thiserror::Error;

use crate::query::PostSort;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// One user command. Pipe-separated fields for the multi-argument forms,
/// e.g. `new 7 | My title | Body text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Authors,
    Posts,
    Author { id: String },
    Post { id: String },
    /// Empty query clears the active search.
    Search { query: String },
    Pick { index: usize },
    Sort { key: PostSort },
    Page { number: usize },
    Next,
    Prev,
    New {
        author_id: String,
        title: String,
        description: String,
    },
    Edit {
        id: String,
        title: String,
        description: String,
    },
    Retry,
    Delete { id: String },
    Likes { id: String },
    Comments { id: String },
    Refresh,
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
///
/// # Errors
///
/// Returns an error for unknown commands or malformed arguments, carrying
/// the usage string for the latter.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match word {
        "authors" => Command::Authors,
        "posts" => Command::Posts,
        "author" => Command::Author {
            id: require_id(rest, "author <id>")?,
        },
        "post" => Command::Post {
            id: require_id(rest, "post <id>")?,
        },
        "search" => Command::Search {
            query: rest.to_string(),
        },
        "pick" => {
            let index: usize = rest.parse().map_err(|_| CommandError::Usage("pick <n>"))?;
            if index == 0 {
                return Err(CommandError::Usage("pick <n> (suggestions are numbered from 1)"));
            }
            Command::Pick { index }
        }
        "sort" => match rest {
            "likes" => Command::Sort {
                key: PostSort::Likes,
            },
            "comments" => Command::Sort {
                key: PostSort::Comments,
            },
            _ => return Err(CommandError::Usage("sort likes|comments")),
        },
        "page" => {
            let number: usize = rest.parse().map_err(|_| CommandError::Usage("page <n>"))?;
            Command::Page { number }
        }
        "next" => Command::Next,
        "prev" => Command::Prev,
        "new" => {
            let [author_id, title, description] =
                split_fields(rest, "new <authorId> | <title> | <description>")?;
            Command::New {
                author_id,
                title,
                description,
            }
        }
        "edit" => {
            let [id, title, description] =
                split_fields(rest, "edit <id> | <title> | <description>")?;
            Command::Edit {
                id,
                title,
                description,
            }
        }
        "retry" => Command::Retry,
        "delete" => Command::Delete {
            id: require_id(rest, "delete <id>")?,
        },
        "likes" => Command::Likes {
            id: require_id(rest, "likes <id>")?,
        },
        "comments" => Command::Comments {
            id: require_id(rest, "comments <id>")?,
        },
        "refresh" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn require_id(rest: &str, usage: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(CommandError::Usage(usage));
    }
    Ok(rest.to_string())
}

fn split_fields(rest: &str, usage: &'static str) -> Result<[String; 3], CommandError> {
    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [a, b, c] if !a.is_empty() && !b.is_empty() => {
            Ok([(*a).to_string(), (*b).to_string(), (*c).to_string()])
        }
        _ => Err(CommandError::Usage(usage)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_none() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(parse("authors").unwrap(), Some(Command::Authors));
        assert_eq!(parse("next").unwrap(), Some(Command::Next));
        assert_eq!(parse("q").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_search_keeps_spaces_and_allows_empty() {
        assert_eq!(
            parse("search alice s").unwrap(),
            Some(Command::Search {
                query: "alice s".to_string()
            })
        );
        assert_eq!(
            parse("search").unwrap(),
            Some(Command::Search {
                query: String::new()
            })
        );
    }

    #[test]
    fn test_sort_keys() {
        assert_eq!(
            parse("sort likes").unwrap(),
            Some(Command::Sort {
                key: PostSort::Likes
            })
        );
        assert!(matches!(
            parse("sort title"),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn test_pick_rejects_zero() {
        assert_eq!(parse("pick 2").unwrap(), Some(Command::Pick { index: 2 }));
        assert!(parse("pick 0").is_err());
        assert!(parse("pick two").is_err());
    }

    #[test]
    fn test_new_splits_on_pipes() {
        let parsed = parse("new 7 | My title | A longer body, with commas").unwrap();
        assert_eq!(
            parsed,
            Some(Command::New {
                author_id: "7".to_string(),
                title: "My title".to_string(),
                description: "A longer body, with commas".to_string(),
            })
        );
    }

    #[test]
    fn test_edit_requires_three_fields() {
        assert!(parse("edit p1 | only-title").is_err());
        assert!(parse("edit p1 | t | d").unwrap().is_some());
    }

    #[test]
    fn test_id_arguments() {
        assert_eq!(
            parse("delete p-9").unwrap(),
            Some(Command::Delete {
                id: "p-9".to_string()
            })
        );
        assert!(parse("delete").is_err());
        assert!(parse("delete a b").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            parse("frobnicate"),
            Err(CommandError::Unknown(_))
        ));
    }
}

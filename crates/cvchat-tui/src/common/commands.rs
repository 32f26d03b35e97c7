//! Slash commands accepted in the input box.

/// Definition of a command.
#[derive(Debug, Clone)]
pub struct Command {
    /// Primary name without the leading slash.
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Usage hint shown in the help text.
    pub usage: &'static str,
    pub description: &'static str,
}

impl Command {
    pub fn is(&self, word: &str) -> bool {
        self.name.eq_ignore_ascii_case(word)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(word))
    }
}

pub const COMMANDS: &[Command] = &[
    Command {
        name: "attach",
        aliases: &[],
        usage: "/attach <url> [name]",
        description: "Attach a file URL to the next message",
    },
    Command {
        name: "close",
        aliases: &[],
        usage: "/close",
        description: "Close the side panel",
    },
    Command {
        name: "help",
        aliases: &["?"],
        usage: "/help",
        description: "List commands",
    },
    Command {
        name: "jobs",
        aliases: &["job"],
        usage: "/jobs",
        description: "Open the Job Search panel",
    },
    Command {
        name: "new",
        aliases: &["reset", "clear"],
        usage: "/new",
        description: "Start a new session",
    },
    Command {
        name: "quit",
        aliases: &["exit", "q"],
        usage: "/quit",
        description: "Exit cvchat",
    },
    Command {
        name: "resume",
        aliases: &[],
        usage: "/resume",
        description: "Open the Resume Crafting panel",
    },
    Command {
        name: "theme",
        aliases: &[],
        usage: "/theme",
        description: "Toggle light/dark theme",
    },
];

/// A parsed `/command args` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: &'static str,
    pub args: Vec<&'a str>,
}

/// Outcome of parsing input that starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<'a> {
    Command(Invocation<'a>),
    Unknown(&'a str),
}

/// Parses `text` as a slash command. Returns `None` for regular prompts.
pub fn parse(text: &str) -> Option<Parsed<'_>> {
    let rest = text.trim().strip_prefix('/')?;
    let mut words = rest.split_whitespace();
    let word = words.next().unwrap_or_default();

    Some(match COMMANDS.iter().find(|c| c.is(word)) {
        Some(command) => Parsed::Command(Invocation {
            name: command.name,
            args: words.collect(),
        }),
        None => Parsed::Unknown(word),
    })
}

/// One-line summary of all commands.
pub fn help_text() -> String {
    COMMANDS
        .iter()
        .map(|c| c.usage)
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_with_args() {
        assert_eq!(
            parse("/attach https://f/cv.pdf My CV"),
            Some(Parsed::Command(Invocation {
                name: "attach",
                args: vec!["https://f/cv.pdf", "My", "CV"],
            }))
        );
    }

    #[test]
    fn resolves_aliases() {
        let Some(Parsed::Command(inv)) = parse("/EXIT") else {
            panic!("expected command");
        };
        assert_eq!(inv.name, "quit");
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse("hello /there"), None);
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(parse("/frobnicate now"), Some(Parsed::Unknown("frobnicate")));
    }
}

//! Line commands for the interactive browsing shell.

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Plain text replaces the search query (empty text clears it).
    Search(String),
    Category(String),
    Brand(String),
    /// Reset search, category and brand.
    Clear,
    Refresh,
    Facets,
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(directive) = line.trim_start().strip_prefix(':') else {
            return Self::Search(line.to_string());
        };

        let (name, argument) = match directive.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (directive, ""),
        };
        let facet = |value: &str| {
            if value.is_empty() {
                portal_catalog::ALL_FACET.to_string()
            } else {
                value.to_string()
            }
        };

        match name.to_lowercase().as_str() {
            "category" | "c" => Self::Category(facet(argument)),
            "brand" | "b" => Self::Brand(facet(argument)),
            "clear" => Self::Clear,
            "refresh" | "r" => Self::Refresh,
            "facets" | "f" => Self::Facets,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

pub const HELP: &str = "\
Type to search by model or brand. Commands:
  :category NAME   select a category (no name selects All)
  :brand NAME      select a brand within the category
  :clear           reset search and filters
  :refresh         reload the price list
  :facets          list categories and brands
  :quit            leave the shell";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_search() {
        assert_eq!(
            ShellCommand::parse("galaxy s24\n"),
            ShellCommand::Search("galaxy s24".to_string())
        );
        assert_eq!(ShellCommand::parse(""), ShellCommand::Search(String::new()));
    }

    #[test]
    fn directives_take_the_rest_of_the_line() {
        assert_eq!(
            ShellCommand::parse(":category Smart Watch"),
            ShellCommand::Category("Smart Watch".to_string())
        );
        assert_eq!(
            ShellCommand::parse(":brand"),
            ShellCommand::Brand("All".to_string())
        );
        assert_eq!(ShellCommand::parse(":Q"), ShellCommand::Quit);
        assert_eq!(
            ShellCommand::parse(":sort price"),
            ShellCommand::Unknown("sort".to_string())
        );
    }
}

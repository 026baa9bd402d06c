//! Menu options and input parsing.

use std::fmt;

/// Lines printed before every selection prompt.
pub const MENU: &[&str] = &[
    "",
    "1) List interfaces",
    "2) Update interface address",
    "3) Probe an address",
    "4) Check endpoint health",
    "0) Exit",
];

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// `1`: print every configured adapter.
    List,
    /// `2`: rewrite one adapter's static addressing.
    Update,
    /// `3`: ICMP echo probe.
    Probe,
    /// `4`: HTTP health check.
    Health,
    /// `0`: leave the console.
    Exit,
}

impl MenuChoice {
    /// Parses a selection; surrounding whitespace is ignored.
    ///
    /// Returns `None` for anything but the literal tokens `0`-`4`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::List),
            "2" => Some(Self::Update),
            "3" => Some(Self::Probe),
            "4" => Some(Self::Health),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }

    /// Returns the token that selects this entry.
    #[must_use]
    pub const fn token(self) -> char {
        match self {
            Self::List => '1',
            Self::Update => '2',
            Self::Probe => '3',
            Self::Health => '4',
            Self::Exit => '0',
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Update => "update",
            Self::Probe => "probe",
            Self::Health => "health",
            Self::Exit => "exit",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_token_round_trips() {
        for choice in [
            MenuChoice::List,
            MenuChoice::Update,
            MenuChoice::Probe,
            MenuChoice::Health,
            MenuChoice::Exit,
        ] {
            let token = choice.token().to_string();
            assert_eq!(MenuChoice::parse(&token), Some(choice));
        }
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(MenuChoice::parse("  3 \r\n"), Some(MenuChoice::Probe));
    }

    #[test]
    fn anything_else_is_unknown() {
        for input in ["", "5", "01", "1 2", "list", "-1", "q"] {
            assert_eq!(MenuChoice::parse(input), None, "{input:?}");
        }
    }

    #[test]
    fn menu_lists_every_token() {
        for token in ['0', '1', '2', '3', '4'] {
            assert!(
                MENU.iter().any(|line| line.starts_with(token)),
                "missing {token}"
            );
        }
    }
}

use std::{fmt, str::FromStr};

/// Which font registration set and storage location an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Scope {
    /// All users: `HKLM` and `%WINDIR%\Fonts`.
    #[default]
    Machine,
    /// Current user: `HKCU` and `%LOCALAPPDATA%\Microsoft\Windows\Fonts`.
    User,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Machine, Scope::User];

    /// Short name of the registry hive backing this scope.
    pub fn hive(self) -> &'static str {
        match self {
            Scope::Machine => "HKLM",
            Scope::User => "HKCU",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Machine => f.write_str("machine"),
            Scope::User => f.write_str("user"),
        }
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("machine") {
            Ok(Scope::Machine)
        } else if s.eq_ignore_ascii_case("user") {
            Ok(Scope::User)
        } else {
            Err(format!("unknown scope '{s}' (expected 'machine' or 'user')"))
        }
    }
}

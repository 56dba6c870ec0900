use itertools::Itertools;
use jzon::JsonValue;

/// One annotation attached to an IO group or subsignal.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Constraint {
    /// Package pins, in bit order.
    Pins(Vec<String>),
    IoStandard(String),
    /// A free-form toolchain property, passed through verbatim.
    Misc(String),
    Inverted,
}

/// Builds a [`Constraint::Pins`] from a whitespace-separated pin list.
pub fn pins(s: &str) -> Constraint {
    pins_from(&[s])
}

/// Builds a [`Constraint::Pins`] from several whitespace-separated pin lists, concatenated.
pub fn pins_from(lines: &[&str]) -> Constraint {
    Constraint::Pins(
        lines
            .iter()
            .flat_map(|l| l.split_whitespace())
            .map(|p| p.to_string())
            .collect(),
    )
}

pub fn iostandard(s: &str) -> Constraint {
    Constraint::IoStandard(s.to_string())
}

pub fn misc(s: &str) -> Constraint {
    Constraint::Misc(s.to_string())
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Pins(pins) => write!(f, "Pins(\"{}\")", pins.iter().join(" ")),
            Constraint::IoStandard(s) => write!(f, "IOStandard(\"{s}\")"),
            Constraint::Misc(s) => write!(f, "Misc(\"{s}\")"),
            Constraint::Inverted => write!(f, "Inverted()"),
        }
    }
}

impl From<&Constraint> for JsonValue {
    fn from(value: &Constraint) -> Self {
        match value {
            Constraint::Pins(pins) => jzon::object! {
                kind: "pins",
                pins: Vec::from_iter(pins.iter().map(|p| p.as_str())),
            },
            Constraint::IoStandard(s) => jzon::object! {
                kind: "iostandard",
                value: s.as_str(),
            },
            Constraint::Misc(s) => jzon::object! {
                kind: "misc",
                value: s.as_str(),
            },
            Constraint::Inverted => jzon::object! {
                kind: "inverted",
            },
        }
    }
}

fn find_pins(constraints: &[Constraint]) -> impl Iterator<Item = &Vec<String>> {
    constraints.iter().filter_map(|c| match c {
        Constraint::Pins(p) => Some(p),
        _ => None,
    })
}

fn find_iostandard(constraints: &[Constraint]) -> Option<&str> {
    constraints.iter().rev().find_map(|c| match c {
        Constraint::IoStandard(s) => Some(s.as_str()),
        _ => None,
    })
}

fn find_misc(constraints: &[Constraint]) -> impl Iterator<Item = &str> {
    constraints.iter().filter_map(|c| match c {
        Constraint::Misc(s) => Some(s.as_str()),
        _ => None,
    })
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subsignal {
    pub name: String,
    pub constraints: Vec<Constraint>,
}

impl Subsignal {
    pub fn new(name: &str, constraints: Vec<Constraint>) -> Self {
        Self {
            name: name.to_string(),
            constraints,
        }
    }
}

impl From<&Subsignal> for JsonValue {
    fn from(sub: &Subsignal) -> Self {
        jzon::object! {
            name: sub.name.as_str(),
            constraints: Vec::from_iter(sub.constraints.iter()),
        }
    }
}

/// A named IO resource of a board, identified by `(name, index)`.
///
/// A group either carries its own [`Constraint::Pins`] (a plain signal), or a list of
/// subsignals with their own pins.  Constraints on the group apply to all subsignals,
/// except that a subsignal's own IO standard takes precedence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IoGroup {
    pub name: String,
    pub index: u32,
    pub subsignals: Vec<Subsignal>,
    pub constraints: Vec<Constraint>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IoGroupError {
    MissingPins(String),
    DuplicatePins(String),
    PinsOnCompositeGroup(String),
    DuplicateSubsignal(String),
}

impl std::fmt::Display for IoGroupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoGroupError::MissingPins(name) => write!(f, "{name}: no pins"),
            IoGroupError::DuplicatePins(name) => write!(f, "{name}: pins given more than once"),
            IoGroupError::PinsOnCompositeGroup(name) => {
                write!(f, "{name}: pins given on a group with subsignals")
            }
            IoGroupError::DuplicateSubsignal(name) => write!(f, "{name}: duplicate subsignal"),
        }
    }
}

impl std::error::Error for IoGroupError {}

/// A single signal of a group with all applicable constraints merged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedSignal<'a> {
    /// The port name: group name (with a non-zero index appended), then `_subsignal`.
    pub port: String,
    pub pins: &'a [String],
    pub iostandard: Option<&'a str>,
    pub misc: Vec<&'a str>,
    pub inverted: bool,
}

impl IoGroup {
    pub fn new(name: &str, index: u32, constraints: Vec<Constraint>) -> Self {
        Self {
            name: name.to_string(),
            index,
            subsignals: vec![],
            constraints,
        }
    }

    pub fn with_subsignals(
        name: &str,
        index: u32,
        subsignals: Vec<Subsignal>,
        constraints: Vec<Constraint>,
    ) -> Self {
        Self {
            name: name.to_string(),
            index,
            subsignals,
            constraints,
        }
    }

    pub fn port_name(&self) -> String {
        if self.index == 0 {
            self.name.clone()
        } else {
            format!("{}{}", self.name, self.index)
        }
    }

    pub fn subsignal(&self, name: &str) -> Option<&Subsignal> {
        self.subsignals.iter().find(|s| s.name == name)
    }

    /// Checks that every signal has exactly one pin list and subsignal names are unique.
    pub fn check(&self) -> Result<(), IoGroupError> {
        let tag = format!("{}:{}", self.name, self.index);
        let group_pins = find_pins(&self.constraints).count();
        if self.subsignals.is_empty() {
            match group_pins {
                0 => return Err(IoGroupError::MissingPins(tag)),
                1 => (),
                _ => return Err(IoGroupError::DuplicatePins(tag)),
            }
            return Ok(());
        }
        if group_pins != 0 {
            return Err(IoGroupError::PinsOnCompositeGroup(tag));
        }
        if let Some(dup) = self.subsignals.iter().map(|s| &s.name).duplicates().next() {
            return Err(IoGroupError::DuplicateSubsignal(format!("{tag}.{dup}")));
        }
        for sub in &self.subsignals {
            let stag = format!("{tag}.{}", sub.name);
            match find_pins(&sub.constraints).count() {
                0 => return Err(IoGroupError::MissingPins(stag)),
                1 => (),
                _ => return Err(IoGroupError::DuplicatePins(stag)),
            }
        }
        Ok(())
    }

    /// Flattens the group into its signals.  Signals without pins are skipped.
    pub fn resolve(&self) -> Vec<ResolvedSignal<'_>> {
        let group_std = find_iostandard(&self.constraints);
        let group_inv = self.constraints.contains(&Constraint::Inverted);
        if self.subsignals.is_empty() {
            return find_pins(&self.constraints)
                .next()
                .map(|pins| ResolvedSignal {
                    port: self.port_name(),
                    pins,
                    iostandard: group_std,
                    misc: find_misc(&self.constraints).collect(),
                    inverted: group_inv,
                })
                .into_iter()
                .collect();
        }
        let prefix = self.port_name();
        self.subsignals
            .iter()
            .filter_map(|sub| {
                let pins = find_pins(&sub.constraints).next()?;
                Some(ResolvedSignal {
                    port: format!("{prefix}_{}", sub.name),
                    pins,
                    iostandard: find_iostandard(&sub.constraints).or(group_std),
                    misc: find_misc(&self.constraints)
                        .chain(find_misc(&sub.constraints))
                        .collect(),
                    inverted: group_inv || sub.constraints.contains(&Constraint::Inverted),
                })
            })
            .collect()
    }

    /// Total number of pins used by the group.
    pub fn width(&self) -> usize {
        self.resolve().iter().map(|s| s.pins.len()).sum()
    }
}

impl From<&IoGroup> for JsonValue {
    fn from(group: &IoGroup) -> Self {
        jzon::object! {
            name: group.name.as_str(),
            index: group.index,
            constraints: Vec::from_iter(group.constraints.iter()),
            subsignals: Vec::from_iter(group.subsignals.iter()),
        }
    }
}

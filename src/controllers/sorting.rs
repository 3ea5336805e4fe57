use std::fmt;
use std::str::FromStr;

use super::FieldName;

/// Direction of the single active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("invalid sort direction '{}': expected asc or desc", other)),
        }
    }
}

/// Single-column sort over a declared field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sorting<F: FieldName> {
    field: F,
    direction: SortDirection,
}

impl<F: FieldName> Sorting<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn field(&self) -> F {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Reselecting the active field flips the direction; any other field
    /// becomes active in ascending order.
    pub fn handle_sort_change(&mut self, field: F) {
        if field == self.field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.flipped();
    }

    pub fn set_sorting(&mut self, field: F, direction: SortDirection) {
        self.field = field;
        self.direction = direction;
    }

    /// Value of the backend `sort` parameter: `field,direction`.
    pub fn sort_string(&self) -> String {
        format!("{},{}", self.field.name(), self.direction)
    }
}

//! Sortable and filterable fields declared per list.
//!
//! Each list declares a closed set of names so that sorting, filtering and
//! query building are checked against that list's schema.

use crate::controllers::FieldName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ActivitySort {
    StartDate,
    EndDate,
    ActivityName,
    CreatedAt,
    CapacityLimit,
}

impl FieldName for ActivitySort {
    fn name(&self) -> &'static str {
        match self {
            ActivitySort::StartDate => "startDate",
            ActivitySort::EndDate => "endDate",
            ActivitySort::ActivityName => "activityName",
            ActivitySort::CreatedAt => "createdAt",
            ActivitySort::CapacityLimit => "capacityLimit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityFilter {
    Search,
    Status,
    Category,
    StartDate,
    EndDate,
}

impl FieldName for ActivityFilter {
    fn name(&self) -> &'static str {
        match self {
            ActivityFilter::Search => "search",
            ActivityFilter::Status => "activityStatus",
            ActivityFilter::Category => "activityCategory",
            ActivityFilter::StartDate => "startDate",
            ActivityFilter::EndDate => "endDate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ParticipantSort {
    RegisteredAt,
    FullName,
    Email,
}

impl FieldName for ParticipantSort {
    fn name(&self) -> &'static str {
        match self {
            ParticipantSort::RegisteredAt => "registeredAt",
            ParticipantSort::FullName => "fullName",
            ParticipantSort::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticipantFilter {
    Search,
    Role,
    Verified,
}

impl FieldName for ParticipantFilter {
    fn name(&self) -> &'static str {
        match self {
            ParticipantFilter::Search => "search",
            ParticipantFilter::Role => "participationRole",
            ParticipantFilter::Verified => "isVerified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum AccountSort {
    CreatedAt,
    Email,
    FullName,
}

impl FieldName for AccountSort {
    fn name(&self) -> &'static str {
        match self {
            AccountSort::CreatedAt => "createdAt",
            AccountSort::Email => "email",
            AccountSort::FullName => "fullName",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountFilter {
    Search,
    Role,
    Active,
}

impl FieldName for AccountFilter {
    fn name(&self) -> &'static str {
        match self {
            AccountFilter::Search => "search",
            AccountFilter::Role => "role",
            AccountFilter::Active => "isActive",
        }
    }
}

/// Fields of the activity create/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityFormField {
    ActivityName,
    Description,
    Address,
    CapacityLimit,
    ContactEmail,
    ContactPhone,
}

impl FieldName for ActivityFormField {
    fn name(&self) -> &'static str {
        match self {
            ActivityFormField::ActivityName => "activityName",
            ActivityFormField::Description => "description",
            ActivityFormField::Address => "address",
            ActivityFormField::CapacityLimit => "capacityLimit",
            ActivityFormField::ContactEmail => "contactEmail",
            ActivityFormField::ContactPhone => "contactPhone",
        }
    }
}

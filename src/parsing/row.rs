use serde::{Deserialize, Serialize};

/// One census row projected onto the uniform schema the person builder reads.
///
/// Every field is raw text exactly as transcribed; `None` means the cell was
/// empty or the column does not exist in this dataset vintage. Cleaning and
/// validation happen in [`crate::core::person`], not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    /// House number, sometimes with a suffix ("12bis")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,

    /// Free text; frequently unreadable or approximate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,

    /// Birthplace, only present in some vintages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// `|`-separated first names of the children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_first_names: Option<String>,

    /// `|`-separated birth years, index-aligned with the names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_birth_years: Option<String>,
}

impl CensusRow {
    /// Row with only a name, for building fixtures.
    #[must_use]
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_birth_year(mut self, birth_year: impl Into<String>) -> Self {
        self.birth_year = Some(birth_year.into());
        self
    }

    #[must_use]
    pub fn with_address(mut self, street: impl Into<String>, house_number: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self.house_number = Some(house_number.into());
        self
    }

    #[must_use]
    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = Some(job.into());
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, names: impl Into<String>, birth_years: impl Into<String>) -> Self {
        self.children_first_names = Some(names.into());
        self.children_birth_years = Some(birth_years.into());
        self
    }
}

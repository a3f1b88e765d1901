//! Company entity, partial updates, and list filters

use serde::{Deserialize, Serialize};

/// A company that posts jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub num_employees: Option<i32>,
    pub description: String,
    pub logo_url: Option<String>,
}

impl Company {
    pub fn new(
        handle: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            handle: handle.into(),
            name: name.into(),
            num_employees: None,
            description: description.into(),
            logo_url: None,
        }
    }

    pub fn with_num_employees(mut self, num_employees: Option<i32>) -> Self {
        self.num_employees = num_employees;
        self
    }

    pub fn with_logo_url(mut self, logo_url: Option<String>) -> Self {
        self.logo_url = logo_url;
        self
    }

    /// Apply a partial update; the handle is immutable
    pub fn apply(&mut self, changes: &CompanyChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(num_employees) = changes.num_employees {
            self.num_employees = num_employees;
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(logo_url) = &changes.logo_url {
            self.logo_url = logo_url.clone();
        }
    }
}

/// Partial update of a company; `Some(None)` clears a nullable column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub num_employees: Option<Option<i32>>,
    pub description: Option<String>,
    pub logo_url: Option<Option<String>>,
}

/// Filter for listing companies
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyFilter {
    /// Case-insensitive substring match on the name
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Check whether a company passes the filter
    pub fn matches(&self, company: &Company) -> bool {
        if let Some(name) = &self.name {
            if !company.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }

        if self.min_employees.is_some() || self.max_employees.is_some() {
            let Some(count) = company.num_employees else {
                return false;
            };

            if self.min_employees.is_some_and(|min| count < min) {
                return false;
            }
            if self.max_employees.is_some_and(|max| count > max) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(name: &str, employees: Option<i32>) -> Company {
        Company::new("c1", name, "Desc").with_num_employees(employees)
    }

    #[test]
    fn test_apply_partial() {
        let mut c = company("C1", Some(1));
        c.apply(&CompanyChanges {
            description: Some("New".to_string()),
            ..Default::default()
        });

        assert_eq!(c.description, "New");
        assert_eq!(c.name, "C1");
        assert_eq!(c.num_employees, Some(1));
    }

    #[test]
    fn test_apply_clears_nullable_fields() {
        let mut c = company("C1", Some(1)).with_logo_url(Some("http://c1.img".to_string()));
        c.apply(&CompanyChanges {
            num_employees: Some(None),
            logo_url: Some(None),
            ..Default::default()
        });

        assert_eq!(c.num_employees, None);
        assert_eq!(c.logo_url, None);
        assert_eq!(c.description, "Desc");
    }

    #[test]
    fn test_filter_by_name_is_case_insensitive() {
        let filter = CompanyFilter {
            name: Some("ARIAS".to_string()),
            ..Default::default()
        };

        assert!(filter.matches(&company("Anderson, Arias and Morrow", None)));
        assert!(!filter.matches(&company("Bauer-Gallagher", None)));
    }

    #[test]
    fn test_filter_by_employee_range() {
        let filter = CompanyFilter {
            min_employees: Some(10),
            max_employees: Some(100),
            ..Default::default()
        };

        assert!(filter.matches(&company("A", Some(10))));
        assert!(filter.matches(&company("B", Some(100))));
        assert!(!filter.matches(&company("C", Some(9))));
        assert!(!filter.matches(&company("D", Some(101))));
        assert!(!filter.matches(&company("E", None)));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(CompanyFilter::default().matches(&company("A", None)));
    }
}

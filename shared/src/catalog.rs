#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub year: &'static str,
    pub page_count: u32,
    pub title: &'static str,
}

/// Built-in projects, in display order.
pub const PROJECT_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        year: "2018",
        page_count: 10,
        title: "Accountancy Project 2018",
    },
    CatalogEntry {
        year: "2019",
        page_count: 10,
        title: "Accountancy Project 2019",
    },
    CatalogEntry {
        year: "2022",
        page_count: 8,
        title: "Accountancy Project 2022",
    },
    CatalogEntry {
        year: "2023",
        page_count: 8,
        title: "Accountancy Project 2023",
    },
    CatalogEntry {
        year: "2024",
        page_count: 8,
        title: "Accountancy Project 2024",
    },
    CatalogEntry {
        year: "2025",
        page_count: 6,
        title: "Accountancy Project 2025",
    },
];

#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    entries: &'static [CatalogEntry],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub const fn builtin() -> Self {
        Self {
            entries: PROJECT_CATALOG,
        }
    }

    pub const fn new(entries: &'static [CatalogEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    pub fn get(&self, year: &str) -> Option<&'static CatalogEntry> {
        let trimmed = year.trim();
        self.entries.iter().find(|entry| entry.year == trimmed)
    }

    pub fn first(&self) -> Option<&'static CatalogEntry> {
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_years_are_in_display_order() {
        let years: Vec<_> = Catalog::builtin()
            .entries()
            .iter()
            .map(|entry| entry.year)
            .collect();
        assert_eq!(years, ["2018", "2019", "2022", "2023", "2024", "2025"]);
    }

    #[test]
    fn lookup_ignores_surrounding_whitespace() {
        let entry = Catalog::builtin().get(" 2025 ").expect("2025 present");
        assert_eq!(entry.page_count, 6);
        assert_eq!(entry.title, "Accountancy Project 2025");
    }

    #[test]
    fn missing_years_are_absent() {
        let catalog = Catalog::builtin();
        assert!(catalog.get("2020").is_none());
        assert!(catalog.get("").is_none());
    }
}

use super::CharFilter;

/// A char filter that lower-cases the whole input.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(
            filter.filter("This Is nOt HoW I wrIte"),
            "this is not how i write"
        );
        assert_eq!(filter.filter("ÉCOLE"), "école");
        assert_eq!(filter.filter(""), "");
    }
}

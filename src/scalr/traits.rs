//! Common traits for Scalr resources

/// Common trait for named Scalr resources (environments, workspaces, tags...)
///
/// Gives id-or-name lookups one shape across resource families.
pub trait ScalrResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;

    /// Check if the resource matches by name or ID
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.name() == input
    }
}

/// First resource matching `input` by id or name
pub fn find_match<'a, R: ScalrResource>(resources: &'a [R], input: &str) -> Option<&'a R> {
    resources.iter().find(|r| r.matches(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        id: String,
        name: String,
    }

    impl ScalrResource for TestResource {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn resource(id: &str, name: &str) -> TestResource {
        TestResource {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_matches_by_id_or_name() {
        let r = resource("env-123", "production");
        assert!(r.matches("env-123"));
        assert!(r.matches("production"));
        assert!(!r.matches("staging"));
    }

    #[test]
    fn test_find_match() {
        let resources = vec![resource("env-1", "dev"), resource("env-2", "prod")];
        assert_eq!(find_match(&resources, "prod").map(|r| r.id()), Some("env-2"));
        assert_eq!(find_match(&resources, "env-1").map(|r| r.name()), Some("dev"));
        assert!(find_match(&resources, "qa").is_none());
    }
}

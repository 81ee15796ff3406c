#[cfg(test)]
mod tests {
    use databox::engine::extract_param_refs;

    #[test]
    fn test_dot_access() {
        assert_eq!(
            extract_param_refs("parameters.rate * parameters.base"),
            vec!["rate", "base"]
        );
    }

    #[test]
    fn test_bracket_access() {
        assert_eq!(
            extract_param_refs(r#"parameters["unit price"] + parameters['margin']"#),
            vec!["unit price", "margin"]
        );
    }

    #[test]
    fn test_mixed_access_deduplicates() {
        assert_eq!(
            extract_param_refs(r#"parameters.rate + parameters["rate"]"#),
            vec!["rate"]
        );
    }

    #[test]
    fn test_whitespace_tolerated() {
        assert_eq!(
            extract_param_refs(r#"parameters . rate + parameters [ "base" ]"#),
            vec!["rate", "base"]
        );
    }

    #[test]
    fn test_no_references() {
        assert!(extract_param_refs("2 * math.pi").is_empty());
    }

    #[test]
    fn test_other_identifiers_ignored() {
        // only the `parameters` scope counts
        assert!(extract_param_refs("query.state .. settings.rate").is_empty());
    }
}

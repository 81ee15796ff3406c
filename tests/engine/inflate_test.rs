#[cfg(test)]
mod tests {
    use databox::catalog::CatalogQuery;
    use databox::engine::{build_plan, inflate, substitute_placeholders, Sandbox};
    use databox::model::{ParamKind, Parameter};
    use databox::value::Value;

    fn run(params: Vec<Parameter>) -> databox::engine::InflatedParams {
        let sandbox = Sandbox::new().unwrap();
        inflate(&params, &CatalogQuery::default(), &sandbox)
    }

    #[test]
    fn test_literals_inflate_to_typed_values() {
        let inflated = run(vec![
            Parameter::literal("client", ParamKind::Str, "ACME"),
            Parameter::literal("count", ParamKind::Int, "3"),
            Parameter::literal("rate", ParamKind::Float, "0.2"),
            Parameter::literal("urgent", ParamKind::Bool, "true"),
        ]);
        assert_eq!(inflated.get("client"), Some(&Value::str("ACME")));
        assert_eq!(inflated.get("count"), Some(&Value::Int(3)));
        assert_eq!(inflated.get("rate"), Some(&Value::Float(0.2)));
        assert_eq!(inflated.get("urgent"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_bad_literal_becomes_error_value() {
        let inflated = run(vec![Parameter::literal("count", ParamKind::Int, "many")]);
        assert!(inflated.get("count").unwrap().is_error());
    }

    #[test]
    fn test_expression_sees_literals() {
        let inflated = run(vec![
            Parameter::literal("base", ParamKind::Int, "100"),
            Parameter::expression("double", "parameters.base * 2"),
        ]);
        assert_eq!(inflated.get("double"), Some(&Value::Int(200)));
    }

    #[test]
    fn test_expressions_evaluate_in_dependency_order() {
        // `gross` depends on `net`, which is defined after it
        let inflated = run(vec![
            Parameter::expression("gross", "parameters.net + parameters.net // 5"),
            Parameter::literal("base", ParamKind::Int, "100"),
            Parameter::expression("net", "parameters.base * 2"),
        ]);
        assert_eq!(inflated.get("net"), Some(&Value::Int(200)));
        assert_eq!(inflated.get("gross"), Some(&Value::Int(240)));
    }

    #[test]
    fn test_plan_orders_literals_first() {
        let params = vec![
            Parameter::expression("a", "parameters.b"),
            Parameter::literal("x", ParamKind::Str, "x"),
            Parameter::expression("b", "1"),
        ];
        let plan = build_plan(&params);
        // literal first, then `b` before its dependent `a`
        assert_eq!(plan.order, vec![1, 2, 0]);
    }

    #[test]
    fn test_cycle_surfaces_as_error_values() {
        let inflated = run(vec![
            Parameter::expression("a", "parameters.b + 1"),
            Parameter::expression("b", "parameters.a + 1"),
        ]);
        let a = inflated.get("a").unwrap();
        let b = inflated.get("b").unwrap();
        assert!(a.is_error());
        assert!(b.is_error());
        assert!(a.to_display().contains("recursive call"));
    }

    #[test]
    fn test_cycle_poisons_dependents() {
        let inflated = run(vec![
            Parameter::expression("a", "parameters.b + 1"),
            Parameter::expression("b", "parameters.a + 1"),
            Parameter::expression("c", "parameters.a * 2"),
            Parameter::expression("clean", "7"),
        ]);
        assert!(inflated.get("c").unwrap().is_error());
        // untouched parameters still evaluate
        assert_eq!(inflated.get("clean"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let inflated = run(vec![Parameter::expression("a", "parameters.a + 1")]);
        assert!(inflated.get("a").unwrap().is_error());
    }

    #[test]
    fn test_evaluation_failure_becomes_error_value() {
        let inflated = run(vec![
            Parameter::expression("bad", "nosuchfunction()"),
            Parameter::expression("fine", "2 + 2"),
        ]);
        assert!(inflated.get("bad").unwrap().is_error());
        assert_eq!(inflated.get("fine"), Some(&Value::Int(4)));
    }

    #[test]
    fn test_unknown_reference_is_not_an_ordering_error() {
        // `parameters.missing` resolves to nil; tostring handles it
        let inflated = run(vec![Parameter::expression(
            "shown",
            "tostring(parameters.missing)",
        )]);
        assert_eq!(inflated.get("shown"), Some(&Value::str("nil")));
    }

    #[test]
    fn test_expression_sees_query() {
        let query = CatalogQuery::for_type("Sample").with_filter("state", "published");
        let sandbox = Sandbox::new().unwrap();
        let params = vec![Parameter::expression("state", "query.state")];
        let inflated = inflate(&params, &query, &sandbox);
        assert_eq!(inflated.get("state"), Some(&Value::str("published")));
    }

    #[test]
    fn test_substitute_placeholders() {
        let query = CatalogQuery::for_type("Sample")
            .with_filter("client", "$client")
            .with_filter("state", "published")
            .with_filter("other", "$missing");
        let inflated = run(vec![Parameter::literal("client", ParamKind::Str, "ACME")]);
        let resolved = substitute_placeholders(&query, &inflated);
        assert_eq!(resolved.filters.get("client"), Some(&Value::str("ACME")));
        assert_eq!(resolved.filters.get("state"), Some(&Value::str("published")));
        // unknown names stay as-is
        assert_eq!(resolved.filters.get("other"), Some(&Value::str("$missing")));
    }

    #[test]
    fn test_iteration_order_matches_evaluation_order() {
        let inflated = run(vec![
            Parameter::expression("second", "parameters.first + 1"),
            Parameter::literal("zeroth", ParamKind::Int, "0"),
            Parameter::expression("first", "1"),
        ]);
        let names: Vec<&str> = inflated.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeroth", "first", "second"]);
    }
}

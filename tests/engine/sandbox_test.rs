#[cfg(test)]
mod tests {
    use databox::engine::Sandbox;
    use databox::value::Value;

    fn eval(source: &str) -> Value {
        let sandbox = Sandbox::new().unwrap();
        sandbox.eval_expr(source, |_, _| Ok(()))
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("2 + 3"), Value::Int(5));
        assert_eq!(eval("10 / 4"), Value::Float(2.5));
    }

    #[test]
    fn test_string_library_available() {
        assert_eq!(eval("string.upper('acme')"), Value::str("ACME"));
        assert_eq!(eval("('a'):rep(3)"), Value::str("aaa"));
    }

    #[test]
    fn test_math_library_available() {
        assert_eq!(eval("math.max(1, 7, 3)"), Value::Int(7));
    }

    #[test]
    fn test_os_and_io_are_unreachable() {
        assert_eq!(eval("os"), Value::Null);
        assert_eq!(eval("io"), Value::Null);
        assert_eq!(eval("require"), Value::Null);
    }

    #[test]
    fn test_syntax_error_is_captured() {
        assert!(eval("2 +").is_error());
    }

    #[test]
    fn test_runtime_error_is_captured() {
        let value = eval("nosuchfunction()");
        assert!(value.is_error());
        // single-line message
        assert!(!value.to_display().contains('\n'));
    }

    #[test]
    fn test_bindings_are_visible() {
        let sandbox = Sandbox::new().unwrap();
        let value = sandbox.eval_expr("greeting .. ', ' .. name", |_, env| {
            env.set("greeting", "hello")?;
            env.set("name", "databox")?;
            Ok(())
        });
        assert_eq!(value, Value::str("hello, databox"));
    }

    #[test]
    fn test_bindings_do_not_leak_between_evaluations() {
        let sandbox = Sandbox::new().unwrap();
        let first = sandbox.eval_expr("secret", |_, env| {
            env.set("secret", 42)?;
            Ok(())
        });
        assert_eq!(first, Value::Int(42));

        let second = sandbox.eval_expr("secret", |_, _| Ok(()));
        assert_eq!(second, Value::Null);
    }

    #[test]
    fn test_table_result_becomes_list() {
        let value = eval("{1, 'two', 3.5}");
        assert_eq!(
            value,
            Value::List(vec![Value::Int(1), Value::str("two"), Value::Float(3.5)])
        );
    }

    #[test]
    fn test_value_table_binding() {
        let sandbox = Sandbox::new().unwrap();
        let rate = Value::Float(0.2);
        let entries = vec![("rate", &rate)];
        let value = sandbox.eval_expr("parameters.rate * 100", |_, env| {
            env.set("parameters", sandbox.value_table(entries)?)?;
            Ok(())
        });
        assert_eq!(value, Value::Float(20.0));
    }
}

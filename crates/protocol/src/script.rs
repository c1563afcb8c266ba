//! [`PageScript`] and its invocation rendering.

use serde_json::Value;

/// A routine executed inside the page context.
///
/// `source` is a JavaScript function declaration (arrow or `function`). It is
/// never spliced with host strings: arguments are JSON-encoded and applied by
/// [`invocation`](Self::invocation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageScript {
	/// Stable identifier, used in diagnostics and by test doubles.
	pub name: &'static str,
	/// Function declaration source.
	pub source: &'static str,
}

impl PageScript {
	/// Creates a script from a name and a function declaration.
	pub const fn new(name: &'static str, source: &'static str) -> Self {
		Self { name, source }
	}

	/// Renders `(<source>)(<arg0>, <arg1>, ...)` with every argument JSON-encoded.
	///
	/// # Errors
	///
	/// Returns a [`serde_json::Error`] if an argument cannot be serialized.
	pub fn invocation(&self, args: &[Value]) -> serde_json::Result<String> {
		let mut rendered = Vec::with_capacity(args.len());
		for arg in args {
			rendered.push(serde_json::to_string(arg)?);
		}
		Ok(format!("({})({})", self.source.trim(), rendered.join(", ")))
	}
}

impl std::fmt::Display for PageScript {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	const ECHO: PageScript = PageScript::new("echo", "\n  (value) => value\n");

	#[test]
	fn invocation_without_args() {
		assert_eq!(ECHO.invocation(&[]).unwrap(), "((value) => value)()");
	}

	#[test]
	fn invocation_encodes_args_as_json() {
		let rendered = ECHO.invocation(&[json!("a'b\"c"), json!({"n": 1})]).unwrap();
		assert_eq!(rendered, r#"((value) => value)("a'b\"c", {"n":1})"#);
	}

	#[test]
	fn display_uses_name() {
		assert_eq!(ECHO.to_string(), "echo");
	}
}

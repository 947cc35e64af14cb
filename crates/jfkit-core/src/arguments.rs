//! Argument lists with per-argument masking.
//!
//! Masked arguments are passed to the process verbatim but render as
//! [`MASK`] wherever the command line is displayed or logged.

use std::fmt;

/// Placeholder shown instead of a masked argument.
pub const MASK: &str = "******";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    args: Vec<String>,
    masks: Vec<bool>,
}

impl ArgumentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plain argument.
    pub fn add(&mut self, arg: impl Into<String>) -> &mut Self {
        self.push(arg.into(), false)
    }

    /// Append an argument that must never be displayed.
    pub fn add_masked(&mut self, arg: impl Into<String>) -> &mut Self {
        self.push(arg.into(), true)
    }

    pub fn add_all<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for arg in args {
            self.add(arg);
        }
        self
    }

    fn push(&mut self, arg: String, masked: bool) -> &mut Self {
        self.args.push(arg);
        self.masks.push(masked);
        self
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Raw arguments, including masked values.
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn is_masked(&self, index: usize) -> bool {
        self.masks.get(index).copied().unwrap_or(false)
    }

    /// Arguments as they may be shown to an operator.
    pub fn to_display_vec(&self) -> Vec<String> {
        self.args
            .iter()
            .zip(&self.masks)
            .map(|(arg, &masked)| if masked { MASK.to_string() } else { arg.clone() })
            .collect()
    }

    /// Wrap the command for `cmd.exe`.
    ///
    /// Arguments containing spaces or shell metacharacters are quoted, embedded
    /// quotes are doubled, and the command is suffixed with
    /// `&& exit %%ERRORLEVEL%%` so batch wrappers report the real exit code.
    /// Masking is carried over per argument.
    #[must_use]
    pub fn to_windows_command(&self) -> Self {
        let mut windows = Self::new();
        windows.add("cmd.exe").add("/C");

        for (index, (arg, &masked)) in self.args.iter().zip(&self.masks).enumerate() {
            let mut quoted_arg = String::new();
            let mut quoted = false;

            for (pos, c) in arg.char_indices() {
                match c {
                    ' ' | '*' | '?' | ',' | ';' | '^' | '&' | '<' | '>' | '|' if !quoted => {
                        quoted_arg.push('"');
                        quoted_arg.push_str(&arg[..pos]);
                        quoted = true;
                    }
                    '"' => {
                        if !quoted {
                            quoted_arg.push('"');
                            quoted_arg.push_str(&arg[..pos]);
                            quoted = true;
                        }
                        quoted_arg.push('"');
                    }
                    _ => {}
                }
                if quoted {
                    quoted_arg.push(c);
                }
            }

            // The whole command line is wrapped in one outer pair of quotes,
            // opened before the first argument and closed after %%ERRORLEVEL%%.
            if index == 0 {
                quoted_arg.insert(0, '"');
            }
            if quoted {
                quoted_arg.push('"');
            } else {
                quoted_arg.push_str(arg);
            }

            windows.push(quoted_arg, masked);
        }

        windows.add("&&").add("exit").add("%%ERRORLEVEL%%\"");
        windows
    }
}

impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .to_display_vec()
            .into_iter()
            .map(|arg| {
                if arg.is_empty() || arg.contains(char::is_whitespace) {
                    format!("\"{arg}\"")
                } else {
                    arg
                }
            })
            .collect();
        f.write_str(&rendered.join(" "))
    }
}

impl fmt::Debug for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_display_vec()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_arguments_are_hidden_in_display() {
        let mut args = ArgumentList::new();
        args.add("jf").add("c").add("add").add_masked("--access-token=secret");

        assert_eq!(args.as_slice()[3], "--access-token=secret");
        assert_eq!(args.to_string(), "jf c add ******");
        assert!(!format!("{args:?}").contains("secret"));
        assert!(args.is_masked(3));
        assert!(!args.is_masked(0));
        assert!(!args.is_masked(42));
    }

    #[test]
    fn test_display_quotes_whitespace() {
        let mut args = ArgumentList::new();
        args.add_all(["jf", "rt", "u", "a b"]);
        assert_eq!(args.to_string(), "jf rt u \"a b\"");
    }

    #[test]
    fn test_windows_command_plain() {
        let mut args = ArgumentList::new();
        args.add_all(["jf", "rt", "ping"]);
        let windows = args.to_windows_command();
        assert_eq!(
            windows.as_slice(),
            [
                "cmd.exe",
                "/C",
                "\"jf",
                "rt",
                "ping",
                "&&",
                "exit",
                "%%ERRORLEVEL%%\""
            ]
        );
    }

    #[test]
    fn test_windows_command_quotes_special_characters() {
        let mut args = ArgumentList::new();
        args.add_all(["C:\\Program Files\\jf.exe", "rt", "u", "*.zip", "say \"hi\""]);
        let windows = args.to_windows_command();
        let slice = windows.as_slice();
        assert_eq!(slice[2], "\"\"C:\\Program Files\\jf.exe\"");
        assert_eq!(slice[5], "\"*.zip\"");
        assert_eq!(slice[6], "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_windows_command_keeps_masks() {
        let mut args = ArgumentList::new();
        args.add("jf").add_masked("--password=p");
        let windows = args.to_windows_command();
        assert!(windows.is_masked(3));
        assert!(!windows.is_masked(2));
    }
}
